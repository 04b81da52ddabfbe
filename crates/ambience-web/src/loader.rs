//! Fetches and decodes the track assets, one task per track.
//!
//! Tracks land independently: each successful decode attaches its lane
//! to the master bus at the lane's current level, so a slow file never
//! blocks the rest of the mix.

use crate::audio::SharedSession;
use crate::SharedMixer;
use ambience_core::{AudioError, TrackDescriptor};
use instant::Instant;
use std::rc::Rc;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

async fn load_track(
    ctx: &web::AudioContext,
    track: &TrackDescriptor,
) -> Result<web::AudioBuffer, AudioError> {
    let path = track.asset_path;
    let window = web::window().ok_or_else(|| AudioError::Fetch {
        path: path.into(),
        status: 0,
    })?;
    let resp_value = JsFuture::from(window.fetch_with_str(path))
        .await
        .map_err(|_| AudioError::Fetch {
            path: path.into(),
            status: 0,
        })?;
    let resp = web::Response::from(resp_value);
    if !resp.ok() {
        return Err(AudioError::Fetch {
            path: path.into(),
            status: resp.status(),
        });
    }
    let promise = resp.array_buffer().map_err(|_| AudioError::Fetch {
        path: path.into(),
        status: 0,
    })?;
    let array_buffer = js_sys::ArrayBuffer::from(JsFuture::from(promise).await.map_err(|_| {
        AudioError::Fetch {
            path: path.into(),
            status: 0,
        }
    })?);
    let decode_promise = ctx
        .decode_audio_data(&array_buffer)
        .map_err(|e| AudioError::Decode {
            id: track.id.into(),
            message: format!("{:?}", e),
        })?;
    let decoded = JsFuture::from(decode_promise)
        .await
        .map_err(|e| AudioError::Decode {
            id: track.id.into(),
            message: format!("{:?}", e),
        })?;
    Ok(web::AudioBuffer::from(decoded))
}

pub fn spawn_all(mixer: &SharedMixer, session: &SharedSession) {
    let tracks = mixer.borrow().tracks.clone();
    for (index, track) in tracks.into_iter().enumerate() {
        let mixer = Rc::clone(mixer);
        let session = Rc::clone(session);
        spawn_local(async move {
            let started = Instant::now();
            let ctx = match session.borrow().as_ref() {
                Some(s) => s.ctx.clone(),
                None => return,
            };
            match load_track(&ctx, &track).await {
                Ok(buffer) => {
                    let duration = buffer.duration();
                    let level = {
                        let mut m = mixer.borrow_mut();
                        m.mark_loaded(index);
                        m.effective_gain(index)
                    };
                    if let Some(s) = session.borrow_mut().as_mut() {
                        s.attach_lane(index, track.id, buffer, level);
                    }
                    log::info!(
                        "[loader] {} ready: {:.1}s audio in {} ms",
                        track.id,
                        duration,
                        started.elapsed().as_millis()
                    );
                }
                Err(e) => {
                    mixer.borrow_mut().mark_failed(index);
                    log::error!("[loader] {} failed: {}", track.id, e);
                }
            }
            let m = mixer.borrow();
            if m.all_loads_settled() {
                log::info!(
                    "[loader] all tracks settled: {} loaded, {} failed",
                    m.loaded_count(),
                    m.failed_count()
                );
            }
        });
    }
}
