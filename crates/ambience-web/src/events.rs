use crate::audio::{self, SharedSession};
use crate::constants::*;
use crate::dom;
use crate::icons;
use crate::loader;
use crate::SharedMixer;
use ambience_core::{visual_state, Stop, Toggle};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

pub struct Wiring {
    pub document: web::Document,
    pub mixer: SharedMixer,
    pub session: SharedSession,
}

/// Push one lane's slider value through the model, the audio graph and the icon.
fn sync_lane(
    document: &web::Document,
    mixer: &SharedMixer,
    session: &SharedSession,
    index: usize,
    id: &str,
    value: f64,
) {
    let value = if value.is_finite() { value as f32 } else { 0.0 };
    let (slider, effective, tau) = {
        let mut m = mixer.borrow_mut();
        match m.set_lane_slider(index, value) {
            Some(effective) => (m.lanes[index].slider, effective, m.params.glide_tau_sec),
            None => return,
        }
    };
    if let Some(s) = session.borrow().as_ref() {
        s.glide_lane(index, effective, tau);
    }
    icons::apply_track_visual(document, id, visual_state(slider));
    log::debug!("[mixer] {} level {:.2} (lane gain {:.2})", id, slider, effective);
}

fn sync_master(mixer: &SharedMixer, session: &SharedSession, value: f64) {
    let value = if value.is_finite() { value as f32 } else { 0.0 };
    let (target, tau) = {
        let mut m = mixer.borrow_mut();
        (m.set_master_slider(value), m.params.glide_tau_sec)
    };
    if let Some(s) = session.borrow().as_ref() {
        s.glide_master(target, tau);
    }
    log::debug!("[mixer] master level {:.2}", target);
}

pub fn wire_track_controls(w: &Wiring) {
    let tracks = w.mixer.borrow().tracks.clone();
    for (index, track) in tracks.into_iter().enumerate() {
        let slider = match w.document.query_selector(&track_slider_selector(track.id)) {
            Ok(Some(el)) => match el.dyn_into::<web::HtmlInputElement>() {
                Ok(input) => input,
                Err(_) => {
                    log::warn!("[ui] {} control is not a range input", track.id);
                    continue;
                }
            },
            _ => {
                log::warn!("[ui] missing controls for track {}", track.id);
                continue;
            }
        };
        // Seed the model and icon from the markup's starting position.
        sync_lane(
            &w.document,
            &w.mixer,
            &w.session,
            index,
            track.id,
            slider.value_as_number(),
        );

        let document = w.document.clone();
        let mixer = Rc::clone(&w.mixer);
        let session = Rc::clone(&w.session);
        let slider_in = slider.clone();
        dom::add_input_listener(&slider, move || {
            sync_lane(
                &document,
                &mixer,
                &session,
                index,
                track.id,
                slider_in.value_as_number(),
            );
        });
    }
}

pub fn wire_master_control(w: &Wiring) {
    let slider = match w
        .document
        .get_element_by_id(MASTER_VOLUME_ID)
        .and_then(|el| el.dyn_into::<web::HtmlInputElement>().ok())
    {
        Some(s) => s,
        None => {
            log::warn!("[ui] missing #{}; master control not wired", MASTER_VOLUME_ID);
            return;
        }
    };
    sync_master(&w.mixer, &w.session, slider.value_as_number());

    let mixer = Rc::clone(&w.mixer);
    let session = Rc::clone(&w.session);
    let slider_in = slider.clone();
    dom::add_input_listener(&slider, move || {
        sync_master(&mixer, &session, slider_in.value_as_number());
    });
}

pub fn wire_play_pause(w: &Wiring) {
    let document = w.document.clone();
    let mixer = Rc::clone(&w.mixer);
    let session = Rc::clone(&w.session);
    dom::add_click_listener(&w.document, PLAY_PAUSE_BTN_ID, move || {
        let document = document.clone();
        let mixer = Rc::clone(&mixer);
        let session = Rc::clone(&session);
        spawn_local(async move {
            toggle_playback(document, mixer, session).await;
        });
    });
}

async fn toggle_playback(document: web::Document, mixer: SharedMixer, session: SharedSession) {
    // First gesture may have to build the graph and kick off the downloads.
    let (lane_count, master) = {
        let m = mixer.borrow();
        (m.tracks.len(), m.master_slider)
    };
    match audio::ensure_session(&session, lane_count, master) {
        Ok(true) => loader::spawn_all(&mixer, &session),
        Ok(false) => {}
        Err(e) => {
            log::error!("[session] {}", e);
            return;
        }
    }

    // Autoplay policy can leave a fresh context suspended until a gesture.
    let pending = session.borrow().as_ref().and_then(|s| s.resume_if_suspended());
    if let Some(promise) = pending {
        if let Err(e) = JsFuture::from(promise).await {
            log::warn!("[session] resume failed: {:?}", e);
            return;
        }
    }

    let directive = mixer.borrow_mut().toggle();
    match directive {
        Toggle::Start {
            lanes,
            master_target,
            fade_in_sec,
        } => {
            if let Some(s) = session.borrow_mut().as_mut() {
                for index in lanes.iter().copied() {
                    s.start_lane(index);
                }
                s.fade_in_master(master_target, fade_in_sec);
            }
            icons::set_play_button(&document, true);
            log::info!("[transport] playing ({} lanes)", lanes.len());
        }
        Toggle::FadeOut { fade_out_sec } => {
            if let Some(s) = session.borrow().as_ref() {
                s.fade_out_master(fade_out_sec);
            }
            log::info!("[transport] fading out");
            let document_t = document.clone();
            let mixer_t = Rc::clone(&mixer);
            let session_t = Rc::clone(&session);
            dom::set_timeout_once((fade_out_sec * 1000.0) as i32, move || {
                if let Some(Stop { resting_master }) = mixer_t.borrow_mut().finish_fade_out() {
                    if let Some(s) = session_t.borrow_mut().as_mut() {
                        s.stop_all_sources();
                        s.rest_master_at(resting_master);
                    }
                    icons::set_play_button(&document_t, false);
                    log::info!("[transport] stopped");
                }
            });
        }
        Toggle::Ignore => {
            log::warn!("[transport] toggle ignored while fading out");
        }
    }
}
