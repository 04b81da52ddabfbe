#![cfg(target_arch = "wasm32")]
use ambience_core::{Mixer, MixerParams, TRACKS};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

mod audio;
mod constants;
mod dom;
mod events;
mod icons;
mod loader;

pub type SharedMixer = Rc<RefCell<Mixer>>;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("ambience-web starting");

    if let Err(e) = init() {
        log::error!("init error: {:?}", e);
    }
    Ok(())
}

fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;

    let mixer: SharedMixer = Rc::new(RefCell::new(Mixer::new(
        TRACKS.to_vec(),
        MixerParams::default(),
    )));
    let session: audio::SharedSession = Rc::new(RefCell::new(None));

    let wiring = events::Wiring {
        document,
        mixer: Rc::clone(&mixer),
        session: Rc::clone(&session),
    };
    events::wire_track_controls(&wiring);
    events::wire_master_control(&wiring);
    events::wire_play_pause(&wiring);

    // Try to bring the graph up before any gesture so downloads start early.
    // Browsers that refuse get a second chance inside the play click.
    let (lane_count, master) = {
        let m = mixer.borrow();
        (m.tracks.len(), m.master_slider)
    };
    match audio::ensure_session(&session, lane_count, master) {
        Ok(true) => loader::spawn_all(&mixer, &session),
        Ok(false) => {}
        Err(e) => log::info!("[session] auto-init deferred: {}", e),
    }
    Ok(())
}
