use crate::constants::*;
use ambience_core::VisualState;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Mirror a lane's slider level onto its icon column.
pub fn apply_track_visual(document: &web::Document, track_id: &str, visual: VisualState) {
    let column = match document.query_selector(&track_column_selector(track_id)) {
        Ok(Some(el)) => el,
        _ => return,
    };
    let cl = column.class_list();
    if visual.active {
        _ = cl.add_1(ACTIVE_CLASS);
    } else {
        _ = cl.remove_1(ACTIVE_CLASS);
    }

    let svg = match column.query_selector(ICON_SVG_SELECTOR) {
        Ok(Some(el)) => el,
        _ => return,
    };
    if let Some(opacity) = visual.opacity {
        _ = svg.set_attribute("style", &format!("opacity:{};filter:none", opacity));
    } else {
        _ = svg.set_attribute("style", "");
    }

    let stroke = if visual.active {
        gradient_stroke(track_id)
    } else {
        INACTIVE_STROKE.to_string()
    };
    if let Ok(shapes) = svg.query_selector_all(SVG_SHAPES_SELECTOR) {
        for i in 0..shapes.length() {
            let el = match shapes.item(i).and_then(|n| n.dyn_into::<web::Element>().ok()) {
                Some(el) => el,
                None => continue,
            };
            _ = el.set_attribute("style", &format!("stroke:{}", stroke));
        }
    }
}

/// Swap the play/pause glyphs and the button's aria-label.
pub fn set_play_button(document: &web::Document, playing: bool) {
    if let Some(play) = document.get_element_by_id(ICON_PLAY_ID) {
        let cl = play.class_list();
        if playing {
            _ = cl.add_1(HIDDEN_CLASS);
        } else {
            _ = cl.remove_1(HIDDEN_CLASS);
        }
    }
    if let Some(pause) = document.get_element_by_id(ICON_PAUSE_ID) {
        let cl = pause.class_list();
        if playing {
            _ = cl.remove_1(HIDDEN_CLASS);
        } else {
            _ = cl.add_1(HIDDEN_CLASS);
        }
    }
    if let Some(btn) = document.get_element_by_id(PLAY_PAUSE_BTN_ID) {
        _ = btn.set_attribute("aria-label", if playing { "Pause" } else { "Play" });
    }
}
