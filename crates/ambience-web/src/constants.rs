// DOM contract with the page. The mixer only assumes these hooks exist;
// missing ones are logged and skipped.

// Master transport controls
pub const PLAY_PAUSE_BTN_ID: &str = "master-play-pause";
pub const ICON_PLAY_ID: &str = "icon-play";
pub const ICON_PAUSE_ID: &str = "icon-pause";
pub const MASTER_VOLUME_ID: &str = "master-volume";

// Class names toggled on page elements
pub const HIDDEN_CLASS: &str = "hidden";
pub const ACTIVE_CLASS: &str = "active";

// Per-track column internals
pub const ICON_SVG_SELECTOR: &str = ".icon-wrapper svg";
pub const SVG_SHAPES_SELECTOR: &str = "path, line, circle, polyline, polygon, rect";

// Icon stroke when a track sits at zero volume
pub const INACTIVE_STROKE: &str = "#cccccc";

#[inline]
pub fn track_column_selector(id: &str) -> String {
    format!(".track-column[data-track=\"{}\"]", id)
}

#[inline]
pub fn track_slider_selector(id: &str) -> String {
    format!(".track-column[data-track=\"{}\"] input[type=\"range\"]", id)
}

// Each track's gradient is defined by the page as
// <linearGradient id="grad-<track>">.
#[inline]
pub fn gradient_stroke(id: &str) -> String {
    format!("url(#grad-{})", id)
}
