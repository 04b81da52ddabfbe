//! Volume-driven icon state, kept platform-free.
//!
//! The mapping is a pure function of the raw slider value (trims are
//! audio-only) so the frontend can sync icons before the audio graph even
//! exists.

// Icon opacity spans [OPACITY_FLOOR, OPACITY_FLOOR + OPACITY_SPAN] as the
// slider moves through (0, 1].
pub const OPACITY_FLOOR: f32 = 0.4;
pub const OPACITY_SPAN: f32 = 0.6;

/// What a track's column should look like for a given volume.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisualState {
    pub active: bool,
    /// Inline icon opacity; `None` means leave the stylesheet default.
    pub opacity: Option<f32>,
}

pub fn visual_state(volume: f32) -> VisualState {
    if volume > 0.0 {
        VisualState {
            active: true,
            opacity: Some(OPACITY_FLOOR + volume * OPACITY_SPAN),
        }
    } else {
        VisualState {
            active: false,
            opacity: None,
        }
    }
}
