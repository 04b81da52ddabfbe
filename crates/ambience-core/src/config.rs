// Track table and transport tuning shared by the model and the web frontend.

/// One ambient loop: stable id, fetchable asset path, and a fixed
/// attenuation multiplier applied to its slider value.
#[derive(Clone, Copy, Debug)]
pub struct TrackDescriptor {
    pub id: &'static str,
    pub asset_path: &'static str,
    pub trim: f32,
}

// The waves recording is hotter than the rest of the set; pull it down so a
// full slider sits level with the other loops.
pub const WAVES_TRIM: f32 = 0.6;

pub const TRACKS: &[TrackDescriptor] = &[
    TrackDescriptor {
        id: "rain",
        asset_path: "./assets/audio/RAIN.mp3",
        trim: 1.0,
    },
    TrackDescriptor {
        id: "wind",
        asset_path: "./assets/audio/Vent.mp3",
        trim: 1.0,
    },
    TrackDescriptor {
        id: "waves",
        asset_path: "./assets/audio/waves.mp3",
        trim: WAVES_TRIM,
    },
    TrackDescriptor {
        id: "fire",
        asset_path: "./assets/audio/FEU.mp3",
        trim: 1.0,
    },
    TrackDescriptor {
        id: "birds",
        asset_path: "./assets/audio/Oiseaux.wav",
        trim: 1.0,
    },
];

/// Transport timing tunables, all in seconds.
#[derive(Clone, Debug)]
pub struct MixerParams {
    /// Master ramp 0 -> slider value when playback starts.
    pub fade_in_sec: f64,
    /// Master ramp current -> 0 when playback pauses; also the delay before
    /// sources are torn down.
    pub fade_out_sec: f64,
    /// Time constant for live slider glides (short enough to feel
    /// immediate, long enough to avoid clicks).
    pub glide_tau_sec: f64,
}

impl Default for MixerParams {
    fn default() -> Self {
        Self {
            fade_in_sec: 1.0,
            fade_out_sec: 0.5,
            glide_tau_sec: 0.1,
        }
    }
}
