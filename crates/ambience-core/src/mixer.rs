// Transport and lane model for the ambient mixer. The model never touches
// the audio graph: toggle operations return directives that the frontend
// executes against WebAudio.

use fnv::FnvHashMap;
use smallvec::SmallVec;

use crate::config::{MixerParams, TrackDescriptor};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Stopped,
    Playing,
    /// Transient while the pause fade runs; ends at `finish_fade_out`.
    FadingOut,
}

#[derive(Clone, Debug, Default)]
pub struct LaneState {
    /// Raw slider value in [0, 1]; the trim is applied on the way out.
    pub slider: f32,
    pub loaded: bool,
    pub failed: bool,
    pub source_active: bool,
}

/// What the frontend should do in response to a play/pause toggle.
#[derive(Clone, Debug, PartialEq)]
pub enum Toggle {
    Start {
        /// Lanes that were loaded when the toggle landed; late loaders stay
        /// silent until the next start.
        lanes: SmallVec<[usize; 8]>,
        master_target: f32,
        fade_in_sec: f64,
    },
    FadeOut {
        fade_out_sec: f64,
    },
    /// Toggle landed mid fade-out; the pending teardown wins.
    Ignore,
}

/// Emitted by `finish_fade_out` once the pause fade has run its course.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stop {
    /// Value the master gain should rest at so the next fade-in ramps to
    /// the current slider setting rather than a stale scheduled value.
    pub resting_master: f32,
}

pub struct Mixer {
    pub tracks: Vec<TrackDescriptor>,
    pub lanes: Vec<LaneState>,
    pub params: MixerParams,
    pub master_slider: f32,
    phase: Phase,
    index_by_id: FnvHashMap<&'static str, usize>,
}

impl Mixer {
    pub fn new(tracks: Vec<TrackDescriptor>, params: MixerParams) -> Self {
        let lanes = vec![LaneState::default(); tracks.len()];
        let index_by_id = tracks
            .iter()
            .enumerate()
            .map(|(i, t)| (t.id, i))
            .collect::<FnvHashMap<_, _>>();
        Self {
            tracks,
            lanes,
            params,
            // Audible even if the page never provides a master control.
            master_slider: 1.0,
            phase: Phase::Stopped,
            index_by_id,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn lane_index(&self, id: &str) -> Option<usize> {
        self.index_by_id.get(id).copied()
    }

    /// Gain the lane's stage should carry right now: slider times trim.
    pub fn effective_gain(&self, index: usize) -> f32 {
        match (self.tracks.get(index), self.lanes.get(index)) {
            (Some(track), Some(lane)) => lane.slider * track.trim,
            _ => 0.0,
        }
    }

    /// Records a slider move and returns the new effective gain, or `None`
    /// for an unknown lane.
    pub fn set_lane_slider(&mut self, index: usize, value: f32) -> Option<f32> {
        let trim = self.tracks.get(index)?.trim;
        let lane = self.lanes.get_mut(index)?;
        lane.slider = value.clamp(0.0, 1.0);
        Some(lane.slider * trim)
    }

    pub fn set_master_slider(&mut self, value: f32) -> f32 {
        self.master_slider = value.clamp(0.0, 1.0);
        self.master_slider
    }

    pub fn mark_loaded(&mut self, index: usize) {
        if let Some(lane) = self.lanes.get_mut(index) {
            lane.loaded = true;
        }
    }

    pub fn mark_failed(&mut self, index: usize) {
        if let Some(lane) = self.lanes.get_mut(index) {
            lane.failed = true;
        }
    }

    pub fn all_loads_settled(&self) -> bool {
        self.lanes.iter().all(|l| l.loaded || l.failed)
    }

    pub fn loaded_count(&self) -> usize {
        self.lanes.iter().filter(|l| l.loaded).count()
    }

    pub fn failed_count(&self) -> usize {
        self.lanes.iter().filter(|l| l.failed).count()
    }

    /// Play/pause. From stopped this lists the lanes to start (and marks
    /// them active); from playing it asks for a fade-out; during a fade it
    /// is a no-op.
    pub fn toggle(&mut self) -> Toggle {
        match self.phase {
            Phase::Stopped => {
                let mut lanes = SmallVec::new();
                for (i, lane) in self.lanes.iter_mut().enumerate() {
                    if lane.loaded && !lane.failed {
                        lane.source_active = true;
                        lanes.push(i);
                    }
                }
                self.phase = Phase::Playing;
                Toggle::Start {
                    lanes,
                    master_target: self.master_slider,
                    fade_in_sec: self.params.fade_in_sec,
                }
            }
            Phase::Playing => {
                self.phase = Phase::FadingOut;
                Toggle::FadeOut {
                    fade_out_sec: self.params.fade_out_sec,
                }
            }
            Phase::FadingOut => Toggle::Ignore,
        }
    }

    /// Called by the deferred teardown once the pause fade has elapsed.
    /// Returns `None` when the phase moved on in the meantime (stale timer).
    pub fn finish_fade_out(&mut self) -> Option<Stop> {
        if self.phase != Phase::FadingOut {
            return None;
        }
        for lane in &mut self.lanes {
            lane.source_active = false;
        }
        self.phase = Phase::Stopped;
        Some(Stop {
            resting_master: self.master_slider,
        })
    }
}
