use ambience_core::AudioError;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

/// Lazily created audio graph, shared across event closures.
pub type SharedSession = Rc<RefCell<Option<AudioSession>>>;

#[derive(Default)]
pub struct LaneNodes {
    pub gain: Option<web::GainNode>,
    pub buffer: Option<web::AudioBuffer>,
    pub source: Option<web::AudioBufferSourceNode>,
}

pub struct AudioSession {
    pub ctx: web::AudioContext,
    pub master_gain: web::GainNode,
    pub lanes: Vec<LaneNodes>,
}

fn create_gain(
    audio_ctx: &web::AudioContext,
    value: f32,
    label: &str,
) -> Result<web::GainNode, ()> {
    match web::GainNode::new(audio_ctx) {
        Ok(g) => {
            g.gain().set_value(value);
            Ok(g)
        }
        Err(e) => {
            log::error!("{} GainNode error: {:?}", label, e);
            Err(())
        }
    }
}

fn glide(param: &web::AudioParam, target: f32, now: f64, tau: f64) {
    _ = param.cancel_scheduled_values(now);
    _ = param.set_target_at_time(target, now, tau);
}

/// Creates the context and master bus on first call; later calls are no-ops.
/// Returns true when the session was freshly built.
pub fn ensure_session(
    session: &SharedSession,
    lane_count: usize,
    master_value: f32,
) -> Result<bool, AudioError> {
    if session.borrow().is_some() {
        return Ok(false);
    }
    let ctx = web::AudioContext::new()
        .map_err(|e| AudioError::DeviceUnavailable(format!("{:?}", e)))?;
    let master_gain = create_gain(&ctx, master_value, "Master")
        .map_err(|_| AudioError::DeviceUnavailable("master GainNode".into()))?;
    _ = master_gain.connect_with_audio_node(&ctx.destination());

    let mut lanes: Vec<LaneNodes> = Vec::with_capacity(lane_count);
    lanes.resize_with(lane_count, LaneNodes::default);

    *session.borrow_mut() = Some(AudioSession {
        ctx,
        master_gain,
        lanes,
    });
    log::info!("[session] audio context created ({} lanes)", lane_count);
    Ok(true)
}

impl AudioSession {
    /// Hang a decoded buffer off the master bus at the lane's current level.
    /// No source is started here; lanes only sound after the next play press.
    pub fn attach_lane(&mut self, index: usize, id: &str, buffer: web::AudioBuffer, level: f32) {
        let gain = match create_gain(&self.ctx, level, id) {
            Ok(g) => g,
            Err(()) => return,
        };
        _ = gain.connect_with_audio_node(&self.master_gain);
        let lane = &mut self.lanes[index];
        lane.gain = Some(gain);
        lane.buffer = Some(buffer);
    }

    /// Replace any running source with a fresh looping one over the whole buffer.
    pub fn start_lane(&mut self, index: usize) {
        let lane = &mut self.lanes[index];
        if let Some(old) = lane.source.take() {
            _ = old.stop();
            _ = old.disconnect();
        }
        let (gain, buffer) = match (&lane.gain, &lane.buffer) {
            (Some(g), Some(b)) => (g, b),
            _ => return,
        };
        if let Ok(src) = web::AudioBufferSourceNode::new(&self.ctx) {
            src.set_buffer(Some(buffer));
            src.set_loop(true);
            src.set_loop_start(0.0);
            src.set_loop_end(buffer.duration());
            _ = src.connect_with_audio_node(gain);
            _ = src.start();
            lane.source = Some(src);
        }
    }

    pub fn stop_all_sources(&mut self) {
        for lane in self.lanes.iter_mut() {
            if let Some(src) = lane.source.take() {
                _ = src.stop();
                _ = src.disconnect();
            }
        }
    }

    pub fn glide_lane(&self, index: usize, target: f32, tau: f64) {
        if let Some(gain) = self.lanes[index].gain.as_ref() {
            glide(&gain.gain(), target, self.ctx.current_time(), tau);
        }
    }

    pub fn glide_master(&self, target: f32, tau: f64) {
        glide(&self.master_gain.gain(), target, self.ctx.current_time(), tau);
    }

    pub fn fade_in_master(&self, target: f32, fade_in_sec: f64) {
        let g = self.master_gain.gain();
        let now = self.ctx.current_time();
        _ = g.cancel_scheduled_values(now);
        _ = g.set_value_at_time(0.0, now);
        _ = g.linear_ramp_to_value_at_time(target, now + fade_in_sec);
    }

    /// Ramp to silence from wherever the fade-in left the bus.
    pub fn fade_out_master(&self, fade_out_sec: f64) {
        let g = self.master_gain.gain();
        let now = self.ctx.current_time();
        let current = g.value();
        _ = g.cancel_scheduled_values(now);
        _ = g.set_value_at_time(current, now);
        _ = g.linear_ramp_to_value_at_time(0.0, now + fade_out_sec);
    }

    /// After teardown the bus sits at the slider level, ready for the next fade-in.
    pub fn rest_master_at(&self, value: f32) {
        self.master_gain.gain().set_value(value);
    }

    pub fn resume_if_suspended(&self) -> Option<js_sys::Promise> {
        if self.ctx.state() == web::AudioContextState::Suspended {
            return self.ctx.resume().ok();
        }
        None
    }
}
