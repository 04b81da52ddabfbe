use thiserror::Error;

/// Load and device failures surfaced by the web frontend. All of these are
/// logged per track and never abort sibling loads.
#[derive(Debug, Error)]
pub enum AudioError {
    /// Non-success transport status; status 0 means the fetch itself was
    /// rejected before a response arrived.
    #[error("fetch {path} failed (status {status})")]
    Fetch { path: String, status: u16 },

    #[error("decode failed for {id}: {message}")]
    Decode { id: String, message: String },

    #[error("audio device unavailable: {0}")]
    DeviceUnavailable(String),
}
