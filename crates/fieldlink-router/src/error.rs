use fieldlink_frame::{DeviceId, FrameError};

/// Errors that can occur while routing requests and responses.
#[derive(Debug, thiserror::Error)]
pub enum RouterError {
    /// A device id can have at most one subscriber.
    #[error("device id {id} already has a registered callback")]
    AlreadyRegistered { id: DeviceId },

    /// A response arrived for an id nobody registered; the message is dropped.
    #[error("no device registered for id {id}")]
    NoSubscriber { id: DeviceId },

    /// The bridge process is gone; outbound writes are refused.
    #[error("bridge process is not running")]
    ProcessGone,

    /// Frame-level error surfaced from encoding.
    #[error("frame error: {0}")]
    Frame(#[from] FrameError),

    /// An I/O error occurred on the bridge pipes.
    #[error("bridge I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RouterError>;
