use thiserror::Error;

/// Why a round-trip with the state owner did not complete.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The dispatch channel is closed: the owner has stopped.
    #[error("state owner is no longer accepting requests")]
    OwnerClosed,

    /// The owner stopped with this request still queued.
    #[error("state owner dropped the request without replying")]
    NoReply,

    /// The owner's admission policy refused the write.
    #[error("write rejected by the state owner")]
    Rejected,

    /// A [`LoadConfig`](crate::LoadConfig) field is out of range.
    #[error("invalid load configuration: {0}")]
    InvalidConfig(&'static str),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
