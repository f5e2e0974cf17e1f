//! Unified error taxonomy for the embedding/extraction pipeline.
//!
//! Every public entry point returns [`StegoError`]. Component-local error
//! enums (`CryptoError`, `FrameError`, ...) convert into it with `#[from]` so
//! callers only ever match on one type, mirroring the archive crate's
//! per-concern-enum-glued-with-`#[from]` convention.

use thiserror::Error;

use crate::crypto::CryptoError;
use crate::frame::FrameError;

#[derive(Error, Debug)]
pub enum StegoError {
    #[error("carrier image could not be decoded: {0}")]
    ImageDecodeError(String),

    #[error("carrier has insufficient capacity for the requested payload")]
    ImageTooSmall,

    #[error("payload is too large for the requested carrier/parameters")]
    PayloadTooLarge,

    #[error("bit buffer length is not a multiple of 8")]
    BitAlignment,

    #[error("no zone produced a readable message")]
    NoReadableMessage,

    #[error("carrier's decoded format has no assigned coder")]
    UnsupportedFormat,

    #[error(transparent)]
    Crypto(#[from] CryptoError),

    #[error(transparent)]
    Frame(#[from] FrameError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}
