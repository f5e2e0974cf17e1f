//! Length-prefixed, CRC-checked framing around an arbitrary byte payload.
//!
//! Wire layout: `len (u32 big-endian) | payload | crc32 (u32 big-endian)`,
//! where `crc32` is the IEEE CRC-32 of `payload` alone.

use crc32fast::Hasher;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FrameError {
    #[error("frame is shorter than the minimum 8-byte header+trailer")]
    FrameTooShort,
    #[error("declared length {declared} is out of range (max {max})")]
    LengthOutOfRange { declared: u32, max: u32 },
    #[error("CRC32 mismatch — frame payload is corrupted")]
    CrcMismatch,
}

/// Encode `payload` as `be32(len) | payload | be32(crc32(payload))`.
pub fn encode_frame(payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(4 + payload.len() + 4);
    out.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    out.extend_from_slice(payload);
    out.extend_from_slice(&crc32(payload).to_be_bytes());
    out
}

/// Decode a frame produced by [`encode_frame`], validating length bounds and CRC.
///
/// `max_payload_bytes` bounds the declared length (`0 < len <= max_payload_bytes`);
/// trailing bytes past the frame are ignored, mirroring how the DCT extractor
/// always reads a fixed-size bit window regardless of the true message length.
pub fn decode_frame(data: &[u8], max_payload_bytes: u32) -> Result<Vec<u8>, FrameError> {
    if data.len() < 8 {
        return Err(FrameError::FrameTooShort);
    }
    let declared = u32::from_be_bytes(data[0..4].try_into().unwrap());
    if declared == 0 || declared > max_payload_bytes {
        return Err(FrameError::LengthOutOfRange { declared, max: max_payload_bytes });
    }
    let body_end = 4 + declared as usize;
    if data.len() < body_end + 4 {
        return Err(FrameError::FrameTooShort);
    }
    let body = &data[4..body_end];
    let stored_crc = u32::from_be_bytes(data[body_end..body_end + 4].try_into().unwrap());
    if crc32(body) != stored_crc {
        return Err(FrameError::CrcMismatch);
    }
    Ok(body.to_vec())
}

fn crc32(data: &[u8]) -> u32 {
    let mut h = Hasher::new();
    h.update(data);
    h.finalize()
}
