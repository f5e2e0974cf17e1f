//! Top-level entry points: compose AEAD + framing + a coder, and pick the
//! coder from the carrier's decoded image format rather than its bare file
//! extension (REDESIGN FLAGS: no silent extension-based fallback).

use image::{DynamicImage, ImageFormat};

use crate::crypto;
use crate::dct_coder::{self, DctParams};
use crate::error::StegoError;
use crate::frame;
use crate::lsb_coder;

/// Default zone count used when embedding via the LSB path.
pub const LSB_EMBED_REPEAT: usize = 10;
/// Default zone count used when extracting via the LSB path.
pub const LSB_EXTRACT_REPEAT: usize = 5;

/// Which coder a carrier's decoded format maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coder {
    /// Lossy/general raster: AEAD-framed ciphertext via the DCT coder.
    Dct,
    /// Lossless raster: zlib-compressed plaintext via the LSB coder, no AEAD.
    Lsb,
}

/// Classify a carrier by its decoded image format.
///
/// `.bmp` maps to [`Coder::Lsb`] (legacy, no AEAD); `.png`/`.jpg`/`.jpeg` map
/// to [`Coder::Dct`]. Any other decodable format is rejected outright rather
/// than silently defaulting to a coder.
pub fn classify(carrier_bytes: &[u8]) -> Result<Coder, StegoError> {
    let format = image::guess_format(carrier_bytes)
        .map_err(|e| StegoError::ImageDecodeError(e.to_string()))?;
    match format {
        ImageFormat::Bmp => Ok(Coder::Lsb),
        ImageFormat::Png | ImageFormat::Jpeg => Ok(Coder::Dct),
        _ => Err(StegoError::UnsupportedFormat),
    }
}

/// Embed `plaintext` in a carrier via the DCT coder: encrypt, frame, embed.
///
/// `password` authenticates the payload; `positions_secret` keys the block
/// permutation. The two may coincide but are semantically distinct.
pub fn embed_dct(
    carrier_bytes: &[u8],
    plaintext: &str,
    password: &str,
    positions_secret: &str,
    params: &DctParams,
) -> Result<Vec<u8>, StegoError> {
    let carrier = image::load_from_memory(carrier_bytes)?;
    let ciphertext = crypto::encrypt(password, plaintext.as_bytes())?;
    let framed = frame::encode_frame(&ciphertext);
    dct_coder::embed_dct(&carrier, &framed, positions_secret, params)
}

/// Extract and decrypt a plaintext previously embedded by [`embed_dct`].
pub fn extract_dct(
    carrier_bytes: &[u8],
    password: &str,
    positions_secret: &str,
    params: &DctParams,
) -> Result<String, StegoError> {
    let carrier = image::load_from_memory(carrier_bytes)?;
    let raw = dct_coder::extract_dct(&carrier, positions_secret, params)?;
    let ciphertext = frame::decode_frame(&raw, params.max_payload_bytes as u32)?;
    let plaintext = crypto::decrypt(password, &ciphertext)?;
    String::from_utf8(plaintext).map_err(|e| StegoError::ImageDecodeError(e.to_string()))
}

/// Embed `message` in a carrier via the LSB coder and return PNG-encoded bytes.
pub fn embed_lsb(carrier_bytes: &[u8], message: &str, repeat: usize) -> Result<Vec<u8>, StegoError> {
    let carrier = image::load_from_memory(carrier_bytes)?;
    let embedded = lsb_coder::embed_lsb(&carrier, message, repeat)?;

    let mut out = Vec::new();
    DynamicImage::ImageRgb8(embedded).write_to(&mut std::io::Cursor::new(&mut out), ImageFormat::Png)?;
    Ok(out)
}

/// Extract a message previously embedded by [`embed_lsb`].
pub fn extract_lsb(carrier_bytes: &[u8], repeat: usize) -> Result<String, StegoError> {
    let carrier = image::load_from_memory(carrier_bytes)?;
    lsb_coder::extract_lsb(&carrier, repeat)
}

/// Choose a coder from the carrier's decoded format and embed accordingly,
/// defaulting `positions_secret` to `password` when the caller has only one
/// secret available. This mirrors the signing dispatcher's extension-based
/// branching, hardened to reject unrecognized formats (§9 REDESIGN FLAGS).
pub fn embed_auto(
    carrier_bytes: &[u8],
    message: &str,
    password: &str,
    positions_secret: Option<&str>,
) -> Result<Vec<u8>, StegoError> {
    match classify(carrier_bytes)? {
        Coder::Lsb => embed_lsb(carrier_bytes, message, LSB_EMBED_REPEAT),
        Coder::Dct => embed_dct(
            carrier_bytes,
            message,
            password,
            positions_secret.unwrap_or(password),
            &DctParams::default(),
        ),
    }
}

/// The extraction counterpart of [`embed_auto`].
pub fn extract_auto(
    carrier_bytes: &[u8],
    password: &str,
    positions_secret: Option<&str>,
) -> Result<String, StegoError> {
    match classify(carrier_bytes)? {
        Coder::Lsb => extract_lsb(carrier_bytes, LSB_EXTRACT_REPEAT),
        Coder::Dct => extract_dct(
            carrier_bytes,
            password,
            positions_secret.unwrap_or(password),
            &DctParams::default(),
        ),
    }
}
