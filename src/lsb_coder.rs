//! LSB-domain coder: embeds a zlib-compressed payload, terminated by a fixed
//! end marker, into the low bit of R/G/B channels across K redundant spatial
//! zones. Lossless only — callers must save the result as PNG or BMP.

use std::io::{Read, Write};

use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use image::{DynamicImage, RgbImage};

use crate::error::StegoError;

/// 16-bit sentinel appended after the compressed payload in every zone.
const END_MARKER: &str = "0110110011001101";

/// Embed `message` into `carrier`, writing `repeat` redundant zone copies.
/// Returns a freshly constructed RGB image (caller encodes it losslessly).
pub fn embed_lsb(carrier: &DynamicImage, message: &str, repeat: usize) -> Result<RgbImage, StegoError> {
    let mut rgb = carrier.to_rgb8();
    let (width, height) = (rgb.width(), rgb.height());
    let total_pixels = (width as usize) * (height as usize);

    let compressed = zlib_compress(message.as_bytes());
    let bits = to_bitstring(&compressed) + END_MARKER;
    let bit_vec: Vec<bool> = bits.chars().map(|c| c == '1').collect();

    let zone_pixels = total_pixels / repeat.max(1);
    if bit_vec.len() > zone_pixels * 3 {
        return Err(StegoError::PayloadTooLarge);
    }

    let pixels: &mut [u8] = &mut rgb;
    for zone in 0..repeat {
        let zone_start_px = zone * zone_pixels;
        for (i, &bit) in bit_vec.iter().enumerate() {
            let px_index = zone_start_px + i / 3;
            let channel = i % 3;
            let byte_index = px_index * 3 + channel;
            if byte_index >= pixels.len() {
                break;
            }
            pixels[byte_index] = (pixels[byte_index] & !1) | bit as u8;
        }
    }

    Ok(rgb)
}

/// Extract the most common readable message across `repeat` candidate zones.
pub fn extract_lsb(carrier: &DynamicImage, repeat: usize) -> Result<String, StegoError> {
    let rgb = carrier.to_rgb8();
    let (width, height) = (rgb.width(), rgb.height());
    let total_pixels = (width as usize) * (height as usize);
    let pixels: &[u8] = rgb.as_raw();

    let zone_pixels = total_pixels / repeat.max(1);
    let mut candidates: Vec<String> = Vec::new();

    for zone in 0..repeat {
        let zone_start_px = zone * zone_pixels;
        let mut bitstring = String::new();
        for i in 0..zone_pixels * 3 {
            let px_index = zone_start_px + i / 3;
            let channel = i % 3;
            let byte_index = px_index * 3 + channel;
            if byte_index >= pixels.len() {
                break;
            }
            let bit = pixels[byte_index] & 1;
            bitstring.push(if bit == 1 { '1' } else { '0' });

            if bitstring.len() >= END_MARKER.len()
                && bitstring[bitstring.len() - END_MARKER.len()..] == *END_MARKER
            {
                let payload_bits = &bitstring[..bitstring.len() - END_MARKER.len()];
                if let Ok(compressed) = from_bitstring(payload_bits) {
                    if let Ok(message) = zlib_decompress(&compressed) {
                        if let Ok(text) = String::from_utf8(message) {
                            candidates.push(text);
                        }
                    }
                }
                break;
            }
        }
    }

    majority(candidates).ok_or(StegoError::NoReadableMessage)
}

/// Picks the most common candidate, first-seen-wins on ties — matching
/// Python's `Counter(...).most_common(1)`, which is stable in insertion
/// order. A `HashMap` tally would make ties nondeterministic across runs
/// since its iteration order is randomized per-process.
fn majority(candidates: Vec<String>) -> Option<String> {
    let mut tally: Vec<(String, usize)> = Vec::new();
    for c in candidates {
        match tally.iter_mut().find(|(s, _)| *s == c) {
            Some((_, n)) => *n += 1,
            None => tally.push((c, 1)),
        }
    }
    let mut best: Option<(String, usize)> = None;
    for (s, n) in tally {
        match &best {
            Some((_, best_n)) if n <= *best_n => {}
            _ => best = Some((s, n)),
        }
    }
    best.map(|(s, _)| s)
}

fn to_bitstring(data: &[u8]) -> String {
    data.iter()
        .map(|b| format!("{:08b}", b))
        .collect::<Vec<_>>()
        .join("")
}

fn from_bitstring(bits: &str) -> Result<Vec<u8>, StegoError> {
    if bits.len() % 8 != 0 {
        return Err(StegoError::BitAlignment);
    }
    Ok(bits
        .as_bytes()
        .chunks_exact(8)
        .map(|chunk| {
            chunk
                .iter()
                .fold(0u8, |acc, &c| (acc << 1) | ((c == b'1') as u8))
        })
        .collect())
}

fn zlib_compress(data: &[u8]) -> Vec<u8> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).expect("in-memory write cannot fail");
    encoder.finish().expect("in-memory finish cannot fail")
}

fn zlib_decompress(data: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut decoder = ZlibDecoder::new(data);
    let mut out = Vec::new();
    decoder.read_to_end(&mut out)?;
    Ok(out)
}
