//! DCT-domain coder: embeds bits in a fixed mid-frequency coefficient of
//! keyed, redundantly-assigned 8×8 blocks of a YCrCb plane.
//!
//! Carrier round trip goes through [`crate::crypto`] (AEAD) and
//! [`crate::frame`] (length+CRC framing) before reaching this module; this
//! module only knows about raw frame bytes and an image.

use image::{DynamicImage, RgbImage};

use crate::bits::{bits_to_bytes, bytes_to_bits};
use crate::dct::{dct_2d, idct_2d, Block, BlockGrid};
use crate::error::StegoError;
use crate::permute::keyed_permutation;

/// Fixed mid-frequency coefficient position modified by every embed/extract.
const COEFF_POS: (usize, usize) = (3, 2);
/// Activity mask applied on embed only (see the Open Questions discussion in
/// the design notes: the extractor intentionally does not re-check it).
const MASK_LOW: f32 = 15.0;
const MASK_HIGH: f32 = 240.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Y,
    Cr,
    Cb,
}

impl Default for Channel {
    fn default() -> Self {
        Channel::Y
    }
}

#[derive(Debug, Clone)]
pub struct DctParams {
    pub strength: f32,
    pub redundancy: usize,
    pub channel: Channel,
    pub output_quality: u8,
    pub max_payload_bytes: usize,
}

impl Default for DctParams {
    fn default() -> Self {
        DctParams {
            strength: 24.0,
            redundancy: 30,
            channel: Channel::Y,
            output_quality: 100,
            max_payload_bytes: 1000,
        }
    }
}

/// Embed `frame_bytes` (already AEAD-encrypted and frame-wrapped by the
/// caller) into `carrier`, keyed by `positions_secret`, and return an encoded
/// JPEG image.
pub fn embed_dct(
    carrier: &DynamicImage,
    frame_bytes: &[u8],
    positions_secret: &str,
    params: &DctParams,
) -> Result<Vec<u8>, StegoError> {
    let rgb = carrier.to_rgb8();
    let (width, height) = (rgb.width() as usize, rgb.height() as usize);

    let (mut y_plane, mut cr_plane, mut cb_plane) = rgb_to_ycrcb_planes(&rgb);
    let plane = match params.channel {
        Channel::Y => &mut y_plane,
        Channel::Cr => &mut cr_plane,
        Channel::Cb => &mut cb_plane,
    };

    let mut grid = BlockGrid::from_plane(plane, width, height);
    let n = grid.block_count();
    let perm = keyed_permutation(positions_secret, n);

    let bits = bytes_to_bits(frame_bytes);
    let required = bits.len();
    if required > n / params.redundancy.max(1) {
        return Err(StegoError::ImageTooSmall);
    }

    for (bit_index, &bit) in bits.iter().enumerate() {
        let window = window_for_bit(&perm, bit_index, params.redundancy, n);
        for idx in window {
            let mean = grid.block_mean(idx);
            if mean <= MASK_LOW || mean >= MASK_HIGH {
                continue;
            }
            let freq = dct_2d(&grid.blocks[idx]);
            let mut coeffs = freq.0;
            let delta = if bit { params.strength } else { -params.strength };
            coeffs[COEFF_POS.0][COEFF_POS.1] += delta;
            grid.blocks[idx] = idct_2d(&Block(coeffs));
        }
    }

    let modified_plane = grid.to_plane();
    match params.channel {
        Channel::Y => y_plane = modified_plane,
        Channel::Cr => cr_plane = modified_plane,
        Channel::Cb => cb_plane = modified_plane,
    }

    let out_rgb = ycrcb_to_rgb_image(&y_plane, &cr_plane, &cb_plane, width as u32, height as u32);

    let mut out = Vec::new();
    {
        let mut encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut out, params.output_quality);
        encoder.encode_image(&DynamicImage::ImageRgb8(out_rgb))?;
    }
    Ok(out)
}

/// Extract the raw frame bytes embedded by [`embed_dct`].
///
/// Reads a fixed-size bit window sized from `params.max_payload_bytes`
/// (capped to the image's actual capacity), majority-votes each bit across
/// its redundancy window, and returns the decoded byte buffer for the caller
/// to hand to [`crate::frame::decode_frame`].
pub fn extract_dct(
    carrier: &DynamicImage,
    positions_secret: &str,
    params: &DctParams,
) -> Result<Vec<u8>, StegoError> {
    let rgb = carrier.to_rgb8();
    let (width, height) = (rgb.width() as usize, rgb.height() as usize);

    let (y_plane, cr_plane, cb_plane) = rgb_to_ycrcb_planes(&rgb);
    let plane = match params.channel {
        Channel::Y => &y_plane,
        Channel::Cr => &cr_plane,
        Channel::Cb => &cb_plane,
    };

    let grid = BlockGrid::from_plane(plane, width, height);
    let n = grid.block_count();
    let perm = keyed_permutation(positions_secret, n);

    let max_header_bits = (4 + params.max_payload_bytes + 4) * 8;
    let available_bits = n / params.redundancy.max(1);
    let bits_to_read = max_header_bits.min(available_bits) / 8 * 8;

    let windows: Vec<Vec<usize>> = (0..bits_to_read)
        .map(|i| window_for_bit(&perm, i, params.redundancy, n))
        .collect();

    let bits = decode_windows(&grid, &windows);
    bits_to_bytes(&bits).map_err(|_| StegoError::BitAlignment)
}

#[cfg(not(feature = "parallel"))]
fn decode_windows(grid: &BlockGrid, windows: &[Vec<usize>]) -> Vec<bool> {
    windows.iter().map(|w| vote_bit(grid, w)).collect()
}

#[cfg(feature = "parallel")]
fn decode_windows(grid: &BlockGrid, windows: &[Vec<usize>]) -> Vec<bool> {
    use rayon::prelude::*;
    windows.par_iter().map(|w| vote_bit(grid, w)).collect()
}

fn vote_bit(grid: &BlockGrid, window: &[usize]) -> bool {
    let votes = window
        .iter()
        .filter(|&&idx| {
            let freq = dct_2d(&grid.blocks[idx]);
            freq.0[COEFF_POS.0][COEFF_POS.1] > 0.0
        })
        .count();
    votes * 2 >= window.len()
}

fn window_for_bit(perm: &[usize], bit_index: usize, redundancy: usize, n: usize) -> Vec<usize> {
    let start = (bit_index * redundancy) % n;
    (0..redundancy).map(|r| perm[(start + r) % n]).collect()
}

fn rgb_to_ycrcb_planes(img: &RgbImage) -> (Vec<f32>, Vec<f32>, Vec<f32>) {
    let (w, h) = (img.width() as usize, img.height() as usize);
    let mut y = vec![0f32; w * h];
    let mut cr = vec![0f32; w * h];
    let mut cb = vec![0f32; w * h];
    for (i, px) in img.pixels().enumerate() {
        let (r, g, b) = (px[0] as f32, px[1] as f32, px[2] as f32);
        let yy = 0.299 * r + 0.587 * g + 0.114 * b;
        y[i] = yy;
        cr[i] = (r - yy) * 0.713 + 128.0;
        cb[i] = (b - yy) * 0.564 + 128.0;
    }
    (y, cr, cb)
}

fn ycrcb_to_rgb_image(y: &[f32], cr: &[f32], cb: &[f32], width: u32, height: u32) -> RgbImage {
    let mut img = RgbImage::new(width, height);
    for (i, px) in img.pixels_mut().enumerate() {
        let yy = y[i];
        let d_cr = cr[i] - 128.0;
        let d_cb = cb[i] - 128.0;
        let r = yy + 1.403 * d_cr;
        let g = yy - 0.344 * d_cb - 0.714 * d_cr;
        let b = yy + 1.773 * d_cb;
        *px = image::Rgb([clamp_u8(r), clamp_u8(g), clamp_u8(b)]);
    }
    img
}

fn clamp_u8(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}
