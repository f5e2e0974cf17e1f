//! End-to-end scenarios covering the DCT and LSB signing paths.

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use imprint::{embed_dct, embed_lsb, extract_dct, extract_lsb, DctParams, StegoError};

fn png_bytes(width: u32, height: u32, color: [u8; 3]) -> Vec<u8> {
    let img = RgbImage::from_pixel(width, height, Rgb(color));
    let mut out = Vec::new();
    DynamicImage::ImageRgb8(img)
        .write_to(&mut std::io::Cursor::new(&mut out), ImageFormat::Png)
        .unwrap();
    out
}

fn bmp_bytes(width: u32, height: u32, color: [u8; 3]) -> Vec<u8> {
    let img = RgbImage::from_pixel(width, height, Rgb(color));
    let mut out = Vec::new();
    DynamicImage::ImageRgb8(img)
        .write_to(&mut std::io::Cursor::new(&mut out), ImageFormat::Bmp)
        .unwrap();
    out
}

fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut img = RgbImage::new(width, height);
    for (x, y, px) in img.enumerate_pixels_mut() {
        *px = Rgb([((x * 3) % 256) as u8, ((y * 5) % 256) as u8, 90]);
    }
    let mut out = Vec::new();
    let mut encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut out, 90);
    encoder.encode_image(&DynamicImage::ImageRgb8(img)).unwrap();
    out
}

/// E1: solid-gray PNG round trips a short message through the DCT coder.
#[test]
fn e1_dct_roundtrip_png() {
    let carrier = png_bytes(256, 256, [128, 128, 128]);
    let params = DctParams::default();
    let signed = embed_dct(&carrier, "hello", "pw", "pos", &params).unwrap();
    let recovered = extract_dct(&signed, "pw", "pos", &params).unwrap();
    assert_eq!(recovered, "hello");
}

/// E2: a natural-looking JPEG carrier round trips at output quality 100.
#[test]
fn e2_dct_roundtrip_natural_jpeg() {
    let carrier = jpeg_bytes(512, 512);
    let params = DctParams::default();
    let signed = embed_dct(&carrier, "Signed by #42", "pw", "pos", &params).unwrap();
    let recovered = extract_dct(&signed, "pw", "pos", &params).unwrap();
    assert_eq!(recovered, "Signed by #42");
}

/// E3: flipping a byte in the signed JPEG body breaks AEAD/frame verification.
#[test]
fn e3_tampered_jpeg_fails_closed() {
    let carrier = jpeg_bytes(512, 512);
    let params = DctParams::default();
    let mut signed = embed_dct(&carrier, "Signed by #42", "pw", "pos", &params).unwrap();
    let offset = 100.min(signed.len() - 1);
    signed[offset] ^= 0xFF;
    let result = extract_dct(&signed, "pw", "pos", &params);
    assert!(result.is_err());
}

/// E4: LSB embed at repeat=10, extract at repeat=5 still recovers the message.
#[test]
fn e4_lsb_asymmetric_repeat() {
    let carrier = bmp_bytes(64, 64, [10, 20, 30]);
    let signed = embed_lsb(&carrier, "abc", 10).unwrap();
    let recovered = extract_lsb(&signed, 5).unwrap();
    assert_eq!(recovered, "abc");
}

/// E5: an oversized payload on a tiny carrier is rejected, not truncated.
#[test]
fn e5_lsb_payload_too_large() {
    let carrier = bmp_bytes(8, 8, [0, 0, 0]);
    let huge = "x".repeat(10_000);
    let result = embed_lsb(&carrier, &huge, 10);
    assert!(matches!(result, Err(StegoError::PayloadTooLarge)));
}

/// E6: wrong password and wrong positions secret both fail closed.
#[test]
fn e6_wrong_secrets_fail_closed() {
    let carrier = png_bytes(256, 256, [128, 128, 128]);
    let params = DctParams::default();
    let signed = embed_dct(&carrier, "hello", "pw", "pos", &params).unwrap();

    assert!(extract_dct(&signed, "wrong-pw", "pos", &params).is_err());
    assert!(extract_dct(&signed, "pw", "wrong-pos", &params).is_err());
}

/// Property 5: LSB majority reconstruction survives corruption of a minority
/// of zones.
#[test]
fn lsb_majority_survives_zone_corruption() {
    let carrier = bmp_bytes(128, 128, [50, 60, 70]);
    let mut signed_img = {
        let dyn_img = image::load_from_memory(&embed_lsb(&carrier, "watermark", 10).unwrap()).unwrap();
        dyn_img.to_rgb8()
    };
    let total_pixels = (signed_img.width() * signed_img.height()) as usize;
    let zone_pixels = total_pixels / 10;
    let pixels: &mut [u8] = &mut signed_img;
    // Corrupt two of ten embed zones (extract only reads five, so at least
    // three of the five observed zones remain intact).
    for zone in 0..2 {
        let start = zone * zone_pixels * 3;
        let end = ((zone + 1) * zone_pixels * 3).min(pixels.len());
        for b in &mut pixels[start..end] {
            *b ^= 1;
        }
    }
    let mut out = Vec::new();
    DynamicImage::ImageRgb8(signed_img)
        .write_to(&mut std::io::Cursor::new(&mut out), ImageFormat::Png)
        .unwrap();

    let recovered = extract_lsb(&out, 5).unwrap();
    assert_eq!(recovered, "watermark");
}

/// Property 8: mean absolute pixel difference between a carrier and its
/// embedded counterpart stays within `2*strength/64` on average. A short
/// message at a modest redundancy touches only a small fraction of an
/// image's blocks, so the per-touched-block perturbation (bounded by
/// `strength`) is heavily diluted across the whole frame.
#[test]
fn visual_invariant_mean_abs_diff_within_bound() {
    let mut params = DctParams::default();
    params.redundancy = 10;

    let carriers = [
        png_bytes(2048, 2048, [128, 128, 128]),
        png_bytes(2048, 2048, [90, 150, 180]),
    ];

    let mut total_diff = 0f64;
    let mut total_samples = 0u64;

    for carrier_bytes in &carriers {
        let original = image::load_from_memory(carrier_bytes).unwrap().to_rgb8();
        let signed_bytes = embed_dct(carrier_bytes, "x", "pw", "pos", &params).unwrap();
        let signed = image::load_from_memory(&signed_bytes).unwrap().to_rgb8();

        for (orig_px, signed_px) in original.pixels().zip(signed.pixels()) {
            for c in 0..3 {
                let diff = (orig_px[c] as i32 - signed_px[c] as i32).abs() as f64;
                total_diff += diff;
                total_samples += 1;
            }
        }
    }

    let mean_abs_diff = total_diff / total_samples as f64;
    let bound = 2.0 * params.strength as f64 / 64.0;
    assert!(
        mean_abs_diff <= bound,
        "mean abs pixel diff {mean_abs_diff:.4} exceeded visual-invariant bound {bound:.4}"
    );
}
