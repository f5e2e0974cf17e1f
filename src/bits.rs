//! MSB-first conversion between bytes and individual bits.

/// Expand `data` into one `bool` per bit, most-significant bit of each byte first.
pub fn bytes_to_bits(data: &[u8]) -> Vec<bool> {
    let mut bits = Vec::with_capacity(data.len() * 8);
    for byte in data {
        for i in (0..8).rev() {
            bits.push((byte >> i) & 1 == 1);
        }
    }
    bits
}

/// Packs `bits` back into bytes, MSB first. `bits.len()` must be a multiple of 8.
pub fn bits_to_bytes(bits: &[bool]) -> Result<Vec<u8>, BitAlignmentError> {
    if bits.len() % 8 != 0 {
        return Err(BitAlignmentError);
    }
    Ok(bits
        .chunks_exact(8)
        .map(|chunk| {
            chunk.iter().fold(0u8, |acc, &bit| (acc << 1) | (bit as u8))
        })
        .collect())
}

#[derive(Debug, thiserror::Error)]
#[error("bit buffer length is not a multiple of 8")]
pub struct BitAlignmentError;
