//! # imprint — steganographic image-signing codec
//!
//! Format guarantees:
//! - AEAD envelope is `salt(16) | nonce(12) | ciphertext+tag`; PBKDF2-HMAC-SHA256
//!   with a fixed iteration count, never negotiated
//! - Frame envelope is `len_be32 | body | crc32_be32`; corrupt frames abort reads
//! - The DCT coder's block permutation is a frozen algorithm (SHA-256 seed,
//!   `ChaCha20Rng`, Fisher-Yates): changing it breaks interoperability with
//!   already-embedded images
//! - `.bmp` carriers dispatch to the LSB coder (legacy, no AEAD); `.png`/`.jpg`
//!   carriers dispatch to the DCT coder (AEAD-framed); other formats are
//!   rejected rather than silently defaulted
//! - The codec holds no cross-call state; every operation is a pure function
//!   over byte buffers

pub mod bits;
pub mod crypto;
pub mod dct;
pub mod dct_coder;
pub mod dispatch;
pub mod error;
pub mod frame;
pub mod lsb_coder;
pub mod permute;

// Flat re-exports for the most common entry points.
pub use crypto::CryptoError;
pub use dct_coder::{Channel, DctParams};
pub use dispatch::{classify, embed_auto, embed_dct, embed_lsb, extract_auto, extract_dct, extract_lsb, Coder};
pub use error::StegoError;
pub use frame::FrameError;
