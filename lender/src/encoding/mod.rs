//! # Encoding Module: Stand-in "Encryption" and Proofs
//!
//! The lending contract expects encrypted amounts and an input proof. The
//! portal has neither an FHE library nor a prover, so it sends:
//!
//! - each amount as a 32-byte big-endian word, hex-encoded (`0x` + 64 chars);
//! - a 64-byte proof blob (`0x` + 128 chars), zeros by default.
//!
//! This is cosmetic. Anyone can read the "ciphertext". The point of the
//! [`Encoder`] and [`ProofGenerator`] traits is that the wallet client only
//! ever talks to them, so a real backend replaces two impls and nothing else.

pub mod proof;
pub mod word;

pub use proof::{ArgumentHexProof, ProofGenerator, ZeroProof};
pub use word::{decode_word, EncodingError, Word256};

/// Turns a plaintext word into the byte-string argument sent on-chain.
pub trait Encoder: Send + Sync {
    /// Encodes a value. Output is a `0x`-prefixed hex string.
    fn encode(&self, value: Word256) -> String;
}

/// Big-endian hex word encoding. Not encryption.
#[derive(Debug, Clone, Copy, Default)]
pub struct HexWordEncoder;

impl Encoder for HexWordEncoder {
    fn encode(&self, value: Word256) -> String {
        format!("0x{}", value.to_hex())
    }
}
