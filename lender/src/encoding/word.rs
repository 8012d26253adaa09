//! 256-bit unsigned words.
//!
//! Stored as 32 big-endian bytes, which is also the on-wire layout, so
//! encoding is a single `hex::encode` and the full `[0, 2^256 - 1]` range
//! round-trips without any big-integer arithmetic.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{WORD_BYTES, WORD_HEX_LEN};

/// Errors raised while decoding hex words.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodingError {
    /// More hex digits than fit in 32 bytes.
    #[error("hex word too long: {len} digits (max 64)")]
    TooLong {
        /// Number of hex digits supplied.
        len: usize,
    },

    /// A character that is not a hex digit.
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    /// Input with no digits at all.
    #[error("empty hex word")]
    Empty,
}

/// An unsigned 256-bit integer in big-endian byte order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Word256([u8; WORD_BYTES]);

impl Word256 {
    pub const ZERO: Self = Self([0u8; WORD_BYTES]);
    pub const MAX: Self = Self([0xFFu8; WORD_BYTES]);

    pub fn from_be_bytes(bytes: [u8; WORD_BYTES]) -> Self {
        Self(bytes)
    }

    pub fn to_be_bytes(&self) -> [u8; WORD_BYTES] {
        self.0
    }

    /// Lower-case hex, always exactly 64 digits, no prefix.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Narrows to `u128`, or `None` if the high 16 bytes are non-zero.
    pub fn to_u128(&self) -> Option<u128> {
        let (high, low) = self.0.split_at(WORD_BYTES - 16);
        if high.iter().any(|b| *b != 0) {
            return None;
        }
        let mut buf = [0u8; 16];
        buf.copy_from_slice(low);
        Some(u128::from_be_bytes(buf))
    }

    /// Narrows to `u64`, or `None` if it does not fit.
    pub fn to_u64(&self) -> Option<u64> {
        self.to_u128().and_then(|v| u64::try_from(v).ok())
    }
}

impl From<u64> for Word256 {
    fn from(value: u64) -> Self {
        Self::from(value as u128)
    }
}

impl From<u128> for Word256 {
    fn from(value: u128) -> Self {
        let mut bytes = [0u8; WORD_BYTES];
        bytes[WORD_BYTES - 16..].copy_from_slice(&value.to_be_bytes());
        Self(bytes)
    }
}

impl std::fmt::Display for Word256 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{}", self.to_hex())
    }
}

impl FromStr for Word256 {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode_word(s)
    }
}

/// Decodes a hex word. The `0x` prefix is optional and short inputs are
/// left-padded with zeros, so `"0x3d090"` and the full 64-digit form decode
/// to the same value.
pub fn decode_word(s: &str) -> Result<Word256, EncodingError> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);

    if digits.is_empty() {
        return Err(EncodingError::Empty);
    }
    if digits.len() > WORD_HEX_LEN {
        return Err(EncodingError::TooLong { len: digits.len() });
    }

    let padded = format!("{:0>width$}", digits, width = WORD_HEX_LEN);
    let mut bytes = [0u8; WORD_BYTES];
    hex::decode_to_slice(&padded, &mut bytes)
        .map_err(|e| EncodingError::InvalidHex(e.to_string()))?;
    Ok(Word256(bytes))
}
