//! Placeholder input proofs.
//!
//! Two generators exist because the portal has shipped both: a constant
//! all-zero blob, and a blob derived from hex-encoding the JSON form of the
//! call arguments. Neither proves anything.

use serde_json::Value;

use crate::config::PROOF_HEX_LEN;

/// Produces the `inputProof` argument for a contract write.
pub trait ProofGenerator: Send + Sync {
    /// Returns a `0x`-prefixed proof of exactly 128 hex digits.
    fn generate(&self, args: &Value) -> String;
}

/// `0x` followed by 128 zeros, whatever the arguments.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroProof;

impl ProofGenerator for ZeroProof {
    fn generate(&self, _args: &Value) -> String {
        format!("0x{}", "0".repeat(PROOF_HEX_LEN))
    }
}

/// Hex of the compact JSON serialization of the arguments, truncated or
/// right-padded with zeros to 128 digits.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArgumentHexProof;

impl ProofGenerator for ArgumentHexProof {
    fn generate(&self, args: &Value) -> String {
        let mut digits = hex::encode(args.to_string());
        digits.truncate(PROOF_HEX_LEN);
        format!("0x{:0<width$}", digits, width = PROOF_HEX_LEN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn zero_proof_is_constant() {
        let a = ZeroProof.generate(&json!([1, 2]));
        let b = ZeroProof.generate(&json!({"x": "y"}));
        assert_eq!(a, b);
        assert_eq!(a.len(), 2 + PROOF_HEX_LEN);
        assert!(a[2..].chars().all(|c| c == '0'));
    }

    #[test]
    fn argument_proof_pads_short_input() {
        let proof = ArgumentHexProof.generate(&json!([1]));
        // "[1]" = 5b 31 5d
        assert!(proof.starts_with("0x5b315d0"));
        assert_eq!(proof.len(), 2 + PROOF_HEX_LEN);
    }

    #[test]
    fn argument_proof_truncates_long_input() {
        let args = json!(["a long purpose string that goes on and on", "real estate", 250000]);
        let proof = ArgumentHexProof.generate(&args);
        assert_eq!(proof.len(), 2 + PROOF_HEX_LEN);
        assert_ne!(proof, ArgumentHexProof.generate(&json!(["other"])));
    }
}
