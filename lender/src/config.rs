//! # Portal Configuration & Constants
//!
//! Every magic value of the portal lives here: the placeholder contract
//! address, the redaction glyphs, the risk thresholds, the form shape.
//! Runtime configuration is limited to the wallet-connect project id, which
//! comes from the environment (see [`WalletConfig`]).

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Application Identity
// ---------------------------------------------------------------------------

/// Application name announced to wallet providers.
pub const APP_NAME: &str = "Vault Lender Path";

/// Portal version string.
pub const PORTAL_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Sepolia testnet. The only chain the portal is configured for.
pub const SEPOLIA_CHAIN_ID: u64 = 11_155_111;

/// Human-readable chain name for display and logging.
pub const SEPOLIA_CHAIN_NAME: &str = "sepolia";

// ---------------------------------------------------------------------------
// Contract
// ---------------------------------------------------------------------------

/// Address of the lending contract. A placeholder; nothing is deployed here.
pub const VAULT_LENDER_ADDRESS: &str = "0x742d35Cc6634C0532925a3b8D097aA4B9c4FD87A";

/// Width of an encoded argument word in bytes.
pub const WORD_BYTES: usize = 32;

/// Width of an encoded argument word in hex characters, excluding `0x`.
pub const WORD_HEX_LEN: usize = WORD_BYTES * 2;

/// Width of the placeholder proof in hex characters, excluding `0x`.
pub const PROOF_HEX_LEN: usize = 128;

// ---------------------------------------------------------------------------
// Redaction
// ---------------------------------------------------------------------------

/// Placeholder for revenue, profit and cashflow.
pub const REDACTED_AMOUNT: &str = "████████";

/// Placeholder for the credit rating.
pub const REDACTED_RATING: &str = "████";

/// Placeholder for the risk score badge.
pub const REDACTED_SCORE: &str = "██/100";

/// Placeholder for the risk band label.
pub const REDACTED_RISK: &str = "████ Risk";

/// Notice shown under reports the lender is not approved for.
pub const APPROVAL_REQUIRED_NOTICE: &str = "Confidential - Lender approval required";

// ---------------------------------------------------------------------------
// Risk Banding
// ---------------------------------------------------------------------------

/// Scores at or above this are "Low Risk".
pub const LOW_RISK_THRESHOLD: i64 = 80;

/// Scores at or above this (and below [`LOW_RISK_THRESHOLD`]) are "Medium Risk".
pub const MEDIUM_RISK_THRESHOLD: i64 = 60;

/// Upper bound of a valid risk score.
pub const MAX_RISK_SCORE: u8 = 100;

// ---------------------------------------------------------------------------
// Application Form
// ---------------------------------------------------------------------------

/// Number of steps in the application form.
pub const TOTAL_STEPS: u8 = 4;

/// Artificial latency of the simulated application submission.
pub const SUBMISSION_DELAY: Duration = Duration::from_millis(3_000);

/// Prefix of synthesized application identifiers (`SME-<unix-millis>`).
pub const APPLICATION_ID_PREFIX: &str = "SME-";

// ---------------------------------------------------------------------------
// WalletConfig
// ---------------------------------------------------------------------------

/// Errors raised while assembling runtime configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The wallet-connect project id is missing or blank.
    #[error("wallet-connect project id is empty")]
    EmptyProjectId,
}

/// Wallet provider configuration: who we are and where we connect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletConfig {
    /// Name announced to the wallet.
    pub app_name: String,
    /// Wallet-connect project identifier, sourced from external configuration.
    pub project_id: String,
    /// Chain the portal talks to.
    pub chain_id: u64,
}

impl WalletConfig {
    /// Builds the Sepolia configuration for the given project id.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyProjectId`] if the id is blank.
    pub fn sepolia(project_id: impl Into<String>) -> Result<Self, ConfigError> {
        let project_id = project_id.into();
        if project_id.trim().is_empty() {
            return Err(ConfigError::EmptyProjectId);
        }
        Ok(Self {
            app_name: APP_NAME.to_string(),
            project_id,
            chain_id: SEPOLIA_CHAIN_ID,
        })
    }
}

/// Returns a friendly name for a chain id, mainly for logging.
pub fn chain_name(chain_id: u64) -> String {
    match chain_id {
        SEPOLIA_CHAIN_ID => SEPOLIA_CHAIN_NAME.to_string(),
        other => format!("unknown({})", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thresholds_are_ordered() {
        assert!(MEDIUM_RISK_THRESHOLD < LOW_RISK_THRESHOLD);
        assert!(LOW_RISK_THRESHOLD <= MAX_RISK_SCORE as i64);
    }

    #[test]
    fn test_contract_address_shape() {
        let body = VAULT_LENDER_ADDRESS.strip_prefix("0x").unwrap();
        assert_eq!(body.len(), 40);
        assert!(body.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_word_widths() {
        assert_eq!(WORD_HEX_LEN, 64);
        assert_eq!(PROOF_HEX_LEN, 2 * WORD_HEX_LEN);
    }

    #[test]
    fn test_wallet_config_rejects_blank_project() {
        assert_eq!(WalletConfig::sepolia("  "), Err(ConfigError::EmptyProjectId));
    }

    #[test]
    fn test_wallet_config_sepolia() {
        let cfg = WalletConfig::sepolia("abc123").unwrap();
        assert_eq!(cfg.app_name, APP_NAME);
        assert_eq!(cfg.chain_id, SEPOLIA_CHAIN_ID);
        assert_eq!(chain_name(cfg.chain_id), "sepolia");
        assert_eq!(chain_name(1), "unknown(1)");
    }
}
