//! # Wallet Module: Session, Writers, and Lending Actions
//!
//! The portal never reads chain state. It holds a connected account, builds
//! write calls, and hands them to whatever can sign and send them.
//!
//! ```text
//! address.rs  — Validated 20-byte account addresses
//! session.rs  — Connect / disconnect / current account
//! writer.rs   — The ContractWriter seam plus dry-run and recording writers
//! client.rs   — The three lending actions (submit, create vault, approve)
//! ```
//!
//! ## Failure model
//!
//! Two things can go wrong and both are terminal for the action: no wallet
//! connected (caught locally, before anything is sent), or the write failed.
//! Write failures are not classified for the user; wallet rejection, network
//! trouble, and contract reverts all surface as the same generic toast.

pub mod address;
pub mod client;
pub mod session;
pub mod writer;

pub use address::WalletAddress;
pub use client::VaultLenderClient;
pub use session::WalletSession;
pub use writer::{ContractWriter, DryRunWriter, RecordingWriter, TxHash, WriteError};

use thiserror::Error;

/// Errors returned by wallet operations.
#[derive(Debug, Error)]
pub enum WalletError {
    /// No account is connected.
    #[error("wallet not connected")]
    NotConnected,

    /// The supplied account address is malformed.
    #[error("invalid wallet address: {0}")]
    InvalidAddress(String),

    /// The contract write failed.
    #[error(transparent)]
    Write(#[from] WriteError),
}
