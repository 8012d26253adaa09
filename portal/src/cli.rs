//! # CLI Interface
//!
//! `clap` derive definitions for the `vault-lender` binary.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Vault Lender portal, in a terminal.
///
/// Renders the lender dashboard, walks loan applications through the
/// four-step form, and sends the three lending actions through a dry-run
/// contract writer.
#[derive(Parser, Debug)]
#[command(
    name = "vault-lender",
    about = "Confidential SME lending portal",
    version,
    propagate_version = true
)]
pub struct VaultLenderCli {
    /// Account to connect before running the command (`0x` + 40 hex digits).
    #[arg(long, global = true, env = "VAULT_LENDER_WALLET")]
    pub wallet: Option<String>,

    /// Wallet-connect project id. Required by the wallet actions.
    #[arg(long, global = true, env = "WALLETCONNECT_PROJECT_ID")]
    pub project_id: Option<String>,

    /// Log format: `pretty` or `json`.
    #[arg(long, global = true, default_value = "pretty")]
    pub log_format: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render the lender dashboard.
    Dashboard(DashboardArgs),
    /// Load a draft from JSON, walk the form, and submit it.
    Apply(ApplyArgs),
    /// Submit a loan application on-chain (dry run).
    SubmitLoan(SubmitLoanArgs),
    /// Create a lending vault (dry run).
    CreateVault(CreateVaultArgs),
    /// Approve a loan against a vault (dry run).
    ApproveLoan(ApproveLoanArgs),
    /// Print the lending contract ABI as JSON.
    Abi,
    /// Print the default lender settings.
    Settings,
    /// Print version information and exit.
    Version,
}

#[derive(Args, Debug)]
pub struct DashboardArgs {
    /// Flip the decryption toggle of this application before rendering.
    /// Repeatable.
    #[arg(long = "decrypt", value_name = "APPLICATION_ID")]
    pub decrypt: Vec<String>,
}

#[derive(Args, Debug)]
pub struct ApplyArgs {
    /// Draft file (JSON, camelCase keys, grouped by form step).
    #[arg(long, short = 'f')]
    pub file: PathBuf,

    /// Simulated submission latency.
    #[arg(long, default_value_t = 3000)]
    pub delay_ms: u64,
}

/// Options shared by the three wallet actions.
#[derive(Args, Debug)]
pub struct WriteOptions {
    /// Derive the input proof from the call arguments instead of zeros.
    #[arg(long)]
    pub argument_proof: bool,

    /// Simulated confirmation latency of the dry-run writer.
    #[arg(long, default_value_t = 0)]
    pub latency_ms: u64,
}

#[derive(Args, Debug)]
pub struct SubmitLoanArgs {
    #[arg(long)]
    pub purpose: String,
    #[arg(long)]
    pub collateral_type: String,
    #[arg(long)]
    pub requested_amount: u64,
    #[arg(long)]
    pub collateral_value: u64,
    #[arg(long)]
    pub credit_score: u64,
    /// Loan term in months.
    #[arg(long)]
    pub loan_term: u64,
    #[command(flatten)]
    pub options: WriteOptions,
}

#[derive(Args, Debug)]
pub struct CreateVaultArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub initial_liquidity: u64,
    #[command(flatten)]
    pub options: WriteOptions,
}

#[derive(Args, Debug)]
pub struct ApproveLoanArgs {
    #[arg(long)]
    pub application_id: u64,
    #[arg(long)]
    pub vault_id: u64,
    /// Interest rate in basis points.
    #[arg(long)]
    pub interest_rate: u64,
    #[command(flatten)]
    pub options: WriteOptions,
}
