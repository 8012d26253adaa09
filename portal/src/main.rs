// Copyright (c) 2026 Vault Lender Contributors. MIT License.
// See LICENSE for details.

//! # Vault Lender Portal
//!
//! Entry point for the `vault-lender` binary. Parses CLI arguments,
//! initializes logging, connects the wallet if one was given, and runs one
//! portal screen or action.
//!
//! - `dashboard`    — render stats, wallet panel, report cards, cashflow strip
//! - `apply`        — walk a draft file through the form and submit it
//! - `submit-loan`  — send a loan application through the dry-run writer
//! - `create-vault` — create a lending vault (dry run)
//! - `approve-loan` — approve a loan (dry run)
//! - `abi`          — print the contract ABI
//! - `settings`     — print the settings panel
//! - `version`      — print build version information

mod cli;
mod logging;
mod render;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;

use vault_lender::abi::vault_lender_abi;
use vault_lender::application::{ApplicationForm, Field, LoanApplicationDraft, Step};
use vault_lender::config::{chain_name, WalletConfig, PORTAL_VERSION, VAULT_LENDER_ADDRESS};
use vault_lender::dashboard::{Dashboard, DashboardEvent};
use vault_lender::encoding::ArgumentHexProof;
use vault_lender::notify::NotificationLog;
use vault_lender::settings::LenderSettings;
use vault_lender::wallet::{DryRunWriter, VaultLenderClient, WalletSession};

use cli::{Commands, VaultLenderCli, WriteOptions};
use logging::LogFormat;
use render::{DashboardView, FormStepView, SettingsView};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = VaultLenderCli::parse();
    logging::init_logging(logging::DEFAULT_FILTER, LogFormat::from_str_lossy(&cli.log_format));

    let log = NotificationLog::new();
    let session = connect_wallet(cli.wallet.as_deref(), &log)?;

    let result = match cli.command {
        Commands::Dashboard(args) => show_dashboard(session, &log, &args.decrypt),
        Commands::Apply(args) => apply(&args.file, args.delay_ms, &log).await,
        Commands::SubmitLoan(args) => {
            let client = lending_client(cli.project_id.as_deref(), session, &log, &args.options)?;
            client
                .submit_loan_application(
                    &args.purpose,
                    &args.collateral_type,
                    args.requested_amount,
                    args.collateral_value,
                    args.credit_score,
                    args.loan_term,
                )
                .await
                .map(|tx| println!("tx {tx}"))
                .context("loan application was not submitted")
        }
        Commands::CreateVault(args) => {
            let client = lending_client(cli.project_id.as_deref(), session, &log, &args.options)?;
            client
                .create_vault(&args.name, args.initial_liquidity)
                .await
                .map(|tx| println!("tx {tx}"))
                .context("vault was not created")
        }
        Commands::ApproveLoan(args) => {
            let client = lending_client(cli.project_id.as_deref(), session, &log, &args.options)?;
            client
                .approve_loan(args.application_id, args.vault_id, args.interest_rate)
                .await
                .map(|tx| println!("tx {tx}"))
                .context("loan was not approved")
        }
        Commands::Abi => print_abi(),
        Commands::Settings => {
            print!("{}", SettingsView(&LenderSettings::default()));
            Ok(())
        }
        Commands::Version => {
            print_version();
            Ok(())
        }
    };

    for notification in log.drain() {
        println!("{notification}");
    }
    result
}

/// Builds the session, connecting `wallet` when given.
fn connect_wallet(wallet: Option<&str>, log: &NotificationLog) -> Result<WalletSession> {
    let session = WalletSession::disconnected();
    if let Some(address) = wallet {
        session
            .connect(address, log)
            .with_context(|| format!("could not connect wallet {address}"))?;
    }
    Ok(session)
}

fn show_dashboard(session: WalletSession, log: &NotificationLog, decrypt: &[String]) -> Result<()> {
    let mut dash = Dashboard::new(session, Arc::new(log.clone()));
    let handle = dash.handle();
    for id in decrypt {
        handle.send(DashboardEvent::ToggleDecrypt(id.clone()))?;
    }
    dash.process_pending();
    print!("{}", DashboardView(&dash));
    Ok(())
}

fn load_draft(path: &Path) -> Result<LoanApplicationDraft> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read draft file: {}", path.display()))?;
    LoanApplicationDraft::from_json(&json)
        .with_context(|| format!("failed to parse draft file: {}", path.display()))
}

/// Walks every step of the form, printing each, then submits.
async fn apply(path: &Path, delay_ms: u64, log: &NotificationLog) -> Result<()> {
    let draft = load_draft(path)?;
    let mut form = ApplicationForm::with_delay(Duration::from_millis(delay_ms));
    for field in Field::ALL {
        form.update(field, &draft.get(field))?;
    }

    loop {
        println!("{}\n", FormStepView(&form));
        if form.step() == Step::ContactReview {
            break;
        }
        form.next();
    }

    let submitted = form.submit(log.clone()).await?;
    println!("{}", serde_json::to_string_pretty(&submitted)?);
    Ok(())
}

/// A client over the dry-run writer. The wallet actions need a project id.
fn lending_client(
    project_id: Option<&str>,
    session: WalletSession,
    log: &NotificationLog,
    options: &WriteOptions,
) -> Result<VaultLenderClient<DryRunWriter, NotificationLog>> {
    let Some(project_id) = project_id else {
        bail!("wallet actions need --project-id or WALLETCONNECT_PROJECT_ID");
    };
    let config = WalletConfig::sepolia(project_id)?;
    tracing::info!(
        app = %config.app_name,
        chain = %chain_name(config.chain_id),
        contract = VAULT_LENDER_ADDRESS,
        "wallet provider configured"
    );

    let writer = DryRunWriter::with_latency(Duration::from_millis(options.latency_ms));
    let client = VaultLenderClient::new(session, writer, log.clone());
    Ok(if options.argument_proof {
        client.with_prover(ArgumentHexProof)
    } else {
        client
    })
}

fn print_abi() -> Result<()> {
    let abi = serde_json::to_string_pretty(&vault_lender_abi()).context("failed to serialize ABI")?;
    println!("{abi}");
    Ok(())
}

fn print_version() {
    println!("vault-lender {}", env!("CARGO_PKG_VERSION"));
    println!("core         {}", PORTAL_VERSION);
}
