//! # Lending Actions
//!
//! [`VaultLenderClient`] wraps the three write actions of the lending
//! contract. Every action follows the same five beats:
//!
//! 1. Require a connected account, or notify "Wallet Not Connected" and stop.
//! 2. Encode each confidential amount through the [`Encoder`].
//! 3. Attach a proof from the [`ProofGenerator`].
//! 4. Hand the call to the [`ContractWriter`].
//! 5. Notify success or a generic failure. No retries.
//!
//! Nothing guards against duplicate submissions: two concurrent calls to the
//! same action produce two writes.

use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;
use serde_json::{json, Value};

use crate::abi::{ContractArg, ContractCall, ContractMethod};
use crate::encoding::{Encoder, HexWordEncoder, ProofGenerator, Word256, ZeroProof};
use crate::notify::{Notification, Notifier};

use super::{ContractWriter, TxHash, WalletAddress, WalletError, WalletSession};

/// User-facing copy for one action.
struct ActionCopy {
    success_title: &'static str,
    success_description: &'static str,
    failure_title: &'static str,
    failure_description: &'static str,
}

const SUBMIT_COPY: ActionCopy = ActionCopy {
    success_title: "Application Submitted",
    success_description: "Your loan application has been submitted successfully.",
    failure_title: "Submission Failed",
    failure_description: "Failed to submit loan application. Please try again.",
};

const CREATE_VAULT_COPY: ActionCopy = ActionCopy {
    success_title: "Vault Created",
    success_description: "Your vault has been created successfully.",
    failure_title: "Creation Failed",
    failure_description: "Failed to create vault. Please try again.",
};

const APPROVE_COPY: ActionCopy = ActionCopy {
    success_title: "Loan Approved",
    success_description: "The loan has been approved successfully.",
    failure_title: "Approval Failed",
    failure_description: "Failed to approve loan. Please try again.",
};

/// Decrements the in-flight counter when a write settles or is dropped.
struct InFlight<'a>(&'a AtomicUsize);

impl<'a> InFlight<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Client for the lending contract's write actions.
pub struct VaultLenderClient<W, N> {
    session: WalletSession,
    writer: W,
    notifier: N,
    encoder: Box<dyn Encoder>,
    prover: Box<dyn ProofGenerator>,
    in_flight: AtomicUsize,
    last_error: Mutex<Option<String>>,
}

impl<W: ContractWriter, N: Notifier> VaultLenderClient<W, N> {
    /// Builds a client with hex-word encoding and the all-zero proof.
    pub fn new(session: WalletSession, writer: W, notifier: N) -> Self {
        Self {
            session,
            writer,
            notifier,
            encoder: Box::new(HexWordEncoder),
            prover: Box::new(ZeroProof),
            in_flight: AtomicUsize::new(0),
            last_error: Mutex::new(None),
        }
    }

    pub fn with_encoder(mut self, encoder: impl Encoder + 'static) -> Self {
        self.encoder = Box::new(encoder);
        self
    }

    pub fn with_prover(mut self, prover: impl ProofGenerator + 'static) -> Self {
        self.prover = Box::new(prover);
        self
    }

    pub fn session(&self) -> &WalletSession {
        &self.session
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// `true` while at least one write is outstanding.
    pub fn is_pending(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    /// Message of the most recent failed write, cleared when a new write starts.
    pub fn last_error(&self) -> Option<String> {
        self.last_error.lock().clone()
    }

    /// Submits a loan application with four confidential amounts.
    pub async fn submit_loan_application(
        &self,
        purpose: &str,
        collateral_type: &str,
        requested_amount: u64,
        collateral_value: u64,
        credit_score: u64,
        loan_term: u64,
    ) -> Result<TxHash, WalletError> {
        let from = self.require_wallet()?;
        let plain = json!([
            purpose,
            collateral_type,
            requested_amount,
            collateral_value,
            credit_score,
            loan_term
        ]);
        let args = vec![
            ContractArg::Text(purpose.to_string()),
            ContractArg::Text(collateral_type.to_string()),
            self.encrypt(requested_amount),
            self.encrypt(collateral_value),
            self.encrypt(credit_score),
            self.encrypt(loan_term),
        ];
        self.dispatch(from, ContractMethod::SubmitLoanApplication, args, &plain, &SUBMIT_COPY)
            .await
    }

    /// Creates a lending vault seeded with confidential liquidity.
    pub async fn create_vault(
        &self,
        name: &str,
        initial_liquidity: u64,
    ) -> Result<TxHash, WalletError> {
        let from = self.require_wallet()?;
        let plain = json!([name, initial_liquidity]);
        let args = vec![
            ContractArg::Text(name.to_string()),
            self.encrypt(initial_liquidity),
        ];
        self.dispatch(from, ContractMethod::CreateVault, args, &plain, &CREATE_VAULT_COPY)
            .await
    }

    /// Approves an application against a vault at a confidential rate.
    /// The two ids travel in the clear.
    pub async fn approve_loan(
        &self,
        application_id: u64,
        vault_id: u64,
        interest_rate: u64,
    ) -> Result<TxHash, WalletError> {
        let from = self.require_wallet()?;
        let plain = json!([application_id, vault_id, interest_rate]);
        let args = vec![
            ContractArg::Uint(application_id),
            ContractArg::Uint(vault_id),
            self.encrypt(interest_rate),
        ];
        self.dispatch(from, ContractMethod::ApproveLoan, args, &plain, &APPROVE_COPY)
            .await
    }

    fn require_wallet(&self) -> Result<WalletAddress, WalletError> {
        match self.session.address() {
            Some(address) => Ok(address),
            None => {
                tracing::warn!("contract write attempted without a connected wallet");
                self.notifier.notify(Notification::destructive(
                    "Wallet Not Connected",
                    "Please connect your wallet first.",
                ));
                Err(WalletError::NotConnected)
            }
        }
    }

    fn encrypt(&self, value: u64) -> ContractArg {
        ContractArg::Bytes(self.encoder.encode(Word256::from(value)))
    }

    async fn dispatch(
        &self,
        from: WalletAddress,
        method: ContractMethod,
        mut args: Vec<ContractArg>,
        plain: &Value,
        copy: &ActionCopy,
    ) -> Result<TxHash, WalletError> {
        args.push(ContractArg::Bytes(self.prover.generate(plain)));
        let call = ContractCall::new(method, args);
        let request_id = call.request_id;

        *self.last_error.lock() = None;
        let result = {
            let _guard = InFlight::enter(&self.in_flight);
            self.writer.write_contract(&from, call).await
        };

        match result {
            Ok(tx) => {
                tracing::info!(%request_id, %method, %tx, from = %from.short(), "contract write succeeded");
                self.notifier
                    .notify(Notification::info(copy.success_title, copy.success_description));
                Ok(tx)
            }
            Err(e) => {
                tracing::error!(%request_id, %method, error = %e, "contract write failed");
                *self.last_error.lock() = Some(e.to_string());
                self.notifier
                    .notify(Notification::destructive(copy.failure_title, copy.failure_description));
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::ArgumentHexProof;
    use crate::notify::NotificationLog;
    use crate::wallet::RecordingWriter;

    const ADDR: &str = "0x742d35Cc6634C0532925a3b8D097aA4B9c4FD87A";

    fn client(connected: bool) -> (VaultLenderClient<RecordingWriter, NotificationLog>, RecordingWriter, NotificationLog) {
        let session = if connected {
            WalletSession::connected(ADDR.parse().unwrap())
        } else {
            WalletSession::disconnected()
        };
        let writer = RecordingWriter::new();
        let log = NotificationLog::new();
        let client = VaultLenderClient::new(session, writer.clone(), log.clone());
        (client, writer, log)
    }

    #[tokio::test]
    async fn not_connected_writes_nothing() {
        let (client, writer, log) = client(false);
        let err = client
            .submit_loan_application("expansion", "real estate", 250_000, 400_000, 720, 36)
            .await
            .unwrap_err();
        assert!(matches!(err, WalletError::NotConnected));
        assert_eq!(writer.call_count(), 0);
        let entries = log.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "Wallet Not Connected");
        assert!(entries[0].is_destructive());
    }

    #[tokio::test]
    async fn submit_encodes_amounts_and_zero_proof() {
        let (client, writer, log) = client(true);
        client
            .submit_loan_application("expansion", "real estate", 250_000, 400_000, 720, 36)
            .await
            .unwrap();

        let call = &writer.calls()[0];
        assert_eq!(call.method, ContractMethod::SubmitLoanApplication);
        assert!(call.check().is_ok());
        assert_eq!(
            call.args[2],
            ContractArg::Bytes(
                "0x000000000000000000000000000000000000000000000000000000000003d090".into()
            )
        );
        assert_eq!(call.args[6], ContractArg::Bytes(format!("0x{}", "0".repeat(128))));
        assert_eq!(log.entries()[0].title, "Application Submitted");
        assert!(!client.is_pending());
    }

    #[tokio::test]
    async fn approve_sends_ids_in_the_clear() {
        let (client, writer, _log) = client(true);
        client.approve_loan(7, 2, 550).await.unwrap();
        let call = &writer.calls()[0];
        assert_eq!(call.args[0], ContractArg::Uint(7));
        assert_eq!(call.args[1], ContractArg::Uint(2));
        assert!(call.check().is_ok());
    }

    #[tokio::test]
    async fn failure_is_generic_and_recorded() {
        let (client, writer, log) = client(true);
        writer.fail_with("execution reverted");
        let err = client.create_vault("Growth", 1_000_000).await.unwrap_err();
        assert!(matches!(err, WalletError::Write(_)));
        assert_eq!(client.last_error().as_deref(), Some("write rejected: execution reverted"));

        let entries = log.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "Creation Failed");
        assert!(!entries[0].description.contains("reverted"));
    }

    #[tokio::test]
    async fn argument_proof_is_pluggable() {
        let (client, writer, _log) = client(true);
        let client = client.with_prover(ArgumentHexProof);
        client.create_vault("Growth", 10).await.unwrap();
        let call = &writer.calls()[0];
        match &call.args[2] {
            ContractArg::Bytes(proof) => {
                assert_eq!(proof.len(), 130);
                assert_ne!(proof, &format!("0x{}", "0".repeat(128)));
            }
            other => panic!("unexpected proof arg: {other:?}"),
        }
    }
}
