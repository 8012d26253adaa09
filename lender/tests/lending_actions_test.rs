//! Integration tests for the wallet-backed lending actions.
//!
//! These drive the client through a shared wallet session, the way the
//! portal wires it: connect, act, disconnect, act again. Writes go to a
//! recording writer so the exact calls can be inspected.

use std::sync::Arc;
use std::time::Duration;

use vault_lender::abi::{ContractArg, ContractMethod};
use vault_lender::config::VAULT_LENDER_ADDRESS;
use vault_lender::encoding::{decode_word, Word256};
use vault_lender::notify::NotificationLog;
use vault_lender::wallet::{
    DryRunWriter, RecordingWriter, VaultLenderClient, WalletError, WalletSession,
};

const ACCOUNT: &str = "0x1234567890abcdef1234567890abcdef12345678";

/// Helper: a client over a fresh session, plus handles on its collaborators.
fn setup() -> (
    VaultLenderClient<RecordingWriter, NotificationLog>,
    WalletSession,
    RecordingWriter,
    NotificationLog,
) {
    let session = WalletSession::disconnected();
    let writer = RecordingWriter::new();
    let log = NotificationLog::new();
    let client = VaultLenderClient::new(session.clone(), writer.clone(), log.clone());
    (client, session, writer, log)
}

fn bytes_arg(arg: &ContractArg) -> &str {
    match arg {
        ContractArg::Bytes(s) => s,
        other => panic!("expected bytes argument, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Submission
// ---------------------------------------------------------------------------

#[tokio::test]
async fn requested_amount_encodes_to_known_word() {
    let (client, session, writer, log) = setup();
    session.connect(ACCOUNT, &log).unwrap();

    client
        .submit_loan_application("expansion", "real estate", 250_000, 400_000, 720, 36)
        .await
        .unwrap();

    let calls = writer.calls();
    assert_eq!(calls.len(), 1);
    let call = &calls[0];
    assert_eq!(call.address, VAULT_LENDER_ADDRESS);
    assert_eq!(call.method, ContractMethod::SubmitLoanApplication);
    assert_eq!(
        bytes_arg(&call.args[2]),
        "0x000000000000000000000000000000000000000000000000000000000003d090"
    );

    // Every encrypted amount decodes back to what was passed in.
    let decoded: Vec<u64> = call.args[2..6]
        .iter()
        .map(|a| decode_word(bytes_arg(a)).unwrap().to_u64().unwrap())
        .collect();
    assert_eq!(decoded, [250_000, 400_000, 720, 36]);

    assert_eq!(writer.senders()[0].as_str(), ACCOUNT);
}

#[tokio::test]
async fn disconnecting_blocks_further_writes() {
    let (client, session, writer, log) = setup();
    session.connect(ACCOUNT, &log).unwrap();
    client.create_vault("Growth Fund", 5_000_000).await.unwrap();

    session.disconnect(&log);
    log.drain();

    let err = client.approve_loan(1, 1, 450).await.unwrap_err();
    assert!(matches!(err, WalletError::NotConnected));
    assert_eq!(writer.call_count(), 1);

    let entries = log.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].title, "Wallet Not Connected");
    assert_eq!(entries[0].description, "Please connect your wallet first.");
}

#[tokio::test]
async fn every_action_without_wallet_is_a_single_notification() {
    let (client, _session, writer, log) = setup();

    assert!(client
        .submit_loan_application("a", "b", 1, 2, 3, 4)
        .await
        .is_err());
    assert!(client.create_vault("v", 1).await.is_err());
    assert!(client.approve_loan(1, 2, 3).await.is_err());

    assert_eq!(writer.call_count(), 0);
    assert_eq!(log.len(), 3);
    assert!(log.entries().iter().all(|n| n.title == "Wallet Not Connected"));
}

// ---------------------------------------------------------------------------
// Concurrency
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn duplicate_submissions_are_not_deduplicated() {
    let session = WalletSession::connected(ACCOUNT.parse().unwrap());
    let writer = RecordingWriter::new().with_latency(Duration::from_millis(500));
    let log = NotificationLog::new();
    let client = VaultLenderClient::new(session, writer.clone(), log.clone());

    let submissions = (0..2).map(|_| {
        client.submit_loan_application("expansion", "equipment", 100_000, 150_000, 700, 24)
    });
    let results = futures::future::join_all(submissions).await;

    assert!(results.iter().all(|r| r.is_ok()));
    assert_eq!(writer.call_count(), 2);
    assert_eq!(log.len(), 2);
    assert_ne!(writer.calls()[0].request_id, writer.calls()[1].request_id);
}

#[tokio::test(start_paused = true)]
async fn pending_while_write_is_outstanding() {
    let session = WalletSession::connected(ACCOUNT.parse().unwrap());
    let writer = RecordingWriter::new().with_latency(Duration::from_secs(2));
    let client = Arc::new(VaultLenderClient::new(session, writer, NotificationLog::new()));

    let background = Arc::clone(&client);
    let task = tokio::spawn(async move { background.create_vault("Bridge", 42).await });

    tokio::task::yield_now().await;
    assert!(client.is_pending());

    task.await.unwrap().unwrap();
    assert!(!client.is_pending());
}

// ---------------------------------------------------------------------------
// Failure
// ---------------------------------------------------------------------------

#[tokio::test]
async fn recovered_writer_clears_last_error() {
    let (client, session, writer, log) = setup();
    session.connect(ACCOUNT, &log).unwrap();

    writer.fail_with("user rejected the request");
    assert!(client.approve_loan(3, 1, 600).await.is_err());
    assert!(client.last_error().is_some());

    writer.succeed();
    client.approve_loan(3, 1, 600).await.unwrap();
    assert_eq!(client.last_error(), None);

    let titles: Vec<String> = log.drain().into_iter().map(|n| n.title).collect();
    assert_eq!(titles, ["Wallet Connected", "Approval Failed", "Loan Approved"]);
}

#[tokio::test]
async fn dry_run_hash_is_deterministic_per_call_shape() {
    let session = WalletSession::connected(ACCOUNT.parse().unwrap());
    let client = VaultLenderClient::new(session, DryRunWriter::new(), NotificationLog::new());

    let first = client.create_vault("Growth", 1_000).await.unwrap();
    let second = client.create_vault("Growth", 1_000).await.unwrap();
    let other = client.create_vault("Growth", 1_001).await.unwrap();

    assert!(first.0.starts_with("0x"));
    assert_eq!(first.0.len(), 66);
    assert_eq!(first, second);
    assert_ne!(first, other);
}

#[test]
fn word_range_round_trips() {
    for word in [Word256::ZERO, Word256::from(u64::MAX), Word256::from(u128::MAX), Word256::MAX] {
        let hex = word.to_string();
        assert_eq!(hex.len(), 66);
        assert_eq!(decode_word(&hex).unwrap(), word);
    }
}
