//! The contract-write seam.
//!
//! A [`ContractWriter`] takes a built [`ContractCall`] and a sender and
//! returns a transaction hash. The portal ships two: [`DryRunWriter`], which
//! validates and logs the call and derives a deterministic hash without
//! touching any network, and [`RecordingWriter`], which captures calls for
//! inspection and can be told to fail.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::abi::{AbiError, ContractCall};

use super::WalletAddress;

/// Why a write did not go through.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WriteError {
    /// The call does not match the ABI.
    #[error("malformed call: {0}")]
    Malformed(#[from] AbiError),

    /// The wallet, the network, or the contract said no.
    #[error("write rejected: {0}")]
    Rejected(String),
}

/// A `0x`-prefixed 32-byte transaction hash.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TxHash(pub String);

impl std::fmt::Display for TxHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Something that can submit a state-changing contract call.
#[async_trait]
pub trait ContractWriter: Send + Sync {
    async fn write_contract(
        &self,
        from: &WalletAddress,
        call: ContractCall,
    ) -> Result<TxHash, WriteError>;
}

#[async_trait]
impl<T: ContractWriter + ?Sized> ContractWriter for Arc<T> {
    async fn write_contract(
        &self,
        from: &WalletAddress,
        call: ContractCall,
    ) -> Result<TxHash, WriteError> {
        (**self).write_contract(from, call).await
    }
}

/// Hash over the sender and the call's method and arguments. The request id
/// is left out, so identical calls hash identically.
fn call_digest(from: &WalletAddress, call: &ContractCall) -> TxHash {
    let mut hasher = Sha256::new();
    hasher.update(from.as_str().as_bytes());
    hasher.update(call.address.as_bytes());
    hasher.update(call.method.name().as_bytes());
    hasher.update(call.args_json().to_string().as_bytes());
    TxHash(format!("0x{}", hex::encode(hasher.finalize())))
}

// ---------------------------------------------------------------------------
// DryRunWriter
// ---------------------------------------------------------------------------

/// Validates, logs, and pretends. Optionally sleeps to mimic confirmation.
#[derive(Debug, Clone, Default)]
pub struct DryRunWriter {
    latency: Duration,
}

impl DryRunWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_latency(latency: Duration) -> Self {
        Self { latency }
    }
}

#[async_trait]
impl ContractWriter for DryRunWriter {
    async fn write_contract(
        &self,
        from: &WalletAddress,
        call: ContractCall,
    ) -> Result<TxHash, WriteError> {
        call.check()?;
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        let hash = call_digest(from, &call);
        tracing::info!(
            request_id = %call.request_id,
            contract = %call.address,
            method = %call.method,
            args = %call.args_json(),
            tx = %hash,
            "dry-run contract write"
        );
        Ok(hash)
    }
}

// ---------------------------------------------------------------------------
// RecordingWriter
// ---------------------------------------------------------------------------

/// Captures every call it receives. Cloning shares the capture.
#[derive(Debug, Clone, Default)]
pub struct RecordingWriter {
    calls: Arc<Mutex<Vec<(WalletAddress, ContractCall)>>>,
    failure: Arc<Mutex<Option<String>>>,
    latency: Duration,
}

impl RecordingWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every write waits this long before settling.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Makes every subsequent write fail with `reason`.
    pub fn fail_with(&self, reason: impl Into<String>) {
        *self.failure.lock() = Some(reason.into());
    }

    pub fn succeed(&self) {
        *self.failure.lock() = None;
    }

    /// Calls received so far, failed ones included.
    pub fn calls(&self) -> Vec<ContractCall> {
        self.calls.lock().iter().map(|(_, c)| c.clone()).collect()
    }

    pub fn senders(&self) -> Vec<WalletAddress> {
        self.calls.lock().iter().map(|(a, _)| a.clone()).collect()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

#[async_trait]
impl ContractWriter for RecordingWriter {
    async fn write_contract(
        &self,
        from: &WalletAddress,
        call: ContractCall,
    ) -> Result<TxHash, WriteError> {
        let hash = call_digest(from, &call);
        self.calls.lock().push((from.clone(), call));
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        match self.failure.lock().clone() {
            Some(reason) => Err(WriteError::Rejected(reason)),
            None => Ok(hash),
        }
    }
}
