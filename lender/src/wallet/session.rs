//! The connected wallet account.
//!
//! Cloning a [`WalletSession`] shares it, so the dashboard and the lending
//! client always agree on who is connected.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::notify::{Notification, Notifier};

use super::{WalletAddress, WalletError};

#[derive(Debug, Clone, Default)]
pub struct WalletSession {
    account: Arc<RwLock<Option<WalletAddress>>>,
}

impl WalletSession {
    /// A session with nobody connected.
    pub fn disconnected() -> Self {
        Self::default()
    }

    /// A session already connected to `address`, without notifying.
    pub fn connected(address: WalletAddress) -> Self {
        Self {
            account: Arc::new(RwLock::new(Some(address))),
        }
    }

    pub fn address(&self) -> Option<WalletAddress> {
        self.account.read().clone()
    }

    pub fn is_connected(&self) -> bool {
        self.account.read().is_some()
    }

    /// Connects the given account, replacing any current one.
    ///
    /// # Errors
    ///
    /// Returns [`WalletError::InvalidAddress`] (after a "Connection Failed"
    /// notification) if the address does not parse.
    pub fn connect(&self, address: &str, notifier: &dyn Notifier) -> Result<WalletAddress, WalletError> {
        let parsed: WalletAddress = match address.parse() {
            Ok(a) => a,
            Err(e) => {
                tracing::warn!(%address, "wallet connection failed");
                notifier.notify(Notification::destructive(
                    "Connection Failed",
                    "Failed to connect wallet. Please try again.",
                ));
                return Err(e);
            }
        };

        *self.account.write() = Some(parsed.clone());
        tracing::info!(address = %parsed.short(), "wallet connected");
        notifier.notify(Notification::info(
            "Wallet Connected",
            "Your wallet has been securely connected for loan submissions.",
        ));
        Ok(parsed)
    }

    /// Disconnects. Notifies even if nothing was connected.
    pub fn disconnect(&self, notifier: &dyn Notifier) {
        let previous = self.account.write().take();
        if let Some(addr) = previous {
            tracing::info!(address = %addr.short(), "wallet disconnected");
        }
        notifier.notify(Notification::info(
            "Wallet Disconnected",
            "Your wallet has been safely disconnected.",
        ));
    }
}
