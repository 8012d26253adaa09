//! # Dashboard Module: Top-Level View State
//!
//! The dashboard owns everything on the lender portal page:
//!
//! ```text
//! header      → portal title, settings button
//! stats       → four headline statistics
//! wallet      → connection panel + "Submit Application" entry point
//! reports     → one ReportCard per listed SME application
//! footer      → aggregated cashflow strip (most months hidden)
//! modals      → Settings, Submit Application
//! ```
//!
//! ## Event channel
//!
//! Components that live outside the dashboard (the wallet panel, the CLI)
//! do not reach into its state. They hold a [`DashboardHandle`] and send
//! [`DashboardEvent`]s over an unbounded `tokio::sync::mpsc` channel; the
//! dashboard applies them in order via [`Dashboard::process_pending`] or
//! [`Dashboard::next_event`].
//!
//! Opening the application modal creates an empty form. Closing it discards
//! the form. A submission runs on its own task: the modal stays open and
//! shows the pending label until the delay elapses, then the task queues a
//! [`DashboardEvent::CloseApplication`]. Closing the modal earlier does not
//! cancel the submission.

pub mod data;

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::mpsc;

use crate::application::{ApplicationForm, PendingSubmission, SubmitError};
use crate::config::SUBMISSION_DELAY;
use crate::notify::Notifier;
use crate::report::ReportCard;
use crate::settings::LenderSettings;
use crate::wallet::WalletSession;

pub use data::{
    cashflow_overview, sample_applications, stat_cards, CashflowPoint, StatCard, Trend,
};

// ---------------------------------------------------------------------------
// Page copy
// ---------------------------------------------------------------------------

pub const PORTAL_TITLE: &str = "Lender Portal";
pub const PORTAL_SUBTITLE: &str = "Confidential SME Financing";

pub const SECURITY_NOTICE: &str = "All SME financial data is encrypted using advanced \
cryptographic protocols. Only verified and approved lenders can decrypt sensitive information \
for risk assessment purposes. Your data remains confidential throughout the entire \
underwriting process.";

pub const WALLET_PANEL_TITLE: &str = "Secure Wallet Connection";
pub const WALLET_PANEL_HINT: &str = "Connect your wallet to submit loan applications securely";

pub const FOOTER_TITLE: &str = "Market Cashflow Overview";
pub const FOOTER_SUBTITLE: &str =
    "Aggregated SME financial performance data - individual details encrypted for privacy";
pub const FOOTER_COPYRIGHT: &str =
    "© 2024 SecureCapital Platform - All financial data encrypted and protected";

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// Messages accepted by the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardEvent {
    OpenApplication,
    CloseApplication,
    OpenSettings,
    CloseSettings,
    /// Flip the decryption toggle of the report with this application id.
    ToggleDecrypt(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DashboardError {
    /// The dashboard that owned the receiving end has been dropped.
    #[error("dashboard is gone")]
    Closed,
}

/// Cloneable sender half of the dashboard's event channel.
#[derive(Debug, Clone)]
pub struct DashboardHandle {
    tx: mpsc::UnboundedSender<DashboardEvent>,
}

impl DashboardHandle {
    pub fn send(&self, event: DashboardEvent) -> Result<(), DashboardError> {
        self.tx.send(event).map_err(|_| DashboardError::Closed)
    }

    /// What the wallet panel's "Submit Application" button sends.
    pub fn open_application(&self) -> Result<(), DashboardError> {
        self.send(DashboardEvent::OpenApplication)
    }
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

pub struct Dashboard {
    cards: Vec<ReportCard>,
    stats: Vec<StatCard>,
    cashflow: Vec<CashflowPoint>,
    wallet: WalletSession,
    settings: LenderSettings,
    settings_open: bool,
    application: Option<ApplicationForm>,
    form_delay: Duration,
    notifier: Arc<dyn Notifier>,
    tx: mpsc::UnboundedSender<DashboardEvent>,
    rx: mpsc::UnboundedReceiver<DashboardEvent>,
}

impl std::fmt::Debug for Dashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dashboard")
            .field("cards", &self.cards.len())
            .field("wallet", &self.wallet)
            .field("settings_open", &self.settings_open)
            .field("application_open", &self.application.is_some())
            .finish()
    }
}

impl Dashboard {
    /// The standard page: sample applications, stats, and cashflow strip.
    pub fn new(wallet: WalletSession, notifier: Arc<dyn Notifier>) -> Self {
        Self::with_applications(sample_applications(), wallet, notifier)
    }

    pub fn with_applications(
        applications: Vec<crate::report::CompanyApplication>,
        wallet: WalletSession,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            cards: applications.into_iter().map(ReportCard::new).collect(),
            stats: stat_cards(),
            cashflow: cashflow_overview(),
            wallet,
            settings: LenderSettings::default(),
            settings_open: false,
            application: None,
            form_delay: SUBMISSION_DELAY,
            notifier,
            tx,
            rx,
        }
    }

    /// Overrides the simulated submission latency of forms opened later.
    pub fn with_form_delay(mut self, delay: Duration) -> Self {
        self.form_delay = delay;
        self
    }

    pub fn handle(&self) -> DashboardHandle {
        DashboardHandle {
            tx: self.tx.clone(),
        }
    }

    pub fn cards(&self) -> &[ReportCard] {
        &self.cards
    }

    pub fn card(&self, application_id: &str) -> Option<&ReportCard> {
        self.cards
            .iter()
            .find(|c| c.application().application_id == application_id)
    }

    pub fn stats(&self) -> &[StatCard] {
        &self.stats
    }

    pub fn cashflow(&self) -> &[CashflowPoint] {
        &self.cashflow
    }

    pub fn wallet(&self) -> &WalletSession {
        &self.wallet
    }

    pub fn settings(&self) -> &LenderSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut LenderSettings {
        &mut self.settings
    }

    pub fn is_settings_open(&self) -> bool {
        self.settings_open
    }

    pub fn is_application_open(&self) -> bool {
        self.application.is_some()
    }

    pub fn application_form(&self) -> Option<&ApplicationForm> {
        self.application.as_ref()
    }

    pub fn application_form_mut(&mut self) -> Option<&mut ApplicationForm> {
        self.application.as_mut()
    }

    /// Applies one event. Returns `false` when it changed nothing.
    pub fn apply(&mut self, event: DashboardEvent) -> bool {
        tracing::debug!(?event, "dashboard event");
        match event {
            DashboardEvent::OpenApplication => {
                if self.application.is_some() {
                    return false;
                }
                self.application = Some(ApplicationForm::with_delay(self.form_delay));
                true
            }
            DashboardEvent::CloseApplication => self.application.take().is_some(),
            DashboardEvent::OpenSettings => !std::mem::replace(&mut self.settings_open, true),
            DashboardEvent::CloseSettings => std::mem::replace(&mut self.settings_open, false),
            DashboardEvent::ToggleDecrypt(id) => {
                let Some(card) = self
                    .cards
                    .iter_mut()
                    .find(|c| c.application().application_id == id)
                else {
                    tracing::warn!(application_id = %id, "no such report");
                    return false;
                };
                let before = card.is_decrypted();
                card.toggle_decrypt() != before
            }
        }
    }

    /// Applies every event already queued, without waiting. Returns how many
    /// were applied.
    pub fn process_pending(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.rx.try_recv() {
            self.apply(event);
            applied += 1;
        }
        applied
    }

    /// Waits for the next event, applies it, and returns it.
    pub async fn next_event(&mut self) -> Option<DashboardEvent> {
        let event = self.rx.recv().await?;
        self.apply(event.clone());
        Some(event)
    }

    /// Starts submitting the open application form.
    ///
    /// Once the submission completes, a `CloseApplication` event is queued;
    /// the next [`process_pending`](Self::process_pending) closes the modal.
    pub fn submit_application(&mut self) -> Result<PendingSubmission, SubmitError> {
        let form = self.application.as_mut().ok_or(SubmitError::NotOpen)?;
        let tx = self.tx.clone();
        form.begin_submit_then(Arc::clone(&self.notifier), move |_| {
            // The dashboard may already be gone.
            let _ = tx.send(DashboardEvent::CloseApplication);
        })
    }

    /// Saves the settings (a notification only) and closes the panel.
    pub fn save_settings(&mut self) {
        self.settings.save(self.notifier.as_ref());
        self.settings_open = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::Field;
    use crate::notify::NotificationLog;

    fn dashboard() -> (Dashboard, NotificationLog) {
        let log = NotificationLog::new();
        let dash = Dashboard::new(WalletSession::disconnected(), Arc::new(log.clone()));
        (dash, log)
    }

    #[test]
    fn starts_with_sample_content() {
        let (dash, _) = dashboard();
        assert_eq!(dash.cards().len(), 3);
        assert_eq!(dash.stats().len(), 4);
        assert_eq!(dash.cashflow().len(), 6);
        assert!(!dash.is_settings_open());
        assert!(!dash.is_application_open());
        assert!(dash.cards().iter().all(|c| !c.is_decrypted()));
    }

    #[test]
    fn handle_opens_application_modal() {
        let (mut dash, _) = dashboard();
        let handle = dash.handle();
        handle.open_application().unwrap();
        handle.open_application().unwrap();
        assert_eq!(dash.process_pending(), 2);
        assert!(dash.is_application_open());
        assert_eq!(dash.process_pending(), 0);
    }

    #[test]
    fn closing_discards_the_form() {
        let (mut dash, _) = dashboard();
        dash.apply(DashboardEvent::OpenApplication);
        dash.application_form_mut()
            .unwrap()
            .update(Field::CompanyName, "Acme")
            .unwrap();
        assert!(dash.apply(DashboardEvent::CloseApplication));
        dash.apply(DashboardEvent::OpenApplication);
        assert_eq!(dash.application_form().unwrap().draft().company.company_name, "");
    }

    #[test]
    fn settings_toggle() {
        let (mut dash, log) = dashboard();
        assert!(dash.apply(DashboardEvent::OpenSettings));
        assert!(!dash.apply(DashboardEvent::OpenSettings));
        dash.settings_mut().lender_name = "Harbor Credit".into();
        dash.save_settings();
        assert!(!dash.is_settings_open());
        assert_eq!(log.entries()[0].title, "Settings Saved");
        assert!(!dash.apply(DashboardEvent::CloseSettings));
    }

    #[test]
    fn toggle_decrypt_respects_approval() {
        let (mut dash, _) = dashboard();
        assert!(dash.apply(DashboardEvent::ToggleDecrypt("SME-2024-001".into())));
        assert!(dash.card("SME-2024-001").unwrap().is_decrypted());
        // Not approved: the toggle is inert.
        assert!(!dash.apply(DashboardEvent::ToggleDecrypt("SME-2024-002".into())));
        assert!(!dash.apply(DashboardEvent::ToggleDecrypt("SME-9999-999".into())));
    }

    #[test]
    fn handle_outliving_dashboard_reports_closed() {
        let (dash, _) = dashboard();
        let handle = dash.handle();
        drop(dash);
        assert_eq!(handle.open_application(), Err(DashboardError::Closed));
    }

    #[tokio::test(start_paused = true)]
    async fn submit_closes_modal_and_notifies() {
        let (mut dash, log) = dashboard();
        assert!(matches!(dash.submit_application(), Err(SubmitError::NotOpen)));

        dash.handle().open_application().unwrap();
        let event = dash.next_event().await;
        assert_eq!(event, Some(DashboardEvent::OpenApplication));

        let pending = dash.submit_application().unwrap();
        assert!(dash.is_application_open());
        assert_eq!(
            dash.application_form().unwrap().forward_label(),
            "Encrypting & Submitting..."
        );
        assert!(matches!(dash.submit_application(), Err(SubmitError::InFlight)));

        let submitted = pending.wait().await.unwrap();
        assert!(submitted.application_id().starts_with("SME-"));
        assert_eq!(log.len(), 1);

        assert_eq!(dash.next_event().await, Some(DashboardEvent::CloseApplication));
        assert!(!dash.is_application_open());
    }

    #[tokio::test(start_paused = true)]
    async fn closing_mid_submission_still_notifies_once() {
        let (mut dash, log) = dashboard();
        dash.apply(DashboardEvent::OpenApplication);
        let pending = dash.submit_application().unwrap();

        tokio::time::sleep(SUBMISSION_DELAY / 2).await;
        assert!(log.is_empty());
        assert!(dash.apply(DashboardEvent::CloseApplication));

        pending.wait().await.unwrap();
        let titles: Vec<String> = log.entries().into_iter().map(|n| n.title).collect();
        assert_eq!(titles, ["Application Submitted Successfully"]);

        // The queued close finds the modal already shut.
        assert_eq!(dash.process_pending(), 1);
        assert!(!dash.is_application_open());
    }
}
