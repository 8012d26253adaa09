//! The four-step application form.
//!
//! Navigation is a clamped counter: `next()` past the last step and
//! `previous()` before the first are no-ops, and nothing about the draft
//! gates either direction. A user can reach the review step with every
//! field blank and submit from there.
//!
//! Submission always succeeds. [`ApplicationForm::begin_submit`] freezes a
//! copy of the draft, marks the form as submitting, and spawns the rest onto
//! the Tokio runtime: wait out the simulated latency, stamp an
//! `SME-<unix-millis>` identifier, notify, and reset the form. The spawned
//! task owns everything it touches, so it finishes even if the caller drops
//! the [`PendingSubmission`] or the form itself (the dialog was closed).
//! Missing required fields are logged, not reported.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::task::JoinHandle;

use crate::config::{APPLICATION_ID_PREFIX, SUBMISSION_DELAY, TOTAL_STEPS};
use crate::notify::{Notification, Notifier};

use super::draft::{DraftError, Field, LoanApplicationDraft, SubmittedApplication};

/// A form step, numbered from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Step {
    CompanyInfo = 1,
    LoanRequirements = 2,
    FinancialInformation = 3,
    ContactReview = 4,
}

impl Step {
    pub const ALL: [Step; 4] = [
        Step::CompanyInfo,
        Step::LoanRequirements,
        Step::FinancialInformation,
        Step::ContactReview,
    ];

    pub fn index(&self) -> u8 {
        *self as u8
    }

    pub fn from_index(index: u8) -> Option<Self> {
        Step::ALL.into_iter().find(|s| s.index() == index)
    }

    pub fn title(&self) -> &'static str {
        match self {
            Step::CompanyInfo => "Company Information",
            Step::LoanRequirements => "Loan Requirements",
            Step::FinancialInformation => "Financial Information",
            Step::ContactReview => "Contact Information",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Step::CompanyInfo => "Provide basic information about your business",
            Step::LoanRequirements => "Specify your financing needs and terms",
            Step::FinancialInformation => "Provide financial details for risk assessment (encrypted)",
            Step::ContactReview => "Contact details and application summary",
        }
    }

    /// The inputs this step projects out of the draft, in display order.
    pub fn fields(&self) -> Vec<Field> {
        Field::ALL.into_iter().filter(|f| f.step() == *self).collect()
    }

    pub fn is_first(&self) -> bool {
        *self == Step::CompanyInfo
    }

    pub fn is_last(&self) -> bool {
        self.index() == TOTAL_STEPS
    }
}

impl Default for Step {
    fn default() -> Self {
        Step::CompanyInfo
    }
}

/// Why a submission could not be started or awaited.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// A submission from this form is still waiting out its delay.
    #[error("a submission is already in flight")]
    InFlight,

    /// There is no open form to submit.
    #[error("no application form is open")]
    NotOpen,

    /// The submission task was cancelled or panicked.
    #[error("submission task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Mutable form state, shared with an in-flight submission task.
#[derive(Debug, Default)]
struct FormState {
    step: Step,
    draft: LoanApplicationDraft,
    submitting: bool,
}

/// Form state: current step, draft, and whether a submission is in flight.
#[derive(Debug)]
pub struct ApplicationForm {
    state: Arc<Mutex<FormState>>,
    delay: Duration,
}

/// Handle on a submission running in the background. Dropping it does not
/// cancel the submission.
#[derive(Debug)]
pub struct PendingSubmission {
    handle: JoinHandle<SubmittedApplication>,
}

impl PendingSubmission {
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Waits for the delay to elapse and returns the stamped application.
    pub async fn wait(self) -> Result<SubmittedApplication, SubmitError> {
        Ok(self.handle.await?)
    }
}

impl Default for ApplicationForm {
    fn default() -> Self {
        Self::new()
    }
}

impl ApplicationForm {
    /// An empty form on step 1 with the standard submission delay.
    pub fn new() -> Self {
        Self::with_delay(SUBMISSION_DELAY)
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self {
            state: Arc::new(Mutex::new(FormState::default())),
            delay,
        }
    }

    /// Opens the form pre-filled with an existing draft.
    pub fn from_draft(draft: LoanApplicationDraft, delay: Duration) -> Self {
        let form = Self::with_delay(delay);
        form.state.lock().draft = draft;
        form
    }

    pub fn step(&self) -> Step {
        self.state.lock().step
    }

    /// Snapshot of the current draft.
    pub fn draft(&self) -> LoanApplicationDraft {
        self.state.lock().draft.clone()
    }

    pub fn is_submitting(&self) -> bool {
        self.state.lock().submitting
    }

    pub fn update(&mut self, field: Field, value: &str) -> Result<(), DraftError> {
        self.state.lock().draft.set(field, value)
    }

    /// Advances one step; a no-op on the last step.
    pub fn next(&mut self) -> Step {
        let mut state = self.state.lock();
        if let Some(step) = Step::from_index(state.step.index() + 1) {
            state.step = step;
        }
        tracing::debug!(step = state.step.index(), "form next");
        state.step
    }

    /// Goes back one step; a no-op on the first step.
    pub fn previous(&mut self) -> Step {
        let mut state = self.state.lock();
        if let Some(step) = state.step.index().checked_sub(1).and_then(Step::from_index) {
            state.step = step;
        }
        tracing::debug!(step = state.step.index(), "form previous");
        state.step
    }

    /// Completion percentage, rounded.
    pub fn progress_percent(&self) -> u8 {
        let pct = self.step().index() as f32 / TOTAL_STEPS as f32 * 100.0;
        pct.round() as u8
    }

    pub fn progress_label(&self) -> String {
        format!(
            "Step {} of {} ({}% Complete)",
            self.step().index(),
            TOTAL_STEPS,
            self.progress_percent()
        )
    }

    /// Label of the backwards button; on step 1 it cancels the form.
    pub fn back_label(&self) -> &'static str {
        if self.step().is_first() {
            "Cancel"
        } else {
            "Previous"
        }
    }

    pub fn forward_label(&self) -> &'static str {
        let state = self.state.lock();
        if !state.step.is_last() {
            "Next Step"
        } else if state.submitting {
            "Encrypting & Submitting..."
        } else {
            "Submit Application"
        }
    }

    /// `(field, value)` pairs visible on the current step.
    pub fn visible_fields(&self) -> Vec<(Field, String)> {
        let state = self.state.lock();
        state
            .step
            .fields()
            .into_iter()
            .map(|f| (f, state.draft.get(f)))
            .collect()
    }

    /// Discards the draft and returns to step 1.
    pub fn cancel(&mut self) {
        tracing::debug!("form cancelled");
        let mut state = self.state.lock();
        state.draft = LoanApplicationDraft::default();
        state.step = Step::CompanyInfo;
    }

    /// Starts a submission. Must be called from within a Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError::InFlight`] while an earlier submission from
    /// this form is still pending (the submit button is disabled).
    pub fn begin_submit(
        &mut self,
        notifier: impl Notifier + 'static,
    ) -> Result<PendingSubmission, SubmitError> {
        self.begin_submit_then(notifier, |_| {})
    }

    /// Like [`begin_submit`](Self::begin_submit), running `after` once the
    /// form has been reset and the notification sent.
    pub fn begin_submit_then(
        &mut self,
        notifier: impl Notifier + 'static,
        after: impl FnOnce(&SubmittedApplication) + Send + 'static,
    ) -> Result<PendingSubmission, SubmitError> {
        let draft = {
            let mut state = self.state.lock();
            if state.submitting {
                return Err(SubmitError::InFlight);
            }
            state.submitting = true;
            state.draft.clone()
        };

        let missing = draft.missing_required();
        if !missing.is_empty() {
            tracing::warn!(
                missing = ?missing.iter().map(|f| f.label()).collect::<Vec<_>>(),
                "submitting application with blank required fields"
            );
        }

        let state = Arc::clone(&self.state);
        let delay = self.delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            let now = Utc::now();
            let application_id = format!("{}{}", APPLICATION_ID_PREFIX, now.timestamp_millis());
            tracing::info!(%application_id, "loan application submitted");
            notifier.notify(Notification::info(
                "Application Submitted Successfully",
                format!(
                    "Your loan application {} has been encrypted and submitted for review.",
                    application_id
                ),
            ));

            *state.lock() = FormState::default();
            let submitted = SubmittedApplication::new(application_id, now, draft);
            after(&submitted);
            submitted
        });

        Ok(PendingSubmission { handle })
    }

    /// Submits and waits for the result.
    pub async fn submit(
        &mut self,
        notifier: impl Notifier + 'static,
    ) -> Result<SubmittedApplication, SubmitError> {
        self.begin_submit(notifier)?.wait().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::NotificationLog;

    #[test]
    fn navigation_clamps_at_both_ends() {
        let mut form = ApplicationForm::new();
        assert_eq!(form.previous(), Step::CompanyInfo);
        assert_eq!(form.next(), Step::LoanRequirements);
        assert_eq!(form.next(), Step::FinancialInformation);
        assert_eq!(form.next(), Step::ContactReview);
        assert_eq!(form.next(), Step::ContactReview);
        assert_eq!(form.previous(), Step::FinancialInformation);
    }

    #[test]
    fn empty_form_reaches_review() {
        let mut form = ApplicationForm::new();
        for _ in 0..3 {
            form.next();
        }
        assert_eq!(form.step(), Step::ContactReview);
        assert_eq!(form.draft().missing_required().len(), 14);
    }

    #[test]
    fn progress_and_labels() {
        let mut form = ApplicationForm::new();
        assert_eq!(form.progress_percent(), 25);
        assert_eq!(form.back_label(), "Cancel");
        assert_eq!(form.forward_label(), "Next Step");
        form.next();
        assert_eq!(form.progress_label(), "Step 2 of 4 (50% Complete)");
        assert_eq!(form.back_label(), "Previous");
        form.next();
        form.next();
        assert_eq!(form.progress_percent(), 100);
        assert_eq!(form.forward_label(), "Submit Application");
    }

    #[test]
    fn steps_partition_the_fields() {
        let total: usize = Step::ALL.iter().map(|s| s.fields().len()).sum();
        assert_eq!(total, Field::ALL.len());
        assert_eq!(Step::LoanRequirements.fields().len(), 4);
        assert_eq!(Step::ContactReview.fields()[0], Field::ContactPerson);
    }

    #[test]
    fn visible_fields_project_current_step() {
        let mut form = ApplicationForm::new();
        form.update(Field::CompanyName, "Acme").unwrap();
        form.update(Field::NetProfit, "1200").unwrap();
        let visible = form.visible_fields();
        assert_eq!(visible.len(), 5);
        assert_eq!(visible[0], (Field::CompanyName, "Acme".to_string()));
        assert!(visible.iter().all(|(f, _)| *f != Field::NetProfit));
    }

    #[test]
    fn cancel_discards_everything() {
        let mut form = ApplicationForm::new();
        form.update(Field::CompanyName, "Acme").unwrap();
        form.next();
        form.cancel();
        assert_eq!(form.step(), Step::CompanyInfo);
        assert_eq!(form.draft(), LoanApplicationDraft::default());
    }

    /// A form on the review step with one field filled.
    fn review_form() -> ApplicationForm {
        let mut form = ApplicationForm::new();
        form.update(Field::CompanyName, "Acme").unwrap();
        form.next();
        form.next();
        form.next();
        form
    }

    #[tokio::test(start_paused = true)]
    async fn submit_waits_then_stamps_and_clears() {
        let log = NotificationLog::new();
        let mut form = review_form();

        let started = tokio::time::Instant::now();
        let submitted = form.submit(log.clone()).await.unwrap();
        assert!(started.elapsed() >= SUBMISSION_DELAY);

        assert!(submitted.application_id().starts_with("SME-"));
        assert!(submitted.application_id()[4..].parse::<i64>().is_ok());
        assert_eq!(submitted.draft().company.company_name, "Acme");

        assert_eq!(form.step(), Step::CompanyInfo);
        assert_eq!(form.draft(), LoanApplicationDraft::default());
        assert!(!form.is_submitting());

        let entries = log.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "Application Submitted Successfully");
        assert!(entries[0].description.contains(submitted.application_id()));
    }

    #[tokio::test(start_paused = true)]
    async fn pending_state_is_visible_during_delay() {
        let log = NotificationLog::new();
        let mut form = review_form();

        let pending = form.begin_submit(log.clone()).unwrap();
        tokio::time::sleep(SUBMISSION_DELAY / 2).await;

        assert!(form.is_submitting());
        assert_eq!(form.forward_label(), "Encrypting & Submitting...");
        // The draft stays on screen until the delay is over.
        assert_eq!(form.draft().company.company_name, "Acme");
        assert_eq!(form.step(), Step::ContactReview);
        assert!(matches!(form.begin_submit(log.clone()), Err(SubmitError::InFlight)));
        assert!(log.is_empty());

        pending.wait().await.unwrap();
        assert!(!form.is_submitting());
        assert_eq!(log.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn abandoned_submission_still_completes() {
        let log = NotificationLog::new();
        let mut form = review_form();

        let waited = tokio::time::timeout(Duration::from_millis(100), form.submit(log.clone())).await;
        assert!(waited.is_err());
        assert!(form.is_submitting());

        tokio::time::sleep(SUBMISSION_DELAY).await;
        tokio::task::yield_now().await;

        assert!(!form.is_submitting());
        assert_eq!(form.forward_label(), "Next Step");
        assert_eq!(form.step(), Step::CompanyInfo);
        assert_eq!(form.draft(), LoanApplicationDraft::default());
        let entries = log.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "Application Submitted Successfully");
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_form_still_notifies() {
        let log = NotificationLog::new();
        let mut form = review_form();
        let pending = form.begin_submit(log.clone()).unwrap();
        drop(form);

        let submitted = pending.wait().await.unwrap();
        assert_eq!(submitted.draft().company.company_name, "Acme");
        assert_eq!(log.len(), 1);
    }
}
