//! Field redaction for report cards.
//!
//! [`render`] is the pure contract: record + approval flag + decryption
//! toggle in, display strings out. [`ReportCard`] wraps it with the one
//! piece of local state a card has, the decryption toggle, which only moves
//! when the lender is approved.

use serde::{Deserialize, Serialize};

use crate::config::{
    APPROVAL_REQUIRED_NOTICE, REDACTED_AMOUNT, REDACTED_RATING, REDACTED_RISK, REDACTED_SCORE,
};

use super::record::{CompanyApplication, FinancialRecord};
use super::risk::{BadgeVariant, RiskBand, RiskTone};

/// Whether a card's fields are shown in clear text.
///
/// Reproduces the shipped rule literally: clear text when decrypted, or when
/// the lender is *not* approved. An unapproved lender therefore sees every
/// figure, which looks inverted relative to the "approval required" notice
/// printed on the same card.
pub fn is_revealed(is_lender_approved: bool, is_decrypted: bool) -> bool {
    is_decrypted || !is_lender_approved
}

/// The control drawn in the card header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LockControl {
    /// Approved lenders get a clickable lock; `unlocked` mirrors the toggle.
    Toggle { unlocked: bool },
    /// Everyone else gets a static, muted lock.
    Locked,
}

/// Everything a report card displays, already redacted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayFields {
    pub revenue: String,
    pub profit: String,
    pub cashflow: String,
    pub credit_rating: String,
    /// `"85/100"` or the score placeholder.
    pub risk_score: String,
    /// `"Low Risk"` or the band placeholder.
    pub risk_label: String,
    /// Derived from the raw score even while redacted.
    pub risk_tone: RiskTone,
    /// Derived from the raw score even while redacted.
    pub badge: BadgeVariant,
    /// Set whenever the card has not been decrypted.
    pub encrypted_style: bool,
    pub lock: LockControl,
    /// Footer notice for reports the lender is not approved for.
    pub notice: Option<&'static str>,
}

/// Renders a record under the reveal rule.
pub fn render(
    financial_data: &FinancialRecord,
    is_lender_approved: bool,
    is_decrypted: bool,
) -> DisplayFields {
    let revealed = is_revealed(is_lender_approved, is_decrypted);
    let band = RiskBand::classify(financial_data.risk_score as i64);

    let show = |value: &str, placeholder: &str| {
        if revealed {
            value.to_string()
        } else {
            placeholder.to_string()
        }
    };

    DisplayFields {
        revenue: show(&financial_data.revenue, REDACTED_AMOUNT),
        profit: show(&financial_data.profit, REDACTED_AMOUNT),
        cashflow: show(&financial_data.cashflow, REDACTED_AMOUNT),
        credit_rating: show(&financial_data.credit_rating, REDACTED_RATING),
        risk_score: show(&format!("{}/100", financial_data.risk_score), REDACTED_SCORE),
        risk_label: show(band.label(), REDACTED_RISK),
        risk_tone: band.tone(),
        badge: band.badge(),
        encrypted_style: !is_decrypted,
        lock: if is_lender_approved {
            LockControl::Toggle {
                unlocked: is_decrypted,
            }
        } else {
            LockControl::Locked
        },
        notice: (!is_lender_approved).then_some(APPROVAL_REQUIRED_NOTICE),
    }
}

/// A report card: an application plus its decryption toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportCard {
    application: CompanyApplication,
    is_decrypted: bool,
}

impl ReportCard {
    /// New cards start encrypted.
    pub fn new(application: CompanyApplication) -> Self {
        Self {
            application,
            is_decrypted: false,
        }
    }

    pub fn application(&self) -> &CompanyApplication {
        &self.application
    }

    pub fn is_decrypted(&self) -> bool {
        self.is_decrypted
    }

    /// Flips the decryption toggle. A no-op unless the lender is approved.
    /// Returns the toggle's state afterwards.
    pub fn toggle_decrypt(&mut self) -> bool {
        if self.application.is_lender_approved {
            self.is_decrypted = !self.is_decrypted;
            tracing::debug!(
                application_id = %self.application.application_id,
                decrypted = self.is_decrypted,
                "report toggled"
            );
        }
        self.is_decrypted
    }

    pub fn render(&self) -> DisplayFields {
        render(
            &self.application.financial_data,
            self.application.is_lender_approved,
            self.is_decrypted,
        )
    }
}
