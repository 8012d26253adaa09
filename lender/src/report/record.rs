//! Financial records and the applications they are attached to.
//!
//! The figures are display strings (`"$2.4M"`, `"+$125K"`) exactly as the
//! portal receives them. Only the risk score is numeric, because banding
//! needs it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::MAX_RISK_SCORE;

use super::risk::RiskBand;

/// Errors raised while constructing report records.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    /// Risk scores live in `[0, 100]`.
    #[error("risk score {0} is outside 0..=100")]
    ScoreOutOfRange(i64),
}

/// Headline figures of an SME, as shown on a report card.
///
/// Deserialization goes through [`FinancialRecord::new`], so a payload with
/// an out-of-range score is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawFinancialRecord")]
pub struct FinancialRecord {
    /// Annual revenue, formatted currency.
    pub revenue: String,
    /// Net profit, formatted currency.
    pub profit: String,
    /// Signed cashflow, formatted currency (`"+$95K"`).
    pub cashflow: String,
    /// Risk score in `[0, 100]`. Higher is safer.
    pub risk_score: u8,
    /// Letter-grade credit rating (`"A-"`, `"B+"`).
    pub credit_rating: String,
}

impl FinancialRecord {
    /// Builds a record, checking the score range.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::ScoreOutOfRange`] for scores outside `[0, 100]`.
    pub fn new(
        revenue: impl Into<String>,
        profit: impl Into<String>,
        cashflow: impl Into<String>,
        risk_score: i64,
        credit_rating: impl Into<String>,
    ) -> Result<Self, RecordError> {
        if !(0..=MAX_RISK_SCORE as i64).contains(&risk_score) {
            return Err(RecordError::ScoreOutOfRange(risk_score));
        }
        Ok(Self {
            revenue: revenue.into(),
            profit: profit.into(),
            cashflow: cashflow.into(),
            risk_score: risk_score as u8,
            credit_rating: credit_rating.into(),
        })
    }

    /// Risk band of this record's score.
    pub fn risk_band(&self) -> RiskBand {
        RiskBand::classify(self.risk_score as i64)
    }
}

/// Wire shape of [`FinancialRecord`] before the score is checked.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawFinancialRecord {
    revenue: String,
    profit: String,
    cashflow: String,
    risk_score: i64,
    credit_rating: String,
}

impl TryFrom<RawFinancialRecord> for FinancialRecord {
    type Error = RecordError;

    fn try_from(raw: RawFinancialRecord) -> Result<Self, Self::Error> {
        Self::new(
            raw.revenue,
            raw.profit,
            raw.cashflow,
            raw.risk_score,
            raw.credit_rating,
        )
    }
}

/// An SME loan application as listed on the lender dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyApplication {
    /// Display name of the company.
    pub company_name: String,
    /// Externally assigned identifier (`"SME-2024-001"`).
    pub application_id: String,
    /// The figures behind the report card.
    pub financial_data: FinancialRecord,
    /// Whether the current lender is approved to decrypt this report.
    pub is_lender_approved: bool,
}
