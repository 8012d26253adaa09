//! Risk score classification.
//!
//! Three bands, two thresholds. The classifier takes an `i64` and is total:
//! anything above 100 lands in [`RiskBand::Low`] and anything below zero in
//! [`RiskBand::High`], since the comparisons are the same ones that apply
//! inside the valid range.

use serde::{Deserialize, Serialize};

use crate::config::{LOW_RISK_THRESHOLD, MEDIUM_RISK_THRESHOLD};

/// Risk band of a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskBand {
    /// `score >= 80`.
    Low,
    /// `60 <= score < 80`.
    Medium,
    /// `score < 60`.
    High,
}

/// Color tone used for the band label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskTone {
    Success,
    Warning,
    Destructive,
}

/// Badge style used for the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BadgeVariant {
    Default,
    Secondary,
    Destructive,
}

impl RiskBand {
    /// Classifies a score. Pure and total over `i64`.
    pub fn classify(score: i64) -> Self {
        if score >= LOW_RISK_THRESHOLD {
            RiskBand::Low
        } else if score >= MEDIUM_RISK_THRESHOLD {
            RiskBand::Medium
        } else {
            RiskBand::High
        }
    }

    /// Display label, e.g. `"Low Risk"`.
    pub fn label(&self) -> &'static str {
        match self {
            RiskBand::Low => "Low Risk",
            RiskBand::Medium => "Medium Risk",
            RiskBand::High => "High Risk",
        }
    }

    pub fn tone(&self) -> RiskTone {
        match self {
            RiskBand::Low => RiskTone::Success,
            RiskBand::Medium => RiskTone::Warning,
            RiskBand::High => RiskTone::Destructive,
        }
    }

    pub fn badge(&self) -> BadgeVariant {
        match self {
            RiskBand::Low => BadgeVariant::Default,
            RiskBand::Medium => BadgeVariant::Secondary,
            RiskBand::High => BadgeVariant::Destructive,
        }
    }
}

impl std::fmt::Display for RiskBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
