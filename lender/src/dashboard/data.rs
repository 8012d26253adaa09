//! Static dashboard content: the sample applications, the header
//! statistics, and the cashflow strip in the footer. None of it is live.

use serde::{Deserialize, Serialize};

use crate::config::REDACTED_RATING;
use crate::report::{CompanyApplication, FinancialRecord};

/// One header statistic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatCard {
    pub title: &'static str,
    pub value: &'static str,
    pub trend: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    Up,
    Down,
}

/// One month of the aggregated cashflow strip. Only some months are public.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashflowPoint {
    pub month: &'static str,
    pub value: Option<&'static str>,
    pub trend: Trend,
}

impl CashflowPoint {
    pub fn is_visible(&self) -> bool {
        self.value.is_some()
    }

    /// The figure, or a placeholder for months kept private.
    pub fn display_value(&self) -> &'static str {
        self.value.unwrap_or(REDACTED_RATING)
    }
}

/// The three applications listed on the dashboard.
pub fn sample_applications() -> Vec<CompanyApplication> {
    let record = |revenue: &str, profit: &str, cashflow: &str, risk_score: u8, rating: &str| {
        FinancialRecord {
            revenue: revenue.into(),
            profit: profit.into(),
            cashflow: cashflow.into(),
            risk_score,
            credit_rating: rating.into(),
        }
    };

    vec![
        CompanyApplication {
            company_name: "TechFlow Solutions Ltd.".into(),
            application_id: "SME-2024-001".into(),
            financial_data: record("$2.4M", "$380K", "+$125K", 85, "A-"),
            is_lender_approved: true,
        },
        CompanyApplication {
            company_name: "Green Energy Innovations".into(),
            application_id: "SME-2024-002".into(),
            financial_data: record("$1.8M", "$220K", "+$95K", 72, "B+"),
            is_lender_approved: false,
        },
        CompanyApplication {
            company_name: "Metro Logistics Group".into(),
            application_id: "SME-2024-003".into(),
            financial_data: record("$4.2M", "$630K", "+$280K", 91, "A"),
            is_lender_approved: true,
        },
    ]
}

pub fn stat_cards() -> Vec<StatCard> {
    vec![
        StatCard {
            title: "Active Applications",
            value: "24",
            trend: "+12%",
        },
        StatCard {
            title: "Approved Lenders",
            value: "8",
            trend: "+2",
        },
        StatCard {
            title: "Total SMEs",
            value: "156",
            trend: "+18%",
        },
        StatCard {
            title: "Avg. Risk Score",
            value: "78.5",
            trend: "+3.2",
        },
    ]
}

pub fn cashflow_overview() -> Vec<CashflowPoint> {
    let point = |month, value, trend| CashflowPoint { month, value, trend };
    vec![
        point("Jan", None, Trend::Up),
        point("Feb", None, Trend::Up),
        point("Mar", Some("$2.1M"), Trend::Up),
        point("Apr", None, Trend::Down),
        point("May", None, Trend::Up),
        point("Jun", Some("$3.8M"), Trend::Up),
    ]
}
