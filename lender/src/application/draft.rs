//! The loan application draft.
//!
//! One struct per form step, unioned into [`LoanApplicationDraft`]. Text
//! inputs are kept exactly as typed (numbers included); only the select
//! inputs are typed, because they can only ever hold one of their options.
//! [`Field`] names every input, so presence checks are exhaustive matches
//! rather than key lookups.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::form::Step;

/// Errors raised while editing or loading a draft.
#[derive(Debug, Error)]
pub enum DraftError {
    /// A select input was given a value that is not one of its options.
    #[error("{field} does not accept {value:?}")]
    InvalidChoice { field: Field, value: String },

    /// The draft file could not be parsed.
    #[error("malformed draft: {0}")]
    Json(#[from] serde_json::Error),
}

// ---------------------------------------------------------------------------
// Select options
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Industry {
    Technology,
    Manufacturing,
    Retail,
    Services,
    Healthcare,
    Construction,
    Other,
}

impl Industry {
    pub const ALL: [Industry; 7] = [
        Industry::Technology,
        Industry::Manufacturing,
        Industry::Retail,
        Industry::Services,
        Industry::Healthcare,
        Industry::Construction,
        Industry::Other,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Industry::Technology => "technology",
            Industry::Manufacturing => "manufacturing",
            Industry::Retail => "retail",
            Industry::Services => "services",
            Industry::Healthcare => "healthcare",
            Industry::Construction => "construction",
            Industry::Other => "other",
        }
    }
}

impl FromStr for Industry {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Industry::ALL.into_iter().find(|i| i.key() == s).ok_or(())
    }
}

/// Repayment term. Only the five offered lengths exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum RepaymentTerm {
    Months12,
    Months24,
    Months36,
    Months48,
    Months60,
}

impl RepaymentTerm {
    pub const ALL: [RepaymentTerm; 5] = [
        RepaymentTerm::Months12,
        RepaymentTerm::Months24,
        RepaymentTerm::Months36,
        RepaymentTerm::Months48,
        RepaymentTerm::Months60,
    ];

    pub fn months(&self) -> u16 {
        match self {
            RepaymentTerm::Months12 => 12,
            RepaymentTerm::Months24 => 24,
            RepaymentTerm::Months36 => 36,
            RepaymentTerm::Months48 => 48,
            RepaymentTerm::Months60 => 60,
        }
    }
}

impl TryFrom<u16> for RepaymentTerm {
    type Error = String;

    fn try_from(months: u16) -> Result<Self, Self::Error> {
        RepaymentTerm::ALL
            .into_iter()
            .find(|t| t.months() == months)
            .ok_or_else(|| format!("unsupported repayment term: {} months", months))
    }
}

impl From<RepaymentTerm> for u16 {
    fn from(term: RepaymentTerm) -> Self {
        term.months()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoanPurpose {
    Expansion,
    Equipment,
    Inventory,
    Cashflow,
    Renovation,
    Other,
}

impl LoanPurpose {
    pub const ALL: [LoanPurpose; 6] = [
        LoanPurpose::Expansion,
        LoanPurpose::Equipment,
        LoanPurpose::Inventory,
        LoanPurpose::Cashflow,
        LoanPurpose::Renovation,
        LoanPurpose::Other,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            LoanPurpose::Expansion => "expansion",
            LoanPurpose::Equipment => "equipment",
            LoanPurpose::Inventory => "inventory",
            LoanPurpose::Cashflow => "cashflow",
            LoanPurpose::Renovation => "renovation",
            LoanPurpose::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LoanPurpose::Expansion => "Business Expansion",
            LoanPurpose::Equipment => "Equipment Purchase",
            LoanPurpose::Inventory => "Inventory Financing",
            LoanPurpose::Cashflow => "Working Capital",
            LoanPurpose::Renovation => "Property Renovation",
            LoanPurpose::Other => "Other",
        }
    }
}

impl FromStr for LoanPurpose {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LoanPurpose::ALL.into_iter().find(|p| p.key() == s).ok_or(())
    }
}

// ---------------------------------------------------------------------------
// Per-step records
// ---------------------------------------------------------------------------

/// Step 1: Company Information.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompanyInfo {
    pub company_name: String,
    pub registration_number: String,
    pub industry: Option<Industry>,
    pub year_established: String,
    pub business_description: String,
}

/// Step 2: Loan Requirements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoanRequirements {
    pub loan_amount: String,
    pub repayment_term: Option<RepaymentTerm>,
    pub loan_purpose: Option<LoanPurpose>,
    pub collateral: String,
}

/// Step 3: Financial Information.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FinancialInfo {
    pub annual_revenue: String,
    pub monthly_revenue: String,
    pub net_profit: String,
    pub existing_debt: String,
}

/// Step 4: Contact & Review.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactInfo {
    pub contact_person: String,
    pub contact_email: String,
    pub contact_phone: String,
}

// ---------------------------------------------------------------------------
// Field
// ---------------------------------------------------------------------------

/// Every input on the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    CompanyName,
    RegistrationNumber,
    Industry,
    YearEstablished,
    BusinessDescription,
    LoanAmount,
    RepaymentTerm,
    LoanPurpose,
    Collateral,
    AnnualRevenue,
    MonthlyRevenue,
    NetProfit,
    ExistingDebt,
    ContactPerson,
    ContactEmail,
    ContactPhone,
}

impl Field {
    pub const ALL: [Field; 16] = [
        Field::CompanyName,
        Field::RegistrationNumber,
        Field::Industry,
        Field::YearEstablished,
        Field::BusinessDescription,
        Field::LoanAmount,
        Field::RepaymentTerm,
        Field::LoanPurpose,
        Field::Collateral,
        Field::AnnualRevenue,
        Field::MonthlyRevenue,
        Field::NetProfit,
        Field::ExistingDebt,
        Field::ContactPerson,
        Field::ContactEmail,
        Field::ContactPhone,
    ];

    /// Input label as shown on the form (without the required marker).
    pub fn label(&self) -> &'static str {
        match self {
            Field::CompanyName => "Company Name",
            Field::RegistrationNumber => "Registration Number",
            Field::Industry => "Industry",
            Field::YearEstablished => "Year Established",
            Field::BusinessDescription => "Business Description",
            Field::LoanAmount => "Loan Amount (USD)",
            Field::RepaymentTerm => "Repayment Term",
            Field::LoanPurpose => "Loan Purpose",
            Field::Collateral => "Collateral Information",
            Field::AnnualRevenue => "Annual Revenue (USD)",
            Field::MonthlyRevenue => "Average Monthly Revenue (USD)",
            Field::NetProfit => "Net Profit (USD)",
            Field::ExistingDebt => "Existing Debt (USD)",
            Field::ContactPerson => "Contact Person",
            Field::ContactEmail => "Email Address",
            Field::ContactPhone => "Phone Number",
        }
    }

    /// Everything except collateral and existing debt carries the `*` marker.
    pub fn is_required(&self) -> bool {
        !matches!(self, Field::Collateral | Field::ExistingDebt)
    }

    /// The step this input is shown on.
    pub fn step(&self) -> Step {
        match self {
            Field::CompanyName
            | Field::RegistrationNumber
            | Field::Industry
            | Field::YearEstablished
            | Field::BusinessDescription => Step::CompanyInfo,
            Field::LoanAmount | Field::RepaymentTerm | Field::LoanPurpose | Field::Collateral => {
                Step::LoanRequirements
            }
            Field::AnnualRevenue
            | Field::MonthlyRevenue
            | Field::NetProfit
            | Field::ExistingDebt => Step::FinancialInformation,
            Field::ContactPerson | Field::ContactEmail | Field::ContactPhone => {
                Step::ContactReview
            }
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// LoanApplicationDraft
// ---------------------------------------------------------------------------

/// The mutable, unpersisted accumulation of form input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoanApplicationDraft {
    pub company: CompanyInfo,
    pub loan: LoanRequirements,
    pub financials: FinancialInfo,
    pub contact: ContactInfo,
}

/// Step 4's summary card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewSummary {
    pub company: String,
    pub loan_amount: String,
    pub term: String,
    pub purpose: String,
}

impl LoanApplicationDraft {
    pub fn from_json(json: &str) -> Result<Self, DraftError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, DraftError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Sets one input. Text inputs take anything; selects only their options.
    /// An empty value clears a select.
    pub fn set(&mut self, field: Field, value: &str) -> Result<(), DraftError> {
        let invalid = || DraftError::InvalidChoice {
            field,
            value: value.to_string(),
        };
        match field {
            Field::CompanyName => self.company.company_name = value.to_string(),
            Field::RegistrationNumber => self.company.registration_number = value.to_string(),
            Field::Industry => {
                self.company.industry = if value.is_empty() {
                    None
                } else {
                    Some(value.parse().map_err(|_| invalid())?)
                }
            }
            Field::YearEstablished => self.company.year_established = value.to_string(),
            Field::BusinessDescription => self.company.business_description = value.to_string(),
            Field::LoanAmount => self.loan.loan_amount = value.to_string(),
            Field::RepaymentTerm => {
                self.loan.repayment_term = if value.is_empty() {
                    None
                } else {
                    let months: u16 = value.parse().map_err(|_| invalid())?;
                    Some(RepaymentTerm::try_from(months).map_err(|_| invalid())?)
                }
            }
            Field::LoanPurpose => {
                self.loan.loan_purpose = if value.is_empty() {
                    None
                } else {
                    Some(value.parse().map_err(|_| invalid())?)
                }
            }
            Field::Collateral => self.loan.collateral = value.to_string(),
            Field::AnnualRevenue => self.financials.annual_revenue = value.to_string(),
            Field::MonthlyRevenue => self.financials.monthly_revenue = value.to_string(),
            Field::NetProfit => self.financials.net_profit = value.to_string(),
            Field::ExistingDebt => self.financials.existing_debt = value.to_string(),
            Field::ContactPerson => self.contact.contact_person = value.to_string(),
            Field::ContactEmail => self.contact.contact_email = value.to_string(),
            Field::ContactPhone => self.contact.contact_phone = value.to_string(),
        }
        Ok(())
    }

    /// Current value of an input as it would appear in the field.
    pub fn get(&self, field: Field) -> String {
        match field {
            Field::CompanyName => self.company.company_name.clone(),
            Field::RegistrationNumber => self.company.registration_number.clone(),
            Field::Industry => self
                .company
                .industry
                .map(|i| i.key().to_string())
                .unwrap_or_default(),
            Field::YearEstablished => self.company.year_established.clone(),
            Field::BusinessDescription => self.company.business_description.clone(),
            Field::LoanAmount => self.loan.loan_amount.clone(),
            Field::RepaymentTerm => self
                .loan
                .repayment_term
                .map(|t| t.months().to_string())
                .unwrap_or_default(),
            Field::LoanPurpose => self
                .loan
                .loan_purpose
                .map(|p| p.key().to_string())
                .unwrap_or_default(),
            Field::Collateral => self.loan.collateral.clone(),
            Field::AnnualRevenue => self.financials.annual_revenue.clone(),
            Field::MonthlyRevenue => self.financials.monthly_revenue.clone(),
            Field::NetProfit => self.financials.net_profit.clone(),
            Field::ExistingDebt => self.financials.existing_debt.clone(),
            Field::ContactPerson => self.contact.contact_person.clone(),
            Field::ContactEmail => self.contact.contact_email.clone(),
            Field::ContactPhone => self.contact.contact_phone.clone(),
        }
    }

    pub fn is_filled(&self, field: Field) -> bool {
        !self.get(field).trim().is_empty()
    }

    /// Required inputs that are still blank, in form order.
    pub fn missing_required(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|f| f.is_required() && !self.is_filled(*f))
            .collect()
    }

    pub fn review(&self) -> ReviewSummary {
        let or = |value: String, fallback: &str| {
            if value.is_empty() {
                fallback.to_string()
            } else {
                value
            }
        };
        ReviewSummary {
            company: or(self.company.company_name.clone(), "Not provided"),
            loan_amount: format!("${}", or(self.loan.loan_amount.clone(), "0")),
            term: format!("{} months", or(self.get(Field::RepaymentTerm), "0")),
            purpose: or(self.get(Field::LoanPurpose), "Not specified"),
        }
    }
}

// ---------------------------------------------------------------------------
// SubmittedApplication
// ---------------------------------------------------------------------------

/// A draft frozen at submission, with its synthetic identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedApplication {
    application_id: String,
    submitted_at: DateTime<Utc>,
    draft: LoanApplicationDraft,
}

impl SubmittedApplication {
    pub(crate) fn new(application_id: String, submitted_at: DateTime<Utc>, draft: LoanApplicationDraft) -> Self {
        Self {
            application_id,
            submitted_at,
            draft,
        }
    }

    pub fn application_id(&self) -> &str {
        &self.application_id
    }

    pub fn submitted_at(&self) -> DateTime<Utc> {
        self.submitted_at
    }

    pub fn draft(&self) -> &LoanApplicationDraft {
        &self.draft
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_field_round_trips_through_set_and_get() {
        let mut draft = LoanApplicationDraft::default();
        for field in Field::ALL {
            let value = match field {
                Field::Industry => "retail",
                Field::RepaymentTerm => "36",
                Field::LoanPurpose => "equipment",
                _ => "x",
            };
            draft.set(field, value).unwrap();
            assert_eq!(draft.get(field), value, "{field}");
        }
        assert!(draft.missing_required().is_empty());
    }

    #[test]
    fn selects_reject_unknown_options() {
        let mut draft = LoanApplicationDraft::default();
        assert!(matches!(
            draft.set(Field::Industry, "mining"),
            Err(DraftError::InvalidChoice { field: Field::Industry, .. })
        ));
        assert!(draft.set(Field::RepaymentTerm, "18").is_err());
        assert!(draft.set(Field::RepaymentTerm, "twelve").is_err());
        assert!(draft.set(Field::LoanPurpose, "vacation").is_err());
    }

    #[test]
    fn empty_value_clears_a_select() {
        let mut draft = LoanApplicationDraft::default();
        draft.set(Field::LoanPurpose, "cashflow").unwrap();
        draft.set(Field::LoanPurpose, "").unwrap();
        assert_eq!(draft.loan.loan_purpose, None);
    }

    #[test]
    fn optional_fields_are_never_missing() {
        let missing = LoanApplicationDraft::default().missing_required();
        assert_eq!(missing.len(), 14);
        assert!(!missing.contains(&Field::Collateral));
        assert!(!missing.contains(&Field::ExistingDebt));
    }

    #[test]
    fn review_fallbacks() {
        let summary = LoanApplicationDraft::default().review();
        assert_eq!(summary.company, "Not provided");
        assert_eq!(summary.loan_amount, "$0");
        assert_eq!(summary.term, "0 months");
        assert_eq!(summary.purpose, "Not specified");
    }

    #[test]
    fn json_uses_form_keys_and_tolerates_gaps() {
        let draft = LoanApplicationDraft::from_json(
            r#"{"company": {"companyName": "Acme"}, "loan": {"repaymentTerm": 24, "loanPurpose": "inventory"}}"#,
        )
        .unwrap();
        assert_eq!(draft.company.company_name, "Acme");
        assert_eq!(draft.loan.repayment_term, Some(RepaymentTerm::Months24));
        assert_eq!(draft.loan.loan_purpose.unwrap().label(), "Inventory Financing");
        assert!(LoanApplicationDraft::from_json(r#"{"loan": {"repaymentTerm": 7}}"#).is_err());
    }
}
