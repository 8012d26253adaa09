//! # Application Module: The Loan Application Form
//!
//! SMEs apply for financing through a four-step form:
//!
//! ```text
//! 1. Company Information    → name, registration, industry, founding year, description
//! 2. Loan Requirements      → amount, repayment term, purpose, collateral
//! 3. Financial Information  → annual / monthly revenue, net profit, existing debt
//! 4. Contact & Review       → contact person, email, phone, summary
//! ```
//!
//! `draft.rs` holds the data (one struct per step, unioned into the draft)
//! and `form.rs` holds the navigation and the simulated submission.

pub mod draft;
pub mod form;

pub use draft::{
    CompanyInfo, ContactInfo, DraftError, Field, FinancialInfo, Industry, LoanApplicationDraft,
    LoanPurpose, LoanRequirements, RepaymentTerm, ReviewSummary, SubmittedApplication,
};
pub use form::{ApplicationForm, PendingSubmission, Step, SubmitError};
