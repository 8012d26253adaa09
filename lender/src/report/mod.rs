//! # Report Module: Encrypted Financial Reports
//!
//! A lender sees one report card per SME application. Each card shows the
//! company's headline figures either in clear text or as block-glyph
//! placeholders, plus a risk assessment derived from the score.
//!
//! ```text
//! record.rs     — FinancialRecord and CompanyApplication
//! risk.rs       — Score → band / tone / badge classification
//! redaction.rs  — The reveal rule and the rendered DisplayFields
//! ```
//!
//! ## The reveal rule
//!
//! A field is shown in clear text when the card has been decrypted **or**
//! the lender is *not* approved for it. The second half reads backwards
//! (unapproved lenders are precisely the ones who should see placeholders),
//! but it is the rule the portal has always shipped, so it is reproduced
//! as-is. See [`redaction::is_revealed`].

pub mod record;
pub mod redaction;
pub mod risk;

pub use record::{CompanyApplication, FinancialRecord, RecordError};
pub use redaction::{is_revealed, render, DisplayFields, LockControl, ReportCard};
pub use risk::{BadgeVariant, RiskBand, RiskTone};
