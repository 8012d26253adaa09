// Copyright (c) 2026 Vault Lender Contributors. MIT License.
// See LICENSE for details.

//! # Vault Lender: Core Library
//!
//! The view-model layer of a confidential SME lending portal. Lenders browse
//! encrypted financial reports, SMEs walk through a four-step loan
//! application, and three wallet actions push "encrypted" arguments at a
//! lending contract.
//!
//! Nothing in here is real cryptography. The "encryption" is a big-endian
//! hex word and the "proof" is a fixed-width placeholder. Both sit behind
//! traits ([`encoding::Encoder`], [`encoding::ProofGenerator`]) so a real
//! backend can slot in without touching the dashboard code.
//!
//! ## Architecture
//!
//! - **config** — Constants: contract address, placeholder glyphs, thresholds.
//! - **report** — Financial records, risk banding, and the redaction rule.
//! - **application** — Loan application draft and the multi-step form.
//! - **encoding** — 256-bit word encoding and placeholder proof generation.
//! - **abi** — The lending contract's method and event surface.
//! - **wallet** — Wallet session, contract writers, and the action client.
//! - **notify** — Toast-style notifications and the `Notifier` seam.
//! - **settings** — Lender portal settings (never persisted).
//! - **dashboard** — Top-level view state and its typed event channel.

pub mod abi;
pub mod application;
pub mod config;
pub mod dashboard;
pub mod encoding;
pub mod notify;
pub mod report;
pub mod settings;
pub mod wallet;
