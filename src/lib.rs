//! Termination Settlement Engine for Brazilian CLT contracts
//!
//! This crate computes the settlement owed when an employment contract ends:
//! salary balance, notice pay, prorated 13th salary, vacation entitlements
//! with their one-third bonus, progressive social-security withholding and
//! an estimated severance fund balance with its dismissal penalty.

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod worksheet;
