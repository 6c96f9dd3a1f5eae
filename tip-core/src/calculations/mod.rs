//! Tip calculation modules.
//!
//! `tip` holds the bill/percentage contract; `common` holds the decimal
//! helpers it is built from.

pub mod common;
pub mod tip;

pub use tip::{TipError, TipField, TipOutcome, compute};
