//! Conformance harness for bumpfmt.
//!
//! This crate provides:
//! - Fixtures: JSON cases pairing a template and typed arguments with the
//!   expected output or error kind
//! - Runner: executes fixtures against `bumpfmt-core` and reports diffs
//! - Structured logging: JSONL records for every case and run
//! - The demonstration program behind `bumpfmt-harness demo`

#![forbid(unsafe_code)]

pub mod demo;
pub mod diff;
pub mod fixtures;
pub mod runner;
pub mod structured_log;

pub use fixtures::{FixtureArg, FixtureCase, FixtureError, FixtureSet};
pub use runner::{TestRunner, VerificationResult, VerificationSummary};
