//! Core library for the CredSaathi operator console.
//!
//! The console lets a loan operator register applicants described by four
//! heterogeneous data facets, request a creditworthiness score from the
//! scoring backend, and inspect the backend's free-form insight reports.
//! This crate owns the non-trivial logic: facet validation and atomic
//! submission assembly, score-to-tier presentation, histogram aggregation,
//! and the recursive normalization of arbitrarily shaped report values.
//! Transport, credential storage, and terminal rendering are thin
//! collaborators behind traits.

pub mod config;
pub mod error;
pub mod session;
pub mod telemetry;
pub mod workflows;
