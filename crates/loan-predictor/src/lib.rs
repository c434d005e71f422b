//! Loan approval scoring pipeline.
//!
//! The crate turns a validated applicant record into an approval decision:
//! categorical fields are encoded to the numeric codes the artifacts were
//! fitted on, the fixed-order feature vector is scaled and classified, and the
//! resulting probability feeds a risk tier and recommendation text. Artifacts
//! are loaded once at startup and shared read-only across requests.

pub mod config;
pub mod error;
pub mod model;
pub mod scoring;
pub mod telemetry;
