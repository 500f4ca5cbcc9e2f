//! Indicative loan eligibility scoring for NZ personal-loan borrowers.
//!
//! The [`eligibility`] module holds the pure scorer. The remaining modules are the
//! collaborators that consume its output: a key-value [`session`] slot carrying the last
//! result between views, the static [`lenders`] directory, and score-improvement [`advice`].

pub mod advice;
pub mod config;
pub mod eligibility;
pub mod error;
pub mod lenders;
pub mod session;
pub mod telemetry;
