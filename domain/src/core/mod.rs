//! Core domain concepts shared across all subdomains.
//!
//! - [`model::ModelSelector`] — which model, on which backend, answers for a participant
//! - [`topic::Topic`] — a validated debate topic
//! - [`error::DomainError`] — domain-level validation errors

pub mod error;
pub mod model;
pub mod topic;
