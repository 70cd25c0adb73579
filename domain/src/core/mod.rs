//! Core domain concepts shared across all subdomains.
//!
//! - [`ids::DebateId`] / [`ids::TaskId`]: opaque identifiers
//! - [`error::DomainError`]: domain-level errors
//! - [`string::truncate`]: UTF-8 safe truncation for summaries

pub mod error;
pub mod ids;
pub mod string;
