//! Configuration validation vocabulary.
//!
//! Infrastructure parses raw configuration files; the issues it finds are
//! expressed with these domain types so every layer reports them the same way.

pub mod validation;

pub use validation::{ConfigIssue, ConfigIssueCode, Severity};
