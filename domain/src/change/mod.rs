//! Code-change extraction and validation.
//!
//! Model output is free text that only sometimes contains the JSON we asked
//! for. [`repair`] recovers a change set from it through a staged fallback
//! pipeline. [`quality::validate`] then rejects stub-like code, in which case
//! [`scaffold::scaffold`] produces a deterministic replacement.

pub mod file_change;
pub mod quality;
pub mod repair;
pub mod scaffold;

pub use file_change::{FileAction, FileChange};
pub use quality::{QualityVerdict, validate};
pub use repair::{FALLBACK_PATH, RepairOutcome, RepairStage, repair, repair_with_objective};
pub use scaffold::scaffold;
