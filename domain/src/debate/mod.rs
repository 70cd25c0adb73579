//! Debate protocol domain
//!
//! ```text
//! IDLE → PARALLEL_PROPOSALS → SYNTHESIS → AWAITING_USER_APPROVAL
//!                 ↑                               │
//!                 └──────── refinement ───────────┤
//!                                                 ↓ approve
//!        GENERATING_CODE → QC_REVIEW → GENERATING_CODE → EXECUTING
//!
//! any non-terminal state ──────────────────────────────→ FAILED
//! ```

pub mod entities;
pub mod event;
pub mod state;
