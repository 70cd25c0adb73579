//! Advisory agent voting.
//!
//! Votes are heuristics produced by text generators. Aggregation here is a
//! simple tally, not an agreement protocol, and it never gates the main
//! debate path.

pub mod consensus;
pub mod parsing;
pub mod vote;

pub use consensus::{ConsensusOutcome, ConsensusRound};
pub use parsing::{parse_review_pass, parse_review_response};
pub use vote::{Verdict, Vote, VoteResult, is_consensus_approved};
