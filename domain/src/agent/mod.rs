//! Agent identity and role model.
//!
//! Agents themselves live outside the domain (they call LLMs). The domain
//! only knows who they are ([`AgentProfile`]) and which part of the protocol
//! they are responsible for ([`AgentRole`]).

pub mod profile;
pub mod role;

pub use profile::{AgentId, AgentProfile};
pub use role::{AgentRole, ProposalDomain};
