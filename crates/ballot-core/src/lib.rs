//! Ballot Core - Single-proposal-set voting ledger.
//!
//! This crate provides:
//! - The fixed proposal set and its tally
//! - The voter registry (rights, votes, delegate pointers)
//! - Transitive delegation with loop detection
//! - The chairperson-gated `Ballot` controller and winner queries

pub mod proposal;
pub mod registry;
pub mod delegation;
pub mod ballot;
pub mod event;
pub mod error;

pub use proposal::{Proposal, ProposalSet};
pub use registry::{Voter, VoterRegistry, VoterStatus};
pub use delegation::{DelegationResolver, Resolution, Settlement};
pub use ballot::Ballot;
pub use event::BallotEvent;
pub use error::BallotError;
