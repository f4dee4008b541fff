//! Journal entries for committed ballot operations.

use ballot_types::Address;
use serde::{Deserialize, Serialize};
use crate::delegation::Settlement;

/// A state change the ballot committed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum BallotEvent {
    /// Chairperson gave `voter` a voting right
    RightGranted { voter: Address, weight: u64 },
    /// `voter` voted directly
    Voted { voter: Address, proposal: usize, weight: u64 },
    /// `voter` delegated to `requested`, resolved to `terminus`
    Delegated {
        voter: Address,
        requested: Address,
        terminus: Address,
        weight: u64,
        settlement: Settlement,
    },
}

impl BallotEvent {
    /// The participant whose call produced this event.
    pub fn voter(&self) -> Address {
        match self {
            BallotEvent::RightGranted { voter, .. }
            | BallotEvent::Voted { voter, .. }
            | BallotEvent::Delegated { voter, .. } => *voter,
        }
    }
}
