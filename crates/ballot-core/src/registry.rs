//! Voter registry.
//!
//! Maps participant identity to voting-rights state. Entries are created
//! lazily on first write and never removed; unknown identities read as a
//! voter without rights.

use std::collections::HashMap;
use ballot_types::Address;
use serde::{Deserialize, Serialize};
use crate::error::BallotError;
use crate::proposal::ProposalSet;

/// Voting-rights state of one participant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voter {
    /// Weight carried by this voter (own right plus pending delegations)
    pub weight: u64,
    /// Whether the voter has voted or delegated
    pub voted: bool,
    /// Proposal chosen by a direct vote
    pub vote: Option<usize>,
    /// Resolved delegation terminus, if the voter delegated
    pub delegate: Option<Address>,
}

/// Lifecycle position of a voter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoterStatus {
    /// No weight, cannot vote
    NoRight,
    /// Has weight, may vote or delegate
    Enfranchised,
    /// Voted or delegated (terminal)
    Voted,
}

impl Voter {
    /// Check if this voter may still vote or delegate.
    pub fn can_vote(&self) -> bool {
        self.weight > 0 && !self.voted
    }

    /// Current lifecycle position.
    pub fn status(&self) -> VoterStatus {
        if self.voted {
            VoterStatus::Voted
        } else if self.weight > 0 {
            VoterStatus::Enfranchised
        } else {
            VoterStatus::NoRight
        }
    }
}

/// Registry of all voters referenced so far.
#[derive(Debug, Default, Clone)]
pub struct VoterRegistry {
    voters: HashMap<Address, Voter>,
}

impl VoterRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a voter. Unknown identities read as the default voter.
    pub fn get(&self, address: &Address) -> Voter {
        self.voters.get(address).copied().unwrap_or_default()
    }

    /// Get a mutable entry, creating it on first reference.
    pub fn entry_mut(&mut self, address: Address) -> &mut Voter {
        self.voters.entry(address).or_default()
    }

    /// Number of identities with an entry.
    pub fn len(&self) -> usize {
        self.voters.len()
    }

    /// Check if the registry has no entries.
    pub fn is_empty(&self) -> bool {
        self.voters.is_empty()
    }

    /// Give `target` a voting right of `weight`.
    ///
    /// The caller is responsible for the authority check.
    ///
    /// # Errors
    /// - `AlreadyVoted` if the target has voted or delegated
    /// - `AlreadyEnfranchised` if the target already carries weight
    pub fn grant(&mut self, target: Address, weight: u64) -> Result<(), BallotError> {
        let voter = self.get(&target);
        if voter.voted {
            return Err(BallotError::AlreadyVoted);
        }
        if voter.weight != 0 {
            return Err(BallotError::AlreadyEnfranchised);
        }

        self.entry_mut(target).weight = weight;
        Ok(())
    }

    /// Record a direct vote by `caller` for proposal `index`.
    ///
    /// Returns the weight credited to the proposal.
    ///
    /// # Errors
    /// - `NoVotingRight` if the caller has no weight or already voted
    /// - `InvalidProposal` if `index` is out of range
    pub fn record_direct_vote(
        &mut self,
        caller: Address,
        proposals: &mut ProposalSet,
        index: usize,
    ) -> Result<u64, BallotError> {
        let voter = self.get(&caller);
        if !voter.can_vote() {
            return Err(BallotError::NoVotingRight);
        }

        proposals.credit(index, voter.weight)?;

        let entry = self.entry_mut(caller);
        entry.voted = true;
        entry.vote = Some(index);
        Ok(voter.weight)
    }

    /// Weight held by voters that have not voted yet.
    ///
    /// Together with the tally this accounts for every granted right.
    pub fn unsettled_weight(&self) -> u64 {
        self.voters
            .values()
            .filter(|v| !v.voted)
            .map(|v| v.weight)
            .sum()
    }
}
