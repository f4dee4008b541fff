//! Transitive vote delegation.
//!
//! A voter hands its weight to another voter. The chain of delegate
//! pointers is followed to its terminus; if the terminus already voted the
//! weight lands on that proposal immediately, otherwise it is merged into
//! the terminus and counted when (if) the terminus votes.
//!
//! Resolution is a pure walk over the registry. Mutation happens in a
//! separate step that runs only after resolution succeeded, so a rejected
//! delegation leaves no trace.

use std::collections::HashSet;
use ballot_types::Address;
use serde::{Deserialize, Serialize};
use crate::error::BallotError;
use crate::proposal::ProposalSet;
use crate::registry::VoterRegistry;

/// Where delegated weight ends up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Settlement {
    /// Terminus already voted; weight added to this proposal
    SettledImmediately(usize),
    /// Terminus has not voted; weight merged into this voter
    PendingOnVoter(Address),
}

/// Outcome of following a delegation chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    /// Final voter in the chain
    pub terminus: Address,
    /// Delegate pointers followed past the requested target
    pub hops: usize,
    /// How the caller's weight settles
    pub settlement: Settlement,
}

/// Follows delegation chains with loop detection.
#[derive(Debug, Clone, Default)]
pub struct DelegationResolver {
    /// Optional cap on hops, tighter than the registry size
    max_hops: Option<usize>,
}

impl DelegationResolver {
    /// Create a resolver bounded by the registry size.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with an additional hop cap.
    pub fn with_max_hops(mut self, hops: usize) -> Self {
        self.max_hops = Some(hops);
        self
    }

    /// Resolve a delegation from `caller` to `target` without mutating.
    ///
    /// # Errors
    /// - `NoVotingRight` if the caller has no weight or already voted
    /// - `SelfDelegation` if `target == caller`
    /// - `DelegationLoop` if the chain revisits any voter (the caller
    ///   included) or runs past the hop bound
    /// - `DelegateHasNoRight` if the chain ends at an identity without weight
    pub fn resolve(
        &self,
        registry: &VoterRegistry,
        caller: Address,
        target: Address,
    ) -> Result<Resolution, BallotError> {
        if !registry.get(&caller).can_vote() {
            return Err(BallotError::NoVotingRight);
        }

        if target == caller {
            return Err(BallotError::SelfDelegation);
        }

        // Every pointer followed leaves a distinct registered voter other
        // than the caller, so an acyclic chain stays under the registry size.
        let bound = match self.max_hops {
            Some(cap) => cap.min(registry.len()),
            None => registry.len(),
        };

        let mut visited = HashSet::new();
        visited.insert(caller);

        let mut current = target;
        let mut hops = 0;
        loop {
            if !visited.insert(current) {
                return Err(BallotError::DelegationLoop);
            }

            match registry.get(&current).delegate {
                Some(next) => {
                    hops += 1;
                    if hops > bound {
                        return Err(BallotError::DelegationLoop);
                    }
                    current = next;
                }
                None => break,
            }
        }

        let terminus = registry.get(&current);
        if terminus.weight == 0 {
            return Err(BallotError::DelegateHasNoRight);
        }

        // A terminus carries a proposal exactly when it voted directly.
        let settlement = match terminus.vote {
            Some(index) => Settlement::SettledImmediately(index),
            None => Settlement::PendingOnVoter(current),
        };

        Ok(Resolution {
            terminus: current,
            hops,
            settlement,
        })
    }

    /// Commit a resolved delegation.
    ///
    /// Marks the caller as voted with the terminus as its delegate and moves
    /// its weight according to the settlement. Must be given a resolution
    /// produced by `resolve` against the same, unchanged state.
    pub fn apply(
        registry: &mut VoterRegistry,
        proposals: &mut ProposalSet,
        caller: Address,
        resolution: &Resolution,
    ) -> Result<(), BallotError> {
        let weight = registry.get(&caller).weight;

        match resolution.settlement {
            Settlement::SettledImmediately(index) => {
                proposals.credit(index, weight)?;
            }
            Settlement::PendingOnVoter(terminus) => {
                let merged = registry
                    .get(&terminus)
                    .weight
                    .checked_add(weight)
                    .ok_or(BallotError::WeightOverflow)?;
                registry.entry_mut(terminus).weight = merged;
            }
        }

        let sender = registry.entry_mut(caller);
        sender.voted = true;
        sender.delegate = Some(resolution.terminus);
        Ok(())
    }

    /// Resolve and commit in one step.
    pub fn delegate(
        &self,
        registry: &mut VoterRegistry,
        proposals: &mut ProposalSet,
        caller: Address,
        target: Address,
    ) -> Result<Resolution, BallotError> {
        let resolution = self.resolve(registry, caller, target)?;
        Self::apply(registry, proposals, caller, &resolution)?;
        Ok(resolution)
    }
}
