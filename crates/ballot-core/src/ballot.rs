//! Ballot controller.
//!
//! Single entry point for every ballot operation. The chairperson is fixed
//! at construction and is the only identity allowed to grant rights. Every
//! mutating call either commits completely or returns an error and leaves
//! the ballot untouched.

use ballot_types::Address;
use tracing::{debug, warn};
use crate::delegation::{DelegationResolver, Settlement};
use crate::error::BallotError;
use crate::event::BallotEvent;
use crate::proposal::{Proposal, ProposalSet};
use crate::registry::{Voter, VoterRegistry, VoterStatus};

/// Weight given by a single voting right.
pub const RIGHT_WEIGHT: u64 = 1;

/// A ballot over a fixed set of proposals.
#[derive(Debug, Clone)]
pub struct Ballot {
    /// Identity allowed to grant rights
    chairperson: Address,
    /// Proposals and their tallies
    proposals: ProposalSet,
    /// Voting-rights state
    voters: VoterRegistry,
    /// Delegation chain walker
    resolver: DelegationResolver,
    /// Total weight ever granted
    granted_weight: u64,
    /// Committed operations, in order
    events: Vec<BallotEvent>,
}

impl Ballot {
    /// Create a ballot. The chairperson receives a voting right.
    ///
    /// # Errors
    /// - `NoProposals` if `names` is empty
    pub fn new<I, S>(chairperson: Address, names: I) -> Result<Self, BallotError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let proposals = ProposalSet::new(names)?;
        let mut voters = VoterRegistry::new();
        voters.grant(chairperson, RIGHT_WEIGHT)?;

        debug!(%chairperson, proposals = proposals.len(), "ballot created");

        Ok(Self {
            chairperson,
            proposals,
            voters,
            resolver: DelegationResolver::new(),
            granted_weight: RIGHT_WEIGHT,
            events: Vec::new(),
        })
    }

    /// Replace the delegation resolver (e.g. to cap chain length).
    pub fn with_resolver(mut self, resolver: DelegationResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// The chairperson identity.
    pub fn chairperson(&self) -> Address {
        self.chairperson
    }

    /// Give `target` the right to vote. Chairperson only.
    ///
    /// # Errors
    /// - `Unauthorized` if `caller` is not the chairperson
    /// - `AlreadyVoted` if the target already voted
    /// - `AlreadyEnfranchised` if the target already has weight
    pub fn grant_rights(&mut self, caller: Address, target: Address) -> Result<(), BallotError> {
        let result = self.try_grant_rights(caller, target);
        if let Err(ref e) = result {
            warn!(%caller, %target, kind = e.kind(), "grant rejected");
        }
        result
    }

    fn try_grant_rights(&mut self, caller: Address, target: Address) -> Result<(), BallotError> {
        if caller != self.chairperson {
            return Err(BallotError::Unauthorized);
        }

        let granted_weight = self
            .granted_weight
            .checked_add(RIGHT_WEIGHT)
            .ok_or(BallotError::WeightOverflow)?;
        self.voters.grant(target, RIGHT_WEIGHT)?;
        self.granted_weight = granted_weight;

        debug!(%target, "voting right granted");
        self.events.push(BallotEvent::RightGranted {
            voter: target,
            weight: RIGHT_WEIGHT,
        });
        Ok(())
    }

    /// Cast `caller`'s weight for proposal `index`.
    ///
    /// Returns the weight added to the proposal.
    ///
    /// # Errors
    /// - `NoVotingRight` if the caller has no weight or already voted
    /// - `InvalidProposal` if `index` is out of range
    pub fn vote(&mut self, caller: Address, index: usize) -> Result<u64, BallotError> {
        match self.voters.record_direct_vote(caller, &mut self.proposals, index) {
            Ok(weight) => {
                debug!(%caller, proposal = index, weight, "vote recorded");
                self.events.push(BallotEvent::Voted {
                    voter: caller,
                    proposal: index,
                    weight,
                });
                Ok(weight)
            }
            Err(e) => {
                warn!(%caller, proposal = index, kind = e.kind(), "vote rejected");
                Err(e)
            }
        }
    }

    /// Delegate `caller`'s weight to `target`, following the target's own
    /// delegation to its end.
    ///
    /// # Errors
    /// - `NoVotingRight` if the caller has no weight or already voted
    /// - `SelfDelegation` if `target == caller`
    /// - `DelegationLoop` if the chain leads back to a visited voter
    /// - `DelegateHasNoRight` if the chain ends at an identity without rights
    pub fn delegate(&mut self, caller: Address, target: Address) -> Result<Settlement, BallotError> {
        let weight = self.voters.get(&caller).weight;
        match self
            .resolver
            .delegate(&mut self.voters, &mut self.proposals, caller, target)
        {
            Ok(resolution) => {
                debug!(
                    %caller,
                    %target,
                    terminus = %resolution.terminus,
                    hops = resolution.hops,
                    "delegation committed"
                );
                self.events.push(BallotEvent::Delegated {
                    voter: caller,
                    requested: target,
                    terminus: resolution.terminus,
                    weight,
                    settlement: resolution.settlement,
                });
                Ok(resolution.settlement)
            }
            Err(e) => {
                warn!(%caller, %target, kind = e.kind(), "delegation rejected");
                Err(e)
            }
        }
    }

    /// Index of the proposal with the most weight; ties go to the lowest index.
    pub fn winning_proposal(&self) -> usize {
        self.proposals.winning_index()
    }

    /// Name of the winning proposal.
    pub fn winning_proposal_name(&self) -> &str {
        self.proposals
            .get(self.proposals.winning_index())
            .map(|p| p.name.as_str())
            .unwrap_or_default()
    }

    /// Look up a proposal by index.
    pub fn proposal(&self, index: usize) -> Result<&Proposal, BallotError> {
        self.proposals.get(index)
    }

    /// All proposals.
    pub fn proposals(&self) -> &ProposalSet {
        &self.proposals
    }

    /// Number of proposals.
    pub fn proposal_count(&self) -> usize {
        self.proposals.len()
    }

    /// Look up a voter. Unknown identities have no rights.
    pub fn voter(&self, address: &Address) -> Voter {
        self.voters.get(address)
    }

    /// Lifecycle position of a voter.
    pub fn status(&self, address: &Address) -> VoterStatus {
        self.voters.get(address).status()
    }

    /// Read access to the registry.
    pub fn voters(&self) -> &VoterRegistry {
        &self.voters
    }

    /// `(name, weight)` per proposal, in index order.
    pub fn tally(&self) -> Vec<(String, u64)> {
        self.proposals
            .iter()
            .map(|p| (p.name.clone(), p.vote_weight))
            .collect()
    }

    /// Weight counted on proposals so far.
    pub fn total_votes(&self) -> u64 {
        self.proposals.total_weight()
    }

    /// Weight held by voters that have not voted yet.
    pub fn unsettled_weight(&self) -> u64 {
        self.voters.unsettled_weight()
    }

    /// Total weight ever granted, the chairperson's included.
    pub fn granted_weight(&self) -> u64 {
        self.granted_weight
    }

    /// Committed operations, oldest first.
    pub fn events(&self) -> &[BallotEvent] {
        &self.events
    }
}
