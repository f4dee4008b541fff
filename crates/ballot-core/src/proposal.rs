//! The fixed proposal set.
//!
//! Proposals are created once with the ballot and only their vote weight
//! ever changes. The index into the set is the proposal's identifier.

use serde::{Deserialize, Serialize};
use crate::error::BallotError;

/// A named proposal and the weight accumulated for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    /// Short name
    pub name: String,
    /// Accumulated vote weight
    pub vote_weight: u64,
}

impl Proposal {
    /// Create a proposal with no votes.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            vote_weight: 0,
        }
    }
}

/// Ordered, non-empty list of proposals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProposalSet {
    proposals: Vec<Proposal>,
}

impl ProposalSet {
    /// Build the set from proposal names, in order.
    ///
    /// # Errors
    /// - `NoProposals` if `names` is empty
    pub fn new<I, S>(names: I) -> Result<Self, BallotError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let proposals: Vec<Proposal> = names.into_iter().map(Proposal::new).collect();
        if proposals.is_empty() {
            return Err(BallotError::NoProposals);
        }
        Ok(Self { proposals })
    }

    /// Number of proposals.
    pub fn len(&self) -> usize {
        self.proposals.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.proposals.is_empty()
    }

    /// Check that `index` addresses a proposal.
    pub fn check_index(&self, index: usize) -> Result<(), BallotError> {
        if index < self.proposals.len() {
            Ok(())
        } else {
            Err(BallotError::InvalidProposal {
                index,
                count: self.proposals.len(),
            })
        }
    }

    /// Get a proposal by index.
    pub fn get(&self, index: usize) -> Result<&Proposal, BallotError> {
        self.check_index(index)?;
        Ok(&self.proposals[index])
    }

    /// Iterate proposals in index order.
    pub fn iter(&self) -> impl Iterator<Item = &Proposal> {
        self.proposals.iter()
    }

    /// Proposal names in index order.
    pub fn names(&self) -> Vec<&str> {
        self.proposals.iter().map(|p| p.name.as_str()).collect()
    }

    /// Add `weight` to the proposal at `index`.
    ///
    /// Nothing changes if the index is invalid or the counter would overflow.
    pub fn credit(&mut self, index: usize, weight: u64) -> Result<u64, BallotError> {
        self.check_index(index)?;
        let proposal = &mut self.proposals[index];
        proposal.vote_weight = proposal
            .vote_weight
            .checked_add(weight)
            .ok_or(BallotError::WeightOverflow)?;
        Ok(proposal.vote_weight)
    }

    /// Sum of weight counted across all proposals.
    pub fn total_weight(&self) -> u64 {
        self.proposals.iter().map(|p| p.vote_weight).sum()
    }

    /// Index of the proposal with the most weight.
    ///
    /// Ties go to the lowest index, so an untouched ballot returns 0.
    pub fn winning_index(&self) -> usize {
        let mut winning = 0;
        let mut winning_weight = 0;
        for (index, proposal) in self.proposals.iter().enumerate() {
            if proposal.vote_weight > winning_weight {
                winning_weight = proposal.vote_weight;
                winning = index;
            }
        }
        winning
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ProposalSet {
        ProposalSet::new(["Support", "Oppose", "Neutral"]).unwrap()
    }

    #[test]
    fn test_proposal_set_creation() {
        let set = sample();
        assert_eq!(set.len(), 3);
        assert_eq!(set.names(), vec!["Support", "Oppose", "Neutral"]);
        assert!(set.iter().all(|p| p.vote_weight == 0));
    }

    #[test]
    fn test_empty_proposal_set_fails() {
        let result = ProposalSet::new(Vec::<String>::new());
        assert_eq!(result, Err(BallotError::NoProposals));
    }

    #[test]
    fn test_get_out_of_range() {
        let set = sample();
        assert_eq!(set.get(1).unwrap().name, "Oppose");
        assert_eq!(
            set.get(3),
            Err(BallotError::InvalidProposal { index: 3, count: 3 })
        );
    }

    #[test]
    fn test_credit() {
        let mut set = sample();
        assert_eq!(set.credit(2, 1).unwrap(), 1);
        assert_eq!(set.credit(2, 3).unwrap(), 4);
        assert_eq!(set.total_weight(), 4);
        assert!(set.credit(5, 1).is_err());
        assert_eq!(set.total_weight(), 4);
    }

    #[test]
    fn test_credit_overflow_leaves_weight() {
        let mut set = sample();
        set.credit(0, u64::MAX).unwrap();
        assert_eq!(set.credit(0, 1), Err(BallotError::WeightOverflow));
        assert_eq!(set.get(0).unwrap().vote_weight, u64::MAX);
    }

    #[test]
    fn test_winning_index_all_zero() {
        assert_eq!(sample().winning_index(), 0);
    }

    #[test]
    fn test_winning_index_tie_goes_to_lowest() {
        let mut set = sample();
        set.credit(1, 2).unwrap();
        set.credit(2, 2).unwrap();
        assert_eq!(set.winning_index(), 1);

        set.credit(2, 1).unwrap();
        assert_eq!(set.winning_index(), 2);
    }
}
