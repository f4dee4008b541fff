use thiserror::Error;

/// Errors that can occur in ballot operations.
///
/// Every failing operation leaves the ballot untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BallotError {
    #[error("Only chairperson can give right to vote")]
    Unauthorized,

    #[error("The voter already has voting rights")]
    AlreadyEnfranchised,

    #[error("The voter has already voted")]
    AlreadyVoted,

    #[error("You have no right to vote")]
    NoVotingRight,

    #[error("Invalid proposal index {index} (ballot has {count} proposals)")]
    InvalidProposal { index: usize, count: usize },

    #[error("Self-delegation is disallowed")]
    SelfDelegation,

    #[error("Found loop in delegation")]
    DelegationLoop,

    #[error("Delegate has no right to vote")]
    DelegateHasNoRight,

    #[error("Ballot requires at least one proposal")]
    NoProposals,

    #[error("Vote weight overflow")]
    WeightOverflow,
}

impl BallotError {
    /// Stable machine-readable code for this error.
    pub fn kind(&self) -> &'static str {
        match self {
            BallotError::Unauthorized => "unauthorized",
            BallotError::AlreadyEnfranchised => "already_enfranchised",
            BallotError::AlreadyVoted => "already_voted",
            BallotError::NoVotingRight => "no_voting_right",
            BallotError::InvalidProposal { .. } => "invalid_proposal",
            BallotError::SelfDelegation => "self_delegation",
            BallotError::DelegationLoop => "delegation_loop",
            BallotError::DelegateHasNoRight => "delegate_has_no_right",
            BallotError::NoProposals => "no_proposals",
            BallotError::WeightOverflow => "weight_overflow",
        }
    }
}
