//! End-to-end ballot scenarios.
//!
//! Two accounts, as in the deployment flow: the chairperson (account 1)
//! and a second participant (account 2).

use ballot_core::{Ballot, BallotError, BallotEvent, Settlement, VoterStatus};
use ballot_types::Address;

const PROPOSALS: [&str; 3] = ["Support", "Oppose", "Neutral"];

fn setup() -> (Ballot, Address, Address) {
    let chair = Address::from_label("account_1");
    let second = Address::from_label("account_2");
    let ballot = Ballot::new(chair, PROPOSALS).unwrap();
    (ballot, chair, second)
}

#[test]
fn test_deployed_with_three_proposals() {
    let (ballot, _, _) = setup();
    assert_eq!(ballot.proposal(0).unwrap().name, "Support");
    assert_eq!(ballot.proposal(1).unwrap().name, "Oppose");
    assert_eq!(ballot.proposal(2).unwrap().name, "Neutral");
    assert!(ballot.proposal(3).is_err());
}

#[test]
fn test_chairperson_is_deployer() {
    let (ballot, chair, _) = setup();
    assert_eq!(ballot.chairperson(), chair);
}

#[test]
fn test_chair_grants_right() {
    let (mut ballot, chair, second) = setup();
    ballot.grant_rights(chair, second).unwrap();
    assert_eq!(ballot.voter(&second).weight, 1);
}

#[test]
fn test_non_chair_grant_reverts() {
    let (mut ballot, chair, second) = setup();
    let err = ballot.grant_rights(second, chair).unwrap_err();
    assert!(err.to_string().contains("Only chairperson can give right to vote"));
}

#[test]
fn test_repeated_grant_reverts() {
    let (mut ballot, chair, second) = setup();
    ballot.grant_rights(chair, second).unwrap();
    let err = ballot.grant_rights(chair, second).unwrap_err();
    assert!(err.to_string().contains("The voter already has voting rights"));
}

#[test]
fn test_grant_to_voted_voter_reverts() {
    let (mut ballot, chair, second) = setup();
    ballot.grant_rights(chair, second).unwrap();
    ballot.vote(second, 0).unwrap();
    let err = ballot.grant_rights(chair, second).unwrap_err();
    assert!(err.to_string().contains("The voter has already voted"));
}

// Scenario A
#[test]
fn test_granted_voter_votes() {
    let (mut ballot, chair, second) = setup();
    ballot.grant_rights(chair, second).unwrap();
    ballot.vote(second, 0).unwrap();
    assert_eq!(ballot.proposal(0).unwrap().vote_weight, 1);
}

#[test]
fn test_repeated_vote_reverts() {
    let (mut ballot, chair, second) = setup();
    ballot.grant_rights(chair, second).unwrap();
    ballot.vote(second, 0).unwrap();

    let err = ballot.vote(second, 1).unwrap_err();
    assert!(err.to_string().contains("You have no right to vote"));
    assert_eq!(ballot.proposal(1).unwrap().vote_weight, 0);
}

// Scenario D
#[test]
fn test_vote_without_right_reverts() {
    let (mut ballot, _, second) = setup();
    assert_eq!(ballot.vote(second, 0), Err(BallotError::NoVotingRight));
    assert_eq!(ballot.proposal(0).unwrap().vote_weight, 0);
}

// Scenario B
#[test]
fn test_delegate_to_chair_then_chair_votes() {
    let (mut ballot, chair, second) = setup();
    ballot.grant_rights(chair, second).unwrap();

    let settlement = ballot.delegate(second, chair).unwrap();
    assert_eq!(settlement, Settlement::PendingOnVoter(chair));

    let voter = ballot.voter(&second);
    assert!(voter.voted);
    assert_eq!(voter.delegate, Some(chair));
    assert_eq!(ballot.status(&second), VoterStatus::Voted);

    ballot.vote(chair, 0).unwrap();
    assert_eq!(ballot.proposal(0).unwrap().vote_weight, 2);
}

// Scenario C
#[test]
fn test_delegation_loop_reverts() {
    let (mut ballot, chair, second) = setup();
    ballot.grant_rights(chair, second).unwrap();
    ballot.delegate(second, chair).unwrap();

    let chair_before = ballot.voter(&chair);
    let second_before = ballot.voter(&second);
    let events_before = ballot.events().len();

    let err = ballot.delegate(chair, second).unwrap_err();
    assert_eq!(err, BallotError::DelegationLoop);
    assert!(err.to_string().contains("loop in delegation"));

    assert_eq!(ballot.voter(&chair), chair_before);
    assert_eq!(ballot.voter(&second), second_before);
    assert_eq!(ballot.events().len(), events_before);
    assert_eq!(ballot.total_votes(), 0);
}

#[test]
fn test_delegate_without_right_reverts() {
    let (mut ballot, chair, second) = setup();
    let err = ballot.delegate(second, chair).unwrap_err();
    assert!(err.to_string().contains("You have no right to vote"));
    assert_eq!(ballot.voter(&chair).weight, 1);
}

#[test]
fn test_delegate_to_identity_without_right_reverts() {
    let (mut ballot, chair, second) = setup();
    let stranger = Address::from_label("account_3");
    ballot.grant_rights(chair, second).unwrap();

    let second_before = ballot.voter(&second);
    let tally_before = ballot.tally();
    let events_before = ballot.events().to_vec();

    let err = ballot.delegate(second, stranger).unwrap_err();
    assert_eq!(err, BallotError::DelegateHasNoRight);
    assert_eq!(err.kind(), "delegate_has_no_right");

    assert_eq!(ballot.voter(&second), second_before);
    assert_eq!(ballot.status(&stranger), VoterStatus::NoRight);
    assert_eq!(ballot.tally(), tally_before);
    assert_eq!(ballot.events(), events_before.as_slice());

    // The stranger cannot vote, and can still be enfranchised normally
    assert_eq!(ballot.vote(stranger, 1), Err(BallotError::NoVotingRight));
    ballot.grant_rights(chair, stranger).unwrap();
    assert_eq!(ballot.voter(&stranger).weight, 1);
}

#[test]
fn test_delegate_to_already_voted_chair() {
    let (mut ballot, chair, second) = setup();
    ballot.vote(chair, 1).unwrap();
    ballot.grant_rights(chair, second).unwrap();

    let settlement = ballot.delegate(second, chair).unwrap();
    assert_eq!(settlement, Settlement::SettledImmediately(1));
    assert_eq!(ballot.proposal(1).unwrap().vote_weight, 2);
}

#[test]
fn test_winning_proposal_index() {
    let (mut ballot, chair, second) = setup();
    ballot.grant_rights(chair, second).unwrap();
    ballot.vote(second, 1).unwrap();
    ballot.vote(chair, 1).unwrap();
    assert_eq!(ballot.winning_proposal(), 1);
}

// Scenario E
#[test]
fn test_winning_proposal_name() {
    let (mut ballot, chair, second) = setup();
    ballot.vote(chair, 2).unwrap();
    ballot.grant_rights(chair, second).unwrap();
    ballot.vote(second, 2).unwrap();
    assert_eq!(ballot.winning_proposal_name(), "Neutral");
}

#[test]
fn test_winner_of_untouched_ballot_is_first() {
    let (ballot, _, _) = setup();
    assert_eq!(ballot.winning_proposal(), 0);
    assert_eq!(ballot.winning_proposal_name(), "Support");
}

#[test]
fn test_deployment_flow() {
    // Grant the second account, both vote for the first proposal.
    let (mut ballot, chair, second) = setup();
    ballot.grant_rights(chair, second).unwrap();
    ballot.vote(chair, 0).unwrap();
    assert_eq!(ballot.proposal(1).unwrap().vote_weight, 0);
    ballot.vote(second, 0).unwrap();

    assert_eq!(ballot.winning_proposal_name(), "Support");
    assert_eq!(ballot.winning_proposal(), 0);
    assert_eq!(ballot.total_votes(), 2);
    assert_eq!(ballot.events().len(), 3);
}

#[test]
fn test_long_chain_counts_every_link_once() {
    let chair = Address::from_label("chair");
    let mut ballot = Ballot::new(chair, PROPOSALS).unwrap();
    let voters: Vec<Address> = (0..6)
        .map(|i| Address::from_label(&format!("voter-{}", i)))
        .collect();
    for v in &voters {
        ballot.grant_rights(chair, *v).unwrap();
    }

    // voter-i delegates to voter-(i+1); voter-5 delegates to chair
    for i in 0..voters.len() {
        let target = voters.get(i + 1).copied().unwrap_or(chair);
        ballot.delegate(voters[i], target).unwrap();
    }
    assert_eq!(ballot.voter(&chair).weight, 7);

    ballot.vote(chair, 2).unwrap();
    assert_eq!(ballot.proposal(2).unwrap().vote_weight, 7);
    assert_eq!(ballot.total_votes(), ballot.granted_weight());
    assert_eq!(ballot.unsettled_weight(), 0);
}

#[test]
fn test_delegation_through_chain_to_voted_terminus() {
    let chair = Address::from_label("chair");
    let mut ballot = Ballot::new(chair, PROPOSALS).unwrap();
    let voters: Vec<Address> = (0..4)
        .map(|i| Address::from_label(&format!("voter-{}", i)))
        .collect();
    for v in &voters {
        ballot.grant_rights(chair, *v).unwrap();
    }

    // voter-1 -> voter-2 -> chair, and chair votes
    ballot.delegate(voters[2], chair).unwrap();
    ballot.delegate(voters[1], voters[2]).unwrap();
    ballot.vote(chair, 1).unwrap();
    assert_eq!(ballot.proposal(1).unwrap().vote_weight, 3);

    // voter-0 -> voter-1 follows two pointers to the chair's vote
    let settlement = ballot.delegate(voters[0], voters[1]).unwrap();
    assert_eq!(settlement, Settlement::SettledImmediately(1));
    assert_eq!(ballot.proposal(1).unwrap().vote_weight, 4);
    assert_eq!(ballot.voter(&voters[0]).delegate, Some(chair));
    // Weight is not merged into a terminus that already voted
    assert_eq!(ballot.voter(&chair).weight, 3);

    match ballot.events().last() {
        Some(BallotEvent::Delegated { requested, terminus, weight, .. }) => {
            assert_eq!(*requested, voters[1]);
            assert_eq!(*terminus, chair);
            assert_eq!(*weight, 1);
        }
        other => panic!("unexpected event {:?}", other),
    }

    // voter-3 is still pending and accounts for the rest
    assert_eq!(ballot.unsettled_weight(), 1);
    assert_eq!(ballot.total_votes() + ballot.unsettled_weight(), ballot.granted_weight());
}
