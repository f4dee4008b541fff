//! Session driver.
//!
//! Builds a ballot from a session file and replays its calls in order,
//! one at a time, the way the execution environment would deliver them.

use ballot_core::{Ballot, BallotError, BallotEvent, DelegationResolver, Settlement};
use ballot_types::Address;
use serde::Serialize;
use tracing::{info, warn};

use crate::config::{parse_identity, Action, CallConfig, SessionConfig};

/// Result of one replayed call.
#[derive(Debug, Clone, Serialize)]
pub struct CallOutcome {
    /// 1-based position in the session
    pub index: usize,
    pub caller: Address,
    pub action: Action,
    pub ok: bool,
    /// Human-readable effect or error message
    pub detail: String,
    /// Error code when the call failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<&'static str>,
}

/// Final state of a replayed session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionReport {
    pub name: String,
    pub chairperson: Address,
    pub outcomes: Vec<CallOutcome>,
    pub tally: Vec<(String, u64)>,
    pub winning_proposal: usize,
    pub winning_proposal_name: String,
    pub total_votes: u64,
    pub unsettled_weight: u64,
    pub events: Vec<BallotEvent>,
}

impl SessionReport {
    /// Number of calls that failed.
    pub fn failures(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.ok).count()
    }
}

/// Replay a session.
///
/// Failing calls are recorded and skipped, unless `strict` is set, in which
/// case the first failure aborts the session.
pub fn run_session(config: &SessionConfig, strict: bool) -> anyhow::Result<SessionReport> {
    config.validate()?;

    let chairperson = parse_identity(&config.chairperson)?;
    let mut ballot = Ballot::new(chairperson, config.proposals.iter().cloned())?;
    if let Some(hops) = config.max_delegation_hops {
        ballot = ballot.with_resolver(DelegationResolver::new().with_max_hops(hops));
    }

    info!(
        name = %config.name,
        %chairperson,
        proposals = config.proposals.len(),
        calls = config.calls.len(),
        "Ballot deployed"
    );

    let mut outcomes = Vec::with_capacity(config.calls.len());
    for (i, call) in config.calls.iter().enumerate() {
        let caller = parse_identity(&call.caller)?;
        let request = Request::from_call(call)?;
        let outcome = match execute_call(&mut ballot, caller, request) {
            Ok(detail) => {
                info!(call = i + 1, %caller, action = %call.action, "{}", detail);
                CallOutcome {
                    index: i + 1,
                    caller,
                    action: call.action,
                    ok: true,
                    detail,
                    error_kind: None,
                }
            }
            Err(e) => {
                warn!(call = i + 1, %caller, action = %call.action, "Call failed: {}", e);
                if strict || config.strict {
                    anyhow::bail!("Call #{} ({} by {}) failed: {}", i + 1, call.action, caller, e);
                }
                CallOutcome {
                    index: i + 1,
                    caller,
                    action: call.action,
                    ok: false,
                    detail: e.to_string(),
                    error_kind: Some(e.kind()),
                }
            }
        };
        outcomes.push(outcome);
    }

    Ok(SessionReport {
        name: config.name.clone(),
        chairperson,
        outcomes,
        tally: ballot.tally(),
        winning_proposal: ballot.winning_proposal(),
        winning_proposal_name: ballot.winning_proposal_name().to_string(),
        total_votes: ballot.total_votes(),
        unsettled_weight: ballot.unsettled_weight(),
        events: ballot.events().to_vec(),
    })
}

/// A call with its identities parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Request {
    Grant(Address),
    Vote(usize),
    Delegate(Address),
}

impl Request {
    fn from_call(call: &CallConfig) -> anyhow::Result<Self> {
        let target = || -> anyhow::Result<Address> {
            let target = call
                .target
                .as_deref()
                .ok_or_else(|| anyhow::anyhow!("'{}' requires a target", call.action))?;
            parse_identity(target)
        };

        Ok(match call.action {
            Action::Grant => Request::Grant(target()?),
            Action::Delegate => Request::Delegate(target()?),
            Action::Vote => Request::Vote(
                call.proposal
                    .ok_or_else(|| anyhow::anyhow!("'vote' requires a proposal index"))?,
            ),
        })
    }
}

fn execute_call(
    ballot: &mut Ballot,
    caller: Address,
    request: Request,
) -> Result<String, BallotError> {
    match request {
        Request::Grant(target) => {
            ballot.grant_rights(caller, target)?;
            Ok(format!("granted voting right to {}", target))
        }
        Request::Vote(index) => {
            let weight = ballot.vote(caller, index)?;
            let name = &ballot.proposal(index)?.name;
            Ok(format!("voted for #{} {} with weight {}", index, name, weight))
        }
        Request::Delegate(target) => match ballot.delegate(caller, target)? {
            Settlement::SettledImmediately(index) => {
                Ok(format!("delegated to {}, counted for proposal #{}", target, index))
            }
            Settlement::PendingOnVoter(terminus) => {
                Ok(format!("delegated to {}, weight pending on {}", target, terminus))
            }
        },
    }
}
