//! Session configuration.
//!
//! A session file names the chairperson, the proposals, and the ordered
//! list of calls to replay against a fresh ballot.

use ballot_types::Address;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Ballot session configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Session name (display only)
    #[serde(default = "default_name")]
    pub name: String,
    /// Chairperson identity (address or label)
    pub chairperson: String,
    /// Proposal names, in index order
    pub proposals: Vec<String>,
    /// Abort on the first failing call
    #[serde(default)]
    pub strict: bool,
    /// Optional cap on delegation chain length
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_delegation_hops: Option<usize>,
    /// Calls to replay, in order
    #[serde(default)]
    pub calls: Vec<CallConfig>,
}

fn default_name() -> String {
    "ballot".to_string()
}

/// One caller-attributed call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallConfig {
    /// Calling identity (address or label)
    pub caller: String,
    /// Operation
    pub action: Action,
    /// Grant/delegate target (address or label)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    /// Proposal index for votes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proposal: Option<usize>,
}

/// Ballot operation named in a session file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Grant,
    Vote,
    Delegate,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::Grant => "grant",
            Action::Vote => "vote",
            Action::Delegate => "delegate",
        };
        f.pad(name)
    }
}

impl Default for SessionConfig {
    /// Two accounts: the chairperson grants the second account a right,
    /// then both vote for the first proposal.
    fn default() -> Self {
        Self {
            name: default_name(),
            chairperson: "account_1".to_string(),
            proposals: vec![
                "Support".to_string(),
                "Oppose".to_string(),
                "Neutral".to_string(),
            ],
            strict: false,
            max_delegation_hops: None,
            calls: vec![
                CallConfig {
                    caller: "account_1".to_string(),
                    action: Action::Grant,
                    target: Some("account_2".to_string()),
                    proposal: None,
                },
                CallConfig {
                    caller: "account_1".to_string(),
                    action: Action::Vote,
                    target: None,
                    proposal: Some(0),
                },
                CallConfig {
                    caller: "account_2".to_string(),
                    action: Action::Vote,
                    target: None,
                    proposal: Some(0),
                },
            ],
        }
    }
}

impl SessionConfig {
    /// Load configuration from file.
    /// Path is validated to prevent directory traversal attacks.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let path_str = path.to_string_lossy();
        if path_str.contains("..") {
            anyhow::bail!("Invalid path: directory traversal detected");
        }

        let contents = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read session file '{}': {}", path.display(), e))?;
        let config: SessionConfig = toml::from_str(&contents)
            .map_err(|e| anyhow::anyhow!("Failed to parse session file '{}': {}", path.display(), e))?;
        Ok(config)
    }

    /// Save configuration to file.
    /// Path is validated to prevent directory traversal attacks.
    pub fn to_file(&self, path: &Path) -> anyhow::Result<()> {
        let path_str = path.to_string_lossy();
        if path_str.contains("..") {
            anyhow::bail!("Invalid path: directory traversal detected");
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)
            .map_err(|e| anyhow::anyhow!("Failed to write session file '{}': {}", path.display(), e))?;
        Ok(())
    }

    /// Validate configuration.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.proposals.is_empty() {
            anyhow::bail!("Session must list at least one proposal");
        }

        if let Some(name) = self.proposals.iter().find(|p| p.trim().is_empty()) {
            anyhow::bail!("Proposal names cannot be blank: {:?}", name);
        }

        parse_identity(&self.chairperson)?;

        for (i, call) in self.calls.iter().enumerate() {
            parse_identity(&call.caller)
                .map_err(|e| anyhow::anyhow!("Call #{}: invalid caller: {}", i + 1, e))?;

            match call.action {
                Action::Grant | Action::Delegate => {
                    let target = call.target.as_deref().ok_or_else(|| {
                        anyhow::anyhow!("Call #{}: '{}' requires a target", i + 1, call.action)
                    })?;
                    parse_identity(target)
                        .map_err(|e| anyhow::anyhow!("Call #{}: invalid target: {}", i + 1, e))?;
                }
                Action::Vote => {
                    if call.proposal.is_none() {
                        anyhow::bail!("Call #{}: 'vote' requires a proposal index", i + 1);
                    }
                }
            }
        }

        Ok(())
    }
}

/// Parse an identity written as an address or a plain label.
///
/// Text that looks like an address (`0x…`, `vote1…`) must parse as one;
/// anything else is treated as a label and hashed.
pub fn parse_identity(s: &str) -> anyhow::Result<Address> {
    let s = s.trim();
    if s.is_empty() {
        anyhow::bail!("Identity cannot be empty");
    }

    if s.starts_with("0x") || s.starts_with("0X") || s.starts_with("vote1") {
        return Address::from_str(s).map_err(|e| anyhow::anyhow!("{}: {}", s, e));
    }

    Ok(Address::from_label(s))
}
