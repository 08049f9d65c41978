use serenity::model::id::UserId;
use std::collections::HashSet;
use std::fmt;

use super::error::{VoiceError, VoiceResult};

/// Number of distinct voters needed to skip an entry they did not request.
pub const SKIP_THRESHOLD: usize = 3;

/// What happened when someone voted to skip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteOutcome {
    /// The requester of the current entry asked to skip it.
    RequesterSkipped,
    /// The vote reached the threshold.
    Passed { votes: usize },
    /// The vote was counted but the threshold is not reached yet.
    Recorded { votes: usize, needed: usize },
}

impl VoteOutcome {
    pub fn skips(&self) -> bool {
        !matches!(self, Self::Recorded { .. })
    }
}

impl fmt::Display for VoteOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RequesterSkipped => write!(f, "Requester requested skipping song..."),
            Self::Passed { .. } => write!(f, "Skip vote passed, skipping song..."),
            Self::Recorded { votes, needed } => {
                write!(f, "Skip vote added, currently at [{}/{}]", votes, needed)
            }
        }
    }
}

/// Skip votes cast against the current entry
#[derive(Debug, Clone)]
pub struct SkipVotes {
    voters: HashSet<UserId>,
    threshold: usize,
}

impl Default for SkipVotes {
    fn default() -> Self {
        Self::new(SKIP_THRESHOLD)
    }
}

impl SkipVotes {
    pub fn new(threshold: usize) -> Self {
        Self {
            voters: HashSet::new(),
            threshold,
        }
    }

    /// Register a vote from `voter` against an entry requested by `requester`.
    pub fn cast(&mut self, voter: UserId, requester: UserId) -> VoiceResult<VoteOutcome> {
        if voter == requester {
            return Ok(VoteOutcome::RequesterSkipped);
        }

        if !self.voters.insert(voter) {
            return Err(VoiceError::AlreadyVoted);
        }

        let votes = self.voters.len();
        if votes >= self.threshold {
            Ok(VoteOutcome::Passed { votes })
        } else {
            Ok(VoteOutcome::Recorded {
                votes,
                needed: self.threshold,
            })
        }
    }

    pub fn count(&self) -> usize {
        self.voters.len()
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    pub fn clear(&mut self) {
        self.voters.clear();
    }
}
