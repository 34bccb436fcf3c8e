//! Vote request and response bodies shared by questions and answers.

use aristotle_core::error::CoreError;
use aristotle_core::voting::{VoteDirection, VoteOutcome, VoteTally};
use serde::{Deserialize, Serialize};

/// Body of `POST …/votes`: `{ "direction": "up" | "down" }`.
#[derive(Debug, Deserialize)]
pub struct VoteRequest {
    pub direction: String,
}

/// What the vote did, and the target's counts afterwards.
#[derive(Debug, Serialize)]
pub struct VoteResponse {
    pub outcome: VoteOutcome,
    pub up: i64,
    pub down: i64,
    pub net_score: i64,
}

impl VoteResponse {
    pub fn new(outcome: VoteOutcome, tally: VoteTally) -> Self {
        Self {
            outcome,
            up: tally.up,
            down: tally.down,
            net_score: tally.net_score(),
        }
    }
}

pub(crate) fn parse_direction(input: &VoteRequest) -> Result<VoteDirection, CoreError> {
    VoteDirection::parse(&input.direction)
}
