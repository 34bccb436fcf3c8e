//! Vote Ledger rules shared by question votes and answer votes.
//!
//! A voter holds at most one vote per target. Clicking the same direction
//! again changes nothing; clicking the opposite direction retracts the
//! existing vote instead of flipping it. A third click then records the new
//! direction:
//!
//! ```text
//! none --up--> up --up--> up
//!              up --down--> none --down--> down
//! ```

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const DIRECTION_UP: &str = "up";
pub const DIRECTION_DOWN: &str = "down";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteDirection {
    Up,
    Down,
}

impl VoteDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            VoteDirection::Up => DIRECTION_UP,
            VoteDirection::Down => DIRECTION_DOWN,
        }
    }

    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            DIRECTION_UP => Ok(VoteDirection::Up),
            DIRECTION_DOWN => Ok(VoteDirection::Down),
            other => Err(CoreError::Validation(format!(
                "Invalid vote direction '{other}'. Must be one of: {DIRECTION_UP}, {DIRECTION_DOWN}"
            ))),
        }
    }
}

/// What the ledger must write for a vote request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteDecision {
    Insert(VoteDirection),
    Keep,
    Retract,
}

/// Result reported back to the caller of a vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VoteOutcome {
    /// A new vote row was written.
    Recorded,
    /// Nothing changed (same direction again, or a concurrent duplicate).
    Unchanged,
    /// The existing opposite vote was deleted.
    Retracted,
    /// The voter is the target's author; silently ignored.
    Ignored,
}

/// Decide the write for `requested` given the voter's `existing` vote.
pub fn decide(existing: Option<VoteDirection>, requested: VoteDirection) -> VoteDecision {
    match existing {
        None => VoteDecision::Insert(requested),
        Some(current) if current == requested => VoteDecision::Keep,
        Some(_) => VoteDecision::Retract,
    }
}

/// Up/down counts for one target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct VoteTally {
    pub up: i64,
    pub down: i64,
}

impl VoteTally {
    pub fn votes_count(&self) -> i64 {
        self.up + self.down
    }

    pub fn net_score(&self) -> i64 {
        self.up - self.down
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use VoteDirection::{Down, Up};

    /// Replay a click sequence through the decision table.
    fn replay(clicks: &[VoteDirection]) -> Option<VoteDirection> {
        clicks.iter().fold(None, |state, &click| match decide(state, click) {
            VoteDecision::Insert(d) => Some(d),
            VoteDecision::Keep => state,
            VoteDecision::Retract => None,
        })
    }

    #[test]
    fn test_first_vote_is_inserted() {
        assert_eq!(decide(None, Up), VoteDecision::Insert(Up));
        assert_eq!(decide(None, Down), VoteDecision::Insert(Down));
    }

    #[test]
    fn test_same_direction_is_kept() {
        assert_eq!(decide(Some(Up), Up), VoteDecision::Keep);
        assert_eq!(decide(Some(Down), Down), VoteDecision::Keep);
    }

    #[test]
    fn test_opposite_direction_retracts() {
        assert_eq!(decide(Some(Up), Down), VoteDecision::Retract);
        assert_eq!(decide(Some(Down), Up), VoteDecision::Retract);
    }

    #[test]
    fn test_toggle_sequences() {
        assert_eq!(replay(&[Up, Up]), Some(Up));
        assert_eq!(replay(&[Up, Down]), None);
        assert_eq!(replay(&[Up, Down, Down]), Some(Down));
        assert_eq!(replay(&[Down, Up, Up, Up]), Some(Up));
    }

    #[test]
    fn test_direction_round_trips_through_text() {
        assert_eq!(VoteDirection::parse("up").unwrap(), Up);
        assert_eq!(Down.as_str(), "down");
        assert!(VoteDirection::parse("sideways").is_err());
    }

    #[test]
    fn test_tally_scores() {
        let tally = VoteTally { up: 5, down: 2 };
        assert_eq!(tally.votes_count(), 7);
        assert_eq!(tally.net_score(), 3);
        assert_eq!(VoteTally::default().net_score(), 0);
    }
}
