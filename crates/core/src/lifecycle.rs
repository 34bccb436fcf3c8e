//! Question/answer state guards and answer ranking.
//!
//! A question is either open or solved. It becomes solved when its author
//! accepts an answer and returns to open only if that accepted answer is
//! deleted. Acceptance is one-shot: there is no un-accept and no re-accept.

use std::cmp::Ordering;

use serde::Serialize;

use crate::error::CoreError;
use crate::types::Timestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionState {
    Open,
    Solved,
}

impl QuestionState {
    pub fn from_solved(solved: bool) -> Self {
        if solved {
            QuestionState::Solved
        } else {
            QuestionState::Open
        }
    }
}

/// Check that an answer may be accepted.
///
/// Fails without any side effect when the question is already solved or the
/// answer was accepted before.
pub fn ensure_acceptable(question_solved: bool, answer_accepted: bool) -> Result<(), CoreError> {
    if answer_accepted {
        return Err(CoreError::UnsupportedTransition(
            "Answer is already accepted".to_string(),
        ));
    }
    if question_solved {
        return Err(CoreError::UnsupportedTransition(
            "Question already has an accepted answer".to_string(),
        ));
    }
    Ok(())
}

/// The question's `solved` flag after one of its answers is deleted.
pub fn solved_after_answer_deleted(question_solved: bool, deleted_was_accepted: bool) -> bool {
    question_solved && !deleted_was_accepted
}

/// Sort keys of an answer for display.
pub trait RankedAnswer {
    fn is_accepted(&self) -> bool;
    fn net_score(&self) -> i64;
    fn created_at(&self) -> Timestamp;
}

/// Display order: accepted first, then highest net score, then newest.
pub fn compare_answers<A: RankedAnswer>(a: &A, b: &A) -> Ordering {
    b.is_accepted()
        .cmp(&a.is_accepted())
        .then_with(|| b.net_score().cmp(&a.net_score()))
        .then_with(|| b.created_at().cmp(&a.created_at()))
}

pub fn rank_answers<A: RankedAnswer>(answers: &mut [A]) {
    answers.sort_by(compare_answers);
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::{Duration, TimeZone, Utc};

    #[derive(Debug)]
    struct Row {
        id: i64,
        accepted: bool,
        score: i64,
        created_at: Timestamp,
    }

    impl RankedAnswer for Row {
        fn is_accepted(&self) -> bool {
            self.accepted
        }
        fn net_score(&self) -> i64 {
            self.score
        }
        fn created_at(&self) -> Timestamp {
            self.created_at
        }
    }

    fn row(id: i64, accepted: bool, score: i64, minutes: i64) -> Row {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        Row {
            id,
            accepted,
            score,
            created_at: base + Duration::minutes(minutes),
        }
    }

    #[test]
    fn test_open_question_accepts() {
        assert!(ensure_acceptable(false, false).is_ok());
    }

    #[test]
    fn test_solved_question_rejects_second_accept() {
        assert_matches!(
            ensure_acceptable(true, false),
            Err(CoreError::UnsupportedTransition(_))
        );
    }

    #[test]
    fn test_accepted_answer_rejects_reaccept() {
        assert_matches!(
            ensure_acceptable(true, true),
            Err(CoreError::UnsupportedTransition(msg)) if msg.contains("already accepted")
        );
    }

    #[test]
    fn test_solved_reverts_only_when_accepted_answer_deleted() {
        assert!(!solved_after_answer_deleted(true, true));
        assert!(solved_after_answer_deleted(true, false));
        assert!(!solved_after_answer_deleted(false, false));
    }

    #[test]
    fn test_state_from_flag() {
        assert_eq!(QuestionState::from_solved(true), QuestionState::Solved);
        assert_eq!(QuestionState::from_solved(false), QuestionState::Open);
    }

    #[test]
    fn test_rank_accepted_first_then_score_then_newest() {
        let mut answers = vec![
            row(1, false, 10, 0),
            row(2, true, -3, 0),
            row(3, false, 10, 5),
            row(4, false, 2, 9),
        ];
        rank_answers(&mut answers);
        let order: Vec<i64> = answers.iter().map(|a| a.id).collect();
        assert_eq!(order, vec![2, 3, 1, 4]);
    }
}
