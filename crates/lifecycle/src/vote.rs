//! The vote ledger: one generic routine for question and answer votes.

use aristotle_core::authorization::{authorize, require, Action, Actor, Denial};
use aristotle_core::types::DbId;
use aristotle_core::voting::{decide, VoteDecision, VoteDirection, VoteOutcome};
use aristotle_db::models::vote::{AnswerVotes, QuestionVotes, VoteTarget};
use aristotle_db::repositories::VoteRepo;
use sqlx::PgPool;

use crate::error::{not_found, LifecycleResult};

/// Record a vote by `actor` on the target `target_id`.
///
/// - The target's author voting is ignored without error.
/// - No existing vote: insert. If a concurrent request inserted first, the
///   unique constraint wins and the outcome is `Unchanged`.
/// - Same direction as the existing vote: nothing changes.
/// - Opposite direction: the existing vote is deleted, not flipped.
pub async fn cast_vote<T: VoteTarget>(
    pool: &PgPool,
    actor: Actor,
    target_id: DbId,
    direction: VoteDirection,
) -> LifecycleResult<VoteOutcome> {
    let mut tx = pool.begin().await?;

    let target = VoteRepo::lock_target::<T>(&mut *tx, target_id)
        .await?
        .ok_or_else(|| not_found(T::ENTITY, target_id))?;
    match authorize(&actor, Action::Vote, &target) {
        Ok(()) => {}
        Err(Denial::SelfVote) => {
            tracing::debug!(
                entity = T::ENTITY,
                target_id,
                user_id = actor.user_id,
                "Self-vote ignored"
            );
            return Ok(VoteOutcome::Ignored);
        }
        Err(_) => require(&actor, Action::Vote, &target)?,
    }

    let existing = VoteRepo::find_for_update::<T>(&mut *tx, target_id, actor.user_id).await?;
    let current = existing.as_ref().map(|v| v.direction()).transpose()?;

    let outcome = match decide(current, direction) {
        VoteDecision::Insert(direction) => {
            if VoteRepo::insert::<T>(&mut *tx, target_id, actor.user_id, direction).await? {
                VoteOutcome::Recorded
            } else {
                VoteOutcome::Unchanged
            }
        }
        VoteDecision::Keep => VoteOutcome::Unchanged,
        VoteDecision::Retract => {
            if let Some(vote) = &existing {
                VoteRepo::delete::<T>(&mut *tx, vote.id).await?;
            }
            VoteOutcome::Retracted
        }
    };

    tx.commit().await?;
    tracing::info!(
        entity = T::ENTITY,
        target_id,
        user_id = actor.user_id,
        direction = direction.as_str(),
        ?outcome,
        "Vote processed"
    );
    Ok(outcome)
}

pub async fn vote_question(
    pool: &PgPool,
    actor: Actor,
    question_id: DbId,
    direction: VoteDirection,
) -> LifecycleResult<VoteOutcome> {
    cast_vote::<QuestionVotes>(pool, actor, question_id, direction).await
}

pub async fn vote_answer(
    pool: &PgPool,
    actor: Actor,
    answer_id: DbId,
    direction: VoteDirection,
) -> LifecycleResult<VoteOutcome> {
    cast_vote::<AnswerVotes>(pool, actor, answer_id, direction).await
}
