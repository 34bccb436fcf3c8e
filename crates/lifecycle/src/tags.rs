//! Applying tag edits to a stored question.

use std::collections::BTreeSet;

use aristotle_core::tags::{parse_tag_list, TagDelta};
use aristotle_core::types::DbId;
use aristotle_db::repositories::TagRepo;
use sqlx::{Postgres, Transaction};

/// Bring a question's tags in line with the free-form `input`.
///
/// Only the difference is written: names no longer listed are deleted, new
/// ones inserted, untouched ones left alone. An empty input removes every
/// tag. Returns the delta that was applied.
pub async fn reconcile_tags(
    tx: &mut Transaction<'_, Postgres>,
    question_id: DbId,
    input: &str,
) -> Result<TagDelta, sqlx::Error> {
    let requested = parse_tag_list(input);
    let stored: BTreeSet<String> = TagRepo::names_for_question(&mut **tx, question_id)
        .await?
        .into_iter()
        .collect();

    let delta = TagDelta::between(&stored, &requested);
    if delta.is_empty() {
        return Ok(delta);
    }

    if !delta.to_remove.is_empty() {
        let names: Vec<String> = delta.to_remove.iter().cloned().collect();
        TagRepo::delete_names(&mut **tx, question_id, &names).await?;
    }
    if !delta.to_add.is_empty() {
        let names: Vec<String> = delta.to_add.iter().cloned().collect();
        TagRepo::insert_names(&mut **tx, question_id, &names).await?;
    }

    tracing::debug!(
        question_id,
        added = delta.to_add.len(),
        removed = delta.to_remove.len(),
        "Tags reconciled"
    );
    Ok(delta)
}
