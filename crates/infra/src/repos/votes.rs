use std::str::FromStr;

use sqlx::{PgExecutor, Result};
use uuid::Uuid;

use crate::models::VoteRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, serde::Serialize, serde::Deserialize)]
#[sqlx(type_name = "vote_kind", rename_all = "snake_case")]
pub enum VoteKind {
    Upvote,
    Downvote,
}

impl VoteKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            VoteKind::Upvote => "upvote",
            VoteKind::Downvote => "downvote",
        }
    }
}

impl FromStr for VoteKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "upvote" => Ok(VoteKind::Upvote),
            "downvote" => Ok(VoteKind::Downvote),
            _ => Err(format!("Unknown vote kind: {}", s)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateVoteData {
    pub question_id: Uuid,
    pub user_id: Uuid,
    pub vote: VoteKind,
}

/// Insert a vote. Duplicate (question, user) pairs are rejected by the
/// votes_question_user_unique constraint, not checked here.
pub async fn create<'e>(executor: impl PgExecutor<'e>, data: CreateVoteData) -> Result<VoteRow> {
    let row = sqlx::query_as::<_, VoteRow>(
        r#"
        INSERT INTO votes (question_id, user_id, vote)
        VALUES ($1, $2, $3)
        RETURNING id, question_id, user_id, vote, created_at, updated_at
        "#,
    )
    .bind(data.question_id)
    .bind(data.user_id)
    .bind(data.vote)
    .fetch_one(executor)
    .await?;

    Ok(row)
}

pub async fn get_by_id<'e>(executor: impl PgExecutor<'e>, id: Uuid) -> Result<Option<VoteRow>> {
    let row = sqlx::query_as::<_, VoteRow>(
        r#"
        SELECT id, question_id, user_id, vote, created_at, updated_at
        FROM votes
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await?;

    Ok(row)
}

pub async fn get_by_question_and_user<'e>(
    executor: impl PgExecutor<'e>,
    question_id: Uuid,
    user_id: Uuid,
) -> Result<Option<VoteRow>> {
    let row = sqlx::query_as::<_, VoteRow>(
        r#"
        SELECT id, question_id, user_id, vote, created_at, updated_at
        FROM votes
        WHERE question_id = $1 AND user_id = $2
        "#,
    )
    .bind(question_id)
    .bind(user_id)
    .fetch_optional(executor)
    .await?;

    Ok(row)
}

pub async fn list_by_questions<'e>(
    executor: impl PgExecutor<'e>,
    question_ids: &[Uuid],
) -> Result<Vec<VoteRow>> {
    if question_ids.is_empty() {
        return Ok(Vec::new());
    }

    let rows = sqlx::query_as::<_, VoteRow>(
        r#"
        SELECT id, question_id, user_id, vote, created_at, updated_at
        FROM votes
        WHERE question_id = ANY($1)
        "#,
    )
    .bind(question_ids)
    .fetch_all(executor)
    .await?;

    Ok(rows)
}

pub async fn update_kind<'e>(
    executor: impl PgExecutor<'e>,
    id: Uuid,
    vote: VoteKind,
) -> Result<Option<VoteRow>> {
    let row = sqlx::query_as::<_, VoteRow>(
        r#"
        UPDATE votes
        SET vote = $2, updated_at = NOW()
        WHERE id = $1
        RETURNING id, question_id, user_id, vote, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(vote)
    .fetch_optional(executor)
    .await?;

    Ok(row)
}

pub async fn delete<'e>(executor: impl PgExecutor<'e>, id: Uuid) -> Result<Option<VoteRow>> {
    let row = sqlx::query_as::<_, VoteRow>(
        r#"
        DELETE FROM votes
        WHERE id = $1
        RETURNING id, question_id, user_id, vote, created_at, updated_at
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await?;

    Ok(row)
}
