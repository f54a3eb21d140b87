use chrono::{DateTime, Utc};
use sqlx::{PgExecutor, Result};
use uuid::Uuid;

use crate::models::EncounterRow;

#[derive(Debug, Clone)]
pub struct CreateEncounterData {
    pub question_id: Uuid,
    pub user_id: Option<Uuid>,
    pub company: String,
    pub location: Option<String>,
    pub role: Option<String>,
    pub seen_at: DateTime<Utc>,
}

pub async fn create<'e>(
    executor: impl PgExecutor<'e>,
    data: CreateEncounterData,
) -> Result<EncounterRow> {
    let row = sqlx::query_as::<_, EncounterRow>(
        r#"
        INSERT INTO encounters (question_id, user_id, company, location, role, seen_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, question_id, user_id, company, location, role, seen_at, created_at
        "#,
    )
    .bind(data.question_id)
    .bind(data.user_id)
    .bind(&data.company)
    .bind(&data.location)
    .bind(&data.role)
    .bind(data.seen_at)
    .fetch_one(executor)
    .await?;

    Ok(row)
}

/// Encounters for one question in creation order. The first row is the
/// question's canonical encounter, so the ordering must stay stable.
pub async fn list_by_question<'e>(
    executor: impl PgExecutor<'e>,
    question_id: Uuid,
) -> Result<Vec<EncounterRow>> {
    let rows = sqlx::query_as::<_, EncounterRow>(
        r#"
        SELECT id, question_id, user_id, company, location, role, seen_at, created_at
        FROM encounters
        WHERE question_id = $1
        ORDER BY created_at ASC, id ASC
        "#,
    )
    .bind(question_id)
    .fetch_all(executor)
    .await?;

    Ok(rows)
}

/// Batch variant of [`list_by_question`], same per-question ordering.
pub async fn list_by_questions<'e>(
    executor: impl PgExecutor<'e>,
    question_ids: &[Uuid],
) -> Result<Vec<EncounterRow>> {
    if question_ids.is_empty() {
        return Ok(Vec::new());
    }

    let rows = sqlx::query_as::<_, EncounterRow>(
        r#"
        SELECT id, question_id, user_id, company, location, role, seen_at, created_at
        FROM encounters
        WHERE question_id = ANY($1)
        ORDER BY question_id, created_at ASC, id ASC
        "#,
    )
    .bind(question_ids)
    .fetch_all(executor)
    .await?;

    Ok(rows)
}
