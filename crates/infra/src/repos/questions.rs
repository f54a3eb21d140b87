use std::str::FromStr;

use sqlx::{PgExecutor, Result};
use uuid::Uuid;

use crate::models::{EngagementCountsRow, QuestionRow};

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, serde::Serialize, serde::Deserialize)]
#[sqlx(type_name = "question_type", rename_all = "snake_case")]
pub enum QuestionType {
    Technical,
    Behavioral,
    SystemDesign,
    Coding,
    Other,
}

impl QuestionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::Technical => "technical",
            QuestionType::Behavioral => "behavioral",
            QuestionType::SystemDesign => "system_design",
            QuestionType::Coding => "coding",
            QuestionType::Other => "other",
        }
    }
}

impl FromStr for QuestionType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "technical" => Ok(QuestionType::Technical),
            "behavioral" => Ok(QuestionType::Behavioral),
            "system_design" => Ok(QuestionType::SystemDesign),
            "coding" => Ok(QuestionType::Coding),
            "other" => Ok(QuestionType::Other),
            _ => Err(format!("Unknown question type: {}", s)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateQuestionData {
    pub content: String,
    pub question_type: QuestionType,
    pub user_id: Uuid,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateQuestionData {
    pub content: Option<String>,
    pub question_type: Option<QuestionType>,
}

pub async fn create<'e>(
    executor: impl PgExecutor<'e>,
    data: CreateQuestionData,
) -> Result<QuestionRow> {
    let row = sqlx::query_as::<_, QuestionRow>(
        r#"
        INSERT INTO questions (content, question_type, user_id)
        VALUES ($1, $2, $3)
        RETURNING id, content, question_type, user_id, created_at, updated_at
        "#,
    )
    .bind(&data.content)
    .bind(data.question_type)
    .bind(data.user_id)
    .fetch_one(executor)
    .await?;

    Ok(row)
}

pub async fn get_by_id<'e>(executor: impl PgExecutor<'e>, id: Uuid) -> Result<Option<QuestionRow>> {
    let row = sqlx::query_as::<_, QuestionRow>(
        r#"
        SELECT id, content, question_type, user_id, created_at, updated_at
        FROM questions
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await?;

    Ok(row)
}

/// List questions, optionally restricted to a set of types, newest first.
/// An empty type list means no type filter.
pub async fn list_by_types<'e>(
    executor: impl PgExecutor<'e>,
    types: &[QuestionType],
) -> Result<Vec<QuestionRow>> {
    let rows = if types.is_empty() {
        sqlx::query_as::<_, QuestionRow>(
            r#"
            SELECT id, content, question_type, user_id, created_at, updated_at
            FROM questions
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(executor)
        .await?
    } else {
        sqlx::query_as::<_, QuestionRow>(
            r#"
            SELECT id, content, question_type, user_id, created_at, updated_at
            FROM questions
            WHERE question_type = ANY($1)
            ORDER BY created_at DESC
            "#,
        )
        .bind(types)
        .fetch_all(executor)
        .await?
    };

    Ok(rows)
}

/// Partial update of content/question_type.
pub async fn update<'e>(
    executor: impl PgExecutor<'e>,
    id: Uuid,
    data: UpdateQuestionData,
) -> Result<Option<QuestionRow>> {
    let row = sqlx::query_as::<_, QuestionRow>(
        r#"
        UPDATE questions
        SET content = COALESCE($2, content),
            question_type = COALESCE($3, question_type),
            updated_at = NOW()
        WHERE id = $1
        RETURNING id, content, question_type, user_id, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(&data.content)
    .bind(data.question_type)
    .fetch_optional(executor)
    .await?;

    Ok(row)
}

pub async fn delete<'e>(executor: impl PgExecutor<'e>, id: Uuid) -> Result<Option<QuestionRow>> {
    let row = sqlx::query_as::<_, QuestionRow>(
        r#"
        DELETE FROM questions
        WHERE id = $1
        RETURNING id, content, question_type, user_id, created_at, updated_at
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await?;

    Ok(row)
}

/// Answer/comment counts for a batch of questions.
pub async fn engagement_counts<'e>(
    executor: impl PgExecutor<'e>,
    question_ids: &[Uuid],
) -> Result<Vec<EngagementCountsRow>> {
    if question_ids.is_empty() {
        return Ok(Vec::new());
    }

    let rows = sqlx::query_as::<_, EngagementCountsRow>(
        r#"
        SELECT q.id AS question_id,
               (SELECT COUNT(*) FROM answers a WHERE a.question_id = q.id) AS answer_count,
               (SELECT COUNT(*) FROM comments c WHERE c.question_id = q.id) AS comment_count
        FROM questions q
        WHERE q.id = ANY($1)
        "#,
    )
    .bind(question_ids)
    .fetch_all(executor)
    .await?;

    Ok(rows)
}
