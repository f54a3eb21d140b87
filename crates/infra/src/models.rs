use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::repos::questions::QuestionType;
use crate::repos::votes::VoteKind;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct QuestionRow {
    pub id: Uuid,
    pub content: String,
    pub question_type: QuestionType,
    pub user_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One reported sighting of a question at a company/role/location/time.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct EncounterRow {
    pub id: Uuid,
    pub question_id: Uuid,
    pub user_id: Option<Uuid>,
    pub company: String,
    pub location: Option<String>,
    pub role: Option<String>,
    pub seen_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct VoteRow {
    pub id: Uuid,
    pub question_id: Uuid,
    pub user_id: Uuid,
    pub vote: VoteKind,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Derived answer/comment counts for a question.
#[derive(Debug, Clone, FromRow)]
pub struct EngagementCountsRow {
    pub question_id: Uuid,
    pub answer_count: i64,
    pub comment_count: i64,
}
