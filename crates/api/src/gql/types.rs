use async_graphql::{Enum, ID, SimpleObject};
use chrono::{DateTime, Utc};

use infra::models::{EncounterRow, UserRow, VoteRow};

use crate::gql::domains::questions::service::QuestionBundle;

// Shaping defaults for a question whose canonical encounter is incomplete
pub const UNKNOWN_LOCATION: &str = "Unknown location";
pub const UNKNOWN_ROLE: &str = "Unknown role";

#[derive(Enum, Copy, Clone, Eq, PartialEq, Debug, serde::Serialize, serde::Deserialize)]
pub enum QuestionType {
    #[graphql(name = "TECHNICAL")]
    Technical,
    #[graphql(name = "BEHAVIORAL")]
    Behavioral,
    #[graphql(name = "SYSTEM_DESIGN")]
    SystemDesign,
    #[graphql(name = "CODING")]
    Coding,
    #[graphql(name = "OTHER")]
    Other,
}

impl From<infra::repos::questions::QuestionType> for QuestionType {
    fn from(question_type: infra::repos::questions::QuestionType) -> Self {
        match question_type {
            infra::repos::questions::QuestionType::Technical => QuestionType::Technical,
            infra::repos::questions::QuestionType::Behavioral => QuestionType::Behavioral,
            infra::repos::questions::QuestionType::SystemDesign => QuestionType::SystemDesign,
            infra::repos::questions::QuestionType::Coding => QuestionType::Coding,
            infra::repos::questions::QuestionType::Other => QuestionType::Other,
        }
    }
}

impl From<QuestionType> for infra::repos::questions::QuestionType {
    fn from(question_type: QuestionType) -> Self {
        match question_type {
            QuestionType::Technical => infra::repos::questions::QuestionType::Technical,
            QuestionType::Behavioral => infra::repos::questions::QuestionType::Behavioral,
            QuestionType::SystemDesign => infra::repos::questions::QuestionType::SystemDesign,
            QuestionType::Coding => infra::repos::questions::QuestionType::Coding,
            QuestionType::Other => infra::repos::questions::QuestionType::Other,
        }
    }
}

#[derive(Enum, Copy, Clone, Eq, PartialEq, Debug, serde::Serialize, serde::Deserialize)]
pub enum VoteKind {
    #[graphql(name = "UPVOTE")]
    Upvote,
    #[graphql(name = "DOWNVOTE")]
    Downvote,
}

impl From<infra::repos::votes::VoteKind> for VoteKind {
    fn from(kind: infra::repos::votes::VoteKind) -> Self {
        match kind {
            infra::repos::votes::VoteKind::Upvote => VoteKind::Upvote,
            infra::repos::votes::VoteKind::Downvote => VoteKind::Downvote,
        }
    }
}

impl From<VoteKind> for infra::repos::votes::VoteKind {
    fn from(kind: VoteKind) -> Self {
        match kind {
            VoteKind::Upvote => infra::repos::votes::VoteKind::Upvote,
            VoteKind::Downvote => infra::repos::votes::VoteKind::Downvote,
        }
    }
}

/// Display-ready projection of a question: its own fields plus the vote
/// score, answer/comment counts, and its canonical (first) encounter.
#[derive(SimpleObject, Clone)]
pub struct Question {
    pub id: ID,
    pub content: String,
    pub question_type: QuestionType,
    pub company: Option<String>,
    pub location: String,
    pub role: String,
    pub seen_at: Option<DateTime<Utc>>,
    pub votes: i32,
    pub answer_count: i32,
    pub comment_count: i32,
    pub user_id: Option<ID>,
    pub user_name: String,
    pub encounters: Vec<Encounter>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Question {
    /// Shape a bundle into the display record. Company/location/role/seen_at
    /// come from the first encounter in creation order.
    pub fn shaped(bundle: QuestionBundle, author: Option<&UserRow>) -> Self {
        let first = bundle.encounters.first();
        let company = first.map(|e| e.company.clone());
        let location = first
            .and_then(|e| e.location.clone())
            .unwrap_or_else(|| UNKNOWN_LOCATION.to_string());
        let role = first
            .and_then(|e| e.role.clone())
            .unwrap_or_else(|| UNKNOWN_ROLE.to_string());
        let seen_at = first.map(|e| e.seen_at);

        Self {
            id: bundle.question.id.into(),
            content: bundle.question.content,
            question_type: bundle.question.question_type.into(),
            company,
            location,
            role,
            seen_at,
            votes: bundle.score,
            answer_count: bundle.answer_count as i32,
            comment_count: bundle.comment_count as i32,
            user_id: bundle.question.user_id.map(|id| id.into()),
            user_name: author.map(|u| u.name.clone()).unwrap_or_default(),
            encounters: bundle.encounters.into_iter().map(Encounter::from).collect(),
            created_at: bundle.question.created_at,
            updated_at: bundle.question.updated_at,
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct Encounter {
    pub id: ID,
    pub question_id: ID,
    pub user_id: Option<ID>,
    pub company: String,
    pub location: Option<String>,
    pub role: Option<String>,
    pub seen_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl From<EncounterRow> for Encounter {
    fn from(row: EncounterRow) -> Self {
        Self {
            id: row.id.into(),
            question_id: row.question_id.into(),
            user_id: row.user_id.map(|id| id.into()),
            company: row.company,
            location: row.location,
            role: row.role,
            seen_at: row.seen_at,
            created_at: row.created_at,
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct Vote {
    pub id: ID,
    pub question_id: ID,
    pub user_id: ID,
    pub vote: VoteKind,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<VoteRow> for Vote {
    fn from(row: VoteRow) -> Self {
        Self {
            id: row.id.into(),
            question_id: row.question_id.into(),
            user_id: row.user_id.into(),
            vote: row.vote.into(),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
