use async_graphql::{ID, InputObject};
use chrono::{DateTime, Utc};

use crate::gql::types::QuestionType;

#[derive(InputObject)]
pub struct QuestionFilterInput {
    /// Empty or omitted list means no company filter; same for the other lists.
    pub companies: Option<Vec<String>>,
    pub locations: Option<Vec<String>>,
    pub roles: Option<Vec<String>>,
    pub question_types: Option<Vec<QuestionType>>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: DateTime<Utc>,
}

#[derive(InputObject)]
pub struct CreateQuestionInput {
    pub company: String,
    pub content: String,
    pub location: Option<String>,
    pub question_type: QuestionType,
    pub role: Option<String>,
    pub seen_at: DateTime<Utc>,
}

#[derive(InputObject)]
pub struct UpdateQuestionInput {
    pub id: ID,
    pub content: Option<String>,
    pub question_type: Option<QuestionType>,
}
