use async_graphql::MergedObject;

use crate::gql::domains::questions::QuestionQuery;
use crate::gql::domains::votes::VoteQuery;

#[derive(MergedObject, Default)]
pub struct QueryRoot(QuestionQuery, VoteQuery);
