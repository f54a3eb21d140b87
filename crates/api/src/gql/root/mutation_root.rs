use async_graphql::MergedObject;

use crate::gql::domains::questions::QuestionMutation;
use crate::gql::domains::votes::VoteMutation;

#[derive(MergedObject, Default)]
pub struct MutationRoot(QuestionMutation, VoteMutation);
