use async_graphql::{ID, InputObject};

use crate::gql::types::VoteKind;

#[derive(InputObject)]
pub struct CreateVoteInput {
    pub question_id: ID,
    pub vote: VoteKind,
}

#[derive(InputObject)]
pub struct UpdateVoteInput {
    pub id: ID,
    pub vote: VoteKind,
}
