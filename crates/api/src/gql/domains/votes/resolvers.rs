use async_graphql::{Context, ID, Object, Result};
use uuid::Uuid;

use crate::gql::common::helpers::require_user_id;
use crate::gql::error::{GqlError, ResultExt, not_found, unauthorized};
use crate::gql::types::Vote;
use crate::state::AppState;
use infra::repos::{votes, votes::CreateVoteData};

use super::types::{CreateVoteInput, UpdateVoteInput};

#[derive(Default)]
pub struct VoteQuery;

#[Object]
impl VoteQuery {
    /// The caller's vote on a question, if any.
    async fn vote(&self, ctx: &Context<'_>, question_id: ID) -> Result<Option<Vote>> {
        let state = ctx.data::<AppState>()?;
        let user_id = require_user_id(ctx)?;

        let question_id = Uuid::parse_str(question_id.as_str()).gql_err("Invalid question ID")?;

        let row = votes::get_by_question_and_user(&state.db, question_id, user_id)
            .await
            .map_err(GqlError::from)?;

        Ok(row.map(Vote::from))
    }
}

#[derive(Default)]
pub struct VoteMutation;

#[Object]
impl VoteMutation {
    /// Cast a vote on a question. A second vote on the same question is
    /// rejected by the uniqueness constraint in the database.
    async fn create_vote(&self, ctx: &Context<'_>, input: CreateVoteInput) -> Result<Vote> {
        let state = ctx.data::<AppState>()?;
        let user_id = require_user_id(ctx)?;

        let question_id =
            Uuid::parse_str(input.question_id.as_str()).gql_err("Invalid question ID")?;

        let row = votes::create(
            &state.db,
            CreateVoteData {
                question_id,
                user_id,
                vote: input.vote.into(),
            },
        )
        .await
        .map_err(GqlError::from)?;

        Ok(row.into())
    }

    /// Change the direction of an existing vote; owner only.
    async fn update_vote(&self, ctx: &Context<'_>, input: UpdateVoteInput) -> Result<Vote> {
        let state = ctx.data::<AppState>()?;
        let user_id = require_user_id(ctx)?;

        let vote_id = Uuid::parse_str(input.id.as_str()).gql_err("Invalid vote ID")?;

        let existing = votes::get_by_id(&state.db, vote_id)
            .await
            .map_err(GqlError::from)?
            .ok_or_else(|| not_found("Vote"))?;

        if existing.user_id != user_id {
            return Err(unauthorized("You are not allowed to modify this vote"));
        }

        let row = votes::update_kind(&state.db, vote_id, input.vote.into())
            .await
            .map_err(GqlError::from)?
            .ok_or_else(|| not_found("Vote"))?;

        Ok(row.into())
    }

    /// Remove an existing vote; owner only.
    async fn delete_vote(&self, ctx: &Context<'_>, id: ID) -> Result<Vote> {
        let state = ctx.data::<AppState>()?;
        let user_id = require_user_id(ctx)?;

        let vote_id = Uuid::parse_str(id.as_str()).gql_err("Invalid vote ID")?;

        let existing = votes::get_by_id(&state.db, vote_id)
            .await
            .map_err(GqlError::from)?
            .ok_or_else(|| not_found("Vote"))?;

        if existing.user_id != user_id {
            return Err(unauthorized("You are not allowed to delete this vote"));
        }

        let row = votes::delete(&state.db, vote_id)
            .await
            .map_err(GqlError::from)?
            .ok_or_else(|| not_found("Vote"))?;

        Ok(row.into())
    }
}
