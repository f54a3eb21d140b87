use std::collections::HashMap;

use async_graphql::{Context, ID, Object, Result, dataloader::DataLoader};
use uuid::Uuid;

use crate::gql::common::helpers::require_user_id;
use crate::gql::error::{GqlError, ResultExt, not_found, unauthorized};
use crate::gql::loaders::UserLoader;
use crate::gql::types::Question;
use crate::state::AppState;
use infra::repos::{questions, questions::UpdateQuestionData};

use super::service::{self, CreateQuestionParams, QuestionBundle, QuestionFilter};
use super::types::{CreateQuestionInput, QuestionFilterInput, UpdateQuestionInput};

#[derive(Default)]
pub struct QuestionQuery;

#[Object]
impl QuestionQuery {
    /// Browse questions matching the company/location/role/type/date filter,
    /// newest first.
    async fn questions(
        &self,
        ctx: &Context<'_>,
        filter: QuestionFilterInput,
    ) -> Result<Vec<Question>> {
        let state = ctx.data::<AppState>()?;

        let filter = QuestionFilter {
            companies: filter.companies.unwrap_or_default(),
            locations: filter.locations.unwrap_or_default(),
            roles: filter.roles.unwrap_or_default(),
            question_types: filter
                .question_types
                .unwrap_or_default()
                .into_iter()
                .map(Into::into)
                .collect(),
            start_date: filter.start_date,
            end_date: filter.end_date,
        };

        let bundles = service::list_questions(&state.db, &filter)
            .await
            .map_err(GqlError::from)?;

        shape_with_authors(ctx, bundles).await
    }

    /// One question by id, with the same derived fields as the list.
    async fn question(&self, ctx: &Context<'_>, id: ID) -> Result<Question> {
        let state = ctx.data::<AppState>()?;

        let question_id = Uuid::parse_str(id.as_str()).gql_err("Invalid question ID")?;

        let bundle = service::get_question(&state.db, question_id)
            .await
            .map_err(GqlError::from)?
            .ok_or_else(|| not_found("Question"))?;

        shape_one(ctx, bundle).await
    }
}

#[derive(Default)]
pub struct QuestionMutation;

#[Object]
impl QuestionMutation {
    /// Submit a question together with its first encounter.
    async fn create_question(
        &self,
        ctx: &Context<'_>,
        input: CreateQuestionInput,
    ) -> Result<Question> {
        let state = ctx.data::<AppState>()?;
        let user_id = require_user_id(ctx)?;

        let bundle = service::create_question(
            &state.db,
            CreateQuestionParams {
                user_id,
                company: input.company,
                content: input.content,
                location: input.location,
                question_type: input.question_type.into(),
                role: input.role,
                seen_at: input.seen_at,
            },
        )
        .await
        .map_err(GqlError::from)?;

        shape_one(ctx, bundle).await
    }

    /// Partial update of a question's content/type; owner only.
    async fn update_question(
        &self,
        ctx: &Context<'_>,
        input: UpdateQuestionInput,
    ) -> Result<Question> {
        let state = ctx.data::<AppState>()?;
        let user_id = require_user_id(ctx)?;

        let question_id = Uuid::parse_str(input.id.as_str()).gql_err("Invalid question ID")?;

        let existing = questions::get_by_id(&state.db, question_id)
            .await
            .map_err(GqlError::from)?
            .ok_or_else(|| not_found("Question"))?;

        if existing.user_id != Some(user_id) {
            return Err(unauthorized("You are not allowed to modify this question"));
        }

        questions::update(
            &state.db,
            question_id,
            UpdateQuestionData {
                content: input.content,
                question_type: input.question_type.map(Into::into),
            },
        )
        .await
        .map_err(GqlError::from)?
        .ok_or_else(|| not_found("Question"))?;

        let bundle = service::get_question(&state.db, question_id)
            .await
            .map_err(GqlError::from)?
            .ok_or_else(|| not_found("Question"))?;

        shape_one(ctx, bundle).await
    }

    /// Delete a question; owner only. Encounters and votes go with it.
    async fn delete_question(&self, ctx: &Context<'_>, id: ID) -> Result<Question> {
        let state = ctx.data::<AppState>()?;
        let user_id = require_user_id(ctx)?;

        let question_id = Uuid::parse_str(id.as_str()).gql_err("Invalid question ID")?;

        let bundle = service::get_question(&state.db, question_id)
            .await
            .map_err(GqlError::from)?
            .ok_or_else(|| not_found("Question"))?;

        if bundle.question.user_id != Some(user_id) {
            return Err(unauthorized("You are not allowed to delete this question"));
        }

        questions::delete(&state.db, question_id)
            .await
            .map_err(GqlError::from)?
            .ok_or_else(|| not_found("Question"))?;

        shape_one(ctx, bundle).await
    }
}

/// Shape a batch of bundles, resolving author names through the user loader.
async fn shape_with_authors(
    ctx: &Context<'_>,
    bundles: Vec<QuestionBundle>,
) -> Result<Vec<Question>> {
    let author_ids: Vec<Uuid> = bundles
        .iter()
        .filter_map(|b| b.question.user_id)
        .collect();

    let user_loader = ctx.data::<DataLoader<UserLoader>>()?;
    let authors: HashMap<Uuid, infra::models::UserRow> = user_loader
        .load_many(author_ids)
        .await
        .gql_err("Data loading failed")?;

    Ok(bundles
        .into_iter()
        .map(|bundle| {
            let author = bundle.question.user_id.and_then(|id| authors.get(&id));
            Question::shaped(bundle, author)
        })
        .collect())
}

async fn shape_one(ctx: &Context<'_>, bundle: QuestionBundle) -> Result<Question> {
    let user_loader = ctx.data::<DataLoader<UserLoader>>()?;

    let author = match bundle.question.user_id {
        Some(id) => user_loader
            .load_one(id)
            .await
            .gql_err("Data loading failed")?,
        None => None,
    };

    Ok(Question::shaped(bundle, author.as_ref()))
}
