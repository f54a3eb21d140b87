use std::collections::HashMap;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use infra::models::{EncounterRow, QuestionRow, VoteRow};
use infra::repos::{
    encounters, encounters::CreateEncounterData, questions, questions::CreateQuestionData,
    questions::QuestionType, votes, votes::VoteKind,
};

/// Filter for the question list operation (parsed by the resolver).
#[derive(Debug, Clone)]
pub struct QuestionFilter {
    pub companies: Vec<String>,
    pub locations: Vec<String>,
    pub roles: Vec<String>,
    pub question_types: Vec<QuestionType>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: DateTime<Utc>,
}

/// A question with everything its shaped record is derived from. Encounters
/// are in creation order, so `encounters[0]` is the canonical one.
#[derive(Debug, Clone)]
pub struct QuestionBundle {
    pub question: QuestionRow,
    pub encounters: Vec<EncounterRow>,
    pub score: i32,
    pub answer_count: i64,
    pub comment_count: i64,
}

/// Parameters for the create operation (parsed by the resolver).
#[derive(Debug, Clone)]
pub struct CreateQuestionParams {
    pub user_id: Uuid,
    pub company: String,
    pub content: String,
    pub location: Option<String>,
    pub question_type: QuestionType,
    pub role: Option<String>,
    pub seen_at: DateTime<Utc>,
}

/// A single encounter passes when every non-empty field filter matches it and
/// its seen_at falls within the date range.
fn encounter_matches(encounter: &EncounterRow, filter: &QuestionFilter) -> bool {
    let company_ok =
        filter.companies.is_empty() || filter.companies.iter().any(|c| *c == encounter.company);

    let location_ok = filter.locations.is_empty()
        || encounter
            .location
            .as_deref()
            .is_some_and(|location| filter.locations.iter().any(|l| l == location));

    let role_ok = filter.roles.is_empty()
        || encounter
            .role
            .as_deref()
            .is_some_and(|role| filter.roles.iter().any(|r| r == role));

    let date_ok = encounter.seen_at <= filter.end_date
        && filter.start_date.is_none_or(|start| encounter.seen_at >= start);

    company_ok && location_ok && role_ok && date_ok
}

/// A question is retained iff at least one of its encounters matches.
fn question_matches(encounters: &[EncounterRow], filter: &QuestionFilter) -> bool {
    encounters.iter().any(|e| encounter_matches(e, filter))
}

/// Reduce a question's votes to a signed score: +1 per upvote, -1 per downvote.
fn vote_score(votes: &[VoteRow]) -> i32 {
    votes
        .iter()
        .map(|v| match v.vote {
            VoteKind::Upvote => 1,
            VoteKind::Downvote => -1,
        })
        .sum()
}

/// List questions matching the filter, newest first, with their encounters,
/// vote score, and answer/comment counts.
///
/// The type restriction happens in the database; the encounter predicate is
/// applied in memory across the batch-loaded encounters.
pub async fn list_questions(
    pool: &sqlx::PgPool,
    filter: &QuestionFilter,
) -> sqlx::Result<Vec<QuestionBundle>> {
    let rows = questions::list_by_types(pool, &filter.question_types).await?;
    let ids: Vec<Uuid> = rows.iter().map(|q| q.id).collect();

    let (all_encounters, all_votes, all_counts) = tokio::try_join!(
        encounters::list_by_questions(pool, &ids),
        votes::list_by_questions(pool, &ids),
        questions::engagement_counts(pool, &ids),
    )?;

    let mut encounters_by_question: HashMap<Uuid, Vec<EncounterRow>> = HashMap::new();
    for encounter in all_encounters {
        encounters_by_question
            .entry(encounter.question_id)
            .or_default()
            .push(encounter);
    }

    let mut votes_by_question: HashMap<Uuid, Vec<VoteRow>> = HashMap::new();
    for vote in all_votes {
        votes_by_question
            .entry(vote.question_id)
            .or_default()
            .push(vote);
    }

    let counts_by_question: HashMap<Uuid, (i64, i64)> = all_counts
        .into_iter()
        .map(|c| (c.question_id, (c.answer_count, c.comment_count)))
        .collect();

    let mut bundles = Vec::new();
    for question in rows {
        let question_encounters = encounters_by_question
            .remove(&question.id)
            .unwrap_or_default();

        if !question_matches(&question_encounters, filter) {
            continue;
        }

        let score = vote_score(
            votes_by_question
                .get(&question.id)
                .map(Vec::as_slice)
                .unwrap_or_default(),
        );
        let (answer_count, comment_count) = counts_by_question
            .get(&question.id)
            .copied()
            .unwrap_or((0, 0));

        bundles.push(QuestionBundle {
            question,
            encounters: question_encounters,
            score,
            answer_count,
            comment_count,
        });
    }

    Ok(bundles)
}

/// Fetch one question with the same derived data as the list operation.
pub async fn get_question(pool: &sqlx::PgPool, id: Uuid) -> sqlx::Result<Option<QuestionBundle>> {
    let Some(question) = questions::get_by_id(pool, id).await? else {
        return Ok(None);
    };

    let ids = [id];
    let (question_encounters, question_votes, counts) = tokio::try_join!(
        encounters::list_by_question(pool, id),
        votes::list_by_questions(pool, &ids),
        questions::engagement_counts(pool, &ids),
    )?;

    let (answer_count, comment_count) = counts
        .first()
        .map(|c| (c.answer_count, c.comment_count))
        .unwrap_or((0, 0));

    Ok(Some(QuestionBundle {
        question,
        score: vote_score(&question_votes),
        encounters: question_encounters,
        answer_count,
        comment_count,
    }))
}

/// Create a question together with its first encounter. Both writes happen in
/// one transaction so a question can never exist without its canonical
/// encounter.
pub async fn create_question(
    pool: &sqlx::PgPool,
    params: CreateQuestionParams,
) -> sqlx::Result<QuestionBundle> {
    let mut tx = pool.begin().await?;

    let question = questions::create(
        &mut *tx,
        CreateQuestionData {
            content: params.content,
            question_type: params.question_type,
            user_id: params.user_id,
        },
    )
    .await?;

    let encounter = encounters::create(
        &mut *tx,
        CreateEncounterData {
            question_id: question.id,
            user_id: Some(params.user_id),
            company: params.company,
            location: params.location,
            role: params.role,
            seen_at: params.seen_at,
        },
    )
    .await?;

    tx.commit().await?;

    Ok(QuestionBundle {
        question,
        encounters: vec![encounter],
        score: 0,
        answer_count: 0,
        comment_count: 0,
    })
}
