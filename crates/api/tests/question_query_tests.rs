mod common;

use api::gql::build_schema;
use async_graphql::Variables;
use chrono::{Duration, Utc};
use common::*;
use serde_json::json;
use uuid::Uuid;

const BROWSE_QUERY: &str = r#"
    query Browse($filter: QuestionFilterInput!) {
        questions(filter: $filter) {
            id
            content
            company
            location
            role
            votes
            userName
            answerCount
            commentCount
        }
    }
"#;

fn returned_ids(data: &serde_json::Value) -> Vec<String> {
    data["questions"]
        .as_array()
        .expect("questions should be a list")
        .iter()
        .map(|q| q["id"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_empty_filter_bounded_by_end_date() {
    let app_state = setup_test_db().await;
    let schema = build_schema(app_state.clone());

    let (user_id, _) = create_test_user(&app_state, "Filter Tester").await;

    let past_question =
        create_test_question(&app_state, Some(user_id), "Reverse a linked list", "technical").await;
    create_test_encounter(
        &app_state,
        past_question,
        Some(user_id),
        "Acme",
        Some("Berlin"),
        Some("Backend"),
        Utc::now() - Duration::days(10),
    )
    .await;

    let future_question =
        create_test_question(&app_state, Some(user_id), "Describe your weaknesses", "behavioral")
            .await;
    create_test_encounter(
        &app_state,
        future_question,
        Some(user_id),
        "Acme",
        None,
        None,
        Utc::now() + Duration::days(10),
    )
    .await;

    let variables = Variables::from_json(json!({
        "filter": { "endDate": Utc::now() }
    }));

    let response = execute_graphql(&schema, BROWSE_QUERY, Some(variables), None).await;
    assert!(
        response.errors.is_empty(),
        "Browse should succeed: {:?}",
        response.errors
    );

    let data = response.data.into_json().unwrap();
    let ids = returned_ids(&data);

    assert!(ids.contains(&past_question.to_string()));
    assert!(
        !ids.contains(&future_question.to_string()),
        "A question only seen after endDate must not be returned"
    );
}

#[tokio::test]
async fn test_any_encounter_can_satisfy_the_filter() {
    let app_state = setup_test_db().await;
    let schema = build_schema(app_state.clone());

    let (user_id, _) = create_test_user(&app_state, "Encounter Tester").await;

    // Unique company names so parallel tests can't interfere
    let company_a = format!("First-{}", Uuid::new_v4());
    let company_b = format!("Second-{}", Uuid::new_v4());

    let question =
        create_test_question(&app_state, Some(user_id), "Design a URL shortener", "system_design")
            .await;
    create_test_encounter(
        &app_state,
        question,
        Some(user_id),
        &company_a,
        None,
        None,
        Utc::now() - Duration::days(30),
    )
    .await;
    create_test_encounter(
        &app_state,
        question,
        Some(user_id),
        &company_b,
        None,
        None,
        Utc::now() - Duration::days(5),
    )
    .await;

    // The match comes from the second encounter, not encounters[0]
    let variables = Variables::from_json(json!({
        "filter": {
            "companies": [company_b.clone()],
            "startDate": Utc::now() - Duration::days(10),
            "endDate": Utc::now(),
        }
    }));
    let response = execute_graphql(&schema, BROWSE_QUERY, Some(variables), None).await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);
    let data = response.data.into_json().unwrap();
    assert!(returned_ids(&data).contains(&question.to_string()));

    // Same company filter, but the date window excludes that sighting
    let variables = Variables::from_json(json!({
        "filter": {
            "companies": [company_b],
            "endDate": Utc::now() - Duration::days(20),
        }
    }));
    let response = execute_graphql(&schema, BROWSE_QUERY, Some(variables), None).await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);
    let data = response.data.into_json().unwrap();
    assert!(
        !returned_ids(&data).contains(&question.to_string()),
        "The matching encounter must itself be inside the date range"
    );
}

#[tokio::test]
async fn test_vote_score_is_upvotes_minus_downvotes() {
    let app_state = setup_test_db().await;
    let schema = build_schema(app_state.clone());

    let (author_id, _) = create_test_user(&app_state, "Score Author").await;
    let question =
        create_test_question(&app_state, Some(author_id), "Explain ownership", "technical").await;
    create_test_encounter(
        &app_state,
        question,
        Some(author_id),
        "Acme",
        None,
        None,
        Utc::now() - Duration::days(1),
    )
    .await;

    for _ in 0..3 {
        let (voter, _) = create_test_user(&app_state, "Upvoter").await;
        create_test_vote(&app_state, question, voter, "upvote").await;
    }
    let (downvoter, _) = create_test_user(&app_state, "Downvoter").await;
    create_test_vote(&app_state, question, downvoter, "downvote").await;

    let query = r#"
        query One($id: ID!) {
            question(id: $id) { id votes }
        }
    "#;
    let variables = Variables::from_json(json!({ "id": question.to_string() }));
    let response = execute_graphql(&schema, query, Some(variables), None).await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);

    let data = response.data.into_json().unwrap();
    assert_eq!(data["question"]["votes"], 2);
}

#[tokio::test]
async fn test_question_by_unknown_id_is_not_found() {
    let app_state = setup_test_db().await;
    let schema = build_schema(app_state.clone());

    let query = r#"
        query One($id: ID!) {
            question(id: $id) { id }
        }
    "#;
    let variables = Variables::from_json(json!({ "id": Uuid::new_v4().to_string() }));
    let response = execute_graphql(&schema, query, Some(variables), None).await;

    assert_eq!(response.errors.len(), 1);
    assert_eq!(response.errors[0].message, "Question not found");
    assert!(
        format!("{:?}", response.errors[0].extensions).contains("NOT_FOUND"),
        "NOT_FOUND code expected in extensions: {:?}",
        response.errors[0].extensions
    );
}

#[tokio::test]
async fn test_shaping_defaults_for_sparse_data() {
    let app_state = setup_test_db().await;
    let schema = build_schema(app_state.clone());

    // No author, and the canonical encounter has no location/role
    let question = create_test_question(&app_state, None, "Orphaned question", "other").await;
    create_test_encounter(
        &app_state,
        question,
        None,
        "Acme",
        None,
        None,
        Utc::now() - Duration::days(2),
    )
    .await;

    let query = r#"
        query One($id: ID!) {
            question(id: $id) { id company location role userName }
        }
    "#;
    let variables = Variables::from_json(json!({ "id": question.to_string() }));
    let response = execute_graphql(&schema, query, Some(variables), None).await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);

    let data = response.data.into_json().unwrap();
    let shaped = &data["question"];
    assert_eq!(shaped["company"], "Acme");
    assert_eq!(shaped["location"], "Unknown location");
    assert_eq!(shaped["role"], "Unknown role");
    assert_eq!(shaped["userName"], "");
}
