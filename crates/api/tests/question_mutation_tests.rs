mod common;

use api::gql::build_schema;
use async_graphql::Variables;
use chrono::Utc;
use common::*;
use serde_json::json;
use uuid::Uuid;

const CREATE_MUTATION: &str = r#"
    mutation Create($input: CreateQuestionInput!) {
        createQuestion(input: $input) {
            id
            content
            company
            location
            role
            userName
            votes
        }
    }
"#;

#[tokio::test]
async fn test_create_question_writes_question_and_encounter() {
    let app_state = setup_test_db().await;
    let schema = build_schema(app_state.clone());

    let (_, claims) = create_test_user(&app_state, "Submitter").await;

    let variables = Variables::from_json(json!({
        "input": {
            "company": "Acme",
            "content": "Implement an LRU cache",
            "location": "Berlin",
            "questionType": "CODING",
            "role": "Backend",
            "seenAt": Utc::now(),
        }
    }));

    let response = execute_graphql(&schema, CREATE_MUTATION, Some(variables), Some(claims)).await;
    assert!(
        response.errors.is_empty(),
        "Create should succeed: {:?}",
        response.errors
    );

    let data = response.data.into_json().unwrap();
    let created = &data["createQuestion"];
    assert_eq!(created["content"], "Implement an LRU cache");
    assert_eq!(created["company"], "Acme");
    assert_eq!(created["location"], "Berlin");
    assert_eq!(created["role"], "Backend");
    assert_eq!(created["userName"], "Submitter");
    assert_eq!(created["votes"], 0);

    // The first encounter must exist alongside the question
    let question_id = Uuid::parse_str(created["id"].as_str().unwrap()).unwrap();
    let encounter_count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM encounters WHERE question_id = $1")
            .bind(question_id)
            .fetch_one(&app_state.db)
            .await
            .unwrap();
    assert_eq!(encounter_count, 1);
}

#[tokio::test]
async fn test_create_question_requires_authentication() {
    let app_state = setup_test_db().await;
    let schema = build_schema(app_state.clone());

    let variables = Variables::from_json(json!({
        "input": {
            "company": "Acme",
            "content": "Anonymous question",
            "questionType": "OTHER",
            "seenAt": Utc::now(),
        }
    }));

    let response = execute_graphql(&schema, CREATE_MUTATION, Some(variables), None).await;
    assert_eq!(response.errors.len(), 1);
    assert!(
        response.errors[0].message.contains("logged in"),
        "unexpected error: {}",
        response.errors[0].message
    );
}

#[tokio::test]
async fn test_update_question_owner_only() {
    let app_state = setup_test_db().await;
    let schema = build_schema(app_state.clone());

    let (owner_id, owner_claims) = create_test_user(&app_state, "Owner").await;
    let (_, intruder_claims) = create_test_user(&app_state, "Intruder").await;

    let question =
        create_test_question(&app_state, Some(owner_id), "Original content", "technical").await;
    create_test_encounter(&app_state, question, Some(owner_id), "Acme", None, None, Utc::now())
        .await;

    let mutation = r#"
        mutation Update($input: UpdateQuestionInput!) {
            updateQuestion(input: $input) { id content questionType }
        }
    "#;

    // Non-owner is rejected and nothing changes
    let variables = Variables::from_json(json!({
        "input": { "id": question.to_string(), "content": "Hijacked" }
    }));
    let response = execute_graphql(&schema, mutation, Some(variables), Some(intruder_claims)).await;
    assert_eq!(response.errors.len(), 1);
    assert!(
        format!("{:?}", response.errors[0].extensions).contains("UNAUTHORIZED"),
        "UNAUTHORIZED code expected: {:?}",
        response.errors[0].extensions
    );

    let content: String = sqlx::query_scalar("SELECT content FROM questions WHERE id = $1")
        .bind(question)
        .fetch_one(&app_state.db)
        .await
        .unwrap();
    assert_eq!(content, "Original content");

    // Owner succeeds with a partial update
    let variables = Variables::from_json(json!({
        "input": { "id": question.to_string(), "content": "Revised content" }
    }));
    let response = execute_graphql(&schema, mutation, Some(variables), Some(owner_claims)).await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);

    let data = response.data.into_json().unwrap();
    assert_eq!(data["updateQuestion"]["content"], "Revised content");
    assert_eq!(data["updateQuestion"]["questionType"], "TECHNICAL");
}

#[tokio::test]
async fn test_delete_question_owner_only() {
    let app_state = setup_test_db().await;
    let schema = build_schema(app_state.clone());

    let (owner_id, owner_claims) = create_test_user(&app_state, "Owner").await;
    let (_, intruder_claims) = create_test_user(&app_state, "Intruder").await;

    let question =
        create_test_question(&app_state, Some(owner_id), "To be deleted", "behavioral").await;
    create_test_encounter(&app_state, question, Some(owner_id), "Acme", None, None, Utc::now())
        .await;

    let mutation = r#"
        mutation Delete($id: ID!) {
            deleteQuestion(id: $id) { id content }
        }
    "#;

    let variables = Variables::from_json(json!({ "id": question.to_string() }));
    let response =
        execute_graphql(&schema, mutation, Some(variables), Some(intruder_claims)).await;
    assert_eq!(response.errors.len(), 1);
    assert!(format!("{:?}", response.errors[0].extensions).contains("UNAUTHORIZED"));

    let variables = Variables::from_json(json!({ "id": question.to_string() }));
    let response = execute_graphql(&schema, mutation, Some(variables), Some(owner_claims)).await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);

    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM questions WHERE id = $1")
        .bind(question)
        .fetch_one(&app_state.db)
        .await
        .unwrap();
    assert_eq!(remaining, 0);

    // Encounters are gone with the question
    let encounters: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM encounters WHERE question_id = $1")
        .bind(question)
        .fetch_one(&app_state.db)
        .await
        .unwrap();
    assert_eq!(encounters, 0);
}
