use std::time::Duration;

use async_graphql::{ObjectType, Schema, SubscriptionType};
use axum::{
    Json, Router,
    extract::{Request, State},
    http::{
        Method, StatusCode,
        header::{AUTHORIZATION, CONTENT_TYPE, HeaderValue},
    },
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::auth::Claims;
use crate::error::AppError;
use crate::middleware::jwt::jwt_middleware;
use crate::state::AppState;

/// Build the Axum router with health endpoint and GraphQL.
/// Generic over the schema roots so the roots stay in the gql module.
pub fn build_router<Q, M, S>(state: AppState, schema: Schema<Q, M, S>) -> Router
where
    Q: ObjectType + Send + Sync + 'static,
    M: ObjectType + Send + Sync + 'static,
    S: SubscriptionType + Send + Sync + 'static,
{
    Router::new()
        // Simple liveness check; also proves DB connectivity.
        .route("/health", get(health))
        // GraphQL endpoint with custom handler that includes JWT claims in context
        .route(
            "/graphql",
            post({
                let schema_clone = schema.clone();
                move |state, req| graphql_handler(state, req, schema_clone)
            }),
        )
        // App state (PgPool, auth services)
        .with_state(state.clone())
        // JWT middleware for authentication
        .layer(middleware::from_fn_with_state(state, jwt_middleware))
        // Useful default middlewares
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer({
            let allowed_origins = std::env::var("ALLOWED_ORIGINS")
                .unwrap_or_else(|_| "http://localhost:3000,http://localhost:3001".to_string());

            let origins: Vec<HeaderValue> = allowed_origins
                .split(',')
                .filter_map(|o| o.trim().parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([CONTENT_TYPE, AUTHORIZATION])
                .allow_credentials(true)
        })
}

/// Custom GraphQL handler that extracts JWT claims from request extensions
/// and adds them to the GraphQL context
async fn graphql_handler<Q, M, S>(
    State(state): State<AppState>,
    req: Request,
    schema: Schema<Q, M, S>,
) -> Result<Response, AppError>
where
    Q: ObjectType + Send + Sync + 'static,
    M: ObjectType + Send + Sync + 'static,
    S: SubscriptionType + Send + Sync + 'static,
{
    // Extract claims from request extensions (set by JWT middleware)
    let claims = req.extensions().get::<Claims>().cloned();

    // Extract the GraphQL request from the HTTP request
    let (_parts, body) = req.into_parts();
    let body_bytes = axum::body::to_bytes(body, 2 * 1024 * 1024)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to read request body: {}", e)))?;

    let gql_request: async_graphql::Request = serde_json::from_slice(&body_bytes)
        .map_err(|e| AppError::BadRequest(format!("Invalid GraphQL request: {}", e)))?;

    // Add the AppState and optionally claims to the GraphQL context
    let mut gql_request = gql_request.data(state);
    if let Some(claims) = claims {
        gql_request = gql_request.data(claims);
    }

    // Execute the GraphQL request
    let gql_response = schema.execute(gql_request).await;

    Ok(Json(gql_response).into_response())
}

/// Liveness + quick DB probe.
async fn health(State(state): State<AppState>) -> Result<&'static str, AppError> {
    let _one: i32 = sqlx::query_scalar("SELECT 1").fetch_one(&state.db).await?;
    Ok("ok")
}
