use std::env;

use async_graphql::dataloader::DataLoader;
use async_graphql::{EmptySubscription, Schema};

use super::loaders::UserLoader;
use super::{MutationRoot, QueryRoot};
use crate::state::AppState;

/// Build the GraphQL schema and inject shared state (AppState) into the context.
pub fn build_schema(state: AppState) -> Schema<QueryRoot, MutationRoot, EmptySubscription> {
    let user_loader = DataLoader::new(UserLoader::new(state.db.clone()), tokio::spawn);

    let introspection_enabled = env::var("GQL_INTROSPECTION")
        .map(|v| v == "true")
        .unwrap_or(false);

    let mut builder = Schema::build(QueryRoot::default(), MutationRoot::default(), EmptySubscription)
        .data(state) // AppState is Clone; available in resolvers via ctx.data::<AppState>()
        .data(user_loader)
        .limit_depth(15)
        .limit_complexity(200);

    if !introspection_enabled {
        builder = builder.disable_introspection();
    }

    builder.finish()
}
