use async_graphql::{Context, Error, Result};
use uuid::Uuid;

use crate::auth::Claims;
use crate::gql::error::ResultExt;

/// The authenticated caller's user id; errors when the request carries no
/// valid session.
pub fn require_user_id(ctx: &Context<'_>) -> Result<Uuid> {
    let claims = ctx
        .data::<Claims>()
        .map_err(|_| Error::new("You must be logged in to perform this action"))?;

    Uuid::parse_str(&claims.sub).gql_err("Invalid user ID")
}
