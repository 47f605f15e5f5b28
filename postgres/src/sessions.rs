//! Session token lookups.

use crate::{store_error, timed};
use hotel_gate_core::store::{SessionStore, StoreFuture};
use hotel_gate_core::types::UserId;
use sqlx::PgPool;

/// Resolves bearer tokens against the `"Session"` table.
#[derive(Debug, Clone)]
pub struct PostgresSessionStore {
    pool: PgPool,
}

impl PostgresSessionStore {
    /// Create a store over an existing pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl SessionStore for PostgresSessionStore {
    fn find_user_by_token<'a>(&'a self, token: &'a str) -> StoreFuture<'a, Option<UserId>> {
        Box::pin(async move {
            let user_id: Option<(i32,)> = timed(
                "find_session",
                sqlx::query_as(
                    r#"
                    SELECT "userId"
                    FROM "Session"
                    WHERE "token" = $1
                    ORDER BY "id" DESC
                    LIMIT 1
                    "#,
                )
                .bind(token)
                .fetch_optional(&self.pool),
            )
            .await
            .map_err(|e| store_error("find_session", &e))?;

            Ok(user_id.map(|(id,)| UserId::new(id)))
        })
    }
}
