//! Enrollment, ticket, and ticket type lookups.

use crate::rows::{EnrollmentRow, TicketRow, TicketTypeRow};
use crate::{store_error, timed};
use hotel_gate_core::store::{EntitlementStore, StoreFuture};
use hotel_gate_core::types::{
    Enrollment, EnrollmentId, Ticket, TicketType, TicketTypeId, UserId,
};
use sqlx::PgPool;

/// Entitlement lookups backed by `PostgreSQL`.
#[derive(Debug, Clone)]
pub struct PostgresEntitlementStore {
    pool: PgPool,
}

impl PostgresEntitlementStore {
    /// Create a store over an existing pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl EntitlementStore for PostgresEntitlementStore {
    fn find_enrollment_by_user_id(&self, user_id: UserId) -> StoreFuture<'_, Option<Enrollment>> {
        Box::pin(async move {
            let row: Option<EnrollmentRow> = timed(
                "find_enrollment",
                sqlx::query_as(
                    r#"
                    SELECT "id", "userId", "name", "cpf", "birthday", "phone",
                           "createdAt", "updatedAt"
                    FROM "Enrollment"
                    WHERE "userId" = $1
                    "#,
                )
                .bind(user_id.get())
                .fetch_optional(&self.pool),
            )
            .await
            .map_err(|e| store_error("find_enrollment", &e))?;

            tracing::trace!(user_id = %user_id, found = row.is_some(), "Enrollment lookup");
            Ok(row.map(Enrollment::from))
        })
    }

    fn find_ticket_by_enrollment_id(
        &self,
        enrollment_id: EnrollmentId,
    ) -> StoreFuture<'_, Option<Ticket>> {
        Box::pin(async move {
            // One ticket per enrollment is expected; the oldest wins if not.
            let row: Option<TicketRow> = timed(
                "find_ticket",
                sqlx::query_as(
                    r#"
                    SELECT "id", "ticketTypeId", "enrollmentId", "status"::text AS "status",
                           "createdAt", "updatedAt"
                    FROM "Ticket"
                    WHERE "enrollmentId" = $1
                    ORDER BY "id"
                    LIMIT 1
                    "#,
                )
                .bind(enrollment_id.get())
                .fetch_optional(&self.pool),
            )
            .await
            .map_err(|e| store_error("find_ticket", &e))?;

            tracing::trace!(
                enrollment_id = %enrollment_id,
                found = row.is_some(),
                "Ticket lookup"
            );
            row.map(Ticket::try_from).transpose()
        })
    }

    fn find_ticket_type_by_id(&self, id: TicketTypeId) -> StoreFuture<'_, Option<TicketType>> {
        Box::pin(async move {
            let row: Option<TicketTypeRow> = timed(
                "find_ticket_type",
                sqlx::query_as(
                    r#"
                    SELECT "id", "name", "price", "isRemote", "includesHotel",
                           "createdAt", "updatedAt"
                    FROM "TicketType"
                    WHERE "id" = $1
                    "#,
                )
                .bind(id.get())
                .fetch_optional(&self.pool),
            )
            .await
            .map_err(|e| store_error("find_ticket_type", &e))?;

            Ok(row.map(TicketType::from))
        })
    }
}
