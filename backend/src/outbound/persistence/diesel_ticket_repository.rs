//! PostgreSQL-backed `TicketRepository`.
//!
//! Sums and groups are computed in SQL; only the rows of list queries are
//! materialised.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::dsl;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::query_dsl::methods::FilterDsl;
use diesel::sql_types::{BigInt, Nullable};
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{TicketFilter, TicketGroup, TicketRepository, TicketRepositoryError};
use crate::domain::{
    EmployeeCode, EmployeeId, RecordStatus, Ticket, TicketDraft, TicketId, TicketQuantity,
};

use super::diesel_error_mapping::{
    is_missing_employee, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{NewTicketRow, TicketRow};
use super::pool::{DbPool, PoolError};
use super::schema::tickets;

type StatusIs = dsl::Eq<tickets::status, &'static str>;
type OwnedBy = dsl::Eq<tickets::employee_id, Uuid>;
type DeliveredFrom = dsl::GtEq<tickets::delivered_at, DateTime<Utc>>;
type DeliveredUntil = dsl::LtEq<tickets::delivered_at, DateTime<Utc>>;

type ListQuery = tickets::BoxedQuery<'static, Pg, dsl::AsSelect<TicketRow, Pg>>;
type SumQuery = tickets::BoxedQuery<'static, Pg, Nullable<BigInt>>;
type GroupColumns = (
    tickets::employee_id,
    dsl::sum<tickets::quantity>,
    dsl::max<tickets::delivered_at>,
);
type GroupQuery = dsl::IntoBoxed<
    'static,
    dsl::Select<dsl::GroupBy<tickets::table, tickets::employee_id>, GroupColumns>,
    Pg,
>;

/// Diesel implementation of the ticket storage port.
#[derive(Clone)]
pub struct DieselTicketRepository {
    pool: DbPool,
}

impl DieselTicketRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> TicketRepositoryError {
    map_basic_pool_error(error, TicketRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> TicketRepositoryError {
    map_basic_diesel_error(
        error,
        TicketRepositoryError::query,
        TicketRepositoryError::connection,
    )
}

fn row_to_ticket(row: TicketRow) -> Result<Ticket, TicketRepositoryError> {
    let invalid = |err: &dyn std::fmt::Display| {
        TicketRepositoryError::query(format!("invalid ticket row {}: {err}", row.id))
    };
    let quantity = TicketQuantity::new(i64::from(row.quantity)).map_err(|err| invalid(&err))?;
    let employee_code =
        EmployeeCode::new(i64::from(row.employee_code)).map_err(|err| invalid(&err))?;
    let status = row
        .status
        .parse::<RecordStatus>()
        .map_err(|err| invalid(&err))?;
    Ok(Ticket::new(TicketDraft {
        id: TicketId::from_uuid(row.id),
        quantity,
        employee_id: EmployeeId::from_uuid(row.employee_id),
        employee_code,
        status,
        delivered_at: row.delivered_at,
    }))
}

/// Narrow a boxed ticket query to the rows `filter` accepts.
///
/// Window bounds are inclusive on both ends.
fn apply_filter<Q>(mut query: Q, filter: &TicketFilter) -> Q
where
    Q: FilterDsl<StatusIs, Output = Q>
        + FilterDsl<OwnedBy, Output = Q>
        + FilterDsl<DeliveredFrom, Output = Q>
        + FilterDsl<DeliveredUntil, Output = Q>,
{
    if let Some(status) = filter.status {
        query = <Q as FilterDsl<StatusIs>>::filter(query, tickets::status.eq(status.as_str()));
    }
    if let Some(employee_id) = filter.employee_id {
        query = <Q as FilterDsl<OwnedBy>>::filter(
            query,
            tickets::employee_id.eq(*employee_id.as_uuid()),
        );
    }
    if let Some(start) = filter.window.start() {
        query = <Q as FilterDsl<DeliveredFrom>>::filter(query, tickets::delivered_at.ge(start));
    }
    if let Some(end) = filter.window.end() {
        query = <Q as FilterDsl<DeliveredUntil>>::filter(query, tickets::delivered_at.le(end));
    }
    query
}

fn list_query(filter: &TicketFilter) -> ListQuery {
    let query = tickets::table
        .select(TicketRow::as_select())
        .order((tickets::delivered_at.desc(), tickets::id.desc()))
        .into_boxed();
    apply_filter(query, filter)
}

fn sum_query(filter: &TicketFilter) -> SumQuery {
    let query = tickets::table
        .select(dsl::sum(tickets::quantity))
        .into_boxed();
    apply_filter(query, filter)
}

fn group_query(filter: &TicketFilter) -> GroupQuery {
    let query = tickets::table
        .group_by(tickets::employee_id)
        .select((
            tickets::employee_id,
            dsl::sum(tickets::quantity),
            dsl::max(tickets::delivered_at),
        ))
        .into_boxed();
    apply_filter(query, filter)
}

#[async_trait]
impl TicketRepository for DieselTicketRepository {
    async fn create(&self, ticket: &Ticket) -> Result<(), TicketRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewTicketRow {
            id: *ticket.id().as_uuid(),
            quantity: ticket.quantity().value(),
            employee_id: *ticket.employee_id().as_uuid(),
            employee_code: ticket.employee_code().value(),
            status: ticket.status().as_str(),
            delivered_at: ticket.delivered_at(),
        };

        diesel::insert_into(tickets::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|error| {
                if is_missing_employee(&error) {
                    TicketRepositoryError::missing_employee(ticket.employee_id().to_string())
                } else {
                    map_diesel_error(error)
                }
            })
    }

    async fn list(&self, filter: &TicketFilter) -> Result<Vec<Ticket>, TicketRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<TicketRow> = list_query(filter)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_ticket).collect()
    }

    async fn sum_quantity(&self, filter: &TicketFilter) -> Result<i64, TicketRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let total: Option<i64> = sum_query(filter)
            .first(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(total.unwrap_or(0))
    }

    async fn group_by_employee(
        &self,
        filter: &TicketFilter,
    ) -> Result<Vec<TicketGroup>, TicketRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<(Uuid, Option<i64>, Option<DateTime<Utc>>)> = group_query(filter)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows
            .into_iter()
            .map(|(employee_id, total, last_delivered_at)| TicketGroup {
                employee_id: EmployeeId::from_uuid(employee_id),
                total_quantity: total.unwrap_or(0),
                last_delivered_at,
            })
            .collect())
    }
}
