//! Internal Diesel row structs.
//!
//! Rows are converted to domain types at the repository boundary and never
//! leave the persistence module.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{employees, tickets};

/// Row struct for reading from the employees table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = employees)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct EmployeeRow {
    pub id: Uuid,
    pub code: i32,
    pub name: String,
    pub cpf: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for registering employees.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = employees)]
pub(crate) struct NewEmployeeRow<'a> {
    pub id: Uuid,
    pub code: i32,
    pub name: &'a str,
    pub cpf: &'a str,
    pub status: &'a str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Changeset for the mutable employee columns. `code` is immutable and
/// absent.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = employees)]
pub(crate) struct EmployeeUpdate<'a> {
    pub name: &'a str,
    pub cpf: &'a str,
    pub status: &'a str,
    pub updated_at: DateTime<Utc>,
}

/// Row struct for reading from the tickets table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tickets)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TicketRow {
    pub id: Uuid,
    pub quantity: i32,
    pub employee_id: Uuid,
    pub employee_code: i32,
    pub status: String,
    pub delivered_at: DateTime<Utc>,
}

/// Insertable struct for appending tickets.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tickets)]
pub(crate) struct NewTicketRow<'a> {
    pub id: Uuid,
    pub quantity: i32,
    pub employee_id: Uuid,
    pub employee_code: i32,
    pub status: &'a str,
    pub delivered_at: DateTime<Utc>,
}
