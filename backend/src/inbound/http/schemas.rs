//! Wire representations for the ledger API.
//!
//! Domain types stay free of serde-for-HTTP and OpenAPI concerns; handlers
//! convert them into the camelCase response bodies defined here. Error
//! payload schemas are registered externally via `#[schema(as = ...)]`.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{
    DetailedReport, DetailedSummaryRow, Employee, EmployeeSummary, EmployeeTotal,
    EmployeeWithTickets, Ticket, TicketWithEmployee,
};

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// A supplied value failed validation.
    #[schema(rename = "invalid_field")]
    InvalidField,
    /// A required value was absent.
    #[schema(rename = "missing_field")]
    MissingField,
    /// The referenced employee does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The cpf or code is already registered.
    #[schema(rename = "conflict")]
    Conflict,
    /// Tickets cannot be issued to inactive employees.
    #[schema(rename = "inactive_employee")]
    InactiveEmployee,
    /// The storage backend failed.
    #[schema(rename = "storage_failure")]
    StorageFailure,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_field")]
    code: ErrorCodeSchema,
    /// Human-readable message.
    #[schema(example = "cpf must contain exactly 11 digits")]
    error: String,
    /// Request field the error refers to.
    #[schema(example = "cpf")]
    field: Option<String>,
    /// Correlation identifier echoed in the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary structured details.
    details: Option<serde_json::Value>,
}

/// A delivered ticket.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TicketResponse {
    #[schema(example = "0b5c1f7e-2c1a-4c2e-9f57-2d8c4f3b9a10")]
    pub id: String,
    #[schema(example = 5)]
    pub quantity: i32,
    pub employee_id: String,
    /// Employee code captured when the ticket was issued.
    #[schema(example = 1000)]
    pub employee_code: i32,
    #[schema(example = "active")]
    pub status: String,
    pub delivered_at: DateTime<Utc>,
}

impl From<&Ticket> for TicketResponse {
    fn from(ticket: &Ticket) -> Self {
        Self {
            id: ticket.id().to_string(),
            quantity: ticket.quantity().value(),
            employee_id: ticket.employee_id().to_string(),
            employee_code: ticket.employee_code().value(),
            status: ticket.status().as_str().to_owned(),
            delivered_at: ticket.delivered_at(),
        }
    }
}

/// Employee display fields embedded in ticket and report rows.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeSummaryResponse {
    pub id: String,
    #[schema(example = "Ana")]
    pub name: String,
    #[schema(example = 1000)]
    pub code: i32,
    #[schema(example = "12345678901")]
    pub cpf: String,
    #[schema(example = "active")]
    pub status: String,
}

impl From<&EmployeeSummary> for EmployeeSummaryResponse {
    fn from(summary: &EmployeeSummary) -> Self {
        Self {
            id: summary.id.to_string(),
            name: summary.name.to_string(),
            code: summary.code.value(),
            cpf: summary.cpf.to_string(),
            status: summary.status.as_str().to_owned(),
        }
    }
}

/// Employee record, with the tickets issued to them on read routes.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeResponse {
    pub id: String,
    #[schema(example = 1000)]
    pub code: i32,
    #[schema(example = "Ana")]
    pub name: String,
    #[schema(example = "12345678901")]
    pub cpf: String,
    #[schema(example = "active")]
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tickets: Option<Vec<TicketResponse>>,
}

impl From<&Employee> for EmployeeResponse {
    fn from(employee: &Employee) -> Self {
        Self {
            id: employee.id().to_string(),
            code: employee.code().value(),
            name: employee.name().to_string(),
            cpf: employee.cpf().to_string(),
            status: employee.status().as_str().to_owned(),
            created_at: employee.created_at(),
            updated_at: employee.updated_at(),
            tickets: None,
        }
    }
}

impl From<&EmployeeWithTickets> for EmployeeResponse {
    fn from(value: &EmployeeWithTickets) -> Self {
        Self {
            tickets: Some(value.tickets.iter().map(TicketResponse::from).collect()),
            ..Self::from(&value.employee)
        }
    }
}

/// Employee history entry: the record, its tickets and their total.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeHistoryResponse {
    #[serde(flatten)]
    pub employee: EmployeeResponse,
    /// Sum of every ticket quantity regardless of ticket status.
    #[schema(example = 12)]
    pub total_tickets: i64,
}

impl From<&EmployeeWithTickets> for EmployeeHistoryResponse {
    fn from(value: &EmployeeWithTickets) -> Self {
        Self {
            employee: EmployeeResponse::from(value),
            total_tickets: value.total_quantity(),
        }
    }
}

/// Ticket joined with its owner's display fields.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TicketWithEmployeeResponse {
    #[serde(flatten)]
    pub ticket: TicketResponse,
    pub employee: EmployeeSummaryResponse,
}

impl From<&TicketWithEmployee> for TicketWithEmployeeResponse {
    fn from(value: &TicketWithEmployee) -> Self {
        Self {
            ticket: TicketResponse::from(&value.ticket),
            employee: EmployeeSummaryResponse::from(&value.employee),
        }
    }
}

/// Sum of all active ticket quantities.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TotalTicketsResponse {
    #[schema(example = 42)]
    pub total_tickets: i64,
}

/// Active ticket total for one active employee.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeTotalResponse {
    pub employee: EmployeeSummaryResponse,
    #[schema(example = 7)]
    pub total_tickets: i64,
}

impl From<&EmployeeTotal> for EmployeeTotalResponse {
    fn from(value: &EmployeeTotal) -> Self {
        Self {
            employee: EmployeeSummaryResponse::from(&value.employee),
            total_tickets: value.total_tickets,
        }
    }
}

/// One grouped row of the all-employees detailed report.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DetailedSummaryRowResponse {
    pub employee: EmployeeSummaryResponse,
    #[schema(example = 7)]
    pub total_tickets: i64,
    /// Most recent delivery among the grouped tickets.
    pub last_delivered_at: Option<DateTime<Utc>>,
}

impl From<&DetailedSummaryRow> for DetailedSummaryRowResponse {
    fn from(row: &DetailedSummaryRow) -> Self {
        Self {
            employee: EmployeeSummaryResponse::from(&row.employee),
            total_tickets: row.total_tickets,
            last_delivered_at: row.last_delivered_at,
        }
    }
}

/// Detailed report body: a grouped summary for every employee, or the
/// ticket list of a single one.
#[derive(Debug, Serialize, ToSchema)]
#[serde(untagged)]
pub enum DetailedReportResponse {
    Summary {
        summary: Vec<DetailedSummaryRowResponse>,
        #[schema(example = 42)]
        total: i64,
    },
    Tickets(Vec<TicketWithEmployeeResponse>),
}

impl From<&DetailedReport> for DetailedReportResponse {
    fn from(report: &DetailedReport) -> Self {
        match report {
            DetailedReport::Summary { summary, total } => Self::Summary {
                summary: summary.iter().map(DetailedSummaryRowResponse::from).collect(),
                total: *total,
            },
            DetailedReport::Tickets(rows) => {
                Self::Tickets(rows.iter().map(TicketWithEmployeeResponse::from).collect())
            }
        }
    }
}
