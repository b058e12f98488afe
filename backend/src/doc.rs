//! OpenAPI documentation for the ledger API.
//!
//! [`ApiDoc`] collects every handler annotated with `#[utoipa::path]` plus
//! the wire schemas from [`crate::inbound::http::schemas`]. Swagger UI serves
//! it in debug builds and `cargo run --bin openapi-dump` prints it.

use utoipa::OpenApi;

use crate::inbound::http::employees::{CreateEmployeeRequestBody, UpdateEmployeeRequestBody};
use crate::inbound::http::schemas::{
    DetailedReportResponse, DetailedSummaryRowResponse, EmployeeHistoryResponse, EmployeeResponse,
    EmployeeSummaryResponse, EmployeeTotalResponse, ErrorCodeSchema, ErrorSchema, TicketResponse,
    TicketWithEmployeeResponse, TotalTicketsResponse,
};
use crate::inbound::http::tickets::IssueTicketRequestBody;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Ticket ledger API",
        description = "Employee registry, ticket issuance and allowance reports."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::employees::list_employees,
        crate::inbound::http::employees::employee_history,
        crate::inbound::http::employees::create_employee,
        crate::inbound::http::employees::get_employee,
        crate::inbound::http::employees::update_employee,
        crate::inbound::http::tickets::list_tickets,
        crate::inbound::http::tickets::issue_ticket,
        crate::inbound::http::reports::total_report,
        crate::inbound::http::reports::per_employee_report,
        crate::inbound::http::reports::period_report,
        crate::inbound::http::reports::detailed_report,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        CreateEmployeeRequestBody,
        UpdateEmployeeRequestBody,
        IssueTicketRequestBody,
        EmployeeResponse,
        EmployeeHistoryResponse,
        EmployeeSummaryResponse,
        TicketResponse,
        TicketWithEmployeeResponse,
        TotalTicketsResponse,
        EmployeeTotalResponse,
        DetailedSummaryRowResponse,
        DetailedReportResponse,
    )),
    tags(
        (name = "employees", description = "Employee registry"),
        (name = "tickets", description = "Ticket issuance"),
        (name = "reports", description = "Allowance reports"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
