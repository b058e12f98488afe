//! Reporting handlers.
//!
//! ```text
//! GET /api/reports/total
//! GET /api/reports/by-employee
//! GET /api/reports/period?start=2024-05-01&end=2024-05-31
//! GET /api/reports/detailed?employee=todos&start=2024-05-01
//! ```

use actix_web::{get, web};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::{DeliveryWindow, DetailedReportQuery, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{
    DetailedReportResponse, EmployeeTotalResponse, ErrorSchema, TicketWithEmployeeResponse,
    TotalTicketsResponse,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::non_blank;

/// Bounds of the period report; both are required.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PeriodParams {
    /// RFC 3339 timestamp or `YYYY-MM-DD` (start of day, UTC).
    pub start: Option<String>,
    /// RFC 3339 timestamp or `YYYY-MM-DD` (end of day, UTC).
    pub end: Option<String>,
}

/// Filters of the detailed report; all optional.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DetailedParams {
    /// Employee id, or `todos`/`all`/absent for every employee.
    pub employee: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    /// Ticket status to report on; defaults to `active`.
    pub status: Option<String>,
}

fn required<'a>(value: Option<&'a str>, field: &str) -> Result<&'a str, Error> {
    non_blank(value)
        .ok_or_else(|| Error::missing_field(format!("{field} is required")).with_field(field))
}

/// Sum of all active ticket quantities.
#[utoipa::path(
    get,
    path = "/api/reports/total",
    responses(
        (status = 200, description = "Active ticket total", body = TotalTicketsResponse),
        (status = 500, description = "Storage failure", body = ErrorSchema)
    ),
    tags = ["reports"],
    operation_id = "totalActiveTickets"
)]
#[get("/reports/total")]
pub async fn total_report(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<TotalTicketsResponse>> {
    let total_tickets = state.reports.total_active().await?;
    Ok(web::Json(TotalTicketsResponse { total_tickets }))
}

/// Active ticket totals for every active employee, including zeros.
#[utoipa::path(
    get,
    path = "/api/reports/by-employee",
    responses(
        (status = 200, description = "Per-employee totals", body = [EmployeeTotalResponse]),
        (status = 500, description = "Storage failure", body = ErrorSchema)
    ),
    tags = ["reports"],
    operation_id = "perEmployeeReport"
)]
#[get("/reports/by-employee")]
pub async fn per_employee_report(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<EmployeeTotalResponse>>> {
    let rows = state.reports.per_employee().await?;
    Ok(web::Json(rows.iter().map(EmployeeTotalResponse::from).collect()))
}

/// Active tickets delivered within an inclusive window.
#[utoipa::path(
    get,
    path = "/api/reports/period",
    params(PeriodParams),
    responses(
        (status = 200, description = "Tickets in the window", body = [TicketWithEmployeeResponse]),
        (status = 400, description = "Missing or invalid bound", body = ErrorSchema),
        (status = 500, description = "Storage failure", body = ErrorSchema)
    ),
    tags = ["reports"],
    operation_id = "periodReport"
)]
#[get("/reports/period")]
pub async fn period_report(
    state: web::Data<HttpState>,
    params: web::Query<PeriodParams>,
) -> ApiResult<web::Json<Vec<TicketWithEmployeeResponse>>> {
    let start = required(params.start.as_deref(), "start")?;
    let end = required(params.end.as_deref(), "end")?;
    let window = DeliveryWindow::parse(Some(start), Some(end))?;
    let rows = state.reports.period(window).await?;
    Ok(web::Json(
        rows.iter().map(TicketWithEmployeeResponse::from).collect(),
    ))
}

/// Grouped summary for every employee, or one employee's ticket list.
#[utoipa::path(
    get,
    path = "/api/reports/detailed",
    params(DetailedParams),
    responses(
        (status = 200, description = "Detailed report", body = DetailedReportResponse),
        (status = 400, description = "Invalid filter", body = ErrorSchema),
        (status = 500, description = "Storage failure", body = ErrorSchema)
    ),
    tags = ["reports"],
    operation_id = "detailedReport"
)]
#[get("/reports/detailed")]
pub async fn detailed_report(
    state: web::Data<HttpState>,
    params: web::Query<DetailedParams>,
) -> ApiResult<web::Json<DetailedReportResponse>> {
    let query = DetailedReportQuery::parse(
        params.employee.as_deref(),
        params.start.as_deref(),
        params.end.as_deref(),
        params.status.as_deref(),
    )?;
    let report = state.reports.detailed(query).await?;
    Ok(web::Json(DetailedReportResponse::from(&report)))
}

#[cfg(test)]
#[path = "reports_tests.rs"]
mod tests;
