//! Ticket issuance handlers.
//!
//! ```text
//! GET  /api/tickets
//! POST /api/tickets {"employeeId":"...","quantity":5}
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{IssueTicket, QuantityInput};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, TicketResponse, TicketWithEmployeeResponse};
use crate::inbound::http::state::HttpState;

/// Request payload for issuing tickets to an employee.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IssueTicketRequestBody {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub employee_id: Option<String>,
    /// Positive integer, as a JSON number or a numeric string.
    #[schema(value_type = Object, example = 5)]
    pub quantity: Option<QuantityInput>,
    /// Ticket status; defaults to `active`.
    #[schema(example = "active")]
    pub status: Option<String>,
}

impl From<IssueTicketRequestBody> for IssueTicket {
    fn from(body: IssueTicketRequestBody) -> Self {
        Self {
            employee_id: body.employee_id,
            quantity: body.quantity,
            status: body.status,
        }
    }
}

/// List every ticket, most recent first, with its owner.
#[utoipa::path(
    get,
    path = "/api/tickets",
    responses(
        (status = 200, description = "Tickets", body = [TicketWithEmployeeResponse]),
        (status = 500, description = "Storage failure", body = ErrorSchema)
    ),
    tags = ["tickets"],
    operation_id = "listTickets"
)]
#[get("/tickets")]
pub async fn list_tickets(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<TicketWithEmployeeResponse>>> {
    let tickets = state.tickets_query.list_tickets().await?;
    Ok(web::Json(
        tickets.iter().map(TicketWithEmployeeResponse::from).collect(),
    ))
}

/// Issue tickets to an active employee.
#[utoipa::path(
    post,
    path = "/api/tickets",
    request_body = IssueTicketRequestBody,
    responses(
        (status = 201, description = "Ticket issued", body = TicketResponse),
        (status = 400, description = "Invalid field or inactive employee", body = ErrorSchema),
        (status = 404, description = "Unknown employee", body = ErrorSchema),
        (status = 500, description = "Storage failure", body = ErrorSchema)
    ),
    tags = ["tickets"],
    operation_id = "issueTicket"
)]
#[post("/tickets")]
pub async fn issue_ticket(
    state: web::Data<HttpState>,
    payload: web::Json<IssueTicketRequestBody>,
) -> ApiResult<HttpResponse> {
    let ticket = state
        .tickets
        .issue_ticket(payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Created().json(TicketResponse::from(&ticket)))
}
