//! Employee registry handlers.
//!
//! ```text
//! GET  /api/employees
//! GET  /api/employees/history
//! POST /api/employees {"name":"Ana","cpf":"12345678901"}
//! GET  /api/employees/{id}
//! PUT  /api/employees/{id} {"status":"inactive"}
//! ```

use actix_web::{HttpResponse, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{NewEmployee, UpdateEmployee};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{EmployeeHistoryResponse, EmployeeResponse, ErrorSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_employee_id;

/// Request payload for registering an employee.
///
/// Every field is optional on the wire so absent values surface as
/// `missing_field` errors rather than decoding failures.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployeeRequestBody {
    #[schema(example = "Ana")]
    pub name: Option<String>,
    /// Eleven ASCII digits.
    #[schema(example = "12345678901")]
    pub cpf: Option<String>,
    /// `active` (default) or `inactive`; `A` and `I` are also accepted.
    #[schema(example = "active")]
    pub status: Option<String>,
    /// Explicit code; allocated automatically when omitted.
    #[schema(example = 1000)]
    pub code: Option<i64>,
}

impl From<CreateEmployeeRequestBody> for NewEmployee {
    fn from(body: CreateEmployeeRequestBody) -> Self {
        Self {
            name: body.name,
            cpf: body.cpf,
            status: body.status,
            code: body.code,
        }
    }
}

/// Partial update payload; omitted fields keep their stored values.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmployeeRequestBody {
    pub name: Option<String>,
    pub cpf: Option<String>,
    #[schema(example = "inactive")]
    pub status: Option<String>,
}

impl From<UpdateEmployeeRequestBody> for UpdateEmployee {
    fn from(body: UpdateEmployeeRequestBody) -> Self {
        Self {
            name: body.name,
            cpf: body.cpf,
            status: body.status,
        }
    }
}

/// List every employee ordered by name, with their tickets.
#[utoipa::path(
    get,
    path = "/api/employees",
    responses(
        (status = 200, description = "Employees", body = [EmployeeResponse]),
        (status = 500, description = "Storage failure", body = ErrorSchema)
    ),
    tags = ["employees"],
    operation_id = "listEmployees"
)]
#[get("/employees")]
pub async fn list_employees(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<EmployeeResponse>>> {
    let employees = state.employees_query.list_employees().await?;
    Ok(web::Json(
        employees.iter().map(EmployeeResponse::from).collect(),
    ))
}

/// Employee history: each employee with their tickets, most recent first,
/// and the total quantity ever issued to them.
#[utoipa::path(
    get,
    path = "/api/employees/history",
    responses(
        (status = 200, description = "Employee history", body = [EmployeeHistoryResponse]),
        (status = 500, description = "Storage failure", body = ErrorSchema)
    ),
    tags = ["employees"],
    operation_id = "employeeHistory"
)]
#[get("/employees/history")]
pub async fn employee_history(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<EmployeeHistoryResponse>>> {
    let employees = state.employees_query.list_employees().await?;
    Ok(web::Json(
        employees.iter().map(EmployeeHistoryResponse::from).collect(),
    ))
}

/// Register an employee.
#[utoipa::path(
    post,
    path = "/api/employees",
    request_body = CreateEmployeeRequestBody,
    responses(
        (status = 201, description = "Employee registered", body = EmployeeResponse),
        (status = 400, description = "Invalid or missing field", body = ErrorSchema),
        (status = 409, description = "cpf or code already registered", body = ErrorSchema),
        (status = 500, description = "Storage failure", body = ErrorSchema)
    ),
    tags = ["employees"],
    operation_id = "createEmployee"
)]
#[post("/employees")]
pub async fn create_employee(
    state: web::Data<HttpState>,
    payload: web::Json<CreateEmployeeRequestBody>,
) -> ApiResult<HttpResponse> {
    let employee = state
        .employees
        .create_employee(payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Created().json(EmployeeResponse::from(&employee)))
}

/// Fetch one employee with their tickets.
#[utoipa::path(
    get,
    path = "/api/employees/{id}",
    params(("id" = String, Path, description = "Employee identifier")),
    responses(
        (status = 200, description = "Employee", body = EmployeeResponse),
        (status = 400, description = "Malformed identifier", body = ErrorSchema),
        (status = 404, description = "Unknown employee", body = ErrorSchema),
        (status = 500, description = "Storage failure", body = ErrorSchema)
    ),
    tags = ["employees"],
    operation_id = "getEmployee"
)]
#[get("/employees/{id}")]
pub async fn get_employee(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<EmployeeResponse>> {
    let id = parse_employee_id(&path)?;
    let employee = state.employees_query.get_employee(id).await?;
    Ok(web::Json(EmployeeResponse::from(&employee)))
}

/// Update name, cpf or status of an employee.
#[utoipa::path(
    put,
    path = "/api/employees/{id}",
    params(("id" = String, Path, description = "Employee identifier")),
    request_body = UpdateEmployeeRequestBody,
    responses(
        (status = 200, description = "Updated employee", body = EmployeeResponse),
        (status = 400, description = "Invalid field", body = ErrorSchema),
        (status = 404, description = "Unknown employee", body = ErrorSchema),
        (status = 409, description = "cpf already registered", body = ErrorSchema),
        (status = 500, description = "Storage failure", body = ErrorSchema)
    ),
    tags = ["employees"],
    operation_id = "updateEmployee"
)]
#[put("/employees/{id}")]
pub async fn update_employee(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateEmployeeRequestBody>,
) -> ApiResult<web::Json<EmployeeResponse>> {
    let id = parse_employee_id(&path)?;
    let employee = state
        .employees
        .update_employee(id, payload.into_inner().into())
        .await?;
    Ok(web::Json(EmployeeResponse::from(&employee)))
}

#[cfg(test)]
#[path = "employees_tests.rs"]
mod tests;
