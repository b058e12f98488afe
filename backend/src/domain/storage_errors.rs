//! Translation of storage port errors into domain errors.
//!
//! Connection and query failures surface as `storage_failure`; the HTTP
//! adapter redacts their messages. Write-time uniqueness violations become
//! `conflict` with the colliding field.

use super::Error;
use super::ports::{EmployeeRepositoryError, TicketRepositoryError};

pub(crate) fn map_employee_repository_error(error: EmployeeRepositoryError) -> Error {
    match error {
        EmployeeRepositoryError::Connection { message } => {
            Error::storage_failure(format!("employee repository unavailable: {message}"))
        }
        EmployeeRepositoryError::Query { message } => {
            Error::storage_failure(format!("employee repository error: {message}"))
        }
        EmployeeRepositoryError::Conflict { field } => {
            Error::conflict(format!("an employee with this {field} already exists"))
                .with_field(field)
        }
    }
}

pub(crate) fn map_ticket_repository_error(error: TicketRepositoryError) -> Error {
    match error {
        TicketRepositoryError::Connection { message } => {
            Error::storage_failure(format!("ticket repository unavailable: {message}"))
        }
        TicketRepositoryError::Query { message } => {
            Error::storage_failure(format!("ticket repository error: {message}"))
        }
        TicketRepositoryError::MissingEmployee { employee_id } => {
            Error::not_found(format!("employee {employee_id} not found")).with_field("employeeId")
        }
    }
}
