//! Driving port for employee reads.

use async_trait::async_trait;

use crate::domain::{EmployeeId, EmployeeWithTickets, Error};

/// Use-case port for reading employees together with their tickets.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmployeeQuery: Send + Sync {
    /// Every employee ordered by name, tickets most recent first.
    async fn list_employees(&self) -> Result<Vec<EmployeeWithTickets>, Error>;

    /// Single employee with tickets; `NotFound` when the id is unknown.
    async fn get_employee(&self, id: EmployeeId) -> Result<EmployeeWithTickets, Error>;
}
