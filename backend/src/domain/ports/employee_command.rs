//! Driving port for employee mutations.

use async_trait::async_trait;

use crate::domain::{Employee, EmployeeId, Error, NewEmployee, UpdateEmployee};

/// Use-case port for registering and editing employees.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmployeeCommand: Send + Sync {
    /// Validate and register a new employee, allocating a code when none is
    /// supplied.
    async fn create_employee(&self, request: NewEmployee) -> Result<Employee, Error>;

    /// Apply a partial update. The employee code cannot change.
    async fn update_employee(
        &self,
        id: EmployeeId,
        request: UpdateEmployee,
    ) -> Result<Employee, Error>;
}
