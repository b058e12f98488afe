//! Port for employee persistence.
//!
//! Uniqueness of `cpf` and `code` is enforced by the store itself; adapters
//! report a write-time violation as [`EmployeeRepositoryError::Conflict`]
//! naming the colliding field.

use async_trait::async_trait;

use crate::domain::{Cpf, Employee, EmployeeCode, EmployeeId, RecordStatus};

use super::define_port_error;

define_port_error! {
    /// Errors raised by employee repository adapters.
    pub enum EmployeeRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "employee repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "employee repository query failed: {message}",
        /// A unique field collided with an existing employee.
        Conflict { field: String } =>
            "employee {field} already exists",
    }
}

/// Point lookup keys for a single employee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmployeeLookup {
    Id(EmployeeId),
    Cpf(Cpf),
    Code(EmployeeCode),
}

/// Filter for employee listings. The default lists every employee.
///
/// Listings are ordered alphabetically by name, ties broken by code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeFilter {
    pub status: Option<RecordStatus>,
    pub ids: Option<Vec<EmployeeId>>,
}

impl EmployeeFilter {
    pub fn active() -> Self {
        Self {
            status: Some(RecordStatus::Active),
            ..Self::default()
        }
    }

    pub fn with_ids(ids: Vec<EmployeeId>) -> Self {
        Self {
            ids: Some(ids),
            ..Self::default()
        }
    }

    /// Whether `employee` passes the status and id constraints.
    pub fn matches(&self, employee: &Employee) -> bool {
        self.status.is_none_or(|status| employee.status() == status)
            && self
                .ids
                .as_ref()
                .is_none_or(|ids| ids.contains(&employee.id()))
    }
}

/// Storage collaborator for employees.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// Find a single employee by id, cpf or code.
    async fn find(
        &self,
        lookup: &EmployeeLookup,
    ) -> Result<Option<Employee>, EmployeeRepositoryError>;

    /// Highest code currently assigned, if any employee exists.
    async fn highest_code(&self) -> Result<Option<EmployeeCode>, EmployeeRepositoryError>;

    /// List employees matching `filter` in the requested order.
    async fn list(&self, filter: &EmployeeFilter)
    -> Result<Vec<Employee>, EmployeeRepositoryError>;

    /// Insert a new employee.
    async fn create(&self, employee: &Employee) -> Result<(), EmployeeRepositoryError>;

    /// Overwrite the mutable fields of an existing employee.
    ///
    /// Returns `false` when no employee with that id exists.
    async fn update(&self, employee: &Employee) -> Result<bool, EmployeeRepositoryError>;
}
