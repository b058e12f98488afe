//! Employee domain service.
//!
//! Implements the employee driving ports: registration with cpf and code
//! uniqueness checks, partial updates, and reads that attach tickets.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{info, warn};

use crate::domain::code_allocator::{CodeAllocationError, CodeAllocator};
use crate::domain::ports::{
    EmployeeCommand, EmployeeFilter, EmployeeLookup, EmployeeQuery, EmployeeRepository,
    EmployeeRepositoryError, TicketFilter, TicketRepository,
};
use crate::domain::report::group_tickets;
use crate::domain::storage_errors::{map_employee_repository_error, map_ticket_repository_error};
use crate::domain::{
    Employee, EmployeeDraft, EmployeeId, EmployeeWithTickets, Error, NewEmployee, UpdateEmployee,
};

fn cpf_conflict() -> Error {
    Error::conflict("an employee with this cpf already exists").with_field("cpf")
}

fn employee_not_found(id: EmployeeId) -> Error {
    Error::not_found(format!("employee {id} not found")).with_field("id")
}

fn map_allocation_error(error: CodeAllocationError) -> Error {
    match error {
        CodeAllocationError::Taken { code } => {
            Error::conflict(format!("employee code {code} is already in use")).with_field("code")
        }
        CodeAllocationError::Exhausted { .. } => {
            Error::conflict(error.to_string()).with_field("code")
        }
        CodeAllocationError::Repository(inner) => map_employee_repository_error(inner),
    }
}

/// Translate a write-time failure, logging uniqueness races.
fn map_write_error(error: EmployeeRepositoryError) -> Error {
    if let EmployeeRepositoryError::Conflict { field } = &error {
        warn!(%field, "uniqueness violation detected at write time");
    }
    map_employee_repository_error(error)
}

/// Employee service implementing the employee command and query ports.
#[derive(Clone)]
pub struct EmployeeService<E, T> {
    employees: Arc<E>,
    tickets: Arc<T>,
    allocator: CodeAllocator<E>,
    clock: Arc<dyn Clock>,
}

impl<E, T> EmployeeService<E, T>
where
    E: EmployeeRepository,
    T: TicketRepository,
{
    /// Create a service over the employee and ticket repositories.
    pub fn new(employees: Arc<E>, tickets: Arc<T>, clock: Arc<dyn Clock>) -> Self {
        Self {
            allocator: CodeAllocator::new(Arc::clone(&employees)),
            employees,
            tickets,
            clock,
        }
    }

    async fn find(&self, lookup: &EmployeeLookup) -> Result<Option<Employee>, Error> {
        self.employees
            .find(lookup)
            .await
            .map_err(map_employee_repository_error)
    }

    async fn ensure_cpf_free(
        &self,
        lookup: &EmployeeLookup,
        owner: Option<EmployeeId>,
    ) -> Result<(), Error> {
        match self.find(lookup).await? {
            Some(existing) if Some(existing.id()) != owner => Err(cpf_conflict()),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl<E, T> EmployeeCommand for EmployeeService<E, T>
where
    E: EmployeeRepository,
    T: TicketRepository,
{
    async fn create_employee(&self, request: NewEmployee) -> Result<Employee, Error> {
        let validated = request.validate()?;
        self.ensure_cpf_free(&EmployeeLookup::Cpf(validated.cpf.clone()), None)
            .await?;
        let code = self
            .allocator
            .allocate(validated.code)
            .await
            .map_err(map_allocation_error)?;

        let now = self.clock.utc();
        let employee = Employee::new(EmployeeDraft {
            id: EmployeeId::random(),
            code,
            name: validated.name,
            cpf: validated.cpf,
            status: validated.status,
            created_at: now,
            updated_at: now,
        });
        self.employees
            .create(&employee)
            .await
            .map_err(map_write_error)?;

        info!(employee_id = %employee.id(), code = %employee.code(), "employee registered");
        Ok(employee)
    }

    async fn update_employee(
        &self,
        id: EmployeeId,
        request: UpdateEmployee,
    ) -> Result<Employee, Error> {
        let changes = request.validate()?;
        let mut employee = self
            .find(&EmployeeLookup::Id(id))
            .await?
            .ok_or_else(|| employee_not_found(id))?;

        if let Some(cpf) = changes.cpf.as_ref().filter(|cpf| *cpf != employee.cpf()) {
            self.ensure_cpf_free(&EmployeeLookup::Cpf(cpf.clone()), Some(id))
                .await?;
        }

        employee.apply(changes, self.clock.utc());
        let updated = self
            .employees
            .update(&employee)
            .await
            .map_err(map_write_error)?;
        if !updated {
            return Err(employee_not_found(id));
        }

        info!(employee_id = %id, status = %employee.status(), "employee updated");
        Ok(employee)
    }
}

#[async_trait]
impl<E, T> EmployeeQuery for EmployeeService<E, T>
where
    E: EmployeeRepository,
    T: TicketRepository,
{
    async fn list_employees(&self) -> Result<Vec<EmployeeWithTickets>, Error> {
        let employees = self
            .employees
            .list(&EmployeeFilter::default())
            .await
            .map_err(map_employee_repository_error)?;
        let tickets = self
            .tickets
            .list(&TicketFilter::default())
            .await
            .map_err(map_ticket_repository_error)?;
        Ok(group_tickets(employees, tickets))
    }

    async fn get_employee(&self, id: EmployeeId) -> Result<EmployeeWithTickets, Error> {
        let employee = self
            .find(&EmployeeLookup::Id(id))
            .await?
            .ok_or_else(|| employee_not_found(id))?;
        let tickets = self
            .tickets
            .list(&TicketFilter::default().for_employee(id))
            .await
            .map_err(map_ticket_repository_error)?;
        Ok(EmployeeWithTickets { employee, tickets })
    }
}

#[cfg(test)]
#[path = "employee_service_tests.rs"]
mod tests;
