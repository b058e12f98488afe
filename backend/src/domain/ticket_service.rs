//! Ticket issuance and ledger reads.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{info, warn};

use crate::domain::ports::{
    EmployeeFilter, EmployeeLookup, EmployeeRepository, TicketCommand, TicketFilter, TicketQuery,
    TicketRepository, TicketRepositoryError,
};
use crate::domain::report::attach_employees;
use crate::domain::storage_errors::{map_employee_repository_error, map_ticket_repository_error};
use crate::domain::{Error, IssueTicket, Ticket, TicketDraft, TicketId, TicketWithEmployee};

/// Ticket service implementing the ticket command and query ports.
#[derive(Clone)]
pub struct TicketService<E, T> {
    employees: Arc<E>,
    tickets: Arc<T>,
    clock: Arc<dyn Clock>,
}

impl<E, T> TicketService<E, T> {
    pub fn new(employees: Arc<E>, tickets: Arc<T>, clock: Arc<dyn Clock>) -> Self {
        Self {
            employees,
            tickets,
            clock,
        }
    }
}

#[async_trait]
impl<E, T> TicketCommand for TicketService<E, T>
where
    E: EmployeeRepository,
    T: TicketRepository,
{
    async fn issue_ticket(&self, request: IssueTicket) -> Result<Ticket, Error> {
        let employee_id = request.employee_reference()?;
        let employee = self
            .employees
            .find(&EmployeeLookup::Id(employee_id))
            .await
            .map_err(map_employee_repository_error)?
            .ok_or_else(|| {
                Error::not_found(format!("employee {employee_id} not found"))
                    .with_field("employeeId")
            })?;
        if !employee.is_active() {
            return Err(Error::inactive_employee(format!(
                "employee {} is inactive and cannot receive tickets",
                employee.code()
            ))
            .with_field("employeeId"));
        }
        let (quantity, status) = request.terms()?;

        let ticket = Ticket::new(TicketDraft {
            id: TicketId::random(),
            quantity,
            employee_id,
            employee_code: employee.code(),
            status,
            delivered_at: self.clock.utc(),
        });
        self.tickets.create(&ticket).await.map_err(|error| {
            if matches!(error, TicketRepositoryError::MissingEmployee { .. }) {
                warn!(%employee_id, "employee removed before ticket write");
            }
            map_ticket_repository_error(error)
        })?;

        info!(
            ticket_id = %ticket.id(),
            %employee_id,
            quantity = ticket.quantity().value(),
            "ticket issued"
        );
        Ok(ticket)
    }
}

#[async_trait]
impl<E, T> TicketQuery for TicketService<E, T>
where
    E: EmployeeRepository,
    T: TicketRepository,
{
    async fn list_tickets(&self) -> Result<Vec<TicketWithEmployee>, Error> {
        let tickets = self
            .tickets
            .list(&TicketFilter::default())
            .await
            .map_err(map_ticket_repository_error)?;
        let employees = self
            .employees
            .list(&EmployeeFilter::default())
            .await
            .map_err(map_employee_repository_error)?;
        Ok(attach_employees(tickets, &employees))
    }
}
