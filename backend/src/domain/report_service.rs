//! Report service backing the reporting driving port.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{
    EmployeeFilter, EmployeeLookup, EmployeeRepository, ReportQuery, TicketFilter,
    TicketRepository,
};
use crate::domain::report::{attach_employees, per_employee_totals, summarise_groups};
use crate::domain::storage_errors::{map_employee_repository_error, map_ticket_repository_error};
use crate::domain::{
    DeliveryWindow, DetailedReport, DetailedReportQuery, Employee, EmployeeId, EmployeeSelector,
    EmployeeTotal, Error, TicketWithEmployee,
};

/// Read-only reports over the employee and ticket repositories.
#[derive(Clone)]
pub struct ReportService<E, T> {
    employees: Arc<E>,
    tickets: Arc<T>,
}

impl<E, T> ReportService<E, T>
where
    E: EmployeeRepository,
    T: TicketRepository,
{
    pub fn new(employees: Arc<E>, tickets: Arc<T>) -> Self {
        Self { employees, tickets }
    }

    async fn employees_by_id(&self, mut ids: Vec<EmployeeId>) -> Result<Vec<Employee>, Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        ids.sort_unstable();
        ids.dedup();
        self.employees
            .list(&EmployeeFilter::with_ids(ids))
            .await
            .map_err(map_employee_repository_error)
    }

    async fn tickets_with_owners(
        &self,
        filter: TicketFilter,
    ) -> Result<Vec<TicketWithEmployee>, Error> {
        let tickets = self
            .tickets
            .list(&filter)
            .await
            .map_err(map_ticket_repository_error)?;
        let owners = self
            .employees_by_id(tickets.iter().map(|ticket| ticket.employee_id()).collect())
            .await?;
        Ok(attach_employees(tickets, &owners))
    }
}

#[async_trait]
impl<E, T> ReportQuery for ReportService<E, T>
where
    E: EmployeeRepository,
    T: TicketRepository,
{
    async fn total_active(&self) -> Result<i64, Error> {
        self.tickets
            .sum_quantity(&TicketFilter::active())
            .await
            .map_err(map_ticket_repository_error)
    }

    async fn per_employee(&self) -> Result<Vec<EmployeeTotal>, Error> {
        let employees = self
            .employees
            .list(&EmployeeFilter::active())
            .await
            .map_err(map_employee_repository_error)?;
        let groups = self
            .tickets
            .group_by_employee(&TicketFilter::active())
            .await
            .map_err(map_ticket_repository_error)?;
        Ok(per_employee_totals(&employees, &groups))
    }

    async fn period(&self, window: DeliveryWindow) -> Result<Vec<TicketWithEmployee>, Error> {
        self.tickets_with_owners(TicketFilter::active().with_window(window))
            .await
    }

    async fn detailed(&self, query: DetailedReportQuery) -> Result<DetailedReport, Error> {
        let filter = TicketFilter {
            status: Some(query.status),
            employee_id: None,
            window: query.window,
        };
        match query.selector {
            EmployeeSelector::All => {
                let groups = self
                    .tickets
                    .group_by_employee(&filter)
                    .await
                    .map_err(map_ticket_repository_error)?;
                let owners = self
                    .employees_by_id(groups.iter().map(|group| group.employee_id).collect())
                    .await?;
                Ok(summarise_groups(&groups, &owners))
            }
            EmployeeSelector::Employee(employee_id) => {
                let tickets = self
                    .tickets
                    .list(&filter.for_employee(employee_id))
                    .await
                    .map_err(map_ticket_repository_error)?;
                if tickets.is_empty() {
                    return Ok(DetailedReport::Tickets(Vec::new()));
                }
                let owner = self
                    .employees
                    .find(&EmployeeLookup::Id(employee_id))
                    .await
                    .map_err(map_employee_repository_error)?;
                let owners: Vec<Employee> = owner.into_iter().collect();
                Ok(DetailedReport::Tickets(attach_employees(tickets, &owners)))
            }
        }
    }
}

#[cfg(test)]
#[path = "report_service_tests.rs"]
mod tests;
