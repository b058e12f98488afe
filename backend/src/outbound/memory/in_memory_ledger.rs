//! Process-local ledger backing both storage ports.
//!
//! Used when no database URL is configured and by the HTTP test suites. The
//! adapter enforces the same constraints as the PostgreSQL schema: unique
//! `cpf` and `code` per employee, and tickets must reference a stored
//! employee.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{
    EmployeeFilter, EmployeeLookup, EmployeeRepository, EmployeeRepositoryError,
    TicketFilter, TicketGroup, TicketRepository, TicketRepositoryError,
};
use crate::domain::{Employee, EmployeeCode, EmployeeId, Ticket};

#[derive(Debug, Default)]
struct LedgerState {
    employees: HashMap<EmployeeId, Employee>,
    tickets: Vec<Ticket>,
}

impl LedgerState {
    fn conflicting_field(&self, candidate: &Employee) -> Option<&'static str> {
        let others = self
            .employees
            .values()
            .filter(|existing| existing.id() != candidate.id());
        for existing in others {
            if existing.cpf() == candidate.cpf() {
                return Some("cpf");
            }
            if existing.code() == candidate.code() {
                return Some("code");
            }
        }
        None
    }
}

/// Shared in-memory store; clones observe the same state.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLedger {
    state: Arc<RwLock<LedgerState>>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EmployeeRepository for InMemoryLedger {
    async fn find(
        &self,
        lookup: &EmployeeLookup,
    ) -> Result<Option<Employee>, EmployeeRepositoryError> {
        let state = self.state.read().await;
        let found = match lookup {
            EmployeeLookup::Id(id) => state.employees.get(id).cloned(),
            EmployeeLookup::Cpf(cpf) => state
                .employees
                .values()
                .find(|employee| employee.cpf() == cpf)
                .cloned(),
            EmployeeLookup::Code(code) => state
                .employees
                .values()
                .find(|employee| employee.code() == *code)
                .cloned(),
        };
        Ok(found)
    }

    async fn highest_code(&self) -> Result<Option<EmployeeCode>, EmployeeRepositoryError> {
        let state = self.state.read().await;
        Ok(state.employees.values().map(Employee::code).max())
    }

    async fn list(
        &self,
        filter: &EmployeeFilter,
    ) -> Result<Vec<Employee>, EmployeeRepositoryError> {
        let state = self.state.read().await;
        let mut employees: Vec<Employee> = state
            .employees
            .values()
            .filter(|employee| filter.matches(employee))
            .cloned()
            .collect();
        employees.sort_by(|a, b| {
            a.name()
                .as_ref()
                .cmp(b.name().as_ref())
                .then(a.code().cmp(&b.code()))
        });
        Ok(employees)
    }

    async fn create(&self, employee: &Employee) -> Result<(), EmployeeRepositoryError> {
        let mut state = self.state.write().await;
        if state.employees.contains_key(&employee.id()) {
            return Err(EmployeeRepositoryError::conflict("id"));
        }
        if let Some(field) = state.conflicting_field(employee) {
            return Err(EmployeeRepositoryError::conflict(field));
        }
        state.employees.insert(employee.id(), employee.clone());
        Ok(())
    }

    async fn update(&self, employee: &Employee) -> Result<bool, EmployeeRepositoryError> {
        let mut state = self.state.write().await;
        if !state.employees.contains_key(&employee.id()) {
            return Ok(false);
        }
        if let Some(field) = state.conflicting_field(employee) {
            return Err(EmployeeRepositoryError::conflict(field));
        }
        state.employees.insert(employee.id(), employee.clone());
        Ok(true)
    }
}

#[async_trait]
impl TicketRepository for InMemoryLedger {
    async fn create(&self, ticket: &Ticket) -> Result<(), TicketRepositoryError> {
        let mut state = self.state.write().await;
        if !state.employees.contains_key(&ticket.employee_id()) {
            return Err(TicketRepositoryError::missing_employee(
                ticket.employee_id().to_string(),
            ));
        }
        state.tickets.push(ticket.clone());
        Ok(())
    }

    async fn list(&self, filter: &TicketFilter) -> Result<Vec<Ticket>, TicketRepositoryError> {
        let state = self.state.read().await;
        // Newest first; later insertions win ties, mirroring the id-desc order in SQL.
        let mut tickets: Vec<Ticket> = state
            .tickets
            .iter()
            .rev()
            .filter(|ticket| filter.matches(ticket))
            .cloned()
            .collect();
        tickets.sort_by(|a, b| b.delivered_at().cmp(&a.delivered_at()));
        Ok(tickets)
    }

    async fn sum_quantity(&self, filter: &TicketFilter) -> Result<i64, TicketRepositoryError> {
        let state = self.state.read().await;
        Ok(state
            .tickets
            .iter()
            .filter(|ticket| filter.matches(ticket))
            .map(|ticket| i64::from(ticket.quantity().value()))
            .sum())
    }

    async fn group_by_employee(
        &self,
        filter: &TicketFilter,
    ) -> Result<Vec<TicketGroup>, TicketRepositoryError> {
        let state = self.state.read().await;
        let mut groups: BTreeMap<EmployeeId, TicketGroup> = BTreeMap::new();
        for ticket in state.tickets.iter().filter(|ticket| filter.matches(ticket)) {
            let group = groups
                .entry(ticket.employee_id())
                .or_insert_with(|| TicketGroup {
                    employee_id: ticket.employee_id(),
                    total_quantity: 0,
                    last_delivered_at: None,
                });
            group.total_quantity += i64::from(ticket.quantity().value());
            group.last_delivered_at = group.last_delivered_at.max(Some(ticket.delivered_at()));
        }
        Ok(groups.into_values().collect())
    }
}

#[cfg(test)]
#[path = "in_memory_ledger_tests.rs"]
mod tests;
