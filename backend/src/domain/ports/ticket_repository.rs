//! Port for the append-only ticket ledger and its aggregates.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{DeliveryWindow, EmployeeId, RecordStatus, Ticket};

use super::define_port_error;

define_port_error! {
    /// Errors raised by ticket repository adapters.
    pub enum TicketRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "ticket repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "ticket repository query failed: {message}",
        /// The owning employee vanished before the ticket was written.
        MissingEmployee { employee_id: String } =>
            "employee {employee_id} does not exist",
    }
}

/// Selection applied to ticket reads and aggregates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TicketFilter {
    pub status: Option<RecordStatus>,
    pub employee_id: Option<EmployeeId>,
    pub window: DeliveryWindow,
}

impl TicketFilter {
    /// Active tickets of every employee, unbounded in time.
    pub fn active() -> Self {
        Self {
            status: Some(RecordStatus::Active),
            ..Self::default()
        }
    }

    pub fn with_window(mut self, window: DeliveryWindow) -> Self {
        self.window = window;
        self
    }

    pub fn for_employee(mut self, employee_id: EmployeeId) -> Self {
        self.employee_id = Some(employee_id);
        self
    }

    /// Whether `ticket` passes every constraint.
    pub fn matches(&self, ticket: &Ticket) -> bool {
        self.status.is_none_or(|status| ticket.status() == status)
            && self
                .employee_id
                .is_none_or(|employee_id| ticket.employee_id() == employee_id)
            && self.window.contains(ticket.delivered_at())
    }
}

/// Per-employee aggregate over matching tickets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TicketGroup {
    pub employee_id: EmployeeId,
    pub total_quantity: i64,
    pub last_delivered_at: Option<DateTime<Utc>>,
}

/// Storage collaborator for tickets.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TicketRepository: Send + Sync {
    /// Append a ticket to the ledger.
    async fn create(&self, ticket: &Ticket) -> Result<(), TicketRepositoryError>;

    /// Tickets matching `filter`, most recent delivery first.
    async fn list(&self, filter: &TicketFilter) -> Result<Vec<Ticket>, TicketRepositoryError>;

    /// Sum of quantities over matching tickets; zero when none match.
    async fn sum_quantity(&self, filter: &TicketFilter) -> Result<i64, TicketRepositoryError>;

    /// Matching tickets grouped by owning employee.
    async fn group_by_employee(
        &self,
        filter: &TicketFilter,
    ) -> Result<Vec<TicketGroup>, TicketRepositoryError>;
}
