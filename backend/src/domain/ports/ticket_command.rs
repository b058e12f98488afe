//! Driving port for ticket issuance.

use async_trait::async_trait;

use crate::domain::{Error, IssueTicket, Ticket};

/// Use-case port for appending tickets to the ledger.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TicketCommand: Send + Sync {
    /// Issue a ticket to an active employee.
    ///
    /// Checks run in order: required fields, employee existence, employee
    /// activity, quantity, status.
    async fn issue_ticket(&self, request: IssueTicket) -> Result<Ticket, Error>;
}
