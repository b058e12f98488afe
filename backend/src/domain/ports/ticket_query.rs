//! Driving port for ticket reads.

use async_trait::async_trait;

use crate::domain::{Error, TicketWithEmployee};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TicketQuery: Send + Sync {
    /// Every ticket with its owner, most recent delivery first.
    async fn list_tickets(&self) -> Result<Vec<TicketWithEmployee>, Error>;
}
