//! Driving port for the reporting engine.

use async_trait::async_trait;

use crate::domain::{
    DeliveryWindow, DetailedReport, DetailedReportQuery, EmployeeTotal, Error, TicketWithEmployee,
};

/// Read-only aggregate reports over the ticket ledger.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReportQuery: Send + Sync {
    /// Sum of quantities over active tickets; zero when there are none.
    async fn total_active(&self) -> Result<i64, Error>;

    /// One row per active employee with the sum of their active tickets.
    async fn per_employee(&self) -> Result<Vec<EmployeeTotal>, Error>;

    /// Active tickets delivered inside `window`, with their owners.
    async fn period(&self, window: DeliveryWindow) -> Result<Vec<TicketWithEmployee>, Error>;

    /// Grouped summary for all employees or a flat list for one.
    async fn detailed(&self, query: DetailedReportQuery) -> Result<DetailedReport, Error>;
}
