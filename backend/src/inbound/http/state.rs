//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on driving ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    EmployeeCommand, EmployeeQuery, ReportQuery, TicketCommand, TicketQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub employees: Arc<dyn EmployeeCommand>,
    pub employees_query: Arc<dyn EmployeeQuery>,
    pub tickets: Arc<dyn TicketCommand>,
    pub tickets_query: Arc<dyn TicketQuery>,
    pub reports: Arc<dyn ReportQuery>,
}

impl HttpState {
    /// Wire the state from a single service per concern.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use mockable::DefaultClock;
    /// use ticket_ledger::domain::{EmployeeService, ReportService, TicketService};
    /// use ticket_ledger::inbound::http::state::HttpState;
    /// use ticket_ledger::outbound::memory::InMemoryLedger;
    ///
    /// let ledger = Arc::new(InMemoryLedger::new());
    /// let clock = Arc::new(DefaultClock);
    /// let state = HttpState::from_services(
    ///     Arc::new(EmployeeService::new(ledger.clone(), ledger.clone(), clock.clone())),
    ///     Arc::new(TicketService::new(ledger.clone(), ledger.clone(), clock)),
    ///     Arc::new(ReportService::new(ledger.clone(), ledger)),
    /// );
    /// let _reports = state.reports.clone();
    /// ```
    pub fn from_services<E, T, R>(employees: Arc<E>, tickets: Arc<T>, reports: Arc<R>) -> Self
    where
        E: EmployeeCommand + EmployeeQuery + 'static,
        T: TicketCommand + TicketQuery + 'static,
        R: ReportQuery + 'static,
    {
        Self {
            employees: employees.clone(),
            employees_query: employees,
            tickets: tickets.clone(),
            tickets_query: tickets,
            reports,
        }
    }
}
