//! Storage selection for the HTTP state.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};

use ticket_ledger::domain::ports::{EmployeeRepository, TicketRepository};
use ticket_ledger::domain::{EmployeeService, ReportService, TicketService};
use ticket_ledger::inbound::http::state::HttpState;
use ticket_ledger::outbound::memory::InMemoryLedger;
use ticket_ledger::outbound::persistence::{DieselEmployeeRepository, DieselTicketRepository};

use super::ServerConfig;

/// Wire the three domain services over one pair of storage adapters.
fn build_services<E, T>(employees: Arc<E>, tickets: Arc<T>, clock: Arc<dyn Clock>) -> HttpState
where
    E: EmployeeRepository + 'static,
    T: TicketRepository + 'static,
{
    HttpState::from_services(
        Arc::new(EmployeeService::new(
            employees.clone(),
            tickets.clone(),
            clock.clone(),
        )),
        Arc::new(TicketService::new(employees.clone(), tickets.clone(), clock)),
        Arc::new(ReportService::new(employees, tickets)),
    )
}

/// Build the shared HTTP state, using PostgreSQL when a pool is configured
/// and the in-memory ledger otherwise.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let state = match &config.db_pool {
        Some(pool) => build_services(
            Arc::new(DieselEmployeeRepository::new(pool.clone())),
            Arc::new(DieselTicketRepository::new(pool.clone())),
            clock,
        ),
        None => {
            let ledger = Arc::new(InMemoryLedger::new());
            build_services(ledger.clone(), ledger, clock)
        }
    };
    web::Data::new(state)
}
