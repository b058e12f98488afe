//! Application wiring shared by the integration suites.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use mockable::DefaultClock;
use ticket_ledger::Trace;
use ticket_ledger::domain::{EmployeeService, ReportService, TicketService};
use ticket_ledger::inbound::http::configure_api;
use ticket_ledger::inbound::http::state::HttpState;
use ticket_ledger::outbound::memory::InMemoryLedger;

/// HTTP state backed by a fresh in-memory ledger.
pub(crate) fn memory_state() -> web::Data<HttpState> {
    let ledger = Arc::new(InMemoryLedger::new());
    let clock = Arc::new(DefaultClock);
    web::Data::new(HttpState::from_services(
        Arc::new(EmployeeService::new(
            ledger.clone(),
            ledger.clone(),
            clock.clone(),
        )),
        Arc::new(TicketService::new(ledger.clone(), ledger.clone(), clock)),
        Arc::new(ReportService::new(ledger.clone(), ledger)),
    ))
}

/// The `/api` surface over `state`, wrapped in the trace middleware.
pub(crate) fn ledger_app(
    state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(state)
        .wrap(Trace)
        .configure(configure_api)
}
