//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};

use crate::Trace;
use crate::domain::ports::{
    MockEmployeeCommand, MockEmployeeQuery, MockReportQuery, MockTicketCommand, MockTicketQuery,
};
use crate::inbound::http::configure_api;
use crate::inbound::http::state::HttpState;

/// Mocked driving ports; set expectations, then call [`MockPorts::into_app`].
#[derive(Default)]
pub struct MockPorts {
    pub employees: MockEmployeeCommand,
    pub employees_query: MockEmployeeQuery,
    pub tickets: MockTicketCommand,
    pub tickets_query: MockTicketQuery,
    pub reports: MockReportQuery,
}

impl MockPorts {
    pub fn into_state(self) -> HttpState {
        HttpState {
            employees: Arc::new(self.employees),
            employees_query: Arc::new(self.employees_query),
            tickets: Arc::new(self.tickets),
            tickets_query: Arc::new(self.tickets_query),
            reports: Arc::new(self.reports),
        }
    }

    /// Build the full API over the mocks, wrapped in the trace middleware.
    pub fn into_app(
        self,
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
            .app_data(web::Data::new(self.into_state()))
            .wrap(Trace)
            .configure(configure_api)
    }
}
