//! HTTP inbound adapter exposing the ledger's REST endpoints.
//!
//! Handlers parse transport concerns only (path ids, query strings, JSON
//! bodies) and delegate to the driving ports held in [`state::HttpState`].

pub mod employees;
pub mod error;
pub mod health;
pub mod reports;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod tickets;
pub mod validation;

use actix_web::web;

pub use error::ApiResult;
use error::{json_error_handler, query_error_handler};

/// Mount every `/api` route.
///
/// `/employees/history` is registered before `/employees/{id}` so the
/// literal segment is matched first.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use ticket_ledger::inbound::http::configure_api;
///
/// let app = App::new().configure(configure_api);
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .app_data(web::QueryConfig::default().error_handler(query_error_handler))
            .service(employees::list_employees)
            .service(employees::employee_history)
            .service(employees::create_employee)
            .service(employees::get_employee)
            .service(employees::update_employee)
            .service(tickets::list_tickets)
            .service(tickets::issue_ticket)
            .service(reports::total_report)
            .service(reports::per_employee_report)
            .service(reports::period_report)
            .service(reports::detailed_report),
    );
}
