//! Employee ticket-allowance ledger.
//!
//! Layered as ports and adapters: [`domain`] holds the model, validation,
//! code allocation and reporting; [`inbound::http`] exposes it over REST;
//! [`outbound`] provides PostgreSQL and in-memory storage.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
