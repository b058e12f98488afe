//! PostgreSQL persistence adapters using Diesel.
//!
//! Repository implementations only translate between Diesel rows and
//! domain types. Row structs (`models.rs`) and the table definitions
//! (`schema.rs`) stay private to this module.
//!
//! ```ignore
//! use ticket_ledger::outbound::persistence::{DbPool, DieselEmployeeRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/tickets")).await?;
//! let employees = DieselEmployeeRepository::new(pool);
//! ```

mod diesel_employee_repository;
mod diesel_error_mapping;
mod diesel_ticket_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_employee_repository::DieselEmployeeRepository;
pub use diesel_ticket_repository::DieselTicketRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
