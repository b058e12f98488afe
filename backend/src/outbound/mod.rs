//! Outbound adapters implementing the storage ports.
//!
//! - **persistence**: PostgreSQL repositories built on Diesel.
//! - **memory**: a process-local ledger used when no database is configured.
//!
//! Adapters translate between domain types and storage representations and
//! carry no business rules.

pub mod memory;
pub mod persistence;
