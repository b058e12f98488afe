//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`) describe the storage collaborator. Driving
//! ports (`*Command`, `*Query`) are the use cases inbound adapters call.

mod macros;
pub(crate) use macros::define_port_error;

mod employee_command;
mod employee_query;
mod employee_repository;
mod report_query;
mod ticket_command;
mod ticket_query;
mod ticket_repository;

pub use employee_command::EmployeeCommand;
#[cfg(test)]
pub use employee_command::MockEmployeeCommand;
pub use employee_query::EmployeeQuery;
#[cfg(test)]
pub use employee_query::MockEmployeeQuery;
#[cfg(test)]
pub use employee_repository::MockEmployeeRepository;
pub use employee_repository::{
    EmployeeFilter, EmployeeLookup, EmployeeRepository, EmployeeRepositoryError,
};
#[cfg(test)]
pub use report_query::MockReportQuery;
pub use report_query::ReportQuery;
#[cfg(test)]
pub use ticket_command::MockTicketCommand;
pub use ticket_command::TicketCommand;
#[cfg(test)]
pub use ticket_query::MockTicketQuery;
pub use ticket_query::TicketQuery;
#[cfg(test)]
pub use ticket_repository::MockTicketRepository;
pub use ticket_repository::{TicketFilter, TicketGroup, TicketRepository, TicketRepositoryError};
