//! Domain primitives, aggregates and services.
//!
//! Purpose: define the strongly typed employee and ticket model, the
//! validation rules guarding every write, code allocation, and the
//! reporting engine. Nothing here knows about HTTP or SQL; adapters reach
//! the domain through [`ports`].
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - Employee, Ticket and their value types.
//! - EmployeeService, TicketService, ReportService: driving port
//!   implementations over the storage ports.

pub mod code_allocator;
pub mod employee;
mod employee_service;
pub mod error;
pub mod ports;
pub mod report;
mod report_service;
mod status;
mod storage_errors;
pub mod ticket;
mod ticket_service;
mod trace_id;

#[cfg(test)]
pub(crate) mod service_test_support;

pub use self::code_allocator::{BASELINE_CODE, CodeAllocationError, CodeAllocator};
pub use self::employee::{
    Cpf, Employee, EmployeeChanges, EmployeeCode, EmployeeDraft, EmployeeId, EmployeeName,
    EmployeeValidationError, NewEmployee, UpdateEmployee, ValidatedEmployee,
};
pub use self::employee_service::EmployeeService;
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::report::{
    DeliveryWindow, DetailedReport, DetailedReportQuery, DetailedSummaryRow, EmployeeSelector,
    EmployeeSummary, EmployeeTotal, EmployeeWithTickets, ReportValidationError,
    TicketWithEmployee,
};
pub use self::report_service::ReportService;
pub use self::status::{ParseRecordStatusError, RecordStatus};
pub use self::ticket::{
    IssueTicket, QuantityInput, Ticket, TicketDraft, TicketId, TicketQuantity,
    TicketValidationError,
};
pub use self::ticket_service::TicketService;
pub use self::trace_id::TraceId;

/// Convenient result alias for driving port operations.
///
/// # Examples
/// ```
/// use ticket_ledger::domain::{ApiResult, Error};
///
/// fn lookup() -> ApiResult<u32> {
///     Err(Error::not_found("employee not found"))
/// }
/// assert!(lookup().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
