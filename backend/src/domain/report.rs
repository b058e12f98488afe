//! Reporting engine: delivery windows, employee selectors and the pure
//! aggregation steps shared by every storage adapter.
//!
//! Storage adapters perform the filtering, summing and grouping; the
//! functions here join those results with employee display fields and
//! shape them into report rows.

use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta, Utc};

use super::employee::{Cpf, Employee, EmployeeCode, EmployeeId, EmployeeName};
use super::ports::TicketGroup;
use super::ticket::Ticket;
use super::{Error, RecordStatus};

/// Validation failures for report query parameters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReportValidationError {
    #[error("{field} must be an RFC 3339 timestamp or a YYYY-MM-DD date, got '{value}'")]
    InvalidBound { field: &'static str, value: String },
    #[error("start must not be after end")]
    InvertedWindow,
    #[error("'{value}' is not a valid employee selector")]
    InvalidEmployee { value: String },
    #[error("status must be 'active' or 'inactive', got '{value}'")]
    InvalidStatus { value: String },
}

impl ReportValidationError {
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidBound { field, .. } => field,
            Self::InvertedWindow => "start",
            Self::InvalidEmployee { .. } => "employee",
            Self::InvalidStatus { .. } => "status",
        }
    }
}

impl From<ReportValidationError> for Error {
    fn from(value: ReportValidationError) -> Self {
        let field = value.field();
        Error::invalid_field(value.to_string()).with_field(field)
    }
}

#[derive(Debug, Clone, Copy)]
enum BoundSide {
    Start,
    End,
}

impl BoundSide {
    fn field(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::End => "end",
        }
    }
}

fn parse_bound(
    raw: Option<&str>,
    side: BoundSide,
) -> Result<Option<DateTime<Utc>>, ReportValidationError> {
    let Some(value) = raw.map(str::trim).filter(|value| !value.is_empty()) else {
        return Ok(None);
    };
    if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
        return Ok(Some(instant.with_timezone(&Utc)));
    }
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        ReportValidationError::InvalidBound {
            field: side.field(),
            value: value.to_owned(),
        }
    })?;
    let start_of_day = date.and_time(NaiveTime::MIN).and_utc();
    Ok(Some(match side {
        BoundSide::Start => start_of_day,
        // Last representable instant of the day keeps the bound inclusive.
        BoundSide::End => start_of_day + TimeDelta::days(1) - TimeDelta::nanoseconds(1),
    }))
}

/// Inclusive delivery-date window; either bound may be open.
///
/// # Examples
/// ```
/// use ticket_ledger::domain::DeliveryWindow;
///
/// let window = DeliveryWindow::parse(Some("2024-03-01"), Some("2024-03-01"))
///     .expect("valid window");
/// let noon = "2024-03-01T12:00:00Z".parse().expect("timestamp");
/// assert!(window.contains(noon));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeliveryWindow {
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
}

impl DeliveryWindow {
    /// Window without bounds on either side.
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn new(
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Result<Self, ReportValidationError> {
        if matches!((start, end), (Some(start), Some(end)) if start > end) {
            return Err(ReportValidationError::InvertedWindow);
        }
        Ok(Self { start, end })
    }

    /// Parse raw query bounds.
    ///
    /// A date-only `start` means the start of that day in UTC; a date-only
    /// `end` means the last instant of that day. Blank values are open.
    pub fn parse(start: Option<&str>, end: Option<&str>) -> Result<Self, ReportValidationError> {
        let start = parse_bound(start, BoundSide::Start)?;
        let end = parse_bound(end, BoundSide::End)?;
        Self::new(start, end)
    }

    pub fn start(&self) -> Option<DateTime<Utc>> {
        self.start
    }

    pub fn end(&self) -> Option<DateTime<Utc>> {
        self.end
    }

    /// Both bounds are inclusive.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start.is_none_or(|start| instant >= start) && self.end.is_none_or(|end| instant <= end)
    }
}

/// Which employees a detailed report covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmployeeSelector {
    All,
    Employee(EmployeeId),
}

impl EmployeeSelector {
    /// Absent, blank, `todos` or `all` select every employee.
    pub fn parse(raw: Option<&str>) -> Result<Self, ReportValidationError> {
        let Some(value) = raw.map(str::trim).filter(|value| !value.is_empty()) else {
            return Ok(Self::All);
        };
        if value.eq_ignore_ascii_case("todos") || value.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        value
            .parse::<EmployeeId>()
            .map(Self::Employee)
            .map_err(|_| ReportValidationError::InvalidEmployee {
                value: value.to_owned(),
            })
    }
}

/// Parsed detailed report query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetailedReportQuery {
    pub selector: EmployeeSelector,
    pub window: DeliveryWindow,
    pub status: RecordStatus,
}

impl DetailedReportQuery {
    /// Parse raw query parameters; ticket status defaults to active.
    pub fn parse(
        employee: Option<&str>,
        start: Option<&str>,
        end: Option<&str>,
        status: Option<&str>,
    ) -> Result<Self, ReportValidationError> {
        let selector = EmployeeSelector::parse(employee)?;
        let window = DeliveryWindow::parse(start, end)?;
        let status = status
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(|value| {
                value
                    .parse::<RecordStatus>()
                    .map_err(|err| ReportValidationError::InvalidStatus { value: err.value })
            })
            .transpose()?
            .unwrap_or_default();
        Ok(Self {
            selector,
            window,
            status,
        })
    }
}

/// Employee display fields embedded in report rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeSummary {
    pub id: EmployeeId,
    pub name: EmployeeName,
    pub code: EmployeeCode,
    pub cpf: Cpf,
    pub status: RecordStatus,
}

impl From<&Employee> for EmployeeSummary {
    fn from(employee: &Employee) -> Self {
        Self {
            id: employee.id(),
            name: employee.name().clone(),
            code: employee.code(),
            cpf: employee.cpf().clone(),
            status: employee.status(),
        }
    }
}

/// A ticket joined with its owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketWithEmployee {
    pub ticket: Ticket,
    pub employee: EmployeeSummary,
}

/// An employee with every ticket they hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeWithTickets {
    pub employee: Employee,
    pub tickets: Vec<Ticket>,
}

impl EmployeeWithTickets {
    /// Sum of all attached ticket quantities regardless of status.
    pub fn total_quantity(&self) -> i64 {
        self.tickets
            .iter()
            .map(|ticket| i64::from(ticket.quantity().value()))
            .sum()
    }
}

/// Row of the per-employee report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeTotal {
    pub employee: EmployeeSummary,
    pub total_tickets: i64,
}

/// Row of the detailed summary report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailedSummaryRow {
    pub employee: EmployeeSummary,
    pub total_tickets: i64,
    pub last_delivered_at: Option<DateTime<Utc>>,
}

/// Result of the detailed report: grouped when every employee is
/// selected, flat when a single employee is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailedReport {
    Summary {
        summary: Vec<DetailedSummaryRow>,
        total: i64,
    },
    Tickets(Vec<TicketWithEmployee>),
}

fn by_name(left: &EmployeeSummary, right: &EmployeeSummary) -> Ordering {
    left.name
        .as_ref()
        .cmp(right.name.as_ref())
        .then_with(|| left.code.cmp(&right.code))
}

fn index_by_id(employees: &[Employee]) -> HashMap<EmployeeId, &Employee> {
    employees.iter().map(|employee| (employee.id(), employee)).collect()
}

/// One row per employee, zero when the employee has no matching group.
///
/// Rows are ordered by employee name.
pub fn per_employee_totals(employees: &[Employee], groups: &[TicketGroup]) -> Vec<EmployeeTotal> {
    let sums: HashMap<EmployeeId, i64> = groups
        .iter()
        .map(|group| (group.employee_id, group.total_quantity))
        .collect();
    let mut rows: Vec<EmployeeTotal> = employees
        .iter()
        .map(|employee| EmployeeTotal {
            employee: EmployeeSummary::from(employee),
            total_tickets: sums.get(&employee.id()).copied().unwrap_or(0),
        })
        .collect();
    rows.sort_by(|a, b| by_name(&a.employee, &b.employee));
    rows
}

/// Join ticket groups with their owners and compute the grand total.
///
/// Groups whose owner is absent from `employees` are dropped, so the grand
/// total always equals the sum of the returned rows.
pub fn summarise_groups(groups: &[TicketGroup], employees: &[Employee]) -> DetailedReport {
    let owners = index_by_id(employees);
    let mut summary: Vec<DetailedSummaryRow> = groups
        .iter()
        .filter_map(|group| {
            owners.get(&group.employee_id).map(|employee| DetailedSummaryRow {
                employee: EmployeeSummary::from(*employee),
                total_tickets: group.total_quantity,
                last_delivered_at: group.last_delivered_at,
            })
        })
        .collect();
    summary.sort_by(|a, b| by_name(&a.employee, &b.employee));
    let total = summary.iter().map(|row| row.total_tickets).sum();
    DetailedReport::Summary { summary, total }
}

/// Embed owner display fields into each ticket, preserving ticket order.
///
/// Tickets whose owner is absent from `employees` are dropped.
pub fn attach_employees(tickets: Vec<Ticket>, employees: &[Employee]) -> Vec<TicketWithEmployee> {
    let owners = index_by_id(employees);
    tickets
        .into_iter()
        .filter_map(|ticket| {
            owners
                .get(&ticket.employee_id())
                .map(|employee| TicketWithEmployee {
                    employee: EmployeeSummary::from(*employee),
                    ticket,
                })
        })
        .collect()
}

/// Attach each employee's tickets, keeping the employee order given.
pub fn group_tickets(employees: Vec<Employee>, tickets: Vec<Ticket>) -> Vec<EmployeeWithTickets> {
    let mut by_owner: HashMap<EmployeeId, Vec<Ticket>> = HashMap::new();
    for ticket in tickets {
        by_owner.entry(ticket.employee_id()).or_default().push(ticket);
    }
    employees
        .into_iter()
        .map(|employee| {
            let tickets = by_owner.remove(&employee.id()).unwrap_or_default();
            EmployeeWithTickets { employee, tickets }
        })
        .collect()
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
