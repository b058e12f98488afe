//! Ticket ledger entries.
//!
//! Tickets are append-only: they are created by issuance and never updated
//! or deleted. Each ticket snapshots the owning employee's code at issue
//! time.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::employee::{EmployeeCode, EmployeeId};
use super::{Error, RecordStatus};

/// Opaque ticket identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketId(Uuid);

impl TicketId {
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Validation failures for ticket issuance input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TicketValidationError {
    #[error("employeeId is required")]
    MissingEmployeeId,
    #[error("quantity is required")]
    MissingQuantity,
    #[error("'{value}' is not a valid employee id")]
    InvalidEmployeeId { value: String },
    #[error("quantity must be a positive integer")]
    InvalidQuantity,
    #[error("status must be 'active' or 'inactive', got '{value}'")]
    InvalidStatus { value: String },
}

impl TicketValidationError {
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingEmployeeId | Self::InvalidEmployeeId { .. } => "employeeId",
            Self::MissingQuantity | Self::InvalidQuantity => "quantity",
            Self::InvalidStatus { .. } => "status",
        }
    }
}

impl From<TicketValidationError> for Error {
    fn from(value: TicketValidationError) -> Self {
        let field = value.field();
        let base = match value {
            TicketValidationError::MissingEmployeeId | TicketValidationError::MissingQuantity => {
                Error::missing_field(value.to_string())
            }
            _ => Error::invalid_field(value.to_string()),
        };
        base.with_field(field)
    }
}

/// Quantity as supplied by a client: a JSON number or a numeric string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QuantityInput {
    Integer(i64),
    Fractional(f64),
    Text(String),
}

impl From<i64> for QuantityInput {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<&str> for QuantityInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

/// Positive number of allowance units on a ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i32")]
pub struct TicketQuantity(i32);

impl TicketQuantity {
    pub fn new(value: i64) -> Result<Self, TicketValidationError> {
        if value <= 0 {
            return Err(TicketValidationError::InvalidQuantity);
        }
        i32::try_from(value)
            .map(Self)
            .map_err(|_| TicketValidationError::InvalidQuantity)
    }

    /// Coerce client input to a quantity.
    ///
    /// Numeric strings are trimmed and parsed. Fractional values are only
    /// accepted when they carry no fractional part.
    ///
    /// # Examples
    /// ```
    /// use ticket_ledger::domain::{QuantityInput, TicketQuantity};
    ///
    /// let qty = TicketQuantity::coerce(&QuantityInput::from(" 5 ")).expect("numeric text");
    /// assert_eq!(qty.value(), 5);
    /// assert!(TicketQuantity::coerce(&QuantityInput::from("abc")).is_err());
    /// ```
    pub fn coerce(input: &QuantityInput) -> Result<Self, TicketValidationError> {
        match input {
            QuantityInput::Integer(value) => Self::new(*value),
            QuantityInput::Fractional(value) => Self::from_float(*value),
            QuantityInput::Text(text) => {
                let trimmed = text.trim();
                match trimmed.parse::<i64>() {
                    Ok(value) => Self::new(value),
                    Err(_) => trimmed
                        .parse::<f64>()
                        .map_err(|_| TicketValidationError::InvalidQuantity)
                        .and_then(Self::from_float),
                }
            }
        }
    }

    fn from_float(value: f64) -> Result<Self, TicketValidationError> {
        if !value.is_finite() || value.fract() != 0.0 {
            return Err(TicketValidationError::InvalidQuantity);
        }
        if value < 1.0 || value > f64::from(i32::MAX) {
            return Err(TicketValidationError::InvalidQuantity);
        }
        // Range and integrality were checked above.
        Self::new(value as i64)
    }

    pub fn value(self) -> i32 {
        self.0
    }
}

impl TryFrom<i64> for TicketQuantity {
    type Error = TicketValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TicketQuantity> for i32 {
    fn from(value: TicketQuantity) -> Self {
        value.0
    }
}

/// Unvalidated issuance input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IssueTicket {
    pub employee_id: Option<String>,
    pub quantity: Option<QuantityInput>,
    pub status: Option<String>,
}

impl IssueTicket {
    /// Presence and shape checks that precede the employee lookup.
    pub fn employee_reference(&self) -> Result<EmployeeId, TicketValidationError> {
        let raw = self
            .employee_id
            .as_deref()
            .filter(|value| !value.trim().is_empty())
            .ok_or(TicketValidationError::MissingEmployeeId)?;
        if self.quantity.is_none() {
            return Err(TicketValidationError::MissingQuantity);
        }
        raw.parse::<EmployeeId>()
            .map_err(|_| TicketValidationError::InvalidEmployeeId {
                value: raw.to_owned(),
            })
    }

    /// Coerce the quantity and status once the employee has been accepted.
    pub fn terms(&self) -> Result<(TicketQuantity, RecordStatus), TicketValidationError> {
        let quantity = self
            .quantity
            .as_ref()
            .ok_or(TicketValidationError::MissingQuantity)
            .and_then(TicketQuantity::coerce)?;
        let status = self
            .status
            .as_deref()
            .map(|raw| {
                raw.parse::<RecordStatus>()
                    .map_err(|err| TicketValidationError::InvalidStatus { value: err.value })
            })
            .transpose()?
            .unwrap_or_default();
        Ok((quantity, status))
    }
}

/// Fields required to build a [`Ticket`].
#[derive(Debug, Clone)]
pub struct TicketDraft {
    pub id: TicketId,
    pub quantity: TicketQuantity,
    pub employee_id: EmployeeId,
    pub employee_code: EmployeeCode,
    pub status: RecordStatus,
    pub delivered_at: DateTime<Utc>,
}

/// A single allotment granted to one employee at one point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    id: TicketId,
    quantity: TicketQuantity,
    employee_id: EmployeeId,
    employee_code: EmployeeCode,
    status: RecordStatus,
    delivered_at: DateTime<Utc>,
}

impl Ticket {
    pub fn new(draft: TicketDraft) -> Self {
        Self {
            id: draft.id,
            quantity: draft.quantity,
            employee_id: draft.employee_id,
            employee_code: draft.employee_code,
            status: draft.status,
            delivered_at: draft.delivered_at,
        }
    }

    pub fn id(&self) -> TicketId {
        self.id
    }

    pub fn quantity(&self) -> TicketQuantity {
        self.quantity
    }

    pub fn employee_id(&self) -> EmployeeId {
        self.employee_id
    }

    /// Employee code captured when the ticket was issued.
    pub fn employee_code(&self) -> EmployeeCode {
        self.employee_code
    }

    pub fn status(&self) -> RecordStatus {
        self.status
    }

    pub fn delivered_at(&self) -> DateTime<Utc> {
        self.delivered_at
    }
}
