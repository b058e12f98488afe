//! Field-level validation for employee writes.

use super::{Cpf, EmployeeCode, EmployeeName};
use crate::domain::{Error, RecordStatus};

/// Validation failures for employee fields.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EmployeeValidationError {
    #[error("name is required")]
    MissingName,
    #[error("name must not be empty")]
    EmptyName,
    #[error("cpf is required")]
    MissingCpf,
    #[error("cpf must contain exactly 11 digits")]
    InvalidCpf,
    #[error("status must be 'active' or 'inactive', got '{value}'")]
    InvalidStatus { value: String },
    #[error("code must be positive, got {value}")]
    NonPositiveCode { value: i64 },
    #[error("code {value} is out of range")]
    CodeOutOfRange { value: i64 },
    #[error("'{value}' is not a valid employee id")]
    InvalidId { value: String },
}

impl EmployeeValidationError {
    /// Name of the request field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingName | Self::EmptyName => "name",
            Self::MissingCpf | Self::InvalidCpf => "cpf",
            Self::InvalidStatus { .. } => "status",
            Self::NonPositiveCode { .. } | Self::CodeOutOfRange { .. } => "code",
            Self::InvalidId { .. } => "id",
        }
    }
}

impl From<EmployeeValidationError> for Error {
    fn from(value: EmployeeValidationError) -> Self {
        let field = value.field();
        let base = match value {
            EmployeeValidationError::MissingName | EmployeeValidationError::MissingCpf => {
                Error::missing_field(value.to_string())
            }
            _ => Error::invalid_field(value.to_string()),
        };
        base.with_field(field)
    }
}

/// Unvalidated employee creation input as received from a client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewEmployee {
    pub name: Option<String>,
    pub cpf: Option<String>,
    pub status: Option<String>,
    pub code: Option<i64>,
}

/// Creation input after field-level checks.
///
/// Uniqueness is not established here; the service checks it against
/// storage before writing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedEmployee {
    pub name: EmployeeName,
    pub cpf: Cpf,
    pub status: RecordStatus,
    pub code: Option<EmployeeCode>,
}

fn parse_status(raw: Option<&str>) -> Result<Option<RecordStatus>, EmployeeValidationError> {
    raw.map(|value| {
        value
            .parse::<RecordStatus>()
            .map_err(|err| EmployeeValidationError::InvalidStatus { value: err.value })
    })
    .transpose()
}

impl NewEmployee {
    /// Check fields in the order name, cpf, status, code.
    ///
    /// The name is trimmed and the status defaults to active.
    pub fn validate(&self) -> Result<ValidatedEmployee, EmployeeValidationError> {
        let name = EmployeeName::new(
            self.name
                .as_deref()
                .ok_or(EmployeeValidationError::MissingName)?,
        )?;
        let cpf = Cpf::new(
            self.cpf
                .clone()
                .ok_or(EmployeeValidationError::MissingCpf)?,
        )?;
        let status = parse_status(self.status.as_deref())?.unwrap_or_default();
        let code = self.code.map(EmployeeCode::new).transpose()?;
        Ok(ValidatedEmployee {
            name,
            cpf,
            status,
            code,
        })
    }
}

/// Partial update to an existing employee; `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeChanges {
    pub name: Option<EmployeeName>,
    pub cpf: Option<Cpf>,
    pub status: Option<RecordStatus>,
}

impl EmployeeChanges {
    /// Validate raw partial input. Each supplied field follows the same
    /// rules as creation.
    pub fn parse(
        name: Option<&str>,
        cpf: Option<&str>,
        status: Option<&str>,
    ) -> Result<Self, EmployeeValidationError> {
        Ok(Self {
            name: name.map(EmployeeName::new).transpose()?,
            cpf: cpf.map(Cpf::new).transpose()?,
            status: parse_status(status)?,
        })
    }
}

/// Unvalidated partial update as received from a client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateEmployee {
    pub name: Option<String>,
    pub cpf: Option<String>,
    pub status: Option<String>,
}

impl UpdateEmployee {
    pub fn validate(&self) -> Result<EmployeeChanges, EmployeeValidationError> {
        EmployeeChanges::parse(
            self.name.as_deref(),
            self.cpf.as_deref(),
            self.status.as_deref(),
        )
    }
}
