//! Employee aggregate and its validated value types.
//!
//! An employee is identified by an opaque [`EmployeeId`] and by two
//! business keys that must stay unique across the whole set: the
//! [`EmployeeCode`] and the [`Cpf`].

mod validation;

pub use validation::{
    EmployeeChanges, EmployeeValidationError, NewEmployee, UpdateEmployee, ValidatedEmployee,
};

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::RecordStatus;

/// Opaque employee identifier assigned at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(Uuid);

impl EmployeeId {
    /// Generate a new random identifier.
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

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for EmployeeId {
    type Err = EmployeeValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(value.trim())
            .map(Self)
            .map_err(|_| EmployeeValidationError::InvalidId {
                value: value.to_owned(),
            })
    }
}

/// Unique positive employee code.
///
/// Stored as a 32-bit integer; values outside `1..=i32::MAX` are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i32")]
pub struct EmployeeCode(i32);

impl EmployeeCode {
    /// First code assigned in an empty employee set.
    pub const BASELINE: Self = Self(1000);

    /// Validate and construct a code.
    pub fn new(value: i64) -> Result<Self, EmployeeValidationError> {
        if value <= 0 {
            return Err(EmployeeValidationError::NonPositiveCode { value });
        }
        i32::try_from(value)
            .map(Self)
            .map_err(|_| EmployeeValidationError::CodeOutOfRange { value })
    }

    pub fn value(self) -> i32 {
        self.0
    }

    /// The code immediately after this one, if representable.
    pub fn successor(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl TryFrom<i64> for EmployeeCode {
    type Error = EmployeeValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EmployeeCode> for i32 {
    fn from(value: EmployeeCode) -> Self {
        value.0
    }
}

impl fmt::Display for EmployeeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Employee display name, stored trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmployeeName(String);

impl EmployeeName {
    /// Trim and validate a name; blank input is rejected.
    pub fn new(value: impl AsRef<str>) -> Result<Self, EmployeeValidationError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(EmployeeValidationError::EmptyName);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for EmployeeName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmployeeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<EmployeeName> for String {
    fn from(value: EmployeeName) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmployeeName {
    type Error = EmployeeValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Brazilian taxpayer number, validated for shape only (no checksum).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Cpf(String);

/// Number of digits in a CPF.
pub const CPF_LENGTH: usize = 11;

static CPF_RE: OnceLock<Regex> = OnceLock::new();

fn cpf_regex() -> &'static Regex {
    CPF_RE.get_or_init(|| {
        // `\d` would admit non-ASCII digits.
        Regex::new(&format!("^[0-9]{{{CPF_LENGTH}}}$"))
            .unwrap_or_else(|error| panic!("cpf regex failed to compile: {error}"))
    })
}

impl Cpf {
    pub fn new(value: impl Into<String>) -> Result<Self, EmployeeValidationError> {
        let value = value.into();
        if !cpf_regex().is_match(&value) {
            return Err(EmployeeValidationError::InvalidCpf);
        }
        Ok(Self(value))
    }
}

impl AsRef<str> for Cpf {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Cpf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Cpf> for String {
    fn from(value: Cpf) -> Self {
        value.0
    }
}

impl TryFrom<String> for Cpf {
    type Error = EmployeeValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Fields required to build an [`Employee`].
#[derive(Debug, Clone)]
pub struct EmployeeDraft {
    pub id: EmployeeId,
    pub code: EmployeeCode,
    pub name: EmployeeName,
    pub cpf: Cpf,
    pub status: RecordStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A person eligible to receive ticket allotments.
///
/// ## Invariants
/// - `code` and `cpf` are unique across all employees (enforced by the
///   services and backstopped by storage).
/// - `code` never changes after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    id: EmployeeId,
    code: EmployeeCode,
    name: EmployeeName,
    cpf: Cpf,
    status: RecordStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Employee {
    pub fn new(draft: EmployeeDraft) -> Self {
        let EmployeeDraft {
            id,
            code,
            name,
            cpf,
            status,
            created_at,
            updated_at,
        } = draft;
        Self {
            id,
            code,
            name,
            cpf,
            status,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> EmployeeId {
        self.id
    }

    pub fn code(&self) -> EmployeeCode {
        self.code
    }

    pub fn name(&self) -> &EmployeeName {
        &self.name
    }

    pub fn cpf(&self) -> &Cpf {
        &self.cpf
    }

    pub fn status(&self) -> RecordStatus {
        self.status
    }

    /// Whether new tickets may be issued to this employee.
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Apply validated changes and refresh `updated_at`.
    ///
    /// The code is never touched. Tickets already issued keep their own
    /// status regardless of the new employee status.
    pub fn apply(&mut self, changes: EmployeeChanges, now: DateTime<Utc>) {
        let EmployeeChanges { name, cpf, status } = changes;
        if let Some(name) = name {
            self.name = name;
        }
        if let Some(cpf) = cpf {
            self.cpf = cpf;
        }
        if let Some(status) = status {
            self.status = status;
        }
        self.updated_at = now;
    }
}
