//! Active/inactive status shared by employees and tickets.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Lifecycle status of an employee or a ticket.
///
/// The wire form is `"active"` / `"inactive"`. The single-letter codes
/// `"A"` / `"I"` used by older clients are accepted when parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordStatus {
    #[default]
    #[serde(alias = "A")]
    Active,
    #[serde(alias = "I")]
    Inactive,
}

/// Returned when a status string is neither active nor inactive.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("status must be 'active' or 'inactive', got '{value}'")]
pub struct ParseRecordStatusError {
    pub value: String,
}

impl RecordStatus {
    /// Stable storage and wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }

    pub fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordStatus {
    type Err = ParseRecordStatusError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed == "A" || trimmed.eq_ignore_ascii_case("active") {
            Ok(Self::Active)
        } else if trimmed == "I" || trimmed.eq_ignore_ascii_case("inactive") {
            Ok(Self::Inactive)
        } else {
            Err(ParseRecordStatusError {
                value: value.to_owned(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("active", RecordStatus::Active)]
    #[case("Inactive", RecordStatus::Inactive)]
    #[case("A", RecordStatus::Active)]
    #[case(" I ", RecordStatus::Inactive)]
    fn parses_words_and_legacy_codes(#[case] raw: &str, #[case] expected: RecordStatus) {
        assert_eq!(raw.parse::<RecordStatus>(), Ok(expected));
    }

    #[rstest]
    #[case("")]
    #[case("a")]
    #[case("suspended")]
    fn rejects_unknown_values(#[case] raw: &str) {
        let err = raw.parse::<RecordStatus>().expect_err("unknown status");
        assert_eq!(err.value, raw);
    }

    #[rstest]
    fn defaults_to_active() {
        assert_eq!(RecordStatus::default(), RecordStatus::Active);
    }

    #[rstest]
    fn legacy_codes_deserialise() {
        let status: RecordStatus = serde_json::from_str("\"I\"").expect("legacy code");
        assert_eq!(status, RecordStatus::Inactive);
        assert_eq!(
            serde_json::to_string(&status).expect("serialise"),
            "\"inactive\""
        );
    }
}
