//! Shared parsing helpers for inbound HTTP adapters.

use crate::domain::{EmployeeId, Error};

/// Parse the `{id}` path segment of employee routes.
pub(crate) fn parse_employee_id(raw: &str) -> Result<EmployeeId, Error> {
    raw.parse::<EmployeeId>().map_err(Error::from)
}

/// Treat blank query parameters as absent.
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    fn malformed_path_id_is_invalid_field() {
        let err = parse_employee_id("not-a-uuid").expect_err("malformed id");
        assert_eq!(err.code(), ErrorCode::InvalidField);
        assert_eq!(err.field(), Some("id"));
    }

    #[rstest]
    fn well_formed_path_id_parses() {
        let id = EmployeeId::random();
        assert_eq!(parse_employee_id(&id.to_string()).expect("uuid"), id);
    }

    #[rstest]
    #[case(None, None)]
    #[case(Some("   "), None)]
    #[case(Some(" 2024-05-01 "), Some("2024-05-01"))]
    fn blank_parameters_are_absent(#[case] raw: Option<&str>, #[case] expected: Option<&str>) {
        assert_eq!(non_blank(raw), expected);
    }
}
