//! Diesel and pool error translation shared by the ledger repositories.
//!
//! Constraint violations are recognised by constraint name so that a
//! uniqueness race lost at write time surfaces as a port-level conflict
//! naming the colliding field.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

const CPF_CONSTRAINT: &str = "employees_cpf_key";
const CODE_CONSTRAINT: &str = "employees_code_key";
const TICKET_EMPLOYEE_CONSTRAINT: &str = "tickets_employee_id_fkey";

/// Map pool errors into a repository-specific connection error.
pub(crate) fn map_basic_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    connection(error.into_message())
}

/// Map the remaining Diesel failures into query or connection errors.
pub(crate) fn map_basic_diesel_error<E, Q, C>(error: DieselError, query: Q, connection: C) -> E
where
    Q: FnOnce(&'static str) -> E,
    C: FnOnce(&'static str) -> E,
{
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(%error, "diesel operation failed"),
    }

    match error {
        DieselError::NotFound => query("record not found"),
        DieselError::QueryBuilderError(_) => query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _)
        | DieselError::BrokenTransactionManager => connection("database connection error"),
        _ => query("database error"),
    }
}

/// Employee field guarded by the violated unique constraint, if any.
pub(crate) fn unique_violation_field(error: &DieselError) -> Option<&'static str> {
    let DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) = error else {
        return None;
    };
    let constraint = info.constraint_name().unwrap_or_default();
    let message = info.message();
    if constraint == CPF_CONSTRAINT || message.contains(CPF_CONSTRAINT) {
        Some("cpf")
    } else if constraint == CODE_CONSTRAINT || message.contains(CODE_CONSTRAINT) {
        Some("code")
    } else {
        debug!(constraint, message, "unrecognised unique violation");
        None
    }
}

/// Whether the error is the ticket-to-employee foreign key failing.
pub(crate) fn is_missing_employee(error: &DieselError) -> bool {
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
            info.constraint_name()
                .is_none_or(|name| name == TICKET_EMPLOYEE_CONSTRAINT)
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::result::DatabaseErrorInformation;
    use rstest::rstest;

    struct FakeInfo {
        message: &'static str,
        constraint: Option<&'static str>,
    }

    impl DatabaseErrorInformation for FakeInfo {
        fn message(&self) -> &str {
            self.message
        }

        fn details(&self) -> Option<&str> {
            None
        }

        fn hint(&self) -> Option<&str> {
            None
        }

        fn table_name(&self) -> Option<&str> {
            None
        }

        fn column_name(&self) -> Option<&str> {
            None
        }

        fn constraint_name(&self) -> Option<&str> {
            self.constraint
        }

        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn db_error(kind: DatabaseErrorKind, constraint: Option<&'static str>) -> DieselError {
        DieselError::DatabaseError(
            kind,
            Box::new(FakeInfo {
                message: "constraint violated",
                constraint,
            }),
        )
    }

    #[derive(Debug, PartialEq, Eq)]
    enum Mapped {
        Query(&'static str),
        Connection(&'static str),
    }

    #[rstest]
    #[case(Some(CPF_CONSTRAINT), Some("cpf"))]
    #[case(Some(CODE_CONSTRAINT), Some("code"))]
    #[case(Some("employees_pkey"), None)]
    fn unique_violations_resolve_to_fields(
        #[case] constraint: Option<&'static str>,
        #[case] expected: Option<&'static str>,
    ) {
        let error = db_error(DatabaseErrorKind::UniqueViolation, constraint);
        assert_eq!(unique_violation_field(&error), expected);
    }

    #[rstest]
    fn unique_violation_falls_back_to_message() {
        let error = DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new(FakeInfo {
                message: "duplicate key value violates unique constraint \"employees_cpf_key\"",
                constraint: None,
            }),
        );
        assert_eq!(unique_violation_field(&error), Some("cpf"));
    }

    #[rstest]
    fn foreign_key_violation_means_missing_employee() {
        let error = db_error(
            DatabaseErrorKind::ForeignKeyViolation,
            Some(TICKET_EMPLOYEE_CONSTRAINT),
        );
        assert!(is_missing_employee(&error));
        assert!(!is_missing_employee(&DieselError::NotFound));
    }

    #[rstest]
    fn closed_connection_maps_to_connection() {
        let error = db_error(DatabaseErrorKind::ClosedConnection, None);
        let mapped = map_basic_diesel_error(error, Mapped::Query, Mapped::Connection);
        assert_eq!(mapped, Mapped::Connection("database connection error"));
    }

    #[rstest]
    fn other_failures_map_to_query() {
        let mapped = map_basic_diesel_error(DieselError::NotFound, Mapped::Query, Mapped::Connection);
        assert_eq!(mapped, Mapped::Query("record not found"));
    }

    #[rstest]
    fn pool_errors_keep_their_message() {
        let mapped = map_basic_pool_error(PoolError::checkout("timed out"), |message| message);
        assert_eq!(mapped, "timed out");
    }
}
