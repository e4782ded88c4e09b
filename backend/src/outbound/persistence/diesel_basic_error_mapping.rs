//! Diesel and pool error mapping for the complaint repository.
//!
//! Database detail is logged at `debug` and replaced by a short fixed
//! message, so driver text never reaches the domain error.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::ComplaintRepositoryError;

use super::pool::PoolError;

/// Pool failures always mean the store is unreachable.
pub(crate) fn map_pool_error(error: PoolError) -> ComplaintRepositoryError {
    debug!(%error, "complaint pool checkout failed");
    ComplaintRepositoryError::connection(error.message())
}

/// Map a Diesel error into a connection or query failure.
pub(crate) fn map_diesel_error(error: DieselError) -> ComplaintRepositoryError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _)
        | DieselError::BrokenTransactionManager => {
            ComplaintRepositoryError::connection("database connection error")
        }
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            ComplaintRepositoryError::query("duplicate complaint id")
        }
        DieselError::DatabaseError(DatabaseErrorKind::CheckViolation, _) => {
            ComplaintRepositoryError::query("complaint row violates a table constraint")
        }
        DieselError::NotFound => ComplaintRepositoryError::query("record not found"),
        DieselError::QueryBuilderError(_) => {
            ComplaintRepositoryError::query("database query error")
        }
        _ => ComplaintRepositoryError::query("database error"),
    }
}

#[cfg(test)]
mod tests {
    use diesel::result::DatabaseErrorInformation;
    use rstest::rstest;

    use super::*;

    #[derive(Debug)]
    struct Info(&'static str);

    impl DatabaseErrorInformation for Info {
        fn message(&self) -> &str {
            self.0
        }
        fn details(&self) -> Option<&str> {
            None
        }
        fn hint(&self) -> Option<&str> {
            None
        }
        fn table_name(&self) -> Option<&str> {
            Some("complaints")
        }
        fn column_name(&self) -> Option<&str> {
            None
        }
        fn constraint_name(&self) -> Option<&str> {
            None
        }
        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn database_error(kind: DatabaseErrorKind) -> DieselError {
        DieselError::DatabaseError(kind, Box::new(Info("driver detail")))
    }

    #[rstest]
    fn pool_errors_become_connection_errors() {
        let error = map_pool_error(PoolError::checkout("timed out"));

        assert_eq!(error, ComplaintRepositoryError::connection("timed out"));
    }

    #[rstest]
    #[case::closed(database_error(DatabaseErrorKind::ClosedConnection), true)]
    #[case::unique(database_error(DatabaseErrorKind::UniqueViolation), false)]
    #[case::check(database_error(DatabaseErrorKind::CheckViolation), false)]
    #[case::not_found(DieselError::NotFound, false)]
    #[case::rollback(DieselError::RollbackTransaction, false)]
    fn diesel_errors_map_by_kind(#[case] error: DieselError, #[case] is_connection: bool) {
        let mapped = map_diesel_error(error);

        assert_eq!(
            matches!(mapped, ComplaintRepositoryError::Connection { .. }),
            is_connection
        );
        assert!(!mapped.to_string().contains("driver detail"));
    }
}
