//! Row parsing helpers.

use crate::error::DatabaseError;

/// Read a nullable TEXT column.
///
/// `row.get::<String>(idx)` on a NULL column returns an error, not `""`, so
/// nullable columns go through `Option<String>`. Empty strings are returned
/// as stored; whether they count as a value is up to the caller.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_opt_string(row: &libsql::Row, idx: i32) -> Result<Option<String>, DatabaseError> {
    Ok(row.get::<Option<String>>(idx)?)
}

/// Read a required TEXT column.
///
/// # Errors
///
/// Returns `DatabaseError` if the column is NULL or not text.
pub fn get_string(row: &libsql::Row, idx: i32) -> Result<String, DatabaseError> {
    Ok(row.get::<String>(idx)?)
}
