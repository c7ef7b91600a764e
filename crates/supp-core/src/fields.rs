//! Static field descriptor tables for auditable records.
//!
//! Each record type declares an ordered list of `(name, reader)` pairs. The
//! diff engine walks this list instead of discovering accessors at runtime,
//! so field order is the declaration order and every accessor is checked at
//! compile time.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// A single field could not be read as JSON.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct FieldReadError(pub String);

/// Reads one field of `T`. `Ok(None)` means the field holds no value.
pub type FieldReader<T> = fn(&T) -> Result<Option<Value>, FieldReadError>;

/// One entry in a record type's field table.
pub struct FieldDescriptor<T: 'static> {
    /// Field name as it appears in change-sets (camelCase).
    pub name: &'static str,
    pub read: FieldReader<T>,
}

impl<T> std::fmt::Debug for FieldDescriptor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// A record type whose mutations can be diffed field by field.
pub trait Auditable: Sized + 'static {
    /// The canonical, ordered field table. Names must be unique.
    fn fields() -> &'static [FieldDescriptor<Self>];
}

/// Field names of `T` in canonical order.
#[must_use]
pub fn field_names<T: Auditable>() -> Vec<&'static str> {
    T::fields().iter().map(|field| field.name).collect()
}

/// Reader helper for a required text field.
///
/// # Errors
///
/// Never fails; the signature matches [`FieldReader`].
#[allow(clippy::unnecessary_wraps)]
pub fn text(value: &str) -> Result<Option<Value>, FieldReadError> {
    Ok(Some(Value::String(value.to_owned())))
}

/// Reader helper for an optional text field.
///
/// # Errors
///
/// Never fails; the signature matches [`FieldReader`].
#[allow(clippy::unnecessary_wraps)]
pub fn opt_text(value: Option<&str>) -> Result<Option<Value>, FieldReadError> {
    Ok(value.map(|v| Value::String(v.to_owned())))
}

/// Reader helper for any serializable field. JSON `null` maps to no value.
///
/// # Errors
///
/// Returns [`FieldReadError`] if the value cannot be represented as JSON
/// (for example a map with non-string keys).
pub fn json<S: Serialize + ?Sized>(value: &S) -> Result<Option<Value>, FieldReadError> {
    match serde_json::to_value(value) {
        Ok(Value::Null) => Ok(None),
        Ok(v) => Ok(Some(v)),
        Err(error) => Err(FieldReadError(error.to_string())),
    }
}
