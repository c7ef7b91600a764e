//! Input validation for suppression records.
//!
//! Validation treats blank strings (empty after trimming) the same as a
//! missing value. The diff engine does not; see `BlankPolicy` in `supp-audit`.

use crate::entities::Suppression;
use crate::enums::Product;
use crate::errors::CoreError;

const WILDCARD: &str = "*";

/// `true` if the value is missing or whitespace-only.
#[must_use]
pub fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}

fn require(value: Option<&str>, message: &str) -> Result<(), CoreError> {
    if is_blank(value) {
        return Err(CoreError::Validation(message.to_string()));
    }
    Ok(())
}

/// Rules a record must satisfy before it is created.
///
/// # Errors
///
/// Returns [`CoreError::Validation`] naming the first failing rule.
pub fn validate_for_create(record: &Suppression) -> Result<(), CoreError> {
    require(Some(&record.id), "A record id (id field) is required.")?;
    require(Some(&record.ser_id), "A SER id (ser_id field) is required.")?;
    require(record.ser_link.as_deref(), "A SER link (ser_link field) is required.")?;
    require(
        record.product_name.as_deref(),
        "A product name (product_name field) is required.",
    )?;
    validate_product_rules(record)
}

/// Rules a record must satisfy before it replaces a stored version.
///
/// # Errors
///
/// Returns [`CoreError::Validation`] naming the first failing rule.
pub fn validate_for_update(record: &Suppression) -> Result<(), CoreError> {
    require(Some(&record.ser_id), "A SER id (ser_id field) is required.")?;
    require(record.ser_link.as_deref(), "A SER link (ser_link field) is required.")?;
    require(
        record.finding_title.as_deref(),
        "A finding title (finding_title field) is required.",
    )?;
    require(
        record.product_name.as_deref(),
        "A product name (product_name field) is required.",
    )?;
    require(record.due_date.as_deref(), "A due date (due_date field) is required.")?;
    validate_product_rules(record)
}

fn validate_product_rules(record: &Suppression) -> Result<(), CoreError> {
    match record.product() {
        Some(Product::Inspector) => validate_inspector(record),
        _ => Ok(()),
    }
}

/// Inspector-specific id and resource rules.
///
/// # Errors
///
/// Returns [`CoreError::Validation`] naming the first failing rule.
pub fn validate_inspector(record: &Suppression) -> Result<(), CoreError> {
    let id = record.id.trim();
    if id.is_empty() {
        return Err(CoreError::Validation("Vulnerability ID is required".into()));
    }

    if id
        .chars()
        .any(|c| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '*' | ',')))
    {
        return Err(CoreError::Validation(
            "ID contains invalid characters. Only alphanumeric, hyphens, commas, and asterisk are allowed."
                .into(),
        ));
    }

    if id.contains(WILDCARD) && id != WILDCARD {
        return Err(CoreError::Validation(
            "Partial wildcards (CVE-*, CWE-*) not allowed in ID. Use exact CVE/CWE or * only."
                .into(),
        ));
    }

    let pattern = record.resource_pattern.as_deref();
    let resource_type = record.resource_type.as_deref();

    if id == WILDCARD && pattern.is_some_and(|p| !p.trim().is_empty() && p.contains(WILDCARD)) {
        return Err(CoreError::Validation(
            "ResourcePattern must be exact ARN when ID is *. Wildcards not allowed.".into(),
        ));
    }

    if resource_type.is_some_and(|t| t.contains(WILDCARD)) {
        return Err(CoreError::Validation(
            "Wildcards not allowed in ResourceType".into(),
        ));
    }

    if is_blank(pattern) && is_blank(resource_type) {
        return Err(CoreError::Validation(
            "Provide ResourcePattern or ResourceType".into(),
        ));
    }

    Ok(())
}
