//! Field-level diff engine.
//!
//! Walks a record type's [`Auditable::fields`] table and compares the old and
//! new versions field by field. The result is a [`ChangeSet`] in declaration
//! order.

use serde_json::Value;
use supp_config::AuditConfig;
use supp_core::changes::{ChangeSet, FieldChange};
use supp_core::enums::AuditAction;
use supp_core::fields::{Auditable, FieldDescriptor};

/// How blank strings take part in a diff.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BlankPolicy {
    /// An empty or whitespace-only string is a value like any other.
    #[default]
    Distinct,
    /// An empty or whitespace-only string counts as "no value".
    Absent,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffOptions {
    pub blank: BlankPolicy,
}

impl DiffOptions {
    #[must_use]
    pub const fn with_blank(blank: BlankPolicy) -> Self {
        Self { blank }
    }
}

impl From<&AuditConfig> for DiffOptions {
    fn from(config: &AuditConfig) -> Self {
        let blank = if config.blank_as_absent {
            BlankPolicy::Absent
        } else {
            BlankPolicy::Distinct
        };
        Self { blank }
    }
}

/// Diff two versions of a record with default options.
///
/// See [`compute_diff_with`].
#[must_use]
pub fn compute_diff<T: Auditable>(
    old: Option<&T>,
    new: Option<&T>,
    action: AuditAction,
) -> ChangeSet {
    compute_diff_with(old, new, action, &DiffOptions::default())
}

/// Diff two versions of a record.
///
/// - `Create` includes every field whose new value is present, as
///   `(None, new)`.
/// - `Delete` includes every field whose old value is present, as
///   `(old, None)`.
/// - `Update` includes every field whose values differ, as `(old, new)`.
///
/// A missing version reads as "no value" for every field. A field whose
/// reader fails is logged and left out; the rest of the set is returned.
#[must_use]
pub fn compute_diff_with<T: Auditable>(
    old: Option<&T>,
    new: Option<&T>,
    action: AuditAction,
    options: &DiffOptions,
) -> ChangeSet {
    let mut changes = ChangeSet::new();
    if old.is_none() && new.is_none() {
        return changes;
    }

    for field in T::fields() {
        let Some(before) = read_field(field, old, options) else {
            continue;
        };
        let Some(after) = read_field(field, new, options) else {
            continue;
        };

        let include = match action {
            AuditAction::Create => after.is_some(),
            AuditAction::Delete => before.is_some(),
            AuditAction::Update => before != after,
        };
        if !include {
            continue;
        }

        let change = match action {
            AuditAction::Create => FieldChange::new(field.name, None, after),
            AuditAction::Delete => FieldChange::new(field.name, before, None),
            AuditAction::Update => FieldChange::new(field.name, before, after),
        };
        if !changes.insert(change) {
            tracing::warn!(field = field.name, "duplicate field in descriptor table; keeping first");
        }
    }

    changes
}

/// Read one field from an optional record.
///
/// The outer `Option` is `None` when the read failed and the field must be
/// skipped. The inner `Option` is the normalized value.
fn read_field<T: Auditable>(
    field: &FieldDescriptor<T>,
    record: Option<&T>,
    options: &DiffOptions,
) -> Option<Option<Value>> {
    let Some(record) = record else {
        return Some(None);
    };
    match (field.read)(record) {
        Ok(value) => Some(normalize(value, options.blank)),
        Err(error) => {
            tracing::warn!(field = field.name, %error, "failed to read field; skipping");
            None
        }
    }
}

fn normalize(value: Option<Value>, blank: BlankPolicy) -> Option<Value> {
    match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if blank == BlankPolicy::Absent && s.trim().is_empty() => None,
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;
    use supp_core::entities::Suppression;
    use supp_core::fields::{FieldReadError, field_names, json, opt_text, text};

    use super::*;

    fn inspector_record() -> Suppression {
        Suppression {
            product_name: Some("Inspector".into()),
            ser_link: Some("https://ser.example.com/SER-100".into()),
            resource_type: Some("AwsEc2Instance".into()),
            ..Suppression::new("CVE-2024-1", "SER-100")
        }
    }

    fn non_null_fields(record: &Suppression) -> Vec<(&'static str, Value)> {
        Suppression::fields()
            .iter()
            .filter_map(|f| {
                let value = (f.read)(record).ok().flatten()?;
                Some((f.name, value))
            })
            .collect()
    }

    #[test]
    fn create_contains_exactly_non_null_fields() {
        let record = inspector_record();
        let changes = compute_diff(None, Some(&record), AuditAction::Create);

        let expected = non_null_fields(&record);
        assert_eq!(changes.len(), expected.len());
        for (name, value) in expected {
            let change = changes.get(name).expect("field present");
            assert_eq!(change.old, None);
            assert_eq!(change.new, Some(value));
        }
    }

    #[test]
    fn delete_contains_exactly_non_null_fields() {
        let record = inspector_record();
        let changes = compute_diff(Some(&record), None, AuditAction::Delete);

        let expected = non_null_fields(&record);
        assert_eq!(changes.len(), expected.len());
        for (name, value) in expected {
            let change = changes.get(name).expect("field present");
            assert_eq!(change.old, Some(value));
            assert_eq!(change.new, None);
        }
    }

    #[test]
    fn update_of_identical_records_is_empty() {
        let record = inspector_record();
        let changes = compute_diff(Some(&record), Some(&record.clone()), AuditAction::Update);
        assert!(changes.is_empty());
    }

    #[test]
    fn update_contains_only_changed_field() {
        let old = inspector_record();
        let new = Suppression {
            product_name: Some("Security Hub".into()),
            ..old.clone()
        };

        let changes = compute_diff(Some(&old), Some(&new), AuditAction::Update);

        assert_eq!(changes.field_names(), vec!["productName"]);
        let change = changes.get("productName").unwrap();
        assert_eq!(change.old, Some(json!("Inspector")));
        assert_eq!(change.new, Some(json!("Security Hub")));
    }

    #[test]
    fn update_reports_cleared_and_added_fields() {
        let old = Suppression {
            description: Some("old text".into()),
            ..inspector_record()
        };
        let new = Suppression {
            description: None,
            due_date: Some("2025-01-31".into()),
            ..inspector_record()
        };

        let changes = compute_diff(Some(&old), Some(&new), AuditAction::Update);

        assert_eq!(changes.field_names(), vec!["dueDate", "description"]);
        assert_eq!(
            changes.get("description").unwrap().new,
            None,
            "cleared field maps to the null-sentinel"
        );
        assert_eq!(changes.get("dueDate").unwrap().old, None);
    }

    #[test]
    fn create_scenario_with_two_fields() {
        let record = Suppression {
            product_name: Some("Inspector".into()),
            ..Suppression::new("CVE-1", "")
        };
        let changes = compute_diff_with(
            None,
            Some(&record),
            AuditAction::Create,
            &DiffOptions::with_blank(BlankPolicy::Absent),
        );

        assert_eq!(changes.field_names(), vec!["id", "productName"]);
        assert_eq!(changes.get("id").unwrap().new, Some(json!("CVE-1")));
    }

    #[test]
    fn changes_follow_declaration_order() {
        let record = inspector_record();
        let changes = compute_diff(None, Some(&record), AuditAction::Create);
        let declared = field_names::<Suppression>();

        let positions: Vec<usize> = changes
            .field_names()
            .iter()
            .map(|name| declared.iter().position(|d| d == name).unwrap())
            .collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted);
    }

    #[test]
    fn diff_is_idempotent() {
        let old = inspector_record();
        let new = Suppression {
            to_severity: Some("LOW".into()),
            ..old.clone()
        };
        let first = compute_diff(Some(&old), Some(&new), AuditAction::Update);
        let second = compute_diff(Some(&old), Some(&new), AuditAction::Update);
        assert_eq!(first, second);
    }

    #[rstest]
    #[case(AuditAction::Create)]
    #[case(AuditAction::Update)]
    #[case(AuditAction::Delete)]
    fn both_versions_missing_is_empty(#[case] action: AuditAction) {
        let changes = compute_diff::<Suppression>(None, None, action);
        assert!(changes.is_empty());
    }

    #[rstest]
    #[case(BlankPolicy::Distinct, true)]
    #[case(BlankPolicy::Absent, false)]
    fn blank_on_create_follows_policy(#[case] blank: BlankPolicy, #[case] included: bool) {
        let record = Suppression {
            description: Some(String::new()),
            ..inspector_record()
        };
        let changes = compute_diff_with(
            None,
            Some(&record),
            AuditAction::Create,
            &DiffOptions::with_blank(blank),
        );
        assert_eq!(changes.contains("description"), included);
    }

    #[rstest]
    #[case(BlankPolicy::Distinct, true)]
    #[case(BlankPolicy::Absent, false)]
    fn blank_to_missing_on_update_follows_policy(
        #[case] blank: BlankPolicy,
        #[case] included: bool,
    ) {
        let old = Suppression {
            description: Some("   ".into()),
            ..inspector_record()
        };
        let new = inspector_record();
        let changes = compute_diff_with(
            Some(&old),
            Some(&new),
            AuditAction::Update,
            &DiffOptions::with_blank(blank),
        );
        assert_eq!(changes.contains("description"), included);
    }

    #[test]
    fn options_follow_audit_config() {
        let config = AuditConfig {
            blank_as_absent: true,
            log_json: false,
        };
        assert_eq!(DiffOptions::from(&config).blank, BlankPolicy::Absent);
        assert_eq!(
            DiffOptions::from(&AuditConfig::default()).blank,
            BlankPolicy::Distinct
        );
    }

    // Record types whose field readers fail.

    struct Tagged {
        name: String,
        note: Option<String>,
        tags: HashMap<(u8, u8), String>,
    }

    static TAGGED_FIELDS: [FieldDescriptor<Tagged>; 3] = [
        FieldDescriptor {
            name: "name",
            read: |p| text(&p.name),
        },
        FieldDescriptor {
            name: "tags",
            read: |p| json(&p.tags),
        },
        FieldDescriptor {
            name: "note",
            read: |p| opt_text(p.note.as_deref()),
        },
    ];

    impl Auditable for Tagged {
        fn fields() -> &'static [FieldDescriptor<Self>] {
            &TAGGED_FIELDS
        }
    }

    #[test]
    fn failing_reader_is_skipped() {
        let tagged = Tagged {
            name: "tagged".into(),
            note: Some("kept".into()),
            tags: HashMap::from([((1, 2), "bad key".to_string())]),
        };

        let changes = compute_diff(None, Some(&tagged), AuditAction::Create);

        assert_eq!(changes.field_names(), vec!["name", "note"]);
    }

    struct Unreadable {
        name: String,
    }

    static UNREADABLE_FIELDS: [FieldDescriptor<Unreadable>; 2] = [
        FieldDescriptor {
            name: "broken",
            read: |_| Err(FieldReadError("unreadable".into())),
        },
        FieldDescriptor {
            name: "name",
            read: |u| text(&u.name),
        },
    ];

    impl Auditable for Unreadable {
        fn fields() -> &'static [FieldDescriptor<Self>] {
            &UNREADABLE_FIELDS
        }
    }

    #[rstest]
    #[case(AuditAction::Create)]
    #[case(AuditAction::Delete)]
    fn reader_error_is_skipped(#[case] action: AuditAction) {
        let record = Unreadable {
            name: "record".into(),
        };
        let (old, new) = match action {
            AuditAction::Delete => (Some(&record), None),
            _ => (None, Some(&record)),
        };

        let changes = compute_diff(old, new, action);

        assert_eq!(changes.field_names(), vec!["name"]);
    }

    #[test]
    fn reader_error_on_update_is_skipped() {
        let old = Unreadable { name: "a".into() };
        let new = Unreadable { name: "b".into() };

        let changes = compute_diff(Some(&old), Some(&new), AuditAction::Update);

        assert_eq!(changes.field_names(), vec!["name"]);
        assert_eq!(changes.get("name").unwrap().new, Some(json!("b")));
    }
}
