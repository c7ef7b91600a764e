use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::Product;
use crate::fields::{Auditable, FieldDescriptor, opt_text, text};

/// A security-finding exception, keyed by `(id, ser_id)`.
///
/// `id` is the finding identifier (CVE, control id, or `*`); `ser_id` is the
/// security exception request the suppression belongs to and acts as the
/// grouping key in audit records.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Suppression {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub ser_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finding_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finding_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ser_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_exception: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_inclusion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_severity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_severity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_resource_pattern: Option<String>,
}

impl Suppression {
    #[must_use]
    pub fn new(id: impl Into<String>, ser_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ser_id: ser_id.into(),
            ..Self::default()
        }
    }

    /// The product this record targets, if it is one with a fixed finding type.
    #[must_use]
    pub fn product(&self) -> Option<Product> {
        self.product_name.as_deref().and_then(Product::from_name)
    }

    /// Set `finding_type` from the product name. Unknown products are left as-is.
    pub fn derive_finding_type(&mut self) {
        if let Some(product) = self.product() {
            self.finding_type = Some(product.finding_type().to_string());
        }
    }
}

impl fmt::Display for Suppression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "id: {} | ser_id: {}", self.id, self.ser_id)
    }
}

static SUPPRESSION_FIELDS: &[FieldDescriptor<Suppression>] = &[
    FieldDescriptor { name: "id", read: |s| text(&s.id) },
    FieldDescriptor { name: "serId", read: |s| text(&s.ser_id) },
    FieldDescriptor { name: "findingTitle", read: |s| opt_text(s.finding_title.as_deref()) },
    FieldDescriptor { name: "findingType", read: |s| opt_text(s.finding_type.as_deref()) },
    FieldDescriptor { name: "productName", read: |s| opt_text(s.product_name.as_deref()) },
    FieldDescriptor { name: "serLink", read: |s| opt_text(s.ser_link.as_deref()) },
    FieldDescriptor { name: "dueDate", read: |s| opt_text(s.due_date.as_deref()) },
    FieldDescriptor { name: "description", read: |s| opt_text(s.description.as_deref()) },
    FieldDescriptor {
        name: "accountException",
        read: |s| opt_text(s.account_exception.as_deref()),
    },
    FieldDescriptor {
        name: "accountInclusion",
        read: |s| opt_text(s.account_inclusion.as_deref()),
    },
    FieldDescriptor { name: "fromSeverity", read: |s| opt_text(s.from_severity.as_deref()) },
    FieldDescriptor { name: "toSeverity", read: |s| opt_text(s.to_severity.as_deref()) },
    FieldDescriptor { name: "resourceType", read: |s| opt_text(s.resource_type.as_deref()) },
    FieldDescriptor {
        name: "resourcePattern",
        read: |s| opt_text(s.resource_pattern.as_deref()),
    },
    FieldDescriptor {
        name: "extraResourcePattern",
        read: |s| opt_text(s.extra_resource_pattern.as_deref()),
    },
];

impl Auditable for Suppression {
    fn fields() -> &'static [FieldDescriptor<Self>] {
        SUPPRESSION_FIELDS
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::fields::field_names;

    #[test]
    fn field_table_is_ordered_and_unique() {
        let names = field_names::<Suppression>();
        assert_eq!(
            names,
            vec![
                "id",
                "serId",
                "findingTitle",
                "findingType",
                "productName",
                "serLink",
                "dueDate",
                "description",
                "accountException",
                "accountInclusion",
                "fromSeverity",
                "toSeverity",
                "resourceType",
                "resourcePattern",
                "extraResourcePattern",
            ]
        );
        let unique: HashSet<_> = names.iter().collect();
        assert_eq!(unique.len(), names.len());
    }

    #[test]
    fn readers_return_field_values() {
        let mut record = Suppression::new("CVE-1", "SER-1");
        record.due_date = Some("2025-01-01".into());

        let read = |name: &str| {
            let field = Suppression::fields()
                .iter()
                .find(|f| f.name == name)
                .unwrap();
            (field.read)(&record).unwrap()
        };
        assert_eq!(read("id"), Some(serde_json::json!("CVE-1")));
        assert_eq!(read("dueDate"), Some(serde_json::json!("2025-01-01")));
        assert_eq!(read("description"), None);
    }

    #[test]
    fn derive_finding_type_from_product() {
        let mut record = Suppression::new("CVE-1", "SER-1");
        record.product_name = Some("inspector".into());
        record.derive_finding_type();
        assert_eq!(record.finding_type.as_deref(), Some("Vulnerabilities"));

        record.product_name = Some("Security Hub".into());
        record.derive_finding_type();
        assert_eq!(
            record.finding_type.as_deref(),
            Some("Industry and Regulatory Standards")
        );
    }

    #[test]
    fn unknown_product_keeps_finding_type() {
        let mut record = Suppression::new("CVE-1", "SER-1");
        record.product_name = Some("GuardDuty".into());
        record.finding_type = Some("Threats".into());
        record.derive_finding_type();
        assert_eq!(record.finding_type.as_deref(), Some("Threats"));
    }

    #[test]
    fn padded_product_name_keeps_finding_type() {
        let mut record = Suppression::new("CVE-1", "SER-1");
        record.product_name = Some(" Inspector ".into());
        record.derive_finding_type();
        assert_eq!(record.product(), None);
        assert_eq!(record.finding_type, None);
    }

    #[test]
    fn display_shows_keys() {
        assert_eq!(
            Suppression::new("CVE-1", "SER-1").to_string(),
            "id: CVE-1 | ser_id: SER-1"
        );
    }

    #[test]
    fn deserializes_with_missing_optional_fields() {
        let record: Suppression =
            serde_json::from_str(r#"{"id":"CVE-1","ser_id":"SER-1","product_name":"Inspector"}"#)
                .unwrap();
        assert_eq!(record.product_name.as_deref(), Some("Inspector"));
        assert_eq!(record.finding_title, None);
    }
}
