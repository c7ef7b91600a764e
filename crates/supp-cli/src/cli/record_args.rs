use clap::Args;
use supp_core::entities::Suppression;

/// Every field of a suppression record as flags. Omitted flags are absent
/// values; `--description ""` is an empty value.
#[derive(Clone, Debug, Args)]
pub struct RecordArgs {
    /// Finding id (CVE, control id, or `*`)
    #[arg(long)]
    pub id: String,
    #[arg(long)]
    pub ser_id: String,
    #[arg(long)]
    pub finding_title: Option<String>,
    /// Derived from the product when it is Inspector or Security Hub
    #[arg(long)]
    pub finding_type: Option<String>,
    #[arg(long)]
    pub product_name: Option<String>,
    #[arg(long)]
    pub ser_link: Option<String>,
    #[arg(long)]
    pub due_date: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub account_exception: Option<String>,
    #[arg(long)]
    pub account_inclusion: Option<String>,
    #[arg(long)]
    pub from_severity: Option<String>,
    #[arg(long)]
    pub to_severity: Option<String>,
    #[arg(long)]
    pub resource_type: Option<String>,
    #[arg(long)]
    pub resource_pattern: Option<String>,
    #[arg(long)]
    pub extra_resource_pattern: Option<String>,
}

impl RecordArgs {
    #[must_use]
    pub fn into_record(self) -> Suppression {
        Suppression {
            id: self.id,
            ser_id: self.ser_id,
            finding_title: self.finding_title,
            finding_type: self.finding_type,
            product_name: self.product_name,
            ser_link: self.ser_link,
            due_date: self.due_date,
            description: self.description,
            account_exception: self.account_exception,
            account_inclusion: self.account_inclusion,
            from_severity: self.from_severity,
            to_severity: self.to_severity,
            resource_type: self.resource_type,
            resource_pattern: self.resource_pattern,
            extra_resource_pattern: self.extra_resource_pattern,
        }
    }
}
