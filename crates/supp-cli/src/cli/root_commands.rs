use clap::Subcommand;

use crate::cli::RecordArgs;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Get a suppression by id and SER id.
    Get { id: String, ser_id: String },
    /// List all suppressions, sorted by id.
    List,
    /// Create a suppression.
    Create(RecordArgs),
    /// Replace a suppression's fields.
    Update(RecordArgs),
    /// Delete a suppression.
    Delete { id: String, ser_id: String },
    /// Show the acting identity and archive settings.
    Whoami,
}
