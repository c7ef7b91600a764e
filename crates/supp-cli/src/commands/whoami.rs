use serde_json::json;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub fn run(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let actor = ctx.request.current_actor()?;
    let archive = &ctx.config.archive;
    output(
        &json!({
            "actor": actor,
            "archive": {
                "enabled": archive.enabled,
                "bucket": archive.bucket_name,
                "region": archive.region,
            },
            "blankAsAbsent": ctx.config.audit.blank_as_absent,
        }),
        flags.format,
    )
}
