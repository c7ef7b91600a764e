use serde_json::json;

use crate::cli::{GlobalFlags, RecordArgs};
use crate::context::AppContext;
use crate::output::output;

pub async fn run(args: RecordArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let record = ctx.service.create(&ctx.request, args.into_record()).await?;
    output(&json!({ "created": record }), flags.format)
}
