use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Get { id, ser_id } => commands::get::run(&id, &ser_id, ctx, flags).await,
        Commands::List => commands::list::run(ctx, flags).await,
        Commands::Create(args) => commands::create::run(args, ctx, flags).await,
        Commands::Update(args) => commands::update::run(args, ctx, flags).await,
        Commands::Delete { id, ser_id } => commands::delete::run(&id, &ser_id, ctx, flags).await,
        Commands::Whoami => commands::whoami::run(ctx, flags),
    }
}
