use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::User { action } => commands::user::handle(&action, ctx, flags).await,
        Commands::Exchange { action } => commands::exchange::handle(&action, ctx, flags).await,
        Commands::Deal { action } => commands::deal::handle(&action, ctx, flags).await,
        Commands::Review { action } => commands::review::handle(&action, ctx, flags).await,
        Commands::Notify(args) => commands::notify::handle(&args, ctx, flags).await,
        Commands::Feed(args) => commands::feed::handle(&args, ctx, flags).await,
        Commands::Sequence { action } => commands::sequence::handle(&action, ctx, flags).await,
        Commands::Schema(args) => commands::schema::handle(&args, flags),
    }
}
