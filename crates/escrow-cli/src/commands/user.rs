use crate::cli::GlobalFlags;
use crate::cli::subcommands::UserCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `escrow user`.
pub async fn handle(
    action: &UserCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        UserCommands::Create { username } => {
            let user = ctx.service.create_user(username).await?;
            output(&user, flags.format)
        }
        UserCommands::Get { id } => {
            let user = ctx.service.get_user(id).await?;
            output(&user, flags.format)
        }
        UserCommands::Profile { id } => {
            let profile = ctx.service.user_profile(id).await?;
            output(&profile, flags.format)
        }
    }
}
