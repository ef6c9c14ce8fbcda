use crate::cli::GlobalFlags;
use crate::cli::subcommands::ReviewCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `escrow review`.
pub async fn handle(
    action: &ReviewCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        ReviewCommands::Create {
            author,
            deal,
            comment,
            rating,
        } => {
            let review = ctx
                .service
                .create_review(author, deal, comment, *rating)
                .await?;
            output(&review, flags.format)
        }
        ReviewCommands::List { user } => {
            let reviews = ctx.service.reviews_for_user(user).await?;
            output(&reviews, flags.format)
        }
    }
}
