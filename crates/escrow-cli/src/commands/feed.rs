use escrow_core::responses::FeedResponse;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::FeedArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `escrow feed`.
pub async fn handle(args: &FeedArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let items = ctx.service.feed_for(&args.user).await?;
    let response = FeedResponse {
        user_id: args.user.clone(),
        items,
    };
    output(&response, flags.format)
}
