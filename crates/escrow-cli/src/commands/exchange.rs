use crate::cli::GlobalFlags;
use crate::cli::subcommands::ExchangeCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `escrow exchange`.
pub async fn handle(
    action: &ExchangeCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        ExchangeCommands::Create { trade_type } => {
            let exchange = ctx.service.create_exchange(trade_type).await?;
            output(&exchange, flags.format)
        }
    }
}
