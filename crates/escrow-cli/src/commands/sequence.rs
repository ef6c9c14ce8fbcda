use escrow_core::responses::SequenceResponse;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::SequenceCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `escrow sequence`.
pub async fn handle(
    action: &SequenceCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        SequenceCommands::Current { counter } => {
            let seq = ctx.service.current_sequence(counter).await?;
            let response = SequenceResponse {
                counter: counter.clone(),
                seq,
            };
            output(&response, flags.format)
        }
    }
}
