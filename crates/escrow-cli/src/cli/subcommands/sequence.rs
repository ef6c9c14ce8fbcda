use clap::Subcommand;
use escrow_core::ids::DEAL_COUNTER;

/// Sequence counter commands.
#[derive(Clone, Debug, Subcommand)]
pub enum SequenceCommands {
    /// Show a counter's last allocated value.
    Current {
        #[arg(default_value = DEAL_COUNTER)]
        counter: String,
    },
}
