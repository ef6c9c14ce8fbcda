use clap::Subcommand;

/// Exchange commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ExchangeCommands {
    /// Create an exchange.
    Create {
        #[arg(long)]
        trade_type: String,
    },
}
