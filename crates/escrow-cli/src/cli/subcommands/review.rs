use clap::Subcommand;

/// Review commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ReviewCommands {
    /// Review the counterparty of a deal.
    Create {
        #[arg(long)]
        author: String,
        #[arg(long)]
        deal: String,
        #[arg(long)]
        comment: String,
        /// 1 to 5.
        #[arg(long, allow_negative_numbers = true)]
        rating: i64,
    },
    /// List reviews written about a user.
    List {
        #[arg(long)]
        user: String,
    },
}
