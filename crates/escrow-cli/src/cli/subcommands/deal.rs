use clap::Subcommand;

/// Deal commands.
#[derive(Clone, Debug, Subcommand)]
pub enum DealCommands {
    /// Create a deal and assign it the next deal number.
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        seller: String,
        #[arg(long)]
        buyer: String,
        #[arg(long)]
        exchange: Option<String>,
    },
    /// Get a deal by record ID, or by deal number with `--number`.
    Get {
        id: String,
        #[arg(long)]
        number: bool,
    },
    /// List deals a user takes part in.
    List {
        #[arg(long)]
        user: String,
    },
    /// Accept a deal on the caller's side.
    Accept {
        id: String,
        #[arg(long)]
        user: String,
    },
    /// Set a deal's status label.
    Status {
        id: String,
        #[arg(long)]
        user: String,
        #[arg(long)]
        status: String,
    },
    /// Show a user's role in a deal.
    Role {
        id: String,
        #[arg(long)]
        user: String,
    },
}
