use clap::{Args, Subcommand};

use super::subcommands::{
    DealCommands, ExchangeCommands, ReviewCommands, SequenceCommands, UserCommands,
};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Users.
    User {
        #[command(subcommand)]
        action: UserCommands,
    },
    /// Exchanges that deals settle.
    Exchange {
        #[command(subcommand)]
        action: ExchangeCommands,
    },
    /// Deals between a seller and a buyer.
    Deal {
        #[command(subcommand)]
        action: DealCommands,
    },
    /// Reviews left after a deal.
    Review {
        #[command(subcommand)]
        action: ReviewCommands,
    },
    /// Record a notification for a user.
    Notify(NotifyArgs),
    /// Show a user's notification feed, newest first.
    Feed(FeedArgs),
    /// Named sequence counters.
    Sequence {
        #[command(subcommand)]
        action: SequenceCommands,
    },
    /// Print the JSON schema of an entity or response type.
    Schema(SchemaArgs),
}

#[derive(Clone, Debug, Args)]
pub struct NotifyArgs {
    /// Recipient user ID.
    #[arg(long)]
    pub user: String,
    /// Deal the notification is about.
    #[arg(long)]
    pub deal: String,
    /// message, deal_created, deal_accepted, status_changed, review_received
    #[arg(long)]
    pub kind: String,
    /// User who triggered the event.
    #[arg(long)]
    pub sender: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct FeedArgs {
    /// User whose feed to show.
    pub user: String,
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Type name, e.g. `deal` or `feed-item`.
    pub type_name: String,
}
