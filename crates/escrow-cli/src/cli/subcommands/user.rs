use clap::Subcommand;

/// User commands.
#[derive(Clone, Debug, Subcommand)]
pub enum UserCommands {
    /// Register a user.
    Create { username: String },
    /// Get a user by ID.
    Get { id: String },
    /// Show a user with the reviews written about them.
    Profile { id: String },
}
