use clap::Subcommand;

/// Match commands.
#[derive(Clone, Debug, Subcommand)]
pub enum MatchCommands {
    /// Rank potential exchange partners for a user, best first.
    List { user: String },
}
