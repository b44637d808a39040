use clap::Subcommand;

use crate::cli::subcommands::{
    ChatCommands, ConnectionCommands, EventCommands, MatchCommands, ReviewCommands,
    RewardCommands, UserCommands,
};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Users and their skill sets.
    User {
        #[command(subcommand)]
        action: UserCommands,
    },
    /// Potential exchange partners.
    Match {
        #[command(subcommand)]
        action: MatchCommands,
    },
    /// Hosted learn/teach events.
    Event {
        #[command(subcommand)]
        action: EventCommands,
    },
    /// Connection requests and responses.
    Connection {
        #[command(subcommand)]
        action: ConnectionCommands,
    },
    /// Messages inside an accepted connection.
    Chat {
        #[command(subcommand)]
        action: ChatCommands,
    },
    /// Post-session reviews and consensus.
    Review {
        #[command(subcommand)]
        action: ReviewCommands,
    },
    /// Token rewards and balances.
    Reward {
        #[command(subcommand)]
        action: RewardCommands,
    },
    /// Print the effective configuration.
    Config,
}

