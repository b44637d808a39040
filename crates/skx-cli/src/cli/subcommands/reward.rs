use clap::Subcommand;

/// Token ledger commands.
#[derive(Clone, Debug, Subcommand)]
pub enum RewardCommands {
    /// Grant a teacher tokens for a session. Idempotent per session.
    Issue {
        #[arg(long)]
        session: String,
        #[arg(long)]
        teacher: String,
        #[arg(long)]
        duration: u32,
    },
    /// Rewards received by a user, newest first.
    List { user: String },
    /// Total tokens a user has earned.
    Balance { user: String },
}
