use clap::Subcommand;

/// User and skill-set commands.
#[derive(Clone, Debug, Subcommand)]
pub enum UserCommands {
    /// Onboard a user.
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        location: Option<String>,
        /// Skill the user can teach (repeatable).
        #[arg(long)]
        teach: Vec<String>,
        /// Skill the user wants to learn (repeatable).
        #[arg(long)]
        learn: Vec<String>,
    },
    /// Get a user by ID.
    Get { id: String },
    /// Replace a user's teach and learn sets.
    Skills {
        id: String,
        #[arg(long)]
        teach: Vec<String>,
        #[arg(long)]
        learn: Vec<String>,
    },
    /// Skill counts, active connections, and tokens earned.
    Stats { id: String },
    /// Reviews written and rewards received, newest first.
    History { id: String },
}
