use clap::Subcommand;

/// Review and consensus commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ReviewCommands {
    /// Submit (or replace) a review for a completed session.
    Submit {
        #[arg(long)]
        session: String,
        #[arg(long)]
        teacher: String,
        #[arg(long)]
        learner: String,
        /// Session length in minutes.
        #[arg(long)]
        duration: u32,
        #[arg(long)]
        reviewer: String,
        /// Overall rating, 1 to 5.
        #[arg(long)]
        rating: u8,
        #[arg(long)]
        feedback: Option<String>,
        /// Skill the session covered (repeatable).
        #[arg(long = "covers")]
        covers: Vec<String>,
        /// Per-skill rating as `skill_id:rating` (repeatable). The skill
        /// must be one the session covered.
        #[arg(long)]
        skill: Vec<String>,
    },
    /// Reviews, average, and resolution for a session.
    Status { session: String },
}
