use clap::Subcommand;

/// Hosted learn/teach events.
#[derive(Clone, Debug, Subcommand)]
pub enum EventCommands {
    /// Publish an event. The skill joins the catalog if it is new.
    Create {
        #[arg(long)]
        host: String,
        /// learn | teach
        #[arg(long = "type")]
        event_type: String,
        #[arg(long)]
        skill: String,
        /// beginner | intermediate | advanced
        #[arg(long)]
        level: String,
        #[arg(long)]
        description: String,
        /// Calendar date, `YYYY-MM-DD` (UTC).
        #[arg(long)]
        date: String,
        /// Start time, `HH:MM` (UTC).
        #[arg(long)]
        time: String,
        /// Length in minutes.
        #[arg(long, default_value_t = 60)]
        duration: u32,
    },
    /// Get one event.
    Get { id: String },
    /// List events, newest first.
    List {
        /// learn | teach
        #[arg(long = "type")]
        event_type: Option<String>,
        /// beginner | intermediate | advanced
        #[arg(long)]
        level: Option<String>,
        /// Case-insensitive match on description or skill name.
        #[arg(long)]
        search: Option<String>,
    },
}
