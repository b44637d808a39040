use clap::Subcommand;

/// Connection lifecycle commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ConnectionCommands {
    /// Ask another user to connect.
    Request {
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
        #[arg(long)]
        event: Option<String>,
        #[arg(long)]
        message: Option<String>,
    },
    /// Accept or reject a pending request (recipient only).
    Respond {
        id: String,
        /// accepted | rejected
        decision: String,
        #[arg(long = "as")]
        responder: String,
    },
    /// Get a connection and its chat room.
    Get {
        id: String,
        #[arg(long = "as")]
        requester: String,
    },
    /// List a user's connections, newest first.
    List {
        user: String,
        /// pending | accepted | rejected
        #[arg(long)]
        status: Option<String>,
    },
}
