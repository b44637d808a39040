use clap::Subcommand;

/// Chat room commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ChatCommands {
    /// Post a message.
    Send {
        room: String,
        #[arg(long = "as")]
        sender: String,
        #[arg(long)]
        message: String,
    },
    /// List messages, oldest first.
    List {
        room: String,
        #[arg(long = "as")]
        requester: String,
    },
}
