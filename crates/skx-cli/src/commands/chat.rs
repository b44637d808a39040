use crate::cli::GlobalFlags;
use crate::cli::subcommands::ChatCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `skx chat`.
pub async fn handle(action: &ChatCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        ChatCommands::Send {
            room,
            sender,
            message,
        } => output(
            &ctx.engine.send_message(room, sender, message).await?,
            flags.format,
        ),
        ChatCommands::List { room, requester } => output(
            &ctx.engine.list_messages(room, requester, flags.limit).await?,
            flags.format,
        ),
    }
}
