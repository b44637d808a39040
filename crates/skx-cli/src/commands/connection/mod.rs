mod list;
mod respond;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ConnectionCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `skx connection`.
pub async fn handle(
    action: &ConnectionCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        ConnectionCommands::Request {
            from,
            to,
            event,
            message,
        } => {
            let connection = ctx
                .engine
                .request_connection(from, to, event.as_deref(), message.as_deref())
                .await?;
            output(&connection, flags.format)
        }
        ConnectionCommands::Respond {
            id,
            decision,
            responder,
        } => respond::run(id, decision, responder, ctx, flags).await,
        ConnectionCommands::Get { id, requester } => {
            output(&ctx.engine.get_connection(id, requester).await?, flags.format)
        }
        ConnectionCommands::List { user, status } => {
            list::run(user, status.as_deref(), ctx, flags).await
        }
    }
}
