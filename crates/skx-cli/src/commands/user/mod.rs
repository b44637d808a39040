mod create;
mod skills;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::UserCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `skx user`.
pub async fn handle(action: &UserCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        UserCommands::Create {
            name,
            location,
            teach,
            learn,
        } => create::run(name, location.as_deref(), teach, learn, ctx, flags).await,
        UserCommands::Get { id } => output(&ctx.engine.get_user(id).await?, flags.format),
        UserCommands::Skills { id, teach, learn } => skills::run(id, teach, learn, ctx, flags).await,
        UserCommands::Stats { id } => output(&ctx.engine.user_stats(id).await?, flags.format),
        UserCommands::History { id } => {
            output(&ctx.engine.session_history(id).await?, flags.format)
        }
    }
}
