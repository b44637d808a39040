use crate::cli::GlobalFlags;
use crate::cli::subcommands::MatchCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `skx match`.
pub async fn handle(action: &MatchCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        MatchCommands::List { user } => {
            let matches = ctx.engine.find_matches(user, flags.limit).await?;
            tracing::debug!(user_id = %user, count = matches.len(), "matches ranked");
            output(&matches, flags.format)
        }
    }
}
