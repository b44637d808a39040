use serde::Serialize;
use skx_core::entities::TokenReward;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::RewardCommands;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct IssueResponse {
    reward: TokenReward,
    created: bool,
}

#[derive(Debug, Serialize)]
struct BalanceResponse<'a> {
    user_id: &'a str,
    balance: i64,
}

/// Handle `skx reward`.
pub async fn handle(action: &RewardCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        RewardCommands::Issue {
            session,
            teacher,
            duration,
        } => {
            let issued = ctx.engine.issue_reward(session, teacher, *duration).await?;
            output(
                &IssueResponse {
                    reward: issued.value,
                    created: issued.created,
                },
                flags.format,
            )
        }
        RewardCommands::List { user } => output(&ctx.engine.list_rewards(user).await?, flags.format),
        RewardCommands::Balance { user } => {
            let balance = ctx.engine.token_balance(user).await?;
            output(
                &BalanceResponse {
                    user_id: user,
                    balance,
                },
                flags.format,
            )
        }
    }
}
