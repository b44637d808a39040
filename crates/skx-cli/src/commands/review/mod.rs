mod submit;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ReviewCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `skx review`.
pub async fn handle(action: &ReviewCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        ReviewCommands::Submit {
            session,
            teacher,
            learner,
            duration,
            reviewer,
            rating,
            feedback,
            covers,
            skill,
        } => {
            let args = submit::SubmitArgs {
                session,
                teacher,
                learner,
                duration: *duration,
                reviewer,
                rating: *rating,
                feedback: feedback.as_deref(),
                covers,
                skills: skill,
            };
            submit::run(&args, ctx, flags).await
        }
        ReviewCommands::Status { session } => {
            output(&ctx.engine.session_status(session).await?, flags.format)
        }
    }
}
