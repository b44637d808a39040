use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    name: &str,
    location: Option<&str>,
    teach: &[String],
    learn: &[String],
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let mut user = ctx.engine.create_user(name, location).await?;
    if !teach.is_empty() || !learn.is_empty() {
        user = ctx.engine.update_user_skills(&user.id, teach, learn).await?;
    }
    output(&user, flags.format)
}
