use serde::Serialize;
use skx_core::entities::{Skill, User};

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct SkillsResponse {
    user: User,
    teaches: Vec<Skill>,
    learns: Vec<Skill>,
}

pub async fn run(
    id: &str,
    teach: &[String],
    learn: &[String],
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let user = ctx.engine.update_user_skills(id, teach, learn).await?;
    let teaches = ctx.engine.resolve_skills(teach).await?;
    let learns = ctx.engine.resolve_skills(learn).await?;
    output(
        &SkillsResponse {
            user,
            teaches,
            learns,
        },
        flags.format,
    )
}
