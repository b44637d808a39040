use skx_core::enums::Decision;

use crate::cli::GlobalFlags;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    id: &str,
    decision: &str,
    responder: &str,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let decision = parse_enum::<Decision>(decision, "decision")?;
    let view = ctx
        .engine
        .respond_to_connection(id, responder, decision)
        .await?;
    output(&view, flags.format)
}
