use skx_core::enums::ConnectionStatus;

use crate::cli::GlobalFlags;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    user: &str,
    status: Option<&str>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let status = status
        .map(|raw| parse_enum::<ConnectionStatus>(raw, "status"))
        .transpose()?;
    let mut connections = ctx.engine.list_connections(user, status).await?;
    if let Some(limit) = flags.limit {
        connections.truncate(limit as usize);
    }
    output(&connections, flags.format)
}
