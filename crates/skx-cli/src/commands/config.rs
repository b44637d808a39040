use skx_config::SkxConfig;

use crate::cli::GlobalFlags;
use crate::output::output;

/// Handle `skx config`.
pub fn handle(config: &SkxConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(config, flags.format)
}
