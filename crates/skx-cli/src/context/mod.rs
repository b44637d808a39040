use anyhow::Context;
use skx_config::SkxConfig;
use skx_db::SkxStore;
use skx_engine::SkillExchange;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub engine: SkillExchange<SkxStore>,
}

impl AppContext {
    /// Open the configured database and build the engine over it.
    pub async fn init(config: &SkxConfig) -> anyhow::Result<Self> {
        let store = SkxStore::open_local(&config.database.path)
            .await
            .with_context(|| format!("failed to open database '{}'", config.database.path))?;
        tracing::debug!(path = %config.database.path, "database opened");

        let engine = SkillExchange::new(store, config);
        Ok(Self { engine })
    }
}
