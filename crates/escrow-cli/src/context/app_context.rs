use anyhow::Context;
use escrow_config::EscrowConfig;
use escrow_db::service::EscrowService;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub service: EscrowService,
}

impl AppContext {
    /// Open the store described by `config`.
    pub async fn init(config: EscrowConfig) -> anyhow::Result<Self> {
        let service = EscrowService::open(&config)
            .await
            .with_context(|| format!("failed to open escrow database {}", config.database.path))?;
        tracing::debug!(
            path = %config.database.path,
            feed_max_items = config.feed.max_items,
            "escrow service ready"
        );
        Ok(Self { service })
    }
}
