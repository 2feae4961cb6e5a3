use std::sync::Arc;

use dulcevida_schedule::{
    FileCache, HttpScheduleStore, LoadOutcome, LocalCache, MemoryCache, ScheduleSyncController,
    StaticToken, TracingReporter,
};

use crate::Config;

pub type Controller = ScheduleSyncController<HttpScheduleStore, Arc<dyn LocalCache>>;

/// Wire a controller from configuration without contacting the remote store.
pub fn build(config: &Config) -> anyhow::Result<Controller> {
    let remote = HttpScheduleStore::new(
        &config.remote.base_url,
        config.remote.timeout(),
        StaticToken::new(config.remote.token.clone()),
    )?;

    let cache: Arc<dyn LocalCache> = if config.cache.enabled {
        Arc::new(FileCache::new(&config.cache.dir))
    } else {
        tracing::debug!("schedule cache disabled, keeping it in memory");
        Arc::new(MemoryCache::default())
    };

    Ok(
        ScheduleSyncController::new(remote, cache, Arc::new(TracingReporter))
            .with_cache_key(&config.cache.key),
    )
}

/// [`build`] followed by the initial load.
pub async fn connect(config: &Config) -> anyhow::Result<(Controller, LoadOutcome)> {
    let controller = build(config)?;
    let outcome = controller.load().await;

    Ok((controller, outcome))
}

/// [`build`] seeded from the local cache only, so unsent local work is what
/// a following push sends.
pub fn resume(config: &Config) -> anyhow::Result<(Controller, LoadOutcome)> {
    let controller = build(config)?;
    let outcome = controller.load_cached();

    Ok((controller, outcome))
}
