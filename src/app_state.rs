// =============================================================================
// Central Application State — Vantage Advisor
// =============================================================================
//
// Shared by every request handler via `Arc<AppState>`. Everything here is
// either immutable after startup or manages its own interior mutability
// (the result cache uses a parking_lot::RwLock internally).
// =============================================================================

use std::sync::Arc;

use crate::analysis::Analyzer;
use crate::batch::BatchRunner;
use crate::cache::ResultCache;
use crate::market_data::MarketDataProvider;
use crate::runtime_config::RuntimeConfig;

/// Environment variable holding the bearer secret for authenticated routes.
pub const API_TOKEN_ENV: &str = "VANTAGE_API_TOKEN";

pub struct AppState {
    // ── Configuration ───────────────────────────────────────────────────
    pub config: RuntimeConfig,
    /// Expected bearer token. `None` rejects every authenticated request.
    pub api_token: Option<String>,

    // ── Analysis pipeline ───────────────────────────────────────────────
    pub provider: Arc<dyn MarketDataProvider>,
    pub analyzer: Analyzer,
    pub batch_runner: BatchRunner,

    // ── Batch sessions ──────────────────────────────────────────────────
    pub cache: ResultCache,

    // ── Timing ──────────────────────────────────────────────────────────
    pub start_time: std::time::Instant,
}

impl AppState {
    /// Wire the analysis pipeline from `config` around `provider`.
    pub fn new(config: RuntimeConfig, provider: Arc<dyn MarketDataProvider>, api_token: Option<String>) -> Self {
        let analyzer = Analyzer::new(config.chart_window);
        let batch_runner = BatchRunner::new(provider.clone(), analyzer, config.batch_concurrency);
        let cache = ResultCache::new(config.cache_ttl_secs, config.cache_max_entries);

        Self {
            api_token: api_token.filter(|t| !t.is_empty()),
            provider,
            analyzer,
            batch_runner,
            cache,
            start_time: std::time::Instant::now(),
            config,
        }
    }

    /// Seconds since the service started.
    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
