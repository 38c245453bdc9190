//! The coordinate service.

use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::cache::{CacheConfig, CacheStatsSnapshot, ConversionCache};
use crate::config::ConfigFile;
use crate::convert::offload::{self, OffloadClient};
use crate::convert::{ConversionEngine, ConversionResult};
use crate::coord::Format;
use crate::detect;
use crate::geocode::{
    Geocoder, HttpGeocoder, MemoizingGeocoder, RateLimitedGeocoder, ReqwestTransport,
};
use crate::sched::{BudgetedScheduler, ScheduledOutcome, SchedulerConfig, SchedulerStatsSnapshot};
use crate::time::{Clock, SystemClock};
use crate::validate::{self, ValidationResult};

use super::ServiceError;

/// One service value owning the whole conversion pipeline.
///
/// All methods take `&self`; the scheduler's mutable state sits behind an
/// async mutex because executing a debounced unit awaits the engine.
pub struct CoordinateService {
    engine: Arc<ConversionEngine>,
    geocoder: Option<Arc<dyn Geocoder>>,
    scheduler: Mutex<BudgetedScheduler>,
    shutdown: CancellationToken,
    offload: std::sync::Mutex<Option<JoinHandle<()>>>,
}

impl CoordinateService {
    /// Builds the service from configuration with the system clock and the
    /// HTTP geocoder stack (memoized, rate limited).
    pub fn new(config: &ConfigFile) -> Result<Self, ServiceError> {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);

        let transport = ReqwestTransport::new(config.geocode.timeout())?;
        let http: Arc<dyn Geocoder> = Arc::new(HttpGeocoder::new(
            transport,
            config.geocode.endpoint.clone(),
            config.geocode.api_key.clone(),
        ));
        let limited: Arc<dyn Geocoder> = Arc::new(RateLimitedGeocoder::with_limit(
            http,
            config.geocode.rate_limit_per_min,
            Arc::clone(&clock),
        ));
        let geocoder: Arc<dyn Geocoder> = Arc::new(MemoizingGeocoder::new(limited));

        Ok(Self::assemble(config, Some(geocoder), clock))
    }

    /// Builds the service with an explicit geocoder (or none) and clock.
    ///
    /// This is the constructor tests use with a static geocoder and a
    /// manual clock.
    pub fn with_geocoder(
        config: &ConfigFile,
        geocoder: Option<Arc<dyn Geocoder>>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self::assemble(config, geocoder, clock)
    }

    fn assemble(
        config: &ConfigFile,
        geocoder: Option<Arc<dyn Geocoder>>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let cache = ConversionCache::new(
            CacheConfig {
                capacity: config.cache.capacity,
                max_age: config.cache.max_age(),
            },
            Arc::clone(&clock),
        );
        let engine = Arc::new(ConversionEngine::with_geocode_bound(
            cache,
            geocoder.clone(),
            config.geocode.max_in_flight,
        ));
        let scheduler = BudgetedScheduler::new(
            Arc::clone(&engine),
            SchedulerConfig {
                debounce_window: config.scheduler.debounce_window(),
                validate_budget: config.scheduler.validate_budget(),
                convert_budget: config.scheduler.convert_budget(),
            },
            clock,
        );

        Self {
            engine,
            geocoder,
            scheduler: Mutex::new(scheduler),
            shutdown: CancellationToken::new(),
            offload: std::sync::Mutex::new(None),
        }
    }

    /// Guesses the notation of `raw`.
    pub fn detect(&self, raw: &str) -> Option<Format> {
        detect::detect(raw)
    }

    /// Validates `raw` against `format` without touching the network.
    pub fn validate(&self, raw: &str, format: Format) -> ValidationResult {
        validate::validate(raw, format)
    }

    /// Validates a word triple against the geocoding collaborator.
    pub async fn validate_words(&self, raw: &str) -> ValidationResult {
        match &self.geocoder {
            Some(geocoder) => validate::validate_words(raw, geocoder.as_ref()).await,
            None => validate::validate(raw, Format::Words),
        }
    }

    /// Converts `raw` as `format` into every representable notation.
    pub async fn convert(&self, raw: &str, format: Format) -> ConversionResult {
        self.engine.convert(raw, format).await
    }

    /// Submits input to the debounced scheduler.
    pub async fn submit(&self, raw: &str, format: Option<Format>) {
        self.scheduler.lock().await.submit(raw, format);
    }

    /// Executes pending debounced work whose deadline has passed.
    pub async fn poll(&self) -> Option<ScheduledOutcome> {
        self.scheduler.lock().await.poll().await
    }

    /// Executes pending debounced work immediately.
    pub async fn flush(&self) -> Option<ScheduledOutcome> {
        self.scheduler.lock().await.flush().await
    }

    /// Discards pending debounced work without executing it.
    pub async fn cancel(&self) -> bool {
        self.scheduler.lock().await.cancel()
    }

    /// Starts the optional offload worker and returns its client.
    ///
    /// Must be called from within a tokio runtime. The worker stops on
    /// [`CoordinateService::shutdown`].
    pub fn start_offload(&self) -> OffloadClient {
        let (client, handle) = offload::spawn_worker(Arc::clone(&self.engine), self.shutdown.child_token());
        *self.offload.lock().unwrap() = Some(handle);
        client
    }

    /// Cache counter snapshot.
    pub fn cache_stats(&self) -> CacheStatsSnapshot {
        self.engine.cache_stats()
    }

    /// Scheduler counter snapshot.
    pub async fn scheduler_stats(&self) -> SchedulerStatsSnapshot {
        self.scheduler.lock().await.stats().snapshot()
    }

    /// Tears the service down: discards pending debounced work, stops the
    /// offload worker, and clears the cache.
    pub async fn shutdown(&self) {
        info!("coordinate service shutting down");
        self.shutdown.cancel();
        self.scheduler.lock().await.cancel();
        self.engine.clear_cache();

        let handle = self.offload.lock().unwrap().take();
        if let Some(handle) = handle {
            // The worker observes the cancelled token; wait for it to
            // finish the request in hand and exit.
            let _ = handle.await;
        }
    }
}
