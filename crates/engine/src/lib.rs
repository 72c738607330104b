use analytics::{FeatureEngine, RegimeSegmenter, SummaryMetrics};
use configuration::{PolicyBounds, Settings, WindowDefaults};
use core_types::{ParameterSet, PriceSeries};
use loader::{DataLoader, SeriesCache};

pub mod artifacts;
pub mod error;

pub use artifacts::{DashboardArtifacts, RenderRequest};
pub use error::EngineError;

/// Runs the full dashboard pipeline for one price source.
///
/// Every call to [`DashboardEngine::render`] recomputes features, KPIs and
/// regimes from scratch. Only the parsed series is kept between calls, in a
/// cache owned by the engine.
#[derive(Debug)]
pub struct DashboardEngine {
    loader: DataLoader,
    cache: SeriesCache,
    defaults: WindowDefaults,
    policy: PolicyBounds,
    features: FeatureEngine,
    summary: SummaryMetrics,
    segmenter: RegimeSegmenter,
}

impl DashboardEngine {
    pub fn new(loader: DataLoader, defaults: WindowDefaults, policy: PolicyBounds) -> Self {
        Self {
            loader,
            cache: SeriesCache::new(),
            defaults,
            policy,
            features: FeatureEngine::new(),
            summary: SummaryMetrics::new(),
            segmenter: RegimeSegmenter::new(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let loader = DataLoader::new(&settings.data.base_dir, settings.data.candidates.clone());
        Self::new(loader, settings.parameters, settings.policy)
    }

    /// Load (cached) → filter → compute → summarize → segment.
    ///
    /// Fails without partial output: either all four artifacts are produced or
    /// none are.
    pub fn render(&self, request: &RenderRequest) -> Result<DashboardArtifacts, EngineError> {
        let loaded = self.cache.get_or_load(&self.loader)?;
        let params = self.resolve_params(&loaded.series, request)?;

        let window = loaded.series.between(&params.date_range);
        tracing::debug!(
            start = %params.date_range.start,
            end = %params.date_range.end,
            rows = window.len(),
            "Filtered price series"
        );
        self.features.ensure_sufficient(window)?;

        let rows = self.features.compute(window, &params)?;
        let kpis = self.summary.summarize(window, &rows)?;
        let intervals = self.segmenter.segment_rows(&rows);

        Ok(DashboardArtifacts {
            source: loaded.source,
            params,
            bars: window.to_vec(),
            rows,
            kpis,
            intervals,
        })
    }

    /// Drops the cached series so the next render re-reads the file.
    /// Returns whether anything was cached.
    pub fn invalidate(&self) -> bool {
        match self.loader.resolve() {
            Ok(source) => self.cache.invalidate(&source),
            Err(_) => {
                let had_entries = !self.cache.is_empty();
                self.cache.clear();
                had_entries
            }
        }
    }

    pub fn defaults(&self) -> &WindowDefaults {
        &self.defaults
    }

    /// Fills the request's gaps and checks the result.
    fn resolve_params(
        &self,
        series: &PriceSeries,
        request: &RenderRequest,
    ) -> Result<ParameterSet, EngineError> {
        let windows = WindowDefaults {
            short_window: request.short_window.unwrap_or(self.defaults.short_window),
            long_window: request.long_window.unwrap_or(self.defaults.long_window),
            volatility_window: request
                .volatility_window
                .unwrap_or(self.defaults.volatility_window),
        };

        for warning in self.policy.check(&windows) {
            tracing::warn!("Parameter outside the usual range: {}", warning);
        }

        let params = ParameterSet {
            short_window: windows.short_window,
            long_window: windows.long_window,
            volatility_window: windows.volatility_window,
            date_range: series.resolve_range(request.start, request.end)?,
        };
        params.validate()?;

        Ok(params)
    }
}
