//! Analysis orchestrator.
//!
//! Validates the request, fetches one sample per requested variable, runs
//! the statistics, trend, and distribution services over each, and assembles
//! the aggregate result. Any provider failure aborts the whole analysis; no
//! partial results are returned.

use chrono::{Datelike, Utc};
use std::sync::Arc;
use tracing::{debug, info};

use crate::cache::{cache_key, AnalysisCache};
use crate::config::AppConfig;
use crate::error::AnalysisError;
use crate::models::{
    AnalysisMetadata, AnalysisRequest, AnalysisResult, Sample, TimeSeriesPoint, VariableAnalysis,
};
use crate::provider::SampleProvider;

use super::distribution::compute_probabilities;
use super::statistics::compute_statistics;
use super::trend::fit_trend;

/// Run one analysis without caching.
///
/// Validation happens before any sample retrieval, so a malformed request
/// never reaches the provider. Variables are processed sequentially in
/// request order.
pub async fn analyze(
    provider: &dyn SampleProvider,
    config: &AppConfig,
    request: &AnalysisRequest,
) -> Result<AnalysisResult, AnalysisError> {
    let now = Utc::now();
    analyze_at(provider, config, request, now.year(), || {
        now.format("%Y-%m-%d %H:%M:%S").to_string()
    })
    .await
}

async fn analyze_at(
    provider: &dyn SampleProvider,
    config: &AppConfig,
    request: &AnalysisRequest,
    current_year: i32,
    timestamp: impl FnOnce() -> String,
) -> Result<AnalysisResult, AnalysisError> {
    request.validate()?;
    info!(
        location = %request.location.name,
        years = request.years,
        variables = request.variables.len(),
        "running analysis"
    );

    let mut variables = Vec::with_capacity(request.variables.len());
    for &variable in &request.variables {
        let variable_config = config.variable(variable);
        let sample = provider
            .fetch_sample(&request.location, variable, &request.window, request.years)
            .await?;
        debug!(%variable, observations = sample.len(), "sample retrieved");

        let threshold = request.thresholds.get(variable);
        let statistics = compute_statistics(
            &sample,
            variable_config.units.clone(),
            variable_config.data_source.clone(),
            threshold,
        )?;
        let trend = fit_trend(sample.values());
        let probabilities = compute_probabilities(&sample, threshold)?;
        let time_series = build_time_series(&sample, current_year);

        variables.push(VariableAnalysis {
            variable,
            statistics,
            time_series,
            sample,
            trend,
            probabilities,
        });
    }

    Ok(AnalysisResult {
        location: request.location.name.clone(),
        latitude: request.location.latitude,
        longitude: request.location.longitude,
        date: request.window.label(),
        years_analyzed: request.years,
        variables,
        metadata: AnalysisMetadata {
            analysis_date: timestamp(),
        },
    })
}

/// Assign calendar years to a sample, oldest first, ending with last year.
fn build_time_series(sample: &Sample, current_year: i32) -> Vec<TimeSeriesPoint> {
    let n = sample.len() as i32;
    sample
        .values()
        .iter()
        .enumerate()
        .map(|(i, &value)| TimeSeriesPoint {
            year: current_year - n + i as i32,
            value,
        })
        .collect()
}

/// Shared analysis service combining provider, configuration, and an
/// optional result cache. The HTTP layer holds one of these per process.
pub struct Analyzer {
    provider: Arc<dyn SampleProvider>,
    config: Arc<AppConfig>,
    cache: Option<Arc<AnalysisCache>>,
}

impl Analyzer {
    pub fn new(provider: Arc<dyn SampleProvider>, config: Arc<AppConfig>) -> Self {
        Self {
            provider,
            config,
            cache: None,
        }
    }

    /// Attach a result cache. Without one every call recomputes.
    pub fn with_cache(mut self, cache: Arc<AnalysisCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Run one analysis, consulting the cache first when configured.
    pub async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AnalysisError> {
        // Validate before the cache lookup so malformed requests never
        // produce a key.
        request.validate()?;

        let key = self.cache.as_ref().map(|_| cache_key(request));
        if let (Some(cache), Some(key)) = (&self.cache, &key) {
            if let Some(result) = cache.get(key) {
                debug!(key = %key, "analysis cache hit");
                return Ok(result);
            }
        }

        let result = analyze(self.provider.as_ref(), &self.config, request).await?;

        if let (Some(cache), Some(key)) = (&self.cache, key) {
            cache.insert(key, result.clone());
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DateWindow, Location, ThresholdMap, WeatherVariable};
    use crate::provider::{ProviderError, ProviderResult, SyntheticProvider};
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn request(variables: Vec<WeatherVariable>) -> AnalysisRequest {
        AnalysisRequest {
            location: Location::new(30.27, -97.74, "Austin, TX"),
            window: DateWindow::new(
                NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
            ),
            variables,
            thresholds: ThresholdMap::new(),
            years: 20,
        }
    }

    /// Provider with a fixed sample and a fetch counter.
    struct FixedProvider {
        values: Vec<f64>,
        calls: AtomicUsize,
    }

    impl FixedProvider {
        fn new(values: Vec<f64>) -> Self {
            Self {
                values,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl SampleProvider for FixedProvider {
        async fn fetch_sample(
            &self,
            _location: &Location,
            _variable: WeatherVariable,
            _window: &DateWindow,
            _years: u32,
        ) -> ProviderResult<Sample> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Sample::new(self.values.clone()).expect("finite values"))
        }
    }

    /// Provider that fails for one variable and succeeds for the rest.
    struct FailingProvider {
        fail_on: WeatherVariable,
    }

    #[async_trait]
    impl SampleProvider for FailingProvider {
        async fn fetch_sample(
            &self,
            location: &Location,
            variable: WeatherVariable,
            _window: &DateWindow,
            years: u32,
        ) -> ProviderResult<Sample> {
            if variable == self.fail_on {
                return Err(ProviderError::DataUnavailable {
                    variable,
                    latitude: location.latitude,
                    longitude: location.longitude,
                });
            }
            Ok(Sample::new(vec![1.0; years as usize]).expect("finite values"))
        }
    }

    #[tokio::test]
    async fn test_full_analysis_over_synthetic_data() {
        let provider = SyntheticProvider::new();
        let config = AppConfig::default();
        let mut req = request(vec![
            WeatherVariable::Temperature,
            WeatherVariable::Precipitation,
        ]);
        req.thresholds.set(WeatherVariable::Temperature, 90.0);

        let result = analyze(&provider, &config, &req).await.unwrap();
        assert_eq!(result.location, "Austin, TX");
        assert_eq!(result.years_analyzed, 20);
        assert_eq!(result.variables.len(), 2);
        assert_eq!(result.variables[0].variable, WeatherVariable::Temperature);

        let temp = result.variable(WeatherVariable::Temperature).unwrap();
        assert_eq!(temp.statistics.units, "°F");
        assert_eq!(temp.statistics.data_source, "MERRA-2");
        assert_eq!(temp.statistics.threshold, Some(90.0));
        assert_eq!(temp.sample.len(), 20);
        assert_eq!(temp.time_series.len(), 20);

        let precip = result.variable(WeatherVariable::Precipitation).unwrap();
        assert_eq!(precip.statistics.data_source, "GPM IMERG");
        // No threshold supplied: statistics report none, probabilities fall
        // back to the 75th percentile
        assert_eq!(precip.statistics.threshold, None);
        assert_eq!(
            precip.probabilities.threshold_used,
            precip.statistics.percentiles.p75
        );
    }

    #[tokio::test]
    async fn test_known_sample_exceedance() {
        let provider = FixedProvider::new(vec![70.0, 75.0, 80.0, 85.0, 90.0]);
        let config = AppConfig::default();
        let mut req = request(vec![WeatherVariable::Temperature]);
        req.thresholds.set(WeatherVariable::Temperature, 80.0);

        let result = analyze(&provider, &config, &req).await.unwrap();
        let analysis = &result.variables[0];
        assert_eq!(analysis.probabilities.exceed_count, 2);
        assert_eq!(analysis.probabilities.exceed_probability, 40.0);
        assert_eq!(analysis.probabilities.normal_probability, 60.0);
        assert_eq!(analysis.statistics.probability, 40.0);
    }

    #[tokio::test]
    async fn test_invalid_request_never_reaches_provider() {
        let provider = FixedProvider::new(vec![1.0; 20]);
        let config = AppConfig::default();
        let mut req = request(vec![WeatherVariable::Temperature]);
        req.location.latitude = 95.0;

        let result = analyze(&provider, &config, &req).await;
        assert!(matches!(result, Err(AnalysisError::InvalidInput { .. })));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_provider_failure_aborts_whole_analysis() {
        let provider = FailingProvider {
            fail_on: WeatherVariable::Humidity,
        };
        let config = AppConfig::default();
        let req = request(vec![WeatherVariable::Temperature, WeatherVariable::Humidity]);

        let result = analyze(&provider, &config, &req).await;
        assert!(matches!(result, Err(AnalysisError::DataUnavailable { .. })));
    }

    #[tokio::test]
    async fn test_time_series_years() {
        let provider = FixedProvider::new(vec![1.0, 2.0, 3.0]);
        let config = AppConfig::default();
        let mut req = request(vec![WeatherVariable::WindSpeed]);
        req.years = 10;

        let result = analyze_at(&provider, &config, &req, 2025, || {
            "2025-06-15 12:00:00".to_string()
        })
        .await
        .unwrap();
        let series = &result.variables[0].time_series;
        assert_eq!(series.len(), 3);
        assert_eq!(series[0].year, 2022);
        assert_eq!(series[2].year, 2024);
        assert_eq!(series[0].value, 1.0);
        assert_eq!(result.metadata.analysis_date, "2025-06-15 12:00:00");
    }

    #[tokio::test]
    async fn test_analyzer_cache_round_trip() {
        let provider = Arc::new(FixedProvider::new(vec![1.0; 20]));
        let cache = Arc::new(AnalysisCache::new(Duration::from_secs(60)));
        let analyzer = Analyzer::new(provider.clone(), Arc::new(AppConfig::default()))
            .with_cache(cache.clone());
        let req = request(vec![WeatherVariable::Temperature]);

        let first = analyzer.analyze(&req).await.unwrap();
        let second = analyzer.analyze(&req).await.unwrap();
        assert_eq!(first, second);
        // Second call served from cache
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn test_analyzer_without_cache_recomputes() {
        let provider = Arc::new(FixedProvider::new(vec![1.0; 20]));
        let analyzer = Analyzer::new(provider.clone(), Arc::new(AppConfig::default()));
        let req = request(vec![WeatherVariable::Temperature]);

        analyzer.analyze(&req).await.unwrap();
        analyzer.analyze(&req).await.unwrap();
        assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
    }
}
