//! TTL-bounded in-memory result cache.
//!
//! The cache is an explicit collaborator injected into callers, keyed by a
//! digest of the full request. Entries expire after a configurable
//! time-to-live and are evicted lazily on lookup. Concurrent writers for the
//! same key are permitted; the last write wins, which is harmless because
//! any two results for the same key are semantically equivalent.

use parking_lot::RwLock;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::models::{AnalysisRequest, AnalysisResult};

/// Compute the cache key for a request.
///
/// Every field that affects the result participates: coordinates, window,
/// variables in order, thresholds, and years. Requests differing in any of
/// them never collide.
pub fn cache_key(request: &AnalysisRequest) -> String {
    let mut hasher = Sha256::new();
    hasher.update(request.location.latitude.to_bits().to_be_bytes());
    hasher.update(request.location.longitude.to_bits().to_be_bytes());
    hasher.update(request.window.start.to_string().as_bytes());
    hasher.update(request.window.end.to_string().as_bytes());
    for variable in &request.variables {
        hasher.update(variable.display_name().as_bytes());
        if let Some(threshold) = request.thresholds.get(*variable) {
            hasher.update(threshold.to_bits().to_be_bytes());
        } else {
            hasher.update(b"-");
        }
    }
    hasher.update(request.years.to_be_bytes());
    hex::encode(hasher.finalize())
}

struct CacheEntry {
    result: AnalysisResult,
    inserted_at: Instant,
}

/// Shared analysis result cache with per-instance TTL.
pub struct AnalysisCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    ttl: Duration,
}

impl AnalysisCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Look up a cached result, evicting it if expired.
    pub fn get(&self, key: &str) -> Option<AnalysisResult> {
        {
            let entries = self.entries.read();
            match entries.get(key) {
                Some(entry) if entry.inserted_at.elapsed() < self.ttl => {
                    return Some(entry.result.clone());
                }
                Some(_) => {}
                None => return None,
            }
        }
        // Expired entry: evict under the write lock.
        self.entries.write().remove(key);
        None
    }

    /// Insert or replace the result for a key.
    pub fn insert(&self, key: String, result: AnalysisResult) {
        self.entries.write().insert(
            key,
            CacheEntry {
                result,
                inserted_at: Instant::now(),
            },
        );
    }

    /// Drop all expired entries. Lookups already evict lazily; this exists
    /// for long-running processes that want to bound memory between hits.
    pub fn purge_expired(&self) {
        let mut entries = self.entries.write();
        entries.retain(|_, entry| entry.inserted_at.elapsed() < self.ttl);
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        AnalysisMetadata, DateWindow, Location, ThresholdMap, WeatherVariable,
    };
    use chrono::NaiveDate;

    fn request() -> AnalysisRequest {
        AnalysisRequest {
            location: Location::new(30.27, -97.74, "Austin, TX"),
            window: DateWindow::new(
                NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
            ),
            variables: vec![WeatherVariable::Temperature],
            thresholds: ThresholdMap::new(),
            years: 20,
        }
    }

    fn result() -> AnalysisResult {
        AnalysisResult {
            location: "Austin, TX".to_string(),
            latitude: 30.27,
            longitude: -97.74,
            date: "06-01 to 06-15".to_string(),
            years_analyzed: 20,
            variables: vec![],
            metadata: AnalysisMetadata {
                analysis_date: "2024-06-15 12:00:00".to_string(),
            },
        }
    }

    #[test]
    fn test_key_is_stable() {
        assert_eq!(cache_key(&request()), cache_key(&request()));
    }

    #[test]
    fn test_key_changes_with_any_field() {
        let base = cache_key(&request());

        let mut changed = request();
        changed.location.latitude = 30.28;
        assert_ne!(base, cache_key(&changed));

        let mut changed = request();
        changed.years = 21;
        assert_ne!(base, cache_key(&changed));

        let mut changed = request();
        changed.thresholds.set(WeatherVariable::Temperature, 90.0);
        assert_ne!(base, cache_key(&changed));

        let mut changed = request();
        changed.variables.push(WeatherVariable::Humidity);
        assert_ne!(base, cache_key(&changed));
    }

    #[test]
    fn test_hit_within_ttl() {
        let cache = AnalysisCache::new(Duration::from_secs(60));
        let key = cache_key(&request());
        cache.insert(key.clone(), result());
        assert!(cache.get(&key).is_some());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_expired_entry_evicted() {
        let cache = AnalysisCache::new(Duration::from_millis(0));
        let key = cache_key(&request());
        cache.insert(key.clone(), result());
        assert!(cache.get(&key).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_purge_expired() {
        let cache = AnalysisCache::new(Duration::from_millis(0));
        cache.insert("a".to_string(), result());
        cache.insert("b".to_string(), result());
        cache.purge_expired();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_last_writer_wins() {
        let cache = AnalysisCache::new(Duration::from_secs(60));
        let mut second = result();
        second.metadata.analysis_date = "2024-06-15 12:00:01".to_string();
        cache.insert("k".to_string(), result());
        cache.insert("k".to_string(), second.clone());
        assert_eq!(cache.get("k").unwrap().metadata, second.metadata);
    }
}
