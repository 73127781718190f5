//! Common-name cache boundary
//!
//! The application fetches common names from a remote service and keeps them
//! per `(taxon, locale)`. Whether a stored name is still usable is decided by a
//! [`CachePolicy`].

use crate::models::TaxonCommonName;
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use observe_core::config::CacheConfig;
use observe_core::{CachePolicyKind, TaxonId};
use tracing::{debug, warn};

/// How long a cached common name stays valid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    Expiring { max_age: Duration },
    Permanent,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self::one_week()
    }
}

impl CachePolicy {
    pub fn one_week() -> Self {
        Self::Expiring {
            max_age: Duration::days(7),
        }
    }

    pub fn from_config(config: &CacheConfig) -> Self {
        match config.policy {
            CachePolicyKind::Expiring => Self::Expiring {
                max_age: Duration::days(i64::from(config.max_age_days)),
            },
            CachePolicyKind::Permanent => Self::Permanent,
        }
    }

    /// Whether an entry cached at `cached_at` may still be served at `now`
    pub fn is_valid(&self, cached_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        match self {
            Self::Expiring { max_age } => now - cached_at < *max_age,
            Self::Permanent => true,
        }
    }
}

/// Store of common names keyed by `(TaxonId, locale)`
pub trait CommonNameCache: Send + Sync {
    /// Entry for the key if present and valid at `now`
    fn lookup_at(&self, taxon_id: TaxonId, locale: &str, now: DateTime<Utc>)
        -> Option<TaxonCommonName>;

    fn lookup(&self, taxon_id: TaxonId, locale: &str) -> Option<TaxonCommonName> {
        self.lookup_at(taxon_id, locale, Utc::now())
    }

    /// Insert or replace the entry for the name's `(taxon, locale)`
    fn store(&self, name: TaxonCommonName);

    fn invalidate(&self, taxon_id: TaxonId, locale: &str) -> Option<TaxonCommonName>;
}

/// Process-local cache, safe to share across threads
#[derive(Debug, Default)]
pub struct InMemoryCommonNameCache {
    entries: DashMap<String, TaxonCommonName>,
    policy: CachePolicy,
}

impl InMemoryCommonNameCache {
    pub fn new(policy: CachePolicy) -> Self {
        Self {
            entries: DashMap::new(),
            policy,
        }
    }

    pub fn policy(&self) -> CachePolicy {
        self.policy
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry invalid at `now`; returns how many were dropped
    pub fn purge_expired(&self, now: DateTime<Utc>) -> usize {
        // Counted inside retain; len() may move under concurrent stores
        let mut purged = 0;
        self.entries.retain(|_, entry| {
            let keep = self.policy.is_valid(entry.cached_at, now);
            if !keep {
                purged += 1;
            }
            keep
        });
        if purged > 0 {
            debug!(purged, remaining = self.entries.len(), "Purged expired common names");
        }
        purged
    }

    /// All entries, sorted by id
    pub fn snapshot(&self) -> Vec<TaxonCommonName> {
        let mut entries: Vec<TaxonCommonName> =
            self.entries.iter().map(|entry| entry.value().clone()).collect();
        entries.sort_by(|a, b| a.id.cmp(&b.id));
        entries
    }
}

impl CommonNameCache for InMemoryCommonNameCache {
    fn lookup_at(
        &self,
        taxon_id: TaxonId,
        locale: &str,
        now: DateTime<Utc>,
    ) -> Option<TaxonCommonName> {
        let entry = self.entries.get(&taxon_id.locale_key(locale))?;
        if self.policy.is_valid(entry.cached_at, now) {
            Some(entry.value().clone())
        } else {
            warn!(
                taxon = %taxon_id,
                locale,
                cached_at = %entry.cached_at,
                "Cached common name expired"
            );
            None
        }
    }

    fn store(&self, name: TaxonCommonName) {
        self.entries.insert(name.id.clone(), name);
    }

    fn invalidate(&self, taxon_id: TaxonId, locale: &str) -> Option<TaxonCommonName> {
        self.entries
            .remove(&taxon_id.locale_key(locale))
            .map(|(_, entry)| entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::sync::Arc;
    use std::thread;

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, day, 12, 0, 0).unwrap()
    }

    fn robin(cached: DateTime<Utc>) -> TaxonCommonName {
        TaxonCommonName::new(TaxonId(3), "en", "American Robin").cached_at(cached)
    }

    #[test]
    fn test_default_policy_is_one_week() {
        assert_eq!(CachePolicy::default(), CachePolicy::one_week());
        let policy = CachePolicy::default();
        assert!(policy.is_valid(at(1), at(7)));
        assert!(!policy.is_valid(at(1), at(8)));
    }

    #[test]
    fn test_permanent_never_expires() {
        let policy = CachePolicy::Permanent;
        assert!(policy.is_valid(at(1), Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap()));
    }

    #[test]
    fn test_policy_from_config() {
        let mut config = CacheConfig::default();
        config.max_age_days = 2;
        assert_eq!(
            CachePolicy::from_config(&config),
            CachePolicy::Expiring {
                max_age: Duration::days(2)
            }
        );

        config.policy = CachePolicyKind::Permanent;
        assert_eq!(CachePolicy::from_config(&config), CachePolicy::Permanent);
    }

    #[test]
    fn test_lookup_respects_policy() {
        let cache = InMemoryCommonNameCache::new(CachePolicy::one_week());
        cache.store(robin(at(1)));

        let hit = cache.lookup_at(TaxonId(3), "en", at(3)).unwrap();
        assert_eq!(hit.common_name.as_deref(), Some("American Robin"));
        assert!(cache.lookup_at(TaxonId(3), "fr", at(3)).is_none());
        assert!(cache.lookup_at(TaxonId(3), "en", at(9)).is_none());
        // Expired entries stay until purged
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_store_replaces_and_invalidate_removes() {
        let cache = InMemoryCommonNameCache::default();
        cache.store(robin(at(1)));
        cache.store(TaxonCommonName::new(TaxonId(3), "en", "Robin").cached_at(at(2)));
        assert_eq!(cache.len(), 1);
        assert_eq!(
            cache.lookup_at(TaxonId(3), "en", at(2)).unwrap().common_name,
            Some("Robin".to_string())
        );

        assert!(cache.invalidate(TaxonId(3), "en").is_some());
        assert!(cache.is_empty());
        assert!(cache.invalidate(TaxonId(3), "en").is_none());
    }

    #[test]
    fn test_purge_expired() {
        let cache = InMemoryCommonNameCache::new(CachePolicy::one_week());
        cache.store(robin(at(1)));
        cache.store(TaxonCommonName::new(TaxonId(3), "fr", "Merle d'Amérique").cached_at(at(10)));

        assert_eq!(cache.purge_expired(at(12)), 1);
        let ids: Vec<String> = cache.snapshot().into_iter().map(|n| n.id).collect();
        assert_eq!(ids, vec!["3_fr".to_string()]);
    }

    #[test]
    fn test_missing_name_is_cached() {
        let cache = InMemoryCommonNameCache::new(CachePolicy::one_week());
        cache.store(TaxonCommonName::missing(TaxonId(3), "fr").cached_at(at(1)));

        let hit = cache.lookup_at(TaxonId(3), "fr", at(5)).unwrap();
        assert_eq!(hit.common_name, None);
        assert_eq!(hit.id, "3_fr");

        assert!(cache.lookup_at(TaxonId(3), "fr", at(9)).is_none());
        assert_eq!(cache.purge_expired(at(9)), 1);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_purge_while_storing() {
        let cache = Arc::new(InMemoryCommonNameCache::new(CachePolicy::one_week()));
        for round in 0..50u32 {
            cache.store(robin(at(1)));
            for i in 0..20u32 {
                cache.store(
                    TaxonCommonName::new(TaxonId(round * 1000 + i), "old", "stale")
                        .cached_at(at(1)),
                );
            }

            let writer = {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    for i in 0..200u32 {
                        cache.store(
                            TaxonCommonName::new(TaxonId(round * 1000 + i), "en", "fresh")
                                .cached_at(at(10)),
                        );
                    }
                })
            };
            let purged = cache.purge_expired(at(12));
            writer.join().unwrap();

            // 20 stale names plus the robin, nothing else ever expires
            assert!(purged <= 21, "purged {} entries", purged);
            assert!(cache.purge_expired(at(12)) <= 21);
            assert!(cache
                .snapshot()
                .iter()
                .all(|name| name.common_name.as_deref() == Some("fresh")));
        }
    }

    #[test]
    fn test_concurrent_store() {
        let cache: Arc<dyn CommonNameCache> = Arc::new(InMemoryCommonNameCache::default());
        let handles: Vec<_> = (0..8u32)
            .map(|i| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    cache.store(TaxonCommonName::new(TaxonId(i), "en", format!("taxon {}", i)));
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        for i in 0..8u32 {
            assert!(cache.lookup(TaxonId(i), "en").is_some());
        }
    }
}
