use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::error::Result;
use crate::services::{SharedConfig, open_db};

const DEFAULT_TTL: Duration = Duration::from_secs(60);

const KEY_EXTERNAL_CALENDAR_SYNC: &str = "feature.external_calendar_sync";
const KEY_DYNAMIC_PRICING: &str = "feature.dynamic_pricing";

/// Toggles for optional behavior, persisted in the settings table. Absent
/// keys default to enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureFlags {
    pub external_calendar_sync: bool,
    pub dynamic_pricing: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            external_calendar_sync: true,
            dynamic_pricing: true,
        }
    }
}

#[derive(Debug)]
struct CachedFlags {
    flags: FeatureFlags,
    loaded_at: Instant,
}

/// Feature-toggle reader with an injected-TTL cache. The cache is explicit
/// state with an explicit `invalidate`, not an ambient global, so tests can
/// run with a zero TTL and deterministic reads.
#[derive(Clone)]
pub struct FeaturesService {
    config: SharedConfig,
    ttl: Duration,
    cache: Arc<Mutex<Option<CachedFlags>>>,
}

impl FeaturesService {
    pub(super) fn new(config: SharedConfig) -> Self {
        Self::with_ttl(config, DEFAULT_TTL)
    }

    pub fn with_ttl(config: SharedConfig, ttl: Duration) -> Self {
        Self {
            config,
            ttl,
            cache: Arc::new(Mutex::new(None)),
        }
    }

    pub fn flags(&self) -> Result<FeatureFlags> {
        if let Ok(guard) = self.cache.lock()
            && let Some(cached) = guard.as_ref()
            && cached.loaded_at.elapsed() < self.ttl
        {
            return Ok(cached.flags);
        }

        let flags = self.load()?;
        if let Ok(mut guard) = self.cache.lock() {
            *guard = Some(CachedFlags {
                flags,
                loaded_at: Instant::now(),
            });
        }
        Ok(flags)
    }

    pub fn set_external_calendar_sync(&self, enabled: bool) -> Result<()> {
        self.set(KEY_EXTERNAL_CALENDAR_SYNC, enabled)
    }

    pub fn set_dynamic_pricing(&self, enabled: bool) -> Result<()> {
        self.set(KEY_DYNAMIC_PRICING, enabled)
    }

    pub fn invalidate(&self) {
        if let Ok(mut guard) = self.cache.lock() {
            *guard = None;
        }
    }

    fn set(&self, key: &str, enabled: bool) -> Result<()> {
        let db = open_db(&self.config)?;
        db.set_setting(key, if enabled { "true" } else { "false" })?;
        self.invalidate();
        Ok(())
    }

    fn load(&self) -> Result<FeatureFlags> {
        let db = open_db(&self.config)?;
        let read = |key: &str| -> Result<bool> {
            Ok(db
                .get_setting(key)?
                .map(|value| value != "false")
                .unwrap_or(true))
        };
        Ok(FeatureFlags {
            external_calendar_sync: read(KEY_EXTERNAL_CALENDAR_SYNC)?,
            dynamic_pricing: read(KEY_DYNAMIC_PRICING)?,
        })
    }
}
