use crate::error::{ArchetypeError, Result};
use crate::orders::DEFAULT_COVER;
use serde::{Deserialize, Serialize};

/// Fold orders tried per cluster unless configured otherwise
pub const DEFAULT_MAX_ORDERS: usize = 2_048;

/// Configuration for archetype search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchetypeConfig {
    /// Leading fold positions that take every combination of members
    pub cover: usize,

    /// Stop after this many fold orders per cluster (`None` = try all `C(n, cover)`).
    ///
    /// `C(n, 3)` passes 2 048 at 25 members, and each order folds all `n` of them.
    pub max_orders: Option<usize>,

    /// Memo table bounds
    pub cache: CacheConfig,
}

impl Default for ArchetypeConfig {
    fn default() -> Self {
        Self {
            cover: DEFAULT_COVER,
            max_orders: Some(DEFAULT_MAX_ORDERS),
            cache: CacheConfig::default(),
        }
    }
}

impl ArchetypeConfig {
    /// One-shot batch run: caches never evict, default order ceiling
    pub fn for_batch() -> Self {
        Self {
            cache: CacheConfig::unbounded(),
            ..Default::default()
        }
    }

    /// Long-lived process: bounded caches and a tighter order ceiling
    pub fn for_service() -> Self {
        Self {
            max_orders: Some(512),
            ..Default::default()
        }
    }

    /// Every `C(n, cover)` order, however many; only for small clusters
    pub fn exhaustive() -> Self {
        Self {
            max_orders: None,
            cache: CacheConfig::unbounded(),
            ..Default::default()
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.cover == 0 {
            return Err(ArchetypeError::invalid_config("cover must be > 0"));
        }
        if self.max_orders == Some(0) {
            return Err(ArchetypeError::invalid_config(
                "max_orders must be > 0 when set",
            ));
        }
        self.cache.validate()
    }
}

/// Capacity of each memo table; `None` means unbounded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub pair_capacity: Option<usize>,
    pub cluster_capacity: Option<usize>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            pair_capacity: Some(65_536),
            cluster_capacity: Some(4_096),
        }
    }
}

impl CacheConfig {
    pub fn unbounded() -> Self {
        Self {
            pair_capacity: None,
            cluster_capacity: None,
        }
    }

    pub fn validate(&self) -> Result<()> {
        for (name, capacity) in [
            ("pair_capacity", self.pair_capacity),
            ("cluster_capacity", self.cluster_capacity),
        ] {
            if capacity == Some(0) {
                return Err(ArchetypeError::invalid_config(format!(
                    "cache.{name} must be > 0 when set"
                )));
            }
        }
        Ok(())
    }
}
