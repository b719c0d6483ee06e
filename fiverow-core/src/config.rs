//! Search configuration

use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// Tunable search limits.
///
/// Unknown fields are rejected when loading; missing fields take defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    /// Plies searched below each root candidate
    pub max_depth: u32,
    /// Wall-clock budget for one move decision
    pub time_limit_secs: f64,
    /// Reuse scores of positions already searched deeply enough
    pub use_cache: bool,
    /// Entries kept before the cache is flushed
    pub cache_capacity: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: 5,
            time_limit_secs: 1.0,
            use_cache: true,
            cache_capacity: 1 << 20,
        }
    }
}

impl SearchConfig {
    /// Config for a given depth, everything else default
    pub fn with_depth(max_depth: u32) -> Self {
        Self {
            max_depth,
            ..Default::default()
        }
    }

    pub fn time_limit(mut self, secs: f64) -> Self {
        self.time_limit_secs = secs;
        self
    }

    pub fn cache(mut self, enabled: bool) -> Self {
        self.use_cache = enabled;
        self
    }

    pub fn time_budget(&self) -> Duration {
        Duration::from_secs_f64(self.time_limit_secs)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_depth == 0 {
            return Err(EngineError::InvalidDepth);
        }
        // from_secs_f64 panics on overflow, so cap at roughly a day
        if !self.time_limit_secs.is_finite()
            || self.time_limit_secs <= 0.0
            || self.time_limit_secs > 86_400.0
        {
            return Err(EngineError::InvalidTimeLimit(self.time_limit_secs));
        }
        if self.use_cache && self.cache_capacity == 0 {
            return Err(EngineError::InvalidCacheCapacity);
        }
        Ok(())
    }

    /// Load and validate from a JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: SearchConfig = serde_json::from_str(&content)
            .with_context(|| format!("parsing {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }
}
