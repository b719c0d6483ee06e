//! Search options shared by every command
//!
//! Level 4 - Configuration

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use fiverow_core::{AlphaBetaAI, SearchConfig};

#[derive(Args, Clone, Debug, Default)]
pub struct EngineArgs {
    /// JSON file with search settings; flags below override it
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Plies searched below each candidate move
    #[arg(long)]
    pub depth: Option<u32>,

    /// Time budget per move, in seconds
    #[arg(long, value_name = "SECS")]
    pub time_limit: Option<f64>,

    /// Disable the transposition table
    #[arg(long)]
    pub no_cache: bool,

    /// Maximum transposition table entries
    #[arg(long)]
    pub cache_capacity: Option<usize>,
}

impl EngineArgs {
    /// Resolve file and flag settings into a validated config
    pub fn to_config(&self) -> Result<SearchConfig> {
        let mut config = match &self.config {
            Some(path) => SearchConfig::load(path)?,
            None => SearchConfig::default(),
        };

        if let Some(depth) = self.depth {
            config.max_depth = depth;
        }
        if let Some(secs) = self.time_limit {
            config.time_limit_secs = secs;
        }
        if self.no_cache {
            config.use_cache = false;
        }
        if let Some(capacity) = self.cache_capacity {
            config.cache_capacity = capacity;
        }

        config.validate().context("invalid search settings")?;
        Ok(config)
    }

    /// Build the AI, seeded when a seed is given
    pub fn build_ai(&self, seed: Option<u64>) -> Result<AlphaBetaAI> {
        let config = self.to_config()?;
        let seed = seed.unwrap_or_else(rand::random);
        Ok(AlphaBetaAI::with_seed(config, seed)?)
    }
}
