//! Entry points: resolve, search, rank.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ranking::{rank_candidates, AnchorPolicy};
use crate::schedule::{OptimizeOptions, OptimizeResult};
use crate::search::generate_candidates;

/// Default cap on generated candidates.
pub const MAX_CANDIDATES: usize = 10;

/// Knobs that are deployment configuration rather than per-request input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizerConfig {
    /// Hard cap on candidates generated (and therefore returned).
    pub max_candidates: usize,
    /// Optional post-ranking promotion rule.
    #[serde(default)]
    pub anchor: Option<AnchorPolicy>,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            max_candidates: MAX_CANDIDATES,
            anchor: None,
        }
    }
}

/// A configured optimizer. Holds no per-call state; one instance can serve
/// any number of concurrent callers.
#[derive(Debug, Clone, Default)]
pub struct Optimizer {
    config: OptimizerConfig,
}

impl Optimizer {
    pub fn new(config: OptimizerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Generate, rank and return candidate itineraries.
    ///
    /// Total over its input: unmatched titles and titles that cannot fit are
    /// reported in each candidate's `excluded` list instead of failing.
    pub fn optimize(&self, options: &OptimizeOptions) -> OptimizeResult {
        let mut candidates = generate_candidates(options, self.config.max_candidates);
        debug!(
            titles = options.movie_titles.len(),
            showtimes = options.showtimes.len(),
            generated = candidates.len(),
            "schedule search finished"
        );

        rank_candidates(&mut candidates, self.config.anchor.as_ref());
        OptimizeResult::new(candidates)
    }
}

/// Optimize with the default cap and no anchor policy.
pub fn optimize_schedule(options: &OptimizeOptions) -> OptimizeResult {
    Optimizer::default().optimize(options)
}
