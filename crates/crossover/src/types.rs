use serde::{Deserialize, Serialize};

/// Window lengths for the crossover evaluator.
///
/// Both averages are simple means of the last N closes. The fast window
/// must be strictly shorter than the slow window; `CrossoverEvaluator::new`
/// rejects anything else.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CrossoverSettings {
    #[serde(default = "default_fast_period")]
    pub fast_period: u32,
    #[serde(default = "default_slow_period")]
    pub slow_period: u32,
}

impl Default for CrossoverSettings {
    fn default() -> Self {
        Self {
            fast_period: default_fast_period(),
            slow_period: default_slow_period(),
        }
    }
}

fn default_fast_period() -> u32 {
    10
}

fn default_slow_period() -> u32 {
    30
}
