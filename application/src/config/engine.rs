//! Dispatch engine configuration.

use super::debate::DebateConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Tasks run concurrently per drain cycle.
    pub max_concurrency: usize,
    /// Applied to every debate the engine starts.
    pub debate: DebateConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_concurrency: 5,
            debate: DebateConfig::default(),
        }
    }
}

impl EngineConfig {
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency.max(1);
        self
    }

    pub fn with_debate(mut self, debate: DebateConfig) -> Self {
        self.debate = debate;
        self
    }
}
