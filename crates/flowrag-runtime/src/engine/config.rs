//! Engine configuration.

use derive_builder::Builder;

/// Configuration for the workflow execution engine.
#[derive(Debug, Clone, Builder)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct EngineConfig {
    /// Number of chunks requested from the vector index per run.
    #[builder(default = "5")]
    pub top_k: usize,

    /// Maximum number of concurrent workflow runs.
    #[builder(default = "8")]
    pub max_concurrent_runs: usize,
}

impl EngineConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if self.top_k == Some(0) {
            return Err("top_k must be at least 1".into());
        }
        if self.max_concurrent_runs == Some(0) {
            return Err("max_concurrent_runs must be at least 1".into());
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            top_k: 5,
            max_concurrent_runs: 8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_applies_defaults() {
        let config = EngineConfigBuilder::default().build().unwrap();
        assert_eq!(config.top_k, 5);
        assert_eq!(config.max_concurrent_runs, 8);
    }

    #[test]
    fn builder_rejects_zero_values() {
        assert!(EngineConfigBuilder::default().top_k(0usize).build().is_err());
        assert!(
            EngineConfigBuilder::default()
                .max_concurrent_runs(0usize)
                .build()
                .is_err()
        );
    }
}
