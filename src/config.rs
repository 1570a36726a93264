use crate::detector::DEFAULT_THRESHOLD;
use crate::error::{DDoSError, Result};
use crate::generator::{GeneratorConfig, DEFAULT_DURATION_SECS};

/// Per-second maximum used by the interactive run.
pub const INTERACTIVE_MAX_PER_SECOND: i64 = 5;

/// Raw run settings as supplied by the user. Numbers are signed so that
/// negative input is caught by [`SimulationConfig::validate`].
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub identifier: String,
    pub duration_seconds: i64,
    pub max_per_second: i64,
    pub threshold: i64,
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            identifier: String::new(),
            duration_seconds: DEFAULT_DURATION_SECS as i64,
            max_per_second: INTERACTIVE_MAX_PER_SECOND,
            threshold: DEFAULT_THRESHOLD as i64,
            seed: None,
        }
    }
}

/// Settings that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedConfig {
    pub identifier: String,
    pub generator: GeneratorConfig,
    pub threshold: usize,
    pub seed: Option<u64>,
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<ValidatedConfig> {
        if self.identifier.trim().is_empty() {
            return Err(DDoSError::invalid("ip", "no IP address given"));
        }
        if self.duration_seconds <= 0 {
            let reason = format!("must be positive, got {}", self.duration_seconds);
            return Err(DDoSError::invalid("duration", reason));
        }
        let max_per_second = u32::try_from(self.max_per_second).map_err(|_| {
            let reason = format!("out of range, got {}", self.max_per_second);
            DDoSError::invalid("max-per-second", reason)
        })?;
        if self.threshold < 0 {
            let reason = format!("must not be negative, got {}", self.threshold);
            return Err(DDoSError::invalid("threshold", reason));
        }

        Ok(ValidatedConfig {
            identifier: self.identifier.trim().to_string(),
            generator: GeneratorConfig {
                duration_seconds: self.duration_seconds as u64,
                max_per_second,
            },
            threshold: self.threshold as usize,
            seed: self.seed,
        })
    }
}
