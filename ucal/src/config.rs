//! Engine configuration

use serde::{Deserialize, Serialize};
use ucal_core::{DEFAULT_PRECISION, OUTPUT_PRECISION};

/// Options fixed at engine construction
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Significant decimal digits used while evaluating
    pub working_precision: u32,
    /// Significant digits kept when rendering a result
    pub output_precision: u32,
    /// Read `50%` as `50 * 0.01`
    pub allow_percent: bool,
    /// Check at startup that every unit reproduces its own dimensions
    pub verify_units: bool,
    /// Append ` [measure]` to rendered results
    pub include_measure: bool,
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_precision(mut self, digits: u32) -> Self {
        self.working_precision = digits.max(1);
        self
    }

    pub fn with_output_precision(mut self, digits: u32) -> Self {
        self.output_precision = digits.max(1);
        self
    }

    pub fn with_percent(mut self, enabled: bool) -> Self {
        self.allow_percent = enabled;
        self
    }

    pub fn with_verification(mut self, enabled: bool) -> Self {
        self.verify_units = enabled;
        self
    }

    pub fn with_measure(mut self, enabled: bool) -> Self {
        self.include_measure = enabled;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            working_precision: DEFAULT_PRECISION,
            output_precision: OUTPUT_PRECISION,
            allow_percent: true,
            verify_units: true,
            include_measure: false,
        }
    }
}
