use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Loading", inline)]
#[serde(default)]
/// Simulated loading bar pacing.
pub struct LoadingOptions {
    /// Milliseconds between loading bar increments.
    #[schemars(title = "Tick Period (ms)", range(min = 1, max = 1000))]
    pub period_ms: u64,
    /// Percent added per increment.
    #[schemars(title = "Step (%)", range(min = 1, max = 100))]
    pub step: u8,
}

impl LoadingOptions {
    /// Tick period as a [`Duration`].
    #[must_use]
    pub fn period(&self) -> Duration {
        Duration::from_millis(self.period_ms)
    }
}

impl Default for LoadingOptions {
    fn default() -> Self {
        Self {
            period_ms: 40,
            step: 1,
        }
    }
}
