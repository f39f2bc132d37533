//! Scheduler configuration

use crate::easing::Easing;
use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};

/// Settings a [`TweenScheduler`](crate::TweenScheduler) is built with.
///
/// Can be embedded in a host's own config file:
///
/// ```toml
/// default_easing = "ease_out_quad"
/// pool_capacity = 64
/// time_scale = 1.0
/// ```
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Easing installed on tweens that were not given one
    pub default_easing: Easing,
    /// Records constructed up front so early requests do not allocate
    pub pool_capacity: usize,
    /// Multiplier applied to every `update` delta
    pub time_scale: f32,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            default_easing: Easing::Linear,
            pool_capacity: 0,
            time_scale: 1.0,
        }
    }
}

impl SchedulerConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: SchedulerConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !is_valid_time_scale(self.time_scale) {
            return Err(ConfigError::InvalidTimeScale(self.time_scale));
        }
        Ok(())
    }

    /// Builder: set the default easing
    pub fn with_default_easing(mut self, easing: Easing) -> Self {
        self.default_easing = easing;
        self
    }

    /// Builder: set the prewarmed pool size
    pub fn with_pool_capacity(mut self, capacity: usize) -> Self {
        self.pool_capacity = capacity;
        self
    }

    /// Builder: set the time scale
    pub fn with_time_scale(mut self, time_scale: f32) -> Self {
        self.time_scale = time_scale;
        self
    }
}

pub(crate) fn is_valid_time_scale(time_scale: f32) -> bool {
    time_scale.is_finite() && time_scale >= 0.0
}
