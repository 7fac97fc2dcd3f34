use log::{warn, Level};
use serde::Deserialize;
use web_sys::Document;

use crate::error::ConfigError;

/// Id of the optional `<script type="application/json">` element the host
/// page can use to override any of the defaults below.
pub const CONFIG_ELEMENT_ID: &str = "viewport-animator-config";

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnimatorConfig {
    /// Fraction of an element that has to be on screen before it is revealed.
    pub threshold: f64,
    /// Bottom edge of the viewport is pulled up by this much when testing visibility.
    pub bottom_inset_px: f64,
    pub counter_duration_ms: f64,
    pub counter_steps: u32,
    pub parallax_rate: f64,
    /// Scroll distance over which the hero fades from 1 to 0. Not clamped.
    pub fade_distance_px: f64,
    pub header_shadow: String,
    pub connection_count: u32,
    pub pulse_base_secs: f64,
    pub pulse_step_secs: f64,
}

impl Default for AnimatorConfig {
    fn default() -> Self {
        Self {
            threshold: 0.3,
            bottom_inset_px: 100.0,
            counter_duration_ms: 2000.0,
            counter_steps: 60,
            parallax_rate: 0.5,
            fade_distance_px: 600.0,
            header_shadow: "0 2px 10px rgba(0, 0, 0, 0.1)".to_string(),
            connection_count: 5,
            pulse_base_secs: 2.0,
            pulse_step_secs: 0.5,
        }
    }
}

impl AnimatorConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(ConfigError::Invalid("threshold must be between 0 and 1"));
        }
        if self.counter_steps == 0 {
            return Err(ConfigError::Invalid("counterSteps must be at least 1"));
        }
        if !(self.counter_duration_ms > 0.0) {
            return Err(ConfigError::Invalid("counterDurationMs must be positive"));
        }
        if self.fade_distance_px == 0.0 {
            return Err(ConfigError::Invalid("fadeDistancePx must not be zero"));
        }
        if self.connection_count == 0 {
            return Err(ConfigError::Invalid("connectionCount must be at least 1"));
        }
        Ok(())
    }

    /// Reads the config element from the host page, falling back to defaults
    /// when it is absent or broken.
    pub fn load(document: &Document) -> Self {
        let raw = document
            .get_element_by_id(CONFIG_ELEMENT_ID)
            .and_then(|element| element.text_content());

        match raw {
            Some(raw) => Self::from_json(&raw).unwrap_or_else(|err| {
                warn!("Ignoring #{}: {}", CONFIG_ELEMENT_ID, err);
                Self::default()
            }),
            None => Self::default(),
        }
    }

    pub fn counter_interval_ms(&self) -> f64 {
        self.counter_duration_ms / self.counter_steps as f64
    }

    /// `rootMargin` for the intersection observer.
    pub fn root_margin(&self) -> String {
        format!("0px 0px -{}px 0px", self.bottom_inset_px)
    }
}
