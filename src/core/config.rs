//! Engine-wide settings and content defaults.
//!
//! `SystemConfig` holds knobs that apply to every trigger in a
//! `TriggerSystem`. Per-trigger settings live on `TriggerConfig`.

use serde::{Deserialize, Serialize};

/// Default camera angle tolerance for line-of-sight triggers, in radians.
pub const DEFAULT_LOOK_ANGLE_RAD: f32 = 0.1;

/// Default maximum look distance for line-of-sight triggers.
pub const DEFAULT_MAX_LOOK_DISTANCE: f32 = 100.0;

/// Tolerance used when comparing accumulated milliseconds against a target.
///
/// Frame deltas arrive as `f32` seconds, so ten ticks of `0.1` do not sum to
/// exactly one second.
pub const TIME_EPSILON_MS: f64 = 1e-3;

/// Trigger engine settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    /// Emit `TRIGGER_STAY` every tick the player remains inside a volume.
    /// Stay callbacks run regardless.
    pub emit_stay_events: bool,

    /// Upper bound for a single tick's delta, in seconds.
    /// `None` passes deltas through unchanged.
    pub max_delta_seconds: Option<f32>,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            emit_stay_events: true,
            max_delta_seconds: None,
        }
    }
}

impl SystemConfig {
    /// Enable or disable `TRIGGER_STAY` emission.
    #[must_use]
    pub fn with_stay_events(mut self, emit: bool) -> Self {
        self.emit_stay_events = emit;
        self
    }

    /// Clamp tick deltas to at most `seconds`.
    #[must_use]
    pub fn with_max_delta(mut self, seconds: f32) -> Self {
        self.max_delta_seconds = Some(seconds);
        self
    }

    /// Convert a raw tick delta into clamped milliseconds.
    ///
    /// Negative and non-finite deltas count as zero elapsed time.
    #[must_use]
    pub fn delta_ms(&self, delta_seconds: f32) -> f64 {
        if !delta_seconds.is_finite() || delta_seconds <= 0.0 {
            return 0.0;
        }
        let clamped = match self.max_delta_seconds {
            Some(max) => delta_seconds.min(max.max(0.0)),
            None => delta_seconds,
        };
        f64::from(clamped) * 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SystemConfig::default();
        assert!(config.emit_stay_events);
        assert_eq!(config.max_delta_seconds, None);
    }

    #[test]
    fn test_builder_pattern() {
        let config = SystemConfig::default()
            .with_stay_events(false)
            .with_max_delta(0.25);

        assert!(!config.emit_stay_events);
        assert_eq!(config.max_delta_seconds, Some(0.25));
    }

    #[test]
    fn test_delta_ms() {
        let config = SystemConfig::default();
        assert_eq!(config.delta_ms(0.5), 500.0);
        assert_eq!(config.delta_ms(-1.0), 0.0);
        assert_eq!(config.delta_ms(f32::NAN), 0.0);

        let clamped = SystemConfig::default().with_max_delta(0.25);
        assert_eq!(clamped.delta_ms(2.0), 250.0);
        assert_eq!(clamped.delta_ms(0.125), 125.0);
    }

    #[test]
    fn test_serialization() {
        let config: SystemConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, SystemConfig::default());

        let config = SystemConfig::default().with_max_delta(0.1);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: SystemConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
