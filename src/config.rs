use crate::telemetry::{LogLevel, DEFAULT_LOG_LEVEL};
use serde::Deserialize;

pub const DEFAULT_CELL_SIZE: f64 = 40.0;
pub const DEFAULT_SPAWN_RADIUS: f64 = 200.0;
pub const DEFAULT_SPAWN_PROBABILITY: f64 = 0.4;
pub const DEFAULT_OPACITY_RANGE: (f64, f64) = (0.2, 0.7);
pub const DEFAULT_DECAY_RANGE: (f64, f64) = (0.01, 0.04);

const CELL_SIZE_BOUNDS: (f64, f64) = (4.0, 400.0);
const SPAWN_RADIUS_BOUNDS: (f64, f64) = (1.0, 4_000.0);
const SPAWN_PROBABILITY_BOUNDS: (f64, f64) = (0.0, 1.0);
const OPACITY_BOUNDS: (f64, f64) = (0.0, 1.0);
const DECAY_BOUNDS: (f64, f64) = (0.001, 1.0);

/// Tuning for one mosaic button.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MosaicConfig {
    pub cell_size: f64,
    pub spawn_radius: f64,
    pub spawn_probability: f64,
    pub opacity_range: (f64, f64),
    pub decay_range: (f64, f64),
    pub respect_reduced_motion: bool,
}

/// Page-wide settings read once at startup. The log threshold is global,
/// so it lives here rather than on each button.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AppConfig {
    pub mosaic: MosaicConfig,
    pub log_level: LogLevel,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            mosaic: MosaicConfig::default(),
            log_level: DEFAULT_LOG_LEVEL,
        }
    }
}

impl AppConfig {
    /// Parses a JSON override document. Out-of-range fields keep their
    /// defaults; malformed JSON is an error so the caller can report it.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let overrides: MosaicConfigOverrides = serde_json::from_str(raw)?;
        Ok(Self {
            log_level: overrides.log_level.unwrap_or(DEFAULT_LOG_LEVEL),
            mosaic: MosaicConfig::from_overrides(overrides),
        })
    }
}

impl Default for MosaicConfig {
    fn default() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
            spawn_radius: DEFAULT_SPAWN_RADIUS,
            spawn_probability: DEFAULT_SPAWN_PROBABILITY,
            opacity_range: DEFAULT_OPACITY_RANGE,
            decay_range: DEFAULT_DECAY_RANGE,
            respect_reduced_motion: false,
        }
    }
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct MosaicConfigOverrides {
    cell_size: Option<f64>,
    spawn_radius: Option<f64>,
    spawn_probability: Option<f64>,
    opacity_min: Option<f64>,
    opacity_max: Option<f64>,
    decay_min: Option<f64>,
    decay_max: Option<f64>,
    log_level: Option<LogLevel>,
    respect_reduced_motion: Option<bool>,
}

impl MosaicConfig {
    fn from_overrides(overrides: MosaicConfigOverrides) -> Self {
        let defaults = Self::default();

        let opacity_range = range_with_bounds(
            overrides.opacity_min,
            overrides.opacity_max,
            defaults.opacity_range,
            OPACITY_BOUNDS,
        );
        let decay_range = range_with_bounds(
            overrides.decay_min,
            overrides.decay_max,
            defaults.decay_range,
            DECAY_BOUNDS,
        );

        Self {
            cell_size: value_with_bounds(overrides.cell_size, defaults.cell_size, CELL_SIZE_BOUNDS),
            spawn_radius: value_with_bounds(
                overrides.spawn_radius,
                defaults.spawn_radius,
                SPAWN_RADIUS_BOUNDS,
            ),
            spawn_probability: value_with_bounds(
                overrides.spawn_probability,
                defaults.spawn_probability,
                SPAWN_PROBABILITY_BOUNDS,
            ),
            opacity_range,
            decay_range,
            respect_reduced_motion: overrides
                .respect_reduced_motion
                .unwrap_or(defaults.respect_reduced_motion),
        }
    }

    /// Spawn probability after honouring the reduced-motion preference.
    pub fn effective_spawn_probability(&self, prefers_reduced_motion: bool) -> f64 {
        if self.respect_reduced_motion && prefers_reduced_motion {
            0.0
        } else {
            self.spawn_probability
        }
    }
}

fn value_with_bounds(value: Option<f64>, default: f64, bounds: (f64, f64)) -> f64 {
    value
        .filter(|value| value.is_finite())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn range_with_bounds(
    min: Option<f64>,
    max: Option<f64>,
    default: (f64, f64),
    bounds: (f64, f64),
) -> (f64, f64) {
    let min = value_with_bounds(min, default.0, bounds);
    let max = value_with_bounds(max, default.1, bounds);

    if min <= max {
        (min, max)
    } else {
        default
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = AppConfig::from_json("{}").expect("valid json");
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn in_range_overrides_are_applied() {
        let config = AppConfig::from_json(
            r#"{"cellSize": 20, "spawnRadius": 120, "spawnProbability": 0.8}"#,
        )
        .expect("valid json")
        .mosaic;

        assert_eq!(config.cell_size, 20.0);
        assert_eq!(config.spawn_radius, 120.0);
        assert_eq!(config.spawn_probability, 0.8);
    }

    #[test]
    fn log_level_is_an_app_setting_not_a_button_setting() {
        let config = AppConfig::from_json(r#"{"logLevel": "debug", "cellSize": 20}"#)
            .expect("valid json");

        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.mosaic.cell_size, 20.0);
        assert_eq!(
            AppConfig::from_json(r#"{"cellSize": 20}"#)
                .expect("valid json")
                .mosaic,
            config.mosaic
        );
    }

    #[test]
    fn out_of_range_overrides_fall_back_to_defaults() {
        let config = AppConfig::from_json(r#"{"cellSize": 0, "spawnProbability": 1.5}"#)
            .expect("valid json")
            .mosaic;

        assert_eq!(config.cell_size, DEFAULT_CELL_SIZE);
        assert_eq!(config.spawn_probability, DEFAULT_SPAWN_PROBABILITY);
    }

    #[test]
    fn inverted_range_falls_back_to_default_range() {
        let config = AppConfig::from_json(r#"{"opacityMin": 0.9, "opacityMax": 0.1}"#)
            .expect("valid json")
            .mosaic;

        assert_eq!(config.opacity_range, DEFAULT_OPACITY_RANGE);
    }

    #[test]
    fn malformed_json_is_reported() {
        assert!(AppConfig::from_json("{cellSize:").is_err());
    }

    #[test]
    fn reduced_motion_only_suppresses_spawning_when_respected() {
        let mut config = MosaicConfig::default();
        assert_eq!(config.effective_spawn_probability(true), DEFAULT_SPAWN_PROBABILITY);

        config.respect_reduced_motion = true;
        assert_eq!(config.effective_spawn_probability(true), 0.0);
        assert_eq!(config.effective_spawn_probability(false), DEFAULT_SPAWN_PROBABILITY);
    }
}
