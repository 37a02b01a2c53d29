//! Runtime settings read from the environment.

use std::time::Duration;

use thiserror::Error;

use crate::constants::DEFAULT_TICK_HZ;

pub const TICK_HZ_VAR: &str = "MAZE_CHASE_TICK_HZ";
pub const FPS_VAR: &str = "MAZE_CHASE_FPS";
pub const HOLD_MS_VAR: &str = "MAZE_CHASE_HOLD_MS";
pub const SEED_VAR: &str = "MAZE_CHASE_SEED";

const DEFAULT_RENDER_FPS: u64 = 60;
const DEFAULT_HOLD_MS: u64 = 160;
const MAX_RATE: u64 = 240;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var}={value:?} is not a whole number")]
    NotANumber { var: &'static str, value: String },
    #[error("{var}={value} is outside {min}..={max}")]
    OutOfRange {
        var: &'static str,
        value: u64,
        min: u64,
        max: u64,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub tick_hz: u32,
    pub render_fps: u64,
    pub hold: Duration,
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_hz: DEFAULT_TICK_HZ,
            render_fps: DEFAULT_RENDER_FPS,
            hold: Duration::from_millis(DEFAULT_HOLD_MS),
            seed: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Builds a config from any variable source; unset variables keep
    /// their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let tick_hz = read_ranged(&lookup, TICK_HZ_VAR, 1, MAX_RATE)?
            .map_or(defaults.tick_hz, |v| v as u32);
        let render_fps =
            read_ranged(&lookup, FPS_VAR, 1, MAX_RATE)?.unwrap_or(defaults.render_fps);
        let hold = read_ranged(&lookup, HOLD_MS_VAR, 1, 10_000)?
            .map_or(defaults.hold, Duration::from_millis);
        let seed = read_u64(&lookup, SEED_VAR)?;
        Ok(Self {
            tick_hz,
            render_fps,
            hold,
            seed,
        })
    }

    pub fn frame_time(&self) -> Duration {
        Duration::from_micros(1_000_000 / self.render_fps.max(1))
    }

    pub fn tick_time(&self) -> Duration {
        Duration::from_micros(1_000_000 / u64::from(self.tick_hz.max(1)))
    }
}

fn read_u64(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<u64>, ConfigError> {
    let Some(raw) = lookup(var) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<u64>()
        .map(Some)
        .map_err(|_| ConfigError::NotANumber { var, value: raw })
}

fn read_ranged(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    min: u64,
    max: u64,
) -> Result<Option<u64>, ConfigError> {
    match read_u64(lookup, var)? {
        Some(value) if !(min..=max).contains(&value) => Err(ConfigError::OutOfRange {
            var,
            value,
            min,
            max,
        }),
        other => Ok(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn unset_environment_gives_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.tick_hz, 30);
        assert_eq!(config.frame_time(), Duration::from_micros(16_666));
    }

    #[test]
    fn overrides_are_applied() {
        let config = Config::from_lookup(lookup_from(&[
            (TICK_HZ_VAR, "60"),
            (FPS_VAR, "120"),
            (HOLD_MS_VAR, "200"),
            (SEED_VAR, " 1234 "),
        ]))
        .unwrap();
        assert_eq!(config.tick_hz, 60);
        assert_eq!(config.render_fps, 120);
        assert_eq!(config.hold, Duration::from_millis(200));
        assert_eq!(config.seed, Some(1234));
        assert_eq!(config.tick_time(), Duration::from_micros(16_666));
    }

    #[test]
    fn empty_values_count_as_unset() {
        let config = Config::from_lookup(lookup_from(&[(SEED_VAR, "")])).unwrap();
        assert_eq!(config.seed, None);
    }

    #[test]
    fn garbage_is_reported() {
        let err = Config::from_lookup(lookup_from(&[(TICK_HZ_VAR, "fast")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::NotANumber {
                var: TICK_HZ_VAR,
                value: "fast".to_string()
            }
        );
    }

    #[test]
    fn out_of_range_is_reported() {
        let err = Config::from_lookup(lookup_from(&[(FPS_VAR, "0")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::OutOfRange {
                var: FPS_VAR,
                value: 0,
                min: 1,
                max: 240
            }
        );
        assert!(err.to_string().contains("MAZE_CHASE_FPS=0"));
    }
}
