use std::{env, path::PathBuf, str::FromStr, time::Duration};

use thiserror::Error;

use crate::grid::Field;

pub const SCREEN_WIDTH: u32 = 640;
pub const SCREEN_HEIGHT: u32 = 480;
pub const CELL_SIZE: u32 = 20;
pub const TICKS_PER_SECOND: u32 = 10;
pub const MAX_FOOD_ATTEMPTS: u32 = 1000;

const TICKS_VAR: &str = "SNAKE_TICKS_PER_SECOND";
const RESET_POLICY_VAR: &str = "SNAKE_RESET_POLICY";
const LOG_VAR: &str = "SNAKE_LOG";

/// What happens to the occupied cells when the snake resets.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ResetPolicy {
    /// The body shrinks to a single cell at the center right away.
    #[default]
    FullClear,
    /// Only the target length drops to 1. The old cells stay occupied
    /// until the next move trims them.
    LengthOnly,
}

impl FromStr for ResetPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "full-clear" => Ok(ResetPolicy::FullClear),
            "length-only" => Ok(ResetPolicy::LengthOnly),
            other => Err(ConfigError::InvalidVar { var: RESET_POLICY_VAR, value: other.to_string() }),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("screen size {width}x{height} is not a multiple of the cell size {cell_size}")]
    UnalignedScreen { width: u32, height: u32, cell_size: u32 },
    #[error("screen and cell sizes must be non-zero")]
    ZeroSize,
    #[error("the field needs room for the snake and the food")]
    FieldTooSmall,
    #[error("ticks per second must be at least 1")]
    ZeroTickRate,
    #[error("food placement needs at least one attempt")]
    ZeroAttempts,
    #[error("invalid value {value:?} for {var}")]
    InvalidVar { var: &'static str, value: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub screen_width: u32,
    pub screen_height: u32,
    pub cell_size: u32,
    pub ticks_per_second: u32,
    pub reset_policy: ResetPolicy,
    pub max_food_attempts: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            cell_size: CELL_SIZE,
            ticks_per_second: TICKS_PER_SECOND,
            reset_policy: ResetPolicy::default(),
            max_food_attempts: MAX_FOOD_ATTEMPTS,
        }
    }
}

impl Config {
    /// Defaults, overridden by `SNAKE_TICKS_PER_SECOND` and `SNAKE_RESET_POLICY`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        if let Some(value) = lookup(TICKS_VAR) {
            config.ticks_per_second = value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidVar { var: TICKS_VAR, value })?;
        }

        if let Some(value) = lookup(RESET_POLICY_VAR) {
            config.reset_policy = value.parse()?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.screen_width == 0 || self.screen_height == 0 || self.cell_size == 0 {
            return Err(ConfigError::ZeroSize);
        }

        if self.screen_width % self.cell_size != 0 || self.screen_height % self.cell_size != 0 {
            return Err(ConfigError::UnalignedScreen {
                width: self.screen_width,
                height: self.screen_height,
                cell_size: self.cell_size,
            });
        }

        if self.field().cell_count() < 2 {
            return Err(ConfigError::FieldTooSmall);
        }

        if self.ticks_per_second == 0 {
            return Err(ConfigError::ZeroTickRate);
        }

        if self.max_food_attempts == 0 {
            return Err(ConfigError::ZeroAttempts);
        }

        Ok(())
    }

    pub fn field(&self) -> Field {
        Field::new(self.screen_width / self.cell_size, self.screen_height / self.cell_size)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(1) / self.ticks_per_second
    }
}

pub fn log_path() -> PathBuf {
    env::var_os(LOG_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|| env::temp_dir().join("the_snake.log"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn default_geometry() {
        let config = Config::default();
        assert_eq!(config.validate(), Ok(()));
        let field = config.field();
        assert_eq!((field.width(), field.height()), (32, 24));
        assert_eq!(config.tick_interval(), Duration::from_millis(100));
        assert_eq!(config.reset_policy, ResetPolicy::FullClear);
    }

    #[test]
    fn env_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            (TICKS_VAR, "25"),
            (RESET_POLICY_VAR, "length-only"),
        ]))
        .unwrap();
        assert_eq!(config.ticks_per_second, 25);
        assert_eq!(config.reset_policy, ResetPolicy::LengthOnly);
    }

    #[test]
    fn rejects_bad_values() {
        let err = Config::from_lookup(lookup_from(&[(TICKS_VAR, "fast")])).unwrap_err();
        assert_eq!(err, ConfigError::InvalidVar { var: TICKS_VAR, value: "fast".into() });

        let err = Config::from_lookup(lookup_from(&[(TICKS_VAR, "0")])).unwrap_err();
        assert_eq!(err, ConfigError::ZeroTickRate);

        assert!(Config::from_lookup(lookup_from(&[(RESET_POLICY_VAR, "sometimes")])).is_err());
    }

    #[test]
    fn rejects_unaligned_screen() {
        let config = Config { screen_width: 650, ..Config::default() };
        assert!(matches!(config.validate(), Err(ConfigError::UnalignedScreen { .. })));

        let config = Config { cell_size: 0, ..Config::default() };
        assert_eq!(config.validate(), Err(ConfigError::ZeroSize));

        let config = Config { screen_width: 20, screen_height: 20, ..Config::default() };
        assert_eq!(config.validate(), Err(ConfigError::FieldTooSmall));
    }
}
