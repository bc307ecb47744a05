//! Validated game configuration

use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::{DEFAULT_COLUMNS, DEFAULT_CONNECT_LENGTH, DEFAULT_ROWS, DEFAULT_SEARCH_DEPTH};

/// The smallest allowed value for rows, columns and connect length
pub const MIN_DIMENSION: usize = 3;

/// A configuration setting that can be changed with [`Config::set`]
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum ConfigKey {
    Rows,
    Columns,
    ConnectLength,
    SearchDepth,
}

impl ConfigKey {
    pub fn name(&self) -> &'static str {
        match self {
            ConfigKey::Rows => "rows",
            ConfigKey::Columns => "columns",
            ConfigKey::ConnectLength => "connect_length",
            ConfigKey::SearchDepth => "search_depth",
        }
    }

    /// Whether changing this setting changes the shape of the game
    pub fn resets_game(&self) -> bool {
        match self {
            ConfigKey::SearchDepth => false,
            _ => true,
        }
    }
}

impl FromStr for ConfigKey {
    type Err = ConfigError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        match key {
            "rows" => Ok(ConfigKey::Rows),
            "columns" => Ok(ConfigKey::Columns),
            "connect_length" => Ok(ConfigKey::ConnectLength),
            "search_depth" => Ok(ConfigKey::SearchDepth),
            _ => Err(ConfigError::UnknownKey(key.to_string())),
        }
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Board shape, win condition and default search depth
///
/// Every `Config` satisfies `rows, columns >= connect_length >= 3` and
/// `search_depth >= 1`.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Config {
    rows: usize,
    columns: usize,
    connect_length: usize,
    search_depth: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            columns: DEFAULT_COLUMNS,
            connect_length: DEFAULT_CONNECT_LENGTH,
            search_depth: DEFAULT_SEARCH_DEPTH,
        }
    }
}

impl Config {
    pub fn new(
        rows: usize,
        columns: usize,
        connect_length: usize,
        search_depth: u32,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            rows,
            columns,
            connect_length,
            search_depth,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn connect_length(&self) -> usize {
        self.connect_length
    }

    pub fn search_depth(&self) -> u32 {
        self.search_depth
    }

    /// The number of cells on the board
    pub fn capacity(&self) -> usize {
        self.rows * self.columns
    }

    pub fn get(&self, key: ConfigKey) -> usize {
        match key {
            ConfigKey::Rows => self.rows,
            ConfigKey::Columns => self.columns,
            ConfigKey::ConnectLength => self.connect_length,
            ConfigKey::SearchDepth => self.search_depth as usize,
        }
    }

    /// Changes one setting, leaving `self` untouched if the result would be invalid
    pub fn set(&mut self, key: ConfigKey, value: usize) -> Result<(), ConfigError> {
        let mut updated = *self;
        match key {
            ConfigKey::Rows => updated.rows = value,
            ConfigKey::Columns => updated.columns = value,
            ConfigKey::ConnectLength => updated.connect_length = value,
            ConfigKey::SearchDepth => {
                updated.search_depth = u32::try_from(value).map_err(|_| {
                    ConfigError::OutOfBounds {
                        key: key.name(),
                        value,
                        reason: "search depth does not fit in 32 bits",
                    }
                })?
            }
        }
        updated.validate_key(key)?;
        *self = updated;
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        [
            ConfigKey::ConnectLength,
            ConfigKey::Rows,
            ConfigKey::Columns,
            ConfigKey::SearchDepth,
        ]
        .iter()
        .try_for_each(|&key| self.validate_key(key))
    }

    // reports the violation in terms of the key that was just changed
    fn validate_key(&self, key: ConfigKey) -> Result<(), ConfigError> {
        let value = self.get(key);
        let out_of_bounds = |reason| ConfigError::OutOfBounds {
            key: key.name(),
            value,
            reason,
        };
        match key {
            ConfigKey::Rows | ConfigKey::Columns => {
                if value < MIN_DIMENSION {
                    return Err(out_of_bounds("must be at least 3"));
                }
                if value < self.connect_length {
                    return Err(out_of_bounds("must be at least the connect length"));
                }
            }
            ConfigKey::ConnectLength => {
                if value < MIN_DIMENSION {
                    return Err(out_of_bounds("must be at least 3"));
                }
                if value > self.rows.min(self.columns) {
                    return Err(out_of_bounds("must fit on the board"));
                }
            }
            ConfigKey::SearchDepth => {
                if value < 1 {
                    return Err(out_of_bounds("must be at least 1"));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_classic_connect_four() {
        let config = Config::default();
        assert_eq!(
            (config.rows(), config.columns(), config.connect_length()),
            (6, 7, 4)
        );
        assert_eq!(Config::new(6, 7, 4, 7), Ok(config));
    }

    #[test]
    fn rejects_small_dimensions() {
        let mut config = Config::default();
        assert!(config.set(ConfigKey::Columns, 2).is_err());
        assert!(config.set(ConfigKey::Rows, 0).is_err());
        assert!(config.set(ConfigKey::SearchDepth, 0).is_err());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn connect_length_must_fit() {
        let mut config = Config::default();
        assert!(config.set(ConfigKey::ConnectLength, 7).is_err());
        assert!(config.set(ConfigKey::ConnectLength, 6).is_ok());
        // shrinking the board below the connect length is refused
        assert!(config.set(ConfigKey::Rows, 5).is_err());
        assert!(config.set(ConfigKey::ConnectLength, 3).is_ok());
        assert!(config.set(ConfigKey::Rows, 3).is_ok());
        assert_eq!(config.rows(), 3);
    }

    #[test]
    fn parses_known_keys() {
        assert_eq!("connect_length".parse(), Ok(ConfigKey::ConnectLength));
        assert_eq!(
            "colour".parse::<ConfigKey>(),
            Err(ConfigError::UnknownKey("colour".to_string()))
        );
        assert!(!ConfigKey::SearchDepth.resets_game());
    }

    #[test]
    fn new_validates_every_field() {
        assert!(Config::new(3, 3, 4, 1).is_err());
        assert!(Config::new(10, 10, 5, 0).is_err());
        assert!(Config::new(3, 3, 3, 1).is_ok());
    }
}
