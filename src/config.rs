//! Configuration system for the temperature monitor.
//!
//! Supports YAML configuration with precedence: CLI > ENV > file > defaults.
//! The CLI layer lives in the binary; this module handles the rest.

use std::path::Path;
use std::time::Duration;

use log::info;
use serde::{Deserialize, Serialize};

use crate::channel::{Channel, ChannelSelector};
use crate::error::{Error, Result};

/// Environment variable overriding the tick period in seconds.
pub const ENV_UPDATE_INTERVAL: &str = "UPDATE_INTERVAL_SECS";
/// Environment variable overriding the per-channel history size.
pub const ENV_DEQUE_SIZE: &str = "DEQUE_SIZE";
/// Environment variable overriding the displayed channel.
pub const ENV_MODE: &str = "THERMO_MODE";

/// Largest accepted channel timestamp offset, one year in hours.
pub const MAX_OFFSET_HOURS: i64 = 24 * 366;

/// Global configuration settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Tick period in seconds.
    #[serde(default = "default_update_interval_secs")]
    pub update_interval_secs: u64,

    /// Number of readings retained per channel.
    #[serde(default = "default_deque_size")]
    pub deque_size: usize,

    /// Channel the display reads from (`day` or `night`).
    #[serde(default = "default_mode")]
    pub mode: String,
}

fn default_update_interval_secs() -> u64 {
    3
}
fn default_deque_size() -> usize {
    crate::buffer::DEFAULT_CAPACITY
}
fn default_mode() -> String {
    "day".to_string()
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            update_interval_secs: default_update_interval_secs(),
            deque_size: default_deque_size(),
            mode: default_mode(),
        }
    }
}

/// Synthetic value range and timestamp offset for one channel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChannelProfile {
    /// Lower bound of generated values (inclusive).
    pub min: f64,
    /// Upper bound of generated values (inclusive).
    pub max: f64,
    /// Hours added to the tick instant for this channel's timestamps.
    #[serde(default)]
    pub offset_hours: i64,
}

impl ChannelProfile {
    /// Default daytime profile: 104-113 F, no offset.
    #[must_use]
    pub fn day() -> Self {
        Self {
            min: 104.0,
            max: 113.0,
            offset_hours: 0,
        }
    }

    /// Default night profile: 77-86 F, twelve hours behind.
    #[must_use]
    pub fn night() -> Self {
        Self {
            min: 77.0,
            max: 86.0,
            offset_hours: -12,
        }
    }

    fn validate(&self, channel: Channel) -> Result<()> {
        let key = format!("channels.{channel}");
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(Error::invalid(key, "range bounds must be finite"));
        }
        if self.min > self.max {
            return Err(Error::invalid(
                key,
                format!("min ({}) must not exceed max ({})", self.min, self.max),
            ));
        }
        if !(self.max - self.min).is_finite() {
            return Err(Error::invalid(key, "range width must be finite"));
        }
        if self.offset_hours.unsigned_abs() > MAX_OFFSET_HOURS.unsigned_abs() {
            return Err(Error::invalid(
                format!("channels.{channel}.offset_hours"),
                format!("must be within ±{MAX_OFFSET_HOURS}"),
            ));
        }
        Ok(())
    }
}

/// Per-channel profiles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelsConfig {
    /// Daytime profile.
    #[serde(default = "ChannelProfile::day")]
    pub day: ChannelProfile,

    /// Night-time profile.
    #[serde(default = "ChannelProfile::night")]
    pub night: ChannelProfile,
}

impl Default for ChannelsConfig {
    fn default() -> Self {
        Self {
            day: ChannelProfile::day(),
            night: ChannelProfile::night(),
        }
    }
}

/// Presentation settings read by the display surfaces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Page title.
    #[serde(default = "default_title")]
    pub title: String,

    /// Unit suffix appended to values.
    #[serde(default = "default_unit")]
    pub unit: String,
}

fn default_title() -> String {
    "Temperatures in Riyadh, Saudi Arabia".to_string()
}
fn default_unit() -> String {
    "F".to_string()
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            unit: default_unit(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Configuration version.
    #[serde(default = "default_version")]
    pub version: u32,

    /// Global settings.
    #[serde(default)]
    pub global: GlobalConfig,

    /// Channel profiles.
    #[serde(default)]
    pub channels: ChannelsConfig,

    /// Display settings.
    #[serde(default)]
    pub display: DisplayConfig,
}

fn default_version() -> u32 {
    1
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            global: GlobalConfig::default(),
            channels: ChannelsConfig::default(),
            display: DisplayConfig::default(),
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .map_err(|_| Error::ConfigNotFound(path.display().to_string()))?;

        let config = Self::parse(&content)?;
        info!("loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parses configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error with line number if parsing fails.
    pub fn parse(yaml: &str) -> Result<Self> {
        serde_yaml_ng::from_str(yaml).map_err(|e| {
            let line = e.location().map(|l| l.line()).unwrap_or(0);
            Error::ConfigParse {
                line,
                message: e.to_string(),
            }
        })
    }

    /// Loads configuration with fallback to defaults.
    #[must_use]
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Applies overrides from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigInvalid`] if a variable is set but unparsable.
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Applies overrides from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigInvalid`] if a value is present but unparsable.
    pub fn apply_env_from(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(raw) = lookup(ENV_UPDATE_INTERVAL) {
            self.global.update_interval_secs = raw
                .trim()
                .parse()
                .map_err(|_| Error::invalid(ENV_UPDATE_INTERVAL, format!("'{raw}' is not an integer")))?;
        }
        if let Some(raw) = lookup(ENV_DEQUE_SIZE) {
            self.global.deque_size = raw
                .trim()
                .parse()
                .map_err(|_| Error::invalid(ENV_DEQUE_SIZE, format!("'{raw}' is not an integer")))?;
        }
        if let Some(raw) = lookup(ENV_MODE) {
            self.global.mode = raw;
        }
        Ok(())
    }

    /// Checks every value the pipeline depends on.
    ///
    /// # Errors
    ///
    /// Returns the first invalid setting found.
    pub fn validate(&self) -> Result<()> {
        if self.global.update_interval_secs == 0 {
            return Err(Error::invalid("global.update_interval_secs", "must be positive"));
        }
        if self.global.deque_size == 0 {
            return Err(Error::invalid("global.deque_size", "must be positive"));
        }
        self.mode()?;
        for channel in Channel::ALL {
            self.profile(channel).validate(channel)?;
        }
        Ok(())
    }

    /// Returns the configured display channel.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownChannel`] for an unrecognised mode.
    pub fn mode(&self) -> Result<Channel> {
        ChannelSelector::select(&self.global.mode)
    }

    /// Returns the profile for a channel.
    #[must_use]
    pub fn profile(&self, channel: Channel) -> ChannelProfile {
        match channel {
            Channel::Day => self.channels.day,
            Channel::Night => self.channels.night,
        }
    }

    /// Returns the update interval as a Duration.
    #[must_use]
    pub fn update_interval(&self) -> Duration {
        Duration::from_secs(self.global.update_interval_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_config_default() {
        let config = Config::new();

        assert_eq!(config.version, 1);
        assert_eq!(config.global.update_interval_secs, 3);
        assert_eq!(config.global.deque_size, 5);
        assert_eq!(config.mode().unwrap(), Channel::Day);
        assert_eq!(config.profile(Channel::Day), ChannelProfile::day());
        assert_eq!(config.profile(Channel::Night).offset_hours, -12);
        assert_eq!(config.display.unit, "F");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_parse_minimal() {
        let config = Config::parse("version: 1").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_config_parse_full() {
        let yaml = r#"
version: 1
global:
  update_interval_secs: 10
  deque_size: 8
  mode: night
channels:
  day: { min: 90.0, max: 95.5 }
  night: { min: 60.0, max: 70.0, offset_hours: -6 }
display:
  title: Test Rig
  unit: C
"#;

        let config = Config::parse(yaml).unwrap();

        assert_eq!(config.update_interval(), Duration::from_secs(10));
        assert_eq!(config.global.deque_size, 8);
        assert_eq!(config.mode().unwrap(), Channel::Night);
        assert_eq!(config.channels.day.offset_hours, 0);
        assert_eq!(config.channels.night.offset_hours, -6);
        assert_eq!(config.display.title, "Test Rig");
    }

    #[test]
    fn test_config_parse_error_includes_line() {
        let yaml = r#"
version: 1
global:
  deque_size: not_a_number
"#;

        let err = Config::parse(yaml).unwrap_err();
        assert!(matches!(err, Error::ConfigParse { .. }), "got {err:?}");
        assert!(err.to_string().contains('4'), "Error should include line number");
    }

    #[test]
    fn test_config_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "global:\n  deque_size: 7").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.global.deque_size, 7);
    }

    #[test]
    fn test_config_load_missing_file() {
        let err = Config::load("/nonexistent/thermo.yaml").unwrap_err();
        assert!(matches!(err, Error::ConfigNotFound(_)));
    }

    #[test]
    fn test_config_load_or_default() {
        let config = Config::load_or_default("/nonexistent/path");
        assert_eq!(config.version, 1);
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_UPDATE_INTERVAL, "1"),
            (ENV_DEQUE_SIZE, " 12 "),
            (ENV_MODE, "night"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::new();
        config
            .apply_env_from(|k| env.get(k).map(|v| (*v).to_string()))
            .unwrap();

        assert_eq!(config.global.update_interval_secs, 1);
        assert_eq!(config.global.deque_size, 12);
        assert_eq!(config.mode().unwrap(), Channel::Night);
    }

    #[test]
    fn test_env_override_rejects_garbage() {
        let mut config = Config::new();
        let err = config
            .apply_env_from(|k| (k == ENV_DEQUE_SIZE).then(|| "five".to_string()))
            .unwrap_err();

        assert!(matches!(err, Error::ConfigInvalid { ref key, .. } if key == ENV_DEQUE_SIZE));
        assert_eq!(config.global.deque_size, 5, "Failed override must not apply");
    }

    #[test]
    fn test_validate_rejects_zero_values() {
        let mut config = Config::new();
        config.global.deque_size = 0;
        assert!(config.validate().is_err());

        let mut config = Config::new();
        config.global.update_interval_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_reversed_range() {
        let mut config = Config::new();
        config.channels.day = ChannelProfile {
            min: 113.0,
            max: 104.0,
            offset_hours: 0,
        };

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("channels.day"));
    }

    #[test]
    fn test_validate_rejects_overflowing_range_width() {
        let yaml = r#"
channels:
  day: { min: -1.0e308, max: 1.0e308 }
"#;
        let config = Config::parse(yaml).unwrap();

        let err = config.validate().unwrap_err();
        assert!(matches!(err, Error::ConfigInvalid { ref key, .. } if key == "channels.day"));
    }

    #[test]
    fn test_validate_rejects_huge_offset() {
        let yaml = r#"
channels:
  night: { min: 77.0, max: 86.0, offset_hours: 9000000000000000 }
"#;
        let config = Config::parse(yaml).unwrap();

        let err = config.validate().unwrap_err();
        assert!(
            matches!(err, Error::ConfigInvalid { ref key, .. } if key == "channels.night.offset_hours"),
            "got {err:?}"
        );
    }

    #[test]
    fn test_validate_accepts_offset_at_limit() {
        let mut config = Config::new();
        config.channels.night.offset_hours = -MAX_OFFSET_HOURS;

        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_unknown_mode() {
        let mut config = Config::new();
        config.global.mode = "dawn".to_string();

        assert!(matches!(config.validate(), Err(Error::UnknownChannel(_))));
    }
}
