//! Logical channels and the single point that picks one for a display.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One of the two independently monitored temperature series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    /// Daytime series.
    Day,
    /// Night-time series, timestamped twelve hours behind the day series.
    Night,
}

impl Channel {
    /// Every channel, in tick order.
    pub const ALL: [Channel; 2] = [Channel::Day, Channel::Night];

    /// Lowercase name, as accepted by [`ChannelSelector::select`].
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Night => "night",
        }
    }

    /// The other channel.
    #[must_use]
    pub fn toggle(self) -> Self {
        match self {
            Self::Day => Self::Night,
            Self::Night => Self::Day,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Channel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        ChannelSelector::select(s)
    }
}

/// Maps an externally supplied mode flag onto a [`Channel`].
///
/// Configuration values, CLI flags and key bindings all go through here, so
/// no display code branches on raw strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChannelSelector;

impl ChannelSelector {
    /// Selects the channel named by `mode`.
    ///
    /// Matching ignores case and surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownChannel`] for anything other than `day` or
    /// `night`. Unknown modes are never defaulted.
    pub fn select(mode: &str) -> Result<Channel> {
        let trimmed = mode.trim();
        if trimmed.eq_ignore_ascii_case("day") {
            Ok(Channel::Day)
        } else if trimmed.eq_ignore_ascii_case("night") {
            Ok(Channel::Night)
        } else {
            Err(Error::UnknownChannel(mode.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_day_and_night_are_distinct() {
        let day = ChannelSelector::select("day").unwrap();
        let night = ChannelSelector::select("night").unwrap();

        assert_eq!(day, Channel::Day);
        assert_eq!(night, Channel::Night);
        assert_ne!(day, night);
    }

    #[test]
    fn test_select_unknown_channel() {
        let err = ChannelSelector::select("dawn").unwrap_err();
        assert!(matches!(err, Error::UnknownChannel(ref m) if m == "dawn"));
    }

    #[test]
    fn test_select_ignores_case_and_whitespace() {
        assert_eq!(ChannelSelector::select(" NIGHT ").unwrap(), Channel::Night);
        assert_eq!(ChannelSelector::select("Day").unwrap(), Channel::Day);
    }

    #[test]
    fn test_select_empty_is_error() {
        assert!(ChannelSelector::select("").is_err());
    }

    #[test]
    fn test_from_str_round_trips_display() {
        for channel in Channel::ALL {
            let parsed: Channel = channel.to_string().parse().unwrap();
            assert_eq!(parsed, channel);
        }
    }

    #[test]
    fn test_toggle() {
        assert_eq!(Channel::Day.toggle(), Channel::Night);
        assert_eq!(Channel::Night.toggle().toggle(), Channel::Night);
    }
}
