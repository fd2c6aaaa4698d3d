//! Pull API for display surfaces.
//!
//! Every call copies the channel's buffer first, so nothing a display does
//! can observe or cause a mutation.

use log::debug;

use crate::buffer::ChannelSet;
use crate::channel::Channel;
use crate::error::Result;
use crate::reading::Reading;
use crate::snapshot::{ReadingTable, Snapshot, SnapshotBuilder};
use crate::trend::{TrendFitter, TrendResult};

/// Default unit suffix for [`DisplayFeed::latest_text`].
pub const DEFAULT_UNIT: &str = "F";

/// Everything one refresh of a channel's display needs.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelData {
    /// Channel the data belongs to.
    pub channel: Channel,
    /// Most recent reading.
    pub latest: Reading,
    /// Current history, oldest first.
    pub table: ReadingTable,
    /// Trend line, absent while fewer than two readings exist.
    pub trend: Option<TrendResult>,
}

/// Read-only view used by value boxes, tables and charts.
#[derive(Debug, Clone, Copy)]
pub struct DisplayFeed<'a> {
    channels: &'a ChannelSet,
    unit: &'a str,
}

impl<'a> DisplayFeed<'a> {
    /// Creates a feed over `channels` using [`DEFAULT_UNIT`].
    #[must_use]
    pub fn new(channels: &'a ChannelSet) -> Self {
        Self {
            channels,
            unit: DEFAULT_UNIT,
        }
    }

    /// Uses a different unit suffix.
    #[must_use]
    pub fn with_unit(mut self, unit: &'a str) -> Self {
        self.unit = unit;
        self
    }

    /// Fresh snapshot of a channel.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::EmptyBuffer`] before the first tick.
    pub fn snapshot(&self, channel: Channel) -> Result<Snapshot> {
        SnapshotBuilder::build(channel, self.channels.get(channel))
    }

    /// Latest value formatted as `"<value> <unit>"`, e.g. `"108.4 F"`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::EmptyBuffer`] before the first tick.
    pub fn latest_text(&self, channel: Channel) -> Result<String> {
        let snapshot = self.snapshot(channel)?;
        Ok(format!("{:.1} {}", snapshot.latest.value(), self.unit))
    }

    /// Latest timestamp in the fixed display format.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::EmptyBuffer`] before the first tick.
    pub fn latest_timestamp(&self, channel: Channel) -> Result<String> {
        Ok(self.snapshot(channel)?.latest.timestamp_text())
    }

    /// The full current history as rows.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::EmptyBuffer`] before the first tick.
    pub fn table(&self, channel: Channel) -> Result<ReadingTable> {
        Ok(self.snapshot(channel)?.table)
    }

    /// Trend line aligned with [`DisplayFeed::table`].
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::EmptyBuffer`], [`crate::Error::InsufficientData`]
    /// or [`crate::Error::DegenerateFit`].
    pub fn trend(&self, channel: Channel) -> Result<TrendResult> {
        TrendFitter::fit(&self.snapshot(channel)?.table)
    }

    /// Latest reading, table and trend from a single snapshot.
    ///
    /// The fitter only fails with [`crate::Error::InsufficientData`] or
    /// [`crate::Error::DegenerateFit`]; either leaves `trend` as `None`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::EmptyBuffer`] before the first tick.
    pub fn panel(&self, channel: Channel) -> Result<PanelData> {
        let snapshot = self.snapshot(channel)?;
        let trend = match TrendFitter::fit(&snapshot.table) {
            Ok(trend) => Some(trend),
            Err(e) => {
                debug!("no trend line for {channel} channel: {e}");
                None
            }
        };

        Ok(PanelData {
            channel,
            latest: snapshot.latest,
            table: snapshot.table,
            trend,
        })
    }
}
