//! Point-in-time views over a channel buffer.

use serde::Serialize;

use crate::buffer::ChannelBuffer;
use crate::channel::Channel;
use crate::error::{Error, Result};
use crate::reading::Reading;
use crate::trend::TrendResult;

/// Row-oriented table of readings, oldest first.
///
/// Columns are `value` and `timestamp`; see [`ReadingTable::COLUMNS`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReadingTable {
    rows: Vec<Reading>,
}

/// A table row augmented with the fitted trend value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FittedRow {
    /// The underlying reading.
    pub reading: Reading,
    /// Value of the best-fit line at this row.
    pub best_fit: f64,
}

impl ReadingTable {
    /// Column names, in display order.
    pub const COLUMNS: [&'static str; 2] = ["value", "timestamp"];

    /// Name of the column added by [`ReadingTable::with_fitted`].
    pub const FIT_COLUMN: &'static str = "best_fit_line";

    /// Wraps rows that are already in chronological order.
    #[must_use]
    pub fn from_rows(rows: Vec<Reading>) -> Self {
        Self { rows }
    }

    /// Rows, oldest first.
    #[must_use]
    pub fn rows(&self) -> &[Reading] {
        &self.rows
    }

    /// The `value` column.
    #[must_use]
    pub fn values(&self) -> Vec<f64> {
        self.rows.iter().map(Reading::value).collect()
    }

    /// The `timestamp` column, formatted.
    #[must_use]
    pub fn timestamps(&self) -> Vec<String> {
        self.rows.iter().map(Reading::timestamp_text).collect()
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Pairs every row with its fitted value.
    ///
    /// Rows beyond the end of `trend.fitted_values` are dropped, which only
    /// happens when the trend was fitted on a different table.
    #[must_use]
    pub fn with_fitted(&self, trend: &TrendResult) -> Vec<FittedRow> {
        self.rows
            .iter()
            .zip(&trend.fitted_values)
            .map(|(reading, &best_fit)| FittedRow {
                reading: *reading,
                best_fit,
            })
            .collect()
    }
}

/// Immutable materialization of one channel at one moment.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Channel the snapshot was taken from.
    pub channel: Channel,
    /// Copy of the buffer at snapshot time.
    pub buffer: ChannelBuffer,
    /// Buffer contents as rows.
    pub table: ReadingTable,
    /// Most recently appended reading.
    pub latest: Reading,
}

/// Builds [`Snapshot`]s from buffers. Holds no state.
#[derive(Debug, Clone, Copy, Default)]
pub struct SnapshotBuilder;

impl SnapshotBuilder {
    /// Copies `buffer` and derives its table and latest entry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyBuffer`] if no tick has filled the buffer yet.
    pub fn build(channel: Channel, buffer: &ChannelBuffer) -> Result<Snapshot> {
        let latest = *buffer.latest().ok_or(Error::EmptyBuffer { channel })?;

        Ok(Snapshot {
            channel,
            buffer: buffer.clone(),
            table: ReadingTable::from_rows(buffer.snapshot()),
            latest,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn filled(count: usize, capacity: usize) -> ChannelBuffer {
        let base = NaiveDate::from_ymd_opt(2024, 7, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let mut buf = ChannelBuffer::new(capacity);
        for i in 0..count {
            buf.append(Reading::new(
                100.0 + i as f64,
                base + Duration::seconds(3 * i as i64),
            ));
        }
        buf
    }

    #[test]
    fn test_build_on_empty_buffer_fails() {
        let buf = ChannelBuffer::new(5);
        let err = SnapshotBuilder::build(Channel::Day, &buf).unwrap_err();

        assert!(matches!(err, Error::EmptyBuffer { channel: Channel::Day }));
    }

    #[test]
    fn test_build_preserves_order_and_latest() {
        let buf = filled(3, 5);
        let snap = SnapshotBuilder::build(Channel::Night, &buf).unwrap();

        assert_eq!(snap.channel, Channel::Night);
        assert_eq!(snap.table.values(), vec![100.0, 101.0, 102.0]);
        assert_eq!(snap.latest.value(), 102.0);
        assert_eq!(snap.buffer, buf);
        assert_eq!(
            snap.table.timestamps(),
            vec!["2024-07-01 09:00:00", "2024-07-01 09:00:03", "2024-07-01 09:00:06"]
        );
    }

    #[test]
    fn test_build_is_pure_between_ticks() {
        let buf = filled(4, 5);

        let a = SnapshotBuilder::build(Channel::Day, &buf).unwrap();
        let b = SnapshotBuilder::build(Channel::Day, &buf).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_snapshot_unaffected_by_later_append() {
        let mut buf = filled(2, 5);
        let snap = SnapshotBuilder::build(Channel::Day, &buf).unwrap();

        buf.append(Reading::new(999.0, snap.latest.timestamp()));

        assert_eq!(snap.table.len(), 2);
        assert_eq!(snap.buffer.len(), 2);
        assert_ne!(snap.latest.value(), 999.0);
    }

    #[test]
    fn test_with_fitted_aligns_rows() {
        let table = filled(3, 5).snapshot();
        let table = ReadingTable::from_rows(table);
        let trend = TrendResult {
            slope: 1.0,
            intercept: 100.0,
            fitted_values: vec![100.0, 101.0, 102.0],
            r_squared: Some(1.0),
        };

        let rows = table.with_fitted(&trend);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2].best_fit, 102.0);
        assert_eq!(rows[2].reading, table.rows()[2]);
    }
}
