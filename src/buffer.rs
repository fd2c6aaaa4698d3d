//! Bounded per-channel reading history.
//!
//! A [`ChannelBuffer`] is a fixed-capacity FIFO window over the most recent
//! readings:
//!
//! - **Bounded capacity**: length never exceeds the configured size
//! - **FIFO eviction**: appending at capacity drops exactly the oldest reading
//! - **Copy-out reads**: [`ChannelBuffer::snapshot`] hands back an owned copy,
//!   so later appends are never visible to an earlier reader
//!
//! # Example
//!
//! ```rust,ignore
//! use thermo_monitor::ChannelBuffer;
//!
//! let mut buffer = ChannelBuffer::new(5);
//! for reading in readings {
//!     buffer.append(reading);
//! }
//! assert!(buffer.len() <= 5);
//! ```

use std::collections::VecDeque;

use log::trace;

use crate::channel::Channel;
use crate::error::{Error, Result};
use crate::reading::Reading;

/// Default capacity (`DEQUE_SIZE`).
pub const DEFAULT_CAPACITY: usize = 5;

/// A fixed-capacity, append-only history of readings for one channel.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelBuffer {
    /// Oldest reading at the front, newest at the back.
    data: VecDeque<Reading>,
    /// Maximum capacity (never exceeded).
    capacity: usize,
}

impl ChannelBuffer {
    /// Creates an empty buffer with the given capacity.
    ///
    /// # Panics
    ///
    /// Panics if capacity is 0. Use [`ChannelBuffer::try_new`] for values that
    /// come from configuration.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "Channel buffer capacity must be greater than 0");
        Self {
            data: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Creates an empty buffer, rejecting a zero capacity.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigInvalid`] when `capacity` is 0.
    pub fn try_new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::invalid("deque_size", "must be greater than 0"));
        }
        Ok(Self::new(capacity))
    }

    /// Appends a reading, evicting the oldest one when full.
    ///
    /// O(1) amortized; the length never exceeds the capacity.
    pub fn append(&mut self, reading: Reading) {
        if self.data.len() >= self.capacity {
            if let Some(evicted) = self.data.pop_front() {
                trace!("evicted reading from {}", evicted.timestamp_text());
            }
        }
        self.data.push_back(reading);
    }

    /// Returns an independent, chronologically ordered copy of the contents.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Reading> {
        self.data.iter().copied().collect()
    }

    /// Returns the most recently appended reading, if any.
    #[must_use]
    pub fn latest(&self) -> Option<&Reading> {
        self.data.back()
    }

    /// Returns the oldest retained reading, if any.
    #[must_use]
    pub fn oldest(&self) -> Option<&Reading> {
        self.data.front()
    }

    /// Returns the current number of readings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if no reading has been appended yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns true if the next append will evict.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.data.len() >= self.capacity
    }

    /// Returns the fixed capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterates from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &Reading> {
        self.data.iter()
    }
}

impl Default for ChannelBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

/// One buffer per [`Channel`], all with the same capacity.
///
/// Only the scheduler holds this mutably; everything else reads through a
/// shared reference.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelSet {
    day: ChannelBuffer,
    night: ChannelBuffer,
}

impl ChannelSet {
    /// Creates a set of empty buffers.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigInvalid`] when `capacity` is 0.
    pub fn new(capacity: usize) -> Result<Self> {
        Ok(Self {
            day: ChannelBuffer::try_new(capacity)?,
            night: ChannelBuffer::try_new(capacity)?,
        })
    }

    /// Returns the buffer for a channel.
    #[must_use]
    pub fn get(&self, channel: Channel) -> &ChannelBuffer {
        match channel {
            Channel::Day => &self.day,
            Channel::Night => &self.night,
        }
    }

    pub(crate) fn get_mut(&mut self, channel: Channel) -> &mut ChannelBuffer {
        match channel {
            Channel::Day => &mut self.day,
            Channel::Night => &mut self.night,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================


// ============================================================================
// Property-based tests with proptest
// ============================================================================
