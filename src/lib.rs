//! # thermo-monitor
//!
//! Live temperature monitoring: a simulated sensor is sampled on a fixed
//! interval, each channel (day, night) keeps a bounded recent history, and
//! every refresh derives a display-ready view of the latest reading, the
//! history table and a least-squares trend line.
//!
//! ## Pipeline
//!
//! ```text
//! RefreshScheduler ──tick──▶ SampleGenerator ──Reading──▶ ChannelBuffer
//!                                                              │ copy
//!                    DisplayFeed ◀── TrendFitter ◀── SnapshotBuilder
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use thermo_monitor::prelude::*;
//!
//! let config = Config::default();
//! let mut scheduler = RefreshScheduler::from_config(&config)?;
//! scheduler.poll(std::time::Instant::now());
//!
//! let feed = scheduler.feed();
//! println!("{}", feed.latest_text(Channel::Day)?);
//! ```
//!
//! ## Feature Flags
//!
//! - `monitor`: terminal dashboard (ratatui) and the `thermo-monitor` binary

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Data Model
// ============================================================================

/// Logical channels and channel selection.
pub mod channel;

/// Immutable readings.
pub mod reading;

// ============================================================================
// Refresh Pipeline
// ============================================================================

/// Bounded per-channel history.
pub mod buffer;

/// Synthetic sampling with injectable randomness and clock.
pub mod generator;

/// Fixed-interval refresh scheduler.
pub mod scheduler;

/// Snapshots and reading tables.
pub mod snapshot;

/// Least-squares trend fitting.
pub mod trend;

/// Pull API for display surfaces.
pub mod feed;

// ============================================================================
// Configuration & Errors
// ============================================================================

/// YAML/env configuration.
pub mod config;

/// Error types for thermo-monitor operations.
pub mod error;

pub use buffer::{ChannelBuffer, ChannelSet};
pub use channel::{Channel, ChannelSelector};
pub use config::Config;
pub use error::{Error, Result};
pub use feed::{DisplayFeed, PanelData};
pub use reading::Reading;
pub use scheduler::{RefreshScheduler, SchedulerState, SharedScheduler};
pub use snapshot::{ReadingTable, Snapshot, SnapshotBuilder};
pub use trend::{TrendFitter, TrendResult};

// ============================================================================
// Display Surfaces
// ============================================================================

/// Terminal dashboard.
#[cfg(feature = "monitor")]
#[cfg_attr(docsrs, doc(cfg(feature = "monitor")))]
pub mod monitor;

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types for convenient imports.
///
/// ```rust,ignore
/// use thermo_monitor::prelude::*;
/// ```
pub mod prelude {
    pub use crate::buffer::ChannelBuffer;
    pub use crate::channel::{Channel, ChannelSelector};
    pub use crate::config::{ChannelProfile, Config};
    pub use crate::error::{Error, Result};
    pub use crate::feed::{DisplayFeed, PanelData};
    pub use crate::generator::{Clock, ManualClock, SampleGenerator, SampleSource, SystemClock};
    pub use crate::reading::Reading;
    pub use crate::scheduler::{RefreshScheduler, SchedulerState, SharedScheduler};
    pub use crate::snapshot::{ReadingTable, Snapshot, SnapshotBuilder};
    pub use crate::trend::{Trend, TrendFitter, TrendResult};
}
