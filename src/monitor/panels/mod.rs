//! Display surfaces for one channel.
//!
//! Each panel borrows data from the pull API and renders it; none of them
//! hold state between frames.

pub mod chart;
pub mod readings;
pub mod value;

pub use chart::TrendChart;
pub use readings::ReadingsTable;
pub use value::{ValueBox, WAITING_TEXT};
