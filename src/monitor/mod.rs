//! Terminal dashboard for thermo-monitor.
//!
//! Shows one channel at a time: the current temperature and timestamp, the
//! most recent readings with their fitted values, and a scatter chart with
//! the regression line. The screen is redrawn on every loop iteration and
//! the scheduler appends new readings every refresh interval.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use thermo_monitor::monitor::App;
//! use thermo_monitor::Config;
//!
//! let config = Config::load_or_default("config.yaml");
//! let mut app = App::new(config)?;
//! app.run()?;
//! ```

// ============================================================================
// Re-export ratatui for downstream crates
// ============================================================================

pub use ratatui;

// ============================================================================
// Panels & Theming
// ============================================================================

pub mod panels;
pub mod theme;

pub use theme::{Gradient, Theme};

// ============================================================================
// Application
// ============================================================================

pub mod app;
pub mod input;

pub use app::App;
pub use input::{Action, InputHandler};
