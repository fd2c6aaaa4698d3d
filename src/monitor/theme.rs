//! Day and night colour themes.
//!
//! The day channel renders warm (red/orange), the night channel cool
//! (blue/dark). Colours are hex strings so themes can round-trip through
//! serde.

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

use crate::channel::Channel;

/// A two-stop colour gradient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gradient {
    /// Colour at t = 0.
    pub start: String,
    /// Colour at t = 1.
    pub end: String,
}

impl Gradient {
    /// Creates a gradient from two hex colours.
    #[must_use]
    pub fn new(start: &str, end: &str) -> Self {
        Self {
            start: start.to_string(),
            end: end.to_string(),
        }
    }

    /// Samples the gradient at position t (clamped to 0.0 - 1.0).
    #[must_use]
    pub fn sample(&self, t: f64) -> Color {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let (r1, g1, b1) = parse_rgb(&self.start);
        let (r2, g2, b2) = parse_rgb(&self.end);

        let mix = |a: u8, b: u8| ((1.0 - t) * f64::from(a) + t * f64::from(b)).round() as u8;
        Color::Rgb(mix(r1, r2), mix(g1, g2), mix(b1, b2))
    }

    /// Samples the gradient for `value` positioned within `[min, max]`.
    #[must_use]
    pub fn sample_in(&self, value: f64, min: f64, max: f64) -> Color {
        let span = max - min;
        if span <= 0.0 {
            return self.sample(1.0);
        }
        self.sample((value - min) / span)
    }
}

/// Colours for one channel's dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    /// Theme name.
    pub name: String,
    /// Header and border accent.
    pub accent: String,
    /// Background colour.
    pub background: String,
    /// Foreground text colour.
    pub foreground: String,
    /// Scatter points in the chart.
    pub series: String,
    /// Regression line in the chart.
    pub fit_line: String,
    /// Value-box colour from the bottom to the top of the channel range.
    pub temperature: Gradient,
}

impl Theme {
    /// Warm red/orange theme for the day channel.
    #[must_use]
    pub fn day() -> Self {
        Self {
            name: "day".to_string(),
            accent: "#f97316".to_string(),
            background: "#1c1917".to_string(),
            foreground: "#fef3c7".to_string(),
            series: "#ef4444".to_string(),
            fit_line: "#facc15".to_string(),
            temperature: Gradient::new("#f59e0b", "#dc2626"),
        }
    }

    /// Cool blue/dark theme for the night channel.
    #[must_use]
    pub fn night() -> Self {
        Self {
            name: "night".to_string(),
            accent: "#3b82f6".to_string(),
            background: "#0f172a".to_string(),
            foreground: "#dbeafe".to_string(),
            series: "#2563eb".to_string(),
            fit_line: "#a5b4fc".to_string(),
            temperature: Gradient::new("#1e3a8a", "#60a5fa"),
        }
    }

    /// Theme for a channel.
    #[must_use]
    pub fn for_channel(channel: Channel) -> Self {
        match channel {
            Channel::Day => Self::day(),
            Channel::Night => Self::night(),
        }
    }

    /// Accent colour.
    #[must_use]
    pub fn accent(&self) -> Color {
        parse_color(&self.accent)
    }

    /// Background colour.
    #[must_use]
    pub fn bg(&self) -> Color {
        parse_color(&self.background)
    }

    /// Foreground colour.
    #[must_use]
    pub fn fg(&self) -> Color {
        parse_color(&self.foreground)
    }

    /// Scatter point colour.
    #[must_use]
    pub fn series(&self) -> Color {
        parse_color(&self.series)
    }

    /// Regression line colour.
    #[must_use]
    pub fn fit_line(&self) -> Color {
        parse_color(&self.fit_line)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::day()
    }
}

/// Parses a hex colour string to a ratatui Color; invalid input is white.
fn parse_color(hex: &str) -> Color {
    let (r, g, b) = parse_rgb(hex);
    Color::Rgb(r, g, b)
}

fn parse_rgb(hex: &str) -> (u8, u8, u8) {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return (255, 255, 255);
    }

    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).unwrap_or(255);
    (channel(0..2), channel(2..4), channel(4..6))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("#FF0000"), Color::Rgb(255, 0, 0));
        assert_eq!(parse_color("00ff00"), Color::Rgb(0, 255, 0));
        assert_eq!(parse_color("#abc"), Color::Rgb(255, 255, 255));
    }

    #[test]
    fn test_gradient_endpoints_and_midpoint() {
        let gradient = Gradient::new("#000000", "#FFFFFF");

        assert_eq!(gradient.sample(0.0), Color::Rgb(0, 0, 0));
        assert_eq!(gradient.sample(1.0), Color::Rgb(255, 255, 255));
        assert_eq!(gradient.sample(2.0), Color::Rgb(255, 255, 255));
        if let Color::Rgb(r, _, _) = gradient.sample(0.5) {
            assert!((i32::from(r) - 128).abs() <= 1);
        }
    }

    #[test]
    fn test_sample_in_range() {
        let gradient = Gradient::new("#000000", "#FF0000");

        assert_eq!(gradient.sample_in(104.0, 104.0, 113.0), Color::Rgb(0, 0, 0));
        assert_eq!(gradient.sample_in(113.0, 104.0, 113.0), Color::Rgb(255, 0, 0));
        assert_eq!(gradient.sample_in(100.0, 100.0, 100.0), Color::Rgb(255, 0, 0));
    }

    #[test]
    fn test_channel_themes_differ() {
        let day = Theme::for_channel(Channel::Day);
        let night = Theme::for_channel(Channel::Night);

        assert_eq!(day.name, "day");
        assert_eq!(night.name, "night");
        assert_ne!(day.accent(), night.accent());
        assert_ne!(day.series(), night.series());
    }

    #[test]
    fn test_theme_colors_are_rgb() {
        let theme = Theme::default();

        assert!(matches!(theme.bg(), Color::Rgb(_, _, _)));
        assert!(matches!(theme.fg(), Color::Rgb(_, _, _)));
        assert!(matches!(theme.fit_line(), Color::Rgb(_, _, _)));
    }
}
