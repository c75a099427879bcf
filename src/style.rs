//! Graph themes and resolved style configuration.
//!
//! A [`GraphTheme`] names one of a closed set of presets; [`GraphStyle`] is
//! the fully resolved set of colors, marker radius and frame rate the
//! renderer works from. Styles can also be loaded from YAML, where every
//! field is optional and falls back to the chosen theme's preset.

use crate::color::Rgb;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Dashboard theme the graph should blend in with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GraphTheme {
    /// White background, dark labels.
    #[default]
    Light,
    /// Dark grey background, light labels.
    Dark,
    /// Near-black blue background, light labels.
    Midnight,
}

/// Shape of the data point markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointMarker {
    /// 1px circle outline.
    #[default]
    Outline,
    /// Solid disc.
    Filled,
}

/// Theme-dependent values of a preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ThemePreset {
    background: Rgb,
    label: Rgb,
    accent: Rgb,
}

/// Preset lookup table, indexed by [`GraphTheme::index`].
const THEME_PRESETS: [ThemePreset; 3] = [
    // Light
    ThemePreset {
        background: Rgb::new(255, 255, 255),
        label: Rgb::BLACK,
        accent: Rgb::new(18, 148, 246),
    },
    // Dark
    ThemePreset {
        background: Rgb::new(33, 33, 33),
        label: Rgb::WHITE,
        accent: Rgb::new(239, 64, 49),
    },
    // Midnight
    ThemePreset {
        background: Rgb::new(16, 16, 25),
        label: Rgb::WHITE,
        accent: Rgb::new(119, 39, 198),
    },
];

const DEFAULT_GRID_COLOR: Rgb = Rgb::new(233, 233, 234);
const DEFAULT_CHECKER_COLOR: Rgb = Rgb::new(0, 255, 0);
const DEFAULT_EQUATION_COLOR: Rgb = Rgb::new(255, 0, 0);
const DEFAULT_POINT_RADIUS: u32 = 4;
const DEFAULT_FPS: u32 = 10;

impl GraphTheme {
    /// All themes, in table order.
    pub const ALL: [Self; 3] = [Self::Light, Self::Dark, Self::Midnight];

    const fn index(self) -> usize {
        match self {
            Self::Light => 0,
            Self::Dark => 1,
            Self::Midnight => 2,
        }
    }

    const fn preset(self) -> ThemePreset {
        THEME_PRESETS[self.index()]
    }

    /// Accent color used for the curve and data points.
    #[must_use]
    pub const fn accent(self) -> Rgb {
        self.preset().accent
    }

    /// Canvas background color.
    #[must_use]
    pub const fn background(self) -> Rgb {
        self.preset().background
    }
}

/// Resolved style of a graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStyle {
    /// Canvas background.
    pub background: Rgb,
    /// Grid line color.
    pub grid_line: Rgb,
    /// Tick label color.
    pub label: Rgb,
    /// Curve and data point color.
    pub line: Rgb,
    /// Data point marker radius in pixels; 0 disables markers.
    pub point_radius: u32,
    /// Data point marker shape.
    pub point_marker: PointMarker,
    /// Tracked-point marker and value label color.
    pub checker: Rgb,
    /// Equation caption color.
    pub equation: Rgb,
    /// Target frame rate of the stream; must be at least 1.
    pub fps: u32,
}

impl Default for GraphStyle {
    fn default() -> Self {
        Self::from_theme(GraphTheme::default())
    }
}

impl From<GraphTheme> for GraphStyle {
    fn from(theme: GraphTheme) -> Self {
        Self::from_theme(theme)
    }
}

impl GraphStyle {
    /// Resolve a theme preset into a style.
    #[must_use]
    pub const fn from_theme(theme: GraphTheme) -> Self {
        let preset = theme.preset();
        Self {
            background: preset.background,
            grid_line: DEFAULT_GRID_COLOR,
            label: preset.label,
            line: preset.accent,
            point_radius: DEFAULT_POINT_RADIUS,
            point_marker: PointMarker::Outline,
            checker: DEFAULT_CHECKER_COLOR,
            equation: DEFAULT_EQUATION_COLOR,
            fps: DEFAULT_FPS,
        }
    }

    /// Set the target frame rate.
    #[must_use]
    pub const fn with_fps(mut self, fps: u32) -> Self {
        self.fps = fps;
        self
    }

    /// Set the data point radius (0 disables markers).
    #[must_use]
    pub const fn with_point_radius(mut self, radius: u32) -> Self {
        self.point_radius = radius;
        self
    }

    /// Set the data point marker shape.
    #[must_use]
    pub const fn with_point_marker(mut self, marker: PointMarker) -> Self {
        self.point_marker = marker;
        self
    }

    /// Check the style can drive a stream.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFrameRate`] if `fps` is below 1.
    pub fn validate(&self) -> Result<()> {
        if self.fps < 1 {
            return Err(Error::InvalidFrameRate(self.fps));
        }
        Ok(())
    }

    /// Time budget of a single frame.
    #[must_use]
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.fps.max(1)))
    }

    /// Parse a style from YAML.
    ///
    /// # Errors
    ///
    /// Returns an error with line number if parsing fails, or a configuration
    /// error if the resolved style is invalid.
    pub fn parse(yaml: &str) -> Result<Self> {
        let file: StyleFile = serde_yaml_ng::from_str(yaml).map_err(|e| {
            let line = e.location().map(|l| l.line()).unwrap_or(0);
            Error::ConfigParse { line, message: e.to_string() }
        })?;

        let style = file.resolve();
        style.validate()?;
        Ok(style)
    }

    /// Load a style from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }
}

/// On-disk style: a theme plus optional overrides.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct StyleFile {
    theme: GraphTheme,
    background: Option<Rgb>,
    grid_line: Option<Rgb>,
    label: Option<Rgb>,
    line: Option<Rgb>,
    point_radius: Option<u32>,
    point_marker: Option<PointMarker>,
    checker: Option<Rgb>,
    equation: Option<Rgb>,
    fps: Option<u32>,
}

impl StyleFile {
    fn resolve(self) -> GraphStyle {
        let base = GraphStyle::from_theme(self.theme);
        GraphStyle {
            background: self.background.unwrap_or(base.background),
            grid_line: self.grid_line.unwrap_or(base.grid_line),
            label: self.label.unwrap_or(base.label),
            line: self.line.unwrap_or(base.line),
            point_radius: self.point_radius.unwrap_or(base.point_radius),
            point_marker: self.point_marker.unwrap_or(base.point_marker),
            checker: self.checker.unwrap_or(base.checker),
            equation: self.equation.unwrap_or(base.equation),
            fps: self.fps.unwrap_or(base.fps),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_light_defaults() {
        let style = GraphStyle::default();
        assert_eq!(style.background, Rgb::WHITE);
        assert_eq!(style.label, Rgb::BLACK);
        assert_eq!(style.line, Rgb::new(18, 148, 246));
        assert_eq!(style.grid_line, Rgb::new(233, 233, 234));
        assert_eq!(style.checker, Rgb::GREEN);
        assert_eq!(style.equation, Rgb::RED);
        assert_eq!(style.point_radius, 4);
        assert_eq!(style.point_marker, PointMarker::Outline);
        assert_eq!(style.fps, 10);
    }

    #[test]
    fn test_dark_themes_use_light_labels() {
        for theme in [GraphTheme::Dark, GraphTheme::Midnight] {
            let style = GraphStyle::from_theme(theme);
            assert_eq!(style.label, Rgb::WHITE);
            assert_eq!(style.line, theme.accent());
            assert_eq!(style.background, theme.background());
        }
        assert_eq!(GraphTheme::Dark.background(), Rgb::new(33, 33, 33));
        assert_eq!(GraphTheme::Midnight.accent(), Rgb::new(119, 39, 198));
    }

    #[test]
    fn test_validate_frame_rate() {
        assert!(GraphStyle::default().validate().is_ok());
        let err = GraphStyle::default().with_fps(0).validate().unwrap_err();
        assert!(matches!(err, Error::InvalidFrameRate(0)));
    }

    #[test]
    fn test_frame_interval() {
        let style = GraphStyle::default().with_fps(20);
        assert_eq!(style.frame_interval(), Duration::from_millis(50));
    }

    #[test]
    fn test_parse_theme_with_overrides() {
        let yaml = r"
theme: midnight
fps: 25
checker: [255, 255, 0]
";
        let style = GraphStyle::parse(yaml).unwrap();
        assert_eq!(style.background, GraphTheme::Midnight.background());
        assert_eq!(style.fps, 25);
        assert_eq!(style.checker, Rgb::new(255, 255, 0));
        assert_eq!(style.point_radius, 4);
    }

    #[test]
    fn test_parse_point_marker() {
        let style = GraphStyle::parse("point_marker: filled").unwrap();
        assert_eq!(style.point_marker, PointMarker::Filled);

        let err = GraphStyle::parse("point_marker: star").unwrap_err();
        assert!(matches!(err, Error::ConfigParse { line: 1, .. }));
    }

    #[test]
    fn test_parse_empty_is_light_default() {
        let style = GraphStyle::parse("{}").unwrap();
        assert_eq!(style, GraphStyle::default());
    }

    #[test]
    fn test_parse_rejects_zero_fps() {
        let result = GraphStyle::parse("fps: 0");
        assert!(matches!(result, Err(Error::InvalidFrameRate(0))));
    }

    #[test]
    fn test_parse_error_includes_line() {
        let yaml = "theme: dark\nfps: 10\npoint_radius: lots\n";
        let err = GraphStyle::parse(yaml).unwrap_err();
        match err {
            Error::ConfigParse { line, .. } => assert_eq!(line, 3),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "theme: dark\npoint_radius: 0").unwrap();

        let style = GraphStyle::load(file.path()).unwrap();
        assert_eq!(style.background, Rgb::new(33, 33, 33));
        assert_eq!(style.point_radius, 0);
    }

    #[test]
    fn test_load_missing_file() {
        let result = GraphStyle::load("/nonexistent/style.yaml");
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
