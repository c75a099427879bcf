//! Error and warning types for livegraph operations.

use std::fmt;
use std::io;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in livegraph operations.
///
/// Variants up to [`Error::InvalidDimensions`] are configuration errors: they
/// are reported synchronously at construction time and no graph is created.
#[derive(Error, Debug)]
pub enum Error {
    /// Data length mismatch between x and y arrays.
    #[error("Invalid data: x has {x_len} elements, y has {y_len} elements")]
    DataLengthMismatch {
        /// Length of x data.
        x_len: usize,
        /// Length of y data.
        y_len: usize,
    },

    /// Empty data provided where at least one point is required.
    #[error("Invalid data: at least one point is required")]
    EmptyData,

    /// A data value is NaN or infinite.
    #[error("Invalid data: point {index} is not finite")]
    NonFiniteData {
        /// Index of the offending point.
        index: usize,
    },

    /// Frame rate below one frame per second.
    #[error("Invalid config: frame rate {0} is below 1 fps")]
    InvalidFrameRate(u32),

    /// Output bounds with `min > max` (or non-finite).
    #[error("Invalid bounds: min {min} is greater than max {max}")]
    InvalidBounds {
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
    },

    /// Polynomial degree unsupported or too high for the number of points.
    #[error("Invalid degree {degree} for {points} data points")]
    InvalidDegree {
        /// Requested degree.
        degree: usize,
        /// Number of data points.
        points: usize,
    },

    /// Invalid dimensions for a framebuffer or canvas layout.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// I/O error (style file reads).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// PNG encoding error.
    #[error("PNG encoding error: {0}")]
    PngEncoding(#[from] png::EncodingError),

    /// Style file could not be parsed.
    #[error("Style parse error at line {line}: {message}")]
    ConfigParse {
        /// Line number (1-based, 0 if unknown).
        line: usize,
        /// Parser message.
        message: String,
    },

    /// The embedded typeface could not be loaded.
    #[error("Font error: {0}")]
    Font(String),

    /// The least-squares system could not be solved.
    #[error("Fit error: {0}")]
    Fit(String),

    /// The overlay worker thread could not be spawned.
    #[error("Worker spawn error: {0}")]
    WorkerSpawn(String),
}

impl Error {
    /// Whether this is a construction-time configuration error.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::DataLengthMismatch { .. }
                | Self::EmptyData
                | Self::NonFiniteData { .. }
                | Self::InvalidFrameRate(_)
                | Self::InvalidBounds { .. }
                | Self::InvalidDegree { .. }
                | Self::InvalidDimensions { .. }
        )
    }
}

/// Non-fatal conditions reported to the caller and logged at `warn` level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// `start()` was called on a graph that is already running.
    AlreadyStarted {
        /// Graph title.
        title: String,
    },
    /// The frame stream was requested before the graph was started.
    UnstartedAccess {
        /// Graph title, or `None` when no graph was ever created.
        title: Option<String>,
    },
}

impl Warning {
    /// Log this warning through the `log` facade.
    pub fn emit(&self) {
        log::warn!("{self}");
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyStarted { title } => {
                write!(f, "Could not start graph '{title}': it has already been started")
            }
            Self::UnstartedAccess { title: Some(title) } => write!(
                f,
                "Could not return video source for '{title}': graphing never started"
            ),
            Self::UnstartedAccess { title: None } => write!(
                f,
                "Could not return video source: graphing never started (init_graph was never called)"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_length_mismatch() {
        let err = Error::DataLengthMismatch { x_len: 10, y_len: 20 };
        assert!(err.to_string().contains("10"));
        assert!(err.to_string().contains("20"));
        assert!(err.is_configuration());
    }

    #[test]
    fn test_frame_rate_display() {
        let err = Error::InvalidFrameRate(0);
        assert!(err.to_string().contains("below 1 fps"));
        assert!(err.is_configuration());
    }

    #[test]
    fn test_runtime_errors_are_not_configuration() {
        assert!(!Error::Font("bad".into()).is_configuration());
        assert!(!Error::Fit("singular".into()).is_configuration());
        let io = Error::from(io::Error::new(io::ErrorKind::NotFound, "gone"));
        assert!(!io.is_configuration());
    }

    #[test]
    fn test_warning_display() {
        let warn = Warning::AlreadyStarted { title: "Test Graph".into() };
        assert!(warn.to_string().contains("Test Graph"));
        assert!(warn.to_string().contains("already been started"));

        let warn = Warning::UnstartedAccess { title: Some("g".into()) };
        assert!(warn.to_string().contains("for 'g'"));
        assert!(warn.to_string().contains("never started"));

        let warn = Warning::UnstartedAccess { title: None };
        assert_eq!(
            warn.to_string(),
            "Could not return video source: graphing never started (init_graph was never called)"
        );
    }
}
