#![forbid(unsafe_code)]

//! Resize engine configuration.
//!
//! ```toml
//! # tabula-resize.toml
//! handle_width = 5
//! cell_min_width = 25
//! last_column_resizable = true
//! ```
//!
//! ```rust,ignore
//! let config = ResizeConfig::from_toml_file("tabula-resize.toml")?;
//! let config = ResizeConfig::from_json_str(r#"{"handle_width": 8}"#)?;
//! ```
//!
//! Missing fields take their defaults, so an empty file is a valid config.

#[cfg(feature = "config")]
use std::path::Path;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

/// Default distance (px) from a column boundary that still arms a handle.
pub const DEFAULT_HANDLE_WIDTH: u32 = 5;

/// Default narrowest width (px) a column can be dragged or committed to.
pub const DEFAULT_CELL_MIN_WIDTH: u32 = 25;

/// Column-resize plugin options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct ResizeConfig {
    /// Hit-zone width on each side of a column boundary, in pixels.
    pub handle_width: u32,
    /// Minimum column width in pixels.
    pub cell_min_width: u32,
    /// Whether the table's rightmost boundary can be dragged.
    pub last_column_resizable: bool,
}

impl Default for ResizeConfig {
    fn default() -> Self {
        Self {
            handle_width: DEFAULT_HANDLE_WIDTH,
            cell_min_width: DEFAULT_CELL_MIN_WIDTH,
            last_column_resizable: true,
        }
    }
}

impl ResizeConfig {
    #[must_use]
    pub const fn with_handle_width(mut self, handle_width: u32) -> Self {
        self.handle_width = handle_width;
        self
    }

    #[must_use]
    pub const fn with_cell_min_width(mut self, cell_min_width: u32) -> Self {
        self.cell_min_width = cell_min_width;
        self
    }

    #[must_use]
    pub const fn with_last_column_resizable(mut self, resizable: bool) -> Self {
        self.last_column_resizable = resizable;
        self
    }

    /// Reject values the engine cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.handle_width == 0 {
            return Err(ConfigError::InvalidThreshold {
                field: "handle_width",
                value: self.handle_width,
            });
        }
        if self.cell_min_width == 0 {
            return Err(ConfigError::InvalidThreshold {
                field: "cell_min_width",
                value: self.cell_min_width,
            });
        }
        Ok(())
    }

    /// Load from a TOML string.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s).map_err(ConfigError::Toml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s).map_err(ConfigError::Json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to a TOML string.
    #[cfg(feature = "config")]
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string(self).map_err(ConfigError::TomlSerialize)
    }
}

/// Configuration loading and validation errors.
#[derive(Debug)]
pub enum ConfigError {
    /// A size threshold was zero.
    InvalidThreshold { field: &'static str, value: u32 },
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "config")]
    Toml(toml::de::Error),
    /// TOML serialization error.
    #[cfg(feature = "config")]
    TomlSerialize(toml::ser::Error),
    /// JSON parse error.
    #[cfg(feature = "config")]
    Json(serde_json::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidThreshold { field, value } => {
                write!(f, "invalid {field} value {value} (must be > 0)")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "config")]
            Self::TomlSerialize(e) => write!(f, "TOML serialize error: {e}"),
            #[cfg(feature = "config")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "config")]
            Self::TomlSerialize(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Json(e) => Some(e),
            Self::InvalidThreshold { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = ResizeConfig::default();
        assert_eq!(config.handle_width, 5);
        assert_eq!(config.cell_min_width, 25);
        assert!(config.last_column_resizable);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_thresholds_are_rejected() {
        let err = ResizeConfig::default()
            .with_handle_width(0)
            .validate()
            .expect_err("zero handle width");
        assert!(matches!(
            err,
            ConfigError::InvalidThreshold {
                field: "handle_width",
                value: 0
            }
        ));
        assert!(
            ResizeConfig::default()
                .with_cell_min_width(0)
                .validate()
                .is_err()
        );
    }

    #[cfg(feature = "config")]
    #[test]
    fn partial_toml_keeps_defaults() {
        let config = ResizeConfig::from_toml_str("handle_width = 8\n").expect("valid toml");
        assert_eq!(config.handle_width, 8);
        assert_eq!(config.cell_min_width, DEFAULT_CELL_MIN_WIDTH);
    }

    #[cfg(feature = "config")]
    #[test]
    fn json_and_toml_agree() {
        let json = ResizeConfig::from_json_str(r#"{"last_column_resizable": false}"#)
            .expect("valid json");
        let toml_text = json.to_toml_string().expect("serializes");
        let back = ResizeConfig::from_toml_str(&toml_text).expect("round trips");
        assert_eq!(json, back);
        assert!(!back.last_column_resizable);
    }

    #[cfg(feature = "config")]
    #[test]
    fn file_loading_validates() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "cell_min_width = 0").expect("write");
        let err = ResizeConfig::from_toml_file(file.path()).expect_err("zero min width");
        assert!(matches!(err, ConfigError::InvalidThreshold { .. }));
    }
}
