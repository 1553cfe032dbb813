#![forbid(unsafe_code)]

//! Tabula error model and graceful degradation.
//!
//! Each subsystem keeps its own typed error. [`Error`] unifies them for
//! hosts, and [`Error::degradation`] says how the editor keeps working when
//! one occurs. No resize error is fatal: the worst outcome is dropping the
//! current interaction.

use std::fmt;

pub use tabula_doc::DocError;
pub use tabula_resize::{ConfigError, GridError};

// ── Unified Error ───────────────────────────────────────────────────────

/// Top-level error type for Tabula hosts.
#[derive(Debug)]
pub enum Error {
    /// Document model failure (positions, steps, stale transactions).
    Doc(DocError),
    /// Table mapping failure.
    Grid(GridError),
    /// Configuration loading or validation failure.
    Config(ConfigError),
}

/// Standard result type for Tabula APIs.
pub type Result<T> = std::result::Result<T, Error>;

// ── Graceful Degradation ────────────────────────────────────────────────

/// What the host should do when an error occurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegradationAction {
    /// Drop the armed or dragged handle and return to idle.
    DegradeToIdle,
    /// Discard the width commit; the document stays as it was.
    SkipCommit,
    /// Leave the table unprojected (no handles, no column group).
    SkipTable,
    /// Fall back to the default resize configuration.
    KeepDefaults,
    /// Ignore the pointer input that triggered the error.
    RefuseInput,
}

impl Error {
    /// Determine the graceful degradation action for this error.
    pub fn degradation(&self) -> DegradationAction {
        match self {
            Self::Doc(DocError::PositionOutOfRange { .. })
            | Self::Doc(DocError::NoNodeAt { .. })
            | Self::Doc(DocError::NotACell { .. }) => DegradationAction::DegradeToIdle,
            Self::Doc(DocError::InvalidReplace { .. })
            | Self::Doc(DocError::StaleTransaction { .. }) => DegradationAction::SkipCommit,

            Self::Grid(GridError::EmptyTable { .. }) => DegradationAction::SkipTable,
            Self::Grid(GridError::NotACell { .. }) => DegradationAction::RefuseInput,
            Self::Grid(GridError::CellNotInMap { .. }) => DegradationAction::DegradeToIdle,

            Self::Config(_) => DegradationAction::KeepDefaults,
        }
    }

    /// Error type label for tracing fields.
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::Doc(_) => "doc",
            Self::Grid(_) => "grid",
            Self::Config(_) => "config",
        }
    }

    /// Whether the document may have diverged from what the user sees, so
    /// the host should re-render the affected table.
    pub fn needs_rerender(&self) -> bool {
        matches!(
            self.degradation(),
            DegradationAction::SkipCommit | DegradationAction::SkipTable
        )
    }
}

// ── Display ─────────────────────────────────────────────────────────────

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Doc(err) => write!(f, "document: {err}"),
            Self::Grid(err) => write!(f, "table grid: {err}"),
            Self::Config(err) => write!(f, "config: {err}"),
        }
    }
}

impl fmt::Display for DegradationAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DegradeToIdle => write!(f, "degrade_to_idle"),
            Self::SkipCommit => write!(f, "skip_commit"),
            Self::SkipTable => write!(f, "skip_table"),
            Self::KeepDefaults => write!(f, "keep_defaults"),
            Self::RefuseInput => write!(f, "refuse_input"),
        }
    }
}

// ── std::error::Error ───────────────────────────────────────────────────

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Doc(err) => Some(err),
            Self::Grid(err) => Some(err),
            Self::Config(err) => Some(err),
        }
    }
}

// ── From conversions ────────────────────────────────────────────────────

impl From<DocError> for Error {
    fn from(err: DocError) -> Self {
        Self::Doc(err)
    }
}

impl From<GridError> for Error {
    fn from(err: GridError) -> Self {
        Self::Grid(err)
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

// ── Tests ───────────────────────────────────────────────────────────────
