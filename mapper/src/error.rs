//! Error types for the mapping pipeline.
//!
//! - [`LoadError`] - reading the translation table or the taxonomy sheet
//! - [`EmitError`] - writing the output mapping
//! - [`ConfigError`] - reading an optional config file
//! - [`PipelineError`] - top-level run errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use std::path::PathBuf;
use thiserror::Error;

// =============================================================================
// Loader Errors
// =============================================================================

/// Errors while loading an input file.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The input path does not exist.
    #[error("File not found: {}", .path.display())]
    MissingFile { path: PathBuf },

    /// The file exists but could not be read.
    #[error("Cannot read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The content is not well-formed for its format.
    #[error("Cannot parse {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    /// The content parsed, but expected columns or keys are absent.
    #[error("Unexpected layout in {}: {message}", .path.display())]
    Schema { path: PathBuf, message: String },
}

impl LoadError {
    pub(crate) fn parse(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::Parse {
            path: path.into(),
            message: message.to_string(),
        }
    }

    pub(crate) fn schema(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Schema {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Map an IO failure on `path` to `MissingFile` or `Read`.
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::MissingFile { path }
        } else {
            Self::Read { path, source }
        }
    }
}

// =============================================================================
// Emitter Errors
// =============================================================================

/// Errors while writing the output mapping.
#[derive(Debug, Error)]
pub enum EmitError {
    /// Destination could not be written (permissions, missing directory, disk full).
    #[error("Cannot write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Serialize(#[from] serde_json::Error),
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors from the optional JSON config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level run errors.
///
/// This is the error type returned by [`crate::transform::pipeline::run`].
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Emit(#[from] EmitError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Coarse classification reported to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MissingFile,
    Parse,
    Schema,
    Write,
    Config,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingFile => "MissingFileError",
            Self::Parse => "ParseError",
            Self::Schema => "SchemaError",
            Self::Write => "WriteError",
            Self::Config => "ConfigError",
        }
    }

    /// Process exit code for this kind. Never 0.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::MissingFile => 2,
            Self::Parse => 3,
            Self::Schema => 4,
            Self::Write => 5,
            Self::Config => 6,
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PipelineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Load(LoadError::MissingFile { .. }) => ErrorKind::MissingFile,
            // An unreadable input is reported as a parse failure of that input.
            Self::Load(LoadError::Read { .. }) | Self::Load(LoadError::Parse { .. }) => {
                ErrorKind::Parse
            }
            Self::Load(LoadError::Schema { .. }) => ErrorKind::Schema,
            Self::Emit(_) => ErrorKind::Write,
            Self::Config(_) => ErrorKind::Config,
        }
    }

    pub fn exit_code(&self) -> i32 {
        self.kind().exit_code()
    }
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for loader operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Result type for emitter operations.
pub type EmitResult<T> = Result<T, EmitError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;
