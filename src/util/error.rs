// LsViz - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// Contract violations inside the tree core (unknown coordinates, nested
// layout brackets) panic instead; everything here is recoverable.

use std::fmt;
use std::io;
use std::path::PathBuf;

use crate::core::node::NodeId;

/// Top-level error type for all LsViz operations.
#[derive(Debug)]
pub enum LsVizError {
    /// A listing file could not be loaded.
    Load(LoadError),

    /// A tree lookup failed at an API boundary.
    Tree(TreeError),

    /// Configuration loading or validation failed.
    Config(ConfigError),
}

impl fmt::Display for LsVizError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Load(e) => write!(f, "Load error: {e}"),
            Self::Tree(e) => write!(f, "Tree error: {e}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
        }
    }
}

impl std::error::Error for LsVizError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Load(e) => Some(e),
            Self::Tree(e) => Some(e),
            Self::Config(e) => Some(e),
        }
    }
}

// ---------------------------------------------------------------------------
// Load errors
// ---------------------------------------------------------------------------

/// Errors related to reading a listing file.
#[derive(Debug)]
pub enum LoadError {
    /// The path does not exist.
    NotFound { path: PathBuf },

    /// The path exists but is not a regular file.
    NotAFile { path: PathBuf },

    /// I/O error while reading the listing.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { path } => {
                write!(f, "Listing file '{}' does not exist", path.display())
            }
            Self::NotAFile { path } => {
                write!(f, "'{}' is not a regular file", path.display())
            }
            Self::Io { path, source } => {
                write!(f, "'{}': I/O error: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<LoadError> for LsVizError {
    fn from(e: LoadError) -> Self {
        Self::Load(e)
    }
}

// ---------------------------------------------------------------------------
// Tree errors
// ---------------------------------------------------------------------------

/// Errors from checked lookups on the node registry and column set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// No node with this identity is registered.
    NodeNotFound { id: NodeId },

    /// A column index outside the five fixed columns.
    UnknownColumn { index: usize },
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NodeNotFound { id } => write!(f, "No node registered with id {id}"),
            Self::UnknownColumn { index } => {
                write!(
                    f,
                    "Unknown column index {index} (expected 0-{})",
                    crate::util::constants::COLUMN_COUNT - 1
                )
            }
        }
    }
}

impl std::error::Error for TreeError {}

impl From<TreeError> for LsVizError {
    fn from(e: TreeError) -> Self {
        Self::Tree(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A config value is out of the allowed range.
    ValueOutOfRange {
        field: String,
        value: String,
        expected: String,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::ValueOutOfRange {
                field,
                value,
                expected,
            } => write!(
                f,
                "Config '{field}' = '{value}' is out of range. Expected: {expected}"
            ),
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ConfigError> for LsVizError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Convenience type alias for LsViz results.
pub type Result<T> = std::result::Result<T, LsVizError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_load_error_chains_io_source() {
        let err: LsVizError = LoadError::Io {
            path: PathBuf::from("listing.txt"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        }
        .into();
        assert!(err.to_string().contains("listing.txt"));
        let inner = err.source().expect("load error source");
        assert!(inner.source().is_some());
    }

    #[test]
    fn test_unknown_column_message_names_range() {
        let err = TreeError::UnknownColumn { index: 7 };
        assert_eq!(err.to_string(), "Unknown column index 7 (expected 0-4)");
    }
}
