// LsViz - util/constants.rs
//
// Single source of truth for named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "LsViz";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "LsViz";

/// Window title shown by the desktop shell.
pub const WINDOW_TITLE: &str = "HDFS Explorer";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Loading limits
// =============================================================================

/// Default maximum number of listing entries loaded from a single file.
///
/// Listings of whole HDFS namespaces can run into tens of millions of lines;
/// the cap keeps the tree inside a few hundred megabytes of heap.
pub const DEFAULT_MAX_ENTRIES: usize = 300_000;

/// Minimum user-configurable entry cap.
pub const MIN_MAX_ENTRIES: usize = 1;

/// Maximum user-configurable entry cap.
pub const ABSOLUTE_MAX_ENTRIES: usize = 10_000_000;

/// File size above which listings are read through a memory map.
pub const DEFAULT_LARGE_FILE_THRESHOLD: u64 = 64 * 1024 * 1024; // 64 MB

/// Number of skipped (non-matching) lines reported at debug level per file.
pub const MAX_SKIPPED_LINES_LOGGED: usize = 20;

/// Maximum length of a listing line included in debug output.
pub const DEBUG_MAX_LINE_PREVIEW: usize = 200;

/// File extensions offered by the open dialog.
pub const LISTING_FILE_EXTENSIONS: &[&str] = &["txt"];

// =============================================================================
// Tree defaults
// =============================================================================

/// Path of the synthetic root sentinel.
pub const ROOT_PATH: &str = "/";

/// Number of fixed columns exposed by the tree model.
pub const COLUMN_COUNT: usize = 5;

// =============================================================================
// UI defaults
// =============================================================================

/// Default width of the Name column in points.
pub const DEFAULT_NAME_COLUMN_WIDTH: f32 = 350.0;

/// Minimum configurable Name column width.
pub const MIN_NAME_COLUMN_WIDTH: f32 = 120.0;

/// Maximum configurable Name column width.
pub const MAX_NAME_COLUMN_WIDTH: f32 = 1_200.0;

/// Default UI body font size in points.
pub const DEFAULT_FONT_SIZE: f32 = 14.0;

/// Minimum user-configurable UI font size (points).
pub const MIN_FONT_SIZE: f32 = 10.0;

/// Maximum user-configurable UI font size (points).
pub const MAX_FONT_SIZE: f32 = 24.0;

/// Maximum number of non-fatal warnings kept for the status bar.
pub const MAX_WARNINGS: usize = 100;

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";
