// LsViz - core/model.rs
//
// Core data model types. Pure data definitions with no I/O, no UI,
// no platform dependencies.
//
// These types are the shared vocabulary across all layers.

use crate::util::error::TreeError;
use serde::{Deserialize, Serialize};

// =============================================================================
// Listing Entry (normalised output of parsing)
// =============================================================================

/// One decoded line of a recursive directory listing.
///
/// This is the only shape the tree core consumes; where it came from (a
/// file picked in a dialog, an appended listing, a test fixture) does not
/// matter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingEntry {
    /// Permission string, e.g. `drwxr-xr-x`. A leading `d` marks a directory.
    pub permissions: String,

    /// Owning user.
    pub owner: String,

    /// Owning group.
    pub group: String,

    /// Size in bytes (meaningless for directories).
    pub size: u64,

    /// Last-modified label, kept verbatim for display.
    pub modified: String,

    /// Absolute semantic path, `/`-separated.
    pub path: String,
}

impl ListingEntry {
    /// `owner:group` composite shown in the Owner column.
    pub fn owner_label(&self) -> String {
        format!("{}:{}", self.owner, self.group)
    }
}

// =============================================================================
// Columns
// =============================================================================

/// The five fixed columns of the tree view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Column {
    #[default]
    Name,
    Size,
    Modified,
    Permissions,
    Owner,
}

impl Column {
    /// All columns in display order.
    pub const ALL: [Column; 5] = [
        Column::Name,
        Column::Size,
        Column::Modified,
        Column::Permissions,
        Column::Owner,
    ];

    /// Zero-based position of this column.
    pub fn index(self) -> usize {
        match self {
            Column::Name => 0,
            Column::Size => 1,
            Column::Modified => 2,
            Column::Permissions => 3,
            Column::Owner => 4,
        }
    }

    /// Map a view-supplied column index back to a column.
    pub fn from_index(index: usize) -> Result<Self, TreeError> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(TreeError::UnknownColumn { index })
    }

    /// Header title.
    pub fn title(self) -> &'static str {
        match self {
            Column::Name => "Name",
            Column::Size => "Size",
            Column::Modified => "Modified",
            Column::Permissions => "Permissions",
            Column::Owner => "Owner",
        }
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

// =============================================================================
// Sorting
// =============================================================================

/// Direction of a column sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    /// The opposite direction.
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }
}

/// A (column, direction) sort request.
///
/// Memoized per directory node so a directory already sorted this way is
/// skipped on the next pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SortState {
    pub column: Column,
    pub order: SortOrder,
}

impl SortState {
    pub fn new(column: Column, order: SortOrder) -> Self {
        Self { column, order }
    }
}

// =============================================================================
// Item data
// =============================================================================

/// Kind of data a view requests for a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Formatted text.
    Display,
    /// Icon classifier (Name column only).
    Decoration,
}

/// Icon classifier for a row. Turning it into pixels is the view's job.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IconKind {
    Directory,
    File,
    /// File with a recognisable extension (stored without the dot).
    FileWithExtension(String),
}

/// A value returned by the tree model for a cell or header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellValue {
    Text(String),
    Icon(IconKind),
}

impl CellValue {
    /// Borrow the text payload, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            CellValue::Icon(_) => None,
        }
    }
}

// =============================================================================
// Load statistics
// =============================================================================

/// Counters reported by the tree builder for one batch of entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Nodes created for entries.
    pub created: usize,
    /// Ancestor directories synthesized because an entry implied them.
    pub placeholders: usize,
    /// Entries whose path already existed; metadata was merged in place.
    pub merged: usize,
    /// Entries ignored (path normalised to the root).
    pub ignored: usize,
}

impl BuildStats {
    /// Number of entries consumed.
    pub fn entries(&self) -> usize {
        self.created + self.merged + self.ignored
    }
}
