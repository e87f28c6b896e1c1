// LsViz - app/state.rs
//
// Application state management. Holds the tree model, the view's expansion
// state, the files loaded so far, and the status line.
// Owned by the eframe::App implementation.

use crate::app::loader;
use crate::app::view::{self, TreeViewState, VisibleRow};
use crate::core::expansion::{self, ExpansionView};
use crate::core::model::{BuildStats, Column, ListingEntry, SortOrder, SortState};
use crate::core::parser::ParseConfig;
use crate::core::tree_model::{LayoutEvent, ModelIndex, TreeModel};
use crate::platform::config::AppConfig;
use crate::util::constants;
use crate::util::error::Result;
use std::cell::Cell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Outcome of loading one listing file.
#[derive(Debug, Clone)]
pub struct LoadSummary {
    pub path: PathBuf,
    pub stats: BuildStats,
    pub lines_skipped: u64,
    pub truncated: bool,
}

/// Top-level application state.
#[derive(Debug)]
pub struct AppState {
    /// Validated configuration from config.toml and the command line.
    pub config: AppConfig,

    /// Current tree (None until the first listing is loaded or after Clear).
    pub model: Option<TreeModel>,

    /// Expansion state of the tree panel.
    pub view: TreeViewState,

    /// Listing files merged into the current tree, in load order.
    pub loaded_files: Vec<PathBuf>,

    /// Files queued for loading on the next frame (CLI arguments).
    pub pending_loads: Vec<PathBuf>,

    /// Status message for the status bar.
    pub status_message: String,

    /// Non-fatal warnings (config problems, truncated listings).
    pub warnings: Vec<String>,

    /// Whether debug mode is enabled.
    pub debug_mode: bool,

    /// Incremented by the model on every completed layout change.
    layout_generation: Rc<Cell<u64>>,

    rows: Vec<VisibleRow>,
    /// (layout generation, view revision) the row cache was built from.
    rows_built_for: Option<(u64, u64)>,
}

impl AppState {
    pub fn new(config: AppConfig, debug_mode: bool) -> Self {
        Self {
            config,
            model: None,
            view: TreeViewState::default(),
            loaded_files: Vec::new(),
            pending_loads: Vec::new(),
            status_message: "Ready. Open an HDFS file list to begin.".to_string(),
            warnings: Vec::new(),
            debug_mode,
            layout_generation: Rc::new(Cell::new(0)),
            rows: Vec::new(),
            rows_built_for: None,
        }
    }

    /// Record a non-fatal warning, bounded to the most recent ones.
    pub fn push_warning(&mut self, warning: String) {
        if self.warnings.len() >= constants::MAX_WARNINGS {
            self.warnings.remove(0);
        }
        self.warnings.push(warning);
    }

    // -------------------------------------------------------------------------
    // Loading
    // -------------------------------------------------------------------------

    /// Read, parse and merge one listing file into the current tree.
    ///
    /// On failure the tree is left unchanged and the status line reports
    /// the error.
    pub fn load_listing_file(&mut self, path: &Path) -> Result<LoadSummary> {
        let parse_config = ParseConfig {
            max_entries: self.config.max_entries,
        };
        let parsed = match loader::read_listing_file(
            path,
            &parse_config,
            self.config.large_file_threshold,
        ) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::error!(file = %path.display(), error = %e, "Failed to load listing");
                self.status_message = format!("Error: {e}");
                return Err(e.into());
            }
        };

        let stats = self.load_entries(&parsed.entries);
        self.loaded_files.push(path.to_path_buf());

        if parsed.truncated {
            self.push_warning(format!(
                "{}: stopped after {} entries (max_entries)",
                path.display(),
                self.config.max_entries
            ));
        }
        self.status_message = format!(
            "Loaded {} entries from {} ({} nodes in tree{})",
            parsed.entries.len(),
            path.display(),
            self.node_count(),
            if parsed.truncated { ", truncated" } else { "" }
        );

        Ok(LoadSummary {
            path: path.to_path_buf(),
            stats,
            lines_skipped: parsed.lines_skipped,
            truncated: parsed.truncated,
        })
    }

    /// Merge a batch of entries into the current tree, creating the tree if
    /// none exists, then open the single-child chain and sort what is
    /// expanded.
    pub fn load_entries(&mut self, entries: &[ListingEntry]) -> BuildStats {
        let generation = &self.layout_generation;
        let model = self.model.get_or_insert_with(|| new_model(generation));
        let stats = model.load_entries(entries);

        let view = &mut self.view;
        model.with_layout_change(|model| {
            expansion::expand_single_child_chain(model, view);
            let root = model.invalid_index();
            expansion::sort_expanded(model, view, &root);
        });
        stats
    }

    /// Drop the tree and all view state.
    pub fn clear(&mut self) {
        self.model = None;
        self.view.clear();
        self.loaded_files.clear();
        self.pending_loads.clear();
        self.warnings.clear();
        self.rows.clear();
        self.rows_built_for = None;
        self.status_message = "Ready.".to_string();
        tracing::info!("File tree cleared");
    }

    // -------------------------------------------------------------------------
    // View interaction
    // -------------------------------------------------------------------------

    /// Expand or collapse the item at `index`.
    ///
    /// The coordinate comes from a row painted in an earlier frame, so it is
    /// re-resolved by identity; one that no longer names a node in the
    /// current tree is ignored.
    pub fn toggle_expanded(&mut self, index: &ModelIndex) {
        let Some(model) = self.model.as_ref() else {
            return;
        };
        let Some(id) = index.node_id() else {
            return;
        };
        if let Err(e) = model.registry().get(id) {
            tracing::debug!(error = %e, "Ignoring toggle for a stale row");
            return;
        }
        let index = model.index_for_node(id, Column::Name);
        if self.view.is_expanded(&index) {
            self.view.set_expanded(&index, false);
        } else {
            self.view.set_expanded(&index, true);
            self.on_expanded(&index);
        }
    }

    /// Sort a directory that was just expanded, and any expanded
    /// directories below it.
    pub fn on_expanded(&mut self, index: &ModelIndex) {
        let Some(model) = self.model.as_mut() else {
            return;
        };
        let view = &self.view;
        model.with_layout_change(|model| expansion::sort_expanded(model, view, index));
    }

    /// Header click: same column flips the order, a new column starts
    /// ascending. Expanded items survive the resort.
    pub fn on_header_clicked(&mut self, column: Column) {
        let Some(model) = self.model.as_mut() else {
            return;
        };
        let current = model.sorting();
        let order = if current.column == column {
            current.order.toggled()
        } else {
            SortOrder::Ascending
        };
        model.sort(column, order);

        let view = &mut self.view;
        model.with_layout_change(|model| {
            let root = model.invalid_index();
            let mut expanded = expansion::capture_expanded(model, view, &root);
            expansion::sort_expanded(model, view, &root);
            expansion::restore_expanded(model, view, &mut expanded, &root);
        });
        tracing::debug!(column = %column, ?order, "Tree resorted");
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Current sort, for the header indicator.
    pub fn sorting(&self) -> Option<SortState> {
        self.model.as_ref().map(TreeModel::sorting)
    }

    /// Nodes in the tree excluding the root.
    pub fn node_count(&self) -> usize {
        self.model.as_ref().map_or(0, TreeModel::node_count)
    }

    /// Flattened rows of the expanded tree, rebuilt only when the model
    /// layout or the expansion state changed since the last call.
    pub fn visible_rows(&mut self) -> &[VisibleRow] {
        let Some(model) = self.model.as_ref() else {
            self.rows.clear();
            return &self.rows;
        };
        let key = (self.layout_generation.get(), self.view.revision());
        if self.rows_built_for != Some(key) {
            self.rows = view::flatten_rows(model, &self.view);
            self.rows_built_for = Some(key);
            tracing::trace!(rows = self.rows.len(), "Visible rows rebuilt");
        }
        &self.rows
    }

    /// Rows as of the last `visible_rows` call.
    pub fn rows(&self) -> &[VisibleRow] {
        &self.rows
    }
}

/// Fresh model whose layout notifications bump `generation`.
fn new_model(generation: &Rc<Cell<u64>>) -> TreeModel {
    let mut model = TreeModel::new();
    let generation = Rc::clone(generation);
    model.subscribe(move |event| {
        if event == LayoutEvent::Changed {
            generation.set(generation.get() + 1);
        }
    });
    model
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::error::{LoadError, LsVizError};
    use std::cell::RefCell;

    fn entry(perms: &str, size: u64, path: &str) -> ListingEntry {
        ListingEntry {
            permissions: perms.to_string(),
            owner: "hdfs".to_string(),
            group: "supergroup".to_string(),
            size,
            modified: "2024-01-01 00:00".to_string(),
            path: path.to_string(),
        }
    }

    fn names(state: &mut AppState) -> Vec<(String, usize)> {
        let rows = state.visible_rows().to_vec();
        let model = state.model.as_ref().unwrap();
        rows.iter()
            .map(|r| (model.node(&r.index).name().to_string(), r.depth))
            .collect()
    }

    fn find_row(state: &mut AppState, name: &str) -> ModelIndex {
        let rows = state.visible_rows().to_vec();
        let model = state.model.as_ref().unwrap();
        rows.iter()
            .find(|r| model.node(&r.index).name() == name)
            .map(|r| r.index)
            .unwrap_or_else(|| panic!("no visible row named {name}"))
    }

    #[test]
    fn test_load_expands_single_child_chain_and_sorts() {
        let mut state = AppState::new(AppConfig::default(), false);
        state.load_entries(&[
            entry("-rw-r--r--", 1, "/user/hdfs/b.txt"),
            entry("drwxr-xr-x", 0, "/user/hdfs/a"),
            entry("-rw-r--r--", 1, "/user/hdfs/a/x"),
        ]);
        assert_eq!(
            names(&mut state),
            vec![
                ("user".to_string(), 0),
                ("hdfs".to_string(), 1),
                ("a".to_string(), 2),
                ("b.txt".to_string(), 2),
            ]
        );
    }

    #[test]
    fn test_append_merges_into_existing_tree() {
        let mut state = AppState::new(AppConfig::default(), false);
        state.load_entries(&[entry("-rw-r--r--", 1, "/data/one")]);
        let before = state.node_count();
        state.load_entries(&[entry("-rw-r--r--", 1, "/data/two")]);
        assert_eq!(state.node_count(), before + 1);
        let model = state.model.as_ref().unwrap();
        let data = model.index(0, Column::Name, &model.invalid_index());
        assert_eq!(model.row_count(&data), 2);
    }

    #[test]
    fn test_header_click_toggles_then_resets_order() {
        let mut state = AppState::new(AppConfig::default(), false);
        state.load_entries(&[entry("-rw-r--r--", 1, "/a"), entry("-rw-r--r--", 2, "/b")]);
        assert_eq!(
            state.sorting(),
            Some(SortState::new(Column::Name, SortOrder::Ascending))
        );
        state.on_header_clicked(Column::Name);
        assert_eq!(
            state.sorting(),
            Some(SortState::new(Column::Name, SortOrder::Descending))
        );
        state.on_header_clicked(Column::Size);
        assert_eq!(
            state.sorting(),
            Some(SortState::new(Column::Size, SortOrder::Ascending))
        );
    }

    #[test]
    fn test_resort_keeps_expanded_directories_open() {
        let mut state = AppState::new(AppConfig::default(), false);
        state.load_entries(&[
            entry("-rw-r--r--", 1, "/alpha/inner.txt"),
            entry("-rw-r--r--", 1, "/beta/deep/leaf.txt"),
            entry("-rw-r--r--", 1, "/beta/other.txt"),
        ]);
        let beta = find_row(&mut state, "beta");
        state.toggle_expanded(&beta);
        let deep = find_row(&mut state, "deep");
        state.toggle_expanded(&deep);

        state.on_header_clicked(Column::Name);
        assert_eq!(
            names(&mut state),
            vec![
                ("beta".to_string(), 0),
                ("deep".to_string(), 1),
                ("leaf.txt".to_string(), 2),
                ("other.txt".to_string(), 1),
                ("alpha".to_string(), 0),
            ]
        );
    }

    #[test]
    fn test_expanding_sorts_directory_lazily() {
        let mut state = AppState::new(AppConfig::default(), false);
        state.load_entries(&[
            entry("-rw-r--r--", 1, "/d/zeta"),
            entry("-rw-r--r--", 1, "/d/alpha"),
            entry("-rw-r--r--", 1, "/e"),
        ]);
        state.on_header_clicked(Column::Name);
        state.on_header_clicked(Column::Name);
        let d = find_row(&mut state, "d");
        let id = d.node_id().unwrap();
        assert!(state
            .model
            .as_ref()
            .unwrap()
            .registry()
            .node(id)
            .current_sort_state()
            .is_none());

        state.toggle_expanded(&d);
        let rows = names(&mut state);
        assert_eq!(rows[1], ("alpha".to_string(), 1));
        assert_eq!(rows[2], ("zeta".to_string(), 1));
    }

    fn record_layout_events(state: &mut AppState) -> Rc<RefCell<Vec<LayoutEvent>>> {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        state
            .model
            .as_mut()
            .unwrap()
            .subscribe(move |event| sink.borrow_mut().push(event));
        events
    }

    #[test]
    fn test_header_click_is_one_layout_change() {
        let mut state = AppState::new(AppConfig::default(), false);
        state.load_entries(&[
            entry("-rw-r--r--", 1, "/a/x"),
            entry("-rw-r--r--", 2, "/a/y"),
            entry("-rw-r--r--", 3, "/b"),
        ]);
        let a = find_row(&mut state, "a");
        state.toggle_expanded(&a);
        let events = record_layout_events(&mut state);
        let generation = state.layout_generation.get();

        state.on_header_clicked(Column::Size);
        assert_eq!(
            *events.borrow(),
            vec![LayoutEvent::AboutToChange, LayoutEvent::Changed]
        );
        assert_eq!(state.layout_generation.get(), generation + 1);
        assert!(!state.model.as_ref().unwrap().is_layout_changing());
    }

    #[test]
    fn test_expanding_is_one_layout_change_and_rebuilds_rows() {
        let mut state = AppState::new(AppConfig::default(), false);
        state.load_entries(&[entry("-rw-r--r--", 1, "/a/x"), entry("-rw-r--r--", 1, "/b")]);
        assert_eq!(state.visible_rows().len(), 2);
        let events = record_layout_events(&mut state);
        let generation = state.layout_generation.get();

        let a = find_row(&mut state, "a");
        state.toggle_expanded(&a);
        assert_eq!(
            *events.borrow(),
            vec![LayoutEvent::AboutToChange, LayoutEvent::Changed]
        );
        assert_eq!(state.layout_generation.get(), generation + 1);
        assert_eq!(state.visible_rows().len(), 3);

        // Collapsing only changes view state.
        state.toggle_expanded(&a);
        assert_eq!(events.borrow().len(), 2);
        assert_eq!(state.visible_rows().len(), 2);
    }

    #[test]
    fn test_toggle_ignores_rows_from_a_cleared_tree() {
        let mut state = AppState::new(AppConfig::default(), false);
        state.load_entries(&[entry("-rw-r--r--", 1, "/a/x"), entry("-rw-r--r--", 1, "/b")]);
        let stale = find_row(&mut state, "a");
        state.clear();
        state.load_entries(&[entry("-rw-r--r--", 1, "/a/x"), entry("-rw-r--r--", 1, "/b")]);

        state.toggle_expanded(&stale);
        assert_eq!(state.view.expanded_count(), 0);
        assert_eq!(state.visible_rows().len(), 2);
    }

    #[test]
    fn test_node_count_excludes_only_the_root() {
        let mut state = AppState::new(AppConfig::default(), false);
        assert_eq!(state.node_count(), 0);
        state.load_entries(&[entry("-rw-r--r--", 1, "/only")]);
        assert_eq!(state.node_count(), 1);
        state.load_entries(&[entry("-rw-r--r--", 1, "/dir/leaf")]);
        assert_eq!(state.node_count(), 3);
    }

    #[test]
    fn test_visible_rows_follow_collapse() {
        let mut state = AppState::new(AppConfig::default(), false);
        state.load_entries(&[entry("-rw-r--r--", 1, "/a/x"), entry("-rw-r--r--", 1, "/b")]);
        let a = find_row(&mut state, "a");
        state.toggle_expanded(&a);
        assert_eq!(state.visible_rows().len(), 3);
        state.toggle_expanded(&a);
        assert_eq!(state.visible_rows().len(), 2);
    }

    #[test]
    fn test_clear_drops_everything() {
        let mut state = AppState::new(AppConfig::default(), false);
        state.load_entries(&[entry("-rw-r--r--", 1, "/a/x")]);
        state.clear();
        assert!(state.model.is_none());
        assert_eq!(state.view.expanded_count(), 0);
        assert!(state.visible_rows().is_empty());
        assert_eq!(state.node_count(), 0);
    }

    #[test]
    fn test_missing_file_leaves_tree_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = AppState::new(AppConfig::default(), false);
        state.load_entries(&[entry("-rw-r--r--", 1, "/a")]);
        let result = state.load_listing_file(&dir.path().join("nope.txt"));
        assert!(matches!(
            result,
            Err(LsVizError::Load(LoadError::NotFound { .. }))
        ));
        assert_eq!(state.node_count(), 1);
        assert!(state.loaded_files.is_empty());
        assert!(state.status_message.starts_with("Error"));
    }

    #[test]
    fn test_truncated_listing_records_warning() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ls.txt");
        std::fs::write(
            &path,
            "-rw-r--r-- 3 a g 1 2024-01-01 00:00 /one\n-rw-r--r-- 3 a g 1 2024-01-01 00:00 /two\n",
        )
        .unwrap();
        let config = AppConfig {
            max_entries: 1,
            ..AppConfig::default()
        };
        let mut state = AppState::new(config, false);
        let summary = state.load_listing_file(&path).unwrap();
        assert!(summary.truncated);
        assert_eq!(summary.stats.created, 1);
        assert_eq!(state.warnings.len(), 1);
        assert_eq!(state.loaded_files, vec![path]);
    }
}
