// LsViz - tests/e2e_listing.rs
//
// End-to-end tests for the listing pipeline.
//
// These tests read real listing files from disk, parse them, build the tree,
// and drive the same AppState workflows the GUI uses (expand, header click,
// append, clear). No mocks.

use lsviz::app::state::AppState;
use lsviz::core::expansion::ExpansionView;
use lsviz::core::model::{CellValue, Column, Role, SortOrder, SortState};
use lsviz::core::parser::{parse_listing, ParseConfig};
use lsviz::core::tree_model::{ModelIndex, TreeModel};
use lsviz::platform::config::AppConfig;
use lsviz::platform::fs::read_listing;
use std::path::PathBuf;

// =============================================================================
// Helpers
// =============================================================================

/// Absolute path to the on-disk fixture files.
fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// (name, depth) of every visible row.
fn visible(state: &mut AppState) -> Vec<(String, usize)> {
    let rows = state.visible_rows().to_vec();
    let model = state.model.as_ref().expect("tree loaded");
    rows.iter()
        .map(|r| (model.node(&r.index).name().to_string(), r.depth))
        .collect()
}

fn row_named(state: &mut AppState, name: &str) -> ModelIndex {
    let rows = state.visible_rows().to_vec();
    let model = state.model.as_ref().expect("tree loaded");
    rows.iter()
        .find(|r| model.node(&r.index).name() == name)
        .map(|r| r.index)
        .unwrap_or_else(|| panic!("{name} is not visible"))
}

fn children_of(state: &mut AppState, name: &str) -> Vec<String> {
    let parent = row_named(state, name);
    let model = state.model.as_ref().expect("tree loaded");
    (0..model.row_count(&parent))
        .map(|row| {
            let index = model.index(row, Column::Name, &parent);
            model.node(&index).name().to_string()
        })
        .collect()
}

fn text(model: &TreeModel, index: &ModelIndex, column: Column) -> String {
    match model.data(&index.sibling_at_column(column), Role::Display) {
        Some(CellValue::Text(text)) => text,
        other => panic!("expected text, got {other:?}"),
    }
}

fn loaded_state() -> AppState {
    let mut state = AppState::new(AppConfig::default(), false);
    state
        .load_listing_file(&fixture("hdfs_listing_sample.txt"))
        .expect("fixture loads");
    state
}

// =============================================================================
// Parsing E2E
// =============================================================================

#[test]
fn e2e_fixture_parses_all_entries_and_skips_noise() {
    let content = read_listing(&fixture("hdfs_listing_sample.txt"), u64::MAX).unwrap();
    let result = parse_listing(&content, &ParseConfig::default());

    assert_eq!(result.entries.len(), 11);
    // "Found 2 items" and the permission-denied warning.
    assert_eq!(result.lines_skipped, 2);
    assert!(!result.truncated);

    let archive = result
        .entries
        .iter()
        .find(|e| e.path.ends_with(".tar.gz"))
        .expect("archive entry");
    assert_eq!(archive.path, "/user/alice/archive/2023 q4.tar.gz");
    assert_eq!(archive.size, 1_048_576);
    assert_eq!(archive.owner_label(), "alice:analysts");
}

#[test]
fn e2e_memory_mapped_read_matches_buffered_read() {
    let path = fixture("hdfs_listing_sample.txt");
    assert_eq!(
        read_listing(&path, 1).unwrap(),
        read_listing(&path, u64::MAX).unwrap()
    );
}

// =============================================================================
// Tree E2E
// =============================================================================

#[test]
fn e2e_load_builds_tree_with_directories_first() {
    let mut state = loaded_state();
    assert_eq!(state.node_count(), 11);
    assert_eq!(
        visible(&mut state),
        vec![("tmp".to_string(), 0), ("user".to_string(), 0)]
    );

    let user = row_named(&mut state, "user");
    state.toggle_expanded(&user);
    let alice = row_named(&mut state, "alice");
    state.toggle_expanded(&alice);

    assert_eq!(
        children_of(&mut state, "alice"),
        vec!["archive", ".hidden", "Notes.txt", "report.csv"]
    );
}

#[test]
fn e2e_cells_render_listing_metadata() {
    let mut state = loaded_state();
    let user = row_named(&mut state, "user");
    state.toggle_expanded(&user);
    let bob = row_named(&mut state, "bob");
    state.toggle_expanded(&bob);

    let events = row_named(&mut state, "events.parquet");
    let model = state.model.as_ref().unwrap();
    assert_eq!(text(model, &events, Column::Size), "734,003,200");
    assert_eq!(text(model, &events, Column::Modified), "2024-03-03 08:30");
    assert_eq!(text(model, &events, Column::Permissions), "-rw-r-----");
    assert_eq!(text(model, &events, Column::Owner), "bob:analysts");
    assert_eq!(text(model, &bob, Column::Size), "");
}

#[test]
fn e2e_size_sort_keeps_expansion_and_directories_first() {
    let mut state = loaded_state();
    let user = row_named(&mut state, "user");
    state.toggle_expanded(&user);
    let alice = row_named(&mut state, "alice");
    state.toggle_expanded(&alice);

    state.on_header_clicked(Column::Size);
    assert_eq!(
        state.sorting(),
        Some(SortState::new(Column::Size, SortOrder::Ascending))
    );
    assert_eq!(
        children_of(&mut state, "alice"),
        vec!["archive", ".hidden", "Notes.txt", "report.csv"]
    );

    state.on_header_clicked(Column::Size);
    assert_eq!(
        children_of(&mut state, "alice"),
        vec!["archive", "report.csv", "Notes.txt", ".hidden"]
    );
    assert_eq!(
        visible(&mut state),
        vec![
            ("user".to_string(), 0),
            ("bob".to_string(), 1),
            ("alice".to_string(), 1),
            ("archive".to_string(), 2),
            ("report.csv".to_string(), 2),
            ("Notes.txt".to_string(), 2),
            (".hidden".to_string(), 2),
            ("tmp".to_string(), 0),
        ]
    );

    let alice = row_named(&mut state, "alice");
    assert!(state.view.is_expanded(&alice));
}

#[test]
fn e2e_append_merges_second_listing() {
    let mut state = loaded_state();
    let summary = state
        .load_listing_file(&fixture("hdfs_listing_append.txt"))
        .expect("append fixture loads");

    assert_eq!(summary.stats.created, 3);
    assert_eq!(summary.stats.merged, 1);
    assert_eq!(summary.stats.placeholders, 2);
    assert_eq!(state.node_count(), 16);
    assert_eq!(state.loaded_files.len(), 2);

    assert_eq!(
        visible(&mut state),
        vec![
            ("data".to_string(), 0),
            ("tmp".to_string(), 0),
            ("user".to_string(), 0),
        ]
    );

    let user = row_named(&mut state, "user");
    state.toggle_expanded(&user);
    assert_eq!(children_of(&mut state, "user"), vec!["alice", "bob", "carol"]);

    let alice = row_named(&mut state, "alice");
    state.toggle_expanded(&alice);
    let notes = row_named(&mut state, "Notes.txt");
    let model = state.model.as_ref().unwrap();
    assert_eq!(text(model, &notes, Column::Size), "999");
    assert_eq!(text(model, &notes, Column::Modified), "2024-03-05 15:00");
}

#[test]
fn e2e_clear_then_reload() {
    let mut state = loaded_state();
    state.clear();
    assert!(state.model.is_none());
    assert!(state.loaded_files.is_empty());

    state
        .load_listing_file(&fixture("hdfs_listing_append.txt"))
        .unwrap();
    // Two top-level placeholders, so nothing auto-expands.
    assert_eq!(
        visible(&mut state),
        vec![("data".to_string(), 0), ("user".to_string(), 0)]
    );
}
