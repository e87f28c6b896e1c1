// LsViz - ui/panels/tree.rs
//
// Sortable, expandable file tree (central area).
//
// Rows come from the flattened visible-row cache in AppState, so a frame only
// lays out the rows inside the viewport (`ScrollArea::show_rows`). Clicks are
// collected while painting and applied afterwards, because the row loop holds
// a shared borrow of the model.

use crate::app::state::AppState;
use crate::app::view::VisibleRow;
use crate::core::model::{CellValue, Column, Role};
use crate::core::tree_model::{ModelIndex, TreeModel};
use crate::ui::theme;

/// Render the tree panel.
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    if state.model.as_ref().map_or(true, TreeModel::is_empty) {
        ui.centered_and_justified(|ui| {
            ui.label("No file list loaded.\nUse \"Open/append file list\u{2026}\" to load an HDFS ls -R listing.");
        });
        return;
    }

    let name_width = state.config.name_column_width;
    let row_count = state.visible_rows().len();
    let Some(model) = state.model.as_ref() else {
        return;
    };

    let header_clicked = render_header(ui, state, model, name_width);
    ui.separator();

    let mut toggle: Option<ModelIndex> = None;
    let row_height = ui
        .text_style_height(&egui::TextStyle::Body)
        .max(theme::ROW_HEIGHT);

    egui::ScrollArea::both()
        .auto_shrink([false; 2])
        .show_rows(ui, row_height, row_count, |ui, row_range| {
            for row_idx in row_range {
                let Some(row) = state.rows().get(row_idx) else {
                    continue;
                };
                if render_row(ui, model, row, name_width, row_height) {
                    toggle = Some(row.index);
                }
            }
        });

    if let Some(column) = header_clicked {
        state.on_header_clicked(column);
    }
    if let Some(index) = toggle {
        state.toggle_expanded(&index);
    }
}

/// Column titles as buttons; returns the column clicked this frame.
fn render_header(
    ui: &mut egui::Ui,
    state: &AppState,
    model: &TreeModel,
    name_width: f32,
) -> Option<Column> {
    let sorting = state.sorting();
    let mut clicked = None;
    ui.horizontal(|ui| {
        for column in (0..model.column_count()).filter_map(|i| Column::from_index(i).ok()) {
            let title = match model.header_data(column, Role::Display) {
                Some(CellValue::Text(title)) => title,
                _ => column.title().to_string(),
            };
            let label = match sorting {
                Some(s) if s.column == column => {
                    format!("{title} {}", theme::sort_indicator(s.order))
                }
                _ => title,
            };
            let button = egui::Button::new(egui::RichText::new(label).strong())
                .frame(false)
                .min_size(egui::vec2(column_width(column, name_width), 0.0));
            if ui
                .add(button)
                .on_hover_text(format!("Sort by {}", column.title()))
                .clicked()
            {
                clicked = Some(column);
            }
        }
    });
    clicked
}

/// Paint one row. Returns true when the user asked to toggle expansion.
fn render_row(
    ui: &mut egui::Ui,
    model: &TreeModel,
    row: &VisibleRow,
    name_width: f32,
    row_height: f32,
) -> bool {
    let mut toggled = false;
    ui.horizontal(|ui| {
        ui.set_height(row_height);

        let indent = row.depth as f32 * theme::INDENT_WIDTH;
        ui.add_space(indent);

        if row.has_children {
            let toggle = egui::Button::new(theme::toggle_glyph(row.expanded))
                .frame(false)
                .min_size(egui::vec2(theme::TOGGLE_WIDTH, 0.0));
            if ui.add(toggle).clicked() {
                toggled = true;
            }
        } else {
            ui.add_space(theme::TOGGLE_WIDTH);
        }

        let glyph = match model.data(&row.index, Role::Decoration) {
            Some(CellValue::Icon(kind)) => theme::icon_glyph(&kind),
            _ => "",
        };
        cell(ui, theme::ICON_WIDTH, row_height, glyph, egui::Align::Min);

        let text_width = (name_width - indent - theme::TOGGLE_WIDTH - theme::ICON_WIDTH)
            .max(theme::MIN_NAME_TEXT_WIDTH);
        let name = display(model, &row.index, Column::Name);
        let response = cell(ui, text_width, row_height, &name, egui::Align::Min)
            .on_hover_text(model.node(&row.index).path());
        if row.is_dir && row.has_children && response.double_clicked() {
            toggled = true;
        }

        for column in [
            Column::Size,
            Column::Modified,
            Column::Permissions,
            Column::Owner,
        ] {
            let align = if column == Column::Size {
                egui::Align::Max
            } else {
                egui::Align::Min
            };
            let text = display(model, &row.index, column);
            cell(ui, column_width(column, name_width), row_height, &text, align);
        }
    });
    toggled
}

fn display(model: &TreeModel, index: &ModelIndex, column: Column) -> String {
    model
        .data(&index.sibling_at_column(column), Role::Display)
        .and_then(|value| value.as_text().map(str::to_string))
        .unwrap_or_default()
}

/// Fixed-width, single-line, truncating text cell.
fn cell(
    ui: &mut egui::Ui,
    width: f32,
    height: f32,
    text: &str,
    align: egui::Align,
) -> egui::Response {
    let layout = match align {
        egui::Align::Max => egui::Layout::right_to_left(egui::Align::Center),
        _ => egui::Layout::left_to_right(egui::Align::Center),
    };
    ui.allocate_ui_with_layout(egui::vec2(width, height), layout, |ui| {
        ui.set_min_width(width);
        ui.add(
            egui::Label::new(text)
                .truncate()
                .sense(egui::Sense::click()),
        )
    })
    .inner
}

fn column_width(column: Column, name_width: f32) -> f32 {
    match column {
        Column::Name => name_width,
        Column::Size => theme::SIZE_COLUMN_WIDTH,
        Column::Modified => theme::MODIFIED_COLUMN_WIDTH,
        Column::Permissions => theme::PERMISSIONS_COLUMN_WIDTH,
        Column::Owner => theme::OWNER_COLUMN_WIDTH,
    }
}
