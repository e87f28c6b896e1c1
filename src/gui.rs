// LsViz - gui.rs
//
// Top-level eframe::App implementation.
// Wires the toolbar, tree panel, and status bar to AppState.

use crate::app::state::AppState;
use crate::ui;
use crate::util::constants;

/// The LsViz application.
pub struct LsVizApp {
    pub state: AppState,
}

impl LsVizApp {
    /// Create a new application instance with the given state.
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Load files queued by the command line or the open dialog.
    fn process_pending_loads(&mut self) {
        let pending = std::mem::take(&mut self.state.pending_loads);
        for path in pending {
            // Failures are already logged and shown in the status line.
            if let Err(e) = self.state.load_listing_file(&path) {
                tracing::debug!(file = %path.display(), error = %e, "Queued load skipped");
            }
        }
    }
}

impl eframe::App for LsVizApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.state.pending_loads.is_empty() {
            self.process_pending_loads();
        }

        // Toolbar
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Open/append file list\u{2026}").clicked() {
                    if let Some(files) = rfd::FileDialog::new()
                        .set_title("Open file list")
                        .add_filter("File lists", constants::LISTING_FILE_EXTENSIONS)
                        .pick_files()
                    {
                        self.state.status_message = format!("Loading {} file(s)...", files.len());
                        self.state.pending_loads.extend(files);
                        ctx.request_repaint();
                    }
                }
                let has_tree = self.state.model.is_some();
                if ui
                    .add_enabled(has_tree, egui::Button::new("Clear file tree"))
                    .clicked()
                {
                    self.state.clear();
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if let Some(last) = self.state.loaded_files.last() {
                        let label = match self.state.loaded_files.len() {
                            1 => last.display().to_string(),
                            n => format!("{} (+{} more)", last.display(), n - 1),
                        };
                        ui.label(egui::RichText::new(label).weak());
                    }
                });
            });
        });

        // Status bar
        egui::TopBottomPanel::bottom("status_bar")
            .frame(egui::Frame::new().fill(ui::theme::STATUS_BG).inner_margin(4.0))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        egui::RichText::new(&self.state.status_message)
                            .color(ui::theme::STATUS_TEXT),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let nodes = self.state.node_count();
                        if nodes > 0 {
                            ui.label(
                                egui::RichText::new(format!("{nodes} items"))
                                    .color(ui::theme::STATUS_TEXT),
                            );
                        }
                        if !self.state.warnings.is_empty() {
                            ui.label(
                                egui::RichText::new(format!(
                                    "\u{26A0} {} warning(s)",
                                    self.state.warnings.len()
                                ))
                                .color(ui::theme::WARNING_TEXT),
                            )
                            .on_hover_text(self.state.warnings.join("\n"));
                        }
                        if self.state.debug_mode {
                            ui.label(
                                egui::RichText::new("DEBUG").color(ui::theme::WARNING_TEXT),
                            );
                        }
                    });
                });
            });

        // Central panel (tree)
        egui::CentralPanel::default().show(ctx, |ui| {
            ui::panels::tree::render(ui, &mut self.state);
        });
    }
}
