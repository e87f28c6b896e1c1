// LsViz - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. config.toml loading
// 3. Logging initialisation (debug mode support)
// 4. eframe GUI launch

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod gui;

// Re-export modules from the library crate so that `gui.rs` can still use
// `crate::app::...`, `crate::ui::...` etc.
pub use lsviz::app;

pub use lsviz::core;
pub use lsviz::platform;
pub use lsviz::ui;
pub use lsviz::util;

use clap::Parser;
use std::path::PathBuf;

/// Add Windows symbol fonts as fallbacks so the file-type glyphs in the
/// tree render instead of squares.
///
/// On non-Windows platforms the egui defaults are used unchanged.
fn configure_fonts(ctx: &egui::Context) {
    #[cfg(target_os = "windows")]
    {
        let mut fonts = egui::FontDefinitions::default();
        let candidates: &[(&str, &str)] = &[
            ("Segoe UI Emoji", r"C:\Windows\Fonts\seguiemj.ttf"),
            ("Segoe UI Symbol", r"C:\Windows\Fonts\seguisym.ttf"),
        ];

        let mut loaded_names: Vec<&str> = Vec::new();
        for (name, path) in candidates {
            match std::fs::read(path) {
                Ok(data) => {
                    fonts
                        .font_data
                        .insert((*name).to_owned(), egui::FontData::from_owned(data).into());
                    loaded_names.push(name);
                }
                Err(e) => {
                    tracing::warn!(font = name, error = %e, "Failed to load Windows system font");
                }
            }
        }

        if !loaded_names.is_empty() {
            if let Some(proportional) = fonts.families.get_mut(&egui::FontFamily::Proportional) {
                for name in &loaded_names {
                    proportional.push((*name).to_owned());
                }
            }
            ctx.set_fonts(fonts);
            tracing::debug!(fonts = ?loaded_names, "Windows fallback fonts configured");
        }
    }

    #[cfg(not(target_os = "windows"))]
    let _ = ctx;
}

/// LsViz - HDFS listing explorer.
///
/// Loads the output of `hdfs dfs -ls -R` into a sortable, expandable tree.
#[derive(Parser, Debug)]
#[command(name = "LsViz", version, about)]
struct Cli {
    /// Listing files to open at start; later files are appended to the tree.
    paths: Vec<PathBuf>,

    /// Maximum entries read from each listing file (overrides config.toml).
    #[arg(short = 'm', long = "max-entries")]
    max_entries: Option<usize>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    // Config is read before logging so its [logging] level can take effect.
    let platform_paths = platform::config::PlatformPaths::resolve();
    let (mut config, mut warnings) = platform::config::load_config(&platform_paths.config_dir);

    util::logging::init(cli.debug, config.log_level.as_deref());

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        config = %platform_paths.config_file().display(),
        "LsViz starting"
    );

    if let Some(max) = cli.max_entries {
        let range = util::constants::MIN_MAX_ENTRIES..=util::constants::ABSOLUTE_MAX_ENTRIES;
        if range.contains(&max) {
            config.max_entries = max;
        } else {
            warnings.push(format!(
                "--max-entries {max} is outside {}-{}; using {}",
                range.start(),
                range.end(),
                config.max_entries
            ));
        }
    }

    for warning in &warnings {
        tracing::warn!(warning = %warning, "Startup warning");
    }

    let dark_mode = config.dark_mode;
    let font_size = config.font_size;

    let mut state = app::state::AppState::new(config, cli.debug);
    for warning in warnings {
        state.push_warning(warning);
    }
    state.pending_loads = cli.paths;

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(util::constants::WINDOW_TITLE)
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([640.0, 400.0]),
        ..Default::default()
    };

    let result = eframe::run_native(
        util::constants::APP_NAME,
        native_options,
        Box::new(move |cc| {
            configure_fonts(&cc.egui_ctx);
            ui::theme::apply(&cc.egui_ctx, dark_mode, font_size);
            Ok(Box::new(gui::LsVizApp::new(state)))
        }),
    );

    if let Err(e) = result {
        tracing::error!(error = %e, "Failed to launch GUI");
        eprintln!("Error: Failed to launch LsViz GUI: {e}");
        std::process::exit(1);
    }
}
