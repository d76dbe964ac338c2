use texanim::app::{APP_NAME, EditorApp};
use texanim::cli::Args;
use texanim::config;

use anyhow::Context;
use clap::Parser;
use eframe::egui;
use log::{debug, info};

fn init_logging(args: &Args, path_config: &config::PathConfig) -> anyhow::Result<()> {
    let log_level = args.log_level();

    if let Some(log_path_opt) = &args.log_file {
        // File logging with specified verbosity level
        let log_path = log_path_opt
            .clone()
            .unwrap_or_else(|| config::data_file(config::LOG_FILE, path_config));

        let file = std::fs::File::create(&log_path)
            .with_context(|| format!("Failed to create log file: {}", log_path.display()))?;

        env_logger::Builder::new()
            .filter_level(log_level)
            .filter_module("egui", log::LevelFilter::Info) // Suppress egui DEBUG spam
            .format_timestamp_millis()
            .target(env_logger::Target::Pipe(Box::new(file)))
            .init();

        info!("Logging to file: {} (level: {:?})", log_path.display(), log_level);
    } else {
        // Console logging (respects RUST_LOG if set)
        env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or(log_level.as_str().to_lowercase()),
        )
        .filter_module("egui", log::LevelFilter::Info)
        .format_timestamp_millis()
        .init();
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Create path configuration from CLI args and environment
    let path_config = config::PathConfig::from_env_and_cli(args.config_dir.clone());
    if let Err(e) = config::ensure_dirs(&path_config) {
        eprintln!("Warning: Failed to create application directories: {:#}", e);
    }

    init_logging(&args, &path_config)?;

    info!("{} v{} starting...", APP_NAME, env!("CARGO_PKG_VERSION"));
    debug!("Command-line args: {:?}", args);

    let settings_path = config::config_file(config::SETTINGS_FILE, &path_config);
    info!("Settings path: {}", settings_path.display());

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(APP_NAME)
            .with_inner_size([1200.0, 760.0])
            .with_resizable(true)
            .with_drag_and_drop(true),
        persist_window: true,
        persistence_path: Some(settings_path),
        ..Default::default()
    };

    eframe::run_native(
        APP_NAME,
        native_options,
        Box::new(move |cc| {
            // Load persisted app state if available, otherwise create default
            let mut app: EditorApp = cc
                .storage
                .and_then(|storage| storage.get_string(eframe::APP_KEY))
                .and_then(|json| serde_json::from_str(&json).ok())
                .unwrap_or_else(|| {
                    info!("No persisted state found, creating default app");
                    EditorApp::default()
                });

            // CLI overrides persisted playback settings
            if let Some(fps) = args.fps {
                app.settings.fps = fps;
            }
            if let Some(loop_enabled) = args.loop_enabled() {
                app.settings.loop_enabled = loop_enabled;
            }
            app.settings.apply_to(&mut app.player);
            info!(
                "Applied settings: FPS={}, Loop={}, TextEditor={}",
                app.settings.fps, app.settings.loop_enabled, app.settings.show_text_editor
            );

            match args.file_path.clone() {
                Some(path) => app.open_on_start(path, args.autoplay),
                None => info!("No input file provided, starting empty (drag-and-drop supported)"),
            }

            Ok(Box::new(app))
        }),
    )
    .map_err(|e| anyhow::anyhow!("eframe error: {}", e))?;

    Ok(())
}
