use anyhow::{Context, Result};
use clap::Parser;
use eframe::egui;
use log::{debug, info};

use scrollreel::app::{LaunchOptions, ScrollApp};
use scrollreel::cli::Args;
use scrollreel::config;
use scrollreel::entities::presentation::SequenceSource;
use scrollreel::entities::scene::Scene;
use scrollreel::settings::AppSettings;

/// Initialize env_logger from verbosity flags and the optional log file.
///
/// 0 (default) = warn, 1 (-v) = info, 2 (-vv) = debug, 3+ (-vvv) = trace
fn init_logging(args: &Args, path_config: &config::PathConfig) -> Result<()> {
    let log_level = match args.verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

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
        let default_level = match args.verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
            .filter_module("egui", log::LevelFilter::Info) // Suppress egui DEBUG spam
            .format_timestamp_millis()
            .init();
    }
    Ok(())
}

/// Settings stored by a previous run, if any
fn load_settings(cc: &eframe::CreationContext<'_>) -> AppSettings {
    cc.storage
        .and_then(|storage| storage.get_string(eframe::APP_KEY))
        .and_then(|json| match serde_json::from_str(&json) {
            Ok(settings) => Some(settings),
            Err(e) => {
                log::warn!("Ignoring unreadable persisted settings: {}", e);
                None
            }
        })
        .unwrap_or_else(|| {
            info!("No persisted settings found, using defaults");
            AppSettings::default()
        })
}

fn main() -> Result<()> {
    // Parse command-line arguments first (needed for log setup)
    let args = Args::parse();

    let path_config = config::PathConfig::from_env_and_cli(args.config_dir.clone());

    if let Err(e) = config::ensure_dirs(&path_config) {
        eprintln!("Warning: Failed to create application directories: {:#}", e);
    }

    init_logging(&args, &path_config)?;

    info!("Scrollreel v{} starting...", env!("CARGO_PKG_VERSION"));
    debug!("Command-line args: {:?}", args);
    info!("Config path: {}", config::config_file(config::STATE_FILE, &path_config).display());

    // Scene errors abort startup
    let scene = match &args.scene {
        Some(path) => Scene::load(path)?,
        None => Scene::default(),
    };

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!("Scrollreel v{} • F1 for help", env!("CARGO_PKG_VERSION")))
            .with_inner_size([1280.0, 720.0])
            .with_resizable(true),
        persist_window: true,
        persistence_path: Some(config::config_file(config::STATE_FILE, &path_config)),
        ..Default::default()
    };

    eframe::run_native(
        "Scrollreel",
        native_options,
        Box::new(move |cc| {
            let settings = load_settings(cc);

            // CLI arguments have priority over persisted settings
            let policy = args.on_missing.unwrap_or(settings.on_missing);
            let timeout = match args.load_timeout_ms {
                Some(0) => None,
                Some(ms) => Some(std::time::Duration::from_millis(ms)),
                None => settings.load_timeout(),
            };
            let workers = args.workers.unwrap_or_else(|| settings.worker_count()).max(1);

            info!(
                "Frames: {} x {} in {} (missing: {:?}, timeout: {:?})",
                args.count,
                args.pattern,
                args.frames_dir.display(),
                policy,
                timeout
            );

            let options = LaunchOptions {
                source: SequenceSource {
                    dir: args.frames_dir.clone(),
                    pattern: args.pattern.clone(),
                    count: args.count,
                    policy,
                    timeout,
                },
                scene,
                page_factor: args.page_factor,
                immersive: args.immersive,
                fullscreen: args.fullscreen,
                workers,
            };

            Ok(Box::new(ScrollApp::new(&cc.egui_ctx, settings, options)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("eframe error: {}", e))?;

    info!("Application exiting");
    Ok(())
}
