use std::path::PathBuf;

use clap::Parser;
use gpui::Application;
use tracing::{error, info};

use tip_ui::{
    components::WindowPreferences,
    config::{Settings, SettingsOverrides},
    logging, open_main_window, setup_app,
};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Tip calculator.
///
/// Opens a single window that computes a tip from a bill amount and a tip
/// percentage, with an optional round-up.
#[derive(Debug, Parser)]
struct Cli {
    /// Settings file. Defaults to `~/.tip-calculator/config.toml`.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log level or `EnvFilter` directive; overrides the settings file.
    #[arg(long)]
    log_level: Option<String>,

    /// Append log output to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Do not log to stdout.
    #[arg(long, short)]
    quiet: bool,
}

impl Cli {
    fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            log_level: self.log_level.clone(),
            log_file: self.log_file.clone(),
            quiet: self.quiet,
        }
    }
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    logging::init_default_logging();

    let cli = Cli::parse();

    let mut settings = Settings::load(cli.config.as_deref())?;
    settings.apply_overrides(cli.overrides());
    logging::apply_settings(&settings)?;

    info!(app = logging::app_name(), "starting");

    let prefs = WindowPreferences::from(settings.window);
    Application::new().run(move |cx| {
        setup_app(cx);
        if let Err(e) = open_main_window(cx, prefs) {
            error!(error = %e, "failed to open calculator window");
            cx.quit();
        }
    });

    Ok(())
}
