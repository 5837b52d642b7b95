//! `eduspace-tui`: terminal console for the EduSpace school records system.
//!
//! Mounts the headless controllers from `eduspace-core` and draws them with
//! [ratatui](https://ratatui.rs): login and registration pages, a tab bar
//! over the dashboard, departments, students and teachers, modal forms,
//! a delete confirmation and timed toasts.
//!
//! Logs go to a file (default `/tmp/eduspace-tui.log`) so they never land
//! on the terminal the UI is drawn on.

mod action;
mod app;
mod component;
mod event;
mod screen;
mod screens;
mod theme;
mod tui;
mod widgets;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use eduspace_config::Config;
use eduspace_core::{AppContext, DataStore, LatencyConfig, MemoryBackend, notify};

use crate::app::App;

/// Terminal console for school departments, students and teachers.
#[derive(Parser, Debug)]
#[command(name = "eduspace-tui", version, about)]
struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(short = 'c', long, env = "EDUSPACE_CONFIG")]
    config: Option<PathBuf>,

    /// Log file path
    #[arg(long, default_value = "/tmp/eduspace-tui.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Answer every backend call immediately
    #[arg(long)]
    no_latency: bool,

    /// Start with an empty store and no demo accounts
    #[arg(long)]
    empty: bool,

    /// Write the effective configuration to the config file and exit
    #[arg(long)]
    write_config: bool,
}

impl Cli {
    fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(eduspace_config::config_path)
    }

    /// Flags win over the file and the environment.
    fn apply_overrides(&self, cfg: &mut Config) {
        if self.no_latency {
            cfg.latency.read_ms = 0;
            cfg.latency.write_ms = 0;
            cfg.latency.auth_ms = 0;
        }
        if self.empty {
            cfg.seed_demo_data = false;
        }
    }
}

/// File-only tracing. Hold the guard for the life of the process so the
/// writer flushes.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "eduspace_tui={log_level},eduspace_core={log_level}"
        ))
    });

    let log_dir = cli
        .log_file
        .parent()
        .unwrap_or(std::path::Path::new("/tmp"));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("eduspace-tui.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    guard
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tui::install_hooks()?;
    let _log_guard = setup_tracing(&cli);

    let path = cli.config_path();
    let mut cfg = eduspace_config::load_config_from(&path)
        .wrap_err_with(|| format!("loading {}", path.display()))?;
    cli.apply_overrides(&mut cfg);

    if cli.write_config {
        eduspace_config::save_config(&cfg, &path)?;
        println!("wrote {}", path.display());
        return Ok(());
    }

    let console = cfg.to_console_config()?;
    info!(
        config = %path.display(),
        seeded = console.seed_demo_data,
        instant = console.latency == LatencyConfig::none(),
        "starting eduspace-tui"
    );

    let store = if console.seed_demo_data {
        DataStore::seeded()
    } else {
        DataStore::new()
    };
    let backend = Arc::new(MemoryBackend::new(Arc::new(store), console.latency));
    let (notifier, center) = notify::channel(console.notification_ttl);
    let ctx = AppContext::new(backend, notifier);

    let mut app = App::new(&ctx, center, cfg.tick_rate(), cfg.render_rate());
    app.run().await?;

    Ok(())
}
