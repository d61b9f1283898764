use std::path::PathBuf;
use std::sync::mpsc::{self, Sender};

use clap::Parser;
use color_eyre::Result;
use monitor_core::{load_monitor_config_from_env, MonitorConfig, MonitorFrame, MonitorSession};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod app;
mod ui;

use app::MonitorApp;

#[derive(Clone)]
struct ChannelWriter {
    sender: Sender<String>,
}

impl std::io::Write for ChannelWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        if let Ok(text) = String::from_utf8(buf.to_vec()) {
            let _ = self.sender.send(text);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "MomEcho baby monitor simulator", long_about = None)]
struct Cli {
    /// Path to a monitor config JSON file. Overrides MOMECHO_CONFIG_PATH.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Fixed RNG seed for reproducible moods and pressure readings.
    #[arg(long)]
    seed: Option<u64>,
    /// Start with auto-simulate switched on.
    #[arg(long)]
    auto: bool,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let (log_tx, log_rx) = mpsc::channel::<String>();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .compact()
        .with_ansi(false)
        .with_writer(move || ChannelWriter {
            sender: log_tx.clone(),
        })
        .init();

    let cli = Cli::parse();
    let mut config = match cli.config {
        Some(ref path) => MonitorConfig::from_file(path)?,
        None => load_monitor_config_from_env().0.as_ref().clone(),
    };
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    if cli.auto {
        config.auto_start = true;
    }

    let session = MonitorSession::new(&config, MonitorFrame::default())?;
    info!("MomEcho monitor ready. Press s to simulate, a for auto, q to exit.");

    let app = MonitorApp::new(session, log_rx)?;
    app.run()
}
