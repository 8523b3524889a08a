mod app;
mod config;
mod scene;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use winit::event_loop::{ControlFlow, EventLoop};

#[derive(Parser)]
#[command(name = "tableau-desktop", about = "Interactive viewer for the tableau scene")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// YAML config with window, camera, bindings, textures and materials
    /// (defaults to ./tableau.yaml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .init();

    tracing::info!("tableau-desktop starting");
    let path = cli.config.or_else(config::AppConfig::default_path);
    let config = config::AppConfig::load(path.as_deref())?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = app::App::new(config, Box::new(scene::CounterScene::new()));
    event_loop.run_app(&mut app)?;

    tracing::info!("tableau-desktop stopped");
    Ok(())
}
