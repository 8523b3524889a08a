use anyhow::Context;
use clap::{Parser, Subcommand};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tableau_assets::{ImageCrateDecoder, ImageDecoder, MaterialDescriptor, SceneManifest};
use tableau_common::MeshKind;
use tableau_input::{Action, InputSnapshot, InputSource, KeyBindings};
use tableau_render::{DebugTextSink, LightRig};
use tableau_view::{FrameOutcome, ViewConfig, ViewContext};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tableau-cli", about = "CLI tool for tableau scenes")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version, primitives and default key bindings
    Info,
    /// List the material library, plus any materials a config adds
    Materials {
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Decode every texture a config lists and report what would load
    Check { config: PathBuf },
    /// Run frames headlessly and print the uniforms they push
    Simulate {
        /// Number of frames to run
        #[arg(short, long, default_value = "3")]
        frames: u64,
        /// Seconds between frames
        #[arg(long, default_value = "0.016")]
        dt: f64,
        /// Action held for the whole run (repeatable), e.g. `forward`
        #[arg(short, long, value_parser = parse_action)]
        press: Vec<Action>,
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Print one JSON camera state per frame instead of the transcript
        #[arg(long)]
        json: bool,
    },
}

/// The parts of a viewer config file the CLI cares about. Other sections
/// (such as `window`) are ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct SceneFile {
    #[serde(flatten)]
    view: ViewConfig,
    #[serde(flatten)]
    manifest: SceneManifest,
    lighting: bool,
}

impl Default for SceneFile {
    fn default() -> Self {
        Self {
            view: ViewConfig::default(),
            manifest: SceneManifest::default(),
            lighting: true,
        }
    }
}

impl SceneFile {
    fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let mut file: SceneFile = tableau_common::load_config(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        if let Some(dir) = path.parent() {
            file.manifest.resolve_paths(dir);
        }
        Ok(file)
    }
}

/// Camera state after one simulated frame.
#[derive(Debug, Serialize)]
struct FrameState {
    frame: u64,
    time: f64,
    position: Vec3,
    yaw: f32,
    pitch: f32,
    zoom: f32,
    projection: String,
}

fn parse_action(s: &str) -> Result<Action, String> {
    serde_json::from_value(serde_json::Value::String(s.to_string()))
        .map_err(|_| format!("unknown action '{s}'"))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Info => info(),
        Commands::Materials { config } => materials(config.as_deref())?,
        Commands::Check { config } => check(&config)?,
        Commands::Simulate {
            frames,
            dt,
            press,
            config,
            json,
        } => simulate(frames, dt, &press, config.as_deref(), json)?,
    }

    Ok(())
}

fn info() {
    println!("tableau-cli v{}", env!("CARGO_PKG_VERSION"));
    let kinds: Vec<String> = MeshKind::ALL.iter().map(ToString::to_string).collect();
    println!("primitives: {}", kinds.join(", "));
    println!("materials: {} presets", MaterialDescriptor::presets().len());
    println!("default bindings:");
    for (key, action) in KeyBindings::default().iter() {
        println!("  {key:<8} {action:?}");
    }
}

fn materials(config: Option<&Path>) -> anyhow::Result<()> {
    let file = SceneFile::load(config)?;
    println!("{:<14} {:<22} {:<22} shininess", "tag", "diffuse", "specular");
    for m in file.manifest.all_materials() {
        println!(
            "{:<14} {:<22} {:<22} {:.1}",
            m.tag,
            format!("({:.2}, {:.2}, {:.2})", m.diffuse.x, m.diffuse.y, m.diffuse.z),
            format!("({:.2}, {:.2}, {:.2})", m.specular.x, m.specular.y, m.specular.z),
            m.shininess
        );
    }
    Ok(())
}

fn check(config: &Path) -> anyhow::Result<()> {
    let file = SceneFile::load(Some(config))?;
    if file.manifest.textures.is_empty() {
        println!("{} lists no textures", config.display());
        return Ok(());
    }

    let decoder = ImageCrateDecoder::default();
    let mut failures = 0;
    for entry in &file.manifest.textures {
        match decoder.decode(&entry.path) {
            Ok(image) if matches!(image.channels, 3 | 4) => {
                println!(
                    "ok       {:<14} {}x{} {}ch  {}",
                    entry.tag,
                    image.width,
                    image.height,
                    image.channels,
                    entry.path.display()
                );
            }
            Ok(image) => {
                failures += 1;
                println!(
                    "skipped  {:<14} {} channels not supported  {}",
                    entry.tag,
                    image.channels,
                    entry.path.display()
                );
            }
            Err(e) => {
                failures += 1;
                println!("failed   {:<14} {e}", entry.tag);
            }
        }
    }

    if failures > 0 {
        anyhow::bail!(
            "{failures} of {} textures would not load",
            file.manifest.textures.len()
        );
    }
    Ok(())
}

fn simulate(
    frames: u64,
    dt: f64,
    press: &[Action],
    config: Option<&Path>,
    json: bool,
) -> anyhow::Result<()> {
    let file = SceneFile::load(config)?;
    let mut view = ViewContext::new(&file.view);
    let lights = if file.lighting {
        LightRig::daylight()
    } else {
        LightRig::unlit()
    };

    let mut input = InputSnapshot::default();
    for &action in press {
        input.press(action);
    }

    let mut sink = DebugTextSink::new();
    for frame in 0..frames {
        input.time = (frame + 1) as f64 * dt;
        sink.begin_frame(frame);
        let outcome = view.prepare_frame(Some(&input as &dyn InputSource), &mut sink);
        lights.push(&mut sink);

        if json {
            let camera = view.camera();
            let state = FrameState {
                frame,
                time: input.time,
                position: camera.position,
                yaw: camera.yaw(),
                pitch: camera.pitch(),
                zoom: camera.zoom,
                projection: format!("{:?}", view.projection().mode()),
            };
            println!("{}", serde_json::to_string(&state)?);
            sink.take_output();
        } else {
            print!("{}", sink.take_output());
        }

        if outcome == FrameOutcome::Quit {
            tracing::info!("quit held, stopping after frame {frame}");
            break;
        }
    }
    Ok(())
}
