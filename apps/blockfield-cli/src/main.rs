mod config;
mod scene;

use std::path::PathBuf;

use anyhow::Context;
use blockfield_camera::{CameraCommand, parse_script};
use blockfield_render::{FrameClock, RecordingBackend};
use blockfield_terrain::TerrainField;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::config::SceneConfig;
use crate::scene::Showcase;

#[derive(Parser)]
#[command(name = "blockfield-cli", about = "Headless driver for the blockfield scene")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Scene configuration file (JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Render frames of the showcase scene and print a report per frame
    Frames {
        /// Number of frames to render
        #[arg(short, long, default_value = "3")]
        frames: u32,
        /// Fixed time step in seconds
        #[arg(long, default_value = "0.016")]
        step: f32,
        /// Camera keys to apply, one per frame (w/s/a/d move, q/e pan, r reset)
        #[arg(short, long, default_value = "")]
        keys: String,
        /// Horizontal mouse drag per frame, in normalized device units
        #[arg(long)]
        drag: Option<f32>,
        /// Draw textured nodes with the normal-debug material
        #[arg(long)]
        show_normals: bool,
        /// Print the recorded draw summary after each report
        #[arg(long)]
        summary: bool,
    },
    /// Generate the terrain field and print its heights
    Terrain {
        /// Override the configured seed
        #[arg(short, long)]
        seed: Option<u64>,
    },
    /// Write the default scene configuration as JSON
    DumpConfig {
        /// Output path
        path: PathBuf,
    },
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<SceneConfig> {
    match path {
        Some(path) => SceneConfig::load(path),
        None => Ok(SceneConfig::default()),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("blockfield-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", blockfield_common::crate_info());
            println!("geometry: {}", blockfield_geometry::crate_info());
            println!("camera: {}", blockfield_camera::crate_info());
            println!("render: {}", blockfield_render::crate_info());
            println!("terrain: {}", blockfield_terrain::crate_info());
        }
        Commands::Frames {
            frames,
            step,
            keys,
            drag,
            show_normals,
            summary,
        } => {
            let mut config = load_config(cli.config.as_ref())?;
            config.show_normals |= show_normals;
            let mut scene = Showcase::new(&config)?;
            let mut backend = RecordingBackend::new();
            let mut clock = FrameClock::new();
            let mut script = parse_script(&keys).into_iter();

            println!(
                "Rendering {frames} frames at {}x{}, {} terrain blocks",
                config.viewport.width,
                config.viewport.height,
                scene.terrain.nonzero_count()
            );
            for frame in 0..frames {
                if let Some(command) = script.next() {
                    command.apply(&mut scene.camera);
                }
                if let Some(delta_x) = drag {
                    CameraCommand::from_drag(delta_x).apply(&mut scene.camera);
                }
                let time = clock.advance(step);
                let report = scene
                    .render_frame(&mut backend, time)
                    .with_context(|| format!("rendering frame {frame}"))?;
                println!("[{frame}] {report}");
                if summary {
                    print!("{}", backend.summary());
                }
            }
        }
        Commands::Terrain { seed } => {
            let mut config = load_config(cli.config.as_ref())?;
            if seed.is_some() {
                config.terrain.seed = seed;
            }
            let field = TerrainField::generate(config.terrain).context("generating terrain")?;
            println!(
                "Terrain {}x{} (max height {}, bias {}): {} nonzero cells",
                field.width(),
                field.depth(),
                field.config().max_height,
                field.config().bias,
                field.nonzero_count()
            );
            print!("{}", field.dump());
        }
        Commands::DumpConfig { path } => {
            SceneConfig::default().save(&path)?;
            println!("Wrote default scene config to {}", path.display());
        }
    }

    Ok(())
}
