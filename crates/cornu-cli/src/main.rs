//! cornu - cornucopia surface tessellation and headless animation.
//!
//! ```text
//! cornu tessellate --config scene.toml --output mesh.json
//! cornu animate --frames 120 --key ArrowLeft --key + --spin 0.01
//! cornu config > scene.toml
//! ```
//!
//! Logging defaults to WARN, INFO for cornu crates; override with `RUST_LOG`.

use std::path::{Path, PathBuf};
use std::thread;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cornu_math::{DVec3, Transform};
use cornu_render::{Control, Key, ManualScheduler, RecordingBackend, SceneConfig, Viewer};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "cornu")]
#[command(about = "Cornucopia surface tessellator and lighting demo", long_about = None)]
struct Cli {
    /// Scene configuration (TOML). Defaults are used when omitted.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Tessellate the surface and write the mesh as JSON
    Tessellate {
        /// Output file; prints a summary only when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Run the light animation against a headless backend
    Animate {
        /// Number of frames to run
        #[arg(short, long, default_value_t = 60)]
        frames: u32,
        /// Sleep for the frame delay between ticks
        #[arg(long)]
        realtime: bool,
        /// Draw the velocity path overlay
        #[arg(long)]
        path: bool,
        /// Key presses applied before the run (ArrowLeft, w, +, ...)
        #[arg(short, long = "key")]
        keys: Vec<String>,
        /// Rotation about +Y per frame, in radians, standing in for the trackball
        #[arg(long, default_value_t = 0.0)]
        spin: f64,
    },
    /// Print the effective configuration as TOML
    Config,
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Tessellate { output } => tessellate(&config, output.as_deref()),
        Commands::Animate {
            frames,
            realtime,
            path,
            keys,
            spin,
        } => {
            let run = AnimateRun {
                frames,
                realtime,
                path,
                keys,
                spin,
            };
            animate(config, &run)
        }
        Commands::Config => {
            print!("{}", config.to_toml_string()?);
            Ok(())
        }
    }
}

fn init_logging() {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("cornu_mesh=info".parse().unwrap_or_default())
        .add_directive("cornu_render=info".parse().unwrap_or_default())
        .add_directive("cornu=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
}

fn load_config(path: Option<&Path>) -> Result<SceneConfig> {
    match path {
        Some(path) => SceneConfig::load(path)
            .with_context(|| format!("failed to load scene config {}", path.display())),
        None => Ok(SceneConfig::default()),
    }
}

fn tessellate(config: &SceneConfig, output: Option<&Path>) -> Result<()> {
    let surface = config.surface();
    let (mesh, stats) = config
        .tessellator()
        .tessellate(&surface)
        .context("tessellation failed")?;

    println!("vertices:  {}", mesh.vertex_count());
    println!("triangles: {}", mesh.triangle_count());
    println!("cells:     {}", stats.cells);
    if stats.recovered_normals > 0 || stats.skipped_cells > 0 {
        println!(
            "degenerate: {} normals recovered, {} cells skipped",
            stats.recovered_normals, stats.skipped_cells
        );
    }
    if mesh.vertex_count() > 0 {
        println!("radius:    {:.4}", mesh.bounding_box().origin_radius());
    }
    let mismatched = mesh.winding_mismatches();
    if mismatched > 0 {
        warn!(mismatched, "triangles disagree with clockwise front faces");
        println!("winding:   {mismatched} triangles face away from their normals");
    }

    if let Some(output) = output {
        cornu_mesh::export::write_json(&mesh, stats, output)
            .with_context(|| format!("failed to write {}", output.display()))?;
        println!("Wrote mesh to {}", output.display());
    }
    Ok(())
}

struct AnimateRun {
    frames: u32,
    realtime: bool,
    path: bool,
    keys: Vec<String>,
    spin: f64,
}

fn animate(config: SceneConfig, run: &AnimateRun) -> Result<()> {
    let keys = run
        .keys
        .iter()
        .map(|name| Key::from_name(name).with_context(|| format!("unknown key {name:?}")))
        .collect::<Result<Vec<_>>>()?;

    let mut viewer = Viewer::new(RecordingBackend::new(), ManualScheduler::new(), config)
        .context("failed to initialise viewer")?;
    if run.path != viewer.config().show_path {
        viewer.handle(Control::TogglePath);
    }
    for key in keys {
        viewer.handle(Control::Key(key));
    }
    viewer.handle(Control::ToggleAnimation);

    for frame in 0..run.frames {
        let Some((handle, delay)) = viewer.scheduler_mut().pop() else {
            break;
        };
        if run.realtime {
            thread::sleep(delay);
        }
        if run.spin != 0.0 {
            viewer.set_rotation(Transform::from_axis_angle(DVec3::Y, run.spin * f64::from(frame)));
        }
        viewer.on_frame(handle);
    }
    viewer.handle(Control::ToggleAnimation);

    let state = viewer.animation();
    info!(
        frames = viewer.frames_drawn(),
        elapsed_ms = state.elapsed_ms,
        "animation finished"
    );
    let light = state.light_position;
    let translation = viewer.config().translation;
    println!("frames drawn: {}", viewer.frames_drawn());
    println!("elapsed:      {:.1} ms", state.elapsed_ms);
    println!("light:        ({:.4}, {:.4}, {:.4})", light.x, light.y, light.z);
    println!("translation:  ({:.1}, {:.1}, {:.1})", translation.x, translation.y, translation.z);
    println!("shininess:    {}", viewer.config().material.shininess);
    Ok(())
}
