//! Umbra CLI — mesh inspection, shadow-volume extraction and headless rendering.

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "umbra")]
#[command(version, about = "Umbra — stencil shadow volumes for articulated meshes")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a mesh and print its topology.
    Inspect {
        /// Path to a mesh file.
        mesh: String,
    },

    /// Build the shadow volume of a mesh for one light position.
    Volume {
        /// Path to a mesh file.
        mesh: String,

        /// Light position as `x,y,z`.
        #[arg(short, long, allow_hyphen_values = true)]
        light: String,

        /// Extrusion factor.
        #[arg(short, long, default_value_t = umbra_types::constants::DEFAULT_EXTRUSION_FACTOR)]
        extrusion: f32,

        /// Write the volume as JSON to this path.
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Render frames headlessly and summarize the draw sequence.
    Render {
        /// Mesh files making up the shadow caster.
        #[arg(required = true)]
        meshes: Vec<String>,

        /// Render config (TOML).
        #[arg(short, long)]
        config: Option<String>,

        /// Scene config (TOML).
        #[arg(short, long)]
        scene: Option<String>,

        /// Number of frames.
        #[arg(short, long, default_value_t = 1)]
        frames: u32,

        /// Seconds per frame.
        #[arg(long, default_value_t = 1.0 / 60.0)]
        dt: f32,

        /// Write recorded frames as JSON to this path.
        #[arg(short, long)]
        trace: Option<String>,
    },

    /// Validate a mesh or config file.
    Validate {
        /// Path to a `.toml` config, a `.json` mesh or a text mesh.
        path: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Inspect { mesh } => commands::inspect(&mesh),
        Commands::Volume {
            mesh,
            light,
            extrusion,
            output,
        } => commands::volume(&mesh, &light, extrusion, output.as_deref()),
        Commands::Render {
            meshes,
            config,
            scene,
            frames,
            dt,
            trace,
        } => commands::render(
            &meshes,
            config.as_deref(),
            scene.as_deref(),
            frames,
            dt,
            trace.as_deref(),
        ),
        Commands::Validate { path } => commands::validate(&path),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
