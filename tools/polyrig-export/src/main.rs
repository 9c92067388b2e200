//! polyrig-export - rig export tool
//!
//! Converts OBJ models into poly-mesh geometry, either one selection at a
//! time or as a full rig described by a rig.toml manifest.

use anyhow::Result;
use clap::{Parser, Subcommand};
use polyrig_core::{ObjModel, export_groups, export_model};
use std::path::PathBuf;

use polyrig_export::{inspect, manifest, write_json};

#[derive(Parser)]
#[command(name = "polyrig-export")]
#[command(about = "OBJ to poly-mesh rig export tool")]
#[command(version)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a rigged geometry file from a manifest
    Build {
        /// Path to rig.toml manifest
        #[arg(default_value = "rig.toml")]
        manifest: PathBuf,

        /// Output geometry file (overrides manifest)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate manifest without building
    Check {
        /// Path to rig.toml manifest
        #[arg(default_value = "rig.toml")]
        manifest: PathBuf,
    },

    /// List the objects and groups of an OBJ file
    Inspect {
        /// Input OBJ file
        input: PathBuf,
    },

    /// Export groups of an OBJ file as a single poly mesh
    Export {
        /// Input OBJ file
        input: PathBuf,

        /// Group display name to include (repeatable; default: whole model)
        #[arg(short, long = "group")]
        groups: Vec<String>,

        /// Output .json file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    match cli.command {
        Commands::Build { manifest, output } => {
            tracing::info!("Building rig from {:?}", manifest);
            let config = manifest::load_manifest(&manifest)?;
            let written =
                manifest::build_all(&config, manifest::manifest_dir(&manifest), output.as_deref())?;
            tracing::info!("Wrote {:?}", written);
        }

        Commands::Check { manifest } => {
            tracing::info!("Checking manifest {:?}", manifest);
            let config = manifest::load_manifest(&manifest)?;
            manifest::validate(&config, manifest::manifest_dir(&manifest))?;
            tracing::info!("Manifest is valid!");
        }

        Commands::Inspect { input } => {
            let model = ObjModel::load(&input)?;
            print!("{}", inspect::summarize(&model));
        }

        Commands::Export {
            input,
            groups,
            output,
        } => {
            let output = output.unwrap_or_else(|| input.with_extension("mesh.json"));
            tracing::info!("Exporting {:?} -> {:?}", input, output);

            let model = ObjModel::load(&input)?;
            let mesh = if groups.is_empty() {
                export_model(&model)?
            } else {
                export_groups(&model, groups.as_slice())?
            };

            match mesh {
                Some(mesh) => {
                    write_json(&output, &mesh)?;
                    tracing::info!(
                        "Done! {} polys, {} positions",
                        mesh.poly_count(),
                        mesh.positions.len()
                    );
                }
                None => tracing::warn!("Selection contains no faces, nothing written"),
            }
        }
    }

    Ok(())
}
