use clap::{Parser, Subcommand};
use jc_controls::{CommandMode, JointControllerConfig};
use jc_project::{ProjectError, World};
use jc_sim::{RunRecord, SimError, SimOptions};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
enum CliError {
    #[error("{0}")]
    Project(#[from] ProjectError),

    #[error("{0}")]
    Sim(#[from] SimError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "jc-cli")]
#[command(about = "Joint controller simulation CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate world file syntax and structure
    Validate {
        /// Path to the world YAML or JSON file
        world_path: PathBuf,
    },
    /// List models, joints and controllers in a world
    Models {
        /// Path to the world YAML or JSON file
        world_path: PathBuf,
    },
    /// Run a simulation and export joint time series
    Run {
        /// Path to the world YAML or JSON file
        world_path: PathBuf,
        /// Time step in seconds
        #[arg(long, default_value_t = 1e-3)]
        dt: f64,
        /// End time in seconds
        #[arg(long)]
        t_end: f64,
        /// Record every N-th step
        #[arg(long, default_value_t = 10)]
        record_every: usize,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> CliResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { world_path } => cmd_validate(&world_path),
        Commands::Models { world_path } => cmd_models(&world_path),
        Commands::Run {
            world_path,
            dt,
            t_end,
            record_every,
            output,
        } => cmd_run(&world_path, dt, t_end, record_every, output.as_deref()),
    }
}

fn load_world(path: &Path) -> CliResult<World> {
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let world = if is_json {
        jc_project::load_json(path)?
    } else {
        jc_project::load_yaml(path)?
    };
    Ok(world)
}

fn cmd_validate(world_path: &Path) -> CliResult<()> {
    println!("Validating world: {}", world_path.display());
    let world = load_world(world_path)?;
    let diagnostics = jc_project::plugin_diagnostics(&world);
    for d in &diagnostics {
        println!("⚠ {d}");
    }
    if diagnostics.is_empty() {
        println!("✓ World is valid");
    } else {
        println!("✓ World is valid ({} warnings)", diagnostics.len());
    }
    Ok(())
}

fn cmd_models(world_path: &Path) -> CliResult<()> {
    let world = load_world(world_path)?;

    if world.models.is_empty() {
        println!("No models found in world");
        return Ok(());
    }

    println!("Models in world '{}':", world.name);
    for model in &world.models {
        println!("  {} ({} joints)", model.name, model.joints.len());
        for plugin in &model.plugins {
            let cfg = match JointControllerConfig::from_params(&plugin.params) {
                Ok(cfg) => cfg,
                Err(e) => {
                    println!("    controller: disabled ({e})");
                    continue;
                }
            };
            let mode = match cfg.mode {
                CommandMode::Velocity => "velocity",
                CommandMode::Force => "force",
            };
            println!(
                "    controller: joint={} mode={} topic={}",
                cfg.joint_name,
                mode,
                cfg.topic_for(&model.name)
            );
        }
    }
    Ok(())
}

fn cmd_run(
    world_path: &Path,
    dt: f64,
    t_end: f64,
    record_every: usize,
    output: Option<&Path>,
) -> CliResult<()> {
    let world = load_world(world_path)?;
    let (mut sim, schedule) = jc_sim::build(&world)?;

    let opts = SimOptions {
        dt,
        t_end,
        record_every,
        ..SimOptions::default()
    };
    info!(dt, t_end, "running world '{}'", world.name);
    let record = sim.run(&opts, &schedule)?;

    let csv = to_csv(&record);
    if let Some(path) = output {
        std::fs::write(path, csv)?;
        println!(
            "✓ Exported {} samples to {}",
            record.samples.len(),
            path.display()
        );
    } else {
        print!("{}", csv);
    }
    Ok(())
}

fn to_csv(record: &RunRecord) -> String {
    fn cell(v: Option<f64>) -> String {
        v.map(|v| v.to_string()).unwrap_or_default()
    }

    let mut csv = String::from("time_s,joint,velocity,velocity_cmd,force_cmd\n");
    for s in &record.samples {
        csv.push_str(&format!(
            "{},{},{},{},{}\n",
            s.t,
            s.joint,
            cell(s.velocity),
            cell(s.velocity_cmd),
            cell(s.force_cmd)
        ));
    }
    csv
}
