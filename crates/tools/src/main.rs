use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use formats::{CONFIG_FILE_NAME, FlightDataset, GlobeConfig, build_globe_scene};
use foundation::math::lat_lon_to_vec3;
use runtime::PitchDamping;
use scene::prefabs::RouteStyle;
use tools::{SceneSummary, damping_trace, export_arcs};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "routeglobe", about = "Inspect flight-route globe data offline")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Load a data directory and report what the globe would draw.
    Summary {
        /// Directory holding airports.json and routes.json.
        #[arg(long, default_value = "crates/apps/viewer_web/assets/data")]
        data: PathBuf,
        /// Scene config; defaults to <data>/globe.config.json when present.
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Write every drawn arc as JSON.
    Arcs {
        #[arg(long, default_value = "crates/apps/viewer_web/assets/data")]
        data: PathBuf,
        #[arg(long)]
        config: Option<PathBuf>,
        /// Output file; stdout when omitted.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Project a latitude/longitude onto the sphere.
    Project {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
        /// Defaults to the radius markers and arcs are drawn at.
        #[arg(long, default_value_t = RouteStyle::default().arc_radius)]
        radius: f64,
    },
    /// Print the pitch after each damping tick.
    Damp {
        #[arg(long, allow_hyphen_values = true)]
        pitch: f64,
        #[arg(long, default_value_t = 10)]
        ticks: usize,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = real_main() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn real_main() -> Result<(), String> {
    match Cli::parse().command {
        Command::Summary { data, config } => cmd_summary(&data, config.as_deref()),
        Command::Arcs { data, config, out } => cmd_arcs(&data, config.as_deref(), out.as_deref()),
        Command::Project { lat, lon, radius } => {
            let p = lat_lon_to_vec3(lat, lon, radius);
            println!("{} {} {}", p.x, p.y, p.z);
            Ok(())
        }
        Command::Damp { pitch, ticks } => {
            for (i, p) in damping_trace(pitch, ticks, &PitchDamping::default())
                .into_iter()
                .enumerate()
            {
                println!("{:>4} {p}", i + 1);
            }
            Ok(())
        }
    }
}

fn load_inputs(data: &Path, config: Option<&Path>) -> Result<(FlightDataset, GlobeConfig), String> {
    let dataset = FlightDataset::load_dir(data).map_err(|e| e.to_string())?;
    let config = match config {
        Some(path) => GlobeConfig::load(path).map_err(|e| e.to_string())?,
        None => {
            let default_path = data.join(CONFIG_FILE_NAME);
            if default_path.exists() {
                GlobeConfig::load(&default_path).map_err(|e| e.to_string())?
            } else {
                tracing::info!(path = %default_path.display(), "no config file; using defaults");
                GlobeConfig::default()
            }
        }
    };
    Ok((dataset, config))
}

fn cmd_summary(data: &Path, config: Option<&Path>) -> Result<(), String> {
    let (dataset, config) = load_inputs(data, config)?;
    let scene = build_globe_scene(&dataset, &config);
    let summary = SceneSummary::new(&dataset, &config, &scene);
    tracing::info!(
        airports = summary.airports,
        routes = summary.routes,
        drawn = summary.routes_drawn,
        skipped = summary.skipped.len(),
        "scene summary"
    );
    let text = serde_json::to_string_pretty(&summary).map_err(|e| e.to_string())?;
    println!("{text}");
    Ok(())
}

fn cmd_arcs(data: &Path, config: Option<&Path>, out: Option<&Path>) -> Result<(), String> {
    let (dataset, config) = load_inputs(data, config)?;
    let scene = build_globe_scene(&dataset, &config);
    let arcs = export_arcs(&scene);
    let text = serde_json::to_string_pretty(&arcs).map_err(|e| e.to_string())?;
    match out {
        Some(path) => {
            fs::write(path, text).map_err(|e| format!("write {path:?}: {e}"))?;
            tracing::info!(arcs = arcs.len(), path = %path.display(), "wrote arcs");
        }
        None => println!("{text}"),
    }
    Ok(())
}
