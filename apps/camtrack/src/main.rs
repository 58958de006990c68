//! camtrack — register cameras on a road network and find which cameras lie
//! on or near the shortest route between two of them.
//!
//! ```text
//! camtrack --nodes nodes.csv --edges edges.csv add "Town Hall" --lat 40.7361 --lon 31.6061
//! camtrack route "Town Hall" "Bus Station"
//! camtrack list
//! ```
//!
//! The road network is read from CSV on every invocation; the camera list
//! lives in a JSON file (`--data`) and is saved after every change.

mod cli;
mod report;

use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use ct_core::GeoPoint;
use ct_registry::{CameraRegistry, CameraStore, RegistryError, Tracker, to_json};
use ct_spatial::{RoadNetwork, load_network_csv};

use cli::{Cli, Command};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    run(cli)
}

/// `RUST_LOG` wins; otherwise `info`, or `debug` with `--verbose`.
fn init_logging(verbose: bool) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(cli: Cli) -> Result<()> {
    let config = cli.tracker_config();
    let store = CameraStore::new(&config.data_file);

    match &cli.command {
        Command::Add { name, lat, lon } => {
            let network = load_network(&cli)?;
            let tracker = Tracker::from_config(&network, &config);
            let mut cameras = store.load(&network)?;

            let camera = tracker.register_camera(&mut cameras, name, *lat, *lon)?;
            store.save(&cameras)?;
            tracing::info!(name = %camera.name, node = %camera.node, "camera registered");
            println!("{}", report::camera_line(cameras.len(), &camera));
        }

        Command::Route { start, end } => {
            let network = load_network(&cli)?;
            let tracker = Tracker::from_config(&network, &config);
            let cameras = store.load(&network)?;
            if cameras.len() < 2 {
                bail!("route analysis needs at least 2 registered cameras, found {}", cameras.len());
            }

            match tracker.compute_route(&cameras, start, end) {
                Ok(route) => print!("{}", report::route_report(&network, &route, &config)),
                Err(e) if e.is_no_route() => {
                    // Expected outcome for cameras in disconnected parts of the map.
                    println!("no route between {start:?} and {end:?}");
                }
                Err(RegistryError::Spatial(e)) => {
                    return Err(e).context("camera list does not match the loaded road network");
                }
                Err(e) => return Err(e.into()),
            }
        }

        Command::Nearest { lat, lon } => {
            let network = load_network(&cli)?;
            let pos = GeoPoint::new(*lat, *lon);
            let node = network.nearest_node(pos)?;
            let node_pos = network.node_pos(node).unwrap_or(pos);
            let node_ref = network.external_id(node).unwrap_or(i64::from(node.0));
            println!("node {node_ref} at {node_pos}, {:.3} km away", pos.distance_km(node_pos));
        }

        Command::List => {
            let network = load_network(&cli)?;
            let cameras = store.load(&network)?;
            print!("{}", report::camera_table(&cameras));
        }

        Command::Export { out } => {
            let network = load_network(&cli)?;
            let cameras = store.load(&network)?;
            let json = to_json(&cameras)?;
            match out {
                Some(path) => {
                    std::fs::write(path, json)
                        .with_context(|| format!("writing {}", path.display()))?;
                    tracing::info!(path = %path.display(), cameras = cameras.len(), "exported");
                }
                None => println!("{json}"),
            }
        }

        Command::Clear { yes } => {
            if !yes {
                bail!("refusing to delete every camera without --yes");
            }
            store.save(&CameraRegistry::new())?;
            tracing::info!(path = %store.path().display(), "camera list cleared");
        }
    }

    Ok(())
}

fn load_network(cli: &Cli) -> Result<RoadNetwork> {
    let started = Instant::now();
    let network = load_network_csv(&cli.nodes, &cli.edges).with_context(|| {
        format!(
            "loading road network from {} and {}",
            cli.nodes.display(),
            cli.edges.display()
        )
    })?;
    tracing::info!(
        nodes = network.node_count(),
        edges = network.edge_count(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "road network loaded"
    );
    if network.is_empty() {
        tracing::warn!("road network has no nodes; registration will fail");
    }
    Ok(network)
}
