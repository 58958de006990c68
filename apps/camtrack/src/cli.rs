//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use ct_registry::{DEFAULT_DATA_FILE, TrackerConfig};
use ct_spatial::DEFAULT_BUFFER_KM;

/// Register cameras on a road network and find which ones a route passes.
#[derive(Parser, Debug)]
#[command(name = "camtrack", version)]
pub struct Cli {
    /// Road network nodes CSV (`id,lat,lon`).
    #[arg(long, env = "CAMTRACK_NODES", global = true, default_value = "nodes.csv")]
    pub nodes: PathBuf,

    /// Road network edges CSV (`from,to,length_m,oneway`).
    #[arg(long, env = "CAMTRACK_EDGES", global = true, default_value = "edges.csv")]
    pub edges: PathBuf,

    /// Camera list JSON file.
    #[arg(long, env = "CAMTRACK_DATA", global = true, default_value = DEFAULT_DATA_FILE)]
    pub data: PathBuf,

    /// Cameras farther than this from the route are not reported (km).
    #[arg(long, env = "CAMTRACK_BUFFER_KM", global = true, default_value_t = DEFAULT_BUFFER_KM)]
    pub buffer_km: f64,

    /// Debug logging (ignored when RUST_LOG is set).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Register a camera at a coordinate.
    Add {
        name: String,
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
    },
    /// Shortest route between two cameras and the cameras along it.
    Route {
        start: String,
        end: String,
    },
    /// Nearest road node to a coordinate.
    Nearest {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
    },
    /// List registered cameras.
    List,
    /// Print the camera list as JSON, or write it to a file.
    Export {
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Remove every registered camera.
    Clear {
        /// Required: confirms the deletion.
        #[arg(long)]
        yes: bool,
    },
}

impl Cli {
    pub fn tracker_config(&self) -> TrackerConfig {
        TrackerConfig::default()
            .with_buffer_km(self.buffer_km)
            .with_data_file(&self.data)
    }
}
