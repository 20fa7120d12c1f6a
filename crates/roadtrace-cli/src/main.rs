use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use roadtrace_cli::commands::inspect::handle_inspect_command;
use roadtrace_cli::commands::route::{handle_route_command, Endpoint, RouteCommandArgs};
use roadtrace_cli::output::OutputFormat;
use roadtrace_lib::{Config, GeoCoordinate, NodeId};

#[derive(Parser, Debug)]
#[command(author, version, about = "Road-network graph and traced A* search utilities")]
struct Cli {
    /// JSON configuration file (projection scale, origin, highway filter, animation).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the road network from an Overpass JSON file and report its size.
    Inspect {
        /// Overpass JSON document.
        #[arg(long)]
        input: PathBuf,
    },
    /// Search for a path between two nodes of the road network.
    Route {
        /// Overpass JSON document.
        #[arg(long)]
        input: PathBuf,
        /// Starting node identifier.
        #[arg(long, required_unless_present = "from_coord", conflicts_with = "from_coord")]
        from: Option<NodeId>,
        /// Start at the node nearest to `lat,lon`.
        #[arg(long, value_name = "LAT,LON")]
        from_coord: Option<GeoCoordinate>,
        /// Destination node identifier.
        #[arg(long, required_unless_present = "to_coord", conflicts_with = "to_coord")]
        to: Option<NodeId>,
        /// End at the node nearest to `lat,lon`.
        #[arg(long, value_name = "LAT,LON")]
        to_coord: Option<GeoCoordinate>,
        /// Include the animation timeline in the output.
        #[arg(long)]
        timeline: bool,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::from_path(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => Config::default(),
    };

    let output = match cli.command {
        Command::Inspect { input } => handle_inspect_command(&input, &config, cli.format)?,
        Command::Route {
            input,
            from,
            from_coord,
            to,
            to_coord,
            timeline,
        } => {
            let args = RouteCommandArgs {
                input,
                from: endpoint(from, from_coord).context("missing --from or --from-coord")?,
                to: endpoint(to, to_coord).context("missing --to or --to-coord")?,
                timeline,
            };
            handle_route_command(&args, &config, cli.format)?
        }
    };

    print!("{output}");
    Ok(())
}

fn endpoint(node: Option<NodeId>, coordinate: Option<GeoCoordinate>) -> Option<Endpoint> {
    node.map(Endpoint::Node)
        .or_else(|| coordinate.map(Endpoint::Near))
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
