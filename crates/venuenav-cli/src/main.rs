use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use venuenav_cli::logging::{init_tracing, LogFormat};
use venuenav_cli::output::OutputFormat;
use venuenav_cli::terminal::ColorPalette;
use venuenav_lib::{load_configured_venue, LabelMode};

mod commands;

use commands::route::RouteCommandArgs;

#[derive(Parser, Debug)]
#[command(author, version, about = "Event venue navigation utilities")]
struct Cli {
    /// Venue JSON file. Falls back to $VENUENAV_VENUE, the user config
    /// directory, then the bundled venue.
    #[arg(long, global = true)]
    venue: Option<PathBuf>,

    /// Log line format (written to stderr).
    #[arg(long, value_enum, global = true, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    /// Disable colored output.
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

/// Waypoint rendering in route listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LabelArg {
    /// Leave waypoints out.
    Omit,
    /// Show waypoints as "turn".
    Turn,
}

impl From<LabelArg> for LabelMode {
    fn from(value: LabelArg) -> Self {
        match value {
            LabelArg::Omit => LabelMode::Omit,
            LabelArg::Turn => LabelMode::Turn,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the destinations that can be routed to.
    Destinations {
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Compute the walking route from the entrance to a destination.
    Route {
        /// Destination name, e.g. "Coffee Shop".
        #[arg(long = "to")]
        to: String,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        #[arg(long, value_enum, default_value_t = LabelArg::Turn)]
        labels: LabelArg,
    },
    /// Write the floor-plan overlay as SVG, optionally with a highlighted route.
    Map {
        /// Destination to highlight.
        #[arg(long = "to")]
        to: Option<String>,
        /// SVG file to write.
        #[arg(long, short)]
        output: PathBuf,
    },
    /// Validate the venue data and report unreachable nodes.
    Validate,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.log_format);

    let (venue, source) = load_configured_venue(cli.venue.as_deref())
        .context("failed to load venue data")?;
    tracing::debug!(%source, "venue source resolved");

    let palette = if cli.no_color {
        ColorPalette::plain()
    } else {
        ColorPalette::detect()
    };

    match cli.command {
        Command::Destinations { format } => {
            commands::destinations::handle_destinations_command(&venue, format)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Route { to, format, labels } => {
            let args = RouteCommandArgs {
                to,
                format,
                labels: labels.into(),
            };
            commands::route::handle_route_command(&venue, &args, palette)
        }
        Command::Map { to, output } => {
            commands::map::handle_map_command(&venue, to.as_deref(), &output)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Validate => {
            commands::validate::handle_validate_command(&venue, &source)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
