//! Route command handler for computing the walk from the entrance to a booth.

use std::io;
use std::process::ExitCode;

use anyhow::{Context, Result};
use tracing::info;

use venuenav_cli::output::{write_no_route, write_summary, OutputFormat};
use venuenav_cli::terminal::ColorPalette;
use venuenav_lib::{plan_route, LabelMode, RouteSummary, Venue};

/// Exit status used when no route can be shown.
pub const NO_ROUTE_EXIT: u8 = 2;

/// Arguments for the route command.
#[derive(Debug, Clone)]
pub struct RouteCommandArgs {
    /// Destination display name.
    pub to: String,
    /// Output format.
    pub format: OutputFormat,
    /// How waypoints appear in the label list.
    pub labels: LabelMode,
}

/// Handle the route subcommand.
///
/// Unknown and unreachable destinations print a "no route" message and
/// return [`NO_ROUTE_EXIT`]; they are not errors.
pub fn handle_route_command(
    venue: &Venue,
    args: &RouteCommandArgs,
    palette: ColorPalette,
) -> Result<ExitCode> {
    let outcome = plan_route(venue, &args.to)
        .with_context(|| format!("failed to plan route to {}", args.to))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let Some(plan) = outcome.plan() else {
        write_no_route(&mut out, &outcome, args.format, palette)
            .context("failed to write route")?;
        return Ok(ExitCode::from(NO_ROUTE_EXIT));
    };

    let summary = RouteSummary::from_plan(venue, plan, args.labels)?;
    info!(
        destination = %plan.destination,
        distance = plan.distance(),
        hops = plan.hop_count(),
        "route found"
    );
    write_summary(&mut out, &summary, args.format, palette).context("failed to write route")?;
    Ok(ExitCode::SUCCESS)
}
