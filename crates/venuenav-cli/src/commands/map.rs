//! Map command handler: writes the floor-plan overlay as SVG.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};

use venuenav_lib::{plan_route, MapOverlay, Venue};

/// Handle the map subcommand.
///
/// Without a destination, or when no route exists, only the baseline map is
/// written. A previous route is never carried over.
pub fn handle_map_command(venue: &Venue, destination: Option<&str>, output: &Path) -> Result<()> {
    let mut overlay = MapOverlay::baseline(venue.graph());

    if let Some(destination) = destination {
        let outcome = plan_route(venue, destination)
            .with_context(|| format!("failed to plan route to {destination}"))?;
        match outcome.plan() {
            Some(plan) => overlay = overlay.with_route(plan),
            None => {
                let reason = outcome.no_route_reason().unwrap_or_default();
                warn!(%destination, "{reason}");
                eprintln!("{reason}");
            }
        }
    }

    fs::write(output, overlay.render_svg(venue.viewbox()))
        .with_context(|| format!("failed to write map to {}", output.display()))?;
    info!(path = %output.display(), route = overlay.has_route(), "map written");
    println!("Map written to {}", output.display());
    Ok(())
}
