//! Destinations command handler: lists the venue directory.

use std::io;

use anyhow::{Context, Result};

use venuenav_lib::Venue;
use venuenav_cli::output::{write_destinations, OutputFormat};

/// Handle the destinations subcommand.
pub fn handle_destinations_command(venue: &Venue, format: OutputFormat) -> Result<()> {
    let stdout = io::stdout();
    write_destinations(&mut stdout.lock(), venue.directory(), format)
        .context("failed to write destination list")
}
