//! Validate command handler: checks venue data and reports connectivity.

use anyhow::Result;

use venuenav_lib::{Venue, VenueSource};

/// Handle the validate subcommand.
///
/// Integrity violations never reach this point: they fail venue loading in
/// `main`. Unreachable nodes are reported but are not a failure.
pub fn handle_validate_command(venue: &Venue, source: &VenueSource) -> Result<()> {
    let graph = venue.graph();
    println!("Venue: {} ({source})", venue.name());
    println!("Entrance: node {}", venue.entrance());
    println!("Nodes: {}", graph.node_count());
    println!(
        "Edges: {} directed ({} corridors)",
        graph.edge_count(),
        graph.corridors().len()
    );
    println!("Destinations: {}", venue.directory().len());

    let unreachable = graph.unreachable_from_entrance();
    if unreachable.is_empty() {
        println!("Unreachable from entrance: none");
    } else {
        let ids: Vec<String> = unreachable.iter().map(ToString::to_string).collect();
        println!("Unreachable from entrance: {}", ids.join(", "));
    }
    println!("Venue is valid");
    Ok(())
}
