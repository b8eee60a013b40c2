//! Venue navigation library entry points.
//!
//! This crate loads the venue description, validates it into an immutable
//! graph, runs shortest-path routing from the entrance and projects routes
//! into drawable overlays and readable summaries. Front ends (the CLI, or any
//! other rendering surface) should only depend on the functions exported here
//! instead of reimplementing behavior.
//!

pub mod config;
pub mod error;
pub mod graph;
pub mod output;
pub mod overlay;
pub mod path;
pub mod routing;
pub mod session;
pub mod venue;

pub use config::{default_venue_path, load_configured_venue, resolve_venue_source, VenueSource};
pub use error::{Error, Result};
pub use graph::{Corridor, VenueGraph, WalkGraph};
pub use output::{format_distance, RouteRenderMode, RouteSummary, SummaryStyle, Unstyled};
pub use overlay::{LineStyle, MapOverlay, MarkerStyle, Primitive};
pub use path::{shortest_path_tree, solve, PathResult, ShortestPathTree};
pub use routing::{
    plan_route, project, resolve_destination, route_labels, Directory, LabelMode, RouteOutcome,
    RoutePlan, Segment,
};
pub use session::{RouteSession, RouteState, RouteTicket};
pub use venue::{
    bundled_venue, load_venue, Edge, Node, NodeId, NodeLabel, Point, Venue, VenueData, ViewBox,
};
