use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::graph::VenueGraph;
use crate::routing::Directory;

/// Numeric identifier for a venue node.
pub type NodeId = u32;

/// Label used in authored venue data to mark an unnamed corridor turn.
pub const WAYPOINT_LABEL: &str = "turn";

/// Venue description compiled into the library.
pub const BUNDLED_VENUE_JSON: &str = include_str!("../data/expo_venue.json");

/// 2-D map coordinate. Only used for drawing, never for routing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Display label of a node: either a named booth or an unnamed waypoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeLabel {
    Booth(String),
    Waypoint,
}

impl NodeLabel {
    pub fn is_waypoint(&self) -> bool {
        matches!(self, NodeLabel::Waypoint)
    }

    /// Booth name, or `None` for waypoints.
    pub fn booth_name(&self) -> Option<&str> {
        match self {
            NodeLabel::Booth(name) => Some(name),
            NodeLabel::Waypoint => None,
        }
    }
}

impl From<String> for NodeLabel {
    fn from(value: String) -> Self {
        if value == WAYPOINT_LABEL {
            NodeLabel::Waypoint
        } else {
            NodeLabel::Booth(value)
        }
    }
}

impl From<NodeLabel> for String {
    fn from(value: NodeLabel) -> Self {
        match value {
            NodeLabel::Booth(name) => name,
            NodeLabel::Waypoint => WAYPOINT_LABEL.to_string(),
        }
    }
}

impl fmt::Display for NodeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.booth_name().unwrap_or(WAYPOINT_LABEL))
    }
}

/// A location in the venue graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub label: NodeLabel,
    #[serde(flatten)]
    pub position: Point,
}

impl Node {
    pub fn booth(id: NodeId, name: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            id,
            label: NodeLabel::Booth(name.into()),
            position: Point::new(x, y),
        }
    }

    pub fn waypoint(id: NodeId, x: f64, y: f64) -> Self {
        Self {
            id,
            label: NodeLabel::Waypoint,
            position: Point::new(x, y),
        }
    }
}

/// Directed, weighted connection between two nodes as authored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
    pub distance: f64,
}

impl Edge {
    pub const fn new(from: NodeId, to: NodeId, distance: f64) -> Self {
        Self { from, to, distance }
    }
}

/// Drawing canvas dimensions of the floor plan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewBox {
    pub width: f64,
    pub height: f64,
}

impl Default for ViewBox {
    fn default() -> Self {
        Self {
            width: 1635.2098,
            height: 1122.8697,
        }
    }
}

/// Raw venue description as stored on disk, before validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VenueData {
    pub name: String,
    pub entrance: NodeId,
    #[serde(default)]
    pub viewbox: ViewBox,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    #[serde(default)]
    pub destinations: BTreeMap<String, NodeId>,
}

impl VenueData {
    /// Parse a venue description from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validate the data and build the immutable venue.
    pub fn build(self) -> Result<Venue> {
        let graph = VenueGraph::new(self.nodes, self.edges, self.entrance)?;
        let directory = Directory::new(self.destinations, &graph)?;
        debug!(
            venue = %self.name,
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            destinations = directory.len(),
            "venue validated"
        );
        Ok(Venue {
            name: self.name,
            viewbox: self.viewbox,
            graph,
            directory,
        })
    }
}

/// A validated venue: graph plus the destination directory.
#[derive(Debug, Clone)]
pub struct Venue {
    name: String,
    viewbox: ViewBox,
    graph: VenueGraph,
    directory: Directory,
}

impl Venue {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn viewbox(&self) -> ViewBox {
        self.viewbox
    }

    pub fn graph(&self) -> &VenueGraph {
        &self.graph
    }

    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    /// Fixed source node for all route queries.
    pub fn entrance(&self) -> NodeId {
        self.graph.entrance()
    }

    /// Copy of this venue with every corridor touching `id` closed.
    pub fn without_node_edges(&self, id: NodeId) -> Result<Self> {
        Ok(Self {
            name: self.name.clone(),
            viewbox: self.viewbox,
            graph: self.graph.without_node_edges(id)?,
            directory: self.directory.clone(),
        })
    }
}

/// Load and validate a venue description from a JSON file.
pub fn load_venue(path: &Path) -> Result<Venue> {
    if !path.exists() {
        return Err(Error::VenueNotFound {
            path: path.to_path_buf(),
        });
    }
    let text = fs::read_to_string(path)?;
    let venue = VenueData::from_json_str(&text)?.build()?;
    info!(path = %path.display(), venue = venue.name(), "loaded venue");
    Ok(venue)
}

/// Build the venue bundled with the library.
pub fn bundled_venue() -> Result<Venue> {
    VenueData::from_json_str(BUNDLED_VENUE_JSON)?.build()
}
