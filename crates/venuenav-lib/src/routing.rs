//! Route projection: destination names in, drawable routes out.
//!
//! This module provides:
//! - [`Directory`] - the fixed booth-name to node mapping of a venue
//! - [`project`] - turns a solved path into line segments for drawing
//! - [`route_labels`] - the user-facing label sequence of a path
//! - [`plan_route`] - resolves a destination, solves from the entrance and
//!   projects the result into a [`RouteOutcome`]
//!
//! Unknown destinations and unreachable booths are ordinary outcomes here,
//! never errors. Only integrity problems surface as [`Error`].

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::graph::VenueGraph;
use crate::path::{solve, PathResult};
use crate::venue::{NodeId, Point, Venue, WAYPOINT_LABEL};

/// Minimum Jaro-Winkler similarity for a destination to be suggested.
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// Number of suggestions attached to an unknown destination.
const MAX_SUGGESTIONS: usize = 3;

/// Fixed lookup from human-facing destination names to graph nodes.
#[derive(Debug, Clone, Default)]
pub struct Directory {
    entries: BTreeMap<String, NodeId>,
}

impl Directory {
    /// Build a directory, rejecting names that map to nodes outside `graph`.
    pub fn new(entries: BTreeMap<String, NodeId>, graph: &VenueGraph) -> Result<Self> {
        for (name, &id) in &entries {
            if graph.node(id).is_none() {
                return Err(Error::DanglingDestination {
                    name: name.clone(),
                    id,
                });
            }
        }
        Ok(Self { entries })
    }

    /// Lookup a destination by its case-sensitive name.
    pub fn resolve(&self, name: &str) -> Option<NodeId> {
        self.entries.get(name).copied()
    }

    /// Destination names in alphabetical order with their node ids.
    pub fn entries(&self) -> impl Iterator<Item = (&str, NodeId)> {
        self.entries.iter().map(|(name, &id)| (name.as_str(), id))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Known names that look like `name`, most similar first.
    pub fn suggestions(&self, name: &str, limit: usize) -> Vec<String> {
        let needle = name.to_lowercase();
        let mut scored: Vec<(f64, &str)> = self
            .entries
            .keys()
            .map(|candidate| {
                let score = strsim::jaro_winkler(&needle, &candidate.to_lowercase());
                (score, candidate.as_str())
            })
            .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
            .collect();

        scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
        scored
            .into_iter()
            .take(limit)
            .map(|(_, candidate)| candidate.to_string())
            .collect()
    }
}

/// Resolve a destination name, attaching close matches when it is unknown.
pub fn resolve_destination(directory: &Directory, name: &str) -> Result<NodeId> {
    directory
        .resolve(name)
        .ok_or_else(|| Error::UnknownDestination {
            name: name.to_string(),
            suggestions: directory.suggestions(name, MAX_SUGGESTIONS),
        })
}

/// Straight line between two consecutive path nodes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Segment {
    pub from_id: NodeId,
    pub to_id: NodeId,
    pub from: Point,
    pub to: Point,
}

/// Pair consecutive path nodes into drawable segments.
///
/// A path node missing from the graph is reported rather than skipped, so a
/// truncated line is never drawn.
pub fn project(graph: &VenueGraph, path: &PathResult) -> Result<Vec<Segment>> {
    let points = path
        .nodes
        .iter()
        .map(|&id| {
            graph
                .node(id)
                .map(|node| (id, node.position))
                .ok_or(Error::PathNodeMissing { id })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(points
        .windows(2)
        .map(|pair| Segment {
            from_id: pair[0].0,
            to_id: pair[1].0,
            from: pair[0].1,
            to: pair[1].1,
        })
        .collect())
}

/// How waypoints appear in a textual route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelMode {
    /// Leave waypoints out of the label list.
    #[default]
    Omit,
    /// Show each waypoint as a generic "turn".
    Turn,
}

/// User-facing labels along `path`.
pub fn route_labels(graph: &VenueGraph, path: &PathResult, mode: LabelMode) -> Result<Vec<String>> {
    let mut labels = Vec::with_capacity(path.nodes.len());
    for &id in &path.nodes {
        let node = graph.node(id).ok_or(Error::PathNodeMissing { id })?;
        match (node.label.booth_name(), mode) {
            (Some(name), _) => labels.push(name.to_string()),
            (None, LabelMode::Turn) => labels.push(WAYPOINT_LABEL.to_string()),
            (None, LabelMode::Omit) => {}
        }
    }
    Ok(labels)
}

/// Solved route from the entrance to a named destination.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutePlan {
    pub destination: String,
    pub start: NodeId,
    pub goal: NodeId,
    /// Position of `start`, drawn as the route's start marker.
    pub start_at: Point,
    /// Position of `goal`, drawn as the route's end marker.
    pub goal_at: Point,
    pub path: PathResult,
    pub segments: Vec<Segment>,
}

impl RoutePlan {
    pub fn distance(&self) -> f64 {
        self.path.distance
    }

    /// Number of hops in the route.
    pub fn hop_count(&self) -> usize {
        self.path.hop_count()
    }
}

/// Result of a route request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RouteOutcome {
    Solved(RoutePlan),
    Unreachable {
        destination: String,
        goal: NodeId,
    },
    UnknownDestination {
        name: String,
        suggestions: Vec<String>,
    },
}

impl RouteOutcome {
    pub fn plan(&self) -> Option<&RoutePlan> {
        match self {
            RouteOutcome::Solved(plan) => Some(plan),
            _ => None,
        }
    }

    /// Explanation to show instead of a route, `None` when a route was found.
    pub fn no_route_reason(&self) -> Option<String> {
        match self {
            RouteOutcome::Solved(_) => None,
            RouteOutcome::Unreachable { destination, .. } => Some(format!(
                "No route available: {destination} cannot be reached from the entrance."
            )),
            RouteOutcome::UnknownDestination { name, suggestions } => {
                let mut message = format!("No route available: '{name}' is not a known destination.");
                if !suggestions.is_empty() {
                    message.push_str(&format!(" Did you mean: {}?", suggestions.join(", ")));
                }
                Some(message)
            }
        }
    }
}

/// Plan the walking route from the venue entrance to `destination`.
pub fn plan_route(venue: &Venue, destination: &str) -> Result<RouteOutcome> {
    let goal = match resolve_destination(venue.directory(), destination) {
        Ok(goal) => goal,
        Err(Error::UnknownDestination { name, suggestions }) => {
            debug!(%name, ?suggestions, "destination not in directory");
            return Ok(RouteOutcome::UnknownDestination { name, suggestions });
        }
        Err(other) => return Err(other),
    };

    let start = venue.entrance();
    let path = match solve(venue.graph(), start, goal) {
        Ok(path) => path,
        Err(Error::Unreachable { .. }) => {
            info!(destination, goal, "destination unreachable from entrance");
            return Ok(RouteOutcome::Unreachable {
                destination: destination.to_string(),
                goal,
            });
        }
        Err(other) => return Err(other),
    };

    let segments = project(venue.graph(), &path)?;
    let position = |id: NodeId| {
        venue
            .graph()
            .node(id)
            .map(|node| node.position)
            .ok_or(Error::PathNodeMissing { id })
    };
    let start_at = position(start)?;
    let goal_at = position(goal)?;
    debug!(
        destination,
        hops = path.hop_count(),
        distance = path.distance,
        "route planned"
    );

    Ok(RouteOutcome::Solved(RoutePlan {
        destination: destination.to_string(),
        start,
        goal,
        start_at,
        goal_at,
        path,
        segments,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::venue::bundled_venue;

    #[test]
    fn resolves_known_destination() {
        let venue = bundled_venue().expect("bundled venue");
        assert_eq!(venue.directory().resolve("Bakery"), Some(10));
        assert_eq!(venue.directory().resolve("bakery"), None);
    }

    #[test]
    fn unknown_destination_carries_suggestions() {
        let venue = bundled_venue().expect("bundled venue");
        let err = resolve_destination(venue.directory(), "Bakry").expect_err("unknown");
        match err {
            Error::UnknownDestination { name, suggestions } => {
                assert_eq!(name, "Bakry");
                assert_eq!(suggestions.first().map(String::as_str), Some("Bakery"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn suggestions_respect_limit_and_threshold() {
        let venue = bundled_venue().expect("bundled venue");
        assert!(venue.directory().suggestions("Coffee", 1).len() <= 1);
        assert!(venue.directory().suggestions("zzzzzz", 3).is_empty());
    }

    #[test]
    fn projection_pairs_consecutive_nodes() {
        let venue = bundled_venue().expect("bundled venue");
        let path = PathResult {
            nodes: vec![1, 2, 3],
            distance: 537.0,
        };
        let segments = project(venue.graph(), &path).expect("all nodes exist");
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].from, Point::new(1420.0, 800.0));
        assert_eq!(segments[0].to, Point::new(1420.0, 560.0));
        assert_eq!(segments[1].from_id, 2);
        assert_eq!(segments[1].to_id, 3);

        assert_eq!(project(venue.graph(), &path).expect("idempotent"), segments);
    }

    #[test]
    fn projection_rejects_missing_node() {
        let venue = bundled_venue().expect("bundled venue");
        let path = PathResult {
            nodes: vec![1, 2, 77],
            distance: 0.0,
        };
        let err = project(venue.graph(), &path).expect_err("missing node");
        assert!(matches!(err, Error::PathNodeMissing { id: 77 }));
    }

    #[test]
    fn single_node_path_has_no_segments() {
        let venue = bundled_venue().expect("bundled venue");
        let path = PathResult {
            nodes: vec![1],
            distance: 0.0,
        };
        assert!(project(venue.graph(), &path).expect("valid").is_empty());
    }

    #[test]
    fn labels_omit_or_mark_waypoints() {
        let venue = bundled_venue().expect("bundled venue");
        let path = PathResult {
            nodes: vec![1, 2, 3, 5, 6],
            distance: 819.0,
        };
        assert_eq!(
            route_labels(venue.graph(), &path, LabelMode::Omit).expect("labels"),
            vec!["Entrance", "Coffee Shop"]
        );
        assert_eq!(
            route_labels(venue.graph(), &path, LabelMode::Turn).expect("labels"),
            vec!["Entrance", "turn", "turn", "turn", "Coffee Shop"]
        );
    }

    #[test]
    fn no_route_reasons_are_distinct() {
        let unreachable = RouteOutcome::Unreachable {
            destination: "Bakery".to_string(),
            goal: 10,
        };
        let unknown = RouteOutcome::UnknownDestination {
            name: "Bakry".to_string(),
            suggestions: vec!["Bakery".to_string()],
        };
        let a = unreachable.no_route_reason().expect("reason");
        let b = unknown.no_route_reason().expect("reason");
        assert!(a.contains("cannot be reached"));
        assert!(b.contains("not a known destination"));
        assert!(b.contains("Did you mean: Bakery?"));
    }
}
