use std::path::PathBuf;

use thiserror::Error;

use crate::venue::NodeId;

/// Convenient result alias for the venue navigation library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Venue file could not be located at the resolved path.
    #[error("venue file not found at {path}")]
    VenueNotFound { path: PathBuf },

    /// No suitable project directories could be resolved for this platform.
    #[error("failed to resolve project directories for venue configuration")]
    ProjectDirsUnavailable,

    /// Two nodes share the same identifier.
    #[error("graph integrity violation: duplicate node id {id}")]
    DuplicateNode { id: NodeId },

    /// An edge references a node that does not exist.
    #[error("graph integrity violation: edge {from} -> {to} references missing node {missing}")]
    DanglingEdge {
        from: NodeId,
        to: NodeId,
        missing: NodeId,
    },

    /// Edge weight is negative, NaN or infinite.
    #[error("graph integrity violation: edge {from} -> {to} has invalid distance {distance}")]
    InvalidDistance {
        from: NodeId,
        to: NodeId,
        distance: f64,
    },

    /// The same directed edge was authored twice with different weights.
    #[error(
        "graph integrity violation: edge {from} -> {to} declared with conflicting distances {first} and {second}"
    )]
    ConflictingEdge {
        from: NodeId,
        to: NodeId,
        first: f64,
        second: f64,
    },

    /// A directed edge has no reverse counterpart.
    #[error("graph integrity violation: edge {from} -> {to} has no reverse edge {to} -> {from}")]
    MissingReverseEdge { from: NodeId, to: NodeId },

    /// A directed edge and its reverse disagree on distance.
    #[error(
        "graph integrity violation: edge {from} -> {to} ({forward}) and its reverse ({reverse}) differ in distance"
    )]
    AsymmetricEdge {
        from: NodeId,
        to: NodeId,
        forward: f64,
        reverse: f64,
    },

    /// The designated entrance is not part of the node set.
    #[error("graph integrity violation: entrance node {id} does not exist")]
    MissingEntrance { id: NodeId },

    /// A destination mapping points at a node that does not exist.
    #[error("graph integrity violation: destination '{name}' maps to missing node {id}")]
    DanglingDestination { name: String, id: NodeId },

    /// A path contained a node that is absent from the graph.
    #[error("graph integrity violation: path node {id} is missing from the graph")]
    PathNodeMissing { id: NodeId },

    /// Raised when a lookup references a node outside the graph.
    #[error("unknown node: {id}")]
    UnknownNode { id: NodeId },

    /// Raised when a destination name has no mapping in the venue directory.
    #[error("unknown destination: {name}{}", format_suggestions(.suggestions))]
    UnknownDestination {
        name: String,
        suggestions: Vec<String>,
    },

    /// Raised when no path exists between two nodes.
    #[error("no route found between {start} and {goal}")]
    Unreachable { start: NodeId, goal: NodeId },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for venue file parsing errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Whether the error indicates corrupted venue configuration rather than a
    /// recoverable "no route" condition.
    pub fn is_integrity_violation(&self) -> bool {
        matches!(
            self,
            Error::DuplicateNode { .. }
                | Error::DanglingEdge { .. }
                | Error::InvalidDistance { .. }
                | Error::ConflictingEdge { .. }
                | Error::MissingReverseEdge { .. }
                | Error::AsymmetricEdge { .. }
                | Error::MissingEntrance { .. }
                | Error::DanglingDestination { .. }
                | Error::PathNodeMissing { .. }
        )
    }
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
