use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::venue::{Edge, Node, NodeId};

/// Read-only adjacency view consumed by the shortest-path solver.
///
/// The solver never touches the storage behind a graph; anything that can
/// enumerate its nodes and list weighted neighbours can be routed over.
pub trait WalkGraph {
    /// All node identifiers, in ascending order.
    fn node_ids(&self) -> Vec<NodeId>;

    /// Outgoing edges of `id` keyed by neighbour. Empty for an isolated node,
    /// [`Error::UnknownNode`] when `id` is not part of the graph.
    fn neighbours(&self, id: NodeId) -> Result<&BTreeMap<NodeId, f64>>;
}

/// Undirected corridor between two nodes, reported once per mirrored edge pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Corridor {
    pub a: NodeId,
    pub b: NodeId,
    pub distance: f64,
}

/// Immutable, validated venue graph.
#[derive(Debug, Clone)]
pub struct VenueGraph {
    entrance: NodeId,
    nodes: Arc<BTreeMap<NodeId, Node>>,
    adjacency: Arc<BTreeMap<NodeId, BTreeMap<NodeId, f64>>>,
}

impl VenueGraph {
    /// Build a graph from authored nodes and directed edges.
    ///
    /// Every edge endpoint must exist, distances must be finite and
    /// non-negative, and each edge `u -> v` needs a reverse `v -> u` with the
    /// same distance. Nodes unreachable from the entrance are logged, not
    /// rejected.
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>, entrance: NodeId) -> Result<Self> {
        let mut node_map = BTreeMap::new();
        for node in nodes {
            let id = node.id;
            if node_map.insert(id, node).is_some() {
                return Err(Error::DuplicateNode { id });
            }
        }

        if !node_map.contains_key(&entrance) {
            return Err(Error::MissingEntrance { id: entrance });
        }

        let mut adjacency: BTreeMap<NodeId, BTreeMap<NodeId, f64>> = node_map
            .keys()
            .map(|&id| (id, BTreeMap::new()))
            .collect();

        for edge in &edges {
            if !edge.distance.is_finite() || edge.distance < 0.0 {
                return Err(Error::InvalidDistance {
                    from: edge.from,
                    to: edge.to,
                    distance: edge.distance,
                });
            }
            for endpoint in [edge.from, edge.to] {
                if !node_map.contains_key(&endpoint) {
                    return Err(Error::DanglingEdge {
                        from: edge.from,
                        to: edge.to,
                        missing: endpoint,
                    });
                }
            }

            let targets = adjacency.entry(edge.from).or_default();
            match targets.entry(edge.to) {
                Entry::Vacant(slot) => {
                    slot.insert(edge.distance);
                }
                Entry::Occupied(existing) => {
                    if *existing.get() != edge.distance {
                        return Err(Error::ConflictingEdge {
                            from: edge.from,
                            to: edge.to,
                            first: *existing.get(),
                            second: edge.distance,
                        });
                    }
                }
            }
        }

        for (&from, targets) in &adjacency {
            for (&to, &forward) in targets {
                match adjacency.get(&to).and_then(|back| back.get(&from)) {
                    None => return Err(Error::MissingReverseEdge { from, to }),
                    Some(&reverse) if reverse != forward => {
                        return Err(Error::AsymmetricEdge {
                            from,
                            to,
                            forward,
                            reverse,
                        })
                    }
                    Some(_) => {}
                }
            }
        }

        let graph = Self {
            entrance,
            nodes: Arc::new(node_map),
            adjacency: Arc::new(adjacency),
        };

        let unreachable = graph.unreachable_from_entrance();
        if !unreachable.is_empty() {
            warn!(
                entrance,
                ?unreachable,
                "venue contains nodes that cannot be reached from the entrance"
            );
        }
        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "built venue graph"
        );

        Ok(graph)
    }

    /// Designated entrance node.
    pub fn entrance(&self) -> NodeId {
        self.entrance
    }

    /// Lookup a node by identifier. `None` is an expected outcome, not a failure.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of directed edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(BTreeMap::len).sum()
    }

    /// Return the weighted neighbours of a node.
    pub fn neighbours(&self, id: NodeId) -> Result<&BTreeMap<NodeId, f64>> {
        self.adjacency.get(&id).ok_or(Error::UnknownNode { id })
    }

    /// Directed edges in ascending `(from, to)` order.
    pub fn edges(&self) -> Vec<Edge> {
        self.adjacency
            .iter()
            .flat_map(|(&from, targets)| {
                targets
                    .iter()
                    .map(move |(&to, &distance)| Edge::new(from, to, distance))
            })
            .collect()
    }

    /// Each mirrored edge pair as a single corridor, lower id first.
    pub fn corridors(&self) -> Vec<Corridor> {
        self.edges()
            .into_iter()
            .filter(|edge| edge.from <= edge.to)
            .map(|edge| Corridor {
                a: edge.from,
                b: edge.to,
                distance: edge.distance,
            })
            .collect()
    }

    /// Nodes that no walk from the entrance can reach, in ascending order.
    pub fn unreachable_from_entrance(&self) -> Vec<NodeId> {
        let mut seen = BTreeSet::from([self.entrance]);
        let mut queue = VecDeque::from([self.entrance]);

        while let Some(current) = queue.pop_front() {
            let Some(targets) = self.adjacency.get(&current) else {
                continue;
            };
            for &next in targets.keys() {
                if seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }

        self.nodes
            .keys()
            .copied()
            .filter(|id| !seen.contains(id))
            .collect()
    }

    /// Build a copy of the graph with every edge touching `id` removed.
    pub fn without_node_edges(&self, id: NodeId) -> Result<Self> {
        if !self.nodes.contains_key(&id) {
            return Err(Error::UnknownNode { id });
        }
        let edges = self
            .edges()
            .into_iter()
            .filter(|edge| edge.from != id && edge.to != id)
            .collect();
        Self::new(self.nodes.values().cloned().collect(), edges, self.entrance)
    }
}

impl WalkGraph for VenueGraph {
    fn node_ids(&self) -> Vec<NodeId> {
        self.nodes.keys().copied().collect()
    }

    fn neighbours(&self, id: NodeId) -> Result<&BTreeMap<NodeId, f64>> {
        VenueGraph::neighbours(self, id)
    }
}
