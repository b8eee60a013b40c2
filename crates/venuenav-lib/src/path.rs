use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, BinaryHeap};

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::graph::WalkGraph;
use crate::venue::NodeId;

/// Shortest path between two nodes: endpoints inclusive, plus total distance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathResult {
    pub nodes: Vec<NodeId>,
    pub distance: f64,
}

impl PathResult {
    /// Number of edges walked.
    pub fn hop_count(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    pub fn source(&self) -> Option<NodeId> {
        self.nodes.first().copied()
    }

    pub fn target(&self) -> Option<NodeId> {
        self.nodes.last().copied()
    }
}

/// Result of running Dijkstra from a single source over the whole graph.
#[derive(Debug, Clone)]
pub struct ShortestPathTree {
    source: NodeId,
    distances: BTreeMap<NodeId, f64>,
    parents: BTreeMap<NodeId, NodeId>,
    settle_order: Vec<NodeId>,
}

impl ShortestPathTree {
    pub fn source(&self) -> NodeId {
        self.source
    }

    /// Minimum distance to `id`, or `None` when unreachable or unknown.
    pub fn distance_to(&self, id: NodeId) -> Option<f64> {
        self.distances
            .get(&id)
            .copied()
            .filter(|distance| distance.is_finite())
    }

    /// Reconstruct the path to `target` by walking predecessors back to the source.
    pub fn path_to(&self, target: NodeId) -> Option<PathResult> {
        let distance = self.distance_to(target)?;

        let mut nodes = vec![target];
        let mut current = target;
        while current != self.source {
            current = *self.parents.get(&current)?;
            nodes.push(current);
        }
        nodes.reverse();

        Some(PathResult { nodes, distance })
    }

    /// Reachable nodes in ascending id order, source included.
    pub fn reachable(&self) -> Vec<NodeId> {
        self.distances
            .iter()
            .filter(|(_, distance)| distance.is_finite())
            .map(|(&id, _)| id)
            .collect()
    }

    /// Order in which nodes were settled. Ties on distance settle the lower id first.
    pub fn settle_order(&self) -> &[NodeId] {
        &self.settle_order
    }
}

/// Run Dijkstra's algorithm from `source` until every reachable node is settled.
///
/// A neighbour's tentative distance and predecessor only change when the new
/// candidate is strictly smaller, so the first equal-cost route found through
/// the lowest-id settled node wins.
pub fn shortest_path_tree<G>(graph: &G, source: NodeId) -> Result<ShortestPathTree>
where
    G: WalkGraph + ?Sized,
{
    graph.neighbours(source)?;

    let mut distances: BTreeMap<NodeId, f64> = graph
        .node_ids()
        .into_iter()
        .map(|id| (id, f64::INFINITY))
        .collect();
    let mut parents: BTreeMap<NodeId, NodeId> = BTreeMap::new();
    let mut visited: BTreeSet<NodeId> = BTreeSet::new();
    let mut settle_order = Vec::new();
    let mut queue = BinaryHeap::new();

    distances.insert(source, 0.0);
    queue.push(QueueEntry::new(source, 0.0));

    while let Some(entry) = queue.pop() {
        if !visited.insert(entry.node) {
            continue;
        }
        settle_order.push(entry.node);
        let current_distance = entry.cost.0;

        for (&next, &weight) in graph.neighbours(entry.node)? {
            if visited.contains(&next) {
                continue;
            }
            let next_cost = current_distance + weight;
            if next_cost < *distances.get(&next).unwrap_or(&f64::INFINITY) {
                distances.insert(next, next_cost);
                parents.insert(next, entry.node);
                queue.push(QueueEntry::new(next, next_cost));
            }
        }
    }

    debug!(
        source,
        settled = settle_order.len(),
        total = distances.len(),
        "shortest path tree complete"
    );

    Ok(ShortestPathTree {
        source,
        distances,
        parents,
        settle_order,
    })
}

/// Compute the minimum-distance path from `source` to `target`.
///
/// Returns [`Error::Unreachable`] when no walk connects the two nodes and
/// [`Error::UnknownNode`] when either id is not in the graph.
pub fn solve<G>(graph: &G, source: NodeId, target: NodeId) -> Result<PathResult>
where
    G: WalkGraph + ?Sized,
{
    graph.neighbours(target)?;

    if source == target {
        graph.neighbours(source)?;
        return Ok(PathResult {
            nodes: vec![source],
            distance: 0.0,
        });
    }

    shortest_path_tree(graph, source)?
        .path_to(target)
        .ok_or(Error::Unreachable {
            start: source,
            goal: target,
        })
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq(&other.0)
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct QueueEntry {
    node: NodeId,
    cost: FloatOrd,
}

impl QueueEntry {
    fn new(node: NodeId, cost: f64) -> Self {
        Self {
            node,
            cost: FloatOrd(cost),
        }
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by (cost, node).
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::VenueGraph;
    use crate::venue::{Edge, Node};

    fn mirrored(edges: &[(NodeId, NodeId, f64)]) -> Vec<Edge> {
        edges
            .iter()
            .flat_map(|&(a, b, d)| [Edge::new(a, b, d), Edge::new(b, a, d)])
            .collect()
    }

    /// Diamond with two equal-cost routes 1-2-4 and 1-3-4.
    fn diamond() -> VenueGraph {
        let nodes = (1..=4).map(|id| Node::waypoint(id, 0.0, 0.0)).collect();
        let edges = mirrored(&[(1, 2, 5.0), (1, 3, 5.0), (2, 4, 5.0), (3, 4, 5.0)]);
        VenueGraph::new(nodes, edges, 1).expect("valid diamond")
    }

    #[test]
    fn equal_cost_tie_prefers_lower_id() {
        let graph = diamond();
        let path = solve(&graph, 1, 4).expect("route exists");
        assert_eq!(path.nodes, vec![1, 2, 4]);
        assert_eq!(path.distance, 10.0);

        let tree = shortest_path_tree(&graph, 1).expect("tree");
        assert_eq!(tree.settle_order(), &[1, 2, 3, 4]);
    }

    #[test]
    fn same_source_and_target_is_single_node() {
        let graph = diamond();
        let path = solve(&graph, 3, 3).expect("trivial route");
        assert_eq!(path.nodes, vec![3]);
        assert_eq!(path.distance, 0.0);
        assert_eq!(path.hop_count(), 0);
    }

    #[test]
    fn unknown_nodes_are_reported() {
        let graph = diamond();
        assert!(matches!(
            solve(&graph, 1, 99),
            Err(Error::UnknownNode { id: 99 })
        ));
        assert!(matches!(
            solve(&graph, 99, 1),
            Err(Error::UnknownNode { id: 99 })
        ));
        assert!(matches!(
            solve(&graph, 99, 99),
            Err(Error::UnknownNode { id: 99 })
        ));
    }

    #[test]
    fn disconnected_target_is_unreachable() {
        let nodes = (1..=3).map(|id| Node::waypoint(id, 0.0, 0.0)).collect();
        let graph = VenueGraph::new(nodes, mirrored(&[(1, 2, 1.0)]), 1).expect("valid");
        let err = solve(&graph, 1, 3).expect_err("no route");
        assert!(matches!(err, Error::Unreachable { start: 1, goal: 3 }));

        let tree = shortest_path_tree(&graph, 1).expect("tree");
        assert_eq!(tree.reachable(), vec![1, 2]);
        assert_eq!(tree.distance_to(3), None);
        assert!(tree.path_to(3).is_none());
    }

    #[test]
    fn prefers_cheaper_detour_over_direct_edge() {
        let nodes = (1..=3).map(|id| Node::waypoint(id, 0.0, 0.0)).collect();
        let edges = mirrored(&[(1, 3, 10.0), (1, 2, 3.0), (2, 3, 3.0)]);
        let graph = VenueGraph::new(nodes, edges, 1).expect("valid");
        let path = solve(&graph, 1, 3).expect("route");
        assert_eq!(path.nodes, vec![1, 2, 3]);
        assert_eq!(path.distance, 6.0);
    }

    #[test]
    fn zero_weight_edges_are_walkable() {
        let nodes = (1..=3).map(|id| Node::waypoint(id, 0.0, 0.0)).collect();
        let edges = mirrored(&[(1, 2, 0.0), (2, 3, 4.0)]);
        let graph = VenueGraph::new(nodes, edges, 1).expect("valid");
        let path = solve(&graph, 1, 3).expect("route");
        assert_eq!(path.nodes, vec![1, 2, 3]);
        assert_eq!(path.distance, 4.0);
    }
}
