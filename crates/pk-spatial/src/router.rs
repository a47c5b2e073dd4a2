//! Routing trait, A* and Dijkstra implementations.
//!
//! # Pluggability
//!
//! The behavior layer calls routing via the [`Router`] trait, so tests and
//! applications can swap the search strategy without touching the bots.
//! The default [`AStarRouter`] uses the straight-line distance to the goal as
//! its heuristic; that is admissible and consistent here because every edge
//! weight is the straight-line length of its road segment.
//!
//! # Tie-breaking
//!
//! Heap entries are ordered by `(f-score, NodeId)`, so among equal f-scores
//! the node added to the graph first is expanded first.  Relaxation only
//! replaces a parent on a strictly shorter distance, which keeps the first
//! discovered of several equally short routes.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use pk_core::{EdgeId, NodeId, Point};

use crate::network::RoadNetwork;
use crate::{SpatialError, SpatialResult};

// ── Route ─────────────────────────────────────────────────────────────────────

/// The result of a routing query.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Nodes to visit in order, start and goal inclusive.  Empty when the
    /// start already is the goal.
    pub nodes: Vec<NodeId>,
    /// Position of each entry of `nodes`.
    pub waypoints: Vec<Point>,
    /// Sum of the traversed edge lengths.
    pub length: f32,
}

impl Route {
    pub fn empty() -> Self {
        Route { nodes: Vec::new(), waypoints: Vec::new(), length: 0.0 }
    }

    /// `true` if there is nothing to drive.
    pub fn is_trivial(&self) -> bool {
        self.nodes.is_empty()
    }
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable routing engine.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync` so they can be shared across Rayon
/// worker threads during the parallel behavior phase.
pub trait Router: Send + Sync {
    /// Compute a route from `from` to `to`.
    ///
    /// `from == to` yields an empty route, not an error.  A disconnected pair
    /// yields [`SpatialError::NoRoute`].
    fn route(&self, network: &RoadNetwork, from: NodeId, to: NodeId) -> SpatialResult<Route>;
}

/// Waypoint coordinates from `from` to `to`, or an empty list when they are
/// the same node or no route exists.
pub fn find_path(router: &dyn Router, network: &RoadNetwork, from: NodeId, to: NodeId) -> Vec<Point> {
    router.route(network, from, to).map(|r| r.waypoints).unwrap_or_default()
}

// ── AStarRouter ───────────────────────────────────────────────────────────────

/// A* over the CSR road graph with a Euclidean heuristic.
#[derive(Debug, Default, Clone, Copy)]
pub struct AStarRouter;

impl Router for AStarRouter {
    fn route(&self, network: &RoadNetwork, from: NodeId, to: NodeId) -> SpatialResult<Route> {
        search(network, from, to, |n| network.pos(n).distance(network.pos(to)))
    }
}

// ── DijkstraRouter ────────────────────────────────────────────────────────────

/// Uninformed shortest path search.  Explores more of the graph than A* but
/// makes no assumption about edge weights beyond non-negativity.
#[derive(Debug, Default, Clone, Copy)]
pub struct DijkstraRouter;

impl Router for DijkstraRouter {
    fn route(&self, network: &RoadNetwork, from: NodeId, to: NodeId) -> SpatialResult<Route> {
        search(network, from, to, |_| 0.0)
    }
}

// ── Search internals ──────────────────────────────────────────────────────────

/// Total order over non-NaN costs for the heap.
#[derive(Copy, Clone, Debug, PartialEq)]
struct Cost(f32);

impl Eq for Cost {}

impl PartialOrd for Cost {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cost {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

fn search(
    network: &RoadNetwork,
    from: NodeId,
    to: NodeId,
    heuristic: impl Fn(NodeId) -> f32,
) -> SpatialResult<Route> {
    let n = network.node_count();
    for id in [from, to] {
        if id.index() >= n {
            return Err(SpatialError::NodeNotFound(id));
        }
    }
    if from == to {
        return Ok(Route::empty());
    }

    // g[v] = best known distance to v.
    let mut g         = vec![f32::INFINITY; n];
    let mut prev_edge = vec![EdgeId::INVALID; n];
    let mut closed    = vec![false; n];

    g[from.index()] = 0.0;

    // Min-heap on (f, node).  NodeId breaks f ties deterministically.
    let mut heap: BinaryHeap<Reverse<(Cost, NodeId)>> = BinaryHeap::new();
    heap.push(Reverse((Cost(heuristic(from)), from)));

    while let Some(Reverse((_, node))) = heap.pop() {
        if node == to {
            return Ok(reconstruct(network, &prev_edge, to, g[to.index()]));
        }
        if closed[node.index()] {
            continue;
        }
        closed[node.index()] = true;

        let base = g[node.index()];
        for edge in network.out_edges(node) {
            let next = network.edge_to[edge.index()];
            let tentative = base + network.edge_length[edge.index()];
            if tentative < g[next.index()] {
                g[next.index()] = tentative;
                prev_edge[next.index()] = edge;
                heap.push(Reverse((Cost(tentative + heuristic(next)), next)));
            }
        }
    }

    Err(SpatialError::NoRoute { from, to })
}

fn reconstruct(network: &RoadNetwork, prev_edge: &[EdgeId], to: NodeId, length: f32) -> Route {
    let mut nodes = vec![to];
    let mut cur = to;
    loop {
        let e = prev_edge[cur.index()];
        if e == EdgeId::INVALID {
            break;
        }
        cur = network.edge_from[e.index()];
        nodes.push(cur);
    }
    nodes.reverse();
    let waypoints = nodes.iter().map(|&n| network.pos(n)).collect();
    Route { nodes, waypoints, length }
}
