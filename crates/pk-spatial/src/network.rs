//! Road network representation and builder.
//!
//! # Data layout
//!
//! The graph uses **Compressed Sparse Row (CSR)** format for outgoing edges.
//! Given a `NodeId n`, its outgoing edges occupy the slice:
//!
//! ```text
//! edge_to[ node_out_start[n] .. node_out_start[n+1] ]
//! ```
//!
//! The edge arrays (`edge_from`, `edge_to`, `edge_length`) are sorted by
//! source node, stably, so the edges of one node keep the order in which the
//! roads were added.  The router relies on that order for its tie-breaks.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) maps a lot position to the nearest `NodeId`.  Used
//! to anchor both ends of every route.

use std::collections::VecDeque;
use std::fmt;

use rstar::{AABB, PointDistance, RTree, RTreeObject};

use pk_core::{EdgeId, NodeId, Point};

// ── NodeKind ──────────────────────────────────────────────────────────────────

/// What a graph node stands for.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeKind {
    /// Crossing of horizontal road `row` and vertical road `col`.
    Intersection { row: u32, col: u32 },
    /// The lot's single entrance/exit, in the middle of the apron.
    Entrance,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Intersection { row, col } => write!(f, "{row}-{col}"),
            NodeKind::Entrance => f.write_str("entrance"),
        }
    }
}

// ── R-tree node entry ─────────────────────────────────────────────────────────

#[derive(Clone)]
struct NodeEntry {
    point: [f32; 2],
    id: NodeId,
}

impl RTreeObject for NodeEntry {
    type Envelope = AABB<[f32; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for NodeEntry {
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── RoadNetwork ───────────────────────────────────────────────────────────────

/// Undirected road graph (both directions stored) in CSR format plus a
/// spatial index for node snapping.
///
/// Immutable once built; share it by reference.  Do not construct directly;
/// use [`RoadNetworkBuilder`] or [`build_lot_network`](crate::build_lot_network).
pub struct RoadNetwork {
    // ── Node data ─────────────────────────────────────────────────────────
    /// Position of each node.  Indexed by `NodeId`.
    pub node_pos: Vec<Point>,

    /// What each node represents.  Indexed by `NodeId`.
    pub node_kind: Vec<NodeKind>,

    // ── CSR edge adjacency ────────────────────────────────────────────────
    /// Outgoing edges of node `n` are at EdgeIds
    /// `node_out_start[n] .. node_out_start[n+1]`.
    /// Length = `node_count + 1`.
    pub node_out_start: Vec<u32>,

    // ── Edge data (indexed by EdgeId) ─────────────────────────────────────
    /// Source node of each edge.  Needed for route reconstruction.
    pub edge_from: Vec<NodeId>,

    pub edge_to: Vec<NodeId>,

    /// Euclidean length of each edge in lot units.  Used as the A* edge cost.
    pub edge_length: Vec<f32>,

    // ── Spatial index ─────────────────────────────────────────────────────
    spatial_idx: RTree<NodeEntry>,

    entrance: Option<NodeId>,
}

impl RoadNetwork {
    /// Construct an empty network with no nodes or edges.
    pub fn empty() -> Self {
        RoadNetworkBuilder::new().build()
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.node_pos.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_to.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_pos.is_empty()
    }

    /// The entrance node, if the network has one.
    pub fn entrance(&self) -> Option<NodeId> {
        self.entrance
    }

    #[inline]
    pub fn pos(&self, node: NodeId) -> Point {
        self.node_pos[node.index()]
    }

    /// Intersection node at (`row`, `col`), if present.
    pub fn intersection(&self, row: u32, col: u32) -> Option<NodeId> {
        self.node_kind
            .iter()
            .position(|k| *k == NodeKind::Intersection { row, col })
            .map(|i| NodeId(i as u32))
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// Iterator over the `EdgeId`s of all outgoing edges from `node`.
    #[inline]
    pub fn out_edges(&self, node: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        (start..end).map(|i| EdgeId(i as u32))
    }

    /// Neighbours of `node` in edge insertion order.
    pub fn neighbors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.out_edges(node).map(|e| self.edge_to[e.index()])
    }

    #[inline]
    pub fn out_degree(&self, node: NodeId) -> usize {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        end - start
    }

    /// `true` if every node is reachable from node 0.  An empty network
    /// counts as connected.
    pub fn is_connected(&self) -> bool {
        if self.is_empty() {
            return true;
        }
        let mut seen = vec![false; self.node_count()];
        let mut queue = VecDeque::from([NodeId(0)]);
        seen[0] = true;
        while let Some(n) = queue.pop_front() {
            for m in self.neighbors(n) {
                if !seen[m.index()] {
                    seen[m.index()] = true;
                    queue.push_back(m);
                }
            }
        }
        seen.iter().all(|&s| s)
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// The node closest to `pos`.  Among nodes at the same distance the one
    /// added first wins.
    ///
    /// Returns `None` only if the network has no nodes.
    pub fn nearest_node(&self, pos: Point) -> Option<NodeId> {
        let query = [pos.x, pos.y];
        let mut iter = self.spatial_idx.nearest_neighbor_iter_with_distance_2(&query);
        let (first, best) = iter.next()?;
        let mut pick = first.id;
        for (e, d) in iter {
            if d > best {
                break;
            }
            pick = pick.min(e.id);
        }
        Some(pick)
    }

    /// Among the intersections on horizontal road `road`, the one whose x is
    /// closest to `x`.
    pub fn nearest_node_on_road(&self, road: u32, x: f32) -> Option<NodeId> {
        let mut best: Option<(f32, NodeId)> = None;
        for (i, kind) in self.node_kind.iter().enumerate() {
            let NodeKind::Intersection { row, .. } = *kind else { continue };
            if row != road {
                continue;
            }
            let d = (self.node_pos[i].x - x).abs();
            if best.is_none_or(|(bd, _)| d < bd) {
                best = Some((d, NodeId(i as u32)));
            }
        }
        best.map(|(_, id)| id)
    }

    /// Goal node for driving to a parking space centred at `center` that
    /// opens onto horizontal road `road`.  Prefers the adjacent road so the
    /// approach ends on the correct side of the cluster, and falls back to
    /// plain [`nearest_node`](Self::nearest_node) when `road` is unknown or
    /// has no nodes.
    pub fn nearest_node_to_space(&self, center: Point, road: Option<u32>) -> Option<NodeId> {
        road.and_then(|r| self.nearest_node_on_road(r, center.x))
            .or_else(|| self.nearest_node(center))
    }
}

// ── RoadNetworkBuilder ────────────────────────────────────────────────────────

/// Construct a [`RoadNetwork`] incrementally, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use pk_core::Point;
/// use pk_spatial::{NodeKind, RoadNetworkBuilder};
///
/// let mut b = RoadNetworkBuilder::new();
/// let a = b.add_node(Point::new(0.0, 0.0), NodeKind::Intersection { row: 0, col: 0 });
/// let c = b.add_node(Point::new(100.0, 0.0), NodeKind::Intersection { row: 0, col: 1 });
/// b.add_road(a, c);
/// let net = b.build();
/// assert_eq!(net.node_count(), 2);
/// assert_eq!(net.edge_count(), 2); // bidirectional
/// ```
pub struct RoadNetworkBuilder {
    nodes:     Vec<(Point, NodeKind)>,
    raw_edges: Vec<RawEdge>,
}

struct RawEdge {
    from:   NodeId,
    to:     NodeId,
    length: f32,
}

impl RoadNetworkBuilder {
    pub fn new() -> Self {
        Self { nodes: Vec::new(), raw_edges: Vec::new() }
    }

    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            nodes:     Vec::with_capacity(nodes),
            raw_edges: Vec::with_capacity(edges),
        }
    }

    /// Add a node and return its `NodeId` (sequential from 0).
    pub fn add_node(&mut self, pos: Point, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push((pos, kind));
        id
    }

    /// Add a **directed** edge with an explicit length.
    pub fn add_directed_edge(&mut self, from: NodeId, to: NodeId, length: f32) {
        self.raw_edges.push(RawEdge { from, to, length });
    }

    /// Add a straight road segment between two nodes, in both directions,
    /// weighted by the Euclidean distance between them.
    pub fn add_road(&mut self, a: NodeId, b: NodeId) {
        let length = self.node_pos(a).distance(self.node_pos(b));
        self.add_directed_edge(a, b, length);
        self.add_directed_edge(b, a, length);
    }

    pub fn node_pos(&self, id: NodeId) -> Point {
        self.nodes[id.index()].0
    }

    pub fn node_count(&self) -> usize { self.nodes.len() }
    pub fn edge_count(&self) -> usize { self.raw_edges.len() }

    /// Consume the builder and produce a [`RoadNetwork`].
    pub fn build(self) -> RoadNetwork {
        let node_count = self.nodes.len();
        let edge_count = self.raw_edges.len();

        // Stable: edges of one node stay in insertion order.
        let mut raw = self.raw_edges;
        raw.sort_by_key(|e| e.from.0);

        let edge_from:   Vec<NodeId> = raw.iter().map(|e| e.from).collect();
        let edge_to:     Vec<NodeId> = raw.iter().map(|e| e.to).collect();
        let edge_length: Vec<f32>    = raw.iter().map(|e| e.length).collect();

        let mut node_out_start = vec![0u32; node_count + 1];
        for e in &raw {
            node_out_start[e.from.index() + 1] += 1;
        }
        for i in 1..=node_count {
            node_out_start[i] += node_out_start[i - 1];
        }
        debug_assert_eq!(node_out_start[node_count] as usize, edge_count);

        let entries: Vec<NodeEntry> = self
            .nodes
            .iter()
            .enumerate()
            .map(|(i, (pos, _))| NodeEntry { point: [pos.x, pos.y], id: NodeId(i as u32) })
            .collect();
        let spatial_idx = RTree::bulk_load(entries);

        let entrance = self
            .nodes
            .iter()
            .position(|(_, k)| *k == NodeKind::Entrance)
            .map(|i| NodeId(i as u32));

        let (node_pos, node_kind) = self.nodes.into_iter().unzip();

        RoadNetwork {
            node_pos,
            node_kind,
            node_out_start,
            edge_from,
            edge_to,
            edge_length,
            spatial_idx,
            entrance,
        }
    }
}

impl Default for RoadNetworkBuilder {
    fn default() -> Self {
        Self::new()
    }
}
