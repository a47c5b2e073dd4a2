//! Road graph of a parking lot.
//!
//! One node per road crossing, named `row-col`, plus the entrance node in the
//! middle of the apron.  Consecutive crossings along every horizontal and
//! vertical road are joined by an edge; the entrance is joined to the
//! bottom-road crossing closest to it.  Node ids are assigned row-major, then
//! the entrance, so the graph is identical for identical layouts.

use log::debug;

use pk_core::{LotLayout, Point};

use crate::network::{NodeKind, RoadNetwork, RoadNetworkBuilder};
use crate::SpatialResult;

/// Build the road graph for `layout`.
///
/// Fails only when the layout itself does not validate.
pub fn build_lot_network(layout: &LotLayout) -> SpatialResult<RoadNetwork> {
    layout.validate()?;

    let rows = layout.horizontal_roads;
    let cols = layout.vertical_roads;
    let mut b = RoadNetworkBuilder::with_capacity(
        (rows * cols) as usize + 1,
        (2 * (rows * (cols - 1) + cols * (rows - 1)) + 2) as usize,
    );

    let mut grid = Vec::with_capacity((rows * cols) as usize);
    for row in 0..rows {
        for col in 0..cols {
            let pos = Point::new(layout.vertical_road_center(col), layout.horizontal_road_center(row));
            grid.push(b.add_node(pos, NodeKind::Intersection { row, col }));
        }
    }
    let at = |row: u32, col: u32| grid[(row * cols + col) as usize];

    for row in 0..rows {
        for col in 0..cols - 1 {
            b.add_road(at(row, col), at(row, col + 1));
        }
    }
    for col in 0..cols {
        for row in 0..rows - 1 {
            b.add_road(at(row, col), at(row + 1, col));
        }
    }

    let entrance_pos = layout.entrance_point();
    let entrance = b.add_node(entrance_pos, NodeKind::Entrance);
    let bottom = rows - 1;
    let mut gate = at(bottom, 0);
    for col in 1..cols {
        let n = at(bottom, col);
        if b.node_pos(n).distance(entrance_pos) < b.node_pos(gate).distance(entrance_pos) {
            gate = n;
        }
    }
    b.add_road(gate, entrance);

    let net = b.build();
    debug!(
        "lot road network: {} nodes, {} directed edges, entrance joined to {}",
        net.node_count(),
        net.edge_count(),
        net.node_kind[gate.index()]
    );
    Ok(net)
}
