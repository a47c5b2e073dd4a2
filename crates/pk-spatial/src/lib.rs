//! `pk-spatial` — road network, routing, and where a car may drive.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`network`] | `RoadNetwork` (CSR + R-tree), `RoadNetworkBuilder`, `NodeKind` |
//! | [`grid`]    | `build_lot_network` — the graph of a `LotLayout`            |
//! | [`router`]  | `Router` trait, `Route`, `AStarRouter`, `DijkstraRouter`, `find_path` |
//! | [`region`]  | `Surface`, `on_road`, `within_boundary`, `at_intersection`  |
//! | [`lane`]    | `lane_offset`, `snap_to_lane`                               |
//! | [`error`]   | `SpatialError`, `SpatialResult<T>`                          |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod error;
pub mod grid;
pub mod lane;
pub mod network;
pub mod region;
pub mod router;


pub use error::{SpatialError, SpatialResult};
pub use grid::build_lot_network;
pub use lane::{lane_offset, snap_to_lane};
pub use network::{NodeKind, RoadNetwork, RoadNetworkBuilder};
pub use region::{
    Surface, at_intersection, classify, horizontal_road_at, in_apron, on_road, vertical_road_at, within_boundary,
};
pub use router::{AStarRouter, DijkstraRouter, Route, Router, find_path};
