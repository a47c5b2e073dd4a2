//! `pk-lot` — the parking spaces and everything a car can bump into.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`space`]     | `ParkingSpace`, `Occupant`                                 |
//! | [`lot`]       | `ParkingLot` — space table, occupancy, claims              |
//! | [`claim`]     | `ClaimIndex` — which bot is headed for which space         |
//! | [`collision`] | walls, space footprints and vehicle overlap tests          |
//! | [`player`]    | `PlayerCar` — read-only view of the human-driven car       |
//! | [`error`]     | `LotError`, `LotResult<T>`                                 |
//!
//! # Ownership
//!
//! Occupancy and claims change only through `ParkingLot` methods, which the
//! simulation calls from its sequential phases.  Bots read them.
//!
//! # Feature flags
//!
//! | Flag      | Effect                                                     |
//! |-----------|------------------------------------------------------------|
//! | `fx-hash` | `ClaimIndex` hashes with FxHash instead of SipHash.        |
//! | `serde`   | Derives `Serialize`/`Deserialize` on public types.         |

pub mod claim;
pub mod collision;
pub mod error;
pub mod lot;
pub mod player;
pub mod space;


pub use claim::ClaimIndex;
pub use collision::{SpaceExclusion, collides_with_space, collides_with_vehicles, collides_with_wall, walls};
pub use error::{LotError, LotResult};
pub use lot::ParkingLot;
pub use player::PlayerCar;
pub use space::{Occupant, ParkingSpace};
