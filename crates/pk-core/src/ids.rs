//! Typed indices for graph nodes, edges, spaces and bots.
//!
//! Each id is a `u32` newtype so a `SpaceId` can never be passed where a
//! `BotId` is expected.  `Display` prints a one-letter tag and the number
//! (`N3`, `E12`, `S4`, `B7`), which keeps log lines short.

use std::fmt;

macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty) => $tag:literal;) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Placeholder for "none", e.g. an unset predecessor in a search.
            pub const INVALID: $name = $name(<$inner>::MAX);

            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Default for $name {
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($tag, "{}"), self.0)
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Index of a road-graph node (an intersection or the entrance).
    pub struct NodeId(u32) => "N";
}

typed_id! {
    /// Index of a directed road-graph edge in CSR order.
    pub struct EdgeId(u32) => "E";
}

typed_id! {
    /// Index of a parking space in the lot's space table.
    pub struct SpaceId(u32) => "S";
}

typed_id! {
    /// Identifier of a bot vehicle.  Allocated monotonically and never reused
    /// within a run, so ascending `BotId` order is also spawn order.
    pub struct BotId(u32) => "B";
}
