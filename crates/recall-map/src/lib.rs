//! The recall map memory model.
//!
//! # Map Memory
//!
//! The player remembers what they have seen of the map one [`MemorizedTile`](crate::MemorizedTile) per map square. The world
//! is effectively unbounded, so memory is kept sparse and paged.
//!
//! ## Scales
//!
//! Three scales of coordinates are distinguished by their unit type:
//!
//! - [`SquareUnits`](crate::SquareUnits): single map squares.
//! - [`SubmapUnits`](crate::SubmapUnits): blocks of `SUBMAP_EDGE²` squares. This is the unit of allocation. A
//!   [`MemorySubmap`](crate::MemorySubmap) only allocates its tiles on the first write.
//! - [`RegionUnits`](crate::RegionUnits): blocks of `REGION_EDGE²` submaps. This is the unit of persistence. Every
//!   [`MemoryRegion`](crate::MemoryRegion) is stored in its own file of a [`RegionDir`](crate::RegionDir).
//!
//! All scales share the same z levels. Conversions use floor division, so negative coordinates decompose the same way as
//! positive ones.
//!
//! ## Caching
//!
//! [`MapMemory`](crate::MapMemory) keeps a sparse map of every submap in memory plus a dense window over the area the game
//! is currently drawing. Touching a submap that isn't in memory pages in its whole region, from disk if it was saved before
//! or freshly allocated otherwise. Saving writes every region that holds any memory and evicts regions far from the player.

mod codec;
mod config;
mod coordinates;
mod diagnostics;
mod memory;
mod region;
mod shape;
mod store;
mod submap;
mod tile;
mod units;

pub use codec::*;
pub use config::*;
pub use coordinates::*;
pub use diagnostics::*;
pub use memory::*;
pub use region::*;
pub use shape::*;
pub use store::*;
pub use submap::*;
pub use tile::*;
pub use units::*;

pub use recall_core::glam;
