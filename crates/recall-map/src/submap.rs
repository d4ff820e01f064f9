use crate::coordinates::SUBMAP_AREA;
use crate::shape::{linearize, SubmapShape};
use crate::tile::MemorizedTile;
use crate::units::SquareUnits;

use recall_core::glam::IVec2;

static EMPTY_TILE: MemorizedTile = MemorizedTile::EMPTY;

/// The remembered tiles of one submap.
///
/// Storage is allocated on the first write, so a mostly unobserved world costs one empty `Vec` per submap.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MemorySubmap {
    /// Empty, or exactly [`SUBMAP_AREA`] tiles indexed `y * SUBMAP_EDGE + x`.
    tiles: Vec<MemorizedTile>,
    valid: bool,
}

impl Default for MemorySubmap {
    fn default() -> Self {
        Self::new()
    }
}

impl MemorySubmap {
    /// A valid submap with nothing remembered.
    pub const fn new() -> Self {
        Self {
            tiles: Vec::new(),
            valid: true,
        }
    }

    /// The read-only stand-in for a submap outside of any loaded window. Writes to it are ignored.
    pub const fn placeholder() -> Self {
        Self {
            tiles: Vec::new(),
            valid: false,
        }
    }

    /// Builds a valid submap from decoded tiles. `tiles` must be empty or hold [`SUBMAP_AREA`] tiles.
    pub(crate) fn from_tiles(tiles: Vec<MemorizedTile>) -> Self {
        debug_assert!(tiles.is_empty() || tiles.len() == SUBMAP_AREA);
        Self { tiles, valid: true }
    }

    /// True until the first write.
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// The allocated tiles, or an empty slice if nothing was ever written.
    pub fn tiles(&self) -> &[MemorizedTile] {
        &self.tiles
    }

    pub fn get_tile(&self, local: SquareUnits<IVec2>) -> &MemorizedTile {
        if self.tiles.is_empty() {
            return &EMPTY_TILE;
        }
        &self.tiles[linearize::<SubmapShape>(local.0)]
    }

    /// Allocates storage if this is the first write. Returns `None` for the placeholder.
    pub fn tile_mut(&mut self, local: SquareUnits<IVec2>) -> Option<&mut MemorizedTile> {
        if !self.valid {
            return None;
        }
        if self.tiles.is_empty() {
            self.tiles = vec![MemorizedTile::default(); SUBMAP_AREA];
        }
        Some(&mut self.tiles[linearize::<SubmapShape>(local.0)])
    }

    pub fn set_tile(&mut self, local: SquareUnits<IVec2>, tile: MemorizedTile) {
        if let Some(slot) = self.tile_mut(local) {
            *slot = tile;
        }
    }
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝
