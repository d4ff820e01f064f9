use crate::coordinates::REGION_AREA;
use crate::shape::{linearize, RegionShape};
use crate::submap::MemorySubmap;
use crate::units::SubmapUnits;

use recall_core::glam::IVec2;

/// A square block of submaps: the unit of persistence.
///
/// Every position is always occupied, possibly by an empty submap.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MemoryRegion {
    /// Row-major, exactly [`REGION_AREA`] entries.
    submaps: Vec<MemorySubmap>,
}

impl Default for MemoryRegion {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryRegion {
    pub fn new() -> Self {
        Self {
            submaps: vec![MemorySubmap::new(); REGION_AREA],
        }
    }

    /// `submaps` must be in row-major order and hold exactly [`REGION_AREA`] entries.
    pub(crate) fn from_submaps(submaps: Vec<MemorySubmap>) -> Self {
        debug_assert_eq!(submaps.len(), REGION_AREA);
        Self { submaps }
    }

    pub fn is_empty(&self) -> bool {
        self.submaps.iter().all(MemorySubmap::is_empty)
    }

    pub fn submap(&self, local: SubmapUnits<IVec2>) -> &MemorySubmap {
        &self.submaps[Self::local_index(local)]
    }

    pub fn submap_mut(&mut self, local: SubmapUnits<IVec2>) -> &mut MemorySubmap {
        &mut self.submaps[Self::local_index(local)]
    }

    /// Puts `submap` at `local` and returns what was there.
    pub fn replace(&mut self, local: SubmapUnits<IVec2>, submap: MemorySubmap) -> MemorySubmap {
        std::mem::replace(&mut self.submaps[Self::local_index(local)], submap)
    }

    /// All submaps in row-major order.
    pub fn submaps(&self) -> &[MemorySubmap] {
        &self.submaps
    }

    /// Consumes the region, yielding `(linear index, submap)` in row-major order.
    pub fn into_submaps(self) -> impl Iterator<Item = (usize, MemorySubmap)> {
        self.submaps.into_iter().enumerate()
    }

    pub fn local_index(local: SubmapUnits<IVec2>) -> usize {
        linearize::<RegionShape>(local.0)
    }
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝

#[cfg(test)]
mod test {
    use super::*;
    use crate::tile::MemorizedTile;
    use crate::units::SquareUnits;

    #[test]
    fn new_region_is_empty() {
        let region = MemoryRegion::new();
        assert!(region.is_empty());
        assert_eq!(region.submaps().len(), REGION_AREA);
    }

    #[test]
    fn one_written_submap_makes_region_non_empty() {
        let mut region = MemoryRegion::new();
        let mut tile = MemorizedTile::default();
        tile.set_symbol('#');
        region
            .submap_mut(SubmapUnits(IVec2::new(7, 0)))
            .set_tile(SquareUnits(IVec2::new(1, 1)), tile.clone());

        assert!(!region.is_empty());
        let index = MemoryRegion::local_index(SubmapUnits(IVec2::new(7, 0)));
        assert_eq!(index, 7);
        assert_eq!(
            region.submaps()[index].get_tile(SquareUnits(IVec2::new(1, 1))),
            &tile
        );
    }

    #[test]
    fn replace_swaps_submaps() {
        let mut region = MemoryRegion::new();
        let mut written = MemorySubmap::new();
        written.set_tile(SquareUnits(IVec2::ZERO), MemorizedTile::default());
        let old = region.replace(SubmapUnits(IVec2::new(2, 3)), written.clone());
        assert!(old.is_empty());
        assert_eq!(region.submap(SubmapUnits(IVec2::new(2, 3))), &written);
    }
}
