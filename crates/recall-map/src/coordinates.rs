use crate::units::*;

use itertools::iproduct;
use recall_core::geometry::Extent2i;
use recall_core::glam::{IVec2, IVec3};

/// Edge length of a submap in map squares.
pub const SUBMAP_EDGE: i32 = 12;
/// Edge length of a region in submaps.
pub const REGION_EDGE: i32 = 8;
/// Edge length in submaps of the window warmed by `load` and kept by `save`.
pub const MM_SIZE: i32 = 22;

pub const SUBMAP_AREA: usize = (SUBMAP_EDGE * SUBMAP_EDGE) as usize;
pub const REGION_AREA: usize = (REGION_EDGE * REGION_EDGE) as usize;

/// Floor division on x and y. z passes through, since every scale shares the same z levels.
fn floor_div_xy(p: IVec3, edge: i32) -> IVec3 {
    IVec3::new(p.x.div_euclid(edge), p.y.div_euclid(edge), p.z)
}

fn floor_rem_xy(p: IVec3, edge: i32) -> IVec2 {
    IVec2::new(p.x.rem_euclid(edge), p.y.rem_euclid(edge))
}

/// Returns the [`SubmapUnits`] coordinates of the submap that contains `p`.
pub fn in_submap(p: SquareUnits<IVec3>) -> SubmapUnits<IVec3> {
    SubmapUnits(floor_div_xy(p.0, SUBMAP_EDGE))
}

/// The map square at the (0, 0) corner of `submap`.
pub fn submap_min_square(submap: SubmapUnits<IVec3>) -> SquareUnits<IVec3> {
    let s = submap.0;
    SquareUnits(IVec3::new(s.x * SUBMAP_EDGE, s.y * SUBMAP_EDGE, s.z))
}

/// Returns the [`RegionUnits`] coordinates of the region that contains `submap`.
pub fn in_region(submap: SubmapUnits<IVec3>) -> RegionUnits<IVec3> {
    RegionUnits(floor_div_xy(submap.0, REGION_EDGE))
}

/// The submap at the (0, 0) corner of `region`.
pub fn region_min_submap(region: RegionUnits<IVec3>) -> SubmapUnits<IVec3> {
    let r = region.0;
    SubmapUnits(IVec3::new(r.x * REGION_EDGE, r.y * REGION_EDGE, r.z))
}

/// The xy footprint of `region` in submaps.
pub fn region_footprint(region: RegionUnits<IVec3>) -> SubmapUnits<Extent2i> {
    region_min_submap(region)
        .map(|min| Extent2i::from_min_and_shape(min.truncate(), IVec2::splat(REGION_EDGE)))
}

/// Visits `(linear index, absolute submap)` for every submap of `region` in row-major order.
pub fn region_submaps(
    region: RegionUnits<IVec3>,
) -> impl Iterator<Item = (usize, SubmapUnits<IVec3>)> {
    let SubmapUnits(min) = region_min_submap(region);
    iproduct!(0..REGION_EDGE, 0..REGION_EDGE).map(move |(y, x)| {
        (
            (y * REGION_EDGE + x) as usize,
            SubmapUnits(min + IVec3::new(x, y, 0)),
        )
    })
}

/// A map square decomposed into its submap and its offset within that submap.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CoordPair {
    pub submap: SubmapUnits<IVec3>,
    /// In `[0, SUBMAP_EDGE)` on both axes.
    pub local: SquareUnits<IVec2>,
}

impl CoordPair {
    pub fn from_square(p: SquareUnits<IVec3>) -> Self {
        Self {
            submap: in_submap(p),
            local: SquareUnits(floor_rem_xy(p.0, SUBMAP_EDGE)),
        }
    }

    pub fn square(&self) -> SquareUnits<IVec3> {
        let SquareUnits(min) = submap_min_square(self.submap);
        SquareUnits(min + self.local.0.extend(0))
    }
}

/// A submap decomposed into its region and its offset within that region.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RegionCoordPair {
    pub region: RegionUnits<IVec3>,
    /// In `[0, REGION_EDGE)` on both axes.
    pub local: SubmapUnits<IVec2>,
}

impl RegionCoordPair {
    pub fn from_submap(submap: SubmapUnits<IVec3>) -> Self {
        Self {
            region: in_region(submap),
            local: SubmapUnits(floor_rem_xy(submap.0, REGION_EDGE)),
        }
    }

    pub fn submap(&self) -> SubmapUnits<IVec3> {
        let SubmapUnits(min) = region_min_submap(self.region);
        SubmapUnits(min + self.local.0.extend(0))
    }
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝
