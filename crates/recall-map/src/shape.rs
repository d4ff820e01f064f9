use crate::coordinates::{REGION_AREA, SUBMAP_AREA};

use ndshape::{ConstShape, ConstShape2u32};
use recall_core::glam::IVec2;
use recall_core::static_assertions::const_assert_eq;

/// Squares within one submap, x varying fastest.
pub type SubmapShape = ConstShape2u32<12, 12>;
/// Submaps within one region, x varying fastest.
pub type RegionShape = ConstShape2u32<8, 8>;

const_assert_eq!(SubmapShape::SIZE as usize, SUBMAP_AREA);
const_assert_eq!(RegionShape::SIZE as usize, REGION_AREA);

/// Linear index of the local offset `p` in shape `S`. `p` must be inside the shape.
#[inline]
pub fn linearize<S: ConstShape<2, Coord = u32>>(p: IVec2) -> usize {
    debug_assert!(p.x >= 0 && p.y >= 0, "{:?}", p);
    S::linearize(p.as_uvec2().to_array()) as usize
}

#[inline]
pub fn delinearize<S: ConstShape<2, Coord = u32>>(i: usize) -> IVec2 {
    let [x, y] = S::delinearize(i as u32);
    IVec2::new(x as i32, y as i32)
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

    #[test]
    fn submap_layout_is_y_major() {
        assert_eq!(linearize::<SubmapShape>(IVec2::new(3, 2)), 2 * 12 + 3);
        assert_eq!(delinearize::<SubmapShape>(2 * 12 + 3), IVec2::new(3, 2));
        assert_eq!(linearize::<RegionShape>(IVec2::new(7, 7)), REGION_AREA - 1);
    }
}
