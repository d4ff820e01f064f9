use crate::glam::IVec2;

/// A half-open, axis-aligned rectangle of integer points: `[minimum, minimum + shape)`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Extent2i {
    pub minimum: IVec2,
    pub shape: IVec2,
}

impl Extent2i {
    pub fn from_min_and_shape(minimum: IVec2, shape: IVec2) -> Self {
        Self { minimum, shape }
    }

    /// `max` is inclusive.
    pub fn from_min_and_max(minimum: IVec2, max: IVec2) -> Self {
        Self::from_min_and_shape(minimum, max - minimum + IVec2::ONE)
    }

    pub fn from_min_and_lub(minimum: IVec2, least_upper_bound: IVec2) -> Self {
        Self::from_min_and_shape(minimum, least_upper_bound - minimum)
    }

    /// The first point past the maximum on every axis.
    pub fn least_upper_bound(&self) -> IVec2 {
        self.minimum + self.shape
    }

    pub fn max(&self) -> IVec2 {
        self.least_upper_bound() - IVec2::ONE
    }

    pub fn is_empty(&self) -> bool {
        self.shape.x <= 0 || self.shape.y <= 0
    }

    pub fn volume(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            (self.shape.x as usize) * (self.shape.y as usize)
        }
    }

    pub fn contains(&self, p: IVec2) -> bool {
        let lub = self.least_upper_bound();
        p.x >= self.minimum.x && p.y >= self.minimum.y && p.x < lub.x && p.y < lub.y
    }

    /// True if every point of `other` is in `self`. An empty `other` is contained only if its minimum is.
    pub fn contains_extent(&self, other: &Self) -> bool {
        self.contains(other.minimum) && (other.is_empty() || self.contains(other.max()))
    }

    pub fn intersection(&self, other: &Self) -> Self {
        let minimum = self.minimum.max(other.minimum);
        let lub = self.least_upper_bound().min(other.least_upper_bound());
        Self::from_min_and_lub(minimum, lub)
    }

    pub fn intersects(&self, other: &Self) -> bool {
        !self.intersection(other).is_empty()
    }

    /// Visits every point in row-major order (x varies fastest).
    pub fn iter2(&self) -> impl Iterator<Item = IVec2> {
        let Self { minimum, shape } = *self;
        let (w, h) = (shape.x.max(0), shape.y.max(0));
        (0..h).flat_map(move |y| (0..w).map(move |x| minimum + IVec2::new(x, y)))
    }
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝
