use crate::coordinates::MM_SIZE;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct MemoryConfig {
    /// Edge length in submaps of the window warmed by `load` and of the rectangle kept in memory by `save`.
    pub window_submaps: i32,
    /// Number of z levels above and below the current one that `prepare_region` keeps warm.
    pub vertical_fov: i32,
    /// Lowest z level of the world.
    pub min_z: i32,
    /// Highest z level of the world.
    pub max_z: i32,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            window_submaps: MM_SIZE,
            vertical_fov: 4,
            min_z: -10,
            max_z: 10,
        }
    }
}

impl MemoryConfig {
    /// The z levels warmed around `z`, clamped to the world bounds. Empty if `z` is outside the world.
    pub fn warm_levels(&self, z: i32) -> std::ops::RangeInclusive<i32> {
        (z - self.vertical_fov).max(self.min_z)..=(z + self.vertical_fov).min(self.max_z)
    }
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝
