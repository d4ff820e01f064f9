use crate::config::MemoryConfig;
use crate::coordinates::{in_region, in_submap, region_footprint, region_submaps, CoordPair, RegionCoordPair};
use crate::diagnostics::{Diagnostic, DiagnosticSink, LogSink};
use crate::region::MemoryRegion;
use crate::store::RegionDir;
use crate::submap::MemorySubmap;
use crate::tile::{MemorizedTile, OutOfRange};
use crate::units::{RegionUnits, SquareUnits, SubmapUnits};

use recall_core::allocator::{AllocId32, Allocator32};
use recall_core::geometry::Extent2i;
use recall_core::glam::{IVec2, IVec3};
use recall_core::SmallKeyHashMap;

static PLACEHOLDER: MemorySubmap = MemorySubmap::placeholder();

/// The dense view over the sparse map kept for the area around the player.
#[derive(Debug)]
struct CacheWindow {
    extent: SubmapUnits<Extent2i>,
    /// The z level the window was prepared for.
    z: i32,
    /// z level of `levels[0]`.
    min_z: i32,
    /// One row-major grid of ids per warm z level. Every id is also in the sparse map.
    levels: Vec<Vec<AllocId32>>,
}

impl CacheWindow {
    fn get(&self, submap: SubmapUnits<IVec3>) -> Option<AllocId32> {
        let SubmapUnits(p) = submap;
        let SubmapUnits(extent) = self.extent;
        let idx = p.truncate() - extent.minimum;
        if idx.x < 0 || idx.y < 0 || idx.x >= extent.shape.x || idx.y >= extent.shape.y {
            return None;
        }
        let level = self.levels.get(usize::try_from(p.z - self.min_z).ok()?)?;
        level.get((idx.y * extent.shape.x + idx.x) as usize).copied()
    }
}

/// Everything the player remembers about the map, paged to and from a [`RegionDir`] one [`MemoryRegion`] at a time.
///
/// Submaps are owned by an arena and addressed through a sparse map keyed by submap coordinates. On top of that sits an
/// optional cache window: a dense grid of ids covering the area passed to [`prepare_region`](Self::prepare_region) or
/// [`load`](Self::load) on several z levels. Lookups try the window first and fall back to the sparse map.
///
/// Nothing here fails loudly. Missing submaps read as [`MemorizedTile::EMPTY`], writes to submaps that aren't in memory
/// are dropped, and anything the operator should know about goes to the [`DiagnosticSink`].
pub struct MapMemory<S = LogSink> {
    config: MemoryConfig,
    store: Option<RegionDir>,
    sink: S,
    arena: Allocator32<MemorySubmap>,
    submaps: SmallKeyHashMap<SubmapUnits<IVec3>, AllocId32>,
    window: Option<CacheWindow>,
}

impl MapMemory<LogSink> {
    pub fn new(config: MemoryConfig, store: RegionDir) -> Self {
        Self::with_sink(config, Some(store), LogSink)
    }
}

impl<S: DiagnosticSink> MapMemory<S> {
    /// Without a `store`, nothing is ever read from or written to disk, and regions evicted by [`save`](Self::save) are
    /// forgotten.
    pub fn with_sink(config: MemoryConfig, store: Option<RegionDir>, sink: S) -> Self {
        Self {
            config,
            store,
            sink,
            arena: Default::default(),
            submaps: Default::default(),
            window: None,
        }
    }

    pub fn in_memory(config: MemoryConfig, sink: S) -> Self {
        Self::with_sink(config, None, sink)
    }

    pub fn config(&self) -> &MemoryConfig {
        &self.config
    }

    pub fn store(&self) -> Option<&RegionDir> {
        self.store.as_ref()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// True while a cache window exists.
    pub fn is_prepared(&self) -> bool {
        self.window.is_some()
    }

    /// The submap at the minimum corner of the cache window, on the z level it was prepared for.
    pub fn cache_pos(&self) -> Option<SubmapUnits<IVec3>> {
        self.window
            .as_ref()
            .map(|w| SubmapUnits(w.extent.0.minimum.extend(w.z)))
    }

    /// Size of the cache window in submaps, zero without one.
    pub fn cache_size(&self) -> IVec2 {
        self.window
            .as_ref()
            .map_or(IVec2::ZERO, |w| w.extent.0.shape)
    }

    /// Number of submaps in memory.
    pub fn submap_count(&self) -> usize {
        self.submaps.len()
    }

    /// Drops the cache window. Submaps stay in memory until [`save`](Self::save) evicts them.
    pub fn clear_cache(&mut self) {
        self.window = None;
    }

    fn submap_id(&self, submap: SubmapUnits<IVec3>) -> Option<AllocId32> {
        self.window
            .as_ref()
            .and_then(|w| w.get(submap))
            .or_else(|| self.submaps.get(&submap).copied())
    }

    /// The submap at `submap` if it is in memory.
    pub fn get_submap(&self, submap: SubmapUnits<IVec3>) -> Option<&MemorySubmap> {
        self.submap_id(submap).and_then(|id| self.arena.get(id))
    }

    pub fn get_submap_mut(&mut self, submap: SubmapUnits<IVec3>) -> Option<&mut MemorySubmap> {
        let id = self.submap_id(submap)?;
        self.arena.get_mut(id)
    }

    /// Like [`get_submap`](Self::get_submap), but a submap that isn't in memory reads as the invalid placeholder.
    pub fn submap_or_placeholder(&self, submap: SubmapUnits<IVec3>) -> &MemorySubmap {
        self.get_submap(submap).unwrap_or(&PLACEHOLDER)
    }

    pub fn get_tile(&self, square: SquareUnits<IVec3>) -> &MemorizedTile {
        let CoordPair { submap, local } = CoordPair::from_square(square);
        self.submap_or_placeholder(submap).get_tile(local)
    }

    fn tile_mut(&mut self, square: SquareUnits<IVec3>) -> Option<&mut MemorizedTile> {
        let CoordPair { submap, local } = CoordPair::from_square(square);
        self.get_submap_mut(submap)?.tile_mut(local)
    }

    fn report_clamps(&mut self, clamps: impl IntoIterator<Item = Option<OutOfRange>>) {
        for clamp in clamps.into_iter().flatten() {
            self.sink.report(Diagnostic::ValueOutOfRange(clamp));
        }
    }

    pub fn set_tile_terrain(
        &mut self,
        square: SquareUnits<IVec3>,
        id: &str,
        subtile: i32,
        rotation: i32,
    ) {
        let clamps = match self.tile_mut(square) {
            Some(tile) => {
                tile.set_ter_id(id);
                [
                    tile.set_ter_subtile(subtile).err(),
                    tile.set_ter_rotation(rotation).err(),
                ]
            }
            None => return,
        };
        self.report_clamps(clamps);
    }

    pub fn set_tile_decoration(
        &mut self,
        square: SquareUnits<IVec3>,
        id: &str,
        subtile: i32,
        rotation: i32,
    ) {
        let clamps = match self.tile_mut(square) {
            Some(tile) => {
                tile.set_dec_id(id);
                [
                    tile.set_dec_subtile(subtile).err(),
                    tile.set_dec_rotation(rotation).err(),
                ]
            }
            None => return,
        };
        self.report_clamps(clamps);
    }

    pub fn set_tile_symbol(&mut self, square: SquareUnits<IVec3>, symbol: char) {
        if let Some(tile) = self.tile_mut(square) {
            tile.set_symbol(symbol);
        }
    }

    /// Clears the decoration of the tile at `square` if its id starts with `prefix`.
    pub fn clear_tile_decoration(&mut self, square: SquareUnits<IVec3>, prefix: &str) {
        let CoordPair { submap, local } = CoordPair::from_square(square);
        if let Some(submap) = self.get_submap_mut(submap) {
            // An unallocated submap has nothing to clear.
            if submap.is_empty() || !submap.get_tile(local).dec_id().starts_with(prefix) {
                return;
            }
            if let Some(tile) = submap.tile_mut(local) {
                tile.clear_decoration();
            }
        }
    }

    /// Forgets everything about the tile at `square`.
    pub fn clear_tile(&mut self, square: SquareUnits<IVec3>) {
        let CoordPair { submap, local } = CoordPair::from_square(square);
        if let Some(submap) = self.get_submap_mut(submap) {
            if !submap.is_empty() {
                submap.set_tile(local, MemorizedTile::default());
            }
        }
    }

    /// Makes sure the map squares in `[p1, p2]`, plus a border of one submap, are in the cache window on every warm z
    /// level around `p1.z`. Returns `false` if the current window already covers them.
    ///
    /// # Panics
    ///
    /// If `p1` and `p2` are on different z levels or `p1` is not below `p2` on x and y.
    pub fn prepare_region(&mut self, p1: SquareUnits<IVec3>, p2: SquareUnits<IVec3>) -> bool {
        assert_eq!(p1.0.z, p2.0.z, "prepare_region corners must share a z level");
        assert!(
            p1.0.x <= p2.0.x && p1.0.y <= p2.0.y,
            "prepare_region corners out of order: {:?} > {:?}",
            p1.0,
            p2.0
        );

        let SubmapUnits(min) = in_submap(p1);
        let SubmapUnits(max) = in_submap(p2);
        let extent = Extent2i::from_min_and_max(
            min.truncate() - IVec2::ONE,
            max.truncate() + IVec2::ONE,
        );

        if let Some(window) = &self.window {
            if window.z == min.z && window.extent.0.contains_extent(&extent) {
                return false;
            }
        }

        self.rebuild_window(SubmapUnits(extent), min.z);
        true
    }

    fn rebuild_window(&mut self, extent: SubmapUnits<Extent2i>, z: i32) {
        self.window = None;

        let warm = self.config.warm_levels(z);
        let min_z = *warm.start();
        let mut levels = Vec::with_capacity(warm.clone().count());
        for level in warm {
            let mut ids = Vec::with_capacity(extent.0.volume());
            for p in extent.0.iter2() {
                ids.push(self.fetch_submap(SubmapUnits(p.extend(level))));
            }
            levels.push(ids);
        }

        self.window = Some(CacheWindow {
            extent,
            z,
            min_z,
            levels,
        });
    }

    /// Returns the id of the submap at `submap`, looking in memory, then on disk, then allocating a new region.
    pub fn fetch_submap(&mut self, submap: SubmapUnits<IVec3>) -> AllocId32 {
        if let Some(&id) = self.submaps.get(&submap) {
            return id;
        }
        if let Some(id) = self.load_submap(submap) {
            return id;
        }
        self.allocate_submap(submap)
    }

    /// Allocates empty submaps for the whole region containing `submap`, leaving any submaps already in memory alone.
    pub fn allocate_submap(&mut self, submap: SubmapUnits<IVec3>) -> AllocId32 {
        self.register_region(in_region(submap), MemoryRegion::new());
        // The region covers `submap`.
        self.submaps[&submap]
    }

    /// Reads the region containing `submap` from disk and registers every submap of it that isn't already in memory.
    ///
    /// Returns `None` without a store, if the region was never saved, or if its file is unreadable. The last case is
    /// reported to the sink.
    pub fn load_submap(&mut self, submap: SubmapUnits<IVec3>) -> Option<AllocId32> {
        let store = self.store.as_ref()?;
        let region = in_region(submap);
        match store.read(region) {
            Ok(Some(contents)) => {
                self.register_region(region, contents);
                self.submaps.get(&submap).copied()
            }
            Ok(None) => None,
            Err(error) => {
                let path = store.region_path(region);
                self.sink.report(Diagnostic::RegionCorrupt {
                    region,
                    path,
                    error,
                });
                None
            }
        }
    }

    fn register_region(&mut self, region: RegionUnits<IVec3>, contents: MemoryRegion) {
        let arena = &mut self.arena;
        for ((_, submap), (_, coords)) in contents.into_submaps().zip(region_submaps(region)) {
            self.submaps
                .entry(coords)
                .or_insert_with(|| arena.insert(submap));
        }
    }

    /// Moves the cache window to a square of [`window_submaps`](MemoryConfig::window_submaps) submaps centered on the
    /// submap containing `square`, fetching every submap in it. Submaps already in memory are kept as they are.
    pub fn load(&mut self, square: SquareUnits<IVec3>) {
        self.clear_cache();

        let SubmapUnits(center) = in_submap(square);
        let size = IVec2::splat(self.config.window_submaps);
        let extent = Extent2i::from_min_and_shape(center.truncate() - size / 2, size);
        self.rebuild_window(SubmapUnits(extent), center.z);

        self.sink.report(Diagnostic::Loaded {
            center: SubmapUnits(center),
            submaps: self.submaps.len(),
        });
    }

    /// Writes every non-empty region in memory to disk, then evicts the regions that don't overlap the
    /// [`window_submaps`](MemoryConfig::window_submaps) square centered on the submap containing `square`.
    ///
    /// The cache window is dropped. A region that fails to write is reported and makes the result `false`, but doesn't stop
    /// the others from being written, and is evicted all the same if it's out of range.
    ///
    /// Retained submaps stay readable and writable through the sparse map after the window is gone.
    pub fn save(&mut self, square: SquareUnits<IVec3>) -> bool {
        self.window = None;
        let submaps_before = self.submaps.len();

        let mut regions: SmallKeyHashMap<RegionUnits<IVec3>, MemoryRegion> = Default::default();
        for (coords, id) in self.submaps.drain() {
            if let Some(submap) = self.arena.remove(id) {
                let RegionCoordPair { region, local } = RegionCoordPair::from_submap(coords);
                regions.entry(region).or_default().replace(local, submap);
            }
        }
        debug_assert!(self.arena.is_empty());

        let SubmapUnits(center) = in_submap(square);
        let size = IVec2::splat(self.config.window_submaps);
        let retained = Extent2i::from_min_and_shape(center.truncate() - size / 2, size);

        let mut success = true;
        let mut regions_written = 0;
        for (region, contents) in regions {
            if let Some(store) = &self.store {
                if !contents.is_empty() {
                    match store.write(region, &contents) {
                        Ok(()) => regions_written += 1,
                        Err(error) => {
                            success = false;
                            self.sink.report(Diagnostic::RegionWriteFailed {
                                region,
                                path: store.region_path(region),
                                error,
                            });
                        }
                    }
                }
            }
            if region_footprint(region).0.intersects(&retained) {
                self.register_region(region, contents);
            }
        }

        self.sink.report(Diagnostic::Saved {
            regions_written,
            submaps_before,
            submaps_after: self.submaps.len(),
        });
        success
    }
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝
