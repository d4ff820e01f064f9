use crate::codec::{decode_region, encode_region, CodecError};
use crate::region::MemoryRegion;
use crate::units::RegionUnits;

use recall_core::glam::IVec3;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Extension of the per-player directory that holds region files.
pub const MEMORY_DIR_EXTENSION: &str = "mm1";
/// Extension of a single region file.
pub const REGION_FILE_EXTENSION: &str = "mmr";

/// A directory of region files, one per [`MemoryRegion`], named `<x>.<y>.<z>.mmr`.
///
/// Every file handle is opened and closed within a single [`read`](Self::read) or [`write`](Self::write).
#[derive(Clone, Debug)]
pub struct RegionDir {
    dir: PathBuf,
}

impl RegionDir {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The memory directory of `player` inside the save directory `save_dir`: `<save_dir>/<player>.mm1/`.
    pub fn for_player(save_dir: impl AsRef<Path>, player: &str) -> Self {
        Self::new(
            save_dir
                .as_ref()
                .join(format!("{}.{}", player, MEMORY_DIR_EXTENSION)),
        )
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn region_path(&self, region: RegionUnits<IVec3>) -> PathBuf {
        let RegionUnits(r) = region;
        self.dir.join(format!(
            "{}.{}.{}.{}",
            r.x, r.y, r.z, REGION_FILE_EXTENSION
        ))
    }

    /// Reads the region at `region`. A region that was never written is `Ok(None)`; an unreadable or malformed file is an
    /// error.
    pub fn read(&self, region: RegionUnits<IVec3>) -> Result<Option<MemoryRegion>, CodecError> {
        let bytes = match fs::read(self.region_path(region)) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        decode_region(&bytes).map(Some)
    }

    /// Writes `contents` as the region at `region`, replacing any previous file.
    ///
    /// The bytes go to a temporary sibling first, so a failed write leaves the old file intact.
    pub fn write(
        &self,
        region: RegionUnits<IVec3>,
        contents: &MemoryRegion,
    ) -> Result<(), CodecError> {
        let bytes = encode_region(contents)?;
        fs::create_dir_all(&self.dir)?;
        let path = self.region_path(region);
        let tmp_path = path.with_extension(format!("{}.tmp", REGION_FILE_EXTENSION));
        fs::write(&tmp_path, &bytes)?;
        fs::rename(&tmp_path, &path)?;
        Ok(())
    }

    /// Coordinates of every region file in the directory. Files that don't parse as region names are skipped.
    pub fn list_regions(&self) -> io::Result<Vec<RegionUnits<IVec3>>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e),
        };

        let mut regions = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(REGION_FILE_EXTENSION) {
                continue;
            }
            if let Some(region) = path
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(parse_region_stem)
            {
                regions.push(region);
            }
        }
        Ok(regions)
    }
}

fn parse_region_stem(stem: &str) -> Option<RegionUnits<IVec3>> {
    let mut parts = stem.split('.').map(str::parse::<i32>);
    let x = parts.next()?.ok()?;
    let y = parts.next()?.ok()?;
    let z = parts.next()?.ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(RegionUnits(IVec3::new(x, y, z)))
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝
