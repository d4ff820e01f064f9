//! The on-disk format of a [`MemoryRegion`].
//!
//! A region file is an LZ4 frame around an `rkyv` archive. The archive holds a format version followed by one record per
//! submap in row-major order. Each record is either an explicit empty marker or the submap's tiles, run-length encoded
//! because remembered terrain tends to come in long identical stretches.

use crate::coordinates::{REGION_AREA, SUBMAP_AREA};
use crate::region::MemoryRegion;
use crate::submap::MemorySubmap;
use crate::tile::MemorizedTile;

use lz4_flex::frame::{FrameDecoder, FrameEncoder};
use rkyv::ser::{serializers::AllocSerializer, Serializer};
use rkyv::{AlignedVec, Archive, Deserialize, Serialize};
use std::io::{self, Read, Write};

pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    #[error("lz4 frame error: {0}")]
    Compression(#[from] lz4_flex::frame::Error),
    #[error("region archive failed validation: {0}")]
    Archive(String),
    #[error("failed to archive region: {0}")]
    Encode(String),
    #[error("unsupported region format version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },
    #[error("region holds {found} submaps, expected {expected}")]
    RegionShape { found: usize, expected: usize },
    #[error("submap {submap} has runs covering {found} squares, expected {expected}")]
    RunLength {
        submap: usize,
        found: usize,
        expected: usize,
    },
    #[error("submap {submap} holds invalid symbol {value:#x}")]
    InvalidSymbol { submap: usize, value: u32 },
}

#[derive(Archive, Deserialize, Serialize)]
#[archive(check_bytes)]
struct RegionRecord {
    version: u32,
    submaps: Vec<SubmapRecord>,
}

#[derive(Archive, Deserialize, Serialize)]
#[archive(check_bytes)]
enum SubmapRecord {
    Empty,
    Runs(Vec<TileRun>),
}

/// `count` consecutive squares (in submap order) that remember the same tile.
#[derive(Archive, Deserialize, Serialize)]
#[archive(check_bytes)]
struct TileRun {
    count: u16,
    ter_id: String,
    dec_id: String,
    ter_subtile: u8,
    ter_rotation: i8,
    dec_subtile: u8,
    dec_rotation: i8,
    symbol: u32,
}

impl TileRun {
    fn start(tile: &MemorizedTile) -> Self {
        Self {
            count: 1,
            ter_id: tile.ter_id().to_owned(),
            dec_id: tile.dec_id().to_owned(),
            ter_subtile: tile.ter_subtile(),
            ter_rotation: tile.ter_rotation(),
            dec_subtile: tile.dec_subtile(),
            dec_rotation: tile.dec_rotation(),
            symbol: u32::from(tile.symbol()),
        }
    }

    fn continues_with(&self, tile: &MemorizedTile) -> bool {
        self.ter_id == tile.ter_id()
            && self.dec_id == tile.dec_id()
            && self.ter_subtile == tile.ter_subtile()
            && self.ter_rotation == tile.ter_rotation()
            && self.dec_subtile == tile.dec_subtile()
            && self.dec_rotation == tile.dec_rotation()
            && self.symbol == u32::from(tile.symbol())
    }
}

fn encode_submap(submap: &MemorySubmap) -> SubmapRecord {
    if submap.is_empty() {
        return SubmapRecord::Empty;
    }
    let mut runs: Vec<TileRun> = Vec::new();
    for tile in submap.tiles() {
        match runs.last_mut() {
            Some(run) if run.continues_with(tile) => run.count += 1,
            _ => runs.push(TileRun::start(tile)),
        }
    }
    SubmapRecord::Runs(runs)
}

fn decode_submap(index: usize, record: &ArchivedSubmapRecord) -> Result<MemorySubmap, CodecError> {
    let runs = match record {
        ArchivedSubmapRecord::Empty => return Ok(MemorySubmap::new()),
        ArchivedSubmapRecord::Runs(runs) => runs,
    };

    let mut tiles = Vec::with_capacity(SUBMAP_AREA);
    for run in runs.iter() {
        let count = usize::from(u16::from(run.count));
        if count == 0 || tiles.len() + count > SUBMAP_AREA {
            return Err(CodecError::RunLength {
                submap: index,
                found: tiles.len() + count,
                expected: SUBMAP_AREA,
            });
        }
        let raw_symbol = u32::from(run.symbol);
        let symbol = char::from_u32(raw_symbol).ok_or(CodecError::InvalidSymbol {
            submap: index,
            value: raw_symbol,
        })?;
        let tile = MemorizedTile::from_raw_parts(
            run.ter_id.as_str().to_owned(),
            run.dec_id.as_str().to_owned(),
            run.ter_subtile,
            run.ter_rotation,
            run.dec_subtile,
            run.dec_rotation,
            symbol,
        );
        tiles.extend(std::iter::repeat(tile).take(count));
    }
    if tiles.len() != SUBMAP_AREA {
        return Err(CodecError::RunLength {
            submap: index,
            found: tiles.len(),
            expected: SUBMAP_AREA,
        });
    }

    Ok(MemorySubmap::from_tiles(tiles))
}

/// Serializes and compresses `region`.
pub fn encode_region(region: &MemoryRegion) -> Result<Vec<u8>, CodecError> {
    let record = RegionRecord {
        version: FORMAT_VERSION,
        submaps: region.submaps().iter().map(encode_submap).collect(),
    };

    let mut serializer = AllocSerializer::<8192>::default();
    serializer
        .serialize_value(&record)
        .map_err(|e| CodecError::Encode(format!("{:?}", e)))?;
    let archive_bytes = serializer.into_serializer().into_inner();

    let mut encoder = FrameEncoder::new(Vec::new());
    encoder.write_all(&archive_bytes)?;
    Ok(encoder.finish()?)
}

/// Decompresses and validates a region produced by [`encode_region`].
pub fn decode_region(bytes: &[u8]) -> Result<MemoryRegion, CodecError> {
    let mut decompressed = Vec::new();
    FrameDecoder::new(bytes).read_to_end(&mut decompressed)?;

    // The archive must be read from an aligned buffer.
    let mut aligned = AlignedVec::with_capacity(decompressed.len());
    aligned.extend_from_slice(&decompressed);

    let record = rkyv::check_archived_root::<RegionRecord>(&aligned)
        .map_err(|e| CodecError::Archive(e.to_string()))?;

    let version = u32::from(record.version);
    if version != FORMAT_VERSION {
        return Err(CodecError::UnsupportedVersion {
            found: version,
            expected: FORMAT_VERSION,
        });
    }
    if record.submaps.len() != REGION_AREA {
        return Err(CodecError::RegionShape {
            found: record.submaps.len(),
            expected: REGION_AREA,
        });
    }

    let submaps = record
        .submaps
        .iter()
        .enumerate()
        .map(|(i, s)| decode_submap(i, s))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(MemoryRegion::from_submaps(submaps))
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
    use crate::units::{SquareUnits, SubmapUnits};

    use recall_core::glam::IVec2;

    fn tile(ter: &str, dec: &str, rotation: i32, symbol: char) -> MemorizedTile {
        let mut t = MemorizedTile::default();
        t.set_ter_id(ter);
        t.set_dec_id(dec);
        t.set_ter_rotation(rotation).unwrap();
        t.set_ter_subtile(2).unwrap();
        t.set_dec_subtile(1).unwrap();
        t.set_dec_rotation(-rotation).unwrap();
        t.set_symbol(symbol);
        t
    }

    fn partially_written_region() -> MemoryRegion {
        let mut region = MemoryRegion::new();
        let a = region.submap_mut(SubmapUnits(IVec2::new(0, 0)));
        for x in 0..12 {
            a.set_tile(SquareUnits(IVec2::new(x, 0)), tile("t_dirt", "", 0, '.'));
        }
        a.set_tile(SquareUnits(IVec2::new(5, 5)), tile("t_wall", "f_sign", 90, '#'));

        let b = region.submap_mut(SubmapUnits(IVec2::new(6, 3)));
        b.set_tile(SquareUnits(IVec2::new(11, 11)), tile("t_water", "", -90, '≈'));
        region
    }

    #[test]
    fn round_trip_preserves_every_tile() {
        let region = partially_written_region();
        let bytes = encode_region(&region).unwrap();
        let decoded = decode_region(&bytes).unwrap();

        assert_eq!(decoded, region);
        for (original, copy) in region.submaps().iter().zip(decoded.submaps()) {
            assert_eq!(original.is_empty(), copy.is_empty());
            for y in 0..12 {
                for x in 0..12 {
                    let p = SquareUnits(IVec2::new(x, y));
                    assert_eq!(original.get_tile(p), copy.get_tile(p));
                }
            }
        }
    }

    #[test]
    fn empty_region_round_trips_empty() {
        let region = MemoryRegion::new();
        let decoded = decode_region(&encode_region(&region).unwrap()).unwrap();
        assert!(decoded.is_empty());
    }

    #[test]
    fn runs_collapse_identical_tiles() {
        let mut submap = MemorySubmap::new();
        submap.set_tile(SquareUnits(IVec2::new(3, 0)), tile("t_grass", "", 0, ','));
        match encode_submap(&submap) {
            SubmapRecord::Runs(runs) => {
                let counts: Vec<_> = runs.iter().map(|r| r.count).collect();
                assert_eq!(counts, vec![3, 1, (SUBMAP_AREA - 4) as u16]);
            }
            SubmapRecord::Empty => panic!("written submap encoded as empty"),
        }
    }

    #[test]
    fn garbage_is_an_error() {
        assert!(decode_region(b"definitely not a region").is_err());

        let mut bytes = encode_region(&partially_written_region()).unwrap();
        let len = bytes.len();
        bytes.truncate(len / 2);
        assert!(decode_region(&bytes).is_err());
    }

    #[test]
    fn wrong_version_is_rejected() {
        let record = RegionRecord {
            version: FORMAT_VERSION + 1,
            submaps: Vec::new(),
        };
        let mut serializer = AllocSerializer::<256>::default();
        serializer.serialize_value(&record).unwrap();
        let archive_bytes = serializer.into_serializer().into_inner();
        let mut encoder = FrameEncoder::new(Vec::new());
        encoder.write_all(&archive_bytes).unwrap();
        let bytes = encoder.finish().unwrap();

        assert!(matches!(
            decode_region(&bytes),
            Err(CodecError::UnsupportedVersion { .. })
        ));
    }
}
