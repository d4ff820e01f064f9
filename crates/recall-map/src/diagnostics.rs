use crate::codec::CodecError;
use crate::tile::OutOfRange;
use crate::units::{RegionUnits, SubmapUnits};

use log::Level;
use recall_core::glam::IVec3;
use std::fmt;
use std::path::PathBuf;

/// Something the operator may want to know about. None of these stop the [`MapMemory`](crate::MapMemory).
#[derive(Debug)]
pub enum Diagnostic {
    /// A region file exists but couldn't be read. The region starts empty instead.
    RegionCorrupt {
        region: RegionUnits<IVec3>,
        path: PathBuf,
        error: CodecError,
    },
    /// A region couldn't be written during a save.
    RegionWriteFailed {
        region: RegionUnits<IVec3>,
        path: PathBuf,
        error: CodecError,
    },
    /// A subtile or rotation was out of range and stored as 0.
    ValueOutOfRange(OutOfRange),
    Loaded {
        center: SubmapUnits<IVec3>,
        submaps: usize,
    },
    Saved {
        regions_written: usize,
        submaps_before: usize,
        submaps_after: usize,
    },
}

impl Diagnostic {
    pub fn level(&self) -> Level {
        match self {
            Diagnostic::RegionCorrupt { .. } | Diagnostic::RegionWriteFailed { .. } => Level::Error,
            Diagnostic::ValueOutOfRange(_) => Level::Warn,
            Diagnostic::Loaded { .. } | Diagnostic::Saved { .. } => Level::Debug,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::RegionCorrupt {
                region,
                path,
                error,
            } => write!(
                f,
                "failed to load memory map region {:?} from {}: {}",
                region.0.to_array(),
                path.display(),
                error
            ),
            Diagnostic::RegionWriteFailed {
                region,
                path,
                error,
            } => write!(
                f,
                "failed to save memory map region {:?} to {}: {}",
                region.0.to_array(),
                path.display(),
                error
            ),
            Diagnostic::ValueOutOfRange(e) => write!(f, "{}", e),
            Diagnostic::Loaded { center, submaps } => write!(
                f,
                "loaded memory map around submap {:?} ({} submaps in memory)",
                center.0.to_array(),
                submaps
            ),
            Diagnostic::Saved {
                regions_written,
                submaps_before,
                submaps_after,
            } => write!(
                f,
                "saved {} memory map regions; {} submaps before, {} after trimming",
                regions_written, submaps_before, submaps_after
            ),
        }
    }
}

/// Receives every [`Diagnostic`] raised by a [`MapMemory`](crate::MapMemory).
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

/// Forwards diagnostics to the [`log`] facade at [`Diagnostic::level`].
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        log::log!(target: "recall::map_memory", diagnostic.level(), "{}", diagnostic);
    }
}

/// Collects diagnostics for later inspection.
impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
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
    use crate::tile::TileField;

    #[test]
    fn levels_by_severity() {
        let corrupt = Diagnostic::RegionCorrupt {
            region: RegionUnits(IVec3::new(1, 2, 3)),
            path: PathBuf::from("1.2.3.mmr"),
            error: CodecError::UnsupportedVersion {
                found: 9,
                expected: 1,
            },
        };
        assert_eq!(corrupt.level(), Level::Error);
        assert_eq!(
            corrupt.to_string(),
            "failed to load memory map region [1, 2, 3] from 1.2.3.mmr: \
             unsupported region format version 9 (expected 1)"
        );

        let clamp = Diagnostic::ValueOutOfRange(OutOfRange {
            field: TileField::TerrainRotation,
            value: 400,
        });
        assert_eq!(clamp.level(), Level::Warn);
        assert_eq!(
            clamp.to_string(),
            "map memory can't store terrain rotation value 400; stored 0 instead"
        );
    }

    #[test]
    fn vec_sink_collects() {
        let mut sink: Vec<Diagnostic> = Vec::new();
        sink.report(Diagnostic::Saved {
            regions_written: 1,
            submaps_before: 64,
            submaps_after: 0,
        });
        assert_eq!(sink.len(), 1);
        assert_eq!(sink[0].level(), Level::Debug);
    }
}
