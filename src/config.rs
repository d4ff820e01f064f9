use recall_map::{MapMemory, MemoryConfig, RegionDir};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings for one player's session, usually read from a RON file.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Config {
    /// Directory of the save game. Map memory goes in a subdirectory named after the player.
    pub save_dir: PathBuf,
    pub player: String,
    #[serde(default)]
    pub memory: MemoryConfig,
}

impl Config {
    pub fn read_file(path: impl AsRef<Path>) -> Result<Self, ron::Error> {
        let reader = std::fs::File::open(path)?;

        ron::de::from_reader(reader)
    }

    pub fn region_dir(&self) -> RegionDir {
        RegionDir::for_player(&self.save_dir, &self.player)
    }

    /// An empty [`MapMemory`] backed by this player's region directory. Call [`MapMemory::load`] to start the session.
    pub fn open_memory(&self) -> MapMemory {
        log::info!(
            "opening map memory for {} in {}",
            self.player,
            self.region_dir().dir().display()
        );
        MapMemory::new(self.memory, self.region_dir())
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
    use recall_map::{glam::IVec3, SquareUnits, MM_SIZE};

    use std::io::Write;
    use tempfile::{tempdir, NamedTempFile};

    #[test]
    fn read_ron_with_default_memory() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"(save_dir: "/saves/Wintergreen", player: "Ada")"#).unwrap();

        let config = Config::read_file(file.path()).unwrap();
        assert_eq!(config.save_dir, PathBuf::from("/saves/Wintergreen"));
        assert_eq!(config.player, "Ada");
        assert_eq!(config.memory, MemoryConfig::default());
        assert_eq!(config.memory.window_submaps, MM_SIZE);
        assert_eq!(
            config.region_dir().dir(),
            Path::new("/saves/Wintergreen/Ada.mm1")
        );
    }

    #[test]
    fn read_ron_with_memory_overrides() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"(
                save_dir: "saves/x",
                player: "Bo",
                memory: (vertical_fov: 1, max_z: 3),
            )"#
        )
        .unwrap();

        let config = Config::read_file(file.path()).unwrap();
        assert_eq!(config.memory.vertical_fov, 1);
        assert_eq!(config.memory.max_z, 3);
        assert_eq!(config.memory.min_z, -10);
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempdir().unwrap();
        assert!(Config::read_file(dir.path().join("nope.ron")).is_err());
    }

    #[test]
    fn open_memory_persists_under_save_dir() {
        let dir = tempdir().unwrap();
        let config = Config {
            save_dir: dir.path().to_owned(),
            player: "Cy".to_owned(),
            memory: MemoryConfig {
                vertical_fov: 0,
                ..Default::default()
            },
        };
        let p = SquareUnits(IVec3::new(7, -7, 0));

        let mut memory = config.open_memory();
        memory.load(p);
        memory.set_tile_symbol(p, '>');
        assert!(memory.save(p));
        assert_eq!(config.region_dir().list_regions().unwrap().len(), 1);

        let mut reopened = config.open_memory();
        reopened.load(p);
        assert_eq!(reopened.get_tile(p).symbol(), '>');
    }
}
