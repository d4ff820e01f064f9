use std::fmt;

/// What the player remembers about a single map square.
///
/// The default value means "never observed."
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct MemorizedTile {
    ter_id: String,
    dec_id: String,
    ter_subtile: u8,
    ter_rotation: i8,
    dec_subtile: u8,
    dec_rotation: i8,
    symbol: char,
}

/// Which subfield of a [`MemorizedTile`] rejected a value.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TileField {
    TerrainSubtile,
    TerrainRotation,
    DecorationSubtile,
    DecorationRotation,
}

impl fmt::Display for TileField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TileField::TerrainSubtile => "terrain subtile",
            TileField::TerrainRotation => "terrain rotation",
            TileField::DecorationSubtile => "decoration subtile",
            TileField::DecorationRotation => "decoration rotation",
        };
        f.write_str(name)
    }
}

/// A subtile or rotation that doesn't fit its storage. The field was set to 0 instead.
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
#[error("map memory can't store {field} value {value}; stored 0 instead")]
pub struct OutOfRange {
    pub field: TileField,
    pub value: i32,
}

fn store<T: TryFrom<i32> + Default>(
    slot: &mut T,
    field: TileField,
    value: i32,
) -> Result<(), OutOfRange> {
    match T::try_from(value) {
        Ok(v) => {
            *slot = v;
            Ok(())
        }
        Err(_) => {
            *slot = T::default();
            Err(OutOfRange { field, value })
        }
    }
}

impl MemorizedTile {
    pub const EMPTY: Self = Self {
        ter_id: String::new(),
        dec_id: String::new(),
        ter_subtile: 0,
        ter_rotation: 0,
        dec_subtile: 0,
        dec_rotation: 0,
        symbol: '\0',
    };

    pub fn is_empty(&self) -> bool {
        *self == Self::EMPTY
    }

    pub fn ter_id(&self) -> &str {
        &self.ter_id
    }

    pub fn dec_id(&self) -> &str {
        &self.dec_id
    }

    pub fn ter_subtile(&self) -> u8 {
        self.ter_subtile
    }

    pub fn ter_rotation(&self) -> i8 {
        self.ter_rotation
    }

    pub fn dec_subtile(&self) -> u8 {
        self.dec_subtile
    }

    pub fn dec_rotation(&self) -> i8 {
        self.dec_rotation
    }

    /// `'\0'` if no symbol is remembered.
    pub fn symbol(&self) -> char {
        self.symbol
    }

    pub fn set_ter_id(&mut self, id: &str) {
        self.ter_id.clear();
        self.ter_id.push_str(id);
    }

    pub fn set_dec_id(&mut self, id: &str) {
        self.dec_id.clear();
        self.dec_id.push_str(id);
    }

    pub fn set_ter_subtile(&mut self, subtile: i32) -> Result<(), OutOfRange> {
        store(&mut self.ter_subtile, TileField::TerrainSubtile, subtile)
    }

    pub fn set_ter_rotation(&mut self, rotation: i32) -> Result<(), OutOfRange> {
        store(&mut self.ter_rotation, TileField::TerrainRotation, rotation)
    }

    pub fn set_dec_subtile(&mut self, subtile: i32) -> Result<(), OutOfRange> {
        store(&mut self.dec_subtile, TileField::DecorationSubtile, subtile)
    }

    pub fn set_dec_rotation(&mut self, rotation: i32) -> Result<(), OutOfRange> {
        store(&mut self.dec_rotation, TileField::DecorationRotation, rotation)
    }

    pub fn set_symbol(&mut self, symbol: char) {
        self.symbol = symbol;
    }

    pub fn clear_decoration(&mut self) {
        self.dec_id.clear();
        self.dec_subtile = 0;
        self.dec_rotation = 0;
    }

    /// Builds a tile from already-validated stored fields.
    pub(crate) fn from_raw_parts(
        ter_id: String,
        dec_id: String,
        ter_subtile: u8,
        ter_rotation: i8,
        dec_subtile: u8,
        dec_rotation: i8,
        symbol: char,
    ) -> Self {
        Self {
            ter_id,
            dec_id,
            ter_subtile,
            ter_rotation,
            dec_subtile,
            dec_rotation,
            symbol,
        }
    }
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝
