//! Quad-tree tiles over the `u32` world square.
//!
//! At each level every tile splits into four, which takes two bits: one per
//! axis. Levels run from 0 (one tile, the whole world) to `MAX_LEVEL`; at
//! level `L` a tile is `2^(32-L)` units wide and the world is `2^L` tiles
//! across.
//!
//! A level-`L` index is the top `L` bits of each coordinate, `coord >> (32-L)`.
//! Ids computed with a `31-L` shift are not bit-compatible with these: they
//! match our ids one level deeper, and overflow `L` bits at the same level.
//!
//! The level is not encoded in the id. We don't want to play with tricky
//! level encodings, so a `Tile` just stores it next to its `TileId`.

use std::fmt;

use crate::error::{Error, Result};
use crate::geo::{BoundingBox, Point};

/// Deepest level. 15 bits of tile index per axis fit the 16-bit id fields.
pub const MAX_LEVEL: u8 = 15;

/// Grid coordinates of a tile, meaningful only together with a level.
#[derive(Clone, Copy, Debug, Default, Hash, Ord, Eq, PartialEq, PartialOrd)]
pub struct TileId {
    pub x: u16,
    pub y: u16,
}

impl TileId {
    pub fn new(x: u16, y: u16) -> TileId {
        TileId { x: x, y: y }
    }

    /// Packs into one `u32` for transport: `x` in the low 16 bits, `y` in the
    /// high 16 bits.
    pub fn pack(self) -> u32 {
        (self.y as u32) << 16 | self.x as u32
    }

    pub fn unpack(packed: u32) -> TileId {
        TileId {
            x: (packed & 0xffff) as u16,
            y: (packed >> 16) as u16,
        }
    }
}

impl From<u32> for TileId {
    fn from(packed: u32) -> TileId {
        TileId::unpack(packed)
    }
}

impl From<TileId> for u32 {
    fn from(id: TileId) -> u32 {
        id.pack()
    }
}

fn check_level(level: u8) -> Result<()> {
    if level > MAX_LEVEL {
        Err(Error::InvalidLevel(level))
    } else {
        Ok(())
    }
}

/// Number of world units dropped from each axis to get a tile index.
fn axis_shift(level: u8) -> u32 {
    32 - level as u32
}

/// Returns the id of the tile at `level` that contains `point`.
///
/// # Examples
///
/// ```
/// use tessgeo::geo::Point;
/// use tessgeo::tile::{tile_id_by_point, TileId};
///
/// let p = Point(0xc000_0000, 0x4000_0000);
/// assert_eq!(TileId::new(0, 0), tile_id_by_point(p, 0).unwrap());
/// assert_eq!(TileId::new(1, 0), tile_id_by_point(p, 1).unwrap());
/// assert_eq!(TileId::new(3, 1), tile_id_by_point(p, 2).unwrap());
/// ```
pub fn tile_id_by_point(point: Point, level: u8) -> Result<TileId> {
    check_level(level)?;
    let shift = axis_shift(level);
    Ok(TileId {
        x: ((point.0 as u64) >> shift) as u16,
        y: ((point.1 as u64) >> shift) as u16,
    })
}

/// A tile id at a known level.
///
/// Always valid: `level <= MAX_LEVEL` and both id fields are below `2^level`.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub struct Tile {
    id: TileId,
    level: u8,
}

impl Tile {
    pub fn new(id: TileId, level: u8) -> Result<Tile> {
        check_level(level)?;
        let across = 1u32 << level;
        if id.x as u32 >= across || id.y as u32 >= across {
            return Err(Error::TileOutOfRange {
                x: id.x,
                y: id.y,
                level: level,
            });
        }
        Ok(Tile { id: id, level: level })
    }

    /// The single level-0 tile covering the whole world.
    pub fn root() -> Tile {
        Tile {
            id: TileId::default(),
            level: 0,
        }
    }

    /// The tile at `level` containing `point`.
    pub fn containing(point: Point, level: u8) -> Result<Tile> {
        let id = tile_id_by_point(point, level)?;
        Ok(Tile { id: id, level: level })
    }

    pub fn id(&self) -> TileId {
        self.id
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn is_root(&self) -> bool {
        self.level == 0
    }

    /// Side length in world units.
    pub fn size(&self) -> u64 {
        1u64 << axis_shift(self.level)
    }

    pub fn bounding_box(&self) -> BoundingBox {
        let shift = axis_shift(self.level);
        BoundingBox {
            left: ((self.id.x as u64) << shift) as u32,
            top: ((self.id.y as u64) << shift) as u32,
            size: self.size(),
        }
    }

    /// The tile one level up that contains this one.
    pub fn parent(&self) -> Result<Tile> {
        if self.is_root() {
            return Err(Error::RootHasNoParent);
        }
        Ok(Tile {
            id: TileId::new(self.id.x / 2, self.id.y / 2),
            level: self.level - 1,
        })
    }

    /// The four tiles one level down, in order `(2x, 2y)`, `(2x+1, 2y)`,
    /// `(2x, 2y+1)`, `(2x+1, 2y+1)`.
    pub fn children(&self) -> Result<[Tile; 4]> {
        let level = self.level + 1;
        check_level(level)?;
        let x = self.id.x * 2;
        let y = self.id.y * 2;
        let child = |x, y| Tile {
            id: TileId::new(x, y),
            level: level,
        };
        Ok([child(x, y), child(x + 1, y), child(x, y + 1), child(x + 1, y + 1)])
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{}/{}", self.level, self.id.x, self.id.y)
    }
}
