// Level chunks - hand-authored occupancy grids stamped into the world

use super::entities::EntityStore;
use super::error::GameError;
use super::platform::PlatformId;

/// A fixed occupancy grid, top row first; 1 marks a platform cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkPattern {
    pub rows: &'static [&'static [u8]],
}

impl ChunkPattern {
    /// Width in cells
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, |row| row.len())
    }

    /// Height in cells
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Occupied cells as (column, row counted up from the bottom)
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let top = self.height().saturating_sub(1);
        self.rows.iter().enumerate().flat_map(move |(y, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, cell)| **cell != 0)
                .map(move |(x, _)| (x, top - y))
        })
    }

    /// Reject ragged or empty grids; `index` names the pattern in errors
    pub fn validate(&self, index: usize) -> Result<(), GameError> {
        let expected = self.width();
        for (row, cells) in self.rows.iter().enumerate() {
            if cells.len() != expected {
                return Err(GameError::RaggedPattern {
                    pattern: index,
                    row,
                    len: cells.len(),
                    expected,
                });
            }
        }
        if self.cells().next().is_none() {
            return Err(GameError::EmptyPattern(index));
        }
        Ok(())
    }
}

/// The patterns the level is built from
pub const CATALOG: &[ChunkPattern] = &[
    ChunkPattern {
        rows: &[
            &[0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0],
            &[0, 0, 1, 1, 1, 0, 0, 0, 0, 0, 0],
            &[1, 1, 1, 1, 1, 0, 0, 0, 0, 1, 1],
        ],
    },
    ChunkPattern {
        rows: &[
            &[0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
            &[0, 0, 0, 0, 0, 0, 0, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
            &[0, 0, 0, 0, 0, 0, 1, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
            &[0, 0, 0, 0, 0, 1, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
            &[1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1],
        ],
    },
    ChunkPattern {
        rows: &[
            &[0, 0, 0, 0, 0, 1, 0, 0, 0],
            &[0, 0, 0, 0, 0, 1, 0, 0, 0],
            &[0, 0, 0, 0, 0, 1, 0, 0, 0],
            &[0, 0, 0, 0, 0, 1, 0, 0, 0],
            &[1, 1, 1, 1, 1, 1, 0, 1, 1],
        ],
    },
    ChunkPattern {
        rows: &[
            &[0, 0, 0, 0, 0, 1, 1, 1, 0],
            &[0, 0, 0, 0, 0, 1, 1, 1, 0],
            &[0, 0, 0, 0, 0, 1, 1, 1, 1],
            &[0, 0, 0, 0, 0, 1, 1, 1, 1],
            &[0, 0, 0, 0, 0, 1, 1, 1, 1],
            &[0, 0, 0, 0, 0, 0, 0, 1, 1],
            &[0, 0, 0, 0, 0, 1, 0, 1, 1],
            &[0, 0, 0, 0, 0, 1, 0, 1, 1],
            &[0, 0, 0, 0, 0, 1, 0, 1, 1],
            &[0, 0, 0, 0, 0, 1, 0, 0, 0],
            &[1, 1, 1, 1, 1, 1, 0, 1, 1],
        ],
    },
];

/// One stamped pattern in the level
#[derive(Debug, Clone)]
pub struct LevelChunk {
    /// Column of the chunk's left edge, in cells
    pub offset: i32,
    /// Width in cells
    pub width: i32,
    /// Platforms this chunk still owns
    pub platforms: Vec<PlatformId>,
    /// Reserved for checkpoint tracking; nothing sets it yet
    pub completed: bool,
}

impl LevelChunk {
    pub fn new(offset: i32, width: i32, platforms: Vec<PlatformId>) -> Self {
        Self {
            offset,
            width,
            platforms,
            completed: false,
        }
    }

    /// Platforms still fixed in place
    pub fn active_platforms<'a>(
        &'a self,
        store: &'a EntityStore,
    ) -> impl Iterator<Item = PlatformId> + 'a {
        self.platforms
            .iter()
            .copied()
            .filter(|id| store.platform(*id).is_some_and(|p| p.is_static()))
    }

    pub fn has_static(&self, store: &EntityStore) -> bool {
        self.active_platforms(store).next().is_some()
    }
}
