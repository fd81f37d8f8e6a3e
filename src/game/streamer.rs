// Level streaming - chunks are pushed ahead of the camera and retired behind it

use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::VecDeque;

use crate::engine::physics::PhysicsWorld;

use super::chunk::{ChunkPattern, LevelChunk};
use super::entities::EntityStore;
use super::error::GameError;
use super::platform::Platform;

/// Queue of live chunks, oldest (leftmost) first
///
/// `world_distance` counts every cell ever pushed, so the next chunk always
/// starts where the last one ended.
#[derive(Debug)]
pub struct LevelStreamer {
    catalog: &'static [ChunkPattern],
    chunks: VecDeque<LevelChunk>,
    world_distance: i32,
}

impl LevelStreamer {
    /// Create an empty streamer over `catalog`, checking every pattern
    pub fn new(catalog: &'static [ChunkPattern]) -> Result<Self, GameError> {
        if catalog.is_empty() {
            return Err(GameError::EmptyCatalog);
        }
        for (index, pattern) in catalog.iter().enumerate() {
            pattern.validate(index)?;
        }

        Ok(Self {
            catalog,
            chunks: VecDeque::new(),
            world_distance: 0,
        })
    }

    /// Cells pushed so far
    pub fn world_distance(&self) -> i32 {
        self.world_distance
    }

    /// World x where generated terrain ends
    pub fn world_edge(&self) -> f32 {
        self.world_distance as f32 * Platform::SIZE
    }

    pub fn chunks(&self) -> &VecDeque<LevelChunk> {
        &self.chunks
    }

    /// Stamp a random pattern at the end of the level
    pub fn push_chunk<R: Rng + ?Sized>(
        &mut self,
        physics: &mut PhysicsWorld,
        store: &mut EntityStore,
        rng: &mut R,
    ) {
        let Some(pattern) = self.catalog.choose(rng) else {
            return;
        };

        let offset = self.world_distance;
        let platforms = pattern
            .cells()
            .map(|(col, row)| {
                let color = Platform::random_base_color(rng);
                store.spawn_platform(physics, offset + col as i32, row as i32, color)
            })
            .collect::<Vec<_>>();
        let width = pattern.width() as i32;

        debug!(
            "Pushed chunk at cell {} ({} cells wide, {} platforms)",
            offset,
            width,
            platforms.len()
        );
        self.chunks.push_back(LevelChunk::new(offset, width, platforms));
        self.world_distance += width;
    }

    /// Remove the oldest chunk and every platform it still owns
    pub fn pop_chunk(&mut self, physics: &mut PhysicsWorld, store: &mut EntityStore) {
        let Some(chunk) = self.chunks.pop_front() else {
            return;
        };
        for platform in &chunk.platforms {
            store.despawn_platform(*platform, physics);
        }
        debug!("Popped chunk at cell {}", chunk.offset);
    }

    /// Push chunks until terrain reaches past `camera_right + padding`
    pub fn populate<R: Rng + ?Sized>(
        &mut self,
        camera_right: f32,
        padding: f32,
        physics: &mut PhysicsWorld,
        store: &mut EntityStore,
        rng: &mut R,
    ) {
        while self.world_edge() <= camera_right + padding {
            self.push_chunk(physics, store, rng);
        }
    }

    /// Clean up the front chunk
    ///
    /// Its platforms below `death_y` are despawned, static ones behind
    /// `drop_line` are knocked loose. Once it has no static platforms left it
    /// is popped. The queue is refilled right away if that empties it.
    pub fn retire<R: Rng + ?Sized>(
        &mut self,
        drop_line: f32,
        death_y: f32,
        physics: &mut PhysicsWorld,
        store: &mut EntityStore,
        rng: &mut R,
    ) {
        let Some(front) = self.chunks.front_mut() else {
            self.push_chunk(physics, store, rng);
            return;
        };

        front.platforms.retain(|id| {
            let Some(platform) = store.platform_mut(*id) else {
                return false;
            };
            let position = platform.position(physics);
            if position.y < death_y {
                store.despawn_platform(*id, physics);
                return false;
            }
            if position.x < drop_line {
                platform.drop(physics, rng);
            }
            true
        });

        while self
            .chunks
            .front()
            .is_some_and(|chunk| !chunk.has_static(store))
        {
            self.pop_chunk(physics, store);
            if self.chunks.is_empty() {
                self.push_chunk(physics, store, rng);
            }
        }
    }

    /// Despawn every chunk and start the level over
    pub fn clear(&mut self, physics: &mut PhysicsWorld, store: &mut EntityStore) {
        while !self.chunks.is_empty() {
            self.pop_chunk(physics, store);
        }
        self.world_distance = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::chunk::CATALOG;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn setup() -> (PhysicsWorld, EntityStore, LevelStreamer, StdRng) {
        let streamer = LevelStreamer::new(CATALOG).expect("catalog is valid");
        (
            PhysicsWorld::new(),
            EntityStore::new(),
            streamer,
            StdRng::seed_from_u64(42),
        )
    }

    static SINGLE: &[ChunkPattern] = &[ChunkPattern {
        rows: &[&[1, 0, 1]],
    }];

    #[test]
    fn test_new_rejects_bad_catalogs() {
        assert_eq!(LevelStreamer::new(&[]).err(), Some(GameError::EmptyCatalog));

        static RAGGED: &[ChunkPattern] = &[ChunkPattern {
            rows: &[&[1, 1], &[1]],
        }];
        assert!(matches!(
            LevelStreamer::new(RAGGED),
            Err(GameError::RaggedPattern { .. })
        ));
    }

    #[test]
    fn test_push_chunk_advances_distance() {
        let (mut physics, mut store, mut streamer, mut rng) = setup();
        streamer.push_chunk(&mut physics, &mut store, &mut rng);
        streamer.push_chunk(&mut physics, &mut store, &mut rng);

        let chunks = streamer.chunks();
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].offset, 0);
        assert_eq!(chunks[1].offset, chunks[0].width);
        assert_eq!(streamer.world_distance(), chunks[0].width + chunks[1].width);

        let owned: usize = chunks.iter().map(|c| c.platforms.len()).sum();
        assert_eq!(owned, store.platform_count());
    }

    #[test]
    fn test_platforms_land_on_pattern_cells() {
        let mut physics = PhysicsWorld::new();
        let mut store = EntityStore::new();
        let mut rng = StdRng::seed_from_u64(0);
        let mut streamer = LevelStreamer::new(SINGLE).expect("catalog is valid");

        streamer.push_chunk(&mut physics, &mut store, &mut rng);
        streamer.push_chunk(&mut physics, &mut store, &mut rng);

        let xs: Vec<_> = store.platforms().map(|p| p.position(&physics).x).collect();
        assert_eq!(xs, vec![0.0, 64.0, 96.0, 160.0]);
        assert!(store.platforms().all(|p| p.position(&physics).y == 0.0));
    }

    #[test]
    fn test_pop_chunk_despawns_platforms() {
        let (mut physics, mut store, mut streamer, mut rng) = setup();
        streamer.push_chunk(&mut physics, &mut store, &mut rng);
        let distance = streamer.world_distance();

        streamer.pop_chunk(&mut physics, &mut store);
        assert!(streamer.chunks().is_empty());
        assert_eq!(store.platform_count(), 0);
        assert_eq!(physics.body_count(), 0);
        assert_eq!(streamer.world_distance(), distance);
    }

    #[test]
    fn test_populate_keeps_terrain_ahead_of_camera() {
        let (mut physics, mut store, mut streamer, mut rng) = setup();
        streamer.push_chunk(&mut physics, &mut store, &mut rng);

        let padding = 50.0;
        let mut camera_right = 700.0;
        for _ in 0..200 {
            camera_right += 37.5;
            streamer.populate(camera_right, padding, &mut physics, &mut store, &mut rng);
            assert!(streamer.world_edge() > camera_right + padding);
        }
    }

    #[test]
    fn test_retire_drops_platforms_behind_line() {
        let mut physics = PhysicsWorld::new();
        let mut store = EntityStore::new();
        let mut rng = StdRng::seed_from_u64(0);
        let mut streamer = LevelStreamer::new(SINGLE).expect("catalog is valid");
        streamer.push_chunk(&mut physics, &mut store, &mut rng);

        // Only the cell at x = 0 is behind the line
        streamer.retire(32.0, -80.0, &mut physics, &mut store, &mut rng);
        let statics: Vec<_> = store.platforms().map(Platform::is_static).collect();
        assert_eq!(statics, vec![false, true]);
        assert_eq!(streamer.chunks().len(), 1);
    }

    #[test]
    fn test_retire_removes_fallen_platforms() {
        let mut physics = PhysicsWorld::new();
        let mut store = EntityStore::new();
        let mut rng = StdRng::seed_from_u64(0);
        let mut streamer = LevelStreamer::new(SINGLE).expect("catalog is valid");
        streamer.push_chunk(&mut physics, &mut store, &mut rng);

        streamer.retire(32.0, -80.0, &mut physics, &mut store, &mut rng);
        for _ in 0..200 {
            physics.step(PhysicsWorld::DEFAULT_TIMESTEP);
        }
        streamer.retire(32.0, -80.0, &mut physics, &mut store, &mut rng);

        assert_eq!(store.platform_count(), 1);
        assert_eq!(streamer.chunks()[0].platforms.len(), 1);
    }

    #[test]
    fn test_retire_never_leaves_queue_empty() {
        let (mut physics, mut store, mut streamer, mut rng) = setup();
        streamer.push_chunk(&mut physics, &mut store, &mut rng);

        let mut drop_line = -150.0;
        for _ in 0..100 {
            drop_line += 64.0;
            streamer.retire(drop_line, -80.0, &mut physics, &mut store, &mut rng);
            for _ in 0..10 {
                physics.step(PhysicsWorld::DEFAULT_TIMESTEP);
            }
            assert!(!streamer.chunks().is_empty());
            assert!(streamer.chunks().iter().all(|c| c.has_static(&store)));
        }
    }

    #[test]
    fn test_clear_resets_distance() {
        let (mut physics, mut store, mut streamer, mut rng) = setup();
        streamer.populate(700.0, 50.0, &mut physics, &mut store, &mut rng);
        streamer.clear(&mut physics, &mut store);

        assert_eq!(streamer.world_distance(), 0);
        assert_eq!(store.platform_count(), 0);
    }
}
