// Typed entity store keyed by stable ids, with a collider lookup for collisions

use log::debug;
use std::collections::{BTreeMap, HashMap};

use crate::core::color::Color;
use crate::engine::physics::{ColliderHandle, PhysicsWorld};

use super::platform::{Platform, PlatformId};
use super::player::Player;
use super::runner::{Runner, RunnerId};

/// What a collider belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityRef {
    Runner(RunnerId),
    Platform(PlatformId),
}

/// Owns every live runner and platform of a match
///
/// Runners and platforms refer to each other only by id, so either side can
/// be removed without the other dangling. Ids are handed out in increasing
/// order and never reused.
#[derive(Debug, Default)]
pub struct EntityStore {
    runners: BTreeMap<RunnerId, Runner>,
    platforms: BTreeMap<PlatformId, Platform>,
    colliders: HashMap<ColliderHandle, EntityRef>,
    next_runner: u32,
    next_platform: u32,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn a runner for `player` at (`x`, `y`)
    ///
    /// With a `seed`, the new runner takes over that runner's movement intent
    /// and last platform, which then carries both tints.
    pub fn spawn_runner(
        &mut self,
        physics: &mut PhysicsWorld,
        player: &mut Player,
        x: f32,
        y: f32,
        seed: Option<RunnerId>,
    ) -> RunnerId {
        let id = RunnerId(self.next_runner);
        self.next_runner += 1;

        let mut runner = Runner::new(id, player, physics, x, y);
        let mut inherited = None;
        if let Some(seed) = seed.and_then(|seed| self.runners.get(&seed)) {
            runner.copy_intent(seed);
            inherited = seed.last_platform();
        }

        self.colliders
            .insert(runner.entity.collider_handle(), EntityRef::Runner(id));
        self.runners.insert(id, runner);

        if inherited.is_some() {
            self.set_last_platform(id, inherited);
        }

        debug!("Spawned runner {:?} for player {:?} at ({x}, {y})", id, player.id);
        id
    }

    /// Spawn a static platform at grid cell (`col`, `row`)
    pub fn spawn_platform(
        &mut self,
        physics: &mut PhysicsWorld,
        col: i32,
        row: i32,
        base_color: Color,
    ) -> PlatformId {
        let id = PlatformId(self.next_platform);
        self.next_platform += 1;

        let platform = Platform::new(id, physics, col, row, base_color);
        self.colliders
            .insert(platform.entity.collider_handle(), EntityRef::Platform(id));
        self.platforms.insert(id, platform);
        id
    }

    pub fn runner(&self, id: RunnerId) -> Option<&Runner> {
        self.runners.get(&id)
    }

    pub fn runner_mut(&mut self, id: RunnerId) -> Option<&mut Runner> {
        self.runners.get_mut(&id)
    }

    pub fn platform(&self, id: PlatformId) -> Option<&Platform> {
        self.platforms.get(&id)
    }

    pub fn platform_mut(&mut self, id: PlatformId) -> Option<&mut Platform> {
        self.platforms.get_mut(&id)
    }

    /// Which entity owns `collider`, if it is still live
    pub fn entity_for(&self, collider: ColliderHandle) -> Option<EntityRef> {
        self.colliders.get(&collider).copied()
    }

    /// Live runners in id order
    pub fn runners(&self) -> impl Iterator<Item = &Runner> {
        self.runners.values()
    }

    pub fn runner_ids(&self) -> Vec<RunnerId> {
        self.runners.keys().copied().collect()
    }

    /// Live platforms in id order
    pub fn platforms(&self) -> impl Iterator<Item = &Platform> {
        self.platforms.values()
    }

    pub fn runner_count(&self) -> usize {
        self.runners.len()
    }

    pub fn platform_count(&self) -> usize {
        self.platforms.len()
    }

    /// Point `runner` at `platform`, moving its tint from the old platform to
    /// the new one. Setting the same platform again changes nothing.
    pub fn set_last_platform(&mut self, runner: RunnerId, platform: Option<PlatformId>) {
        let platform = platform.filter(|id| self.platforms.contains_key(id));
        let Some(entry) = self.runners.get_mut(&runner) else {
            return;
        };
        if entry.last_platform() == platform {
            return;
        }

        let color = entry.color();
        let previous = entry.replace_last_platform(platform);

        if let Some(old) = previous.and_then(|id| self.platforms.get_mut(&id)) {
            old.untint(runner);
        }
        if let Some(new) = platform.and_then(|id| self.platforms.get_mut(&id)) {
            new.tint(runner, color);
        }
    }

    /// Kill a runner and prune it from the store
    pub fn kill_runner(&mut self, id: RunnerId, physics: &mut PhysicsWorld, player: &mut Player) {
        self.set_last_platform(id, None);
        let Some(mut runner) = self.runners.remove(&id) else {
            return;
        };
        self.colliders.remove(&runner.entity.collider_handle());
        runner.die(physics, player);
        debug!("Runner {:?} of player {:?} died", id, player.id);
    }

    /// Remove a platform from the world; runners that last stood on it
    /// forget it
    pub fn despawn_platform(&mut self, id: PlatformId, physics: &mut PhysicsWorld) {
        let Some(mut platform) = self.platforms.remove(&id) else {
            return;
        };
        for runner in platform.tinted_by().collect::<Vec<_>>() {
            if let Some(runner) = self.runners.get_mut(&runner) {
                runner.replace_last_platform(None);
            }
        }
        self.colliders.remove(&platform.entity.collider_handle());
        platform.entity.despawn(physics);
    }

    /// The runner input goes to: the player's newest runner, if it is alive
    pub fn active_runner(&self, player: &Player) -> Option<RunnerId> {
        player
            .newest_runner()
            .filter(|id| self.runners.get(id).is_some_and(Runner::alive))
    }

    /// Copy every body transform into its sprite
    pub fn sync_all(&mut self, physics: &PhysicsWorld) {
        for runner in self.runners.values_mut() {
            runner.entity.sync_from_physics(physics);
        }
        for platform in self.platforms.values_mut() {
            platform.entity.sync_from_physics(physics);
        }
    }

    /// Despawn everything
    pub fn clear(&mut self, physics: &mut PhysicsWorld) {
        for runner in self.runners.values_mut() {
            runner.entity.despawn(physics);
        }
        for platform in self.platforms.values_mut() {
            platform.entity.despawn(physics);
        }
        self.runners.clear();
        self.platforms.clear();
        self.colliders.clear();
    }
}
