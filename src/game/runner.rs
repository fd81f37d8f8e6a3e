// Runner (bro) - the avatar a player steers through the level

use glam::Vec2;
use std::collections::HashSet;

use crate::core::color::Color;
use crate::engine::physics::{presets, ColliderHandle, PhysicsWorld, Real, Vector};

use super::entity::RigidEntity;
use super::platform::PlatformId;
use super::player::{Player, PlayerId};

/// Unique identifier for a runner; never reused within a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RunnerId(pub u32);

/// A player-controlled avatar
///
/// Lifecycle: alive, then either frozen (a static checkpoint others can
/// stand on) or dead. A frozen runner can still die later, which does not
/// count against its player.
#[derive(Debug)]
pub struct Runner {
    pub id: RunnerId,
    pub player: PlayerId,
    pub entity: RigidEntity,
    color: Color,

    frozen: bool,
    dead: bool,

    // Input state (updated by input system)
    moving_left: bool,
    moving_right: bool,

    /// Colliders currently below this runner and touching it
    supports: HashSet<ColliderHandle>,
    /// Platform this runner last stood on; the platform holds the tint
    last_platform: Option<PlatformId>,
}

impl Runner {
    pub const MASS: Real = 10.0;
    pub const FRICTION: Real = 0.5;
    pub const SIZE: Real = 32.0;

    /// Upward impulse applied by a jump
    pub const JUMP_IMPULSE: [Real; 2] = [0.0, 2000.0];
    /// Horizontal speed while a move key is held (units/second)
    pub const SPEED: Real = 100.0;
    /// Brightening applied to a runner's colour when it freezes
    pub const FREEZE_FADE: f32 = 0.3;

    /// Create a runner for `player` at (`x`, `y`) and append it to the
    /// player's runners
    pub fn new(id: RunnerId, player: &mut Player, physics: &mut PhysicsWorld, x: f32, y: f32) -> Self {
        let body = presets::runner_body(x, y);
        let collider = presets::runner_collider(Self::SIZE, Self::MASS, Self::FRICTION);
        let mut entity = RigidEntity::spawn(physics, body, collider, Vec2::splat(Self::SIZE));
        entity.sprite.color = player.color.to_rgba(1.0);

        player.runners.push(id);

        Self {
            id,
            player: player.id,
            entity,
            color: player.color,
            frozen: false,
            dead: false,
            moving_left: false,
            moving_right: false,
            supports: HashSet::new(),
            last_platform: None,
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    /// Neither frozen nor dead
    pub fn alive(&self) -> bool {
        !self.dead && !self.frozen
    }

    pub fn moving_left(&self) -> bool {
        self.moving_left
    }

    pub fn moving_right(&self) -> bool {
        self.moving_right
    }

    pub fn move_left(&mut self) {
        self.moving_left = true;
        self.moving_right = false;
    }

    pub fn move_right(&mut self) {
        self.moving_right = true;
        self.moving_left = false;
    }

    pub fn stop_left(&mut self) {
        self.moving_left = false;
    }

    pub fn stop_right(&mut self) {
        self.moving_right = false;
    }

    /// Clear both movement intents
    pub fn stop(&mut self) {
        self.stop_left();
        self.stop_right();
    }

    /// Take over another runner's movement intent
    pub fn copy_intent(&mut self, other: &Runner) {
        self.moving_left = other.moving_left;
        self.moving_right = other.moving_right;
    }

    /// Drive horizontal velocity from intent and record the player's distance
    pub fn update(&mut self, physics: &mut PhysicsWorld, player: &mut Player) {
        if self.dead {
            return;
        }

        if !self.frozen {
            let target_velocity = if self.moving_left {
                -Self::SPEED
            } else if self.moving_right {
                Self::SPEED
            } else {
                0.0
            };

            if let Some(body) = physics.get_rigid_body_mut(self.entity.body_handle()) {
                let mut velocity = *body.linvel();
                velocity.x = target_velocity;
                body.set_linvel(velocity, true);
            }
        }

        player.record_distance(self.position(physics).x);
    }

    /// A runner can jump while anything is supporting it
    pub fn can_jump(&self) -> bool {
        !self.supports.is_empty()
    }

    /// Apply the jump impulse if supported. Returns whether it jumped.
    pub fn jump(&mut self, physics: &mut PhysicsWorld) -> bool {
        if !self.can_jump() {
            return false;
        }

        let Some(body) = physics.get_rigid_body_mut(self.entity.body_handle()) else {
            return false;
        };
        body.apply_impulse(Vector::new(Self::JUMP_IMPULSE[0], Self::JUMP_IMPULSE[1]), true);
        true
    }

    /// Turn into a static checkpoint
    pub fn freeze(&mut self, physics: &mut PhysicsWorld, player: &mut Player) {
        if self.frozen || self.dead {
            return;
        }

        self.frozen = true;
        self.entity.set_static(physics, true);
        player.freezes += 1;
        self.stop();

        self.entity.sprite.color = self.color.fade(Self::FREEZE_FADE).to_rgba(1.0);
    }

    /// Release a frozen runner back into the simulation so it falls
    pub fn drop(&mut self, physics: &mut PhysicsWorld) {
        if self.frozen && !self.dead {
            self.entity.set_static(physics, false);
        }
    }

    /// Remove the runner from play. Only a runner that was not frozen counts
    /// as a death for its player.
    ///
    /// The runner forgets its last platform here; untinting the platform is
    /// up to whoever owns both (see `EntityStore::kill_runner`).
    pub(super) fn die(&mut self, physics: &mut PhysicsWorld, player: &mut Player) {
        if self.dead {
            return;
        }

        self.dead = true;
        if !self.frozen {
            player.deaths += 1;
        }
        self.last_platform = None;
        self.supports.clear();
        self.entity.despawn(physics);
    }

    /// Record `collider` as supporting this runner. Returns false if it
    /// already was.
    pub fn add_support(&mut self, collider: ColliderHandle) -> bool {
        self.supports.insert(collider)
    }

    /// Forget `collider` as a support. Returns false if it was not one.
    pub fn remove_support(&mut self, collider: ColliderHandle) -> bool {
        self.supports.remove(&collider)
    }

    pub fn is_supported_by(&self, collider: ColliderHandle) -> bool {
        self.supports.contains(&collider)
    }

    pub fn support_count(&self) -> usize {
        self.supports.len()
    }

    pub fn last_platform(&self) -> Option<PlatformId> {
        self.last_platform
    }

    /// Swap the last-platform reference, returning the previous one.
    /// Tint bookkeeping lives in `EntityStore::set_last_platform`.
    pub(super) fn replace_last_platform(
        &mut self,
        platform: Option<PlatformId>,
    ) -> Option<PlatformId> {
        std::mem::replace(&mut self.last_platform, platform)
    }

    pub fn position(&self, physics: &PhysicsWorld) -> Vec2 {
        self.entity.position(physics)
    }

    pub fn velocity(&self, physics: &PhysicsWorld) -> Vec2 {
        self.entity.velocity(physics)
    }
}
