// Physics-backed renderable shared by runners and platforms

use glam::Vec2;
use log::warn;

use crate::engine::physics::{
    Collider, ColliderHandle, PhysicsWorld, RigidBody, RigidBodyHandle, RigidBodyType, Vector,
};
use crate::engine::renderer::Sprite;

/// A sprite with one rigid body and one collider in the shared space
///
/// `is_static` mirrors the body type: static bodies are `Fixed` (infinite
/// mass and inertia, not integrated) but keep their collider for contacts.
/// [`RigidEntity::set_static`] is the only place that switches between the
/// two.
#[derive(Debug)]
pub struct RigidEntity {
    body_handle: RigidBodyHandle,
    collider_handle: ColliderHandle,
    is_static: bool,
    in_space: bool,
    /// Render state, refreshed from the body after every physics step
    pub sprite: Sprite,
}

impl RigidEntity {
    /// Add `body` and `collider` to the world and wrap them
    pub fn spawn(
        physics: &mut PhysicsWorld,
        body: RigidBody,
        collider: Collider,
        size: Vec2,
    ) -> Self {
        let is_static = body.body_type() == RigidBodyType::Fixed;
        let translation = *body.translation();
        let rotation = body.rotation().angle();

        let body_handle = physics.add_rigid_body(body);
        let collider_handle = physics.add_collider(collider, body_handle);

        let mut sprite = Sprite::new(Vec2::new(translation.x, translation.y), size);
        sprite.rotation = rotation;

        Self {
            body_handle,
            collider_handle,
            is_static,
            in_space: true,
            sprite,
        }
    }

    pub fn body_handle(&self) -> RigidBodyHandle {
        self.body_handle
    }

    pub fn collider_handle(&self) -> ColliderHandle {
        self.collider_handle
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    /// Whether the body is still part of the simulation
    pub fn in_space(&self) -> bool {
        self.in_space
    }

    /// Switch between a fixed body and a dynamic one
    ///
    /// Becoming static zeroes both velocities first. Becoming dynamic restores
    /// the mass and inertia the collider was built with and wakes the body.
    pub fn set_static(&mut self, physics: &mut PhysicsWorld, is_static: bool) {
        if self.is_static == is_static {
            return;
        }
        self.is_static = is_static;

        let Some(body) = physics.get_rigid_body_mut(self.body_handle) else {
            return;
        };

        if is_static {
            body.set_linvel(Vector::zeros(), false);
            body.set_angvel(0.0, false);
            body.set_body_type(RigidBodyType::Fixed, false);
        } else {
            body.set_body_type(RigidBodyType::Dynamic, true);
        }
    }

    /// Copy the body's position and rotation into the sprite
    pub fn sync_from_physics(&mut self, physics: &PhysicsWorld) {
        if let Some(body) = physics.get_rigid_body(self.body_handle) {
            let translation = body.translation();
            self.sprite.position = Vec2::new(translation.x, translation.y);
            self.sprite.rotation = body.rotation().angle();
        }
    }

    /// Remove the body and its collider from the world
    pub fn despawn(&mut self, physics: &mut PhysicsWorld) {
        if !self.in_space {
            warn!("Entity {:?} despawned twice", self.body_handle);
            return;
        }
        self.in_space = false;
        physics.remove_rigid_body(self.body_handle);
    }

    /// Current body position, falling back to the last synced sprite position
    pub fn position(&self, physics: &PhysicsWorld) -> Vec2 {
        physics
            .get_rigid_body(self.body_handle)
            .map(|body| Vec2::new(body.translation().x, body.translation().y))
            .unwrap_or(self.sprite.position)
    }

    /// Current linear velocity, zero once despawned
    pub fn velocity(&self, physics: &PhysicsWorld) -> Vec2 {
        physics
            .get_rigid_body(self.body_handle)
            .map(|body| Vec2::new(body.linvel().x, body.linvel().y))
            .unwrap_or(Vec2::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::physics::presets;

    fn spawn_box(physics: &mut PhysicsWorld, is_static: bool) -> RigidEntity {
        let body = if is_static {
            presets::platform_body(0.0, 50.0)
        } else {
            presets::runner_body(0.0, 50.0)
        };
        let collider = presets::platform_collider(32.0, 20.0, 0.5);
        RigidEntity::spawn(physics, body, collider, Vec2::splat(32.0))
    }

    #[test]
    fn test_spawn_reads_body_type() {
        let mut physics = PhysicsWorld::new();
        assert!(spawn_box(&mut physics, true).is_static());
        assert!(!spawn_box(&mut physics, false).is_static());
        assert_eq!(physics.body_count(), 2);
        assert_eq!(physics.collider_count(), 2);
    }

    #[test]
    fn test_set_static_freezes_body() {
        let mut physics = PhysicsWorld::new();
        let mut entity = spawn_box(&mut physics, false);
        for _ in 0..5 {
            physics.step(PhysicsWorld::DEFAULT_TIMESTEP);
        }
        assert!(entity.velocity(&physics).y < 0.0);

        entity.set_static(&mut physics, true);
        assert!(entity.is_static());
        assert_eq!(entity.velocity(&physics), Vec2::ZERO);

        let before = entity.position(&physics);
        for _ in 0..5 {
            physics.step(PhysicsWorld::DEFAULT_TIMESTEP);
        }
        assert_eq!(entity.position(&physics), before);
        // The collider stays in the world
        assert!(physics.get_collider(entity.collider_handle()).is_some());
    }

    #[test]
    fn test_set_dynamic_falls_again() {
        let mut physics = PhysicsWorld::new();
        let mut entity = spawn_box(&mut physics, true);
        entity.set_static(&mut physics, false);
        assert!(!entity.is_static());

        for _ in 0..5 {
            physics.step(PhysicsWorld::DEFAULT_TIMESTEP);
        }
        assert!(entity.position(&physics).y < 50.0);
    }

    #[test]
    fn test_sync_copies_transform() {
        let mut physics = PhysicsWorld::new();
        let mut entity = spawn_box(&mut physics, false);
        for _ in 0..5 {
            physics.step(PhysicsWorld::DEFAULT_TIMESTEP);
        }
        entity.sync_from_physics(&physics);
        assert_eq!(entity.sprite.position, entity.position(&physics));
    }

    #[test]
    fn test_despawn_removes_body_and_collider() {
        let mut physics = PhysicsWorld::new();
        let mut entity = spawn_box(&mut physics, false);
        entity.despawn(&mut physics);

        assert!(!entity.in_space());
        assert_eq!(physics.body_count(), 0);
        assert_eq!(physics.collider_count(), 0);
    }
}
