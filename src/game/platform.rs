// Platform (tile) - one grid cell of level terrain

use glam::Vec2;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeMap;

use crate::core::color::{Color, WHITE};
use crate::core::math::cell_to_world;
use crate::engine::physics::{presets, PhysicsWorld, Point, Real, Vector};

use super::entity::RigidEntity;
use super::runner::RunnerId;

/// Unique identifier for a platform; never reused within a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlatformId(pub u32);

/// One cell of terrain
///
/// Platforms start static. Runners that currently treat a platform as their
/// last support tint it with their colour.
#[derive(Debug)]
pub struct Platform {
    pub id: PlatformId,
    pub entity: RigidEntity,
    base_color: Color,
    /// Runners tinting this platform, with the colour each contributes
    tints: BTreeMap<RunnerId, Color>,
}

impl Platform {
    pub const MASS: Real = 20.0;
    pub const FRICTION: Real = 0.5;
    /// Edge length of a platform and of a level cell, in world units
    pub const SIZE: Real = 32.0;

    /// Share of platforms drawn grey instead of white
    pub const WHITE_RATIO: f64 = 0.5;
    pub const BRIGHTNESS_MIN: f32 = 0.7;
    pub const BRIGHTNESS_RANGE: f32 = 1.0 - Self::BRIGHTNESS_MIN;

    /// Shift applied to a runner's inverted colour before it is subtracted
    pub const TINT_FADE: f32 = -0.5;

    /// Sideways kicks given to a platform when it is knocked loose
    pub const DROP_IMPULSES: [[Real; 2]; 2] = [[100.0, 0.0], [-100.0, 0.0]];
    /// Where the kick lands, relative to the platform center
    pub const DROP_OFFSET: [Real; 2] = [0.0, Self::SIZE / 2.0];

    /// Create a static platform at grid cell (`col`, `row`)
    pub fn new(
        id: PlatformId,
        physics: &mut PhysicsWorld,
        col: i32,
        row: i32,
        base_color: Color,
    ) -> Self {
        let x = cell_to_world(col, Self::SIZE);
        let y = cell_to_world(row, Self::SIZE);

        let body = presets::platform_body(x, y);
        let collider = presets::platform_collider(Self::SIZE, Self::MASS, Self::FRICTION);
        let mut entity = RigidEntity::spawn(physics, body, collider, Vec2::splat(Self::SIZE));
        entity.sprite.color = base_color.to_rgba(1.0);

        Self {
            id,
            entity,
            base_color,
            tints: BTreeMap::new(),
        }
    }

    /// Random base colour: white, or a light grey for `WHITE_RATIO` of tiles
    pub fn random_base_color<R: Rng + ?Sized>(rng: &mut R) -> Color {
        if rng.gen_bool(Self::WHITE_RATIO) {
            Color::grey(Self::BRIGHTNESS_MIN + rng.gen::<f32>() * Self::BRIGHTNESS_RANGE)
        } else {
            WHITE
        }
    }

    pub fn is_static(&self) -> bool {
        self.entity.is_static()
    }

    pub fn position(&self, physics: &PhysicsWorld) -> Vec2 {
        self.entity.position(physics)
    }

    pub fn base_color(&self) -> Color {
        self.base_color
    }

    /// Knock the platform loose: it becomes dynamic and gets a random sideways
    /// kick near its top edge. No-op if it is already loose.
    pub fn drop<R: Rng + ?Sized>(&mut self, physics: &mut PhysicsWorld, rng: &mut R) {
        if !self.is_static() {
            return;
        }
        self.entity.set_static(physics, false);

        let Some(kick) = Self::DROP_IMPULSES.choose(rng).copied() else {
            return;
        };
        if let Some(body) = physics.get_rigid_body_mut(self.entity.body_handle()) {
            let center = body.translation();
            let at = Point::new(
                center.x + Self::DROP_OFFSET[0],
                center.y + Self::DROP_OFFSET[1],
            );
            body.apply_impulse_at_point(Vector::new(kick[0], kick[1]), at, true);
        }
    }

    /// Add a runner's colour to the tint set
    pub fn tint(&mut self, runner: RunnerId, color: Color) {
        self.tints.insert(runner, color);
        self.refresh_color();
    }

    /// Remove a runner's colour from the tint set
    pub fn untint(&mut self, runner: RunnerId) {
        if self.tints.remove(&runner).is_some() {
            self.refresh_color();
        }
    }

    pub fn is_tinted_by(&self, runner: RunnerId) -> bool {
        self.tints.contains_key(&runner)
    }

    /// Runners currently tinting this platform
    pub fn tinted_by(&self) -> impl Iterator<Item = RunnerId> + '_ {
        self.tints.keys().copied()
    }

    /// Base colour minus every tint's inverted, faded contribution
    pub fn rendered_color(&self) -> Color {
        self.tints.values().fold(self.base_color, |color, tint| {
            color.subtract(tint.invert().fade(Self::TINT_FADE))
        })
    }

    fn refresh_color(&mut self) {
        self.entity.sprite.color = self.rendered_color().to_rgba(1.0);
    }
}
