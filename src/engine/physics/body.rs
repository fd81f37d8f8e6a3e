use super::collision::CollisionGroups;
use rapier2d::prelude::*;

pub use rapier2d::prelude::{ColliderHandle, RigidBodyHandle};

/// Builder for creating rigid bodies with common configurations
pub struct BodyBuilder {
    body_type: RigidBodyType,
    position: Isometry<Real>,
    can_sleep: bool,
    locked_axes: LockedAxes,
}

impl BodyBuilder {
    fn of_type(body_type: RigidBodyType) -> Self {
        Self {
            body_type,
            position: Isometry::identity(),
            can_sleep: true,
            locked_axes: LockedAxes::empty(),
        }
    }

    /// A body moved by gravity, impulses and contacts
    pub fn new_dynamic() -> Self {
        Self::of_type(RigidBodyType::Dynamic)
    }

    /// A body with infinite mass that is never integrated
    pub fn new_fixed() -> Self {
        Self::of_type(RigidBodyType::Fixed)
    }

    /// Dynamic or fixed depending on `is_static`
    pub fn new(is_static: bool) -> Self {
        if is_static {
            Self::new_fixed()
        } else {
            Self::new_dynamic()
        }
    }

    /// Set the initial position and rotation
    pub fn position_rotation(mut self, x: Real, y: Real, angle: Real) -> Self {
        self.position = Isometry::new(Vector::new(x, y), angle);
        self
    }

    /// Set whether the body can sleep when inactive
    pub fn can_sleep(mut self, can_sleep: bool) -> Self {
        self.can_sleep = can_sleep;
        self
    }

    /// Lock rotation (runners stay upright)
    pub fn lock_rotation(mut self) -> Self {
        self.locked_axes = LockedAxes::ROTATION_LOCKED;
        self
    }

    /// Build the rigid body
    pub fn build(self) -> RigidBody {
        RigidBodyBuilder::new(self.body_type)
            .position(self.position)
            .can_sleep(self.can_sleep)
            .locked_axes(self.locked_axes)
            .build()
    }
}

/// Builder for creating colliders with common configurations
pub struct ColliderBuilder2D {
    shape: SharedShape,
    collision_groups: CollisionGroups,
    friction: Real,
    restitution: Real,
    mass: Real,
}

impl ColliderBuilder2D {
    /// Create a box-shaped collider
    pub fn box_shape(half_width: Real, half_height: Real) -> Self {
        Self {
            shape: SharedShape::cuboid(half_width, half_height),
            collision_groups: CollisionGroups::Platform,
            friction: 0.5,
            restitution: 0.0,
            mass: 1.0,
        }
    }

    /// Set the collision group, which also decides whether contact hooks fire
    pub fn collision_groups(mut self, groups: CollisionGroups) -> Self {
        self.collision_groups = groups;
        self
    }

    /// Set friction coefficient (0.0 = no friction, 1.0 = high friction)
    pub fn friction(mut self, friction: Real) -> Self {
        self.friction = friction;
        self
    }

    /// Set mass directly; inertia follows from the shape
    pub fn mass(mut self, mass: Real) -> Self {
        self.mass = mass;
        self
    }

    /// Build the collider
    pub fn build(self) -> Collider {
        let (hooks, events) = if self.collision_groups.tracks_contacts() {
            (
                ActiveHooks::MODIFY_SOLVER_CONTACTS,
                ActiveEvents::COLLISION_EVENTS,
            )
        } else {
            (ActiveHooks::empty(), ActiveEvents::empty())
        };

        rapier2d::prelude::ColliderBuilder::new(self.shape)
            .collision_groups(self.collision_groups.to_interaction_groups())
            .friction(self.friction)
            .restitution(self.restitution)
            .mass(self.mass)
            .active_hooks(hooks)
            .active_events(events)
            .build()
    }
}

/// Common rigid body configurations for game objects
pub mod presets {
    use super::*;

    /// Create a runner body (dynamic, rotation locked, never sleeps)
    pub fn runner_body(x: Real, y: Real) -> RigidBody {
        BodyBuilder::new_dynamic()
            .position_rotation(x, y, 0.0)
            .lock_rotation()
            .can_sleep(false) // Support tracking needs contacts every step
            .build()
    }

    /// Create a runner collider (square)
    pub fn runner_collider(size: Real, mass: Real, friction: Real) -> Collider {
        ColliderBuilder2D::box_shape(size / 2.0, size / 2.0)
            .collision_groups(CollisionGroups::Runner)
            .friction(friction)
            .mass(mass)
            .build()
    }

    /// Create a platform body, fixed until knocked loose
    pub fn platform_body(x: Real, y: Real) -> RigidBody {
        BodyBuilder::new(true).position_rotation(x, y, 0.0).build()
    }

    /// Create a platform collider (square cell)
    pub fn platform_collider(size: Real, mass: Real, friction: Real) -> Collider {
        ColliderBuilder2D::box_shape(size / 2.0, size / 2.0)
            .collision_groups(CollisionGroups::Platform)
            .friction(friction)
            .mass(mass)
            .build()
    }
}
