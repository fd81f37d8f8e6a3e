use rapier2d::prelude::*;
use std::sync::{Arc, Mutex};

/// Collision groups for filtering what objects can collide with each other
///
/// Runners and platforms interact with everything, including their own kind:
/// runners stand on each other (frozen runners are checkpoints) and loose
/// platforms pile up on the ones still attached to the level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionGroups {
    /// Player-controlled runners, frozen or not
    Runner = 0b0000_0001,

    /// Level terrain cells
    Platform = 0b0000_0010,
}

impl CollisionGroups {
    /// Convert to rapier2d's InteractionGroups
    pub fn to_interaction_groups(self) -> InteractionGroups {
        let memberships = Group::from_bits_truncate(self as u32);
        let filter = Group::from_bits_truncate(
            CollisionGroups::Runner as u32 | CollisionGroups::Platform as u32,
        );

        InteractionGroups::new(memberships, filter)
    }

    /// Whether colliders of this group carry the contact hooks and separation
    /// events that drive support tracking.
    ///
    /// Every handled pair (runner/platform, runner/runner) contains a runner,
    /// so flagging runners alone registers both pairs.
    pub fn tracks_contacts(self) -> bool {
        matches!(self, CollisionGroups::Runner)
    }
}

/// Contact notification recorded during a physics step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactEvent {
    /// Two colliders are touching and about to be resolved by the solver.
    /// `upper` belongs to the body whose center was higher at contact time.
    PreSolve {
        upper: ColliderHandle,
        lower: ColliderHandle,
    },

    /// Two colliders stopped touching
    Separated {
        collider1: ColliderHandle,
        collider2: ColliderHandle,
    },
}

/// Records pre-solve and separation callbacks in the order the solver fires them
///
/// rapier calls hooks through `&self` from inside the pipeline step, so the
/// events are queued here and applied to game state once the step returns.
#[derive(Debug, Clone, Default)]
pub struct ContactRecorder {
    events: Arc<Mutex<Vec<ContactEvent>>>,
}

impl ContactRecorder {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::with_capacity(64))),
        }
    }

    /// Take all events recorded since the last drain, oldest first
    pub fn drain(&self) -> Vec<ContactEvent> {
        self.events
            .lock()
            .map(|mut events| std::mem::take(&mut *events))
            .unwrap_or_default()
    }

    /// Number of events waiting to be drained
    pub fn pending(&self) -> usize {
        self.events.lock().map(|events| events.len()).unwrap_or(0)
    }

    fn push(&self, event: ContactEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

/// Vertical position of the body a collider hangs off, or of the collider
/// itself when it has no parent
fn center_y(
    bodies: &RigidBodySet,
    colliders: &ColliderSet,
    collider: ColliderHandle,
    body: Option<RigidBodyHandle>,
) -> Option<Real> {
    if let Some(body) = body.and_then(|handle| bodies.get(handle)) {
        return Some(body.translation().y);
    }
    colliders.get(collider).map(|c| c.translation().y)
}

/// Order a touching pair as (upper, lower) by center height.
///
/// Returns `None` when neither is above the other.
pub fn order_vertically(
    first: (ColliderHandle, Real),
    second: (ColliderHandle, Real),
) -> Option<(ColliderHandle, ColliderHandle)> {
    if first.1 > second.1 {
        Some((first.0, second.0))
    } else if second.1 > first.1 {
        Some((second.0, first.0))
    } else {
        None
    }
}

impl PhysicsHooks for ContactRecorder {
    fn modify_solver_contacts(&self, context: &mut ContactModificationContext) {
        let y1 = center_y(
            context.bodies,
            context.colliders,
            context.collider1,
            context.rigid_body1,
        );
        let y2 = center_y(
            context.bodies,
            context.colliders,
            context.collider2,
            context.rigid_body2,
        );

        let (Some(y1), Some(y2)) = (y1, y2) else {
            return;
        };

        if let Some((upper, lower)) =
            order_vertically((context.collider1, y1), (context.collider2, y2))
        {
            self.push(ContactEvent::PreSolve { upper, lower });
        }
    }
}

impl EventHandler for ContactRecorder {
    fn handle_collision_event(
        &self,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        event: CollisionEvent,
        _contact_pair: Option<&ContactPair>,
    ) {
        if let CollisionEvent::Stopped(h1, h2, _flags) = event {
            self.push(ContactEvent::Separated {
                collider1: h1,
                collider2: h2,
            });
        }
    }

    fn handle_contact_force_event(
        &self,
        _dt: Real,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        _contact_pair: &ContactPair,
        _total_force_magnitude: Real,
    ) {
    }
}
