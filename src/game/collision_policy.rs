// Support and last-platform bookkeeping driven by contact events

use crate::engine::physics::{ColliderHandle, ContactEvent};

use super::entities::{EntityRef, EntityStore};

/// Turns recorded contact events into runner support state
///
/// Support is inferred from which body center is higher, not from contact
/// normals. A runner pushed sideways against a taller neighbour can count as
/// supported by it.
#[derive(Debug, Default, Clone, Copy)]
pub struct CollisionPolicy;

impl CollisionPolicy {
    pub fn new() -> Self {
        Self
    }

    /// Apply every event from one physics step, in the order they fired
    pub fn apply(&self, store: &mut EntityStore, events: &[ContactEvent]) {
        for event in events {
            match *event {
                ContactEvent::PreSolve { upper, lower } => self.pre_solve(store, upper, lower),
                ContactEvent::Separated {
                    collider1,
                    collider2,
                } => self.separate(store, collider1, collider2),
            }
        }
    }

    /// `upper` rests on `lower` this step
    ///
    /// A non-frozen runner on top gains `lower` as a support; if `lower` is a
    /// platform it also becomes the runner's last platform.
    pub fn pre_solve(&self, store: &mut EntityStore, upper: ColliderHandle, lower: ColliderHandle) {
        let Some(EntityRef::Runner(runner)) = store.entity_for(upper) else {
            return;
        };
        let Some(below) = store.entity_for(lower) else {
            return;
        };

        match store.runner_mut(runner) {
            Some(entry) if !entry.is_frozen() && !entry.is_dead() => {
                entry.add_support(lower);
            }
            _ => return,
        }

        if let EntityRef::Platform(platform) = below {
            store.set_last_platform(runner, Some(platform));
        }
    }

    /// Two colliders stopped touching: each runner forgets the other as a
    /// support
    pub fn separate(&self, store: &mut EntityStore, a: ColliderHandle, b: ColliderHandle) {
        self.forget(store, a, b);
        self.forget(store, b, a);
    }

    fn forget(&self, store: &mut EntityStore, collider: ColliderHandle, other: ColliderHandle) {
        let Some(EntityRef::Runner(runner)) = store.entity_for(collider) else {
            return;
        };
        if let Some(entry) = store.runner_mut(runner) {
            entry.remove_support(other);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::color::{BLUE, RED, WHITE};
    use crate::engine::physics::PhysicsWorld;
    use crate::game::platform::PlatformId;
    use crate::game::player::{Player, PlayerId};
    use crate::game::runner::{Runner, RunnerId};

    struct Fixture {
        physics: PhysicsWorld,
        store: EntityStore,
        player: Player,
        runner: RunnerId,
        tile: PlatformId,
    }

    impl Fixture {
        fn new() -> Self {
            let mut physics = PhysicsWorld::new();
            let mut store = EntityStore::new();
            let mut player = Player::new(PlayerId(0), RED);
            let runner = store.spawn_runner(&mut physics, &mut player, 0.0, 32.0, None);
            let tile = store.spawn_platform(&mut physics, 0, 0, WHITE);
            Self {
                physics,
                store,
                player,
                runner,
                tile,
            }
        }

        fn runner_collider(&self) -> ColliderHandle {
            self.store
                .runner(self.runner)
                .map(|r| r.entity.collider_handle())
                .unwrap_or_else(ColliderHandle::invalid)
        }

        fn tile_collider(&self) -> ColliderHandle {
            self.store
                .platform(self.tile)
                .map(|p| p.entity.collider_handle())
                .unwrap_or_else(ColliderHandle::invalid)
        }

        fn runner(&self) -> &Runner {
            self.store.runner(self.runner).expect("runner is live")
        }
    }

    #[test]
    fn test_support_lifecycle() {
        let mut f = Fixture::new();
        let policy = CollisionPolicy::new();
        let (runner, tile) = (f.runner_collider(), f.tile_collider());
        assert!(!f.runner().can_jump());

        policy.pre_solve(&mut f.store, runner, tile);
        assert!(f.runner().is_supported_by(tile));
        assert_eq!(f.runner().last_platform(), Some(f.tile));
        assert!(f.store.platform(f.tile).is_some_and(|p| p.is_tinted_by(f.runner)));

        // Every step of a resting contact repeats the event
        policy.pre_solve(&mut f.store, runner, tile);
        assert_eq!(f.runner().support_count(), 1);

        policy.separate(&mut f.store, tile, runner);
        assert!(!f.runner().is_supported_by(tile));
        // Leaving a platform keeps it as the last one
        assert_eq!(f.runner().last_platform(), Some(f.tile));
    }

    #[test]
    fn test_platform_above_runner_is_not_support() {
        let mut f = Fixture::new();
        let policy = CollisionPolicy::new();
        let (runner, tile) = (f.runner_collider(), f.tile_collider());

        policy.pre_solve(&mut f.store, tile, runner);
        assert_eq!(f.runner().support_count(), 0);
        assert_eq!(f.runner().last_platform(), None);
    }

    #[test]
    fn test_frozen_runner_gains_no_support() {
        let mut f = Fixture::new();
        let policy = CollisionPolicy::new();
        let (runner, tile) = (f.runner_collider(), f.tile_collider());
        if let Some(r) = f.store.runner_mut(f.runner) {
            r.freeze(&mut f.physics, &mut f.player);
        }

        policy.pre_solve(&mut f.store, runner, tile);
        assert_eq!(f.runner().support_count(), 0);

        // Separation of a pair that was never recorded is harmless
        policy.separate(&mut f.store, runner, tile);
        assert_eq!(f.runner().support_count(), 0);
    }

    #[test]
    fn test_runner_on_runner() {
        let mut f = Fixture::new();
        let policy = CollisionPolicy::new();
        let mut other_player = Player::new(PlayerId(1), BLUE);
        let top = f
            .store
            .spawn_runner(&mut f.physics, &mut other_player, 0.0, 64.0, None);
        let top_collider = f
            .store
            .runner(top)
            .map(|r| r.entity.collider_handle())
            .unwrap_or_else(ColliderHandle::invalid);
        let bottom = f.runner_collider();

        policy.pre_solve(&mut f.store, top_collider, bottom);
        let top_runner = f.store.runner(top).expect("runner is live");
        assert!(top_runner.can_jump());
        // Standing on a runner does not change the last platform
        assert_eq!(top_runner.last_platform(), None);
        assert!(!f.runner().can_jump());

        policy.separate(&mut f.store, bottom, top_collider);
        assert!(!f.store.runner(top).expect("runner is live").can_jump());
    }

    #[test]
    fn test_unknown_colliders_ignored() {
        let mut f = Fixture::new();
        let policy = CollisionPolicy::new();
        let runner = f.runner_collider();
        let tile = f.tile_collider();
        f.store.despawn_platform(f.tile, &mut f.physics);

        policy.apply(
            &mut f.store,
            &[
                ContactEvent::PreSolve {
                    upper: runner,
                    lower: tile,
                },
                ContactEvent::Separated {
                    collider1: tile,
                    collider2: runner,
                },
            ],
        );
        assert_eq!(f.runner().support_count(), 0);
    }

    #[test]
    fn test_apply_runs_events_in_order() {
        let mut f = Fixture::new();
        let policy = CollisionPolicy::new();
        let (runner, tile) = (f.runner_collider(), f.tile_collider());

        policy.apply(
            &mut f.store,
            &[
                ContactEvent::Separated {
                    collider1: runner,
                    collider2: tile,
                },
                ContactEvent::PreSolve {
                    upper: runner,
                    lower: tile,
                },
            ],
        );
        assert!(f.runner().is_supported_by(tile));
    }

    #[test]
    fn test_contacts_from_physics_step() {
        let mut f = Fixture::new();
        let policy = CollisionPolicy::new();

        for _ in 0..40 {
            f.physics.step(PhysicsWorld::DEFAULT_TIMESTEP);
            let events = f.physics.drain_contact_events();
            policy.apply(&mut f.store, &events);
        }

        assert!(f.runner().can_jump());
        assert_eq!(f.runner().last_platform(), Some(f.tile));
    }
}
