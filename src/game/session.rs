// Match session - the context object tying physics, entities, level and camera

use glam::Vec2;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::core::color::Color;
use crate::engine::input::Action;
use crate::engine::physics::{PhysicsWorld, Vector};
use crate::engine::renderer::{ScrollingCamera, SpriteInstance};

use super::chunk::CATALOG;
use super::collision_policy::CollisionPolicy;
use super::config::MatchConfig;
use super::entities::EntityStore;
use super::error::GameError;
use super::platform::Platform;
use super::player::{Player, PlayerId};
use super::runner::{Runner, RunnerId};
use super::streamer::LevelStreamer;

/// Result of one game update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStatus {
    Running,
    /// No player has a runner left to steer
    Ended,
}

/// One player's numbers for the score labels
#[derive(Debug, Clone, PartialEq)]
pub struct Score {
    pub player: PlayerId,
    pub color: Color,
    pub distance: i32,
    pub deaths: u32,
    pub freezes: u32,
    /// Whether the player still has an active runner
    pub alive: bool,
}

/// Everything one match owns
///
/// The host loop drives it through two entry points: [`GameSession::step_physics`]
/// at a fixed rate and [`GameSession::update`] once per frame.
pub struct GameSession {
    config: MatchConfig,
    physics: PhysicsWorld,
    entities: EntityStore,
    policy: CollisionPolicy,
    streamer: LevelStreamer,
    camera: ScrollingCamera,
    players: Vec<Player>,
    rng: StdRng,
}

impl GameSession {
    /// Build a match: the first chunk, one runner per player, then enough
    /// terrain to fill the view
    pub fn new(config: MatchConfig) -> Result<Self, GameError> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut physics = PhysicsWorld::with_gravity(Vector::new(0.0, config.gravity));
        let mut entities = EntityStore::new();
        let mut streamer = LevelStreamer::new(CATALOG)?;
        let camera = ScrollingCamera::new(config.camera);

        streamer.push_chunk(&mut physics, &mut entities, &mut rng);

        let mut players = Vec::with_capacity(config.player_colors.len());
        for (index, color) in config.player_colors.iter().enumerate() {
            let mut player = Player::new(PlayerId(index), *color);
            let y = (index as f32 + 2.0) * config.spawn_spacing;
            entities.spawn_runner(&mut physics, &mut player, 0.0, y, None);
            players.push(player);
        }

        streamer.populate(
            camera.right(),
            config.populate_padding,
            &mut physics,
            &mut entities,
            &mut rng,
        );

        info!(
            "Match started: {} players, {} platforms",
            players.len(),
            entities.platform_count()
        );

        Ok(Self {
            config,
            physics,
            entities,
            policy: CollisionPolicy::new(),
            streamer,
            camera,
            players,
            rng,
        })
    }

    /// Tear the whole match down and build a fresh one
    pub fn reset(&mut self) -> Result<(), GameError> {
        self.streamer.clear(&mut self.physics, &mut self.entities);
        self.entities.clear(&mut self.physics);
        *self = Self::new(self.config.clone())?;
        info!("Match reset");
        Ok(())
    }

    /// Advance the simulation one fixed step and apply its contact events
    pub fn step_physics(&mut self, dt: f32) {
        self.physics.step(dt);
        let events = self.physics.drain_contact_events();
        self.policy.apply(&mut self.entities, &events);
        self.entities.sync_all(&self.physics);
    }

    /// Per-frame game logic
    pub fn update(&mut self, dt: f32) -> MatchStatus {
        self.camera.scroll(dt);
        let drop_line = self.camera.drop_line();
        let death_y = self.config.death_y;

        for id in self.entities.runner_ids() {
            let Some(runner) = self.entities.runner_mut(id) else {
                continue;
            };
            let Some(player) = self.players.get_mut(runner.player.0) else {
                continue;
            };
            runner.update(&mut self.physics, player);

            let position = runner.position(&self.physics);
            if position.y < death_y {
                self.entities.kill_runner(id, &mut self.physics, player);
            } else if position.x < drop_line {
                runner.drop(&mut self.physics);
            }
        }

        self.streamer.retire(
            drop_line,
            death_y,
            &mut self.physics,
            &mut self.entities,
            &mut self.rng,
        );
        self.streamer.populate(
            self.camera.right(),
            self.config.populate_padding,
            &mut self.physics,
            &mut self.entities,
            &mut self.rng,
        );

        if self.players.iter().all(|p| self.entities.active_runner(p).is_none()) {
            info!("Match over: no runners left");
            return MatchStatus::Ended;
        }
        MatchStatus::Running
    }

    /// Route one input to `player`'s active runner
    ///
    /// Returns whether the input was consumed. A player without an active
    /// runner consumes nothing.
    pub fn handle_input(
        &mut self,
        player: usize,
        action: Action,
        pressed: bool,
    ) -> Result<bool, GameError> {
        let owner = self
            .players
            .get(player)
            .ok_or(GameError::UnknownPlayer(player))?;
        let Some(id) = self.entities.active_runner(owner) else {
            return Ok(false);
        };

        if pressed && action == Action::Freeze {
            self.freeze_runner(id);
            return Ok(true);
        }

        let Some(runner) = self.entities.runner_mut(id) else {
            return Ok(false);
        };
        let handled = match (action, pressed) {
            (Action::Jump, true) => {
                runner.jump(&mut self.physics);
                true
            }
            (Action::MoveLeft, true) => {
                runner.move_left();
                true
            }
            (Action::MoveRight, true) => {
                runner.move_right();
                true
            }
            (Action::MoveLeft, false) => {
                runner.stop_left();
                true
            }
            (Action::MoveRight, false) => {
                runner.stop_right();
                true
            }
            _ => false,
        };
        Ok(handled)
    }

    /// Freeze a runner into a checkpoint and split a fresh one off above its
    /// last platform
    ///
    /// Only allowed while that platform exists and is still static. Returns
    /// whether the freeze happened.
    pub fn freeze_runner(&mut self, id: RunnerId) -> bool {
        let Some(runner) = self.entities.runner(id).filter(|r| r.alive()) else {
            return false;
        };
        let owner = runner.player;
        let Some(platform) = runner
            .last_platform()
            .and_then(|p| self.entities.platform(p))
            .filter(|p| p.is_static())
        else {
            return false;
        };
        let anchor = platform.position(&self.physics);

        let Some(player) = self.players.get_mut(owner.0) else {
            return false;
        };
        let fresh = self.entities.spawn_runner(
            &mut self.physics,
            player,
            anchor.x,
            anchor.y + Platform::SIZE,
            Some(id),
        );
        if let Some(runner) = self.entities.runner_mut(id) {
            runner.freeze(&mut self.physics, player);
        }

        debug!("Runner {:?} froze, {:?} takes over", id, fresh);
        true
    }

    /// The runner `player` currently steers
    pub fn active_runner(&self, player: usize) -> Option<RunnerId> {
        self.players
            .get(player)
            .and_then(|p| self.entities.active_runner(p))
    }

    pub fn runner(&self, id: RunnerId) -> Option<&Runner> {
        self.entities.runner(id)
    }

    pub fn scores(&self) -> Vec<Score> {
        self.players
            .iter()
            .map(|p| Score {
                player: p.id,
                color: p.color,
                distance: p.distance,
                deaths: p.deaths,
                freezes: p.freezes,
                alive: self.entities.active_runner(p).is_some(),
            })
            .collect()
    }

    /// Sprite instances inside the view, platforms first so runners draw on
    /// top
    pub fn render_instances(&self) -> Vec<SpriteInstance> {
        let viewport = self.camera.viewport_bounds();
        let platforms = self.entities.platforms().map(|p| &p.entity.sprite);
        let runners = self.entities.runners().map(|r| &r.entity.sprite);

        platforms
            .chain(runners)
            .filter(|sprite| viewport.intersects_rect(sprite.position, sprite.size * 0.5))
            .map(|sprite| sprite.instance())
            .collect()
    }

    pub fn camera(&self) -> &ScrollingCamera {
        &self.camera
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn entities(&self) -> &EntityStore {
        &self.entities
    }

    pub fn physics(&self) -> &PhysicsWorld {
        &self.physics
    }

    pub fn streamer(&self) -> &LevelStreamer {
        &self.streamer
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Where a runner currently is, if it is live
    pub fn runner_position(&self, id: RunnerId) -> Option<Vec2> {
        self.entities.runner(id).map(|r| r.position(&self.physics))
    }
}
