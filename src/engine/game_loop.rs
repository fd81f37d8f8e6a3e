/// Frame timing for the two match ticks
///
/// Physics runs at a fixed rate while game updates run once per rendered
/// frame with the real frame delta. The clock accumulates wall time and tells
/// the driver how many fixed physics steps are owed this frame.
use std::time::{Duration, Instant};

/// Fixed physics rate (80 steps per second)
pub const FIXED_TIMESTEP: f32 = 1.0 / 80.0;
const FIXED_TIMESTEP_DURATION: Duration = Duration::from_micros(12_500);

/// Maximum number of physics steps per frame to prevent spiral of death
const MAX_PHYSICS_STEPS: u32 = 5;

/// Longest frame delta handed to the update tick; longer stalls are clamped
const MAX_FRAME_DELTA: Duration = Duration::from_millis(250);

/// Frame clock state
pub struct FrameClock {
    /// Accumulated time owed to the physics tick
    accumulator: Duration,

    /// Time of last frame
    last_frame_time: Instant,

    /// Whether the match is paused
    paused: bool,

    /// Current frame number
    frame_count: u64,

    /// Total physics steps handed out
    step_count: u64,

    /// Delta time for the update tick (time since last frame)
    frame_delta: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            accumulator: Duration::ZERO,
            last_frame_time: Instant::now(),
            paused: false,
            frame_count: 0,
            step_count: 0,
            frame_delta: 0.0,
        }
    }

    /// Begin a new frame, returns the number of fixed physics steps to run
    pub fn begin_frame(&mut self) -> u32 {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame_time);
        self.last_frame_time = now;
        self.advance(elapsed)
    }

    /// Account for `elapsed` wall time since the previous frame
    fn advance(&mut self, elapsed: Duration) -> u32 {
        let elapsed = elapsed.min(MAX_FRAME_DELTA);
        self.frame_count += 1;

        if self.paused {
            self.frame_delta = 0.0;
            return 0;
        }

        self.frame_delta = elapsed.as_secs_f32();
        self.accumulator += elapsed;

        let mut steps = 0;
        while self.accumulator >= FIXED_TIMESTEP_DURATION && steps < MAX_PHYSICS_STEPS {
            self.accumulator -= FIXED_TIMESTEP_DURATION;
            steps += 1;
        }

        // Drop whatever the cap left behind rather than paying it back later
        if steps == MAX_PHYSICS_STEPS {
            self.accumulator = self.accumulator.min(FIXED_TIMESTEP_DURATION);
        }

        self.step_count += steps as u64;
        steps
    }

    /// Get the fixed timestep for physics steps (in seconds)
    pub fn fixed_timestep(&self) -> f32 {
        FIXED_TIMESTEP
    }

    /// Delta for the update tick, 0 while paused
    pub fn frame_delta(&self) -> f32 {
        self.frame_delta
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Pause the match
    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            log::info!("Match paused");
        }
    }

    /// Resume the match
    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            self.last_frame_time = Instant::now();
            // Reset accumulator to prevent update burst
            self.accumulator = Duration::ZERO;
            log::info!("Match resumed");
        }
    }

    /// Toggle pause state
    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
