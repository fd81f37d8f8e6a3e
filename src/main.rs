use anyhow::Result;
use log::{error, info, warn};
use winit::{
    event::{ElementState, Event, WindowEvent},
    event_loop::EventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::WindowBuilder,
};

mod core;
mod engine;
mod game;

use engine::game_loop::FrameClock;
use engine::input::InputManager;
use game::{GameSession, MatchConfig, MatchStatus, Score};

/// Key that pauses and resumes the match
const PAUSE_KEY: KeyCode = KeyCode::KeyP;

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting Frostline...");

    let config = MatchConfig::default();
    let mut session = GameSession::new(config.clone())?;
    let input = InputManager::new(config.player_colors.len());
    let mut clock = FrameClock::new();

    // Create event loop and window
    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title(score_title(&session.scores()))
        .with_inner_size(winit::dpi::LogicalSize::new(
            config.camera.width,
            config.camera.height,
        ))
        .with_resizable(true)
        .build(&event_loop)?;

    info!("Window created successfully");

    // Main event loop
    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                info!("Close requested, shutting down...");
                elwt.exit();
            }
            Event::WindowEvent {
                event: WindowEvent::KeyboardInput { event, .. },
                ..
            } => {
                if event.physical_key == PhysicalKey::Code(PAUSE_KEY)
                    && event.state == ElementState::Pressed
                    && !event.repeat
                {
                    clock.toggle_pause();
                    return;
                }
                if clock.is_paused() {
                    return;
                }

                if let Some(input) = input.process_keyboard_event(&event) {
                    if let Err(e) = session.handle_input(input.player_id, input.action, input.pressed)
                    {
                        warn!("Dropped input {:?}: {}", input, e);
                    }
                }
            }
            Event::WindowEvent {
                event: WindowEvent::RedrawRequested,
                ..
            } => {
                // Fixed-rate physics first, then one game update with the real frame delta
                let steps = clock.begin_frame();
                for _ in 0..steps {
                    session.step_physics(clock.fixed_timestep());
                }

                if !clock.is_paused() && session.update(clock.frame_delta()) == MatchStatus::Ended {
                    info!("Final scores: {}", score_title(&session.scores()));
                    if let Err(e) = session.reset() {
                        error!("Could not restart the match: {}", e);
                        elwt.exit();
                    }
                }

                window.set_title(&score_title(&session.scores()));
            }
            Event::AboutToWait => {
                // Request redraw on next frame
                window.request_redraw();
            }
            _ => {}
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}

/// Window title standing in for the score labels
fn score_title(scores: &[Score]) -> String {
    let labels: Vec<String> = scores
        .iter()
        .map(|score| {
            let marker = if score.alive { "" } else { " (out)" };
            format!("P{} {}{}", score.player.0 + 1, score.distance, marker)
        })
        .collect();
    format!("Frostline | {}", labels.join(" | "))
}
