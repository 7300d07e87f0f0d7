/// Entry point and game loop.
///
/// Frame structure (roughly 60 fps):
///   1. Drain terminal input into InputState
///   2. Translate key state into actions, dispatch per phase
///   3. Tick the message timer
///   4. Render

mod config;
mod domain;
mod sim;
mod ui;

use std::time::{Duration, Instant};

use config::GameConfig;
use sim::action::ActionResolver;
use sim::event::GameEvent;
use sim::session::{GameSession, Phase};
use ui::input::{InputAction, InputState};
use ui::renderer::Renderer;

const FRAME_SLEEP: Duration = Duration::from_millis(16);

/// Message display time, in frames.
const MESSAGE_FRAMES: u32 = 120;

fn main() -> std::io::Result<()> {
    let config = GameConfig::load();
    let mut session = GameSession::new(&config);
    let mut resolver = ActionResolver::new(
        Duration::from_millis(config.input.fresh_cooldown_ms),
        Duration::from_millis(config.input.repeat_cooldown_ms),
    );
    let mut input = InputState::new();

    let mut renderer = Renderer::new();
    renderer.init()?;
    let result = run(&mut session, &mut resolver, &mut input, &mut renderer);
    renderer.cleanup()?;
    result
}

fn run(
    session: &mut GameSession,
    resolver: &mut ActionResolver,
    input: &mut InputState,
    renderer: &mut Renderer,
) -> std::io::Result<()> {
    loop {
        input.drain_events();
        if input.ctrl_c_pressed() {
            return Ok(());
        }

        let now = Instant::now();
        for action in input.actions() {
            match session.phase {
                Phase::Title => match action {
                    InputAction::Confirm => session.begin(),
                    InputAction::Quit => return Ok(()),
                    _ => {}
                },
                Phase::Playing => match action {
                    InputAction::Move { dir, repeat } => {
                        let events = resolver.apply(session, dir, repeat, now);
                        announce(session, &events);
                    }
                    InputAction::ToggleInventory => {
                        session.inventory_open = !session.inventory_open;
                    }
                    InputAction::Quit => return Ok(()),
                    InputAction::Confirm => {}
                },
                Phase::GameComplete => {
                    if matches!(action, InputAction::Quit) {
                        return Ok(());
                    }
                }
            }
        }

        session.tick_message();
        renderer.render(session)?;
        std::thread::sleep(FRAME_SLEEP);
    }
}

/// Turn simulation events into the HUD message banner.
fn announce(session: &mut GameSession, events: &[GameEvent]) {
    for event in events {
        match *event {
            GameEvent::MineralCollected { mineral, total } => {
                let msg = format!("+1 {} ({} total)", mineral.name(), total);
                session.set_message(&msg, MESSAGE_FRAMES);
            }
            GameEvent::DoorOpened { .. } => {
                session.set_message("The door is open!", MESSAGE_FRAMES);
            }
            GameEvent::LevelEntered { level } => {
                let msg = format!("Depth {level}");
                session.set_message(&msg, MESSAGE_FRAMES);
            }
            GameEvent::GameCompleted => {
                // The completion screen takes over; no banner needed.
            }
            GameEvent::TileMined { .. } => {}
        }
    }
}
