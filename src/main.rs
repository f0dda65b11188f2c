//! Headless Breakout run
//!
//! Plays one auto-piloted round on a 1080x1920 surface and prints the final
//! statistics as JSON. Usage: `breakout [settings.json]`

/// Give up after ten simulated minutes
#[cfg(not(target_arch = "wasm32"))]
const MAX_FRAMES: u64 = 60 * 60 * 10;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::path::Path;

    use breakout_core::audio::LogAudio;
    use breakout_core::phase::Status;
    use breakout_core::render::CommandList;
    use breakout_core::runner::GameLoop;
    use breakout_core::{Game, GameEvent, Settings};

    env_logger::init();

    let mut settings = match std::env::args().nth(1) {
        Some(path) => Settings::load(Path::new(&path)),
        None => Settings::default(),
    };
    settings.auto_play = true;

    let mut game = Game::new(settings, Box::new(LogAudio));
    game.sender().send(GameEvent::ScreenResized {
        width: 1080,
        height: 1920,
    });

    log::info!("Breakout (headless) starting...");
    let mut canvas = CommandList::last_frame();
    let frames = GameLoop::unpaced().run_while(&mut game, &mut canvas, |game| {
        !game.is_over() && game.frame() < MAX_FRAMES
    });
    log::debug!("last frame drew {} commands", canvas.commands().len());

    match game.status() {
        Some(Status::Won(lives)) => log::info!("won with {lives} lives left after {frames} frames"),
        Some(Status::Lost(_)) => log::info!("lost after {frames} frames"),
        Some(status) => log::info!("stopped while {} after {frames} frames", status.name()),
        None => log::warn!("never reached play after {frames} frames"),
    }

    if let Some(stats) = game.statistics() {
        match serde_json::to_string_pretty(stats) {
            Ok(json) => println!("{json}"),
            Err(err) => log::error!("Cannot serialize statistics: {err}"),
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No headless run in the browser
}
