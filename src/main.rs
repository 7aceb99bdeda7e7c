//! Galactic Defender entry point
//!
//! On web the library's wasm start function does all the work. Natively this
//! runs a headless autopilot game for smoke testing and balance checks:
//!
//! ```text
//! galactic-defender [tuning.json] [save.json]
//! ```

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use galactic_defender::persistence::{FileStorage, MemoryStorage, Storage};
    use galactic_defender::platform::now_ms;
    use galactic_defender::sim::{GamePhase, GameState, Playfield, TickInput};
    use galactic_defender::{Game, Tuning};

    /// Give up after ten simulated minutes
    const MAX_TICKS: u32 = 60 * 60 * 10;
    /// Simulated frame length (ms)
    const FRAME_MS: f64 = 1000.0 / 60.0;

    pub fn run() {
        let mut args = std::env::args().skip(1);

        let tuning = match args.next() {
            Some(path) => Tuning::load(&path).unwrap_or_else(|e| {
                log::warn!("Using default tuning, {} failed to load: {}", path, e);
                Tuning::default()
            }),
            None => Tuning::default(),
        };

        match args.next() {
            Some(path) => play(FileStorage::open(path), tuning),
            None => play(MemoryStorage::new(), tuning),
        }
    }

    fn play<S: Storage>(storage: S, tuning: Tuning) {
        let start = now_ms();
        let seed = start as u64;
        let mut game = Game::new(seed, Playfield::default(), tuning, storage, start);
        game.start();
        log::info!("Autopilot run with seed {}", seed);

        let mut ticks = 0;
        while game.phase() == GamePhase::Playing && ticks < MAX_TICKS {
            let input = autopilot(game.state(), ticks, start + ticks as f64 * FRAME_MS);
            game.step(&input);
            for notice in game.drain_notices() {
                log::info!("[tick {}] {}", ticks, notice);
            }
            ticks += 1;
        }

        let run = game.state().run;
        log::info!(
            "Finished after {} ticks: score {}, level {}, lives {}",
            ticks,
            run.score,
            run.level,
            run.lives
        );
        log::info!(
            "High score {} (estimated rank #{}), {} coins",
            game.high_score(),
            game.estimated_rank(),
            game.economy().coins
        );
    }

    /// Chase the lowest asteroid and keep firing
    fn autopilot(state: &GameState, tick: u32, now_ms: f64) -> TickInput {
        let target = state
            .asteroids
            .iter()
            .filter(|a| a.pos.y < state.player.pos.y)
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
            .map(|a| a.pos.x);
        let x = state.player.pos.x;

        TickInput {
            left: target.is_some_and(|t| t < x - 4.0),
            right: target.is_some_and(|t| t > x + 4.0),
            shoot: tick % 8 == 0,
            now_ms,
            ..Default::default()
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is the library's start function
}
