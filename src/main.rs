//! Keeper Catch entry point
//!
//! The browser build is driven by the page through `platform::WebRound`.
//! Natively this runs a headless demo round with a scripted keeper.

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use glam::Vec3;

    use keeper_catch::clock::ManualClock;
    use keeper_catch::input::KeeperHandle;
    use keeper_catch::present::Hud;
    use keeper_catch::round::{RoundController, RoundStatus};
    use keeper_catch::{BestRounds, Result, Settings};

    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::{SystemTime, UNIX_EPOCH};

    /// Frame step for the simulated render loop (~60 Hz)
    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Glove speed of the scripted keeper (units per second)
    const KEEPER_SPEED: f32 = 6.0;
    /// Give up if a round somehow never ends
    const MAX_FRAMES: u32 = 60 * 60 * 10;

    pub fn run(settings_path: &str, best_path: &str) -> Result<()> {
        let settings = Settings::load_from(settings_path)?;
        let clock = Rc::new(ManualClock::new(0.0));
        let seed = settings.seed_or(0x5eed);
        log::info!("Game initialized with seed: {}", seed);

        let keeper = KeeperHandle::new(settings.keeper.center);
        let mut controller = RoundController::with_seed(keeper.clone(), seed).with_clock(clock.clone());

        let hud = Rc::new(RefCell::new(Hud::new(settings.sound, settings.confetti)));
        controller.add_sink(hud.clone());
        controller.on_throw_resolved(|r| {
            log::info!(
                "Throw {}: {} ({:.2} from glove)",
                r.throw_index + 1,
                if r.caught { "Saved!" } else { "Goal!" },
                r.distance
            );
        });

        controller.start(settings.round.clone())?;

        let dt = (FRAME_MS / 1000.0) as f32;
        let mut frames = 0;
        while controller.status() == RoundStatus::Running && frames < MAX_FRAMES {
            // Chase the ball's target, limited to glove speed
            if let Some(throw) = controller.active_throw() {
                let current = keeper.get();
                let goal = Vec3::new(throw.target.x, throw.target.y, current.z);
                let step = (goal - current).clamp_length_max(KEEPER_SPEED * dt);
                keeper.set(current + step);
            }

            controller.tick(clock.advance(FRAME_MS));
            for cue in hud.borrow_mut().drain_cues() {
                log::debug!("cue: {}", cue.as_str());
            }
            frames += 1;
        }

        let state = controller.state();
        println!("{}", hud.borrow().result_text);
        println!(
            "Saved {} of {} in {:.1}s of play",
            state.score,
            state.throws_total,
            controller.round_time_ms() / 1000.0
        );

        let played_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs_f64() * 1000.0)
            .unwrap_or_default();
        let mut best = BestRounds::load_from(best_path)?;
        if let Some(rank) = best.add_round(state.score, state.throws_total, played_at) {
            println!("Best round #{}", rank);
            best.save_to(best_path)?;
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Keeper Catch (native) starting...");

    let mut args = std::env::args().skip(1);
    let settings_path = args.next().unwrap_or_else(|| "keeper-catch.json".to_string());
    let best_path = args
        .next()
        .unwrap_or_else(|| "keeper-catch-best.json".to_string());

    if let Err(e) = demo::run(&settings_path, &best_path) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::wasm_start, this is just to satisfy the compiler
}
