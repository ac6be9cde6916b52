use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use glam::Vec3;
use proptest::prelude::*;

use keeper_catch::clock::{Clock, ManualClock};
use keeper_catch::input::KeeperHandle;
use keeper_catch::round::{
    AxisRange, Easing, RoundConfig, RoundController, RoundStatus, TargetBounds,
};

fn config_strategy() -> impl Strategy<Value = RoundConfig> {
    (
        1u32..8,
        100.0f64..2000.0,
        50.0f64..3000.0,
        0.2f32..3.0,
        prop::bool::ANY,
    )
        .prop_map(|(throws_total, interval_ms, throw_duration_ms, catch_radius, eased)| RoundConfig {
            throws_total,
            interval_ms,
            throw_duration_ms,
            catch_radius,
            target_bounds: TargetBounds {
                x: AxisRange::new(-4.0, 4.0),
                y: AxisRange::new(-2.0, 2.0),
                z: AxisRange::fixed(5.0),
            },
            launch_origin: Vec3::new(0.0, 0.0, -10.0),
            easing: if eased { Easing::QuadOut } else { Easing::Linear },
        })
}

/// Log of everything the callbacks saw
#[derive(Default)]
struct Observed {
    resolved: Vec<u32>,
    completed: Vec<u32>,
}

fn observed_controller(keeper: KeeperHandle, seed: u64) -> (RoundController, Rc<RefCell<Observed>>) {
    let mut ctrl = RoundController::with_seed(keeper, seed);
    let observed = Rc::new(RefCell::new(Observed::default()));
    let log = observed.clone();
    ctrl.on_throw_resolved(move |r| log.borrow_mut().resolved.push(r.throw_index));
    let log = observed.clone();
    ctrl.on_round_complete(move |s| log.borrow_mut().completed.push(s));
    (ctrl, observed)
}

proptest! {
    #[test]
    fn round_completes_once_with_bounded_score(
        config in config_strategy(),
        seed in any::<u64>(),
        frame in 5.0f64..120.0,
        keeper_x in -6.0f32..6.0,
        keeper_y in -3.0f32..3.0,
    ) {
        let keeper = KeeperHandle::new(Vec3::new(keeper_x, keeper_y, 5.0));
        let (mut ctrl, observed) = observed_controller(keeper, seed);
        let total = config.throws_total;
        // A throw can wait a frame to launch and a frame to resolve
        let per_throw = config.interval_ms + config.throw_duration_ms + 3.0 * frame;
        let horizon = per_throw * (total as f64 + 2.0);
        ctrl.start(config).unwrap();

        let mut t = 0.0;
        while t <= horizon {
            ctrl.tick(t);
            t += frame;
        }
        // Extra ticks after completion change nothing
        ctrl.tick(t + 10_000.0);
        ctrl.tick(t + 20_000.0);

        prop_assert_eq!(ctrl.status(), RoundStatus::Complete);
        let observed = observed.borrow();
        prop_assert_eq!(observed.completed.len(), 1);
        prop_assert!(observed.completed[0] <= total);
        prop_assert_eq!(observed.completed[0], ctrl.score());

        // Each throw resolved exactly once, in order
        prop_assert_eq!(observed.resolved.len() as u32, total);
        let unique: HashSet<_> = observed.resolved.iter().collect();
        prop_assert_eq!(unique.len() as u32, total);
        prop_assert!(observed.resolved.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn one_throw_in_flight_at_a_time(
        config in config_strategy(),
        seed in any::<u64>(),
    ) {
        let keeper = KeeperHandle::new(Vec3::splat(100.0));
        let (mut ctrl, _observed) = observed_controller(keeper, seed);
        ctrl.start(config).unwrap();

        let mut launched_before = 0;
        let mut t = 0.0;
        while ctrl.status() == RoundStatus::Running {
            ctrl.tick(t);
            let launched = ctrl.throws_launched();
            prop_assert!(launched <= launched_before + 1);
            if let Some(throw) = ctrl.active_throw() {
                prop_assert_eq!(throw.index + 1, launched);
            }
            launched_before = launched;
            t += 16.0;
        }
    }

    #[test]
    fn pause_skips_only_paused_time(
        seed in any::<u64>(),
        into_flight in 0.0f64..1000.0,
        before_pause in 0.0f64..50.0,
        paused_for in 0.0f64..1_000_000.0,
        after in 0.0f64..500.0,
    ) {
        let clock = Rc::new(ManualClock::new(0.0));
        let keeper = KeeperHandle::new(Vec3::splat(100.0));
        let (ctrl, _observed) = observed_controller(keeper, seed);
        let mut ctrl = ctrl.with_clock(clock.clone());
        let config = RoundConfig {
            throws_total: 1,
            interval_ms: 1000.0,
            throw_duration_ms: 1150.0,
            ..Default::default()
        };
        ctrl.start(config).unwrap();
        ctrl.tick(clock.now_ms());
        ctrl.tick(clock.advance(1000.0));
        ctrl.tick(clock.advance(into_flight));
        let p0 = ctrl.throw_progress().unwrap();

        // Unpaused play between the last frame and the pause still counts
        clock.advance(before_pause);
        ctrl.pause();
        ctrl.pause();
        ctrl.tick(clock.advance(paused_for / 2.0));
        clock.advance(paused_for / 2.0);
        ctrl.resume();
        ctrl.resume();

        ctrl.tick(clock.advance(after));
        let played = into_flight + before_pause + after;
        prop_assert!((ctrl.round_time_ms() - (1000.0 + played)).abs() < 1e-6);

        let expected = (played / 1150.0).min(1.0) as f32;
        match ctrl.throw_progress() {
            Some(p) => {
                prop_assert!(p >= p0);
                prop_assert!((p - expected).abs() < 1e-4);
            }
            // Flight ran out: only unpaused time can have finished it
            None => prop_assert!(played >= 1150.0 - 1e-6),
        }
    }

    #[test]
    fn ball_never_passes_target(
        seed in any::<u64>(),
        late in 0.0f64..100_000.0,
    ) {
        let keeper = KeeperHandle::new(Vec3::splat(100.0));
        let (mut ctrl, _observed) = observed_controller(keeper, seed);
        ctrl.start(RoundConfig { throws_total: 1, ..Default::default() }).unwrap();
        ctrl.tick(0.0);
        ctrl.tick(3000.0);
        let throw = ctrl.active_throw().unwrap();
        ctrl.tick(3000.0 + late);

        let travelled = ctrl.ball_position().distance(throw.start);
        prop_assert!(travelled <= throw.start.distance(throw.target) + 1e-4);
    }
}
