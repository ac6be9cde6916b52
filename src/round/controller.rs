//! Round controller
//!
//! Drives one round of throws from explicit `tick(now_ms)` calls:
//! launch on a fixed cadence, move the ball, test for a catch, score.

use glam::Vec3;

use super::config::RoundConfig;
use super::random::{RandomSource, seeded};
use super::state::{CatchEvent, RoundEvent, RoundState, RoundStatus, ThrowResolved};
use super::throw::Throw;
use crate::clock::Clock;
use crate::error::Result;
use crate::input::KeeperInput;
use crate::present::{PresentationSink, broadcast};

type ResolvedCallback = Box<dyn FnMut(&ThrowResolved)>;
type CompleteCallback = Box<dyn FnMut(u32)>;
type CatchCallback = Box<dyn FnMut(&CatchEvent)>;

/// Throw currently in the air
#[derive(Debug, Clone, Copy)]
struct InFlight {
    throw: Throw,
    resolved: bool,
}

/// Round time: milliseconds of unpaused play since `start()`
#[derive(Debug, Clone, Copy, Default)]
struct RoundClock {
    elapsed_ms: f64,
    last_wall_ms: Option<f64>,
}

impl RoundClock {
    /// Fold a wall-clock reading into round time
    fn advance(&mut self, wall_ms: f64) -> f64 {
        match self.last_wall_ms {
            None => self.last_wall_ms = Some(wall_ms),
            Some(last) if wall_ms > last => {
                self.elapsed_ms += wall_ms - last;
                self.last_wall_ms = Some(wall_ms);
            }
            Some(last) => {
                if wall_ms < last {
                    log::debug!("Clock went backwards ({} -> {}), holding", last, wall_ms);
                }
            }
        }
        self.elapsed_ms
    }

    /// Next reading becomes the new reference without adding time
    fn resync(&mut self) {
        self.last_wall_ms = None;
    }

    /// Skip everything up to `wall_ms` without adding it
    fn rebase(&mut self, wall_ms: f64) {
        self.last_wall_ms = Some(match self.last_wall_ms {
            Some(last) if last > wall_ms => last,
            _ => wall_ms,
        });
    }
}

/// Owns one round of gameplay
pub struct RoundController {
    config: RoundConfig,
    state: RoundState,
    keeper: Box<dyn KeeperInput>,
    rng: Box<dyn RandomSource>,
    sinks: Vec<Box<dyn PresentationSink>>,
    on_resolved: Vec<ResolvedCallback>,
    on_complete: Vec<CompleteCallback>,
    on_catch: Vec<CatchCallback>,
    in_flight: Option<InFlight>,
    ball_position: Vec3,
    keeper_position: Vec3,
    clock: RoundClock,
    /// Wall clock sharing `tick`'s timebase, read by `pause`/`resume`
    time_source: Option<Box<dyn Clock>>,
    throws_launched: u32,
    next_throw_at_ms: f64,
    completion_fired: bool,
}

impl RoundController {
    /// Controller reading the keeper from `keeper` and drawing targets from `rng`
    pub fn new(keeper: impl KeeperInput + 'static, rng: impl RandomSource + 'static) -> Self {
        let config = RoundConfig::default();
        let keeper_position = keeper.current_keeper_position();
        Self {
            ball_position: config.launch_origin,
            config,
            state: RoundState::default(),
            keeper: Box::new(keeper),
            rng: Box::new(rng),
            sinks: Vec::new(),
            on_resolved: Vec::new(),
            on_complete: Vec::new(),
            on_catch: Vec::new(),
            in_flight: None,
            keeper_position,
            clock: RoundClock::default(),
            time_source: None,
            throws_launched: 0,
            next_throw_at_ms: 0.0,
            completion_fired: false,
        }
    }

    /// Controller with a seeded PCG target stream
    pub fn with_seed(keeper: impl KeeperInput + 'static, seed: u64) -> Self {
        Self::new(keeper, seeded(seed))
    }

    /// Read pause/resume times from `clock`. It must be the same timebase
    /// the host passes to `tick`.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.set_clock(clock);
        self
    }

    pub fn set_clock(&mut self, clock: impl Clock + 'static) {
        self.time_source = Some(Box::new(clock));
    }

    /// Attach a presentation sink
    pub fn add_sink(&mut self, sink: impl PresentationSink + 'static) {
        self.sinks.push(Box::new(sink));
    }

    /// Called once per throw, at the tick it resolves
    pub fn on_throw_resolved(&mut self, callback: impl FnMut(&ThrowResolved) + 'static) {
        self.on_resolved.push(Box::new(callback));
    }

    /// Called once per round with the final score
    pub fn on_round_complete(&mut self, callback: impl FnMut(u32) + 'static) {
        self.on_complete.push(Box::new(callback));
    }

    pub fn on_catch(&mut self, callback: impl FnMut(&CatchEvent) + 'static) {
        self.on_catch.push(Box::new(callback));
    }

    /// Begin a round. No-op while a round is already running or paused.
    pub fn start(&mut self, config: RoundConfig) -> Result<()> {
        config.validate()?;
        if self.state.status.is_active() {
            log::debug!("Round already in progress, start ignored");
            return Ok(());
        }

        self.state = RoundState::new(config.throws_total);
        self.ball_position = config.launch_origin;
        self.in_flight = None;
        self.clock = RoundClock::default();
        self.throws_launched = 0;
        self.next_throw_at_ms = config.interval_ms;
        self.completion_fired = false;
        self.config = config;

        log::info!(
            "Round started: {} throws every {}ms, {}ms flight, catch radius {}",
            self.config.throws_total,
            self.config.interval_ms,
            self.config.throw_duration_ms,
            self.config.catch_radius
        );
        self.emit(RoundEvent::RoundStarted {
            throws_total: self.config.throws_total,
        });
        Ok(())
    }

    /// Freeze scheduling and ball flight.
    ///
    /// With a clock attached, play up to this instant still counts. Without
    /// one, round time stops at the last tick.
    pub fn pause(&mut self) {
        match self.time_source.as_ref().map(|c| c.now_ms()) {
            Some(now) => self.pause_at(now),
            None => self.enter_pause(),
        }
    }

    /// Pause at wall-clock time `now_ms` (same timebase as `tick`)
    pub fn pause_at(&mut self, now_ms: f64) {
        if self.state.status != RoundStatus::Running {
            return;
        }
        self.clock.advance(now_ms);
        self.enter_pause();
    }

    fn enter_pause(&mut self) {
        if self.state.status != RoundStatus::Running {
            return;
        }
        self.state.status = RoundStatus::Paused;
        log::debug!("Round paused at {}ms", self.clock.elapsed_ms);
        self.emit(RoundEvent::Paused);
    }

    /// Continue from where `pause()` left off; paused time is not counted.
    ///
    /// With a clock attached, play from this instant counts. Without one,
    /// round time restarts from the next tick.
    pub fn resume(&mut self) {
        match self.time_source.as_ref().map(|c| c.now_ms()) {
            Some(now) => self.resume_at(now),
            None => {
                if self.state.status == RoundStatus::Paused {
                    self.clock.resync();
                    self.enter_resume();
                }
            }
        }
    }

    /// Resume at wall-clock time `now_ms`; only the paused span is skipped
    pub fn resume_at(&mut self, now_ms: f64) {
        if self.state.status != RoundStatus::Paused {
            return;
        }
        self.clock.rebase(now_ms);
        self.enter_resume();
    }

    fn enter_resume(&mut self) {
        self.state.status = RoundStatus::Running;
        log::debug!("Round resumed at {}ms", self.clock.elapsed_ms);
        self.emit(RoundEvent::Resumed);
    }

    /// End the round early. The pending throw is dropped unscored and
    /// `on_round_complete` is not called.
    pub fn stop(&mut self) {
        if !self.state.status.is_active() {
            return;
        }
        self.in_flight = None;
        self.ball_position = self.config.launch_origin;
        self.state.status = RoundStatus::Complete;
        self.completion_fired = true;
        log::info!("Round stopped with score {}", self.state.score);
        self.emit(RoundEvent::RoundStopped {
            score: self.state.score,
        });
    }

    /// Back to Idle with no round state. Callbacks and sinks stay attached.
    pub fn reset(&mut self) {
        self.state = RoundState::default();
        self.in_flight = None;
        self.ball_position = self.config.launch_origin;
        self.clock = RoundClock::default();
        self.throws_launched = 0;
        self.next_throw_at_ms = 0.0;
        self.completion_fired = false;
    }

    /// Advance the round to wall-clock time `now_ms`
    pub fn tick(&mut self, now_ms: f64) {
        if self.state.status != RoundStatus::Running {
            return;
        }

        let now = self.clock.advance(now_ms);
        self.keeper_position = self.keeper.current_keeper_position();

        if self.in_flight.is_none()
            && self.throws_launched < self.config.throws_total
            && now >= self.next_throw_at_ms
        {
            self.launch(now);
        }

        if self.in_flight.is_some() {
            self.advance_throw(now);
        }
    }

    fn launch(&mut self, now: f64) {
        let target = self.config.target_bounds.sample(self.rng.as_mut());
        let throw = Throw {
            index: self.throws_launched,
            start: self.config.launch_origin,
            target,
            duration_ms: self.config.throw_duration_ms,
            started_at_ms: now,
        };
        self.throws_launched += 1;

        // Hold the cadence unless a late throw pushed us past the next slot
        let next = self.next_throw_at_ms + self.config.interval_ms;
        self.next_throw_at_ms = if next > now { next } else { now + self.config.interval_ms };

        self.ball_position = throw.start;
        self.in_flight = Some(InFlight {
            throw,
            resolved: false,
        });
        log::debug!("Throw {} launched toward {:?}", throw.index, throw.target);
        self.emit(RoundEvent::ThrowLaunched {
            throw_index: throw.index,
        });
    }

    fn advance_throw(&mut self, now: f64) {
        let Some(flight) = self.in_flight else { return };
        if flight.resolved {
            return;
        }

        let throw = flight.throw;
        self.ball_position = throw.position_at(now, &self.config.easing);
        let distance = self.ball_position.distance(self.keeper_position);

        if distance < self.config.catch_radius {
            self.resolve(true, distance);
        } else if throw.is_finished(now) {
            self.resolve(false, distance);
            self.ball_position = throw.start;
        }
    }

    fn resolve(&mut self, caught: bool, distance: f32) {
        let Some(flight) = self.in_flight.as_mut() else { return };
        if flight.resolved {
            return;
        }
        flight.resolved = true;
        let throw_index = flight.throw.index;
        self.in_flight = None;

        self.state.throws_remaining = self.state.throws_remaining.saturating_sub(1);
        if caught {
            self.state.score = (self.state.score + 1).min(self.state.throws_total);
            let event = CatchEvent {
                throw_index,
                distance_at_catch: distance,
            };
            for callback in self.on_catch.iter_mut() {
                callback(&event);
            }
        }

        let resolved = ThrowResolved {
            throw_index,
            caught,
            distance,
        };
        log::debug!(
            "Throw {} {} at distance {:.2}",
            throw_index,
            if caught { "saved" } else { "conceded" },
            distance
        );
        for callback in self.on_resolved.iter_mut() {
            callback(&resolved);
        }
        self.emit(RoundEvent::ThrowResolved(resolved));

        if self.state.throws_remaining == 0 {
            self.complete();
        }
    }

    fn complete(&mut self) {
        self.state.status = RoundStatus::Complete;
        if self.completion_fired {
            return;
        }
        self.completion_fired = true;

        let score = self.state.score;
        log::info!("Round complete: {}/{}", score, self.state.throws_total);
        for callback in self.on_complete.iter_mut() {
            callback(score);
        }
        self.emit(RoundEvent::RoundComplete {
            score,
            throws_total: self.state.throws_total,
        });
    }

    fn emit(&mut self, event: RoundEvent) {
        broadcast(&mut self.sinks, &event);
    }

    // === Accessors ===

    pub fn state(&self) -> RoundState {
        self.state
    }

    pub fn status(&self) -> RoundStatus {
        self.state.status
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn config(&self) -> &RoundConfig {
        &self.config
    }

    pub fn ball_position(&self) -> Vec3 {
        self.ball_position
    }

    /// Keeper position as last read by `tick`
    pub fn keeper_position(&self) -> Vec3 {
        self.keeper_position
    }

    pub fn active_throw(&self) -> Option<Throw> {
        self.in_flight.map(|f| f.throw)
    }

    /// Progress of the in-flight throw, if any
    pub fn throw_progress(&self) -> Option<f32> {
        self.in_flight
            .map(|f| f.throw.progress(self.clock.elapsed_ms))
    }

    /// Milliseconds of unpaused play this round
    pub fn round_time_ms(&self) -> f64 {
        self.clock.elapsed_ms
    }

    pub fn throws_launched(&self) -> u32 {
        self.throws_launched
    }
}
