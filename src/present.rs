//! Presentation sinks
//!
//! Sinks are best-effort: a sink that fails is logged and skipped, and the
//! round carries on. Nothing in the round ever depends on a sink succeeding.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::{GameError, Result};
use crate::round::RoundEvent;

/// Receives round events (HUD text, audio, confetti, ...)
pub trait PresentationSink {
    fn notify(&mut self, event: &RoundEvent) -> Result<()>;
}

/// Sink that drops everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl PresentationSink for NullSink {
    fn notify(&mut self, _event: &RoundEvent) -> Result<()> {
        Ok(())
    }
}

/// Lets the host keep reading a sink it handed to the round
impl<S: PresentationSink> PresentationSink for Rc<RefCell<S>> {
    fn notify(&mut self, event: &RoundEvent) -> Result<()> {
        self.try_borrow_mut()
            .map_err(|_| GameError::Presentation("sink is borrowed elsewhere".into()))?
            .notify(event)
    }
}

/// Deliver an event to every sink, swallowing failures
pub fn broadcast(sinks: &mut [Box<dyn PresentationSink>], event: &RoundEvent) {
    for sink in sinks.iter_mut() {
        if let Err(e) = sink.notify(event) {
            log::warn!("Dropped {:?} for a failing sink: {}", event, e);
        }
    }
}

/// One-shot effects for audio/confetti hosts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// Round start / end
    Whistle,
    /// Ball leaves the origin
    Kick,
    /// Keeper caught it
    Save,
    /// Ball got past
    Goal,
    /// Celebration burst on a save
    Confetti,
}

impl Cue {
    pub fn as_str(&self) -> &'static str {
        match self {
            Cue::Whistle => "whistle",
            Cue::Kick => "kick",
            Cue::Save => "save",
            Cue::Goal => "goal",
            Cue::Confetti => "confetti",
        }
    }

    pub fn is_sound(&self) -> bool {
        !matches!(self, Cue::Confetti)
    }
}

/// Text state of the on-screen HUD plus pending cues
#[derive(Debug, Clone)]
pub struct Hud {
    pub score_text: String,
    pub result_text: String,
    pub throws_left_text: String,
    pub game_over: bool,
    score: u32,
    throws_left: u32,
    sound: bool,
    confetti: bool,
    cues: Vec<Cue>,
}

impl Default for Hud {
    fn default() -> Self {
        Self::new(true, true)
    }
}

impl Hud {
    pub fn new(sound: bool, confetti: bool) -> Self {
        Self {
            score_text: Self::format_score(0),
            result_text: String::new(),
            throws_left_text: String::new(),
            game_over: false,
            score: 0,
            throws_left: 0,
            sound,
            confetti,
            cues: Vec::new(),
        }
    }

    fn format_score(score: u32) -> String {
        format!("Score: {}", score)
    }

    fn format_throws_left(left: u32) -> String {
        format!("Balls left: {}", left)
    }

    fn push(&mut self, cue: Cue) {
        let enabled = if cue.is_sound() { self.sound } else { self.confetti };
        if enabled {
            self.cues.push(cue);
        }
    }

    /// Take the cues queued since the last call
    pub fn drain_cues(&mut self) -> Vec<Cue> {
        std::mem::take(&mut self.cues)
    }
}

impl PresentationSink for Hud {
    fn notify(&mut self, event: &RoundEvent) -> Result<()> {
        match *event {
            RoundEvent::RoundStarted { throws_total } => {
                self.score = 0;
                self.throws_left = throws_total;
                self.score_text = Self::format_score(0);
                self.throws_left_text = Self::format_throws_left(throws_total);
                self.result_text.clear();
                self.game_over = false;
                self.push(Cue::Whistle);
            }
            RoundEvent::ThrowLaunched { .. } => {
                self.result_text.clear();
                self.push(Cue::Kick);
            }
            RoundEvent::ThrowResolved(resolved) => {
                self.throws_left = self.throws_left.saturating_sub(1);
                self.throws_left_text = Self::format_throws_left(self.throws_left);
                if resolved.caught {
                    self.score += 1;
                    self.score_text = Self::format_score(self.score);
                    self.result_text = "Saved!".to_string();
                    self.push(Cue::Save);
                    self.push(Cue::Confetti);
                } else {
                    self.result_text = "Goal!".to_string();
                    self.push(Cue::Goal);
                }
            }
            RoundEvent::Paused => self.result_text = "Paused".to_string(),
            RoundEvent::Resumed => self.result_text.clear(),
            RoundEvent::RoundComplete { score, throws_total } => {
                self.score_text = Self::format_score(score);
                self.result_text = format!("Game over! You saved {}/{}", score, throws_total);
                self.game_over = true;
                self.push(Cue::Whistle);
            }
            RoundEvent::RoundStopped { score } => {
                self.score_text = Self::format_score(score);
                self.result_text = "Round stopped".to_string();
                self.game_over = true;
            }
        }
        Ok(())
    }
}
