//! Round controller exported to the page
//!
//! The page keeps its own render loop (camera frame, tracker, 3D scene) and
//! calls `tick` once per animation frame, then copies `ball_position` and
//! `keeper_rotation` onto its scene objects.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;

use super::dom::DomTextSink;
use crate::clock::{Clock, SystemClock};
use crate::highscores::BestRounds;
use crate::input::{FaceInput, OrientationInput};
use crate::round::RoundController;
use crate::settings::Settings;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Keeper Catch loaded");
}

#[wasm_bindgen]
pub struct WebRound {
    controller: RoundController,
    orientation: OrientationInput,
    face: FaceInput,
    dom: Option<Rc<RefCell<DomTextSink>>>,
    settings: Settings,
    best: BestRounds,
    finished: Rc<Cell<Option<u32>>>,
}

#[wasm_bindgen]
impl WebRound {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebRound {
        let settings = Settings::load();
        let clock = SystemClock::new();
        let seed = settings.seed_or(clock.now_ms() as u64);
        log::info!("Round seed: {}", seed);

        let orientation = OrientationInput::new(settings.keeper);
        let face = FaceInput::with_handle(settings.keeper, orientation.handle());
        let mut controller = RoundController::with_seed(orientation.handle(), seed).with_clock(clock);

        let dom = match DomTextSink::new(settings.sound, settings.confetti) {
            Ok(sink) => {
                let sink = Rc::new(RefCell::new(sink));
                controller.add_sink(sink.clone());
                Some(sink)
            }
            Err(e) => {
                log::warn!("HUD disabled: {}", e);
                None
            }
        };

        let finished = Rc::new(Cell::new(None));
        let slot = finished.clone();
        controller.on_round_complete(move |score| slot.set(Some(score)));

        WebRound {
            controller,
            orientation,
            face,
            dom,
            settings,
            best: BestRounds::load(),
            finished,
        }
    }

    /// Start a round with the stored settings
    pub fn start(&mut self) -> Result<(), JsValue> {
        self.controller
            .start(self.settings.round.clone())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn pause(&mut self) {
        self.controller.pause();
    }

    pub fn resume(&mut self) {
        self.controller.resume();
    }

    pub fn stop(&mut self) {
        self.controller.stop();
    }

    /// Advance to `now_ms`, the page's `performance.now()`. Pause and resume
    /// read the same clock.
    pub fn tick(&mut self, now_ms: f64) {
        self.controller.tick(now_ms);

        if let Some(score) = self.finished.take() {
            let throws_total = self.controller.state().throws_total;
            if let Some(rank) = self.best.add_round(score, throws_total, js_sys::Date::now()) {
                log::info!("New best round #{}: {}/{}", rank, score, throws_total);
                self.best.save();
            }
        }
    }

    /// Forward a `deviceorientation` event
    pub fn handle_orientation(&mut self, alpha: Option<f32>, beta: Option<f32>, gamma: Option<f32>) {
        self.orientation.handle_orientation(alpha, beta, gamma);
    }

    /// Forward a tracked face anchor position
    pub fn handle_face_pose(&mut self, x: f32, y: f32, z: f32) {
        self.face.handle_pose(Some(glam::Vec3::new(x, y, z)));
    }

    /// The tracker lost the face
    pub fn face_lost(&mut self) {
        self.face.handle_pose(None);
    }

    pub fn model_loaded(&mut self) {
        self.orientation.mark_model_loaded();
    }

    pub fn model_failed(&mut self, reason: String) {
        self.orientation.mark_model_failed(reason);
    }

    pub fn ball_position(&self) -> Vec<f32> {
        self.controller.ball_position().to_array().to_vec()
    }

    pub fn keeper_position(&self) -> Vec<f32> {
        self.orientation.position().to_array().to_vec()
    }

    /// Glove rotation in radians (x, y, z)
    pub fn keeper_rotation(&self) -> Vec<f32> {
        self.orientation.rotation().to_array().to_vec()
    }

    pub fn score(&self) -> u32 {
        self.controller.score()
    }

    pub fn is_complete(&self) -> bool {
        self.controller.status() == crate::round::RoundStatus::Complete
    }

    pub fn best_score(&self) -> Option<u32> {
        self.best.top().map(|r| r.score)
    }

    /// Sound/confetti cues since the last call, by name
    pub fn drain_cues(&mut self) -> Vec<String> {
        let Some(dom) = &self.dom else {
            return Vec::new();
        };
        match dom.try_borrow_mut() {
            Ok(mut sink) => sink.drain_cues().iter().map(|c| c.as_str().to_string()).collect(),
            Err(_) => Vec::new(),
        }
    }
}

impl Default for WebRound {
    fn default() -> Self {
        Self::new()
    }
}
