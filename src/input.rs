//! Keeper position sources
//!
//! The round only ever reads the keeper position, once per tick. Hosts write
//! it from device-orientation events, face tracking, or a script.

use std::cell::Cell;
use std::rc::Rc;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::GameError;
use crate::normalize_tilt;

/// Anything that can report where the keeper's glove is right now
pub trait KeeperInput {
    fn current_keeper_position(&self) -> Vec3;
}

/// Keeper that never moves
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedKeeper(pub Vec3);

impl Default for FixedKeeper {
    fn default() -> Self {
        Self(KEEPER_DEFAULT)
    }
}

impl KeeperInput for FixedKeeper {
    fn current_keeper_position(&self) -> Vec3 {
        self.0
    }
}

/// Shared single-threaded cell: one writer (the input host), one reader
/// (the round). Clones share the same position.
#[derive(Debug, Clone)]
pub struct KeeperHandle(Rc<Cell<Vec3>>);

impl Default for KeeperHandle {
    fn default() -> Self {
        Self::new(KEEPER_DEFAULT)
    }
}

impl KeeperHandle {
    pub fn new(pos: Vec3) -> Self {
        Self(Rc::new(Cell::new(pos)))
    }

    pub fn set(&self, pos: Vec3) {
        self.0.set(pos);
    }

    pub fn get(&self) -> Vec3 {
        self.0.get()
    }
}

impl KeeperInput for KeeperHandle {
    fn current_keeper_position(&self) -> Vec3 {
        self.get()
    }
}

/// How far device tilt can move the glove
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeeperReach {
    /// Glove rest position
    pub center: Vec3,
    /// Sideways travel either side of center
    pub reach_x: f32,
    /// Vertical travel either side of center
    pub reach_y: f32,
    /// Tilt (degrees) that reaches full travel
    pub full_tilt_degrees: f32,
    /// Front/back tilt (beta) that counts as level; ~90 when held upright
    pub neutral_beta: f32,
    /// Face anchor position that maps to the glove rest position
    pub face_neutral: Vec3,
    /// Face anchor offset that reaches full travel
    pub full_face_offset: f32,
}

impl Default for KeeperReach {
    fn default() -> Self {
        Self {
            center: KEEPER_DEFAULT,
            reach_x: KEEPER_REACH_X,
            reach_y: KEEPER_REACH_Y,
            full_tilt_degrees: FULL_TILT_DEGREES,
            neutral_beta: 90.0,
            face_neutral: Vec3::ZERO,
            full_face_offset: FULL_FACE_OFFSET,
        }
    }
}

/// Glove model loading progress
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ModelState {
    #[default]
    Loading,
    Loaded,
    Failed(GameError),
}

/// Device-orientation driven glove.
///
/// Orientation events are ignored until the glove model has loaded; if it
/// never does, the keeper stays at its rest position and play continues.
#[derive(Debug, Clone)]
pub struct OrientationInput {
    reach: KeeperReach,
    model: ModelState,
    /// Glove rotation (radians) for the renderer
    rotation: Vec3,
    output: KeeperHandle,
}

impl OrientationInput {
    pub fn new(reach: KeeperReach) -> Self {
        Self {
            reach,
            model: ModelState::Loading,
            rotation: Vec3::ZERO,
            output: KeeperHandle::new(reach.center),
        }
    }

    /// Reader side, to hand to a `RoundController`
    pub fn handle(&self) -> KeeperHandle {
        self.output.clone()
    }

    pub fn model_state(&self) -> &ModelState {
        &self.model
    }

    pub fn mark_model_loaded(&mut self) {
        self.model = ModelState::Loaded;
    }

    /// Record a failed glove load. The keeper stays at rest.
    pub fn mark_model_failed(&mut self, reason: impl Into<String>) {
        let err = GameError::AssetLoad(reason.into());
        log::warn!("Glove model unavailable, keeper stays at rest: {}", err);
        self.output.set(self.reach.center);
        self.model = ModelState::Failed(err);
    }

    /// Apply a `deviceorientation` reading (degrees). Missing angles read as 0.
    pub fn handle_orientation(&mut self, alpha: Option<f32>, beta: Option<f32>, gamma: Option<f32>) {
        if self.model != ModelState::Loaded {
            return;
        }
        let alpha = alpha.unwrap_or(0.0);
        let beta = beta.unwrap_or(0.0);
        let gamma = gamma.unwrap_or(0.0);

        self.rotation = Vec3::new(beta.to_radians(), alpha.to_radians(), -gamma.to_radians());

        let reach = &self.reach;
        let dx = normalize_tilt(gamma, reach.full_tilt_degrees) * reach.reach_x;
        let dy = normalize_tilt(beta - reach.neutral_beta, reach.full_tilt_degrees) * reach.reach_y;
        self.output.set(reach.center + Vec3::new(dx, dy, 0.0));
    }

    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    pub fn position(&self) -> Vec3 {
        self.output.get()
    }
}

impl KeeperInput for OrientationInput {
    fn current_keeper_position(&self) -> Vec3 {
        self.output.get()
    }
}

/// Face-tracking driven glove.
///
/// Each pose is the tracked face anchor position. Its offset from
/// `face_neutral` moves the glove across the reach box; losing the face
/// puts the glove back at rest until tracking returns.
#[derive(Debug, Clone)]
pub struct FaceInput {
    reach: KeeperReach,
    tracking: bool,
    output: KeeperHandle,
}

impl FaceInput {
    pub fn new(reach: KeeperReach) -> Self {
        Self::with_handle(reach, KeeperHandle::new(reach.center))
    }

    /// Write into an existing handle, e.g. one an `OrientationInput` also drives
    pub fn with_handle(reach: KeeperReach, output: KeeperHandle) -> Self {
        Self {
            reach,
            tracking: false,
            output,
        }
    }

    /// Reader side, to hand to a `RoundController`
    pub fn handle(&self) -> KeeperHandle {
        self.output.clone()
    }

    pub fn is_tracking(&self) -> bool {
        self.tracking
    }

    /// Apply an anchor pose, `None` when the face is lost
    pub fn handle_pose(&mut self, anchor: Option<Vec3>) {
        let Some(anchor) = anchor.filter(|a| a.is_finite()) else {
            if self.tracking {
                log::debug!("Face lost, glove back at rest");
            }
            self.tracking = false;
            self.output.set(self.reach.center);
            return;
        };
        if !self.tracking {
            log::debug!("Face found");
        }
        self.tracking = true;

        let reach = &self.reach;
        let offset = anchor - reach.face_neutral;
        let dx = normalize_tilt(offset.x, reach.full_face_offset) * reach.reach_x;
        let dy = normalize_tilt(offset.y, reach.full_face_offset) * reach.reach_y;
        self.output.set(reach.center + Vec3::new(dx, dy, 0.0));
    }

    pub fn position(&self) -> Vec3 {
        self.output.get()
    }
}

impl KeeperInput for FaceInput {
    fn current_keeper_position(&self) -> Vec3 {
        self.output.get()
    }
}
