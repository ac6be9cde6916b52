//! Platform abstraction layer
//!
//! Browser bindings for hosting a round inside a page that owns the AR
//! camera and the 3D scene:
//! - `WebRound`: the round controller exported to JavaScript
//! - `DomTextSink`: HUD text written into page elements

#[cfg(target_arch = "wasm32")]
pub mod dom;
#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(target_arch = "wasm32")]
pub use dom::DomTextSink;
#[cfg(target_arch = "wasm32")]
pub use web::WebRound;
