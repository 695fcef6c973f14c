//! A headless engine for scroll-synchronized narrative sections.
//!
//! For host wiring (frame scheduling, visibility and gesture subscriptions), see the
//! `scrollreel-adapter` crate.
//!
//! This crate focuses on two small pieces of state that a presentation layer needs every
//! frame:
//! - a discrete "active item" index derived from how far the document has scrolled through a
//!   bound region, with inclusive threshold boundaries so the index never flickers exactly at a
//!   crossing
//! - a free-running looping marquee offset whose direction is steered by wheel/touch gestures,
//!   with gesture sampling gated by on-screen visibility
//!
//! It is UI-agnostic. A host layer is expected to provide:
//! - scroll offset and the narrative region's geometry
//! - an intersection ratio for the marquee section
//! - wheel/touch gestures
//! - one `tick(now_ms)` per display frame
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod engine;
mod gate;
mod integrator;
mod options;
mod progress;
mod sampler;
mod state;
mod thresholds;
mod types;


pub use engine::Engine;
pub use gate::{DEFAULT_VISIBILITY_THRESHOLD, GateTransition, VisibilityGate};
pub use integrator::{DEFAULT_SPEED, LoopIntegrator, wrap_position};
pub use options::{EngineOptions, OnChangeCallback};
pub use progress::ScrollProgressTracker;
pub use sampler::GestureSampler;
pub use state::{MarqueeState, SceneState};
pub use thresholds::{ThresholdError, ThresholdTable};
pub use types::{Direction, GateState, ScrollRegion};
