use crate::{Direction, GateState};

/// A lightweight, serializable snapshot of the marquee.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarqueeState {
    pub position: f64,
    pub direction: Direction,
}

/// Everything a presentation layer reads from the engine in one frame.
///
/// This is useful for handing state across a render boundary without holding a borrow of the
/// engine.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SceneState {
    pub active_index: usize,
    pub progress: f64,
    pub carousel_offset: f64,
    pub visible: bool,
    pub gate: GateState,
    pub direction: Direction,
}
