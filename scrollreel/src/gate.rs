use crate::GateState;

/// Intersection ratio above which a section counts as visible.
pub const DEFAULT_VISIBILITY_THRESHOLD: f64 = 0.1;

/// A gate state change reported by [`VisibilityGate::observe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateTransition {
    /// Gesture listeners should be registered.
    Activated,
    /// Gesture listeners should be deregistered.
    Deactivated,
}

/// Tracks whether a region is sufficiently on-screen for gesture sampling.
///
/// The gate only controls gesture sampling. It never pauses the marquee integrator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisibilityGate {
    state: GateState,
    threshold: f64,
}

impl Default for VisibilityGate {
    fn default() -> Self {
        Self::new(DEFAULT_VISIBILITY_THRESHOLD)
    }
}

impl VisibilityGate {
    pub fn new(threshold: f64) -> Self {
        Self {
            state: GateState::Inactive,
            threshold,
        }
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn set_threshold(&mut self, threshold: f64) {
        self.threshold = threshold;
    }

    /// Feeds an observed intersection ratio.
    ///
    /// The gate opens while `ratio > threshold` and closes at or below it. A NaN ratio counts as
    /// not visible. Returns the transition, if any.
    pub fn observe(&mut self, ratio: f64) -> Option<GateTransition> {
        let next = if ratio > self.threshold {
            GateState::Active
        } else {
            GateState::Inactive
        };
        if next == self.state {
            return None;
        }
        self.state = next;
        let transition = match next {
            GateState::Active => GateTransition::Activated,
            GateState::Inactive => GateTransition::Deactivated,
        };
        rtrace!(ratio, ?transition, "VisibilityGate::observe");
        Some(transition)
    }

    /// Forces the gate closed (e.g. on teardown). Returns `Deactivated` if it was open.
    pub fn close(&mut self) -> Option<GateTransition> {
        if !self.is_active() {
            return None;
        }
        self.state = GateState::Inactive;
        Some(GateTransition::Deactivated)
    }
}
