/// Marquee travel direction.
///
/// `Backward` is the default: the marquee slides before any gesture has been seen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Forward,
    #[default]
    Backward,
}

impl Direction {
    /// `+1.0` for `Forward`, `-1.0` for `Backward`.
    pub fn sign(self) -> f64 {
        match self {
            Self::Forward => 1.0,
            Self::Backward => -1.0,
        }
    }
}

/// Visibility gate state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GateState {
    #[default]
    Inactive,
    Active,
}

impl GateState {
    pub fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}

/// The scroll offsets between which a narrative section is "in progress".
///
/// Offsets are absolute document scroll positions. A region is only meaningful when
/// `end > start`; a degenerate region yields progress 0.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollRegion {
    pub start: f64,
    pub end: f64,
}

impl ScrollRegion {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Binds a region to a target element so that progress is 0 when the target's top reaches
    /// the viewport top and 1 when the target's bottom reaches the viewport bottom.
    ///
    /// `target_top` is the target's absolute document offset. A target no taller than the
    /// viewport produces a degenerate region.
    pub fn from_target(target_top: f64, target_height: f64, viewport_height: f64) -> Self {
        Self {
            start: target_top,
            end: target_top + target_height - viewport_height,
        }
    }

    pub fn span(&self) -> f64 {
        self.end - self.start
    }

    pub fn is_degenerate(&self) -> bool {
        let span = self.span();
        !span.is_finite() || span <= 0.0 || !self.start.is_finite()
    }

    /// Normalized progress of `scroll_offset` through this region, clamped to `[0, 1]`.
    ///
    /// Degenerate regions and non-finite offsets resolve to 0.
    pub fn progress_at(&self, scroll_offset: f64) -> f64 {
        if self.is_degenerate() || !scroll_offset.is_finite() {
            return 0.0;
        }
        ((scroll_offset - self.start) / self.span()).clamp(0.0, 1.0)
    }
}
