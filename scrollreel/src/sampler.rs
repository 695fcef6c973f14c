use crate::Direction;

/// Converts wheel and touch gestures into a marquee [`Direction`].
///
/// The sampler itself is not gated; callers only feed it while the visibility gate is open.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GestureSampler {
    direction: Direction,
    last_touch_y: Option<f64>,
}

impl GestureSampler {
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            last_touch_y: None,
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    pub fn last_touch_y(&self) -> Option<f64> {
        self.last_touch_y
    }

    /// A downward wheel gesture (`delta_y > 0`) steers `Backward`; anything else `Forward`.
    pub fn wheel(&mut self, delta_y: f64) -> Direction {
        self.direction = if delta_y > 0.0 {
            Direction::Backward
        } else {
            Direction::Forward
        };
        self.direction
    }

    /// Starts a touch sequence. The reference Y is reset; direction is untouched.
    pub fn touch_start(&mut self, y: f64) {
        self.last_touch_y = Some(y);
    }

    /// Feeds a touch move. Returns the new direction, or `None` when no sequence is in progress.
    pub fn touch_move(&mut self, y: f64) -> Option<Direction> {
        let last = self.last_touch_y?;
        let delta = y - last;
        self.direction = if delta > 0.0 {
            Direction::Forward
        } else {
            Direction::Backward
        };
        self.last_touch_y = Some(y);
        Some(self.direction)
    }

    pub fn touch_end(&mut self) {
        self.last_touch_y = None;
    }
}
