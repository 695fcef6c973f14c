use crate::Direction;

/// Default marquee speed in units per second.
pub const DEFAULT_SPEED: f64 = 80.0;

/// Renormalizes `position` into `[-loop_length, 0)`.
///
/// A position within one loop of the range needs at most one correction (`+loop_length` at or
/// below `-loop_length`, `-loop_length` at or above 0). Larger jumps are reduced modulo the
/// loop. A `loop_length` that is not a positive finite number leaves `position` untouched.
pub fn wrap_position(position: f64, loop_length: f64) -> f64 {
    if loop_length <= 0.0 || !loop_length.is_finite() || !position.is_finite() {
        return position;
    }
    if position > -loop_length && position < 0.0 {
        return position;
    }
    let mut rem = position % loop_length;
    if rem < 0.0 {
        rem += loop_length;
    }
    let mut next = rem - loop_length;
    // Tiny negative remainders can round up to a full loop.
    if next >= 0.0 {
        next -= loop_length;
    }
    next
}

/// A free-running integrator that advances a looping marquee position every frame.
///
/// Frames are timestamped in milliseconds. The first frame after construction (or after
/// [`Self::reset_clock`]) integrates nothing; later frames integrate the elapsed time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LoopIntegrator {
    position: f64,
    speed: f64,
    loop_length: f64,
    last_frame_ms: Option<f64>,
}

impl Default for LoopIntegrator {
    fn default() -> Self {
        Self::new(DEFAULT_SPEED)
    }
}

impl LoopIntegrator {
    pub fn new(speed: f64) -> Self {
        Self {
            position: 0.0,
            speed,
            loop_length: 0.0,
            last_frame_ms: None,
        }
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    /// Sets the position directly and renormalizes it when the loop length is known.
    pub fn set_position(&mut self, position: f64) {
        self.position = wrap_position(position, self.loop_length);
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: f64) {
        self.speed = speed;
    }

    /// Current loop length; 0 while layout is unavailable.
    pub fn loop_length(&self) -> f64 {
        self.loop_length
    }

    /// Sets the loop length. Non-finite or negative values degrade to 0 (wrap skipped).
    pub fn set_loop_length(&mut self, loop_length: f64) {
        self.loop_length = if loop_length.is_finite() && loop_length > 0.0 {
            loop_length
        } else {
            if loop_length != 0.0 {
                rwarn!(loop_length, "invalid loop length, wrap disabled");
            }
            0.0
        };
    }

    /// Sets the loop length from the rendered extent of the duplicated track.
    ///
    /// The track holds two copies of its content back to back, so one loop is half of it.
    /// `None` means the track has not been laid out yet.
    pub fn set_track_extent(&mut self, extent: Option<f64>) {
        self.set_loop_length(extent.map_or(0.0, |e| e / 2.0));
    }

    /// Forgets the last frame timestamp so the next frame integrates nothing.
    pub fn reset_clock(&mut self) {
        self.last_frame_ms = None;
    }

    /// Advances by `dt_secs` in `direction` and returns the wrapped position.
    ///
    /// When the loop length is 0 the position still advances, unbounded.
    pub fn step(&mut self, dt_secs: f64, direction: Direction) -> f64 {
        let dt = if dt_secs.is_finite() && dt_secs > 0.0 {
            dt_secs
        } else {
            0.0
        };
        let next = self.position + self.speed * direction.sign() * dt;
        self.position = wrap_position(next, self.loop_length);
        self.position
    }

    /// Advances to frame time `now_ms` and returns the wrapped position.
    ///
    /// Timestamps that go backwards integrate nothing.
    pub fn tick(&mut self, now_ms: f64, direction: Direction) -> f64 {
        let dt_secs = match self.last_frame_ms {
            Some(last) => (now_ms - last) / 1000.0,
            None => 0.0,
        };
        self.last_frame_ms = Some(now_ms);
        self.step(dt_secs, direction)
    }
}
