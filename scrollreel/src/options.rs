use alloc::sync::Arc;

use crate::engine::Engine;
use crate::{DEFAULT_SPEED, DEFAULT_VISIBILITY_THRESHOLD, Direction, ThresholdTable};

/// A callback fired when an observable engine value changes.
///
/// Observable values are `active_index`, `carousel_offset`, `visible`, and `direction`.
pub type OnChangeCallback = Arc<dyn Fn(&Engine) + Send + Sync>;

/// Configuration for [`crate::Engine`].
///
/// This type is designed to be cheap to clone: the callback is stored in an `Arc` so hosts can
/// update a few fields and call `Engine::set_options` without reallocating closures.
pub struct EngineOptions {
    /// Number of narrative items. Used to build an evenly spaced threshold table when
    /// `thresholds` is `None`.
    pub item_count: usize,

    /// Explicit threshold table. Overrides `item_count` for index resolution.
    pub thresholds: Option<ThresholdTable>,

    /// Marquee speed in units per second.
    pub speed: f64,

    /// Intersection ratio above which the marquee section is considered visible.
    pub visibility_threshold: f64,

    /// Marquee direction before any gesture.
    pub initial_direction: Direction,

    /// Initial marquee position.
    pub initial_offset: f64,

    /// Enables/disables the engine. When disabled, the index is 0, the marquee does not
    /// advance, and gestures are ignored.
    pub enabled: bool,

    /// Optional callback fired when an observable value changes.
    pub on_change: Option<OnChangeCallback>,
}

impl Clone for EngineOptions {
    fn clone(&self) -> Self {
        Self {
            item_count: self.item_count,
            thresholds: self.thresholds.clone(),
            speed: self.speed,
            visibility_threshold: self.visibility_threshold,
            initial_direction: self.initial_direction,
            initial_offset: self.initial_offset,
            enabled: self.enabled,
            on_change: self.on_change.clone(),
        }
    }
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self::new(0)
    }
}

impl EngineOptions {
    /// Creates options for `item_count` evenly spaced narrative items.
    pub fn new(item_count: usize) -> Self {
        Self {
            item_count,
            thresholds: None,
            speed: DEFAULT_SPEED,
            visibility_threshold: DEFAULT_VISIBILITY_THRESHOLD,
            initial_direction: Direction::default(),
            initial_offset: 0.0,
            enabled: true,
            on_change: None,
        }
    }

    /// Creates options from an explicit threshold table.
    pub fn with_table(thresholds: ThresholdTable) -> Self {
        let mut options = Self::new(thresholds.len());
        options.thresholds = Some(thresholds);
        options
    }

    pub fn with_item_count(mut self, item_count: usize) -> Self {
        self.item_count = item_count;
        self
    }

    pub fn with_thresholds(mut self, thresholds: Option<ThresholdTable>) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_visibility_threshold(mut self, visibility_threshold: f64) -> Self {
        self.visibility_threshold = visibility_threshold;
        self
    }

    pub fn with_initial_direction(mut self, direction: Direction) -> Self {
        self.initial_direction = direction;
        self
    }

    pub fn with_initial_offset(mut self, offset: f64) -> Self {
        self.initial_offset = offset;
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_on_change(
        mut self,
        on_change: Option<impl Fn(&Engine) + Send + Sync + 'static>,
    ) -> Self {
        self.on_change = on_change.map(|f| Arc::new(f) as _);
        self
    }

    /// The table used for index resolution: the explicit one, or an even split of
    /// `item_count`.
    pub(crate) fn resolved_table(&self) -> ThresholdTable {
        match &self.thresholds {
            Some(t) => t.clone(),
            None => ThresholdTable::uniform(self.item_count),
        }
    }
}

impl core::fmt::Debug for EngineOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EngineOptions")
            .field("item_count", &self.item_count)
            .field("thresholds", &self.thresholds)
            .field("speed", &self.speed)
            .field("visibility_threshold", &self.visibility_threshold)
            .field("initial_direction", &self.initial_direction)
            .field("initial_offset", &self.initial_offset)
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}
