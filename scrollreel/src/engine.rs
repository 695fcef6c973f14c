use alloc::sync::Arc;
use core::cell::Cell;

use crate::{
    Direction, EngineOptions, GateState, GateTransition, GestureSampler, LoopIntegrator,
    MarqueeState, SceneState, ScrollProgressTracker, ScrollRegion, ThresholdTable,
    VisibilityGate,
};

/// The values the `on_change` hook is keyed on.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Observed {
    active_index: usize,
    carousel_offset: f64,
    visible: bool,
    direction: Direction,
}

/// A headless scroll-narrative engine.
///
/// This type is intentionally UI-agnostic:
/// - It does not hold any UI objects.
/// - Your host drives it by providing scroll geometry, intersection ratios, gestures and frame
///   timestamps.
/// - Rendering reads `active_index`, `carousel_offset` and `visible` (or a [`SceneState`]).
///
/// All inputs degrade instead of failing: missing or degenerate geometry yields progress 0 and
/// index 0, and an unknown loop length skips the marquee wrap.
///
/// For subscription management against a real host, see the `scrollreel-adapter` crate.
#[derive(Clone, Debug)]
pub struct Engine {
    options: EngineOptions,
    table: ThresholdTable,
    tracker: ScrollProgressTracker,
    active_index: usize,
    gate: VisibilityGate,
    sampler: GestureSampler,
    integrator: LoopIntegrator,
    torn_down: bool,

    last_observed: Cell<Observed>,
    notify_depth: Cell<usize>,
    notify_pending: Cell<bool>,
}

impl Engine {
    /// Creates a new engine from options.
    ///
    /// The engine starts with no scroll region (progress 0), the gate closed, and an unknown
    /// loop length.
    pub fn new(options: EngineOptions) -> Self {
        let table = options.resolved_table();
        rdebug!(
            items = table.len(),
            speed = options.speed,
            visibility_threshold = options.visibility_threshold,
            enabled = options.enabled,
            "Engine::new"
        );
        let mut integrator = LoopIntegrator::new(options.speed);
        integrator.set_position(options.initial_offset);
        let observed = Observed {
            active_index: 0,
            carousel_offset: integrator.position(),
            visible: false,
            direction: options.initial_direction,
        };
        Self {
            table,
            tracker: ScrollProgressTracker::new(),
            active_index: 0,
            gate: VisibilityGate::new(options.visibility_threshold),
            sampler: GestureSampler::new(options.initial_direction),
            integrator,
            torn_down: false,
            last_observed: Cell::new(observed),
            notify_depth: Cell::new(0),
            notify_pending: Cell::new(false),
            options,
        }
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: EngineOptions) {
        let table_changed = options.thresholds != self.options.thresholds
            || (options.thresholds.is_none() && options.item_count != self.options.item_count);
        self.options = options;
        rtrace!(
            items = self.options.item_count,
            speed = self.options.speed,
            enabled = self.options.enabled,
            "Engine::set_options"
        );

        if table_changed {
            self.table = self.options.resolved_table();
        }
        self.gate.set_threshold(self.options.visibility_threshold);
        self.integrator.set_speed(self.options.speed);
        if !self.options.enabled {
            self.integrator.reset_clock();
        }
        self.recompute_index();
        self.notify();
    }

    /// Clones the current options, applies `f`, then delegates to `set_options`.
    pub fn update_options(&mut self, f: impl FnOnce(&mut EngineOptions)) {
        let mut next = self.options.clone();
        f(&mut next);
        self.set_options(next);
    }

    pub fn set_on_change(
        &mut self,
        on_change: Option<impl Fn(&Engine) + Send + Sync + 'static>,
    ) {
        self.options.on_change = on_change.map(|f| Arc::new(f) as _);
    }

    fn observed(&self) -> Observed {
        Observed {
            active_index: self.active_index(),
            carousel_offset: self.carousel_offset(),
            visible: self.visible(),
            direction: self.direction(),
        }
    }

    fn notify_now(&self) {
        let observed = self.observed();
        if observed == self.last_observed.get() {
            return;
        }
        self.last_observed.set(observed);
        if let Some(cb) = &self.options.on_change {
            cb(self);
        }
    }

    fn notify(&self) {
        if self.notify_depth.get() > 0 {
            self.notify_pending.set(true);
            return;
        }
        self.notify_now();
    }

    /// Batches multiple updates into a single `on_change` notification.
    ///
    /// On a typical frame a host may apply a scroll offset, an intersection ratio and a tick
    /// together; batching fires the hook at most once.
    pub fn batch_update(&mut self, f: impl FnOnce(&mut Self)) {
        let depth = self.notify_depth.get();
        self.notify_depth.set(depth.saturating_add(1));

        f(self);

        let depth = self.notify_depth.get();
        debug_assert!(depth > 0, "notify_depth underflow");
        let next = depth.saturating_sub(1);
        self.notify_depth.set(next);

        if next == 0 && self.notify_pending.replace(false) {
            self.notify_now();
        }
    }

    pub fn enabled(&self) -> bool {
        self.options.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        if self.options.enabled == enabled {
            return;
        }
        self.options.enabled = enabled;
        self.integrator.reset_clock();
        self.recompute_index();
        self.notify();
    }

    /// Whether [`Self::teardown`] has been called.
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Stops the engine for good.
    ///
    /// After teardown the gate is closed, frames no longer advance the marquee, and scroll,
    /// visibility and gesture input is ignored. Returns `false` if already torn down.
    pub fn teardown(&mut self) -> bool {
        if self.torn_down {
            return false;
        }
        self.torn_down = true;
        self.gate.close();
        self.sampler.touch_end();
        self.integrator.reset_clock();
        rdebug!("Engine::teardown");
        self.notify();
        true
    }

    fn accepts_input(&self) -> bool {
        !self.torn_down && self.options.enabled
    }

    // Narrative index.

    pub fn item_count(&self) -> usize {
        self.table.len()
    }

    pub fn thresholds(&self) -> &ThresholdTable {
        &self.table
    }

    pub fn set_item_count(&mut self, item_count: usize) {
        if self.options.thresholds.is_none() && self.options.item_count == item_count {
            return;
        }
        self.options.item_count = item_count;
        self.options.thresholds = None;
        self.table = ThresholdTable::uniform(item_count);
        rdebug!(items = item_count, "Engine::set_item_count");
        self.recompute_index();
        self.notify();
    }

    /// Replaces the threshold table. `None` falls back to an even split of `item_count`.
    pub fn set_thresholds(&mut self, thresholds: Option<ThresholdTable>) {
        if let Some(t) = &thresholds {
            self.options.item_count = t.len();
        }
        self.options.thresholds = thresholds;
        self.table = self.options.resolved_table();
        rdebug!(items = self.table.len(), "Engine::set_thresholds");
        self.recompute_index();
        self.notify();
    }

    pub fn scroll_region(&self) -> Option<ScrollRegion> {
        self.tracker.region()
    }

    pub fn scroll_offset(&self) -> f64 {
        self.tracker.scroll_offset()
    }

    /// Normalized progress through the scroll region, in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        self.tracker.progress()
    }

    /// The current narrative item. Always 0 while disabled or when there are no items.
    pub fn active_index(&self) -> usize {
        self.active_index
    }

    /// Rebinds the narrative region (layout/resize). `None` means layout is unavailable.
    pub fn set_scroll_region(&mut self, region: Option<ScrollRegion>) {
        if self.torn_down {
            return;
        }
        if self.tracker.set_region(region) {
            self.recompute_index();
        }
        self.notify();
    }

    /// Applies a scroll offset update from the host.
    pub fn set_scroll_offset(&mut self, scroll_offset: f64) {
        if self.torn_down {
            return;
        }
        if self.tracker.set_scroll_offset(scroll_offset) {
            self.recompute_index();
        }
        self.notify();
    }

    /// Applies region geometry and scroll offset in a single coalesced update.
    pub fn apply_scroll_frame(&mut self, region: Option<ScrollRegion>, scroll_offset: f64) {
        rtrace!(scroll_offset, "apply_scroll_frame");
        self.batch_update(|e| {
            e.set_scroll_region(region);
            e.set_scroll_offset(scroll_offset);
        });
    }

    fn recompute_index(&mut self) {
        let next = if self.options.enabled {
            self.table.resolve(self.tracker.progress())
        } else {
            0
        };
        if next != self.active_index {
            rtrace!(
                from = self.active_index,
                to = next,
                progress = self.tracker.progress(),
                "active index changed"
            );
            self.active_index = next;
        }
    }

    // Visibility gate.

    pub fn gate_state(&self) -> GateState {
        self.gate.state()
    }

    pub fn visible(&self) -> bool {
        self.gate.is_active()
    }

    /// Feeds an intersection ratio for the marquee section.
    ///
    /// Returns the gate transition so the host can register or deregister gesture listeners.
    pub fn observe_visibility(&mut self, ratio: f64) -> Option<GateTransition> {
        if self.torn_down {
            return None;
        }
        let transition = self.gate.observe(ratio);
        if transition.is_some() {
            rdebug!(ratio, ?transition, "gate transition");
            self.notify();
        }
        transition
    }

    // Gestures. All of these are no-ops while the gate is closed.

    pub fn direction(&self) -> Direction {
        self.sampler.direction()
    }

    fn gestures_open(&self) -> bool {
        self.accepts_input() && self.gate.is_active()
    }

    /// Applies a wheel gesture. Returns `true` if it was sampled.
    pub fn on_wheel(&mut self, delta_y: f64) -> bool {
        if !self.gestures_open() {
            return false;
        }
        self.sampler.wheel(delta_y);
        self.notify();
        true
    }

    /// Starts a touch sequence. Returns `true` if it was sampled.
    pub fn on_touch_start(&mut self, y: f64) -> bool {
        if !self.gestures_open() {
            return false;
        }
        self.sampler.touch_start(y);
        true
    }

    /// Applies a touch move. Returns `true` if it changed the sampled direction state.
    pub fn on_touch_move(&mut self, y: f64) -> bool {
        if !self.gestures_open() {
            return false;
        }
        let sampled = self.sampler.touch_move(y).is_some();
        if sampled {
            self.notify();
        }
        sampled
    }

    /// Ends a touch sequence. Returns `true` if it was sampled.
    pub fn on_touch_end(&mut self) -> bool {
        if !self.gestures_open() {
            return false;
        }
        self.sampler.touch_end();
        true
    }

    // Marquee.

    /// The marquee position, in `[-loop_length, 0)` once the loop length is known.
    pub fn carousel_offset(&self) -> f64 {
        self.integrator.position()
    }

    pub fn loop_length(&self) -> f64 {
        self.integrator.loop_length()
    }

    pub fn speed(&self) -> f64 {
        self.integrator.speed()
    }

    pub fn set_speed(&mut self, speed: f64) {
        if self.torn_down {
            return;
        }
        self.options.speed = speed;
        self.integrator.set_speed(speed);
    }

    pub fn set_visibility_threshold(&mut self, threshold: f64) {
        if self.torn_down {
            return;
        }
        self.options.visibility_threshold = threshold;
        self.gate.set_threshold(threshold);
    }

    /// Sets the loop length directly. Non-positive values mean "layout not ready".
    pub fn set_loop_length(&mut self, loop_length: f64) {
        if self.torn_down {
            return;
        }
        self.integrator.set_loop_length(loop_length);
    }

    /// Sets the loop length from the measured extent of the duplicated track.
    pub fn set_track_extent(&mut self, extent: Option<f64>) {
        if self.torn_down {
            return;
        }
        self.integrator.set_track_extent(extent);
    }

    /// Advances the marquee to frame time `now_ms`.
    ///
    /// The marquee advances whether or not the gate is open. Returns `None` after teardown.
    pub fn tick(&mut self, now_ms: f64) -> Option<f64> {
        if self.torn_down {
            return None;
        }
        if !self.options.enabled {
            return Some(self.carousel_offset());
        }
        let direction = self.sampler.direction();
        let position = self.integrator.tick(now_ms, direction);
        self.notify();
        Some(position)
    }

    /// Advances the marquee by an explicit time step.
    ///
    /// Like [`Self::tick`], but for hosts that track frame deltas themselves.
    pub fn advance(&mut self, dt_secs: f64) -> Option<f64> {
        if self.torn_down {
            return None;
        }
        if !self.options.enabled {
            return Some(self.carousel_offset());
        }
        let direction = self.sampler.direction();
        let position = self.integrator.step(dt_secs, direction);
        self.notify();
        Some(position)
    }

    // Snapshots.

    pub fn marquee_state(&self) -> MarqueeState {
        MarqueeState {
            position: self.carousel_offset(),
            direction: self.direction(),
        }
    }

    /// Restores a previously captured marquee snapshot.
    ///
    /// The next frame integrates nothing, so a restore never causes a jump.
    pub fn restore_marquee_state(&mut self, state: MarqueeState) {
        if self.torn_down {
            return;
        }
        self.integrator.set_position(state.position);
        self.integrator.reset_clock();
        self.sampler.set_direction(state.direction);
        self.notify();
    }

    pub fn scene_state(&self) -> SceneState {
        SceneState {
            active_index: self.active_index(),
            progress: self.progress(),
            carousel_offset: self.carousel_offset(),
            visible: self.visible(),
            gate: self.gate_state(),
            direction: self.direction(),
        }
    }
}
