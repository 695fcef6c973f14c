use scrollreel::{Engine, EngineOptions, GateTransition, SceneState};

use crate::{FrameHandle, Host, HostEvent, Subscriptions};

/// Where a [`Controller`] is in its mount lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Lifecycle {
    /// Created but not yet mounted; no listeners are registered.
    #[default]
    Idle,
    Mounted,
    /// Unmounted for good. The engine is torn down and every subscription is released.
    Unmounted,
}

/// A framework-neutral controller that owns a `scrollreel::Engine` and its host subscriptions.
///
/// This type does not hold any UI objects. Hosts drive it by:
/// - calling `mount()` once the section is in the document
/// - forwarding native events through `handle(event)` (or the `on_*` methods)
/// - calling `unmount()` when the section goes away (dropping the controller also unmounts)
///
/// Gesture listeners are attached only while the engine's visibility gate is open. The frame
/// loop keeps running regardless of the gate.
///
/// Changes made through `engine_mut()` are reconciled on the next event: a new visibility
/// threshold re-registers the host observer, and a torn-down engine unmounts the controller.
#[derive(Debug)]
pub struct Controller<H: Host> {
    engine: Engine,
    host: H,
    subs: Subscriptions,
    lifecycle: Lifecycle,
    /// The threshold the host observer was registered with.
    observed_threshold: f64,
}

impl<H: Host> Controller<H> {
    pub fn new(options: EngineOptions, host: H) -> Self {
        Self::from_engine(Engine::new(options), host)
    }

    pub fn from_engine(engine: Engine, host: H) -> Self {
        let observed_threshold = engine.options().visibility_threshold;
        Self {
            engine,
            host,
            subs: Subscriptions::default(),
            lifecycle: Lifecycle::Idle,
            observed_threshold,
        }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut Engine {
        &mut self.engine
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn subscriptions(&self) -> Subscriptions {
        self.subs
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn is_mounted(&self) -> bool {
        self.lifecycle == Lifecycle::Mounted
    }

    pub fn scene_state(&self) -> SceneState {
        self.engine.scene_state()
    }

    /// Changes the visibility threshold and re-registers the host observer if mounted.
    pub fn set_visibility_threshold(&mut self, threshold: f64) {
        self.engine.set_visibility_threshold(threshold);
        self.sync_observer();
    }

    /// Clones the current engine options, applies `f`, then re-registers the host observer if
    /// the visibility threshold changed.
    pub fn update_options(&mut self, f: impl FnOnce(&mut EngineOptions)) {
        self.engine.update_options(f);
        self.sync_observer();
    }

    /// Registers scroll and visibility listeners, syncs layout, and starts the frame loop.
    ///
    /// Returns `false` if the controller was already mounted or has been unmounted.
    pub fn mount(&mut self) -> bool {
        if self.lifecycle != Lifecycle::Idle {
            return false;
        }
        self.host.attach_scroll();
        self.subs.scroll = true;
        let threshold = self.engine.options().visibility_threshold;
        self.host.observe(threshold);
        self.subs.visibility = true;
        self.observed_threshold = threshold;
        self.sync_layout();
        self.subs.frame = Some(self.host.request_frame());
        self.lifecycle = Lifecycle::Mounted;
        adebug!(threshold, "Controller::mount");
        true
    }

    /// Cancels the frame loop, releases every listener, and tears the engine down.
    ///
    /// Returns `false` if the controller was not mounted.
    pub fn unmount(&mut self) -> bool {
        if self.lifecycle != Lifecycle::Mounted {
            return false;
        }
        if let Some(handle) = self.subs.frame.take() {
            self.host.cancel_frame(handle);
        }
        if self.subs.gestures {
            self.host.detach_gestures();
            self.subs.gestures = false;
        }
        if self.subs.visibility {
            self.host.disconnect();
            self.subs.visibility = false;
        }
        if self.subs.scroll {
            self.host.detach_scroll();
            self.subs.scroll = false;
        }
        self.engine.teardown();
        self.lifecycle = Lifecycle::Unmounted;
        adebug!("Controller::unmount");
        true
    }

    /// Dispatches a host event. Returns `true` if the event was applied.
    ///
    /// Events are ignored unless mounted. Gesture events are ignored while gesture listeners
    /// are detached, and frame events are ignored unless their handle is the pending one.
    pub fn handle(&mut self, event: HostEvent) -> bool {
        if !self.is_mounted() {
            atrace!(?event, "event while not mounted");
            return false;
        }
        if !self.reconcile() {
            return false;
        }
        if event.is_gesture() && !self.subs.gestures {
            return false;
        }
        match event {
            HostEvent::Frame { handle, now_ms } => self.on_frame(handle, now_ms),
            HostEvent::Scroll => self.on_scroll(),
            HostEvent::Resize => self.on_resize(),
            HostEvent::Intersection { ratio } => self.on_intersection(ratio),
            HostEvent::Wheel { delta_y } => self.engine.on_wheel(delta_y),
            HostEvent::TouchStart { y } => self.engine.on_touch_start(y),
            HostEvent::TouchMove { y } => self.engine.on_touch_move(y),
            HostEvent::TouchEnd => self.engine.on_touch_end(),
        }
    }

    /// Advances the marquee for a delivered frame and requests the next one.
    ///
    /// If the engine was torn down behind the controller's back, the controller unmounts.
    pub fn on_frame(&mut self, handle: FrameHandle, now_ms: f64) -> bool {
        if !self.is_mounted() || self.subs.frame != Some(handle) {
            atrace!(?handle, pending = ?self.subs.frame, "stale frame ignored");
            return false;
        }
        self.subs.frame = None;
        if self.engine.tick(now_ms).is_none() {
            self.unmount();
            return false;
        }
        self.subs.frame = Some(self.host.request_frame());
        true
    }

    pub fn on_scroll(&mut self) -> bool {
        if !self.is_mounted() {
            return false;
        }
        let offset = self.host.scroll_offset();
        self.engine.set_scroll_offset(offset);
        true
    }

    /// Re-derives the scroll region and loop length from current layout.
    pub fn on_resize(&mut self) -> bool {
        if !self.is_mounted() {
            return false;
        }
        self.sync_layout();
        true
    }

    /// Feeds an intersection ratio and attaches/detaches gesture listeners on gate transitions.
    pub fn on_intersection(&mut self, ratio: f64) -> bool {
        if !self.is_mounted() {
            return false;
        }
        match self.engine.observe_visibility(ratio) {
            Some(GateTransition::Activated) => {
                if !self.subs.gestures {
                    self.host.attach_gestures();
                    self.subs.gestures = true;
                }
            }
            Some(GateTransition::Deactivated) => {
                if self.subs.gestures {
                    self.host.detach_gestures();
                    self.subs.gestures = false;
                }
            }
            None => {}
        }
        true
    }

    /// Brings host subscriptions in line with the engine. Returns `false` if that unmounted.
    fn reconcile(&mut self) -> bool {
        if self.engine.is_torn_down() {
            adebug!("engine torn down while mounted");
            self.unmount();
            return false;
        }
        self.sync_observer();
        true
    }

    fn sync_observer(&mut self) {
        if !self.subs.visibility {
            return;
        }
        let threshold = self.engine.options().visibility_threshold;
        // Bitwise, so a NaN threshold does not re-register on every event.
        if threshold.to_bits() == self.observed_threshold.to_bits() {
            return;
        }
        self.host.disconnect();
        self.host.observe(threshold);
        self.observed_threshold = threshold;
        adebug!(threshold, "visibility observer re-registered");
    }

    fn sync_layout(&mut self) {
        let region = self.host.narrative_region();
        let offset = self.host.scroll_offset();
        let extent = self.host.track_extent();
        atrace!(?region, offset, ?extent, "sync_layout");
        self.engine.batch_update(|e| {
            e.apply_scroll_frame(region, offset);
            e.set_track_extent(extent);
        });
    }
}

impl<H: Host> Drop for Controller<H> {
    fn drop(&mut self) {
        self.unmount();
    }
}
