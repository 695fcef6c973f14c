use crate::*;

use scrollreel::{Direction, EngineOptions, ScrollRegion};
use std::cell::RefCell;
use std::rc::Rc;
use std::vec::Vec;

#[derive(Clone, Copy, Debug, PartialEq)]
enum Call {
    RequestFrame(FrameHandle),
    CancelFrame(FrameHandle),
    Observe(f64),
    Disconnect,
    AttachGestures,
    DetachGestures,
    AttachScroll,
    DetachScroll,
}

#[derive(Debug, Default)]
struct Layout {
    scroll_offset: f64,
    region: Option<ScrollRegion>,
    track_extent: Option<f64>,
}

#[derive(Clone, Debug, Default)]
struct RecordingHost {
    calls: Rc<RefCell<Vec<Call>>>,
    layout: Rc<RefCell<Layout>>,
    next_frame: u64,
}

impl RecordingHost {
    fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    fn count(&self, call: Call) -> usize {
        self.calls.borrow().iter().filter(|c| **c == call).count()
    }

    fn last_frame(&self) -> Option<FrameHandle> {
        self.calls.borrow().iter().rev().find_map(|c| match c {
            Call::RequestFrame(h) => Some(*h),
            _ => None,
        })
    }
}

impl FrameScheduler for RecordingHost {
    fn request_frame(&mut self) -> FrameHandle {
        self.next_frame += 1;
        let h = FrameHandle(self.next_frame);
        self.calls.borrow_mut().push(Call::RequestFrame(h));
        h
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.calls.borrow_mut().push(Call::CancelFrame(handle));
    }
}

impl VisibilityProvider for RecordingHost {
    fn observe(&mut self, threshold: f64) {
        self.calls.borrow_mut().push(Call::Observe(threshold));
    }

    fn disconnect(&mut self) {
        self.calls.borrow_mut().push(Call::Disconnect);
    }
}

impl GestureSource for RecordingHost {
    fn attach_gestures(&mut self) {
        self.calls.borrow_mut().push(Call::AttachGestures);
    }

    fn detach_gestures(&mut self) {
        self.calls.borrow_mut().push(Call::DetachGestures);
    }
}

impl ScrollSource for RecordingHost {
    fn attach_scroll(&mut self) {
        self.calls.borrow_mut().push(Call::AttachScroll);
    }

    fn detach_scroll(&mut self) {
        self.calls.borrow_mut().push(Call::DetachScroll);
    }
}

impl LayoutProvider for RecordingHost {
    fn scroll_offset(&self) -> f64 {
        self.layout.borrow().scroll_offset
    }

    fn narrative_region(&self) -> Option<ScrollRegion> {
        self.layout.borrow().region
    }

    fn track_extent(&self) -> Option<f64> {
        self.layout.borrow().track_extent
    }
}

fn mounted(options: EngineOptions) -> (Controller<RecordingHost>, RecordingHost) {
    let host = RecordingHost::default();
    {
        let mut l = host.layout.borrow_mut();
        l.region = Some(ScrollRegion::new(0.0, 300.0));
        l.track_extent = Some(200.0);
    }
    let mut c = Controller::new(options, host.clone());
    assert!(c.mount());
    (c, host)
}

fn frame(c: &mut Controller<RecordingHost>, host: &RecordingHost, now_ms: f64) -> bool {
    let handle = host.last_frame().unwrap();
    c.handle(HostEvent::Frame { handle, now_ms })
}

#[test]
fn mount_registers_listeners_and_starts_frame_loop() {
    let (c, host) = mounted(EngineOptions::new(3));
    assert_eq!(
        host.calls(),
        std::vec![
            Call::AttachScroll,
            Call::Observe(0.1),
            Call::RequestFrame(FrameHandle(1)),
        ]
    );
    let subs = c.subscriptions();
    assert!(subs.scroll());
    assert!(subs.visibility());
    assert!(!subs.gestures());
    assert_eq!(subs.pending_frame(), Some(FrameHandle(1)));
    assert_eq!(c.engine().loop_length(), 100.0);
    assert_eq!(c.lifecycle(), Lifecycle::Mounted);
}

#[test]
fn mount_is_once_only() {
    let (mut c, _host) = mounted(EngineOptions::new(1));
    assert!(!c.mount());
    assert!(c.unmount());
    assert!(!c.mount());
    assert!(!c.unmount());
}

#[test]
fn events_before_mount_are_ignored() {
    let host = RecordingHost::default();
    let mut c = Controller::new(EngineOptions::new(1), host.clone());
    assert!(!c.handle(HostEvent::Intersection { ratio: 1.0 }));
    assert!(!c.handle(HostEvent::Scroll));
    assert!(host.calls().is_empty());
    assert!(c.subscriptions().is_empty());
}

#[test]
fn frame_loop_rerequests_and_advances() {
    let (mut c, host) = mounted(EngineOptions::new(1));
    assert!(frame(&mut c, &host, 0.0));
    assert!(frame(&mut c, &host, 500.0));
    assert_eq!(host.count(Call::RequestFrame(FrameHandle(3))), 1);
    // Default direction is Backward; loop length is 100.
    assert_eq!(c.engine().carousel_offset(), -40.0);
}

#[test]
fn stale_frame_handles_are_ignored() {
    let (mut c, host) = mounted(EngineOptions::new(1));
    assert!(frame(&mut c, &host, 0.0));
    let before = c.engine().carousel_offset();
    assert!(!c.handle(HostEvent::Frame {
        handle: FrameHandle(1),
        now_ms: 1_000.0,
    }));
    assert_eq!(c.engine().carousel_offset(), before);
}

#[test]
fn gestures_attach_only_while_visible() {
    let (mut c, host) = mounted(EngineOptions::new(1).with_initial_direction(Direction::Forward));

    assert!(!c.handle(HostEvent::Wheel { delta_y: 10.0 }));
    assert_eq!(c.engine().direction(), Direction::Forward);

    assert!(c.handle(HostEvent::Intersection { ratio: 0.5 }));
    assert!(c.subscriptions().gestures());
    assert!(c.handle(HostEvent::Wheel { delta_y: 10.0 }));
    assert_eq!(c.engine().direction(), Direction::Backward);

    // Staying visible does not re-register.
    c.handle(HostEvent::Intersection { ratio: 0.9 });
    assert_eq!(host.count(Call::AttachGestures), 1);

    c.handle(HostEvent::Intersection { ratio: 0.1 });
    assert!(!c.subscriptions().gestures());
    assert_eq!(host.count(Call::DetachGestures), 1);
    assert!(!c.handle(HostEvent::Wheel { delta_y: -10.0 }));
    assert_eq!(c.engine().direction(), Direction::Backward);
}

#[test]
fn touch_sequence_steers_through_controller() {
    let (mut c, _host) = mounted(EngineOptions::new(1));
    c.handle(HostEvent::Intersection { ratio: 1.0 });
    assert!(c.handle(HostEvent::TouchStart { y: 300.0 }));
    assert!(c.handle(HostEvent::TouchMove { y: 320.0 }));
    assert_eq!(c.engine().direction(), Direction::Forward);
    assert!(c.handle(HostEvent::TouchEnd));
    assert!(!c.handle(HostEvent::TouchMove { y: 0.0 }));
    assert_eq!(c.engine().direction(), Direction::Forward);
}

#[test]
fn marquee_keeps_sliding_after_section_leaves_view() {
    let (mut c, host) = mounted(EngineOptions::new(1));
    c.handle(HostEvent::Intersection { ratio: 1.0 });
    c.handle(HostEvent::Wheel { delta_y: -1.0 });
    c.handle(HostEvent::Intersection { ratio: 0.0 });

    frame(&mut c, &host, 0.0);
    let a = c.engine().carousel_offset();
    frame(&mut c, &host, 250.0);
    let b = c.engine().carousel_offset();
    assert_eq!(b - a, 20.0);
    assert!(c.subscriptions().pending_frame().is_some());
}

#[test]
fn scroll_and_resize_read_current_layout() {
    let (mut c, host) = mounted(EngineOptions::new(3));
    assert_eq!(c.engine().active_index(), 0);

    host.layout.borrow_mut().scroll_offset = 250.0;
    assert!(c.handle(HostEvent::Scroll));
    assert_eq!(c.engine().active_index(), 2);

    {
        let mut l = host.layout.borrow_mut();
        l.region = Some(ScrollRegion::new(0.0, 3_000.0));
        l.track_extent = None;
    }
    assert!(c.handle(HostEvent::Resize));
    assert_eq!(c.engine().active_index(), 0);
    assert_eq!(c.engine().loop_length(), 0.0);
}

#[test]
fn unmount_releases_everything_and_freezes_the_marquee() {
    let (mut c, host) = mounted(EngineOptions::new(1));
    c.handle(HostEvent::Intersection { ratio: 1.0 });
    frame(&mut c, &host, 0.0);
    frame(&mut c, &host, 100.0);
    let pending = c.subscriptions().pending_frame().unwrap();
    let position = c.engine().carousel_offset();

    assert!(c.unmount());
    assert_eq!(c.lifecycle(), Lifecycle::Unmounted);
    assert!(c.subscriptions().is_empty());
    assert!(c.engine().is_torn_down());
    assert_eq!(host.count(Call::CancelFrame(pending)), 1);
    assert_eq!(host.count(Call::DetachGestures), 1);
    assert_eq!(host.count(Call::Disconnect), 1);
    assert_eq!(host.count(Call::DetachScroll), 1);

    // A frame the host had already queued must not move anything.
    assert!(!c.handle(HostEvent::Frame {
        handle: pending,
        now_ms: 10_000.0,
    }));
    assert_eq!(c.engine().carousel_offset(), position);
    assert_eq!(host.last_frame(), Some(pending));
}

#[test]
fn dropping_a_mounted_controller_unmounts() {
    let host = {
        let (c, host) = mounted(EngineOptions::new(1));
        drop(c);
        host
    };
    assert_eq!(host.count(Call::CancelFrame(FrameHandle(1))), 1);
    assert_eq!(host.count(Call::Disconnect), 1);
    assert_eq!(host.count(Call::DetachScroll), 1);
    // Gestures were never attached, so nothing to detach.
    assert_eq!(host.count(Call::DetachGestures), 0);
}

#[test]
fn host_event_gesture_classification() {
    assert!(HostEvent::Wheel { delta_y: 1.0 }.is_gesture());
    assert!(HostEvent::TouchEnd.is_gesture());
    assert!(!HostEvent::Scroll.is_gesture());
    assert!(!HostEvent::Intersection { ratio: 0.5 }.is_gesture());
}

#[test]
fn threshold_change_re_registers_visibility_observer() {
    let (mut c, host) = mounted(EngineOptions::new(1));
    c.set_visibility_threshold(0.5);
    assert_eq!(host.count(Call::Disconnect), 1);
    assert_eq!(host.count(Call::Observe(0.5)), 1);

    assert!(c.handle(HostEvent::Intersection { ratio: 0.3 }));
    assert!(!c.subscriptions().gestures());
    assert!(c.handle(HostEvent::Intersection { ratio: 0.6 }));
    assert!(c.subscriptions().gestures());

    // Changes made straight on the engine are picked up on the next event.
    c.engine_mut().update_options(|o| o.visibility_threshold = 0.8);
    assert!(c.handle(HostEvent::Scroll));
    assert_eq!(host.count(Call::Observe(0.8)), 1);

    // Other option changes leave the observer alone.
    c.update_options(|o| o.speed = 10.0);
    c.handle(HostEvent::Scroll);
    assert_eq!(host.count(Call::Disconnect), 2);
    let observes = host
        .calls()
        .iter()
        .filter(|call| matches!(call, Call::Observe(_)))
        .count();
    assert_eq!(observes, 3);
}

#[test]
fn threshold_set_before_mount_is_used_at_mount() {
    let host = RecordingHost::default();
    let mut c = Controller::new(EngineOptions::new(1), host.clone());
    c.set_visibility_threshold(0.4);
    assert!(host.calls().is_empty());
    assert!(c.mount());
    assert_eq!(host.count(Call::Observe(0.4)), 1);
    assert_eq!(host.count(Call::Disconnect), 0);
}

#[test]
fn engine_torn_down_directly_unmounts_on_next_frame() {
    let (mut c, host) = mounted(EngineOptions::new(1));
    c.handle(HostEvent::Intersection { ratio: 1.0 });
    assert!(c.engine_mut().teardown());

    assert!(!frame(&mut c, &host, 16.0));
    assert_eq!(c.lifecycle(), Lifecycle::Unmounted);
    assert!(c.subscriptions().is_empty());
    assert_eq!(host.count(Call::DetachGestures), 1);
    assert_eq!(host.count(Call::Disconnect), 1);
    assert_eq!(host.count(Call::DetachScroll), 1);
    assert_eq!(host.count(Call::RequestFrame(FrameHandle(2))), 0);
}

#[test]
fn touch_end_is_not_applied_while_disabled() {
    let (mut c, _host) = mounted(EngineOptions::new(1));
    c.handle(HostEvent::Intersection { ratio: 1.0 });
    assert!(c.handle(HostEvent::TouchEnd));
    c.engine_mut().set_enabled(false);
    assert!(!c.handle(HostEvent::TouchEnd));
}
