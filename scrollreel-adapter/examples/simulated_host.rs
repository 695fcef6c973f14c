use std::collections::VecDeque;

use scrollreel::{EngineOptions, ScrollRegion};
use scrollreel_adapter::{
    Controller, FrameHandle, FrameScheduler, GestureSource, HostEvent, LayoutProvider,
    ScrollSource, VisibilityProvider,
};

// Example: a fake 60fps host. Run with `--features tracing` and `RUST_LOG=trace` to see the
// controller's subscription traffic.

#[derive(Debug, Default)]
struct SimHost {
    next_frame: u64,
    pending_frame: Option<FrameHandle>,
    gestures_attached: bool,
    scroll_offset: f64,
}

impl FrameScheduler for SimHost {
    fn request_frame(&mut self) -> FrameHandle {
        self.next_frame += 1;
        let h = FrameHandle(self.next_frame);
        self.pending_frame = Some(h);
        h
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending_frame == Some(handle) {
            self.pending_frame = None;
        }
    }
}

impl VisibilityProvider for SimHost {
    fn observe(&mut self, threshold: f64) {
        println!("host: observing intersection (threshold {threshold})");
    }

    fn disconnect(&mut self) {
        println!("host: intersection observer disconnected");
    }
}

impl GestureSource for SimHost {
    fn attach_gestures(&mut self) {
        println!("host: wheel/touch listeners attached");
        self.gestures_attached = true;
    }

    fn detach_gestures(&mut self) {
        println!("host: wheel/touch listeners detached");
        self.gestures_attached = false;
    }
}

impl ScrollSource for SimHost {
    fn attach_scroll(&mut self) {}

    fn detach_scroll(&mut self) {}
}

impl LayoutProvider for SimHost {
    fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    fn narrative_region(&self) -> Option<ScrollRegion> {
        Some(ScrollRegion::from_target(2_000.0, 2_400.0, 800.0))
    }

    fn track_extent(&self) -> Option<f64> {
        Some(2_400.0)
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut c = Controller::new(EngineOptions::new(3), SimHost::default());
    c.mount();

    // Scripted input, keyed by frame number.
    let mut script: VecDeque<(u32, HostEvent)> = VecDeque::from([
        (30, HostEvent::Intersection { ratio: 0.4 }),
        (60, HostEvent::Wheel { delta_y: -120.0 }),
        (90, HostEvent::Intersection { ratio: 0.0 }),
        (95, HostEvent::Wheel { delta_y: 120.0 }),
    ]);

    let mut now_ms = 0.0;
    for n in 0..180u32 {
        now_ms += 16.0;
        while script.front().is_some_and(|(at, _)| *at == n) {
            if let Some((_, event)) = script.pop_front() {
                let applied = c.handle(event);
                println!("frame {n}: {event:?} applied={applied}");
            }
        }

        c.host_mut().scroll_offset = 1_800.0 + f64::from(n) * 10.0;
        c.handle(HostEvent::Scroll);

        let Some(handle) = c.host().pending_frame else {
            break;
        };
        c.handle(HostEvent::Frame { handle, now_ms });

        if n % 30 == 0 {
            println!(
                "frame {n}: gestures={} {:?}",
                c.host().gestures_attached,
                c.scene_state()
            );
        }
    }

    c.unmount();
    println!(
        "unmounted: subscriptions empty={}",
        c.subscriptions().is_empty()
    );
}
