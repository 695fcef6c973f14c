// Example: a gesture-steered looping marquee driven by a simulated 60fps frame loop.
use scrollreel::{Engine, EngineOptions};

fn main() {
    let mut e = Engine::new(EngineOptions::new(0));
    // The track renders its content twice; one loop is half the measured extent.
    e.set_track_extent(Some(1_600.0));

    let mut now_ms = 0.0;
    for frame in 0..240u32 {
        now_ms += 16.0;

        // Scroll the section into view at ~1s; the user wheels up at ~2s; the section leaves
        // the viewport at ~3s and further wheels are ignored.
        match frame {
            60 => {
                e.observe_visibility(0.6);
            }
            120 => {
                e.on_wheel(-40.0);
            }
            180 => {
                e.observe_visibility(0.0);
                e.on_wheel(40.0);
            }
            _ => {}
        }

        let Some(off) = e.tick(now_ms) else {
            break;
        };
        if frame % 30 == 0 {
            println!(
                "t={now_ms:>5.0}ms off={off:>8.2} dir={:?} visible={}",
                e.direction(),
                e.visible()
            );
        }
    }

    e.teardown();
    println!("after teardown: tick={:?}", e.tick(now_ms + 16.0));
}
