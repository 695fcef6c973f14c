// Example: minimal usage, scroll a three-item narrative section top to bottom.
use scrollreel::{Engine, EngineOptions, ScrollRegion};

fn main() {
    let mut e = Engine::new(EngineOptions::new(3));

    // A section three viewports tall, starting 900px into the page, with an 800px viewport.
    let region = ScrollRegion::from_target(900.0, 2400.0, 800.0);

    let mut offset = 0.0;
    while offset <= 3_000.0 {
        e.apply_scroll_frame(Some(region), offset);
        println!(
            "offset={offset:>6.0} progress={:.3} active_index={}",
            e.progress(),
            e.active_index()
        );
        offset += 250.0;
    }
}
