use scrollreel::{Engine, EngineOptions, ScrollRegion};

fn main() {
    let mut e = Engine::new(EngineOptions::new(3));
    e.apply_scroll_frame(Some(ScrollRegion::new(0.0, 900.0)), 450.0);
    println!("progress={} active_index={}", e.progress(), e.active_index());
}
