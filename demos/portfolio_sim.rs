use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use scrollreel::{Direction, Engine, EngineOptions, MarqueeState, ScrollRegion, ThresholdTable};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Simulate a host page with a "My Work" section of three projects and a skills marquee.
    let renders = Arc::new(AtomicUsize::new(0));

    let opts = EngineOptions::new(3)
        .with_speed(80.0)
        .with_on_change(Some({
            let renders = Arc::clone(&renders);
            move |e: &Engine| {
                renders.fetch_add(1, Ordering::Relaxed);
                tracing::debug!(
                    index = e.active_index(),
                    offset = e.carousel_offset(),
                    "render"
                );
            }
        }));

    let mut e = Engine::new(opts);

    // Layout: the projects section is 3 viewports tall, the marquee track 2 x 1200px.
    let viewport = 900.0;
    let region = ScrollRegion::from_target(1_800.0, viewport * 3.0, viewport);
    e.batch_update(|e| {
        e.apply_scroll_frame(Some(region), 0.0);
        e.set_track_extent(Some(2_400.0));
    });

    // The skills section scrolls into view and the reader wheels up once.
    e.observe_visibility(0.35);
    e.on_wheel(-100.0);

    let mut now_ms = 0.0;
    for step in 0..=40u32 {
        now_ms += 16.0;
        e.batch_update(|e| {
            e.set_scroll_offset(1_600.0 + f64::from(step) * 60.0);
            e.tick(now_ms);
        });
        if step % 8 == 0 {
            let json = serde_json::to_string(&e.scene_state()).unwrap_or_default();
            println!("step={step:>2} {json}");
        }
    }
    println!("renders={}", renders.load(Ordering::Relaxed));

    // Persist and restore the marquee across a remount.
    let saved = serde_json::to_string(&e.marquee_state()).unwrap_or_default();
    e.teardown();
    println!("after teardown tick={:?}", e.tick(now_ms + 16.0));

    let mut remounted = Engine::new(EngineOptions::new(3));
    remounted.set_track_extent(Some(2_400.0));
    let restored: MarqueeState = serde_json::from_str(&saved).unwrap_or(MarqueeState {
        position: 0.0,
        direction: Direction::Backward,
    });
    remounted.restore_marquee_state(restored);
    println!("restored {:?}", remounted.marquee_state());

    // Custom, uneven cutoffs: the first project holds for the first half of the section.
    match ThresholdTable::from_cutoffs([0.5, 0.8, 1.0]) {
        Ok(table) => {
            remounted.set_thresholds(Some(table));
            remounted.apply_scroll_frame(Some(region), 2_500.0);
            println!(
                "uneven cutoffs: progress={:.3} active_index={}",
                remounted.progress(),
                remounted.active_index()
            );
        }
        Err(err) => println!("rejected table: {err}"),
    }
    if let Err(err) = ThresholdTable::from_cutoffs([0.7, 0.4]) {
        println!("rejected table: {err}");
    }

    // Disabling freezes the narrative at the first item.
    remounted.set_enabled(false);
    println!("disabled active_index={}", remounted.active_index());
}
