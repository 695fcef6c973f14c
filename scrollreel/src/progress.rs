use crate::ScrollRegion;

/// Tracks the last scroll offset and region geometry and derives a normalized progress.
///
/// The region is `None` until layout has been measured; progress is 0 in that state.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollProgressTracker {
    region: Option<ScrollRegion>,
    scroll_offset: f64,
    progress: f64,
}

impl ScrollProgressTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn region(&self) -> Option<ScrollRegion> {
        self.region
    }

    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Rebinds the tracked region (e.g. after a resize). Returns `true` if progress changed.
    pub fn set_region(&mut self, region: Option<ScrollRegion>) -> bool {
        if let Some(r) = region {
            if r.is_degenerate() {
                rdebug!(start = r.start, end = r.end, "degenerate scroll region");
            }
        }
        self.region = region;
        self.recompute()
    }

    /// Records a new scroll offset. Returns `true` if progress changed.
    pub fn set_scroll_offset(&mut self, scroll_offset: f64) -> bool {
        self.scroll_offset = scroll_offset;
        self.recompute()
    }

    fn recompute(&mut self) -> bool {
        let next = match self.region {
            Some(region) => region.progress_at(self.scroll_offset),
            None => 0.0,
        };
        if next == self.progress {
            return false;
        }
        self.progress = next;
        true
    }
}
