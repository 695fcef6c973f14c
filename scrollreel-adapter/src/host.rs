//! Capabilities a host provides to the [`crate::Controller`].
//!
//! None of these calls may block. Registration methods install passive listeners: the host
//! forwards the resulting native events as [`crate::HostEvent`]s and never waits on the
//! controller.

use scrollreel::ScrollRegion;

/// Identifies one pending frame request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameHandle(pub u64);

/// One callback per display refresh.
pub trait FrameScheduler {
    /// Requests a single frame callback, delivered later as `HostEvent::Frame`.
    fn request_frame(&mut self) -> FrameHandle;
    /// Cancels a pending request. Cancelling an already-delivered handle is harmless.
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Intersection observation for the marquee section.
pub trait VisibilityProvider {
    /// Starts delivering `HostEvent::Intersection` whenever the ratio crosses `threshold`.
    fn observe(&mut self, threshold: f64);
    fn disconnect(&mut self);
}

/// Passive wheel + touch listeners.
pub trait GestureSource {
    fn attach_gestures(&mut self);
    fn detach_gestures(&mut self);
}

/// Passive scroll + resize listeners.
pub trait ScrollSource {
    fn attach_scroll(&mut self);
    fn detach_scroll(&mut self);
}

/// Current layout geometry.
///
/// Returning `None` means layout is not available yet; the engine degrades accordingly.
pub trait LayoutProvider {
    fn scroll_offset(&self) -> f64;
    fn narrative_region(&self) -> Option<ScrollRegion>;
    /// Extent of the marquee track, which holds its content twice.
    fn track_extent(&self) -> Option<f64>;
}

/// Everything a [`crate::Controller`] needs from its host.
pub trait Host:
    FrameScheduler + VisibilityProvider + GestureSource + ScrollSource + LayoutProvider
{
}

impl<T> Host for T where
    T: FrameScheduler + VisibilityProvider + GestureSource + ScrollSource + LayoutProvider
{
}
