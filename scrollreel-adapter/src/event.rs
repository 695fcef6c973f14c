use crate::FrameHandle;

/// A native event forwarded by the host.
///
/// `Scroll` and `Resize` carry no payload: the controller reads the current geometry from the
/// host's [`crate::LayoutProvider`] so it never acts on a stale copy.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HostEvent {
    Frame { handle: FrameHandle, now_ms: f64 },
    Scroll,
    Resize,
    Intersection { ratio: f64 },
    Wheel { delta_y: f64 },
    TouchStart { y: f64 },
    TouchMove { y: f64 },
    TouchEnd,
}

impl HostEvent {
    pub fn is_gesture(&self) -> bool {
        matches!(
            self,
            Self::Wheel { .. } | Self::TouchStart { .. } | Self::TouchMove { .. } | Self::TouchEnd
        )
    }
}
