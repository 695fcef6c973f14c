use crate::FrameHandle;

/// Which host listeners are currently registered.
///
/// Every `true` flag (and a pending frame) must be released on unmount.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Subscriptions {
    pub(crate) scroll: bool,
    pub(crate) visibility: bool,
    pub(crate) gestures: bool,
    pub(crate) frame: Option<FrameHandle>,
}

impl Subscriptions {
    pub fn scroll(&self) -> bool {
        self.scroll
    }

    pub fn visibility(&self) -> bool {
        self.visibility
    }

    pub fn gestures(&self) -> bool {
        self.gestures
    }

    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.frame
    }

    /// `true` when nothing is registered and no frame is pending.
    pub fn is_empty(&self) -> bool {
        !self.scroll && !self.visibility && !self.gestures && self.frame.is_none()
    }
}
