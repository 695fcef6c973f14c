//! Host wiring for the `scrollreel` crate.
//!
//! The `scrollreel` crate is UI-agnostic and focuses on the core math and state. This crate
//! owns the part every host has to get right: subscription lifecycle.
//!
//! - Scroll and visibility listeners are registered on mount and released on unmount.
//! - Gesture listeners exist only while the visibility gate is open.
//! - The frame loop re-requests itself every frame, ignores stale frame handles, and is
//!   cancelled on unmount so no callback outlives the section.
//!
//! Hosts implement the provider traits in [`host`] and forward their native events as
//! [`HostEvent`]s. This crate is intentionally framework-agnostic (no DOM/winit bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod controller;
mod event;
pub mod host;
mod subscriptions;

#[cfg(test)]
mod tests;

pub use controller::{Controller, Lifecycle};
pub use event::HostEvent;
pub use host::{
    FrameHandle, FrameScheduler, GestureSource, Host, LayoutProvider, ScrollSource,
    VisibilityProvider,
};
pub use subscriptions::Subscriptions;
