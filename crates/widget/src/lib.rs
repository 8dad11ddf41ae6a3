//! Chainwait Widget - decorative activity indicator.
//!
//! Renders a plausible-looking, non-authoritative stream of "blockchain
//! activity": a signup counter seeded once from the server, a fake
//! transaction hash, a timer-incremented block height, and transitory
//! network-status strings. Nothing here is verified against any real
//! ledger; every displayed value is client-side decoration.
//!
//! The widget owns no persisted state and is fully re-creatable from zero.
//! Rendering goes through the [`surface::Surface`] trait; scheduling goes
//! through tokio timers, so tests can drive the widget under paused time.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod counter;
pub mod display;
pub mod easing;
pub mod hash;
pub mod source;
pub mod surface;

pub use counter::CounterWidget;
pub use display::DisplayState;
pub use source::{CountSource, HttpCountSource};
pub use surface::{NullSurface, Surface};
