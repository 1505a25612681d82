//! Track transition system: single-flight animated moves of the carousel
//! strip, with configurable easing.
//!
//! - `easing` - pure easing curves
//! - `timing` - progress and interpolation against an injected clock
//! - `animation` - the [`TrackAnimator`] transition controller
//!
//! Every time-dependent function takes a `now: Instant` so tests can drive
//! the clock by hand instead of sleeping.

pub mod animation;
pub mod easing;
pub mod timing;

pub use animation::TrackAnimator;
pub use easing::EasingTypeExt;
