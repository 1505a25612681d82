//! Single-flight transition controller for the carousel track.
//!
//! The animator is the only writer of the track position. A transition is
//! started with [`TrackAnimator::go_to`] and driven by calling
//! [`TrackAnimator::update`] every frame; while one is in flight the
//! animator is locked and further `go_to` requests are silently dropped,
//! so rapid repeated input collapses to the running transition's
//! destination. Targets live in the extended index space: stepping past
//! either end of the logical sequence is a plain `±1`, and the wrap-around
//! correction happens once, invisibly, at settle time.

use std::time::{Duration, Instant};

use tracing::trace;

use super::easing::{EasingType, EasingTypeExt};
use super::timing::{is_complete, lerp, progress};
use crate::layout::Geometry;
use crate::track::Track;

/// An in-flight transition
#[derive(Debug, Clone)]
struct ActiveTransition {
    start: Instant,
    /// Track offset at the moment the transition started
    from: f64,
    /// Track offset that centers the target
    to: f64,
    /// Extended index being centered
    target: usize,
}

/// Owns the track position (extended index + visual offset) and the
/// in-flight transition state
#[derive(Debug, Clone)]
pub struct TrackAnimator {
    transition: Option<ActiveTransition>,
    /// Extended index currently committed to the center slot.
    /// Invariant: inside the middle replica after every settle.
    track_index: usize,
    /// Current visual track translation, fractional mid-flight
    offset: f64,
    duration: Duration,
    easing: EasingType,
}

impl TrackAnimator {
    /// Create an animator centered on the first item of the middle replica
    pub fn new(track: &Track, geometry: &Geometry, duration: Duration, easing: EasingType) -> Self {
        let start_index = track.mid_start();
        Self {
            transition: None,
            track_index: start_index,
            offset: geometry.offset_for(start_index) as f64,
            duration,
            easing,
        }
    }

    /// True exactly while a transition is in flight
    #[inline]
    pub fn is_locked(&self) -> bool {
        self.transition.is_some()
    }

    /// Extended index last committed to the center slot
    #[inline]
    pub fn track_index(&self) -> usize {
        self.track_index
    }

    /// Current visual track translation
    #[inline]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Destination of the in-flight transition, or the committed index
    /// when idle
    pub fn target(&self) -> usize {
        self.transition
            .as_ref()
            .map(|t| t.target)
            .unwrap_or(self.track_index)
    }

    /// Start moving the track so that `target` lands at the center slot.
    ///
    /// Returns false without any effect while locked or when `target` is
    /// outside the extended track. An unanimated move commits (and
    /// normalizes) immediately; this is the direct-set path used for
    /// initialization and resize recentering.
    pub fn go_to(
        &mut self,
        target: usize,
        animated: bool,
        track: &Track,
        geometry: &Geometry,
        now: Instant,
    ) -> bool {
        if self.is_locked() {
            trace!(target, "transition in flight, request dropped");
            return false;
        }
        if target >= track.extended_len() {
            return false;
        }

        if !animated || self.duration.is_zero() {
            self.settle(target, track, geometry);
            return true;
        }

        let to = geometry.offset_for(target) as f64;
        if (to - self.offset).abs() < f64::EPSILON && target == self.track_index {
            return true;
        }

        self.transition = Some(ActiveTransition {
            start: now,
            from: self.offset,
            to,
            target,
        });
        true
    }

    /// Animated move to the immediate neighbor in `direction` (±1)
    pub fn advance(
        &mut self,
        direction: i32,
        track: &Track,
        geometry: &Geometry,
        now: Instant,
    ) -> bool {
        debug_assert!(direction == 1 || direction == -1);
        let Some(target) = self.track_index.checked_add_signed(direction as isize) else {
            return false;
        };
        self.go_to(target, true, track, geometry, now)
    }

    /// Re-apply the offset for the committed index under (possibly new)
    /// geometry. Cancels any in-flight transition; the centered logical
    /// item is unchanged because the committed index is unchanged.
    pub fn recenter_in_place(&mut self, track: &Track, geometry: &Geometry) {
        self.transition = None;
        self.settle(self.track_index, track, geometry);
    }

    /// Advance the in-flight transition to `now`.
    ///
    /// Returns true when a transition completed during this call (a
    /// "settle"), at which point the track index has been committed and
    /// folded back into the middle replica.
    pub fn update(&mut self, track: &Track, geometry: &Geometry, now: Instant) -> bool {
        let Some(ref anim) = self.transition else {
            return false;
        };

        if is_complete(anim.start, self.duration, now) {
            let target = anim.target;
            self.transition = None;
            self.settle(target, track, geometry);
            true
        } else {
            let t = progress(anim.start, self.duration, now);
            self.offset = lerp(anim.from, anim.to, self.easing.apply(t));
            false
        }
    }

    /// Commit `target`, apply the wrap-around teleport, snap the offset
    fn settle(&mut self, target: usize, track: &Track, geometry: &Geometry) {
        let normalized = track.normalize(target);
        if normalized != target {
            trace!(from = target, to = normalized, "wrap-around teleport");
        }
        self.track_index = normalized;
        self.offset = geometry.offset_for(normalized) as f64;
    }
}
