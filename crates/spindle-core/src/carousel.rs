//! The carousel instance: one mounted widget owning its item set,
//! geometry, track position, and autoplay state.
//!
//! Every mount gets its own [`Carousel`]; there is no shared module
//! state, so multiple carousels in one process cannot interfere. The
//! navigation façade methods here are what input layers call; none of
//! them writes the track position directly, all moves go through the
//! single-flight [`TrackAnimator`].

use std::time::{Duration, Instant};

use tracing::debug;

use crate::autoplay::AutoplayScheduler;
use crate::config::CarouselConfig;
use crate::layout::{self, Geometry, LayoutPrefs};
use crate::motion::TrackAnimator;
use crate::track::{Item, ItemSet, Track};
use crate::Result;

/// Outcome of activating an item slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    /// The already-centered item was activated: open the full view
    OpenFull { logical: usize, full_ref: String },
    /// A non-centered item was activated: an animated centering started
    Centering,
    /// Dropped (transition in flight, or slot out of range)
    Ignored,
}

pub struct Carousel {
    track: Track,
    geometry: Geometry,
    prefs: LayoutPrefs,
    animator: TrackAnimator,
    autoplay: AutoplayScheduler,
}

impl Carousel {
    /// Mount a carousel over `items` in a container of the given size.
    ///
    /// Starts centered on the first item of the middle replica, with
    /// autoplay armed according to config.
    pub fn mount(
        items: Vec<Item>,
        config: &CarouselConfig,
        width: u32,
        height: Option<u32>,
        now: Instant,
    ) -> Result<Self> {
        let track = Track::new(ItemSet::new(items)?);
        let prefs = config.layout_prefs();
        let geometry = layout::derive(width, height, &prefs);
        let animator = TrackAnimator::new(
            &track,
            &geometry,
            Duration::from_millis(config.animation_duration_ms),
            config.easing,
        );
        let autoplay = AutoplayScheduler::new(
            Duration::from_millis(config.autoplay_interval_ms),
            config.autoplay_on_start,
            now,
        );
        debug!(
            items = track.item_count(),
            visible = geometry.visible_count,
            item_width = geometry.item_width,
            "carousel mounted"
        );
        Ok(Self {
            track,
            geometry,
            prefs,
            animator,
            autoplay,
        })
    }

    /// Animated step to the next item; dropped while a transition is in
    /// flight
    pub fn next(&mut self, now: Instant) -> bool {
        self.animator.advance(1, &self.track, &self.geometry, now)
    }

    /// Animated step to the previous item
    pub fn prev(&mut self, now: Instant) -> bool {
        self.animator.advance(-1, &self.track, &self.geometry, now)
    }

    /// Activate an extended slot: the centered item opens the full view,
    /// any other item becomes the new centering target
    pub fn activate(&mut self, ext: usize, now: Instant) -> Activation {
        if ext >= self.track.extended_len() || self.animator.is_locked() {
            return Activation::Ignored;
        }
        if ext == self.animator.track_index() {
            let logical = self.track.logical(ext);
            // Unreachable: the slot was bounds-checked above
            let Some(item) = self.track.item(ext) else {
                return Activation::Ignored;
            };
            return Activation::OpenFull {
                logical,
                full_ref: item.full_ref().to_string(),
            };
        }
        if self.animator.go_to(ext, true, &self.track, &self.geometry, now) {
            Activation::Centering
        } else {
            Activation::Ignored
        }
    }

    pub fn toggle_play(&mut self, now: Instant) {
        self.autoplay.toggle(now);
    }

    pub fn hover_enter(&mut self) {
        self.autoplay.hover_enter();
    }

    pub fn hover_leave(&mut self, now: Instant) {
        self.autoplay.hover_leave(now);
    }

    /// Recompute geometry for a new container size and re-center the
    /// current item in place. Returns true when the geometry changed.
    ///
    /// Callers are expected to debounce resize storms; this method itself
    /// is idempotent for an unchanged size.
    pub fn resize(&mut self, width: u32, height: Option<u32>) -> bool {
        let geometry = layout::derive(width, height, &self.prefs);
        if geometry == self.geometry {
            return false;
        }
        debug!(
            visible = geometry.visible_count,
            item_width = geometry.item_width,
            "geometry changed, recentering"
        );
        self.geometry = geometry;
        self.animator.recenter_in_place(&self.track, &self.geometry);
        true
    }

    /// Drive the animation and autoplay clocks. Returns true when a
    /// transition settled during this tick.
    pub fn tick(&mut self, now: Instant) -> bool {
        let settled = self.animator.update(&self.track, &self.geometry, now);
        if self.autoplay.poll(now) {
            // A locked transition silently swallows the auto-advance,
            // same as it does manual input
            self.next(now);
        }
        settled
    }

    /// Logical index of the committed centered item
    pub fn current(&self) -> usize {
        self.track.logical(self.animator.track_index())
    }

    /// Extended index nearest the center right now, fractional offsets
    /// included; diverges from `track_index` only mid-transition
    pub fn centered_extended(&self) -> usize {
        self.geometry
            .nearest_extended(self.animator.offset(), self.track.extended_len())
    }

    #[inline]
    pub fn is_locked(&self) -> bool {
        self.animator.is_locked()
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.autoplay.is_playing()
    }

    #[inline]
    pub fn track(&self) -> &Track {
        &self.track
    }

    #[inline]
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Current visual track translation
    #[inline]
    pub fn offset(&self) -> f64 {
        self.animator.offset()
    }

    /// Extended index committed to the center slot
    #[inline]
    pub fn track_index(&self) -> usize {
        self.animator.track_index()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EasingType;

    const STEP: Duration = Duration::from_millis(700);

    fn config() -> CarouselConfig {
        CarouselConfig {
            animation_duration_ms: 600,
            easing: EasingType::Linear,
            autoplay_on_start: false,
            ..CarouselConfig::default()
        }
    }

    fn items(n: usize) -> Vec<Item> {
        (0..n)
            .map(|i| {
                Item::new(
                    format!("thumb-{i}.jpg"),
                    Some(format!("full-{i}.jpg")),
                    format!("{i}"),
                )
            })
            .collect()
    }

    fn mounted(n: usize, now: Instant) -> Carousel {
        Carousel::mount(items(n), &config(), 120, Some(40), now).unwrap()
    }

    /// Advance and run the clock until the transition settles
    fn settle(carousel: &mut Carousel, now: &mut Instant) {
        *now += STEP;
        carousel.tick(*now);
        assert!(!carousel.is_locked());
    }

    #[test]
    fn seven_item_wraparound_scenario() {
        let mut now = Instant::now();
        let mut carousel = mounted(7, now);
        assert_eq!(carousel.current(), 0);
        assert_eq!(carousel.track_index(), 7);

        for expected in 1..=6 {
            assert!(carousel.next(now));
            settle(&mut carousel, &mut now);
            assert_eq!(carousel.current(), expected);
        }
        assert_eq!(carousel.current(), 6);

        assert!(carousel.next(now));
        settle(&mut carousel, &mut now);
        assert_eq!(carousel.current(), 0);
    }

    #[test]
    fn advance_sequences_track_logical_index() {
        for n in [1usize, 2, 3, 7] {
            let mut now = Instant::now();
            let mut carousel = mounted(n, now);
            let deltas: [i64; 12] = [1, 1, -1, 1, -1, -1, -1, 1, 1, 1, -1, 1];
            let mut net: i64 = 0;

            for d in deltas {
                let ok = if d > 0 { carousel.next(now) } else { carousel.prev(now) };
                assert!(ok);
                net += d;
                settle(&mut carousel, &mut now);

                let expected = net.rem_euclid(n as i64) as usize;
                assert_eq!(carousel.current(), expected, "n={n} net={net}");
                let idx = carousel.track_index();
                assert!(idx >= n && idx < 2 * n, "n={n} drifted to {idx}");
            }
        }
    }

    #[test]
    fn input_during_transition_is_swallowed() {
        let mut now = Instant::now();
        let mut carousel = mounted(7, now);

        assert!(carousel.next(now));
        assert!(carousel.is_locked());
        assert!(!carousel.next(now));
        assert!(!carousel.prev(now));
        assert_eq!(carousel.activate(10, now), Activation::Ignored);

        settle(&mut carousel, &mut now);
        assert_eq!(carousel.current(), 1);
    }

    #[test]
    fn activating_centered_item_yields_full_reference() {
        let now = Instant::now();
        let mut carousel = mounted(7, now);

        let activation = carousel.activate(carousel.track_index(), now);
        assert_eq!(
            activation,
            Activation::OpenFull {
                logical: 0,
                full_ref: "full-0.jpg".to_string()
            }
        );
        // Opening the full view starts no transition
        assert!(!carousel.is_locked());
    }

    #[test]
    fn activating_non_centered_item_centers_it() {
        let mut now = Instant::now();
        let mut carousel = mounted(7, now);

        assert_eq!(carousel.activate(9, now), Activation::Centering);
        assert!(carousel.is_locked());
        settle(&mut carousel, &mut now);
        assert_eq!(carousel.current(), 2);
    }

    #[test]
    fn resize_keeps_logical_identity() {
        let mut now = Instant::now();
        let mut carousel = mounted(7, now);
        for _ in 0..3 {
            carousel.next(now);
            settle(&mut carousel, &mut now);
        }
        let before = carousel.current();

        assert!(carousel.resize(48, Some(20)));
        assert_eq!(carousel.current(), before);
        assert_eq!(
            carousel.offset(),
            carousel.geometry().offset_for(carousel.track_index()) as f64
        );

        // Unchanged size is a no-op (resize storms settle to silence)
        assert!(!carousel.resize(48, Some(20)));
    }

    #[test]
    fn autoplay_advances_on_interval() {
        let mut config = config();
        config.autoplay_on_start = true;
        config.autoplay_interval_ms = 3000;
        let t0 = Instant::now();
        let mut carousel = Carousel::mount(items(7), &config, 120, Some(40), t0).unwrap();

        // First interval elapses: a transition starts
        carousel.tick(t0 + Duration::from_millis(3000));
        assert!(carousel.is_locked());
        carousel.tick(t0 + Duration::from_millis(3700));
        assert_eq!(carousel.current(), 1);
    }

    #[test]
    fn mid_transition_highlight_tracks_nearest_item() {
        let mut carousel = mounted(7, Instant::now());
        let t0 = Instant::now();
        carousel.next(t0);
        assert_eq!(carousel.centered_extended(), 7);
        // Past the halfway point the neighbor is nearer
        carousel.tick(t0 + Duration::from_millis(400));
        assert_eq!(carousel.centered_extended(), 8);
        carousel.tick(t0 + Duration::from_millis(700));
        assert_eq!(carousel.centered_extended(), carousel.track_index());
    }

    #[test]
    fn empty_item_set_fails_to_mount() {
        let result = Carousel::mount(Vec::new(), &config(), 120, Some(40), Instant::now());
        assert!(result.is_err());
    }
}
