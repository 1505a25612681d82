//! Autoplay scheduler: periodic auto-advance with pause/resume.
//!
//! Two independent suppressions exist and the distinction matters. The
//! explicit `playing` flag is flipped only by the user's play/pause
//! control. Hover suppression is implicit: pointer-enter suspends the
//! deadline without touching `playing`, and pointer-leave re-arms only if
//! `playing` is still true. An explicit pause therefore survives any
//! number of hover cycles.
//!
//! The scheduler is deadline-based rather than timer-based: callers poll
//! it with the current instant, and arming always replaces the previous
//! deadline, so overlapping timers cannot exist.

use std::time::{Duration, Instant};

use tracing::debug;

#[derive(Debug, Clone)]
pub struct AutoplayScheduler {
    interval: Duration,
    /// Explicit user intent; only `toggle`/`set_playing` touch this
    playing: bool,
    /// Implicit pointer-hover suspension
    hover_paused: bool,
    /// Next auto-advance deadline; None while suspended
    deadline: Option<Instant>,
}

impl AutoplayScheduler {
    pub fn new(interval: Duration, playing: bool, now: Instant) -> Self {
        let mut scheduler = Self {
            interval,
            playing,
            hover_paused: false,
            deadline: None,
        };
        if playing {
            scheduler.arm(now);
        }
        scheduler
    }

    /// The explicit play/pause state (hover suspension not included)
    #[inline]
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// True while no auto-advance can fire, for any reason
    #[inline]
    pub fn is_suspended(&self) -> bool {
        !self.playing || self.hover_paused
    }

    /// Flip the explicit play/pause state
    pub fn toggle(&mut self, now: Instant) {
        self.set_playing(!self.playing, now);
    }

    pub fn set_playing(&mut self, playing: bool, now: Instant) {
        self.playing = playing;
        if playing && !self.hover_paused {
            self.arm(now);
        } else {
            self.deadline = None;
        }
        debug!(playing, "autoplay toggled");
    }

    /// Pointer entered the carousel region: suspend without touching the
    /// explicit flag
    pub fn hover_enter(&mut self) {
        self.hover_paused = true;
        self.deadline = None;
    }

    /// Pointer left the carousel region: resume only if still explicitly
    /// playing
    pub fn hover_leave(&mut self, now: Instant) {
        self.hover_paused = false;
        if self.playing {
            self.arm(now);
        }
    }

    /// Returns true when an auto-advance is due; the deadline re-arms for
    /// the next interval regardless of whether the advance is accepted
    /// downstream (a locked transition suppresses it, as the lock does
    /// for any other input).
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.is_suspended() {
            return false;
        }
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.arm(now);
                true
            }
            Some(_) => false,
            // Playing but never armed (constructed paused, then resumed
            // through set_playing, which always arms; defensive only)
            None => {
                self.arm(now);
                false
            }
        }
    }

    /// Replaces any previous deadline
    fn arm(&mut self, now: Instant) {
        self.deadline = Some(now + self.interval);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_millis(3000);

    #[test]
    fn fires_once_per_interval() {
        let t0 = Instant::now();
        let mut auto = AutoplayScheduler::new(INTERVAL, true, t0);

        assert!(!auto.poll(t0 + Duration::from_millis(2999)));
        assert!(auto.poll(t0 + Duration::from_millis(3000)));
        // Re-armed relative to the poll that fired
        assert!(!auto.poll(t0 + Duration::from_millis(3001)));
        assert!(auto.poll(t0 + Duration::from_millis(6001)));
    }

    #[test]
    fn explicit_pause_stops_firing() {
        let t0 = Instant::now();
        let mut auto = AutoplayScheduler::new(INTERVAL, true, t0);
        auto.toggle(t0 + Duration::from_millis(100));
        assert!(!auto.is_playing());
        assert!(!auto.poll(t0 + Duration::from_secs(60)));
    }

    #[test]
    fn explicit_pause_survives_hover_cycle() {
        let t0 = Instant::now();
        let mut auto = AutoplayScheduler::new(INTERVAL, true, t0);

        auto.toggle(t0);
        auto.hover_enter();
        auto.hover_leave(t0 + Duration::from_millis(500));

        assert!(!auto.is_playing());
        assert!(!auto.poll(t0 + Duration::from_secs(60)));
    }

    #[test]
    fn hover_pause_resumes_on_leave() {
        let t0 = Instant::now();
        let mut auto = AutoplayScheduler::new(INTERVAL, true, t0);

        auto.hover_enter();
        assert!(!auto.poll(t0 + Duration::from_secs(60)));

        let leave = t0 + Duration::from_secs(60);
        auto.hover_leave(leave);
        assert!(auto.is_playing());
        assert!(!auto.poll(leave + Duration::from_millis(2999)));
        assert!(auto.poll(leave + INTERVAL));
    }

    #[test]
    fn resume_re_arms_a_fresh_interval() {
        let t0 = Instant::now();
        let mut auto = AutoplayScheduler::new(INTERVAL, false, t0);
        assert!(!auto.poll(t0 + Duration::from_secs(60)));

        let resume = t0 + Duration::from_secs(60);
        auto.toggle(resume);
        // Time already elapsed while paused does not count
        assert!(!auto.poll(resume + Duration::from_millis(100)));
        assert!(auto.poll(resume + INTERVAL));
    }

    #[test]
    fn hover_enter_while_paused_changes_nothing_on_leave() {
        let t0 = Instant::now();
        let mut auto = AutoplayScheduler::new(INTERVAL, false, t0);
        auto.hover_enter();
        auto.hover_leave(t0);
        assert!(!auto.is_playing());
        assert!(!auto.poll(t0 + Duration::from_secs(60)));
    }
}
