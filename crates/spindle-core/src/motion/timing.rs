//! Time calculation utilities for track transitions.
//!
//! All functions take the current instant as a parameter instead of
//! reading the clock themselves, so callers (and tests) own time.

use std::time::{Duration, Instant};

/// Animation progress in [0.0, 1.0] at `now`
#[inline]
pub fn progress(start: Instant, duration: Duration, now: Instant) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    let elapsed = now.saturating_duration_since(start);
    (elapsed.as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0)
}

/// Whether the animation has run its full duration at `now`
#[inline]
pub fn is_complete(start: Instant, duration: Duration, now: Instant) -> bool {
    now.saturating_duration_since(start) >= duration
}

/// Linear interpolation between two values
#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp() {
        assert!((lerp(0.0, 100.0, 0.0)).abs() < 0.001);
        assert!((lerp(0.0, 100.0, 0.5) - 50.0).abs() < 0.001);
        assert!((lerp(-50.0, 50.0, 1.0) - 50.0).abs() < 0.001);
    }

    #[test]
    fn test_progress_zero_duration() {
        let start = Instant::now();
        assert!((progress(start, Duration::ZERO, start) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_progress_is_driven_by_now() {
        let start = Instant::now();
        let duration = Duration::from_millis(100);
        assert!((progress(start, duration, start)).abs() < 0.001);
        let halfway = start + Duration::from_millis(50);
        assert!((progress(start, duration, halfway) - 0.5).abs() < 0.001);
        let past = start + Duration::from_millis(250);
        assert!((progress(start, duration, past) - 1.0).abs() < 0.001);
        assert!(is_complete(start, duration, past));
        assert!(!is_complete(start, duration, halfway));
    }

    #[test]
    fn test_now_before_start_is_zero_progress() {
        let start = Instant::now() + Duration::from_secs(1);
        assert!((progress(start, Duration::from_millis(100), Instant::now())).abs() < 0.001);
    }
}
