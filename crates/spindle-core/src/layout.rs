//! Layout engine: derives carousel geometry from the available area.
//!
//! All widths are unit-agnostic integers; the TUI feeds terminal cells,
//! tests may feed pixel-scale values. `derive` is a pure function, so a
//! resize storm that ends where it started produces an identical geometry
//! and the track never jitters.

/// Sizing preferences, read once at mount from [`crate::AppConfig`]
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutPrefs {
    /// Preferred visible item count; forced odd
    pub preferred_visible_count: u32,
    pub min_item_width: u32,
    pub max_item_width: u32,
    /// Gap is `width / gap_divisor`, clamped to `gap_bounds`
    pub gap_divisor: u32,
    pub gap_bounds: (u32, u32),
    /// Item height as a fraction of item width
    pub aspect: f64,
    /// Rows outside the height budget (title, controls, status bar)
    pub reserved_rows: u32,
}

/// Resolved carousel geometry for one container size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    /// Number of simultaneously visible items, odd and at least 1
    pub visible_count: u32,
    pub item_width: u32,
    pub item_height: u32,
    /// Total inter-item spacing per step (half on each side of an item)
    pub gap: u32,
}

impl Geometry {
    /// Distance between adjacent items' centers
    #[inline]
    pub fn step(&self) -> u32 {
        self.item_width + self.gap
    }

    /// Slot index (within the visible window) where the current item sits
    #[inline]
    pub fn center_slot(&self) -> u32 {
        self.visible_count / 2
    }

    /// Horizontal track translation that places `ext` at the center slot
    #[inline]
    pub fn offset_for(&self, ext: usize) -> i64 {
        -((ext as i64 - self.center_slot() as i64) * self.step() as i64)
    }

    /// Extended index whose slot is closest to the center for a given
    /// (possibly mid-animation, fractional) track offset
    pub fn nearest_extended(&self, offset: f64, extended_len: usize) -> usize {
        debug_assert!(extended_len > 0);
        let raw = self.center_slot() as f64 - offset / self.step() as f64;
        let rounded = raw.round();
        if rounded <= 0.0 {
            0
        } else {
            (rounded as usize).min(extended_len - 1)
        }
    }
}

/// Derive geometry for an available `width` and optional height budget.
///
/// Counts down from the preferred (odd) count; the first count whose item
/// width clears `min_item_width` wins. Each item carries half the gap on
/// both sides, so a row of `count` items consumes `count * gap` of margin.
/// When nothing fits, fall back to a single item at the minimum width
/// rather than failing.
pub fn derive(width: u32, height: Option<u32>, prefs: &LayoutPrefs) -> Geometry {
    let gap = (width / prefs.gap_divisor.max(1)).clamp(prefs.gap_bounds.0, prefs.gap_bounds.1);

    let width_cap_from_height = height.map(|h| {
        let budget = h.saturating_sub(prefs.reserved_rows);
        (budget as f64 / prefs.aspect).floor().max(0.0) as u32
    });

    let mut count = prefs.preferred_visible_count.max(1) | 1;
    loop {
        let mut item_width = (width / count).saturating_sub(gap);
        if let Some(cap) = width_cap_from_height {
            item_width = item_width.min(cap);
        }
        if item_width >= prefs.min_item_width {
            return finish(count, item_width.min(prefs.max_item_width), gap, prefs);
        }
        if count == 1 {
            break;
        }
        count -= 2;
    }

    finish(1, prefs.min_item_width, gap, prefs)
}

fn finish(visible_count: u32, item_width: u32, gap: u32, prefs: &LayoutPrefs) -> Geometry {
    let item_height = ((item_width as f64 * prefs.aspect).round() as u32).max(1);
    Geometry {
        visible_count,
        item_width,
        item_height,
        gap,
    }
}
