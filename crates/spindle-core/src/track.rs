//! Track model: the infinite-loop index space over a finite item set.
//!
//! The item set is conceptually replicated three times into an "extended
//! track" of length `3N`. Only the middle replica (`[N, 2N)`) is ever
//! centered in steady state; the outer replicas exist so an animated step
//! across either loop boundary always has a contiguous neighbor to move
//! into. After a transition settles, [`Track::normalize`] folds the index
//! back into the middle replica.

use crate::error::{Error, Result};

/// One carousel entry: opaque references to a displayable image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    /// Reference shown in the strip
    pub thumbnail: String,
    /// Full-size reference for the fullscreen viewer, when distinct
    pub full: Option<String>,
    /// Short label (file stem or caption)
    pub label: String,
}

impl Item {
    pub fn new(thumbnail: impl Into<String>, full: Option<String>, label: impl Into<String>) -> Self {
        Self {
            thumbnail: thumbnail.into(),
            full,
            label: label.into(),
        }
    }

    /// Reference the fullscreen viewer should open: the distinct full-size
    /// one when present, the thumbnail otherwise
    pub fn full_ref(&self) -> &str {
        self.full.as_deref().unwrap_or(&self.thumbnail)
    }
}

/// Ordered, immutable sequence of N unique items; fixed at mount time
#[derive(Debug, Clone)]
pub struct ItemSet {
    items: Vec<Item>,
}

impl ItemSet {
    pub fn new(items: Vec<Item>) -> Result<Self> {
        if items.is_empty() {
            return Err(Error::EmptyItemSet);
        }
        Ok(Self { items })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, logical: usize) -> Option<&Item> {
        self.items.get(logical)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }
}

/// Index math over the triple-replicated track
#[derive(Debug, Clone)]
pub struct Track {
    items: ItemSet,
}

impl Track {
    pub fn new(items: ItemSet) -> Self {
        Self { items }
    }

    /// N, the logical item count
    #[inline]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// 3N, the extended track length
    #[inline]
    pub fn extended_len(&self) -> usize {
        self.items.len() * 3
    }

    /// First extended index of the middle replica (= N)
    #[inline]
    pub fn mid_start(&self) -> usize {
        self.items.len()
    }

    /// Logical identity of an extended slot
    #[inline]
    pub fn logical(&self, ext: usize) -> usize {
        ext % self.items.len()
    }

    /// Item occupying an extended slot
    pub fn item(&self, ext: usize) -> Option<&Item> {
        self.items.get(self.logical(ext))
    }

    pub fn items(&self) -> &ItemSet {
        &self.items
    }

    /// Fold an extended index into the middle replica `[N, 2N)`.
    ///
    /// Applied after every settled transition so the next one always has
    /// room on both sides. Indices reachable by single steps from the
    /// middle replica land at most one replica away, so one fold suffices.
    pub fn normalize(&self, ext: usize) -> usize {
        let n = self.items.len();
        if ext < n {
            ext + n
        } else if ext >= 2 * n {
            ext - n
        } else {
            ext
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(n: usize) -> Track {
        let items = (0..n)
            .map(|i| Item::new(format!("thumb-{i}.jpg"), None, format!("item {i}")))
            .collect();
        Track::new(ItemSet::new(items).unwrap())
    }

    #[test]
    fn empty_item_set_is_rejected() {
        assert!(matches!(ItemSet::new(Vec::new()), Err(Error::EmptyItemSet)));
    }

    #[test]
    fn single_item_still_loops() {
        let t = track(1);
        assert!(!t.items().is_empty());
        assert_eq!(t.extended_len(), 3);
        assert_eq!(t.normalize(0), 1);
        assert_eq!(t.normalize(2), 1);
        assert_eq!(t.logical(2), 0);
    }

    #[test]
    fn normalize_folds_into_middle_replica() {
        let t = track(7);
        for ext in 0..t.extended_len() {
            let folded = t.normalize(ext);
            assert!(folded >= 7 && folded < 14, "ext {ext} folded to {folded}");
            // Folding preserves logical identity
            assert_eq!(t.logical(folded), t.logical(ext));
        }
    }

    #[test]
    fn middle_replica_is_a_fixed_point() {
        let t = track(5);
        for ext in 5..10 {
            assert_eq!(t.normalize(ext), ext);
        }
    }

    #[test]
    fn full_ref_prefers_distinct_full_image() {
        let with_full = Item::new("t.jpg", Some("f.jpg".to_string()), "a");
        let without = Item::new("t.jpg", None, "b");
        assert_eq!(with_full.full_ref(), "f.jpg");
        assert_eq!(without.full_ref(), "t.jpg");
    }
}
