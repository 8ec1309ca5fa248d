//! Visibility Trigger
//!
//! Marks slides active once enough of them has scrolled into view. The
//! transition is one-way: a slide that became active stays active whatever
//! later visibility changes report.

use tracing::trace;

/// Share of a slide's area that must be in the viewport
pub const DEFAULT_THRESHOLD: f64 = 0.3;

// Deliberately looser than a strict `ratio >= threshold`: browsers can
// report a ratio slightly under the threshold at the crossing, so a slide
// at 0.299 against 0.3 activates.
const RATIO_TOLERANCE: f64 = 1e-3;

/// One visibility observation for a slide
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityEntry {
    /// Position of the slide in the deck
    pub index: usize,
    /// Whether the slide intersects the viewport at all
    pub is_intersecting: bool,
    /// Visible fraction of the slide's area (0.0 to 1.0)
    pub ratio: f64,
}

impl VisibilityEntry {
    /// Create an entry
    pub fn new(index: usize, is_intersecting: bool, ratio: f64) -> Self {
        Self {
            index,
            is_intersecting,
            ratio,
        }
    }
}

/// Tracks which slides have been activated
#[derive(Debug, Clone, PartialEq)]
pub struct VisibilityTrigger {
    threshold: f64,
    active: Vec<bool>,
}

impl VisibilityTrigger {
    /// Create a trigger for `slide_count` slides, all inactive
    pub fn new(slide_count: usize, threshold: f64) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
            active: vec![false; slide_count],
        }
    }

    /// Threshold the trigger was built with
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Feed a batch of observations; returns the slides activated by it.
    ///
    /// Entries for unknown slides and for slides already active are ignored.
    pub fn observe(&mut self, entries: &[VisibilityEntry]) -> Vec<usize> {
        let mut activated = Vec::new();
        for entry in entries {
            let Some(active) = self.active.get_mut(entry.index) else {
                continue;
            };
            if *active || !entry.is_intersecting || entry.ratio + RATIO_TOLERANCE < self.threshold {
                continue;
            }
            *active = true;
            activated.push(entry.index);
        }
        if !activated.is_empty() {
            trace!(?activated, "slides activated");
        }
        activated
    }

    /// Check whether a slide has been activated
    pub fn is_active(&self, index: usize) -> bool {
        self.active.get(index).copied().unwrap_or(false)
    }

    /// Number of active slides
    pub fn active_count(&self) -> usize {
        self.active.iter().filter(|a| **a).count()
    }
}

impl Default for VisibilityTrigger {
    fn default() -> Self {
        Self::new(0, DEFAULT_THRESHOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::Element;
    use crate::render::{DeckSurface, MemorySurface, ACTIVE_CLASS, SLIDE_CLASS};

    #[test]
    fn test_activates_at_threshold() {
        let mut trigger = VisibilityTrigger::new(3, DEFAULT_THRESHOLD);

        let activated = trigger.observe(&[
            VisibilityEntry::new(0, true, 0.29),
            VisibilityEntry::new(1, true, 0.3),
            VisibilityEntry::new(2, true, 1.0),
        ]);

        assert_eq!(activated, vec![1, 2]);
        assert!(!trigger.is_active(0));
        assert_eq!(trigger.active_count(), 2);
    }

    #[test]
    fn test_crossing_ratio_rounding_tolerated() {
        let mut trigger = VisibilityTrigger::new(1, DEFAULT_THRESHOLD);
        assert_eq!(trigger.observe(&[VisibilityEntry::new(0, true, 0.2999)]), vec![0]);
    }

    #[test]
    fn test_ratio_outside_tolerance_stays_inactive() {
        let mut trigger = VisibilityTrigger::new(1, DEFAULT_THRESHOLD);
        assert!(trigger.observe(&[VisibilityEntry::new(0, true, 0.298)]).is_empty());
        assert!(!trigger.is_active(0));
    }

    #[test]
    fn test_activation_is_permanent() {
        let mut trigger = VisibilityTrigger::new(1, DEFAULT_THRESHOLD);
        trigger.observe(&[VisibilityEntry::new(0, true, 0.5)]);

        let activated = trigger.observe(&[
            VisibilityEntry::new(0, false, 0.0),
            VisibilityEntry::new(0, true, 0.1),
        ]);

        assert!(activated.is_empty());
        assert!(trigger.is_active(0));
    }

    #[test]
    fn test_not_intersecting_never_activates() {
        let mut trigger = VisibilityTrigger::new(1, DEFAULT_THRESHOLD);
        assert!(trigger.observe(&[VisibilityEntry::new(0, false, 0.9)]).is_empty());
        assert!(!trigger.is_active(0));
    }

    #[test]
    fn test_repeated_entry_reports_once() {
        let mut trigger = VisibilityTrigger::new(2, DEFAULT_THRESHOLD);
        let activated = trigger.observe(&[
            VisibilityEntry::new(1, true, 0.4),
            VisibilityEntry::new(1, true, 0.8),
        ]);
        assert_eq!(activated, vec![1]);
    }

    #[test]
    fn test_unknown_index_ignored() {
        let mut trigger = VisibilityTrigger::new(1, DEFAULT_THRESHOLD);
        assert!(trigger.observe(&[VisibilityEntry::new(7, true, 1.0)]).is_empty());
        assert!(!trigger.is_active(7));
    }

    #[test]
    fn test_monotonic_over_any_sequence() {
        let mut trigger = VisibilityTrigger::new(4, DEFAULT_THRESHOLD);
        let mut seen = vec![false; 4];

        // Deterministic pseudo-random scroll pattern
        let mut state = 17u32;
        for _ in 0..200 {
            state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            let index = (state >> 8) as usize % 4;
            let ratio = ((state >> 16) % 101) as f64 / 100.0;
            trigger.observe(&[VisibilityEntry::new(index, ratio > 0.0, ratio)]);

            for (i, was_active) in seen.iter_mut().enumerate() {
                if *was_active {
                    assert!(trigger.is_active(i), "slide {i} was deactivated");
                }
                *was_active = trigger.is_active(i);
            }
        }
    }

    #[test]
    fn test_activation_drives_class() {
        let mut surface = MemorySurface::new();
        for i in 0..3 {
            surface
                .append_slide(i, Element::new("section").with_class(SLIDE_CLASS))
                .unwrap();
        }
        let mut trigger = VisibilityTrigger::new(surface.slide_count(), DEFAULT_THRESHOLD);

        let activated = trigger.observe(&[VisibilityEntry::new(1, true, 0.6)]);
        for (i, slide) in surface.slides_mut().enumerate() {
            if activated.contains(&i) {
                slide.add_class(ACTIVE_CLASS);
            }
        }

        let flags: Vec<_> = surface.slides().map(|s| s.has_class(ACTIVE_CLASS)).collect();
        assert_eq!(flags, vec![false, true, false]);
    }

    #[test]
    fn test_threshold_clamped() {
        assert_eq!(VisibilityTrigger::new(0, 1.7).threshold(), 1.0);
        assert_eq!(VisibilityTrigger::new(0, -0.2).threshold(), 0.0);
    }
}
