//! Generation guard for route selections.
//!
//! Every new selection bumps a counter; work started under an older
//! generation is discarded when it completes.

use std::sync::atomic::{AtomicU64, Ordering};

/// Token identifying one route selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Outcome of work tied to a selection.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection<T> {
    /// The selection was still current when the work finished.
    Current(T),
    /// A newer selection started while the work was in flight.
    Stale,
}

impl<T> Selection<T> {
    pub fn is_stale(&self) -> bool {
        matches!(self, Selection::Stale)
    }

    /// The result, or `None` when it was discarded.
    pub fn into_current(self) -> Option<T> {
        match self {
            Selection::Current(value) => Some(value),
            Selection::Stale => None,
        }
    }
}

/// Hands out monotonically increasing [`Generation`]s.
#[derive(Debug, Default)]
pub struct SelectionTracker {
    latest: AtomicU64,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new selection, superseding every earlier one.
    pub fn begin(&self) -> Generation {
        Generation(self.latest.fetch_add(1, Ordering::AcqRel) + 1)
    }

    pub fn current(&self) -> Generation {
        Generation(self.latest.load(Ordering::Acquire))
    }

    pub fn is_current(&self, generation: Generation) -> bool {
        self.latest.load(Ordering::Acquire) == generation.0
    }

    /// Wrap `value` as current or stale for `generation`.
    pub fn accept<T>(&self, generation: Generation, value: T) -> Selection<T> {
        if self.is_current(generation) {
            Selection::Current(value)
        } else {
            Selection::Stale
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generations_increase() {
        let tracker = SelectionTracker::new();
        let first = tracker.begin();
        let second = tracker.begin();
        assert!(second > first);
        assert_eq!(tracker.current(), second);
    }

    #[test]
    fn older_generation_results_are_stale() {
        let tracker = SelectionTracker::new();
        let first = tracker.begin();
        assert_eq!(tracker.accept(first, 1), Selection::Current(1));

        let second = tracker.begin();
        assert!(tracker.accept(first, 1).is_stale());
        assert_eq!(tracker.accept(second, 2).into_current(), Some(2));
    }
}
