/// Active/total slide counters and wraparound arithmetic.
///
/// `active` is a position in the padded sequence: `1..=total` are real slides, `0`
/// is the clone of the last slide and `total + 1` the clone of the first. The
/// out-of-range positions only exist while a transition is animating towards a
/// clone; [`SlideIndex::correct`] folds them back once it completes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlideIndex {
    active: usize,
    total: usize,
}

/// A wraparound rewrite performed by [`SlideIndex::correct`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Wraparound {
    pub from: usize,
    pub to: usize,
}

impl SlideIndex {
    /// Start on the first real slide.
    ///
    /// `total` must be at least 1; the carousel rejects empty surfaces before
    /// building an index.
    pub fn new(total: usize) -> Self {
        debug_assert!(total > 0, "slide index requires at least one slide");
        Self { active: 1, total }
    }

    pub fn active(&self) -> usize {
        self.active
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn advance(&mut self) {
        self.active += 1;
    }

    pub fn retreat(&mut self) {
        self.active = self.active.saturating_sub(1);
    }

    pub fn needs_correction(&self) -> bool {
        self.active < 1 || self.active > self.total
    }

    /// Fold a clone position back onto the real slide it mirrors.
    pub fn correct(&mut self) -> Option<Wraparound> {
        let from = self.active;
        if self.active < 1 {
            self.active = self.total;
        } else if self.active > self.total {
            self.active = 1;
        } else {
            return None;
        }
        Some(Wraparound {
            from,
            to: self.active,
        })
    }
}
