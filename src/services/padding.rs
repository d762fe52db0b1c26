use crate::surface::RenderingSurface;

/// What occupies one position of the padded sequence
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaddedSlot {
    CloneOfLast,
    /// Real slide, 1-based
    Real(usize),
    CloneOfFirst,
}

/// The slide sequence with one clone on each edge:
/// `[clone(last), slide 1, ..., slide n, clone(first)]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaddedSequence {
    total: usize,
}

impl PaddedSequence {
    pub fn new(total: usize) -> Self {
        Self { total }
    }

    pub fn len(&self) -> usize {
        self.total + 2
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    pub fn slot(&self, position: usize) -> Option<PaddedSlot> {
        match position {
            0 => Some(PaddedSlot::CloneOfLast),
            p if p <= self.total => Some(PaddedSlot::Real(p)),
            p if p == self.total + 1 => Some(PaddedSlot::CloneOfFirst),
            _ => None,
        }
    }

    /// The real slide whose content is visible at `position`
    pub fn displayed_slide(&self, position: usize) -> Option<usize> {
        self.slot(position).map(|slot| match slot {
            PaddedSlot::CloneOfLast => self.total,
            PaddedSlot::Real(n) => n,
            PaddedSlot::CloneOfFirst => 1,
        })
    }

    /// Create both clones on the surface. Called once at construction.
    pub fn materialize<S: RenderingSurface + ?Sized>(&self, surface: &mut S) {
        surface.prepend_clone();
        surface.append_clone();
        tracing::debug!("Materialized loop padding: {} positions", self.len());
    }
}
