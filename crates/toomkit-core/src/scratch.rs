//! Carving of scratch buffers into disjoint regions.

use crate::limb::Limb;

/// Cursor that hands out consecutive, non-overlapping sub-slices.
///
/// Each region borrows from the original buffer for its whole lifetime, so
/// any number of regions can be live at once.
#[derive(Debug)]
pub struct Carver<'a> {
    rest: &'a mut [Limb],
}

impl<'a> Carver<'a> {
    pub fn new(buf: &'a mut [Limb]) -> Self {
        Self { rest: buf }
    }

    /// Take the next `len` limbs.
    ///
    /// # Panics
    ///
    /// Panics if fewer than `len` limbs remain.
    pub fn take(&mut self, len: usize) -> &'a mut [Limb] {
        let rest = std::mem::take(&mut self.rest);
        assert!(
            len <= rest.len(),
            "scratch exhausted: need {len} limbs, {} left",
            rest.len()
        );
        let (head, tail) = rest.split_at_mut(len);
        self.rest = tail;
        head
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.rest.len()
    }

    /// Hand out everything that is left.
    pub fn finish(self) -> &'a mut [Limb] {
        self.rest
    }
}
