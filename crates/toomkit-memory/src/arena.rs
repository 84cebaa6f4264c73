//! Bump arena for limb scratch buffers.
//!
//! Allocation happens through an [`ArenaScope`]; dropping the scope resets
//! the arena, so scratch never outlives the multiplication that carved it.
//! Chunks are kept for the next scope unless they exceed the retain limit.

use bumpalo::Bump;

use crate::stats::{global_stats, ArenaStats};

/// Bytes an arena keeps between scopes by default (64 MiB).
pub const DEFAULT_RETAIN_LIMIT: usize = 64 << 20;

/// Bump arena that hands out zeroed limb slices.
pub struct ScratchArena {
    bump: Bump,
    stats: ArenaStats,
    retain_limit: usize,
}

impl ScratchArena {
    /// Create an empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self {
            bump: Bump::new(),
            stats: ArenaStats::default(),
            retain_limit: DEFAULT_RETAIN_LIMIT,
        }
    }

    /// Create an arena with room for `limbs` limbs before it grows.
    #[must_use]
    pub fn with_capacity(limbs: usize) -> Self {
        Self {
            bump: Bump::with_capacity(limbs * std::mem::size_of::<u64>()),
            stats: ArenaStats::default(),
            retain_limit: DEFAULT_RETAIN_LIMIT,
        }
    }

    /// Free the chunks instead of reusing them when a scope ends with more
    /// than `bytes` allocated.
    #[must_use]
    pub fn with_retain_limit(mut self, bytes: usize) -> Self {
        self.retain_limit = bytes;
        self
    }

    /// Open an allocation scope. Everything allocated through it is
    /// released when it drops.
    pub fn scope(&mut self) -> ArenaScope<'_> {
        self.stats.scopes += 1;
        global_stats().record_scope();
        ArenaScope { arena: self }
    }

    /// Bytes currently held in the arena's chunks.
    #[must_use]
    pub fn allocated_bytes(&self) -> usize {
        self.bump.allocated_bytes()
    }

    /// Usage counters of this arena.
    #[must_use]
    pub fn stats(&self) -> ArenaStats {
        self.stats
    }
}

impl Default for ScratchArena {
    fn default() -> Self {
        Self::new()
    }
}

/// Live allocation scope of a [`ScratchArena`].
pub struct ArenaScope<'a> {
    arena: &'a mut ScratchArena,
}

impl ArenaScope<'_> {
    /// Allocate `len` zeroed limbs.
    #[allow(clippy::mut_from_ref)]
    pub fn alloc_limbs(&self, len: usize) -> &mut [u64] {
        self.arena.bump.alloc_slice_fill_default(len)
    }
}

impl Drop for ArenaScope<'_> {
    fn drop(&mut self) {
        let bytes = self.arena.bump.allocated_bytes();
        let stats = &mut self.arena.stats;
        stats.peak_bytes = stats.peak_bytes.max(bytes as u64);
        global_stats().record_peak(bytes as u64);
        if bytes > self.arena.retain_limit {
            self.arena.bump = Bump::new();
        } else {
            self.arena.bump.reset();
        }
    }
}
