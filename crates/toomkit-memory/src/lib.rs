//! # toomkit-memory
//!
//! Scratch memory for the toomkit kernels.
//!
//! The kernels take caller-provided scratch slices. This crate supplies them
//! from bump arenas whose scopes release everything at once, plus a
//! per-thread arena so repeated multiplications reuse the same chunk.
#![warn(missing_docs)]

pub mod arena;
pub mod stats;
pub mod thread_local;

pub use arena::{ArenaScope, ScratchArena, DEFAULT_RETAIN_LIMIT};
pub use stats::{global_stats, ArenaStats};
pub use thread_local::with_thread_arena;
