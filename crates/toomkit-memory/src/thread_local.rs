//! One scratch arena per thread.

use std::cell::RefCell;

use crate::arena::ScratchArena;

thread_local! {
    static ARENA: RefCell<ScratchArena> = RefCell::new(ScratchArena::new());
}

/// Run `f` with this thread's arena.
///
/// A nested call on the same thread gets a fresh temporary arena instead of
/// the busy one.
pub fn with_thread_arena<R>(f: impl FnOnce(&mut ScratchArena) -> R) -> R {
    ARENA.with(|cell| match cell.try_borrow_mut() {
        Ok(mut arena) => f(&mut arena),
        Err(_) => f(&mut ScratchArena::new()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arena_is_reused_across_calls() {
        let before = with_thread_arena(|arena| arena.stats().scopes);
        with_thread_arena(|arena| {
            let scope = arena.scope();
            let _ = scope.alloc_limbs(16);
        });
        let after = with_thread_arena(|arena| arena.stats().scopes);
        assert_eq!(after, before + 1);
    }

    #[test]
    fn nested_call_gets_separate_arena() {
        with_thread_arena(|outer| {
            let scope = outer.scope();
            let a = scope.alloc_limbs(4);
            a[0] = 7;
            let inner_scopes = with_thread_arena(|inner| {
                let s = inner.scope();
                s.alloc_limbs(4)[0] = 9;
                drop(s);
                inner.stats().scopes
            });
            assert_eq!(inner_scopes, 1);
            assert_eq!(a[0], 7);
        });
    }

    #[test]
    fn threads_have_independent_arenas() {
        with_thread_arena(|arena| drop(arena.scope()));
        let other = std::thread::spawn(|| with_thread_arena(|arena| arena.stats().scopes))
            .join()
            .unwrap();
        assert_eq!(other, 0);
    }
}
