//! Shared helpers for the workspace-level integration tests.

use num_bigint::BigUint;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use toomkit_core::reference::from_limbs;
use toomkit_core::Limb;

/// Deterministic generator for a test.
#[must_use]
pub fn rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// `len` uniformly random limbs.
pub fn random_limbs(rng: &mut ChaCha8Rng, len: usize) -> Vec<Limb> {
    (0..len).map(|_| rng.gen()).collect()
}

/// `2^(64·len) - 1` as limbs.
#[must_use]
pub fn all_ones(len: usize) -> Vec<Limb> {
    vec![Limb::MAX; len]
}

/// Panic unless `product` holds exactly `a * b` in `a.len() + b.len()` limbs.
pub fn assert_product(product: &[Limb], a: &[Limb], b: &[Limb]) {
    assert_eq!(product.len(), a.len() + b.len(), "product length");
    let want: BigUint = from_limbs(a) * from_limbs(b);
    assert!(
        from_limbs(product) == want,
        "wrong product for {} x {} limbs",
        a.len(),
        b.len()
    );
}
