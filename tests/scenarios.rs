//! End-to-end scenarios for the two unbalanced kernels.

use num_bigint::BigUint;
use num_integer::Integer;

use toomkit_core::reference::from_limbs;
use toomkit_core::toom53::toom53_split;
use toomkit_core::{
    mul, mul_itch, toom44_admissible, toom44_mul, toom44_mul_itch, toom53_admissible, toom53_mul,
    toom53_mul_itch, Limb, MulOptions, PointwiseMode, Thresholds, Toom, Variant,
};
use toomkit_tests::{all_ones, assert_product, random_limbs, rng};

fn toom44(a: &[Limb], b: &[Limb], opts: &MulOptions) -> Vec<Limb> {
    let mut pp = vec![0; a.len() + b.len()];
    let mut scratch = vec![0; toom44_mul_itch(a.len(), b.len(), opts)];
    toom44_mul(&mut pp, a, b, &mut scratch, opts);
    pp
}

fn toom53(a: &[Limb], b: &[Limb], opts: &MulOptions) -> Vec<Limb> {
    let mut pp = vec![0; a.len() + b.len()];
    let mut scratch = vec![0; toom53_mul_itch(a.len(), b.len(), opts)];
    toom53_mul(&mut pp, a, b, &mut scratch, opts);
    pp
}

// ---------------------------------------------------------------------------
// Scenario 1: all-ones operands
// ---------------------------------------------------------------------------

#[test]
fn all_ones_four_limbs_closed_form() {
    let a = all_ones(4);
    let pp = toom44(&a, &a, &MulOptions::default());
    // (2^256 - 1)^2 = 2^512 - 2^257 + 1
    let want = (BigUint::from(1u32) << 512u32) - (BigUint::from(1u32) << 257u32) + 1u32;
    assert_eq!(from_limbs(&pp), want);
    assert_eq!(pp[0], 1);
    assert_eq!(pp[4], Limb::MAX - 1);
}

#[test]
fn all_ones_every_admissible_shape() {
    let opts = MulOptions::default().with_thresholds(Thresholds::MINIMAL);
    for an in 4..=48 {
        for bn in 3..=an {
            let (a, b) = (all_ones(an), all_ones(bn));
            if toom44_admissible(an, bn) {
                assert_product(&toom44(&a, &b, &opts), &a, &b);
            }
            if toom53_admissible(an, bn) {
                assert_product(&toom53(&a, &b, &opts), &a, &b);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Scenario 2: minimal top chunk
// ---------------------------------------------------------------------------

#[test]
fn single_limb_top_chunk() {
    let mut rng = rng(2);
    let opts = MulOptions::default();
    // 4x4 with s = 1 exists only for an = 4n + 1 with n <= 3
    for an in [4, 7, 10, 13] {
        let a = random_limbs(&mut rng, an);
        let b = random_limbs(&mut rng, an);
        assert_product(&toom44(&a, &b, &opts), &a, &b);
    }
    // 5x3 with s = 1: an = 4n + 1 and bn close to 3n
    let mut ran = 0;
    for n in 2..40 {
        let an = 4 * n + 1;
        for bn in [3 * n - 2, 3 * n - 1, 3 * n] {
            if toom53_admissible(an, bn) && toom53_split(an, bn).1 == 1 {
                let a = random_limbs(&mut rng, an);
                let b = random_limbs(&mut rng, bn);
                assert_product(&toom53(&a, &b, &opts), &a, &b);
                ran += 1;
            }
        }
    }
    assert!(ran > 50);
}

// ---------------------------------------------------------------------------
// Scenario 3: chunk-aligned lengths
// ---------------------------------------------------------------------------

#[test]
fn chunk_aligned_lengths() {
    let mut rng = rng(3);
    let opts = MulOptions::default().with_thresholds(Thresholds::MINIMAL);
    for n in [1, 2, 5, 16, 33] {
        let a = random_limbs(&mut rng, 4 * n);
        let b = random_limbs(&mut rng, 4 * n);
        assert_product(&toom44(&a, &b, &opts), &a, &b);

        let a = random_limbs(&mut rng, 5 * n);
        let b = random_limbs(&mut rng, 3 * n);
        assert!(toom53_admissible(5 * n, 3 * n));
        assert_product(&toom53(&a, &b, &opts), &a, &b);
    }
}

// ---------------------------------------------------------------------------
// Scenario 4: edges of the accepted ratios
// ---------------------------------------------------------------------------

#[test]
fn ratio_edges() {
    let mut rng = rng(4);
    let opts = MulOptions::default();
    for bn in 6..60 {
        // smallest and largest `an` each kernel accepts for this `bn`
        for variant in Variant::ALL {
            let accepted: Vec<usize> = (bn..=3 * bn).filter(|&an| variant.admissible(an, bn)).collect();
            let (Some(&lo), Some(&hi)) = (accepted.first(), accepted.last()) else {
                continue;
            };
            for an in [lo, hi] {
                let a = random_limbs(&mut rng, an);
                let b = random_limbs(&mut rng, bn);
                let pp = match variant {
                    Variant::Toom44 => toom44(&a, &b, &opts),
                    Variant::Toom53 => toom53(&a, &b, &opts),
                };
                assert_product(&pp, &a, &b);
            }
        }
    }
}

#[test]
fn equal_lengths_use_toom44() {
    let mut rng = rng(5);
    for an in 10..40 {
        let a = random_limbs(&mut rng, an);
        let b = random_limbs(&mut rng, an);
        assert_product(&toom44(&a, &b, &MulOptions::default()), &a, &b);
    }
}

// ---------------------------------------------------------------------------
// Scenario 5: random products across all recursion tiers
// ---------------------------------------------------------------------------

#[test]
fn random_fuzz_across_tiers() {
    let mut rng = rng(6);
    let thresholds = Thresholds {
        toom22: 4,
        toom33: 12,
        toom44: 30,
        toom53: 20,
    };
    for pointwise in [PointwiseMode::Direct, PointwiseMode::SplitTop] {
        let toom = Toom::new(MulOptions::new(thresholds, pointwise));
        for bn in (3..260).step_by(7) {
            for an in [bn, bn + bn / 3 + 1, 2 * bn, 5 * bn / 2] {
                for variant in Variant::ALL {
                    if variant.admissible(an, bn) {
                        let a = random_limbs(&mut rng, an);
                        let b = random_limbs(&mut rng, bn);
                        let pp = toom.try_multiply(variant, &a, &b).unwrap();
                        assert_product(&pp, &a, &b);
                    }
                }
            }
        }
    }
}

#[test]
fn product_divides_back_to_operand() {
    let mut rng = rng(7);
    let opts = MulOptions::default().with_thresholds(Thresholds::MINIMAL);
    for (an, bn) in [(120, 90), (200, 100), (333, 250)] {
        let a = random_limbs(&mut rng, an);
        let b = random_limbs(&mut rng, bn);
        let mut rp = vec![0; an + bn];
        let mut scratch = vec![0; mul_itch(an, bn, &opts)];
        mul(&mut rp, &a, &b, &mut scratch, &opts);
        let (q, r) = from_limbs(&rp).div_rem(&from_limbs(&b));
        assert_eq!(q, from_limbs(&a));
        assert_eq!(r, BigUint::default());
    }
}
