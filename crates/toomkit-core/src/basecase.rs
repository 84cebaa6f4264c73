//! Schoolbook multiplication.

use crate::limb::{self, Limb};

/// `rp = ap * bp` by rows of `addmul_1`; `rp` holds `an + bn` limbs.
pub fn mul_basecase(rp: &mut [Limb], ap: &[Limb], bp: &[Limb]) {
    let (an, bn) = (ap.len(), bp.len());
    debug_assert!(an > 0 && bn > 0);
    debug_assert_eq!(rp.len(), an + bn);
    rp[an] = limb::mul_1(&mut rp[..an], ap, bp[0]);
    for (j, &b) in bp.iter().enumerate().skip(1) {
        rp[j + an] = limb::addmul_1(&mut rp[j..j + an], ap, b);
    }
}
