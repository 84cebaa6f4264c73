#![no_main]

use libfuzzer_sys::fuzz_target;

use toomkit_core::reference::reference_mul;
use toomkit_core::{toom53_mul_itch, try_toom53_mul, Limb, MulOptions, PointwiseMode, Thresholds};

fuzz_target!(|data: &[u8]| {
    if data.len() < 3 {
        return;
    }
    // Byte 0 picks the tuning, bytes 1..3 the lengths, the rest fills limbs.
    let thresholds = if data[0] & 1 == 0 {
        Thresholds::MINIMAL
    } else {
        Thresholds::default()
    };
    let pointwise = if data[0] & 2 == 0 {
        PointwiseMode::Direct
    } else {
        PointwiseMode::SplitTop
    };
    let opts = MulOptions::new(thresholds, pointwise);

    let an = usize::from(data[1]) % 160 + 1;
    let bn = usize::from(data[2]) % an + 1;
    let mut bytes = data[3..].iter().copied().cycle();
    let mut limb = || {
        let mut word = [0u8; 8];
        for b in &mut word {
            *b = bytes.next().unwrap_or(0xff);
        }
        Limb::from_le_bytes(word)
    };
    let a: Vec<Limb> = (0..an).map(|_| limb()).collect();
    let b: Vec<Limb> = (0..bn).map(|_| limb()).collect();

    let mut pp = vec![0; an + bn];
    let mut scratch = vec![0; toom53_mul_itch(an, bn, &opts)];
    if try_toom53_mul(&mut pp, &a, &b, &mut scratch, &opts).is_ok() {
        assert_eq!(pp, reference_mul(&a, &b), "{an}x{bn}");
    }
});
