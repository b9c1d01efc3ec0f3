#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Tag every element with its input position; sorting by the value alone
    // must keep the tags of equal values in input order.
    let mut v: Vec<(u8, usize)> = data.iter().copied().zip(0..).collect();
    timsort::sort_by(&mut v, |a, b| a.0.cmp(&b.0));

    assert!(v
        .windows(2)
        .all(|w| w[0].0 < w[1].0 || (w[0].0 == w[1].0 && w[0].1 < w[1].1)));
});
