use ai_core::{DeterministicRng, SplitMix64};

#[test]
fn range_is_inclusive_and_order_independent() {
    let mut rng = SplitMix64::new(7);
    for _ in 0..256 {
        let v = rng.next_in_range(3, 5);
        assert!((3..=5).contains(&v));
        let w = rng.next_in_range(5, 3);
        assert!((3..=5).contains(&w));
    }
    assert_eq!(rng.next_in_range(9, 9), 9);
}

#[test]
fn full_u64_range_draws_without_overflow() {
    let mut a = SplitMix64::new(11);
    let mut b = SplitMix64::new(11);
    assert_eq!(a.next_in_range(0, u64::MAX), b.next_u64());
    assert_eq!(a.next_in_range(u64::MAX, 0), b.next_u64());
}

#[test]
fn same_seed_same_sequence() {
    let mut a = SplitMix64::new(42);
    let mut b = SplitMix64::new(42);
    for _ in 0..16 {
        assert_eq!(a.next_below(1_000), b.next_below(1_000));
    }
    assert_eq!(a.next_below(0), 0);
}
