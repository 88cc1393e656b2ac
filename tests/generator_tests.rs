#![cfg(feature = "generators")]
//! Tests for the infinite sequence generators.

use lazy_sequence::sequence::Sequence;
use proptest::prelude::*;
use rstest::rstest;

#[rstest]
fn constant_take_returns_exactly_count_copies() {
    let ones = Sequence::constant(1);
    assert_eq!(ones.take(5).to_list(), vec![1; 5]);
    assert!(ones.take(200).for_all(|value| *value == 1));
}

#[rstest]
fn constant_exists_terminates() {
    assert!(Sequence::constant(7).exists(|value| *value == 7));
}

#[rstest]
fn counting_from_exists_terminates() {
    let naturals = Sequence::counting_from(1);
    assert!(naturals.exists(|value| *value == 5));
    assert_eq!(format!("{naturals:?}"), "[1, 2, 3, 4, 5, ..]");
}

#[rstest]
fn fibonacci_first_seven() {
    assert_eq!(Sequence::fibonacci().take(7).to_list(), vec![0, 1, 1, 2, 3, 5, 8]);
    assert_eq!(Sequence::fibonacci_unfold().take(7).to_list(), vec![0, 1, 1, 2, 3, 5, 8]);
}

#[rstest]
fn fibonacci_is_memoized_across_clones() {
    let fibonacci = Sequence::fibonacci();
    let copy = fibonacci.clone();
    assert_eq!(fibonacci.nth(50), Some(12_586_269_025));
    assert!(format!("{copy:?}").ends_with("12586269025, ..]"));
    let prefix = copy.take(3);
    assert_eq!(prefix.to_list(), vec![0, 1, 1]);
    assert_eq!(format!("{prefix:?}"), "[0, 1, 1]");
}

#[rstest]
fn iterate_builds_powers() {
    assert_eq!(Sequence::iterate(1_u32, |value| value * 2).take(6).to_list(), vec![1, 2, 4, 8, 16, 32]);
}

#[rstest]
fn filter_skips_a_run_of_rejected_elements() {
    let distant = Sequence::counting_from(0).filter(|value| *value >= 500);
    assert_eq!(distant.head_option(), Some(500));
    assert_eq!(
        Sequence::counting_from(0).find(|value| *value >= 100_000),
        Some(100_000)
    );
}

#[rstest]
fn generators_compose_with_operations() {
    let evens_squared = Sequence::counting_from(0)
        .filter(|value| value % 2 == 0)
        .map(|value| value * value)
        .take_while(|value| *value < 100);
    assert_eq!(evens_squared.to_list(), vec![0, 4, 16, 36, 64]);
}

#[rstest]
fn zip_all_of_infinite_with_finite_pads_only_the_finite_side() {
    let zipped = Sequence::counting_from(1).zip_all(&Sequence::from_elements(vec!['a']));
    assert_eq!(zipped.take(2).to_list(), vec![(Some(1), Some('a')), (Some(2), None)]);
}

#[rstest]
fn has_subsequence_on_infinite_input() {
    let naturals = Sequence::counting_from(0);
    assert!(naturals.has_subsequence(&Sequence::from_elements(vec![40, 41, 42])));
}

proptest! {
    #[test]
    fn prop_counting_from_agrees_with_unfold(start in -1_000_i64..1_000, count in 0_usize..50) {
        prop_assert_eq!(
            Sequence::counting_from(start).take(count).to_list(),
            Sequence::counting_from_unfold(start).take(count).to_list()
        );
    }

    #[test]
    fn prop_constant_agrees_with_unfold(value in any::<i16>(), count in 0_usize..50) {
        prop_assert_eq!(
            Sequence::constant(value).take(count).to_list(),
            Sequence::constant_unfold(value).take(count).to_list()
        );
    }

    #[test]
    fn prop_fibonacci_recurrence(index in 2_usize..90) {
        let fibonacci = Sequence::fibonacci();
        let window = fibonacci.drop_first(index - 2).take(3).to_list();
        prop_assert_eq!(window[0] + window[1], window[2]);
    }
}
