#![cfg(feature = "control")]
//! Unit tests for Suspension<T>.
//!
//! Tests cover:
//! - Deferred evaluation and memoization
//! - Aliasing across clones
//! - Poisoned and reentrant states
//! - map and flat_map

use lazy_sequence::control::{Suspension, SuspensionError};
use rstest::rstest;
use std::cell::{Cell, RefCell};
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::rc::Rc;

// =============================================================================
// Basic Construction and Evaluation
// =============================================================================

#[rstest]
fn suspension_defers_computation() {
    let computed = Rc::new(Cell::new(false));
    let flag = Rc::clone(&computed);
    let _suspension = Suspension::new(move || {
        flag.set(true);
        42
    });

    assert!(!computed.get());
}

#[rstest]
fn suspension_force_computes_value() {
    let suspension = Suspension::new(|| "hello".to_string());
    assert_eq!(suspension.force(), "hello");
    assert!(suspension.is_forced());
}

#[rstest]
fn suspension_force_ref_borrows_cached_value() {
    let suspension = Suspension::new(|| vec![1, 2, 3]);
    assert_eq!(suspension.force_ref().iter().sum::<i32>(), 6);
    assert_eq!(suspension.force_ref().len(), 3);
}

#[rstest]
fn suspension_evaluated_is_already_forced() {
    let suspension = Suspension::evaluated(42);
    assert!(suspension.is_forced());
    assert_eq!(suspension.get(), Some(42));
}

#[rstest]
fn suspension_from_value_is_evaluated() {
    let suspension: Suspension<&str> = "ready".into();
    assert!(suspension.is_forced());
}

#[rstest]
fn suspension_default_defers_default_value() {
    let suspension: Suspension<Vec<i32>> = Suspension::default();
    assert!(!suspension.is_forced());
    assert!(suspension.force().is_empty());
}

// =============================================================================
// Memoization
// =============================================================================

#[rstest]
fn suspension_side_effect_runs_once() {
    let call_count = Rc::new(Cell::new(0));
    let counter = Rc::clone(&call_count);
    let suspension = Suspension::new(move || {
        counter.set(counter.get() + 1);
        42
    });

    for _ in 0..5 {
        assert_eq!(suspension.force(), 42);
    }
    assert_eq!(call_count.get(), 1);
}

#[rstest]
fn suspension_clones_share_evaluation() {
    let call_count = Rc::new(Cell::new(0));
    let counter = Rc::clone(&call_count);
    let first = Suspension::new(move || {
        counter.set(counter.get() + 1);
        7
    });
    let second = first.clone();

    assert_eq!(second.force(), 7);
    assert!(first.is_forced());
    assert_eq!(first.force(), 7);
    assert_eq!(call_count.get(), 1);
    assert!(Suspension::ptr_eq(&first, &second));
}

#[rstest]
fn suspension_distinct_suspensions_do_not_alias() {
    let first = Suspension::new(|| 1);
    let second = Suspension::new(|| 1);
    assert!(!Suspension::ptr_eq(&first, &second));
}

#[rstest]
fn suspension_alias_forces_while_borrow_is_held() {
    let suspension = Suspension::new(|| vec![1, 2, 3]);
    let alias = suspension.clone();

    let borrowed = suspension.force_ref();
    assert_eq!(alias.force(), vec![1, 2, 3]);
    assert_eq!(alias.try_force(), Ok(vec![1, 2, 3]));
    assert_eq!(alias.force_ref().len(), 3);
    assert_eq!(borrowed.len(), 3);
}

#[rstest]
fn suspension_evaluated_try_force_while_borrow_is_held() {
    let suspension = Suspension::evaluated(7);
    let borrowed = suspension.force_ref();
    assert_eq!(suspension.try_force(), Ok(7));
    assert_eq!(suspension.force(), 7);
    assert_eq!(*borrowed, 7);
}

// =============================================================================
// Failure
// =============================================================================

#[rstest]
fn suspension_panic_propagates_to_first_forcer() {
    let suspension: Suspension<i32> = Suspension::new(|| panic!("initialization failed"));
    let result = catch_unwind(AssertUnwindSafe(|| suspension.force()));
    assert!(result.is_err());
    assert!(suspension.is_poisoned());
    assert!(!suspension.is_forced());
}

#[rstest]
fn suspension_poisoned_never_reruns_thunk() {
    let call_count = Rc::new(Cell::new(0));
    let counter = Rc::clone(&call_count);
    let suspension: Suspension<i32> = Suspension::new(move || {
        counter.set(counter.get() + 1);
        panic!("boom")
    });

    let _ = catch_unwind(AssertUnwindSafe(|| suspension.force()));
    let second = catch_unwind(AssertUnwindSafe(|| suspension.force()));

    assert!(second.is_err());
    assert_eq!(call_count.get(), 1);
    assert_eq!(suspension.try_force(), Err(SuspensionError::Poisoned));
}

#[rstest]
fn suspension_reentrant_force_fails_instead_of_looping() {
    let slot: Rc<RefCell<Option<Suspension<i32>>>> = Rc::new(RefCell::new(None));
    let inner_slot = Rc::clone(&slot);
    let suspension = Suspension::new(move || {
        let this = inner_slot.borrow().clone().expect("slot is filled before forcing");
        this.force() + 1
    });
    *slot.borrow_mut() = Some(suspension.clone());

    let result = catch_unwind(AssertUnwindSafe(|| suspension.force()));

    assert!(result.is_err());
    assert!(suspension.is_poisoned());
    slot.borrow_mut().take();
}

#[rstest]
fn suspension_error_is_std_error() {
    let error: Box<dyn std::error::Error> = Box::new(SuspensionError::Poisoned);
    assert_eq!(error.to_string(), "Suspension has been poisoned");
}

// =============================================================================
// map and flat_map
// =============================================================================

#[rstest]
fn suspension_map_is_deferred_and_shares_source() {
    let source = Suspension::new(|| 21);
    let doubled = source.map(|value| value * 2);

    assert!(!source.is_forced());
    assert_eq!(doubled.force(), 42);
    assert!(source.is_forced());
}

#[rstest]
fn suspension_flat_map_chains() {
    let source = Suspension::new(|| 20);
    let chained = source.flat_map(|value| Suspension::new(move || value + 22));
    assert_eq!(chained.force(), 42);
}

// =============================================================================
// Debug
// =============================================================================

#[rstest]
#[case::pending(Suspension::new(|| 1), false, "Suspension(\"<pending>\")")]
#[case::forced(Suspension::evaluated(1), false, "Suspension(1)")]
#[case::forced_after_force(Suspension::new(|| 1), true, "Suspension(1)")]
fn suspension_debug(
    #[case] suspension: Suspension<i32>,
    #[case] force_first: bool,
    #[case] expected: &str,
) {
    if force_first {
        suspension.force();
    }
    assert_eq!(format!("{suspension:?}"), expected);
}
