#![cfg(feature = "tracing")]
//! Tests for the `tracing` events emitted by Suspension.

use lazy_sequence::control::{Suspension, SuspensionError};
use rstest::rstest;
use std::cell::RefCell;
use std::io;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::rc::Rc;
use std::sync::{Arc, Mutex, PoisonError};

/// Collects formatted log lines in memory.
#[derive(Clone, Default)]
struct CapturedOutput(Arc<Mutex<Vec<u8>>>);

impl CapturedOutput {
    fn contents(&self) -> String {
        let bytes = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl io::Write for CapturedOutput {
    fn write(&mut self, buffer: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buffer);
        Ok(buffer.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[rstest]
fn suspension_lifecycle_emits_events() {
    let output = CapturedOutput::default();
    let writer = output.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        let forced = Suspension::new(|| 42);
        assert_eq!(forced.force(), 42);

        let failing: Suspension<i32> = Suspension::new(|| panic!("boom"));
        assert!(catch_unwind(AssertUnwindSafe(|| failing.force())).is_err());
        assert_eq!(failing.try_force(), Err(SuspensionError::Poisoned));

        let slot: Rc<RefCell<Option<Suspension<i32>>>> = Rc::new(RefCell::new(None));
        let inner_slot = Rc::clone(&slot);
        let reentrant = Suspension::new(move || {
            let this = inner_slot.borrow().clone().expect("slot is filled");
            this.try_force().map_or(-1, |value| value)
        });
        *slot.borrow_mut() = Some(reentrant.clone());
        assert_eq!(reentrant.force(), -1);
        slot.borrow_mut().take();
    });

    let logged = output.contents();
    assert!(logged.contains("forcing suspension"), "{logged}");
    assert!(logged.contains("suspension poisoned"), "{logged}");
    assert!(logged.contains("reentrant force of a running suspension"), "{logged}");
}
