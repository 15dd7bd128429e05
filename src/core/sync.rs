//! Synchronization utilities for robust mutex handling
//!
//! Queue operations are infallible, so a lock poisoned by a panicking item
//! callback is recovered rather than surfaced as an error. The recovery is
//! logged so the original panic is not silently forgotten.

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Lock a mutex, recovering the guard if a previous holder panicked
///
/// # Arguments
/// * `mutex` - The mutex to lock
/// * `name` - Short label used in the warning emitted on poison recovery
///
/// # Examples
/// ```
/// use std::sync::Mutex;
/// use drainq::core::sync::lock_or_recover;
///
/// let pending = Mutex::new(vec!["a".to_string()]);
/// lock_or_recover(&pending, "pending").push("b".to_string());
/// assert_eq!(lock_or_recover(&pending, "pending").len(), 2);
/// ```
pub fn lock_or_recover<'a, T>(mutex: &'a Mutex<T>, name: &str) -> MutexGuard<'a, T> {
    mutex.lock().unwrap_or_else(|poison_err: PoisonError<MutexGuard<'a, T>>| {
        log::warn!(
            "Recovered poisoned lock '{}'. A panic occurred while it was held.",
            name
        );
        poison_err.into_inner()
    })
}
