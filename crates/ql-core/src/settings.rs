//! Global library settings (translates `ql/settings.hpp`).
//!
//! [`Settings`] holds the **evaluation date**: the date that term structures
//! built from a settlement-day offset resolve their reference date against.
//! It is a process-wide singleton accessed via a `std::sync::OnceLock`.
//!
//! The date is stored as a serial number so that this crate does not depend
//! on `ql-time`; `ql_time::Date::evaluation_date` converts it back.

use std::cell::Cell;
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

/// Process-wide settings.
pub struct Settings {
    /// The current evaluation date (days since the QuantLib epoch).
    evaluation_date: Mutex<Option<i32>>,
}

static INSTANCE: OnceLock<Settings> = OnceLock::new();

/// Serializes [`ScopedEvaluationDate`] overrides across threads.
static SCOPE_LOCK: Mutex<()> = Mutex::new(());

thread_local! {
    /// Number of live guards on this thread; only the outermost one holds
    /// `SCOPE_LOCK`.
    static SCOPE_DEPTH: Cell<usize> = const { Cell::new(0) };
}

impl Settings {
    /// Return a reference to the global singleton.
    pub fn instance() -> &'static Settings {
        INSTANCE.get_or_init(|| Settings {
            evaluation_date: Mutex::new(None),
        })
    }

    fn lock(&self) -> MutexGuard<'_, Option<i32>> {
        self.evaluation_date
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Return the current evaluation date serial number, or `None` if no
    /// evaluation date has been set (meaning "use today").
    pub fn evaluation_date_serial(&self) -> Option<i32> {
        *self.lock()
    }

    /// Set the evaluation date as a serial number.
    pub fn set_evaluation_date_serial(&self, serial: i32) {
        *self.lock() = Some(serial);
    }

    /// Clear the evaluation date, resetting it to "use today".
    pub fn reset_evaluation_date(&self) {
        *self.lock() = None;
    }
}

/// RAII guard that sets the evaluation date and restores the previous value
/// when dropped.
///
/// Guards on different threads are mutually exclusive: the outermost guard
/// of a thread blocks until other threads have dropped theirs, so concurrent
/// tests never observe each other's dates. Guards nest on one thread and
/// must be dropped in reverse order of creation.
///
/// # Example
/// ```
/// use ql_core::{ScopedEvaluationDate, Settings};
///
/// {
///     let _outer = ScopedEvaluationDate::new(45_000);
///     {
///         let _inner = ScopedEvaluationDate::new(45_010);
///         assert_eq!(Settings::instance().evaluation_date_serial(), Some(45_010));
///     }
///     assert_eq!(Settings::instance().evaluation_date_serial(), Some(45_000));
/// }
/// ```
pub struct ScopedEvaluationDate {
    previous: Option<i32>,
    _lock: Option<MutexGuard<'static, ()>>,
}

impl ScopedEvaluationDate {
    /// Override the evaluation date with `serial` until the guard is dropped.
    pub fn new(serial: i32) -> Self {
        let depth = SCOPE_DEPTH.with(Cell::get);
        let lock = (depth == 0).then(|| SCOPE_LOCK.lock().unwrap_or_else(PoisonError::into_inner));
        SCOPE_DEPTH.with(|d| d.set(depth + 1));
        let settings = Settings::instance();
        let previous = settings.evaluation_date_serial();
        settings.set_evaluation_date_serial(serial);
        Self {
            previous,
            _lock: lock,
        }
    }
}

impl Drop for ScopedEvaluationDate {
    fn drop(&mut self) {
        let settings = Settings::instance();
        match self.previous {
            Some(serial) => settings.set_evaluation_date_serial(serial),
            None => settings.reset_evaluation_date(),
        }
        SCOPE_DEPTH.with(|d| d.set(d.get().saturating_sub(1)));
    }
}
