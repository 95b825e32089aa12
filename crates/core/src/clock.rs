//! Source of "today" for date-based rules.
//!
//! Handlers never read the system clock directly; they ask the [`Clock`]
//! held in application state so tests can pin the date.

use chrono::Local;

use crate::types::Date;

/// Provides the current calendar date.
pub trait Clock: Send + Sync {
    fn today(&self) -> Date;
}

/// Wall-clock date in the server's local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> Date {
        Local::now().date_naive()
    }
}

/// Always reports the same date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub Date);

impl Clock for FixedClock {
    fn today(&self) -> Date {
        self.0
    }
}
