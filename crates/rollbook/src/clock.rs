//! Source of local wall-clock time.
//!
//! Student registration stamps and attendance marks use local time truncated
//! to whole seconds. The [`Clock`] trait lets tests pin that time.

use chrono::{Local, NaiveDateTime, SubsecRound};

/// Supplies the current local time.
pub trait Clock: Send + Sync + std::fmt::Debug {
    /// The current local date and time, with no sub-second component.
    fn now(&self) -> NaiveDateTime;
}

/// The host's local clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local().trunc_subsecs(0)
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0.trunc_subsecs(0)
    }
}
