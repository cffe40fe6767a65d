//! The attendance tracker: registry, ledger and reports over one store.

use std::path::Path;
use std::sync::Arc;

use crate::clock::{Clock, SystemClock};
use crate::error::Result;
use crate::ledger::AttendanceLedger;
use crate::model::StudentId;
use crate::registry::StudentRegistry;
use crate::report::{self, StudentAttendance, StudentReport, SystemStatistics};
use crate::storage::Store;

/// Entry point for every attendance operation.
///
/// Cheap to share behind an [`Arc`]; all state lives in the data file.
#[derive(Debug)]
pub struct Tracker {
    store: Store,
    clock: Arc<dyn Clock>,
}

impl Tracker {
    /// Create a tracker over `store` using the local system clock.
    #[must_use]
    pub fn new(store: Store) -> Self {
        Self::with_clock(store, Arc::new(SystemClock))
    }

    /// Create a tracker with an explicit clock.
    #[must_use]
    pub fn with_clock(store: Store, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Open the data file at `path` with the system clock.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(Store::open(path)?))
    }

    /// The underlying store.
    #[must_use]
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Student lifecycle operations.
    #[must_use]
    pub fn students(&self) -> StudentRegistry<'_> {
        StudentRegistry::new(&self.store, self.clock.as_ref())
    }

    /// Attendance operations.
    #[must_use]
    pub fn attendance(&self) -> AttendanceLedger<'_> {
        AttendanceLedger::new(&self.store, self.clock.as_ref())
    }

    /// One student's records with their summary.
    ///
    /// Works for ids with no registered student, such as records left behind
    /// by a deleted student.
    ///
    /// # Errors
    ///
    /// Returns an error if the dataset cannot be loaded.
    pub fn student_attendance(&self, student_id: StudentId) -> Result<StudentAttendance> {
        let records = self.attendance().list_by_student(student_id)?;
        Ok(StudentAttendance::from_records(records))
    }

    /// Per-student report rows in registration order.
    ///
    /// # Errors
    ///
    /// Returns an error if the dataset cannot be loaded.
    pub fn report(&self) -> Result<Vec<StudentReport>> {
        Ok(report::per_student_report(&self.store.load()?))
    }

    /// Totals across the whole dataset.
    ///
    /// # Errors
    ///
    /// Returns an error if the dataset cannot be loaded.
    pub fn statistics(&self) -> Result<SystemStatistics> {
        Ok(report::system_statistics(&self.store.load()?))
    }
}
