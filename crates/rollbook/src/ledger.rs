//! Attendance ledger: append-only attendance marks.

use chrono::NaiveDate;
use tracing::info;

use crate::clock::Clock;
use crate::error::Result;
use crate::model::{AttendanceRecord, NewAttendance, StudentId};
use crate::storage::Store;

/// Attendance operations over a [`Store`].
///
/// Records are only ever appended. The ledger does not check that the
/// referenced student exists.
#[derive(Debug, Clone, Copy)]
pub struct AttendanceLedger<'a> {
    store: &'a Store,
    clock: &'a dyn Clock,
}

impl<'a> AttendanceLedger<'a> {
    /// Create a ledger over `store`, stamping records with `clock`.
    #[must_use]
    pub fn new(store: &'a Store, clock: &'a dyn Clock) -> Self {
        Self { store, clock }
    }

    /// Append an attendance mark.
    ///
    /// The date defaults to today; the time of day is always the current
    /// time.
    ///
    /// # Errors
    ///
    /// Returns an error if the dataset cannot be loaded or saved.
    pub fn mark(&self, input: NewAttendance) -> Result<AttendanceRecord> {
        let now = self.clock.now();

        let record = self.store.update(|data| {
            let record = AttendanceRecord {
                id: data.next_record_id(),
                student_id: input.student_id,
                date: input.date.unwrap_or_else(|| now.date()),
                status: input.status,
                time: now.time(),
            };
            data.attendance.push(record.clone());
            Ok(record)
        })?;

        info!(
            id = record.id,
            student_id = record.student_id,
            date = %record.date,
            status = %record.status,
            "Marked attendance"
        );
        Ok(record)
    }

    /// All records, or only those for `date`, in storage order.
    ///
    /// # Errors
    ///
    /// Returns an error if the dataset cannot be loaded.
    pub fn list(&self, date: Option<NaiveDate>) -> Result<Vec<AttendanceRecord>> {
        let mut records = self.store.load()?.attendance;
        if let Some(date) = date {
            records.retain(|r| r.date == date);
        }
        Ok(records)
    }

    /// All records for one student, in storage order.
    ///
    /// # Errors
    ///
    /// Returns an error if the dataset cannot be loaded.
    pub fn list_by_student(&self, student_id: StudentId) -> Result<Vec<AttendanceRecord>> {
        Ok(self.store.load()?.records_for(student_id))
    }
}
