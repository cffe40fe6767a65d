//! Attendance statistics.
//!
//! Everything here is pure computation over data that has already been
//! loaded; nothing touches the store.

use serde::Serialize;

use crate::model::{AttendanceRecord, AttendanceStatus, Dataset, StudentId};

/// Present/absent counts over a set of records.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    /// Number of records considered.
    pub total: usize,
    /// Records marked present.
    pub present: usize,
    /// Records marked absent.
    pub absent: usize,
    /// `present / total * 100`, rounded to two decimals; 0 when empty.
    pub percentage: f64,
}

/// One row of the per-student report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentReport {
    /// The student's id.
    pub student_id: StudentId,
    /// The student's name.
    pub student_name: String,
    /// The student's roll number.
    pub roll_number: String,
    /// Number of attendance records for the student.
    pub total_classes: usize,
    /// Records marked present.
    pub present: usize,
    /// Records marked absent.
    pub absent: usize,
    /// Attendance rate in percent.
    #[serde(rename = "attendance_percentage")]
    pub percentage: f64,
}

/// Counts across the whole dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SystemStatistics {
    /// Registered students.
    pub total_students: usize,
    /// Attendance records, including ones for deleted students.
    pub total_records: usize,
    /// Records marked present.
    pub total_present: usize,
    /// Records marked absent.
    pub total_absent: usize,
    /// Attendance rate in percent over all records.
    #[serde(rename = "overall_attendance")]
    pub overall_percentage: f64,
}

/// A student's records together with their summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentAttendance {
    /// The student's records in storage order.
    pub records: Vec<AttendanceRecord>,
    /// Number of records.
    pub total: usize,
    /// Records marked present.
    pub present: usize,
    /// Records marked absent.
    pub absent: usize,
    /// Attendance rate in percent.
    pub attendance_percentage: f64,
}

impl StudentAttendance {
    /// Summarize `records` and keep them alongside the counts.
    #[must_use]
    pub fn from_records(records: Vec<AttendanceRecord>) -> Self {
        let summary = summarize(&records);
        Self {
            records,
            total: summary.total,
            present: summary.present,
            absent: summary.absent,
            attendance_percentage: summary.percentage,
        }
    }
}

/// Count present and absent marks in `records`.
#[must_use]
pub fn summarize(records: &[AttendanceRecord]) -> Summary {
    let present = count_status(records, AttendanceStatus::Present);
    let absent = count_status(records, AttendanceStatus::Absent);
    Summary {
        total: records.len(),
        present,
        absent,
        percentage: percentage(present, records.len()),
    }
}

/// One report row per student, in registration order.
#[must_use]
pub fn per_student_report(dataset: &Dataset) -> Vec<StudentReport> {
    dataset
        .students
        .iter()
        .map(|student| {
            let summary = summarize(&dataset.records_for(student.id));
            StudentReport {
                student_id: student.id,
                student_name: student.name.clone(),
                roll_number: student.roll_number.clone(),
                total_classes: summary.total,
                present: summary.present,
                absent: summary.absent,
                percentage: summary.percentage,
            }
        })
        .collect()
}

/// Totals across every student and every record.
#[must_use]
pub fn system_statistics(dataset: &Dataset) -> SystemStatistics {
    let summary = summarize(&dataset.attendance);
    SystemStatistics {
        total_students: dataset.students.len(),
        total_records: summary.total,
        total_present: summary.present,
        total_absent: summary.absent,
        overall_percentage: summary.percentage,
    }
}

/// `part / whole * 100` rounded to two decimals, or 0 when `whole` is 0.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    let raw = part as f64 / whole as f64 * 100.0;
    // Halves go to the even neighbour: 1/32 is 3.12, not 3.13
    (raw * 100.0).round_ties_even() / 100.0
}

fn count_status(records: &[AttendanceRecord], status: AttendanceStatus) -> usize {
    records.iter().filter(|r| r.status == status).count()
}
