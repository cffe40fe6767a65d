//! Rendering of command results for the terminal.

use std::fmt::Write as _;

use serde::Serialize;

use super::OutputFormat;
use crate::error::Result;
use crate::model::{AttendanceRecord, Student};
use crate::report::{StudentAttendance, StudentReport, SystemStatistics};

fn json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Render a list of students.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn students(students: &[Student], format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return json(students);
    }
    if students.is_empty() {
        return Ok("No students registered.".to_string());
    }

    let mut out = String::new();
    if format == OutputFormat::Table {
        let _ = writeln!(
            out,
            "{:<5} {:<24} {:<12} {:<28} {}",
            "ID", "NAME", "ROLL", "EMAIL", "REGISTERED"
        );
    }
    for s in students {
        match format {
            OutputFormat::Table => {
                let _ = writeln!(
                    out,
                    "{:<5} {:<24} {:<12} {:<28} {}",
                    s.id,
                    s.name,
                    s.roll_number,
                    s.email,
                    s.created_date.format("%Y-%m-%d %H:%M:%S")
                );
            }
            _ => {
                let _ = writeln!(out, "{}: {} ({}) <{}>", s.id, s.name, s.roll_number, s.email);
            }
        }
    }
    Ok(out.trim_end().to_string())
}

/// Render one student.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn student(student: &Student, format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return json(student);
    }
    Ok(format!(
        "ID:          {}\nName:        {}\nRoll number: {}\nEmail:       {}\nRegistered:  {}",
        student.id,
        student.name,
        student.roll_number,
        student.email,
        student.created_date.format("%Y-%m-%d %H:%M:%S")
    ))
}

/// Render attendance records.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn records(records: &[AttendanceRecord], format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return json(records);
    }
    if records.is_empty() {
        return Ok("No attendance records.".to_string());
    }

    let mut out = String::new();
    if format == OutputFormat::Table {
        let _ = writeln!(
            out,
            "{:<5} {:<8} {:<10} {:<8} {}",
            "ID", "STUDENT", "DATE", "STATUS", "TIME"
        );
    }
    for r in records {
        let time = r.time.format("%H:%M:%S");
        match format {
            OutputFormat::Table => {
                let _ = writeln!(
                    out,
                    "{:<5} {:<8} {:<10} {:<8} {}",
                    r.id,
                    r.student_id,
                    r.date.to_string(),
                    r.status,
                    time
                );
            }
            _ => {
                let _ = writeln!(
                    out,
                    "{} student {} {} {} at {}",
                    r.id, r.student_id, r.date, r.status, time
                );
            }
        }
    }
    Ok(out.trim_end().to_string())
}

/// Render one student's records followed by their summary.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn student_attendance(view: &StudentAttendance, format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return json(view);
    }
    Ok(format!(
        "{}\n\nTotal: {}  Present: {}  Absent: {}  Attendance: {:.2}%",
        records(&view.records, format)?,
        view.total,
        view.present,
        view.absent,
        view.attendance_percentage
    ))
}

/// Render the per-student report.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn report(rows: &[StudentReport], format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return json(rows);
    }
    if rows.is_empty() {
        return Ok("No students registered.".to_string());
    }

    let mut out = String::new();
    if format == OutputFormat::Table {
        let _ = writeln!(
            out,
            "{:<5} {:<24} {:<12} {:>7} {:>7} {:>7} {:>8}",
            "ID", "NAME", "ROLL", "CLASSES", "PRESENT", "ABSENT", "RATE"
        );
    }
    for row in rows {
        match format {
            OutputFormat::Table => {
                let _ = writeln!(
                    out,
                    "{:<5} {:<24} {:<12} {:>7} {:>7} {:>7} {:>7.2}%",
                    row.student_id,
                    row.student_name,
                    row.roll_number,
                    row.total_classes,
                    row.present,
                    row.absent,
                    row.percentage
                );
            }
            _ => {
                let _ = writeln!(
                    out,
                    "{} ({}): {}/{} present, {:.2}%",
                    row.student_name,
                    row.roll_number,
                    row.present,
                    row.total_classes,
                    row.percentage
                );
            }
        }
    }
    Ok(out.trim_end().to_string())
}

/// Render system-wide statistics.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn statistics(stats: &SystemStatistics, format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return json(stats);
    }
    Ok(format!(
        "Students:   {}\nRecords:    {}\nPresent:    {}\nAbsent:     {}\nAttendance: {:.2}%",
        stats.total_students,
        stats.total_records,
        stats.total_present,
        stats.total_absent,
        stats.overall_percentage
    ))
}
