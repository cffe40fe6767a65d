//! Route handlers.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{ApiError, AppState};
use crate::error::{Error, Result};
use crate::model::{
    AttendanceRecord, NewAttendance, NewStudent, Student, StudentId, StudentUpdate,
};
use crate::report::{StudentAttendance, StudentReport, SystemStatistics};
use crate::tracker::Tracker;

const DATE_FORMAT: &str = "%Y-%m-%d";

type ApiResult<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Serialize)]
pub(super) struct Message {
    message: &'static str,
}

#[derive(Debug, Serialize)]
pub(super) struct StudentMessage {
    message: &'static str,
    student: Student,
}

#[derive(Debug, Serialize)]
pub(super) struct RecordMessage {
    message: &'static str,
    record: AttendanceRecord,
}

#[derive(Debug, Deserialize)]
pub(super) struct AttendanceQuery {
    date: Option<String>,
}

impl AttendanceQuery {
    /// An empty `date` parameter means no filter. Anything else must be the
    /// exact `YYYY-MM-DD` text; `2024-1-10` or padded values are rejected.
    fn date(&self) -> Result<Option<NaiveDate>> {
        let raw = match self.date.as_deref() {
            None | Some("") => return Ok(None),
            Some(raw) => raw,
        };
        NaiveDate::parse_from_str(raw, DATE_FORMAT)
            .ok()
            .filter(|date| date.format(DATE_FORMAT).to_string() == raw)
            .map(Some)
            .ok_or_else(|| Error::invalid_input(format!("date '{raw}' is not YYYY-MM-DD")))
    }
}

/// Run a tracker operation on the blocking pool.
async fn blocking<T, F>(state: &AppState, f: F) -> ApiResult<T>
where
    F: FnOnce(&Tracker) -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    let tracker = std::sync::Arc::clone(&state.tracker);
    tokio::task::spawn_blocking(move || f(&tracker))
        .await
        .map_err(|err| Error::internal(format!("store task failed: {err}")))?
        .map_err(ApiError::from)
}

pub(super) async fn list_students(State(state): State<AppState>) -> ApiResult<Json<Vec<Student>>> {
    let students = blocking(&state, |t| t.students().list()).await?;
    Ok(Json(students))
}

pub(super) async fn create_student(
    State(state): State<AppState>,
    body: std::result::Result<Json<NewStudent>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<StudentMessage>)> {
    let Json(input) = body?;
    let student = blocking(&state, move |t| t.students().create(input)).await?;
    Ok((
        StatusCode::CREATED,
        Json(StudentMessage {
            message: "Student added successfully",
            student,
        }),
    ))
}

pub(super) async fn get_student(
    State(state): State<AppState>,
    id: std::result::Result<Path<StudentId>, PathRejection>,
) -> ApiResult<Json<Student>> {
    let Path(id) = id?;
    let student = blocking(&state, move |t| t.students().get(id)).await?;
    Ok(Json(student))
}

pub(super) async fn update_student(
    State(state): State<AppState>,
    id: std::result::Result<Path<StudentId>, PathRejection>,
    body: std::result::Result<Json<StudentUpdate>, JsonRejection>,
) -> ApiResult<Json<StudentMessage>> {
    let Path(id) = id?;
    let changes = match body {
        Ok(Json(changes)) => changes,
        Err(rejection) => {
            // A missing student is reported before a bad body
            blocking(&state, move |t| t.students().get(id)).await?;
            return Err(rejection.into());
        }
    };
    let student = blocking(&state, move |t| t.students().update(id, changes)).await?;
    Ok(Json(StudentMessage {
        message: "Student updated",
        student,
    }))
}

pub(super) async fn delete_student(
    State(state): State<AppState>,
    id: std::result::Result<Path<StudentId>, PathRejection>,
) -> ApiResult<Json<Message>> {
    let Path(id) = id?;
    blocking(&state, move |t| t.students().delete(id)).await?;
    Ok(Json(Message {
        message: "Student deleted",
    }))
}

pub(super) async fn list_attendance(
    State(state): State<AppState>,
    query: std::result::Result<Query<AttendanceQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<AttendanceRecord>>> {
    let Query(query) = query?;
    let date = query.date()?;
    let records = blocking(&state, move |t| t.attendance().list(date)).await?;
    Ok(Json(records))
}

pub(super) async fn mark_attendance(
    State(state): State<AppState>,
    body: std::result::Result<Json<NewAttendance>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<RecordMessage>)> {
    let Json(input) = body?;
    let record = blocking(&state, move |t| t.attendance().mark(input)).await?;
    Ok((
        StatusCode::CREATED,
        Json(RecordMessage {
            message: "Attendance marked",
            record,
        }),
    ))
}

pub(super) async fn student_attendance(
    State(state): State<AppState>,
    student_id: std::result::Result<Path<StudentId>, PathRejection>,
) -> ApiResult<Json<StudentAttendance>> {
    let Path(student_id) = student_id?;
    let view = blocking(&state, move |t| t.student_attendance(student_id)).await?;
    Ok(Json(view))
}

pub(super) async fn attendance_report(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<StudentReport>>> {
    let report = blocking(&state, Tracker::report).await?;
    Ok(Json(report))
}

pub(super) async fn statistics(State(state): State<AppState>) -> ApiResult<Json<SystemStatistics>> {
    let stats = blocking(&state, Tracker::statistics).await?;
    Ok(Json(stats))
}
