//! # Attendance Handlers
//!
//! ```text
//! GET  /api/admin/employees
//! GET  /api/admin/attendance?year=&month=           records, newest first
//! POST /api/admin/attendance                        mark (replaces same day)
//! GET  /api/admin/attendance/calendar?year=&month=  month grid with summaries
//! GET  /api/admin/attendance/chart?year=&month=     per-day stacked counts
//! GET  /api/admin/attendance/weekdays?year=&month=  absences by weekday
//! ```

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::info;
use workshop_core::attendance::{
    calendar_month, monthly_chart, weekday_absence_chart, CalendarMonth, DayAttendanceRow, WeekdayAbsenceRow,
};
use workshop_core::forms::NewAttendance;
use workshop_core::{AttendanceRecord, Employee};

use super::MonthQuery;
use crate::error::ApiResult;
use crate::state::{AdminSession, AppState};

pub async fn list_employees(_admin: AdminSession, State(state): State<AppState>) -> ApiResult<Json<Vec<Employee>>> {
    Ok(Json(state.store.employees().list()?))
}

pub async fn list_attendance(
    _admin: AdminSession,
    State(state): State<AppState>,
    Query(query): Query<MonthQuery>,
) -> ApiResult<Json<Vec<AttendanceRecord>>> {
    let (year, month) = query.resolve(state.today())?;
    Ok(Json(state.store.attendance().list_month(year, month)?))
}

/// Records one employee's day. A second mark for the same day replaces the first.
pub async fn mark_attendance(
    _admin: AdminSession,
    State(state): State<AppState>,
    Json(form): Json<NewAttendance>,
) -> ApiResult<(StatusCode, Json<AttendanceRecord>)> {
    let employee = state.store.employees().get(form.employee_id.trim())?;
    let id = state.store.attendance().next_id(state.now().timestamp_millis())?;
    let record = state.store.attendance().mark(form.into_record(id)?)?;

    info!(
        employee = %employee.name,
        date = %record.date,
        status = %record.status,
        "Attendance marked"
    );
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn attendance_calendar(
    _admin: AdminSession,
    State(state): State<AppState>,
    Query(query): Query<MonthQuery>,
) -> ApiResult<Json<CalendarMonth>> {
    let (year, month) = query.resolve(state.today())?;
    let records = state.store.attendance().list_month(year, month)?;
    Ok(Json(calendar_month(&records, year, month)?))
}

pub async fn attendance_chart(
    _admin: AdminSession,
    State(state): State<AppState>,
    Query(query): Query<MonthQuery>,
) -> ApiResult<Json<Vec<DayAttendanceRow>>> {
    let (year, month) = query.resolve(state.today())?;
    let records = state.store.attendance().list_month(year, month)?;
    Ok(Json(monthly_chart(&records, year, month)))
}

pub async fn weekday_absences(
    _admin: AdminSession,
    State(state): State<AppState>,
    Query(query): Query<MonthQuery>,
) -> ApiResult<Json<Vec<WeekdayAbsenceRow>>> {
    let (year, month) = query.resolve(state.today())?;
    let records = state.store.attendance().list_month(year, month)?;
    Ok(Json(weekday_absence_chart(&records, year, month)))
}
