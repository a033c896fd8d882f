use crate::{
    error::HrError,
    ledger::session::{self, SessionStatus},
    model::{
        attendance::{AttendanceRecord, GeoPoint},
        payroll::PayrollRecord,
    },
    store::HrStore,
};
use actix_web::{HttpResponse, web};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

#[derive(Deserialize, Serialize, ToSchema)]
pub struct ClockInRequest {
    #[schema(example = "EMP001")]
    pub employee_id: String,
    /// Where the punch happened, if the client shared it.
    #[schema(nullable = true)]
    pub location: Option<GeoPoint>,
}

#[derive(Deserialize, Serialize, ToSchema)]
pub struct ClockOutRequest {
    #[schema(example = "EMP001")]
    pub employee_id: String,
}

/// Closing a session always yields both halves of the transaction.
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ClockOutResponse {
    pub attendance: AttendanceRecord,
    pub payroll: PayrollRecord,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AttendanceQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub employee_id: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct AttendanceListResponse {
    pub data: Vec<AttendanceRecord>,
    #[schema(example = 1)]
    pub page: u32,
    #[schema(example = 20)]
    pub per_page: u32,
    #[schema(example = 12)]
    pub total: usize,
}

/// Clock In
#[utoipa::path(
    post,
    path = "/api/v1/attendance/clock-in",
    request_body = ClockInRequest,
    responses(
        (status = 200, description = "Session opened", body = AttendanceRecord),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "Employee not found"
        })),
        (status = 409, description = "Already clocked in", body = Object, example = json!({
            "message": "Employee already has an open session"
        }))
    ),
    tag = "Attendance"
)]
pub async fn clock_in(
    store: web::Data<HrStore>,
    payload: web::Json<ClockInRequest>,
) -> Result<HttpResponse, HrError> {
    let payload = payload.into_inner();
    let now = Utc::now();

    let mut state = store.write()?;
    let record = session::clock_in(&mut state, &payload.employee_id, payload.location, now)?;
    store.persist(&state)?;

    info!(employee_id = %payload.employee_id, record_id = %record.id, "Clock-in");
    Ok(HttpResponse::Ok().json(record))
}

/// Clock Out
///
/// Closes the open session and derives its payroll record in the same
/// write. A rejected derivation leaves the session open and appends
/// nothing.
#[utoipa::path(
    post,
    path = "/api/v1/attendance/clock-out",
    request_body = ClockOutRequest,
    responses(
        (status = 200, description = "Session closed and payroll derived", body = ClockOutResponse),
        (status = 404, description = "No open session", body = Object, example = json!({
            "message": "No open session for employee"
        })),
        (status = 422, description = "Derivation refused")
    ),
    tag = "Attendance"
)]
pub async fn clock_out(
    store: web::Data<HrStore>,
    payload: web::Json<ClockOutRequest>,
) -> Result<HttpResponse, HrError> {
    let payload = payload.into_inner();
    let now = Utc::now();

    let mut state = store.write()?;
    let (attendance, payroll) = session::clock_out(&mut state, &payload.employee_id, now)?;
    store.persist(&state)?;

    info!(
        employee_id = %payload.employee_id,
        record_id = %attendance.id,
        net_pay = payroll.net_pay,
        "Clock-out"
    );
    Ok(HttpResponse::Ok().json(ClockOutResponse {
        attendance,
        payroll,
    }))
}

/// List Attendance
#[utoipa::path(
    get,
    path = "/api/v1/attendance",
    params(
        ("page", Query, description = "Page number"),
        ("per_page", Query, description = "Items per page"),
        ("employee_id", Query, description = "Filter by employee")
    ),
    responses(
        (status = 200, description = "Attendance records, newest first", body = AttendanceListResponse)
    ),
    tag = "Attendance"
)]
pub async fn list_attendance(
    store: web::Data<HrStore>,
    query: web::Query<AttendanceQuery>,
) -> Result<HttpResponse, HrError> {
    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.per_page.unwrap_or(20).clamp(1, 100);
    let offset = ((page - 1) * per_page) as usize;

    let state = store.read()?;
    let matches: Vec<&AttendanceRecord> = state
        .attendance
        .iter()
        .rev()
        .filter(|r| {
            query
                .employee_id
                .as_ref()
                .is_none_or(|id| &r.employee_id == id)
        })
        .collect();

    let total = matches.len();
    let data: Vec<AttendanceRecord> = matches
        .into_iter()
        .skip(offset)
        .take(per_page as usize)
        .cloned()
        .collect();

    Ok(HttpResponse::Ok().json(AttendanceListResponse {
        data,
        page,
        per_page,
        total,
    }))
}

/// Session Status
#[utoipa::path(
    get,
    path = "/api/v1/attendance/session/{employee_id}",
    params(
        ("employee_id", Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Open-session status with elapsed seconds", body = SessionStatus),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "Employee not found"
        }))
    ),
    tag = "Attendance"
)]
pub async fn session_status(
    store: web::Data<HrStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, HrError> {
    let employee_id = path.into_inner();
    let now = Utc::now();

    let state = store.read()?;
    let status = session::session_status(&state, &employee_id, now)?;
    Ok(HttpResponse::Ok().json(status))
}
