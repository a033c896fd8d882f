use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::HrError;
use crate::ledger::{attendance, payroll};
use crate::model::attendance::{AttendanceRecord, GeoPoint};
use crate::model::payroll::PayrollRecord;
use crate::store::HrState;

/// Read-only view of one employee's current session, driving the
/// one-second elapsed display. Performs no writes.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SessionStatus {
    #[schema(example = true)]
    pub active: bool,

    #[schema(nullable = true)]
    pub record_id: Option<String>,

    #[schema(example = "2026-01-05T09:00:00Z", value_type = String, format = "date-time", nullable = true)]
    pub clock_in: Option<DateTime<Utc>>,

    /// Whole seconds since clock-in.
    #[schema(example = 5400, nullable = true)]
    pub elapsed_seconds: Option<i64>,
}

/// Opens a session. Every clock event names its employee explicitly; there
/// is no default actor and no fallback to the first directory entry.
pub fn clock_in(
    state: &mut HrState,
    employee_id: &str,
    location: Option<GeoPoint>,
    now: DateTime<Utc>,
) -> Result<AttendanceRecord, HrError> {
    attendance::clock_in(state, employee_id, location, now)
}

/// Closes the open session and derives its payroll line in one step.
///
/// The derivation runs against the closed candidate before anything is
/// committed: a rejected derivation (skewed clock) leaves the session open
/// and appends nothing, so a closed record is never visible without its
/// payroll record.
pub fn clock_out(
    state: &mut HrState,
    employee_id: &str,
    now: DateTime<Utc>,
) -> Result<(AttendanceRecord, PayrollRecord), HrError> {
    let employee = state.employee(employee_id)?.clone();
    let mut candidate = attendance::open_record(state, employee_id)?
        .ok_or_else(|| HrError::not_found("No open session for employee"))?
        .clone();
    candidate.clock_out = Some(now);
    let payroll_record = payroll::derive(&candidate, &employee)?;

    let closed = attendance::clock_out(state, employee_id, now)?;
    state.payroll.push(payroll_record.clone());
    Ok((closed, payroll_record))
}

pub fn session_status(
    state: &HrState,
    employee_id: &str,
    now: DateTime<Utc>,
) -> Result<SessionStatus, HrError> {
    state.employee(employee_id)?;
    Ok(match attendance::open_record(state, employee_id)? {
        Some(record) => SessionStatus {
            active: true,
            record_id: Some(record.id.clone()),
            clock_in: Some(record.clock_in),
            elapsed_seconds: Some((now - record.clock_in).num_seconds()),
        },
        None => SessionStatus {
            active: false,
            record_id: None,
            clock_in: None,
            elapsed_seconds: None,
        },
    })
}
