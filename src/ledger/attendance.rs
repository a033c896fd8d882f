use chrono::{DateTime, Local, Utc};
use uuid::Uuid;

use crate::error::HrError;
use crate::model::attendance::{AttendanceRecord, AttendanceStatus, GeoPoint};
use crate::store::HrState;

/// Opens a clock session for `employee_id` at `now`.
///
/// Rejects unknown employees, inactive employees and a second clock-in
/// while a session is already open; the one-open-session-per-employee
/// invariant is enforced here, at the ledger boundary.
pub fn clock_in(
    state: &mut HrState,
    employee_id: &str,
    location: Option<GeoPoint>,
    now: DateTime<Utc>,
) -> Result<AttendanceRecord, HrError> {
    let employee = state.employee(employee_id)?;
    if !employee.is_active {
        return Err(HrError::invalid_state(
            "Employee is deactivated and cannot clock in",
        ));
    }
    if state.open_sessions.contains_key(employee_id) {
        return Err(HrError::invalid_state("Already clocked in"));
    }

    let record = AttendanceRecord {
        id: Uuid::new_v4().to_string(),
        employee_id: employee_id.to_string(),
        date: now.with_timezone(&Local).date_naive(),
        clock_in: now,
        clock_out: None,
        location,
        status: AttendanceStatus::Present,
    };
    state
        .open_sessions
        .insert(employee_id.to_string(), record.id.clone());
    state.attendance.push(record.clone());
    Ok(record)
}

/// Closes the open session for `employee_id` at `now` and returns the
/// closed record. Correlation runs through the record id held in the
/// open-session map, never through timestamp equality.
pub fn clock_out(
    state: &mut HrState,
    employee_id: &str,
    now: DateTime<Utc>,
) -> Result<AttendanceRecord, HrError> {
    let record_id = state
        .open_sessions
        .get(employee_id)
        .cloned()
        .ok_or_else(|| HrError::not_found("No open session for employee"))?;

    let record = state
        .attendance
        .iter_mut()
        .find(|r| r.id == record_id)
        .ok_or_else(|| {
            HrError::internal("open-session map points at a missing attendance record")
        })?;

    record.clock_out = Some(now);
    let closed = record.clone();
    state.open_sessions.remove(employee_id);
    Ok(closed)
}

/// The employee's open record, if any. `Err` only for real faults, never
/// for "not clocked in".
pub fn open_record<'a>(
    state: &'a HrState,
    employee_id: &str,
) -> Result<Option<&'a AttendanceRecord>, HrError> {
    let Some(record_id) = state.open_sessions.get(employee_id) else {
        return Ok(None);
    };
    state
        .attendance
        .iter()
        .find(|r| &r.id == record_id)
        .map(Some)
        .ok_or_else(|| HrError::internal("open-session map points at a missing attendance record"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        "2026-01-05T09:00:00Z".parse().unwrap()
    }

    #[test]
    fn clock_in_opens_a_present_session() {
        let mut state = HrState::seeded();
        let record = clock_in(&mut state, "EMP001", None, now()).unwrap();

        assert_eq!(record.employee_id, "EMP001");
        assert_eq!(record.clock_in, now());
        assert!(record.clock_out.is_none());
        assert_eq!(record.status, AttendanceStatus::Present);
        assert_eq!(record.date, now().with_timezone(&Local).date_naive());

        assert_eq!(state.attendance.len(), 1);
        assert_eq!(state.open_sessions.get("EMP001"), Some(&record.id));
    }

    #[test]
    fn clock_in_keeps_best_effort_location() {
        let mut state = HrState::seeded();
        let here = GeoPoint {
            lat: -33.9249,
            lng: 18.4241,
        };
        let record = clock_in(&mut state, "EMP001", Some(here), now()).unwrap();
        assert_eq!(record.location, Some(here));

        // absence never blocks clock-in
        let record = clock_in(&mut state, "EMP002", None, now()).unwrap();
        assert!(record.location.is_none());
    }

    #[test]
    fn second_clock_in_while_open_conflicts() {
        let mut state = HrState::seeded();
        clock_in(&mut state, "EMP001", None, now()).unwrap();

        let err = clock_in(&mut state, "EMP001", None, now()).unwrap_err();
        assert!(matches!(err, HrError::InvalidState { .. }));
        // no second uncorrelated open record
        assert_eq!(state.attendance.len(), 1);
    }

    #[test]
    fn different_employees_clock_in_independently() {
        let mut state = HrState::seeded();
        clock_in(&mut state, "EMP001", None, now()).unwrap();
        clock_in(&mut state, "EMP002", None, now()).unwrap();
        assert_eq!(state.open_sessions.len(), 2);
    }

    #[test]
    fn unknown_employee_cannot_clock_in() {
        let mut state = HrState::seeded();
        let err = clock_in(&mut state, "EMP999", None, now()).unwrap_err();
        assert!(matches!(err, HrError::NotFound { .. }));
    }

    #[test]
    fn deactivated_employee_cannot_clock_in() {
        let mut state = HrState::seeded();
        state.employee_mut("EMP001").unwrap().is_active = false;
        let err = clock_in(&mut state, "EMP001", None, now()).unwrap_err();
        assert!(matches!(err, HrError::InvalidState { .. }));
    }

    #[test]
    fn clock_out_closes_exactly_once() {
        let mut state = HrState::seeded();
        let opened = clock_in(&mut state, "EMP001", None, now()).unwrap();

        let later = now() + chrono::Duration::hours(8);
        let closed = clock_out(&mut state, "EMP001", later).unwrap();
        assert_eq!(closed.id, opened.id);
        assert_eq!(closed.clock_out, Some(later));
        assert!(state.open_sessions.is_empty());

        let err = clock_out(&mut state, "EMP001", later).unwrap_err();
        assert!(matches!(err, HrError::NotFound { .. }));
    }

    #[test]
    fn clock_out_without_session_is_not_found() {
        let mut state = HrState::seeded();
        let err = clock_out(&mut state, "EMP001", now()).unwrap_err();
        assert!(matches!(err, HrError::NotFound { .. }));
    }

    #[test]
    fn new_session_allowed_after_close() {
        let mut state = HrState::seeded();
        let first = clock_in(&mut state, "EMP001", None, now()).unwrap();
        clock_out(&mut state, "EMP001", now() + chrono::Duration::hours(1)).unwrap();

        let second = clock_in(
            &mut state,
            "EMP001",
            None,
            now() + chrono::Duration::hours(2),
        )
        .unwrap();
        assert_ne!(second.id, first.id);
        assert_eq!(state.attendance.len(), 2);
        assert_eq!(state.open_sessions.get("EMP001"), Some(&second.id));
    }

    #[test]
    fn open_record_reflects_session_state() {
        let mut state = HrState::seeded();
        assert!(open_record(&state, "EMP001").unwrap().is_none());

        let opened = clock_in(&mut state, "EMP001", None, now()).unwrap();
        let found = open_record(&state, "EMP001").unwrap().unwrap();
        assert_eq!(found.id, opened.id);
    }
}
