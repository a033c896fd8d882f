use chrono::{Datelike, Local};
use uuid::Uuid;

use crate::error::HrError;
use crate::model::attendance::AttendanceRecord;
use crate::model::employee::Employee;
use crate::model::payroll::{PayrollRecord, PayrollStatus};

/// Net share of gross pay after the flat 18% deduction.
pub const NET_RATE: f64 = 0.82;

/// Derives one payroll record from a closed attendance session and the
/// owning employee's rate. Pure: the caller appends the result to the
/// payroll ledger.
///
/// Deductions are computed as `gross - net` rather than `gross * 0.18`:
/// `0.82 * g` always lands within `[g/2, 2g]`, where IEEE-754 subtraction
/// is exact, so `net_pay + deductions == gross_pay` holds bit-for-bit for
/// every input. Two independently rounded products would drift.
pub fn derive(record: &AttendanceRecord, employee: &Employee) -> Result<PayrollRecord, HrError> {
    let clock_out = record
        .clock_out
        .ok_or_else(|| HrError::precondition_failed("Attendance record is still open"))?;
    if clock_out < record.clock_in {
        return Err(HrError::precondition_failed(
            "Clock-out precedes clock-in; refusing to derive negative pay",
        ));
    }

    let hours_worked = (clock_out - record.clock_in).num_milliseconds() as f64 / 3_600_000.0;
    let gross_pay = hours_worked * employee.hourly_rate;
    let net_pay = gross_pay * NET_RATE;
    let deductions = gross_pay - net_pay;

    let local = clock_out.with_timezone(&Local);
    Ok(PayrollRecord {
        id: Uuid::new_v4().to_string(),
        employee_id: employee.id.clone(),
        department: employee.department,
        month: local.format("%B").to_string(),
        year: local.year(),
        gross_pay,
        deductions,
        net_pay,
        hours_worked,
        status: PayrollStatus::Pending,
    })
}
