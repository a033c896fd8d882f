use serde::{Deserialize, Serialize};
use strum_macros::Display;
use utoipa::ToSchema;

use crate::model::department::Department;

/// One payroll line, derived exactly once from a closed attendance session.
/// Immutable after creation; the payroll API is read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PayrollRecord {
    #[schema(example = "0d1f2c8a-5e44-4f9b-9c07-1d3a9b6f2e41")]
    pub id: String,

    #[schema(example = "EMP001")]
    pub employee_id: String,

    /// Copied from the employee at derivation time, never live-joined, so a
    /// later department change cannot rewrite past payroll.
    pub department: Department,

    /// English month name taken from the clock-out instant in local time.
    #[schema(example = "January")]
    pub month: String,

    #[schema(example = 2026)]
    pub year: i32,

    #[schema(example = 520.0)]
    pub gross_pay: f64,

    #[schema(example = 93.6)]
    pub deductions: f64,

    #[schema(example = 426.4)]
    pub net_pay: f64,

    #[schema(example = 8.0)]
    pub hours_worked: f64,

    pub status: PayrollStatus,
}

/// Created as `pending`; no further transition is implemented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PayrollStatus {
    Pending,
    Processed,
    Paid,
}
