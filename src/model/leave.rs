use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::Display;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LeaveRequest {
    #[schema(example = "7f3c2c1e-9a40-4e2b-8a77-0c6e5d2b9f13")]
    pub id: String,

    #[schema(example = "EMP002")]
    pub employee_id: String,

    pub leave_type: LeaveType,

    #[schema(example = "2026-02-10", value_type = String, format = "date")]
    pub start_date: NaiveDate,

    #[schema(example = "2026-02-12", value_type = String, format = "date")]
    pub end_date: NaiveDate,

    #[schema(example = "Family visit")]
    pub reason: String,

    pub status: LeaveStatus,

    #[schema(example = "2026-01-20T08:30:00Z", value_type = String, format = "date-time")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LeaveType {
    Vacation,
    Sick,
    Personal,
    Unpaid,
}

/// Requests are submitted as `pending` and transition exactly once, to
/// `approved` or `rejected`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
}

/// Seeded once per employee and read back; no accrual arithmetic anywhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LeaveBalance {
    #[schema(example = "EMP001")]
    pub employee_id: String,

    #[schema(example = 15)]
    pub vacation: u32,

    #[schema(example = 10)]
    pub sick: u32,

    #[schema(example = 5)]
    pub personal: u32,
}

impl LeaveBalance {
    /// The standard allocation every employee starts with.
    pub fn seeded(employee_id: String) -> Self {
        Self {
            employee_id,
            vacation: 15,
            sick: 10,
            personal: 5,
        }
    }
}
