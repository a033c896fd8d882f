use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::Display;
use utoipa::ToSchema;

/// One clock session. Created on clock-in with no `clock_out`; mutated
/// exactly once, on clock-out; never deleted. At most one record per
/// employee may have an absent `clock_out` at any time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AttendanceRecord {
    #[schema(example = "b7f9d7e2-3f41-4a36-9d51-8a2f6c1f0e5d")]
    pub id: String,

    #[schema(example = "EMP001")]
    pub employee_id: String,

    /// Calendar date of the clock-in, in the server's local time zone.
    #[schema(example = "2026-01-05", value_type = String, format = "date")]
    pub date: NaiveDate,

    #[schema(example = "2026-01-05T09:00:00Z", value_type = String, format = "date-time")]
    pub clock_in: DateTime<Utc>,

    /// Absent while the session is open.
    #[schema(example = "2026-01-05T17:00:00Z", value_type = String, format = "date-time", nullable = true)]
    pub clock_out: Option<DateTime<Utc>>,

    /// Best-effort coordinates; absence never blocks clock-in.
    #[schema(nullable = true)]
    pub location: Option<GeoPoint>,

    pub status: AttendanceStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GeoPoint {
    #[schema(example = -33.9249)]
    pub lat: f64,

    #[schema(example = 18.4241)]
    pub lng: f64,
}

/// Only `present` is ever produced by the clocking pipeline; the remaining
/// tags exist for imported or hand-entered records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
    OnLeave,
}
