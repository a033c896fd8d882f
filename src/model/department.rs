use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};
use utoipa::ToSchema;

/// Fixed set of organizational units. Payroll records copy the owning
/// employee's department at derivation time, so the wire strings below are
/// part of the snapshot format and must stay stable.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, Display, EnumIter,
)]
pub enum Department {
    Engineering,
    #[serde(rename = "People & Culture")]
    #[strum(serialize = "People & Culture")]
    PeopleAndCulture,
    Design,
    Sales,
    Marketing,
    Finance,
}
