use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::department::Department;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "id": "EMP001",
        "name": "Sarah Jenkins",
        "email": "s.jenkins@pakque.hr",
        "phone": "+1 (555) 123-4567",
        "role": "Senior Developer",
        "department": "Engineering",
        "hire_date": "2022-03-15",
        "emergency_contact": {
            "name": "Robert Jenkins",
            "phone": "+1 (555) 987-6543",
            "relationship": "Spouse"
        },
        "hourly_rate": 65.0,
        "avatar": null,
        "is_active": true
    })
)]
pub struct Employee {
    #[schema(example = "EMP001")]
    pub id: String,

    #[schema(example = "Sarah Jenkins")]
    pub name: String,

    #[schema(example = "s.jenkins@pakque.hr")]
    pub email: String,

    #[schema(example = "+1 (555) 123-4567")]
    pub phone: String,

    /// Free-text job title.
    #[schema(example = "Senior Developer")]
    pub role: String,

    pub department: Department,

    #[schema(example = "2022-03-15", value_type = String, format = "date")]
    pub hire_date: NaiveDate,

    pub emergency_contact: EmergencyContact,

    /// Non-negative; read by the payroll deriver, never written by it.
    #[schema(example = 65.0)]
    pub hourly_rate: f64,

    /// Avatar URL or data URI. Upload mechanics live outside this service.
    #[schema(nullable = true)]
    pub avatar: Option<String>,

    /// Deactivation replaces deletion; rows are never removed.
    #[schema(example = true)]
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EmergencyContact {
    #[schema(example = "Robert Jenkins")]
    pub name: String,

    #[schema(example = "+1 (555) 987-6543")]
    pub phone: String,

    #[schema(example = "Spouse")]
    pub relationship: String,
}
