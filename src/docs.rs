use crate::api::attendance::{
    AttendanceListResponse, AttendanceQuery, ClockInRequest, ClockOutRequest, ClockOutResponse,
};
use crate::api::employee::{
    CreateEmployee, EmployeeListResponse, EmployeeQuery, UpdateEmployee,
};
use crate::api::insight::InsightResponse;
use crate::api::leave_request::{CreateLeave, LeaveFilter, LeaveListResponse};
use crate::api::payroll::{PaginatedPayrollResponse, PayrollQuery};
use crate::api::reports::{DepartmentNetPay, SummaryResponse};
use crate::ledger::session::SessionStatus;
use crate::model::attendance::{AttendanceRecord, AttendanceStatus, GeoPoint};
use crate::model::department::Department;
use crate::model::employee::{EmergencyContact, Employee};
use crate::model::leave::{LeaveBalance, LeaveRequest, LeaveStatus, LeaveType};
use crate::model::payroll::{PayrollRecord, PayrollStatus};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Pakque HRM API",
        version = "1.0.0",
        description = r#"
## Pakque HR & Labour Relations Partner

This API powers the **Pakque HRM** dashboard: a self-contained HR
administration service with snapshot persistence and an AI insight panel.

### 🔹 Key Features
- **Employee Directory**
  - Register, update, list, and deactivate employee profiles
- **Attendance Tracking**
  - Clock-in / clock-out sessions with live elapsed-time status
- **Payroll**
  - Payroll records derived automatically from every completed session
- **Leave Management**
  - Submit leave requests, approve/reject them, and read seeded balances
- **Reports & Insights**
  - Dashboard summary numbers and AI-generated workforce insights

### 📦 Response Format
- JSON-based RESTful responses
- Pagination supported for list endpoints
- Errors use a uniform `{"message": "..."}` body

### 🚀 Usage
Use this API to build:
- HR dashboards
- Employee self-service portals
- Attendance kiosks

---
Built with **Rust**, **Actix Web**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::leave_request::leave_list,
        crate::api::leave_request::get_leave,
        crate::api::leave_request::create_leave,
        crate::api::leave_request::approve_leave,
        crate::api::leave_request::reject_leave,
        crate::api::leave_request::get_leave_balance,

        crate::api::attendance::clock_in,
        crate::api::attendance::clock_out,
        crate::api::attendance::list_attendance,
        crate::api::attendance::session_status,

        crate::api::employee::create_employee,
        crate::api::employee::get_employee,
        crate::api::employee::list_employees,
        crate::api::employee::update_employee,
        crate::api::employee::deactivate_employee,
        crate::api::employee::list_departments,

        crate::api::payroll::get_payroll,
        crate::api::payroll::list_payrolls,

        crate::api::reports::summary,

        crate::api::insight::generate_insight
    ),
    components(
        schemas(
            Department,
            Employee,
            EmergencyContact,
            CreateEmployee,
            UpdateEmployee,
            EmployeeQuery,
            EmployeeListResponse,
            AttendanceRecord,
            AttendanceStatus,
            GeoPoint,
            ClockInRequest,
            ClockOutRequest,
            ClockOutResponse,
            AttendanceQuery,
            AttendanceListResponse,
            SessionStatus,
            PayrollRecord,
            PayrollStatus,
            PayrollQuery,
            PaginatedPayrollResponse,
            LeaveRequest,
            LeaveType,
            LeaveStatus,
            LeaveBalance,
            CreateLeave,
            LeaveFilter,
            LeaveListResponse,
            SummaryResponse,
            DepartmentNetPay,
            InsightResponse
        )
    ),
    tags(
        (name = "Employee", description = "Employee directory APIs"),
        (name = "Attendance", description = "Attendance session APIs"),
        (name = "Payroll", description = "Derived payroll APIs"),
        (name = "Leave", description = "Leave management APIs"),
        (name = "Reports", description = "Dashboard reporting APIs"),
        (name = "Insights", description = "AI insight APIs"),
    )
)]
pub struct ApiDoc;
