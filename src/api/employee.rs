use crate::{
    error::HrError,
    model::{
        department::Department,
        employee::{EmergencyContact, Employee},
        leave::LeaveBalance,
    },
    store::HrStore,
};
use actix_web::{HttpResponse, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;
use strum::IntoEnumIterator;
use tracing::info;
use utoipa::ToSchema;

#[derive(Deserialize, Serialize, ToSchema)]
pub struct CreateEmployee {
    #[schema(example = "Dana Cruz")]
    pub name: String,
    #[schema(example = "d.cruz@pakque.hr", format = "email")]
    pub email: String,
    #[schema(example = "+1 (555) 456-7890")]
    pub phone: String,
    #[schema(example = "QA Engineer")]
    pub role: String,
    pub department: Department,
    #[schema(example = "2026-02-01", format = "date", value_type = String)]
    pub hire_date: NaiveDate,
    pub emergency_contact: EmergencyContact,
    #[schema(example = 48.5)]
    pub hourly_rate: f64,
    #[schema(nullable = true)]
    pub avatar: Option<String>,
}

/// One `Option` per editable column; absent fields are left untouched.
#[derive(Deserialize, ToSchema)]
pub struct UpdateEmployee {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub role: Option<String>,
    pub department: Option<Department>,
    #[schema(example = "2026-02-01", format = "date", value_type = String)]
    pub hire_date: Option<NaiveDate>,
    pub emergency_contact: Option<EmergencyContact>,
    pub hourly_rate: Option<f64>,
    pub avatar: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct EmployeeQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub department: Option<Department>,
    pub active: Option<bool>,
    pub search: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct EmployeeListResponse {
    pub data: Vec<Employee>,
    #[schema(example = 1)]
    pub page: u32,
    #[schema(example = 20)]
    pub per_page: u32,
    #[schema(example = 3)]
    pub total: usize,
}

fn validate_rate(rate: f64) -> Result<(), HrError> {
    if !rate.is_finite() || rate < 0.0 {
        return Err(HrError::validation(
            "Hourly rate must be a non-negative number",
        ));
    }
    Ok(())
}

/// Register Employee
#[utoipa::path(
    post,
    path = "/api/v1/employees",
    request_body = CreateEmployee,
    responses(
        (status = 201, description = "Employee registered", body = Employee),
        (status = 400, description = "Invalid payload", body = Object, example = json!({
            "message": "Name and email must not be empty"
        }))
    ),
    tag = "Employee"
)]
pub async fn create_employee(
    store: web::Data<HrStore>,
    payload: web::Json<CreateEmployee>,
) -> Result<HttpResponse, HrError> {
    let payload = payload.into_inner();

    let name = payload.name.trim();
    let email = payload.email.trim();
    if name.is_empty() || email.is_empty() {
        return Err(HrError::validation("Name and email must not be empty"));
    }
    validate_rate(payload.hourly_rate)?;

    let mut state = store.write()?;
    let employee = Employee {
        id: state.next_employee_id(),
        name: name.to_string(),
        email: email.to_string(),
        phone: payload.phone,
        role: payload.role,
        department: payload.department,
        hire_date: payload.hire_date,
        emergency_contact: payload.emergency_contact,
        hourly_rate: payload.hourly_rate,
        avatar: payload.avatar,
        is_active: true,
    };
    state.employees.push(employee.clone());
    state
        .leave_balances
        .push(LeaveBalance::seeded(employee.id.clone()));
    store.persist(&state)?;

    info!(employee_id = %employee.id, "Employee registered");
    Ok(HttpResponse::Created().json(employee))
}

// -------------------- Handler --------------------

#[utoipa::path(
    get,
    path = "/api/v1/employees",
    params(
        ("page", Query, description = "Page number"),
        ("per_page", Query, description = "Items per page"),
        ("department", Query, description = "Filter by department"),
        ("active", Query, description = "Filter by active flag"),
        ("search", Query, description = "Search by name or email")
    ),
    responses(
        (status = 200, description = "Paginated employee list", body = EmployeeListResponse)
    ),
    tag = "Employee"
)]
pub async fn list_employees(
    store: web::Data<HrStore>,
    query: web::Query<EmployeeQuery>,
) -> Result<HttpResponse, HrError> {
    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.per_page.unwrap_or(20).clamp(1, 100);
    let offset = ((page - 1) * per_page) as usize;

    let search = query.search.as_ref().map(|s| s.to_lowercase());

    let state = store.read()?;
    let matches: Vec<&Employee> = state
        .employees
        .iter()
        .filter(|e| query.department.is_none_or(|d| e.department == d))
        .filter(|e| query.active.is_none_or(|a| e.is_active == a))
        .filter(|e| {
            search.as_ref().is_none_or(|s| {
                e.name.to_lowercase().contains(s) || e.email.to_lowercase().contains(s)
            })
        })
        .collect();

    let total = matches.len();
    let data: Vec<Employee> = matches
        .into_iter()
        .skip(offset)
        .take(per_page as usize)
        .cloned()
        .collect();

    Ok(HttpResponse::Ok().json(EmployeeListResponse {
        data,
        page,
        per_page,
        total,
    }))
}

/// Get Employee by ID
#[utoipa::path(
    get,
    path = "/api/v1/employees/{employee_id}",
    params(
        ("employee_id", Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Employee found", body = Employee),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "Employee not found"
        }))
    ),
    tag = "Employee"
)]
pub async fn get_employee(
    store: web::Data<HrStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, HrError> {
    let employee_id = path.into_inner();
    let state = store.read()?;
    let employee = state.employee(&employee_id)?;
    Ok(HttpResponse::Ok().json(employee))
}

/// Update Employee
#[utoipa::path(
    put,
    path = "/api/v1/employees/{employee_id}",
    params(
        ("employee_id", Path, description = "Employee ID")
    ),
    request_body = UpdateEmployee,
    responses(
        (status = 200, description = "Employee updated", body = Employee),
        (status = 400, description = "Invalid payload"),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "Employee not found"
        }))
    ),
    tag = "Employee"
)]
pub async fn update_employee(
    store: web::Data<HrStore>,
    path: web::Path<String>,
    payload: web::Json<UpdateEmployee>,
) -> Result<HttpResponse, HrError> {
    let employee_id = path.into_inner();
    let update = payload.into_inner();

    // validate the whole command up front; a rejected edit changes nothing
    if let Some(name) = &update.name {
        if name.trim().is_empty() {
            return Err(HrError::validation("Name must not be empty"));
        }
    }
    if let Some(email) = &update.email {
        if email.trim().is_empty() {
            return Err(HrError::validation("Email must not be empty"));
        }
    }
    if let Some(rate) = update.hourly_rate {
        validate_rate(rate)?;
    }

    let mut state = store.write()?;
    let employee = state.employee_mut(&employee_id)?;

    if let Some(name) = update.name {
        employee.name = name.trim().to_string();
    }
    if let Some(email) = update.email {
        employee.email = email.trim().to_string();
    }
    if let Some(phone) = update.phone {
        employee.phone = phone;
    }
    if let Some(role) = update.role {
        employee.role = role;
    }
    if let Some(department) = update.department {
        employee.department = department;
    }
    if let Some(hire_date) = update.hire_date {
        employee.hire_date = hire_date;
    }
    if let Some(contact) = update.emergency_contact {
        employee.emergency_contact = contact;
    }
    if let Some(rate) = update.hourly_rate {
        employee.hourly_rate = rate;
    }
    if let Some(avatar) = update.avatar {
        employee.avatar = Some(avatar);
    }
    if let Some(is_active) = update.is_active {
        employee.is_active = is_active;
    }

    let updated = employee.clone();
    store.persist(&state)?;

    info!(employee_id = %updated.id, "Employee updated");
    Ok(HttpResponse::Ok().json(updated))
}

/// Deactivate Employee
///
/// Directory rows are never deleted; DELETE flips `is_active` so history
/// (attendance, payroll, leave) keeps resolving.
#[utoipa::path(
    delete,
    path = "/api/v1/employees/{employee_id}",
    params(
        ("employee_id", Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Employee deactivated", body = Object, example = json!({
            "message": "Employee deactivated"
        })),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "Employee not found"
        }))
    ),
    tag = "Employee"
)]
pub async fn deactivate_employee(
    store: web::Data<HrStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, HrError> {
    let employee_id = path.into_inner();

    let mut state = store.write()?;
    state.employee_mut(&employee_id)?.is_active = false;
    store.persist(&state)?;

    info!(employee_id = %employee_id, "Employee deactivated");
    Ok(HttpResponse::Ok().json(json!({
        "message": "Employee deactivated"
    })))
}

/// List Departments
#[utoipa::path(
    get,
    path = "/api/v1/departments",
    responses(
        (status = 200, description = "Fixed department set", body = [Department])
    ),
    tag = "Employee"
)]
pub async fn list_departments() -> HttpResponse {
    let departments: Vec<Department> = Department::iter().collect();
    HttpResponse::Ok().json(departments)
}
