use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{error::HrError, model::payroll::PayrollRecord, store::HrStore};

// Payroll rows are derived at clock-out and immutable afterwards, so this
// surface is read-only.

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct PayrollQuery {
    #[schema(example = 1)]
    pub page: Option<u32>,

    #[schema(example = 10)]
    pub per_page: Option<u32>,

    #[schema(example = "EMP001")]
    pub employee_id: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct PaginatedPayrollResponse {
    pub data: Vec<PayrollRecord>,
    pub page: u32,
    pub per_page: u32,
    pub total: usize,
}

#[utoipa::path(
    get,
    path = "/api/v1/payroll",
    params(PayrollQuery),
    responses(
        (status = 200, description = "Payroll records, newest first", body = PaginatedPayrollResponse)
    ),
    tag = "Payroll"
)]
pub async fn list_payrolls(
    store: web::Data<HrStore>,
    query: web::Query<PayrollQuery>,
) -> Result<HttpResponse, HrError> {
    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.per_page.unwrap_or(10).clamp(1, 100);
    let offset = ((page - 1) * per_page) as usize;

    let state = store.read()?;
    let matches: Vec<&PayrollRecord> = state
        .payroll
        .iter()
        .rev()
        .filter(|r| {
            query
                .employee_id
                .as_ref()
                .is_none_or(|id| &r.employee_id == id)
        })
        .collect();

    let total = matches.len();
    let data: Vec<PayrollRecord> = matches
        .into_iter()
        .skip(offset)
        .take(per_page as usize)
        .cloned()
        .collect();

    Ok(HttpResponse::Ok().json(PaginatedPayrollResponse {
        data,
        page,
        per_page,
        total,
    }))
}

#[utoipa::path(
    get,
    path = "/api/v1/payroll/{payroll_id}",
    params(
        ("payroll_id", description = "Payroll record ID")
    ),
    responses(
        (status = 200, body = PayrollRecord),
        (status = 404, description = "Payroll record not found", body = Object, example = json!({
            "message": "Payroll record not found"
        }))
    ),
    tag = "Payroll"
)]
pub async fn get_payroll(
    store: web::Data<HrStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, HrError> {
    let payroll_id = path.into_inner();

    let state = store.read()?;
    let record = state
        .payroll
        .iter()
        .find(|r| r.id == payroll_id)
        .ok_or_else(|| HrError::not_found("Payroll record not found"))?;

    Ok(HttpResponse::Ok().json(record))
}
