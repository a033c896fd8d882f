use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use utoipa::ToSchema;

use crate::{error::HrError, model::department::Department, store::HrStore};

#[derive(Serialize, Deserialize, ToSchema)]
pub struct DepartmentNetPay {
    pub department: Department,
    #[schema(example = 1560.0)]
    pub net_pay: f64,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct SummaryResponse {
    #[schema(example = 3)]
    pub active_employees: usize,
    #[schema(example = 4200.5)]
    pub total_net_pay: f64,
    /// One row per department, zero included, so charts keep a stable axis.
    pub department_net_pay: Vec<DepartmentNetPay>,
}

/// Dashboard Summary
#[utoipa::path(
    get,
    path = "/api/v1/reports/summary",
    responses(
        (status = 200, description = "Dashboard stats", body = SummaryResponse)
    ),
    tag = "Reports"
)]
pub async fn summary(store: web::Data<HrStore>) -> Result<HttpResponse, HrError> {
    let state = store.read()?;

    let active_employees = state.employees.iter().filter(|e| e.is_active).count();
    let total_net_pay: f64 = state.payroll.iter().map(|r| r.net_pay).sum();

    let department_net_pay = Department::iter()
        .map(|department| DepartmentNetPay {
            department,
            net_pay: state
                .payroll
                .iter()
                .filter(|r| r.department == department)
                .map(|r| r.net_pay)
                .sum(),
        })
        .collect();

    Ok(HttpResponse::Ok().json(SummaryResponse {
        active_employees,
        total_net_pay,
        department_net_pay,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::session;
    use actix_web::{App, test};
    use chrono::{Duration, Utc};
    use tempfile::TempDir;

    #[actix_web::test]
    async fn summary_counts_actives_and_sums_net_pay_per_department() {
        let dir = TempDir::new().unwrap();
        let store = HrStore::open(dir.path()).unwrap();
        {
            let mut state = store.write().unwrap();
            let start = Utc::now() - Duration::hours(3);
            // EMP001 (Engineering, 65/h) works two hours
            session::clock_in(&mut state, "EMP001", None, start).unwrap();
            session::clock_out(&mut state, "EMP001", start + Duration::hours(2)).unwrap();
            // EMP003 goes inactive after the run
            state.employee_mut("EMP003").unwrap().is_active = false;
        }

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(store))
                .route("/reports/summary", web::get().to(summary)),
        )
        .await;

        let req = test::TestRequest::get().uri("/reports/summary").to_request();
        let report: SummaryResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(report.active_employees, 2);
        let expected_net = 2.0 * 65.0 * 0.82;
        assert!((report.total_net_pay - expected_net).abs() < 1e-9);

        assert_eq!(report.department_net_pay.len(), 6);
        let engineering = report
            .department_net_pay
            .iter()
            .find(|row| row.department == Department::Engineering)
            .unwrap();
        assert!((engineering.net_pay - expected_net).abs() < 1e-9);
        let finance = report
            .department_net_pay
            .iter()
            .find(|row| row.department == Department::Finance)
            .unwrap();
        assert_eq!(finance.net_pay, 0.0);
    }

    #[actix_web::test]
    async fn summary_on_fresh_store_is_all_zeroes_except_headcount() {
        let dir = TempDir::new().unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(HrStore::open(dir.path()).unwrap()))
                .route("/reports/summary", web::get().to(summary)),
        )
        .await;

        let req = test::TestRequest::get().uri("/reports/summary").to_request();
        let report: SummaryResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(report.active_employees, 3);
        assert_eq!(report.total_net_pay, 0.0);
    }
}
