use crate::{
    error::HrError,
    model::leave::{LeaveBalance, LeaveRequest, LeaveStatus, LeaveType},
    store::{HrState, HrStore},
};
use actix_web::{HttpResponse, web};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

#[derive(Deserialize, ToSchema)]
pub struct CreateLeave {
    #[schema(example = "EMP002")]
    pub employee_id: String,
    #[schema(example = "vacation")]
    pub leave_type: LeaveType,
    #[schema(example = "2026-02-10", format = "date", value_type = String)]
    pub start_date: NaiveDate,
    #[schema(example = "2026-02-12", format = "date", value_type = String)]
    pub end_date: NaiveDate,
    #[schema(example = "Family visit")]
    pub reason: String,
}

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct LeaveFilter {
    /// Filter by employee ID
    #[schema(example = "EMP002")]
    pub employee_id: Option<String>,
    /// Filter by leave status
    #[schema(example = "pending")]
    pub status: Option<LeaveStatus>,
    /// Pagination page number (start with 1)
    #[schema(example = 1)]
    pub page: Option<u32>,
    /// Pagination per page number
    #[schema(example = 10)]
    pub per_page: Option<u32>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct LeaveListResponse {
    pub data: Vec<LeaveRequest>,
    #[schema(example = 1)]
    pub page: u32,
    #[schema(example = 10)]
    pub per_page: u32,
    #[schema(example = 1)]
    pub total: usize,
}

/// Moves a pending request to its final status. Requests transition exactly
/// once; anything else is a conflict.
fn resolve(state: &mut HrState, leave_id: &str, verdict: LeaveStatus) -> Result<(), HrError> {
    let request = state
        .leave_requests
        .iter_mut()
        .find(|r| r.id == leave_id)
        .ok_or_else(|| HrError::not_found("Leave request not found"))?;

    if request.status != LeaveStatus::Pending {
        return Err(HrError::invalid_state("Leave request already processed"));
    }

    request.status = verdict;
    Ok(())
}

/* =========================
Create leave request
========================= */
#[utoipa::path(
    post,
    path = "/api/v1/leave",
    request_body(
        content = CreateLeave,
        description = "Leave request payload",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "Leave request submitted", body = LeaveRequest),
        (status = 400, description = "Bad request", body = Object, example = json!({
            "message": "start_date cannot be after end_date"
        })),
        (status = 404, description = "Employee not found")
    ),
    tag = "Leave"
)]
pub async fn create_leave(
    store: web::Data<HrStore>,
    payload: web::Json<CreateLeave>,
) -> Result<HttpResponse, HrError> {
    let payload = payload.into_inner();

    if payload.start_date > payload.end_date {
        return Err(HrError::validation("start_date cannot be after end_date"));
    }

    let mut state = store.write()?;
    state.employee(&payload.employee_id)?;

    let request = LeaveRequest {
        id: Uuid::new_v4().to_string(),
        employee_id: payload.employee_id,
        leave_type: payload.leave_type,
        start_date: payload.start_date,
        end_date: payload.end_date,
        reason: payload.reason,
        status: LeaveStatus::Pending,
        created_at: Utc::now(),
    };
    state.leave_requests.push(request.clone());
    store.persist(&state)?;

    info!(leave_id = %request.id, employee_id = %request.employee_id, "Leave request submitted");
    Ok(HttpResponse::Ok().json(request))
}

/* =========================
Approve leave
========================= */
#[utoipa::path(
    put,
    path = "/api/v1/leave/{leave_id}/approve",
    params(
        ("leave_id", Path, description = "ID of the leave request to approve")
    ),
    responses(
        (status = 200, description = "Leave approved", body = Object, example = json!({
            "message": "Leave approved"
        })),
        (status = 404, description = "Leave request not found"),
        (status = 409, description = "Already processed", body = Object, example = json!({
            "message": "Leave request already processed"
        }))
    ),
    tag = "Leave"
)]
pub async fn approve_leave(
    store: web::Data<HrStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, HrError> {
    let leave_id = path.into_inner();

    let mut state = store.write()?;
    resolve(&mut state, &leave_id, LeaveStatus::Approved)?;
    store.persist(&state)?;

    info!(leave_id = %leave_id, "Leave approved");
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Leave approved"
    })))
}

/* =========================
Reject leave
========================= */
#[utoipa::path(
    put,
    path = "/api/v1/leave/{leave_id}/reject",
    params(
        ("leave_id", Path, description = "ID of the leave request to reject")
    ),
    responses(
        (status = 200, description = "Leave rejected", body = Object, example = json!({
            "message": "Leave rejected"
        })),
        (status = 404, description = "Leave request not found"),
        (status = 409, description = "Already processed", body = Object, example = json!({
            "message": "Leave request already processed"
        }))
    ),
    tag = "Leave"
)]
pub async fn reject_leave(
    store: web::Data<HrStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, HrError> {
    let leave_id = path.into_inner();

    let mut state = store.write()?;
    resolve(&mut state, &leave_id, LeaveStatus::Rejected)?;
    store.persist(&state)?;

    info!(leave_id = %leave_id, "Leave rejected");
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Leave rejected"
    })))
}

/// for getting a leave application details endpoint
#[utoipa::path(
    get,
    path = "/api/v1/leave/{leave_id}",
    params(
        ("leave_id", Path, description = "ID of the leave request to fetch")
    ),
    responses(
        (status = 200, description = "Leave request found", body = LeaveRequest),
        (status = 404, description = "Leave request not found", body = Object, example = json!({
            "message": "Leave request not found"
        }))
    ),
    tag = "Leave"
)]
pub async fn get_leave(
    store: web::Data<HrStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, HrError> {
    let leave_id = path.into_inner();

    let state = store.read()?;
    let request = state
        .leave_requests
        .iter()
        .find(|r| r.id == leave_id)
        .ok_or_else(|| HrError::not_found("Leave request not found"))?;

    Ok(HttpResponse::Ok().json(request))
}

/// for getting leave applications endpoint
#[utoipa::path(
    get,
    path = "/api/v1/leave",
    params(LeaveFilter),
    responses(
        (status = 200, description = "Paginated leave list", body = LeaveListResponse)
    ),
    tag = "Leave"
)]
pub async fn leave_list(
    store: web::Data<HrStore>,
    query: web::Query<LeaveFilter>,
) -> Result<HttpResponse, HrError> {
    let per_page = query.per_page.unwrap_or(10).min(100);
    let page = query.page.unwrap_or(1).max(1);
    let offset = ((page - 1) * per_page) as usize;

    let state = store.read()?;
    let matches: Vec<&LeaveRequest> = state
        .leave_requests
        .iter()
        .rev()
        .filter(|r| {
            query
                .employee_id
                .as_ref()
                .is_none_or(|id| &r.employee_id == id)
        })
        .filter(|r| query.status.is_none_or(|s| r.status == s))
        .collect();

    let total = matches.len();
    let data: Vec<LeaveRequest> = matches
        .into_iter()
        .skip(offset)
        .take(per_page as usize)
        .cloned()
        .collect();

    Ok(HttpResponse::Ok().json(LeaveListResponse {
        data,
        page,
        per_page,
        total,
    }))
}

/// Leave balance read; the allocation is seeded at registration and this
/// surface never recalculates it.
#[utoipa::path(
    get,
    path = "/api/v1/leave/balances/{employee_id}",
    params(
        ("employee_id", Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Seeded leave balance", body = LeaveBalance),
        (status = 404, description = "Leave balance not found", body = Object, example = json!({
            "message": "Leave balance not found"
        }))
    ),
    tag = "Leave"
)]
pub async fn get_leave_balance(
    store: web::Data<HrStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, HrError> {
    let employee_id = path.into_inner();

    let state = store.read()?;
    let balance = state
        .leave_balances
        .iter()
        .find(|b| b.employee_id == employee_id)
        .ok_or_else(|| HrError::not_found("Leave balance not found"))?;

    Ok(HttpResponse::Ok().json(balance))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use serde_json::json;
    use tempfile::TempDir;

    fn store(dir: &TempDir) -> web::Data<HrStore> {
        web::Data::new(HrStore::open(dir.path()).unwrap())
    }

    fn routes(cfg: &mut web::ServiceConfig) {
        cfg.route("/leave", web::post().to(create_leave))
            .route("/leave", web::get().to(leave_list))
            .route(
                "/leave/balances/{employee_id}",
                web::get().to(get_leave_balance),
            )
            .route("/leave/{leave_id}", web::get().to(get_leave))
            .route("/leave/{leave_id}/approve", web::put().to(approve_leave))
            .route("/leave/{leave_id}/reject", web::put().to(reject_leave));
    }

    fn vacation_request() -> serde_json::Value {
        json!({
            "employee_id": "EMP002",
            "leave_type": "vacation",
            "start_date": "2026-02-10",
            "end_date": "2026-02-12",
            "reason": "Family visit"
        })
    }

    #[actix_web::test]
    async fn submit_starts_pending_and_round_trips() {
        let dir = TempDir::new().unwrap();
        let app = test::init_service(App::new().app_data(store(&dir)).configure(routes)).await;

        let req = test::TestRequest::post()
            .uri("/leave")
            .set_json(vacation_request())
            .to_request();
        let created: LeaveRequest = test::call_and_read_body_json(&app, req).await;
        assert_eq!(created.status, LeaveStatus::Pending);
        assert_eq!(created.leave_type, LeaveType::Vacation);

        let req = test::TestRequest::get()
            .uri(&format!("/leave/{}", created.id))
            .to_request();
        let fetched: LeaveRequest = test::call_and_read_body_json(&app, req).await;
        assert_eq!(fetched, created);
    }

    #[actix_web::test]
    async fn submit_rejects_reversed_dates() {
        let dir = TempDir::new().unwrap();
        let app = test::init_service(App::new().app_data(store(&dir)).configure(routes)).await;

        let mut body = vacation_request();
        body["start_date"] = json!("2026-02-20");
        let req = test::TestRequest::post()
            .uri("/leave")
            .set_json(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "start_date cannot be after end_date");
    }

    #[actix_web::test]
    async fn submit_for_unknown_employee_is_404() {
        let dir = TempDir::new().unwrap();
        let app = test::init_service(App::new().app_data(store(&dir)).configure(routes)).await;

        let mut body = vacation_request();
        body["employee_id"] = json!("EMP999");
        let req = test::TestRequest::post()
            .uri("/leave")
            .set_json(body)
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::NOT_FOUND
        );
    }

    #[actix_web::test]
    async fn approve_transitions_once_then_conflicts() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        let app = test::init_service(App::new().app_data(store.clone()).configure(routes)).await;

        let req = test::TestRequest::post()
            .uri("/leave")
            .set_json(vacation_request())
            .to_request();
        let created: LeaveRequest = test::call_and_read_body_json(&app, req).await;

        let req = test::TestRequest::put()
            .uri(&format!("/leave/{}/approve", created.id))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::OK
        );
        {
            let state = store.read().unwrap();
            assert_eq!(state.leave_requests[0].status, LeaveStatus::Approved);
        }

        // a second verdict of either kind is refused
        let req = test::TestRequest::put()
            .uri(&format!("/leave/{}/reject", created.id))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::CONFLICT
        );
    }

    #[actix_web::test]
    async fn verdict_on_missing_request_is_404() {
        let dir = TempDir::new().unwrap();
        let app = test::init_service(App::new().app_data(store(&dir)).configure(routes)).await;

        let req = test::TestRequest::put()
            .uri("/leave/no-such-id/approve")
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::NOT_FOUND
        );
    }

    #[actix_web::test]
    async fn list_filters_by_status() {
        let dir = TempDir::new().unwrap();
        let app = test::init_service(App::new().app_data(store(&dir)).configure(routes)).await;

        let req = test::TestRequest::post()
            .uri("/leave")
            .set_json(vacation_request())
            .to_request();
        let first: LeaveRequest = test::call_and_read_body_json(&app, req).await;

        let mut second = vacation_request();
        second["employee_id"] = json!("EMP003");
        second["leave_type"] = json!("sick");
        let req = test::TestRequest::post()
            .uri("/leave")
            .set_json(second)
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::OK
        );

        let req = test::TestRequest::put()
            .uri(&format!("/leave/{}/approve", first.id))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::OK
        );

        let req = test::TestRequest::get()
            .uri("/leave?status=pending")
            .to_request();
        let list: LeaveListResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(list.total, 1);
        assert_eq!(list.data[0].employee_id, "EMP003");

        let req = test::TestRequest::get()
            .uri("/leave?employee_id=EMP002")
            .to_request();
        let list: LeaveListResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(list.total, 1);
        assert_eq!(list.data[0].status, LeaveStatus::Approved);
    }

    #[actix_web::test]
    async fn balance_returns_seeded_row() {
        let dir = TempDir::new().unwrap();
        let app = test::init_service(App::new().app_data(store(&dir)).configure(routes)).await;

        let req = test::TestRequest::get()
            .uri("/leave/balances/EMP001")
            .to_request();
        let balance: LeaveBalance = test::call_and_read_body_json(&app, req).await;
        assert_eq!(balance.vacation, 15);
        assert_eq!(balance.sick, 10);
        assert_eq!(balance.personal, 5);

        let req = test::TestRequest::get()
            .uri("/leave/balances/EMP999")
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::NOT_FOUND
        );
    }
}
