use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{config::Config, error::HrError, insight, store::HrStore};

#[derive(Serialize, Deserialize, ToSchema)]
pub struct InsightResponse {
    #[schema(
        example = "Attendance is steady this week; consider reviewing Engineering's overtime load."
    )]
    pub insight: String,
}

/// Generate Insight
///
/// Serves the cached text when the ledgers haven't changed; otherwise asks
/// the configured model and falls back to a fixed notice when the upstream
/// is unreachable.
#[utoipa::path(
    post,
    path = "/api/v1/insights",
    responses(
        (status = 200, description = "Workforce insight text", body = InsightResponse)
    ),
    tag = "Insights"
)]
pub async fn generate_insight(
    store: web::Data<HrStore>,
    config: web::Data<Config>,
) -> Result<HttpResponse, HrError> {
    // Clone what the prompt needs and drop the guard before awaiting.
    let (employees, attendance, payroll) = {
        let state = store.read()?;
        (
            state.employees.clone(),
            state.attendance.clone(),
            state.payroll.clone(),
        )
    };

    let insight = insight::generate(&config, &employees, &attendance, &payroll).await;
    Ok(HttpResponse::Ok().json(InsightResponse { insight }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insight::FALLBACK_INSIGHT;
    use actix_web::{App, test};
    use tempfile::TempDir;

    fn offline_config() -> Config {
        Config {
            server_addr: "127.0.0.1:0".to_string(),
            data_dir: "data".to_string(),
            api_prefix: "/api/v1".to_string(),
            rate_api_per_min: 1000,
            insight_api_base: "http://127.0.0.1:9".to_string(),
            insight_api_key: None,
            insight_model: "gpt-4o-mini".to_string(),
        }
    }

    #[actix_web::test]
    async fn endpoint_degrades_to_fallback_without_a_key() {
        let dir = TempDir::new().unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(HrStore::open(dir.path()).unwrap()))
                .app_data(web::Data::new(offline_config()))
                .route("/insights", web::post().to(generate_insight)),
        )
        .await;

        let req = test::TestRequest::post().uri("/insights").to_request();
        let body: InsightResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.insight, FALLBACK_INSIGHT);
    }
}
