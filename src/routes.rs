use crate::{
    api::{attendance, employee, insight, leave_request, payroll, reports},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::web;
use std::sync::Arc;

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-scope limiter
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let per_ms = if requests_per_min == 0 {
            1
        } else {
            60_000 / requests_per_min as u64
        };
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .unwrap();
        Governor::new(&cfg)
    }

    let api_limiter = Arc::new(build_limiter(config.rate_api_per_min));

    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(api_limiter) // rate limiting
            .service(
                web::scope("/employees")
                    // /employees
                    .service(
                        web::resource("")
                            .route(web::post().to(employee::create_employee))
                            .route(web::get().to(employee::list_employees)),
                    )
                    // /employees/{employee_id}
                    .service(
                        web::resource("/{employee_id}")
                            .route(web::get().to(employee::get_employee))
                            .route(web::put().to(employee::update_employee))
                            .route(web::delete().to(employee::deactivate_employee)),
                    ),
            )
            .service(
                web::resource("/departments").route(web::get().to(employee::list_departments)),
            )
            .service(
                web::scope("/attendance")
                    // /attendance
                    .service(web::resource("").route(web::get().to(attendance::list_attendance)))
                    // /attendance/clock-in
                    .service(
                        web::resource("/clock-in").route(web::post().to(attendance::clock_in)),
                    )
                    // /attendance/clock-out
                    .service(
                        web::resource("/clock-out").route(web::post().to(attendance::clock_out)),
                    )
                    // /attendance/session/{employee_id}
                    .service(
                        web::resource("/session/{employee_id}")
                            .route(web::get().to(attendance::session_status)),
                    ),
            )
            .service(
                web::scope("/payroll")
                    // /payroll
                    .service(web::resource("").route(web::get().to(payroll::list_payrolls)))
                    // /payroll/{payroll_id}
                    .service(
                        web::resource("/{payroll_id}").route(web::get().to(payroll::get_payroll)),
                    ),
            )
            .service(
                web::scope("/leave")
                    // /leave
                    .service(
                        web::resource("")
                            .route(web::get().to(leave_request::leave_list))
                            .route(web::post().to(leave_request::create_leave)),
                    )
                    // /leave/balances/{employee_id}; registered before the id
                    // match so "balances" is never taken for a request id
                    .service(
                        web::resource("/balances/{employee_id}")
                            .route(web::get().to(leave_request::get_leave_balance)),
                    )
                    // /leave/{leave_id}
                    .service(
                        web::resource("/{leave_id}")
                            .route(web::get().to(leave_request::get_leave)),
                    )
                    // /leave/{leave_id}/approve
                    .service(
                        web::resource("/{leave_id}/approve")
                            .route(web::put().to(leave_request::approve_leave)),
                    )
                    // /leave/{leave_id}/reject
                    .service(
                        web::resource("/{leave_id}/reject")
                            .route(web::put().to(leave_request::reject_leave)),
                    ),
            )
            .service(
                web::scope("/reports")
                    // /reports/summary
                    .service(web::resource("/summary").route(web::get().to(reports::summary))),
            )
            .service(
                web::resource("/insights").route(web::post().to(insight::generate_insight)),
            ),
    );
}
