pub mod assessments;
pub mod candidates;
pub mod health;
pub mod jobs;

use axum::{
    middleware::from_fn_with_state,
    routing::{get, patch, post, put},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::middleware::fault_injection::{fault_middleware, new_fault_state};
use crate::AppState;

/// Full mock API. Each group carries its own fault profile; route layers only
/// wrap matched routes, so unknown paths are never delayed.
pub fn api_router(state: AppState) -> Router {
    let faults = state.faults.clone();

    let base_routes = Router::new()
        .route("/health", get(health::health))
        .route("/__seed", get(health::seed))
        .route("/candidates/:id", get(candidates::get_candidate))
        .route("/candidates/:id/timeline", get(candidates::candidate_timeline))
        .route(
            "/assessments/:job_id",
            get(assessments::get_assessment),
        )
        .route(
            "/assessments/:job_id/submit",
            post(assessments::submit_assessment),
        );

    let read_api = Router::new()
        .route("/jobs", get(jobs::list_jobs))
        .route("/candidates", get(candidates::list_candidates))
        .route_layer(from_fn_with_state(
            new_fault_state(faults.policy.clone(), 0.0),
            fault_middleware,
        ));

    let write_api = Router::new()
        .route("/jobs", post(jobs::create_job))
        .route("/jobs/:id", patch(jobs::update_job))
        .route("/candidates/:id", patch(candidates::update_candidate))
        .route_layer(from_fn_with_state(
            new_fault_state(faults.policy.clone(), faults.failure_rate),
            fault_middleware,
        ));

    let reorder_api = Router::new()
        .route("/jobs/:id/reorder", patch(jobs::reorder_job))
        .route_layer(from_fn_with_state(
            new_fault_state(faults.policy.clone(), faults.reorder_failure_rate),
            fault_middleware,
        ));

    let builder_api = Router::new()
        .route("/assessments/:job_id", put(assessments::put_assessment))
        .route_layer(from_fn_with_state(
            new_fault_state(faults.policy.clone(), 0.0),
            fault_middleware,
        ));

    base_routes
        .merge(read_api)
        .merge(write_api)
        .merge(reorder_api)
        .merge(builder_api)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
