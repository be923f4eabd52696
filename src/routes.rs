use crate::state::RosterState;
use axum::Router;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

pub mod students;

const BODY_LIMIT_BYTES: usize = 64 * 1024;

pub fn router(state: RosterState) -> Router {
    Router::new()
        .merge(students::routes())
        .merge(student_tests::routes())
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
