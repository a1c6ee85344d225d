//! /projects and /projects/:id/...

use crate::guards;
use crate::handlers::projects;
use crate::state::AppState;
use axum::{
    middleware::from_fn_with_state,
    routing::{delete, get, post},
    Router,
};
use tower::ServiceBuilder;

pub fn routes(state: &AppState) -> Router<AppState> {
    let project_exists = from_fn_with_state(state.clone(), guards::ensure_project_exists);

    Router::new()
        .route(
            "/projects",
            post(projects::create)
                .layer(from_fn_with_state(state.clone(), guards::ensure_body_developer_exists))
                .get(projects::list),
        )
        .route(
            "/projects/:id",
            get(projects::read)
                .patch(projects::update)
                .delete(projects::delete)
                .layer(project_exists.clone()),
        )
        .route(
            "/projects/:id/technologies",
            post(projects::add_technology).layer(
                ServiceBuilder::new()
                    .layer(from_fn_with_state(state.clone(), guards::verify_technology_name))
                    .layer(project_exists.clone()),
            ),
        )
        .route(
            "/projects/:id/technologies/:name",
            delete(projects::remove_technology).layer(project_exists),
        )
}
