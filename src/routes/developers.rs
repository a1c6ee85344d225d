//! /developers and /developers/:id/...

use crate::guards;
use crate::handlers::developers;
use crate::state::AppState;
use axum::{
    middleware::from_fn_with_state,
    routing::{get, patch, post},
    Router,
};
use tower::ServiceBuilder;

pub fn routes(state: &AppState) -> Router<AppState> {
    let developer_exists = from_fn_with_state(state.clone(), guards::ensure_developer_exists);

    Router::new()
        .route(
            "/developers",
            post(developers::create)
                .layer(from_fn_with_state(state.clone(), guards::verify_email_available))
                .get(developers::list),
        )
        .route(
            "/developers/:id",
            get(developers::read)
                .patch(developers::update)
                .delete(developers::delete)
                .layer(developer_exists.clone()),
        )
        .route(
            "/developers/:id/projects",
            get(developers::projects).layer(developer_exists.clone()),
        )
        .route(
            "/developers/:id/infos",
            post(developers::create_info)
                .layer(
                    ServiceBuilder::new()
                        .layer(developer_exists.clone())
                        .layer(from_fn_with_state(
                            state.clone(),
                            guards::ensure_developer_info_absent,
                        )),
                )
                .merge(patch(developers::update_info).layer(developer_exists)),
        )
}
