//! Project and project technology handlers.

use crate::catalog;
use crate::error::AppError;
use crate::extractors::{JsonBody, RouteId};
use crate::messages;
use crate::response::{created, no_content, ok};
use crate::service::validation;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};

pub async fn create(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<impl IntoResponse, AppError> {
    let input = validation::new_project(&body)?;
    let project = state.store.create_project(&input).await?;
    tracing::info!(project_id = project.id, developer_id = project.developer_id, "project created");
    Ok(created(project))
}

pub async fn read(
    State(state): State<AppState>,
    RouteId(id): RouteId,
) -> Result<impl IntoResponse, AppError> {
    let detail = state
        .store
        .project_detail(id)
        .await?
        .ok_or_else(|| AppError::NotFound(messages::PROJECT_NOT_FOUND.into()))?;
    Ok(ok(detail))
}

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    Ok(ok(state.store.list_projects().await?))
}

pub async fn update(
    State(state): State<AppState>,
    RouteId(id): RouteId,
    JsonBody(body): JsonBody,
) -> Result<impl IntoResponse, AppError> {
    let update = validation::project_update(&body)?;
    let project = state
        .store
        .update_project(id, &update)
        .await?
        .ok_or_else(|| AppError::NotFound(messages::PROJECT_NOT_FOUND.into()))?;
    Ok(ok(project))
}

pub async fn delete(
    State(state): State<AppState>,
    RouteId(id): RouteId,
) -> Result<impl IntoResponse, AppError> {
    if !state.store.delete_project(id).await? {
        return Err(AppError::NotFound(messages::PROJECT_NOT_FOUND.into()));
    }
    Ok(no_content())
}

pub async fn add_technology(
    State(state): State<AppState>,
    RouteId(id): RouteId,
    JsonBody(body): JsonBody,
) -> Result<impl IntoResponse, AppError> {
    let name = validation::technology_name(&body)?;
    let detail = state.store.add_project_technology(id, &name).await?;
    tracing::info!(project_id = id, technology = %name, "technology added");
    Ok(created(detail))
}

pub async fn remove_technology(
    State(state): State<AppState>,
    RouteId(id): RouteId,
    Path((_, name)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    if !state.store.remove_project_technology(id, &name).await? {
        return Err(AppError::NotFound(catalog::not_related_message()));
    }
    Ok(no_content())
}
