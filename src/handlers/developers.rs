//! Developer and developer info handlers. Existence checks run in guards before these.

use crate::error::AppError;
use crate::extractors::{JsonBody, RouteId};
use crate::messages;
use crate::response::{created, no_content, ok};
use crate::service::validation;
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse};

pub async fn create(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<impl IntoResponse, AppError> {
    let input = validation::new_developer(&body)?;
    let developer = state.store.create_developer(&input).await?;
    tracing::info!(developer_id = developer.id, "developer created");
    Ok(created(developer))
}

pub async fn read(
    State(state): State<AppState>,
    RouteId(id): RouteId,
) -> Result<impl IntoResponse, AppError> {
    let detail = state
        .store
        .developer_detail(id)
        .await?
        .ok_or_else(|| AppError::NotFound(messages::DEVELOPER_NOT_FOUND.into()))?;
    Ok(ok(detail))
}

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    Ok(ok(state.store.list_developers().await?))
}

pub async fn projects(
    State(state): State<AppState>,
    RouteId(id): RouteId,
) -> Result<impl IntoResponse, AppError> {
    let rows = state.store.developer_projects(id).await?;
    if rows.is_empty() {
        return Err(AppError::NotFound(messages::DEVELOPER_WITHOUT_PROJECTS.into()));
    }
    Ok(ok(rows))
}

pub async fn update(
    State(state): State<AppState>,
    RouteId(id): RouteId,
    JsonBody(body): JsonBody,
) -> Result<impl IntoResponse, AppError> {
    let name = validation::developer_name(&body)?;
    let developer = state
        .store
        .rename_developer(id, &name)
        .await?
        .ok_or_else(|| AppError::NotFound(messages::DEVELOPER_NOT_FOUND.into()))?;
    Ok(ok(developer))
}

pub async fn delete(
    State(state): State<AppState>,
    RouteId(id): RouteId,
) -> Result<impl IntoResponse, AppError> {
    if !state.store.delete_developer(id).await? {
        return Err(AppError::NotFound(messages::DEVELOPER_NOT_FOUND.into()));
    }
    Ok(no_content())
}

pub async fn create_info(
    State(state): State<AppState>,
    RouteId(id): RouteId,
    JsonBody(body): JsonBody,
) -> Result<impl IntoResponse, AppError> {
    let input = validation::new_developer_info(&body)?;
    let developer = state.store.create_developer_info(id, &input).await?;
    tracing::info!(
        developer_id = id,
        info_id = developer.developer_info.id,
        "developer info linked"
    );
    Ok(created(developer))
}

pub async fn update_info(
    State(state): State<AppState>,
    RouteId(id): RouteId,
    JsonBody(body): JsonBody,
) -> Result<impl IntoResponse, AppError> {
    let preferred_os = validation::preferred_os(&body)?;
    let info = state
        .store
        .update_developer_info(id, preferred_os)
        .await?
        .ok_or_else(|| AppError::BadRequest(messages::DEVELOPER_INFO_MISSING.into()))?;
    Ok(ok(info))
}
