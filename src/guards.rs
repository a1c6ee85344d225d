//! Route preconditions as axum middleware. Each guard checks one thing and either forwards
//! the request or answers with the error; chains are composed in `routes`.

use crate::catalog;
use crate::error::AppError;
use crate::extractors::RouteId;
use crate::messages;
use crate::routes::BODY_LIMIT;
use crate::service::validation;
use crate::state::AppState;
use axum::{
    body::Body,
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use http_body_util::LengthLimitError;
use serde_json::Value;

/// Read the body so a guard can inspect it, then put the bytes back for the handler.
/// An unparsable body reads as `Null`; the handler's extractor reports the syntax error.
async fn peek_json(req: Request) -> Result<(Request, Value), AppError> {
    let (parts, body) = req.into_parts();
    let bytes = axum::body::to_bytes(body, BODY_LIMIT)
        .await
        .map_err(body_error)?;
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    Ok((Request::from_parts(parts, Body::from(bytes)), value))
}

fn body_error(err: axum::Error) -> AppError {
    let inner = err.into_inner();
    if inner.is::<LengthLimitError>() {
        AppError::PayloadTooLarge(inner.to_string())
    } else {
        AppError::BadRequest(inner.to_string())
    }
}

/// 409 when the body's `email` is already registered. Non-string emails pass through.
pub async fn verify_email_available(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (req, body) = peek_json(req).await?;
    if let Some(email) = body.get("email").and_then(Value::as_str) {
        if state.store.developer_by_email(email).await?.is_some() {
            tracing::debug!(email, "developer email taken");
            return Err(AppError::Conflict(messages::DEVELOPER_EXISTS.into()));
        }
    }
    Ok(next.run(req).await)
}

pub async fn ensure_developer_exists(
    State(state): State<AppState>,
    RouteId(id): RouteId,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if state.store.developer(id).await?.is_none() {
        tracing::debug!(developer_id = id, "developer not found");
        return Err(AppError::NotFound(messages::DEVELOPER_NOT_FOUND.into()));
    }
    Ok(next.run(req).await)
}

/// 409 when the developer already has a linked info.
pub async fn ensure_developer_info_absent(
    State(state): State<AppState>,
    RouteId(id): RouteId,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let developer = state
        .store
        .developer(id)
        .await?
        .ok_or_else(|| AppError::NotFound(messages::DEVELOPER_NOT_FOUND.into()))?;
    if developer.developer_info_id.is_some() {
        tracing::debug!(developer_id = id, "developer info already linked");
        return Err(AppError::Conflict(messages::DEVELOPER_INFO_EXISTS.into()));
    }
    Ok(next.run(req).await)
}

/// 404 when the body's integer `developerId` matches no developer. Other shapes pass
/// through to body validation.
pub async fn ensure_body_developer_exists(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (req, body) = peek_json(req).await?;
    let exists = match body.get("developerId").and_then(Value::as_i64) {
        None => true,
        Some(raw) => match validation::developer_id(&body) {
            Some(id) => state.store.developer(id).await?.is_some(),
            None => {
                tracing::debug!(developer_id = raw, "developerId out of range");
                true
            }
        },
    };
    if !exists {
        return Err(AppError::NotFound(messages::DEVELOPER_NOT_FOUND.into()));
    }
    Ok(next.run(req).await)
}

pub async fn ensure_project_exists(
    State(state): State<AppState>,
    RouteId(id): RouteId,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if state.store.project(id).await?.is_none() {
        tracing::debug!(project_id = id, "project not found");
        return Err(AppError::NotFound(messages::PROJECT_NOT_FOUND.into()));
    }
    Ok(next.run(req).await)
}

/// 400 unless the body's `name` is a cataloged technology that the store knows.
pub async fn verify_technology_name(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (req, body) = peek_json(req).await?;
    let name = validation::technology_name(&body)?;
    if state.store.technology_by_name(&name).await?.is_none() {
        tracing::debug!(technology = %name, "technology missing from store");
        return Err(AppError::Validation(catalog::not_accepted_message()));
    }
    Ok(next.run(req).await)
}
