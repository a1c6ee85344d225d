//! Parse the `{id}` path segment.

use crate::error::AppError;
use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use std::collections::HashMap;

/// Positive 32-bit id taken from the `id` path parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RouteId(pub i32);

impl RouteId {
    pub fn parse(segment: &str) -> Result<Self, AppError> {
        match segment.parse::<i32>() {
            Ok(id) if id > 0 => Ok(RouteId(id)),
            _ => Err(AppError::BadRequest(format!("Invalid id: {segment}"))),
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for RouteId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(params) = Path::<HashMap<String, String>>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        let segment = params
            .get("id")
            .ok_or_else(|| AppError::BadRequest("Missing id".into()))?;
        RouteId::parse(segment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_positive_ids_only() {
        assert_eq!(RouteId::parse("42").unwrap(), RouteId(42));
        for bad in ["0", "-3", "abc", "1.5", "99999999999"] {
            let err = RouteId::parse(bad).unwrap_err();
            assert_eq!(err.to_string(), format!("Invalid id: {bad}"));
        }
    }
}
