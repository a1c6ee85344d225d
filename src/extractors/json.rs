//! JSON body as an untyped value; shape checks happen in `service::validation`.
//! Rejections keep axum's status (400, 413, 415) with a `{"message"}` body.

use crate::error::AppError;
use async_trait::async_trait;
use axum::{
    extract::{FromRequest, Request},
    Json,
};
use serde_json::Value;

pub struct JsonBody(pub Value);

#[async_trait]
impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| {
                AppError::rejected(rejection.status(), rejection.body_text())
            })?;
        Ok(JsonBody(value))
    }
}
