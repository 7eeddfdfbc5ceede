use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Form,
};
use project_common::error_code::ErrorCode;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::models::ApiError;

/// Form body that has been deserialized and validated.
///
/// Either failure is answered with an `InvalidParams` envelope.
#[derive(Debug, Clone)]
pub struct ValidForm<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidForm<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(value) = Form::<T>::from_request(req, state).await.map_err(|rejection| {
            tracing::debug!(error = %rejection, "Malformed form body");
            ApiError(ErrorCode::InvalidParams)
        })?;

        value.validate().map_err(|errors| {
            tracing::debug!(error = %errors, "Form validation failed");
            ApiError(ErrorCode::InvalidParams)
        })?;

        Ok(ValidForm(value))
    }
}
