//! JSON extractor whose rejections use the API error body

use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json as AxumJson,
};
use serde::de::DeserializeOwned;

use super::error::ApiError;

/// Like `axum::Json`, but malformed bodies answer with [`ApiError`]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        AxumJson::<T>::from_request(req, state)
            .await
            .map(|AxumJson(value)| JsonBody(value))
            .map_err(|rejection| ApiError::bad_request(rejection_message(&rejection)))
    }
}

// Body text is not echoed back: login bodies carry passwords
fn rejection_message(rejection: &JsonRejection) -> &'static str {
    match rejection {
        JsonRejection::JsonDataError(_) => "Invalid JSON data",
        JsonRejection::JsonSyntaxError(_) => "Invalid JSON syntax",
        JsonRejection::MissingJsonContentType(_) => {
            "Missing Content-Type header. Expected 'application/json'."
        }
        JsonRejection::BytesRejection(_) => "Failed to read request body",
        _ => "Invalid JSON request",
    }
}
