/// Request extractors
///
/// [`ApiJson`] behaves like `axum::Json` but rejects with [`ApiError`], so a
/// malformed or mistyped body produces the API's own 400 body instead of the
/// framework's plain-text rejection.

use axum::extract::FromRequest;

use crate::error::ApiError;

/// JSON body extractor with [`ApiError`] rejection
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);
