use crate::error::AppError;
use axum::extract::rejection::{FormRejection, QueryRejection};
use axum::extract::{Form, FromRequest, FromRequestParts, Query, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

const INVALID_ID: &str = "A numeric user id is required";

/// `Query` whose failures render as an error page instead of axum's plain-text rejection.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for PageQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state).await.map_err(query_error)?;
        Ok(Self(value))
    }
}

/// `Form` whose failures render as an error page instead of axum's plain-text rejection.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageForm<T>(pub T);

impl<T, S> FromRequest<S> for PageForm<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(value) = Form::<T>::from_request(req, state).await.map_err(form_error)?;
        Ok(Self(value))
    }
}

fn query_error(rejection: QueryRejection) -> AppError {
    tracing::debug!(rejection = %rejection.body_text(), "Rejected query string");
    AppError::Validation(INVALID_ID.to_string())
}

fn form_error(rejection: FormRejection) -> AppError {
    tracing::debug!(rejection = %rejection.body_text(), "Rejected form body");
    match rejection {
        FormRejection::InvalidFormContentType(_) => AppError::Validation("Expected a form submission".to_string()),
        _ => AppError::Validation(INVALID_ID.to_string()),
    }
}
