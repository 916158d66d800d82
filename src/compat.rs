use crate::error::Error;
use axum::{
    extract::{rejection::JsonRejection, FromRequest},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Serialize;

#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(Error))]
pub struct ApiJson<T>(pub T);

impl<T: Serialize> IntoResponse for ApiJson<T> {
    fn into_response(self) -> axum::response::Response {
        let Self(value) = self;
        axum::Json(value).into_response()
    }
}

impl From<JsonRejection> for Error {
    fn from(value: JsonRejection) -> Self {
        Error::InvalidJson(format!("{}", value))
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            Error::NotFound => StatusCode::NOT_FOUND,
            Error::Unauthorized | Error::Token(_) => StatusCode::UNAUTHORIZED,
            Error::Validation(_) | Error::InvalidJson(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Error::Database(_) | Error::Template(_) | Error::TimeFormat(_) => {
                tracing::error!("internal error: {}", self);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = match status {
            StatusCode::INTERNAL_SERVER_ERROR => {
                serde_json::json!({"err": "internal server error"})
            }
            _ => serde_json::json!({"err": self.to_string()}),
        };

        (status, axum::Json(body)).into_response()
    }
}
