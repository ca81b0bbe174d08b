use axum::{
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use player_client::{ClientError, ProtocolError};
use serde::Serialize;
use tracing::warn;

/// Non-OK response envelope
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub status: &'static str,
    pub message: String,
}

/// A failed request, as seen by HTTP clients
#[derive(Debug)]
pub enum AppError {
    /// Missing or unparsable query parameters
    BadRequest(String),
    Player(ClientError),
}

impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        AppError::Player(err)
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Player(ClientError::Protocol(ProtocolError::InvalidArgument(_))) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Player(err) if err.is_connection() => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Player(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn message(&self) -> String {
        match self {
            AppError::BadRequest(message) => message.clone(),
            AppError::Player(err) => err.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.message();
        warn!(error = %message, %status, "request failed");

        let body = ErrorBody {
            status: "ERROR",
            message,
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::time::Duration;

    #[rstest]
    #[case(AppError::BadRequest("missing field `to`".into()), StatusCode::BAD_REQUEST)]
    #[case(
        ClientError::Protocol(ProtocolError::InvalidArgument("x\nplay".into())).into(),
        StatusCode::BAD_REQUEST
    )]
    #[case(ClientError::Timeout(Duration::from_secs(5)).into(), StatusCode::SERVICE_UNAVAILABLE)]
    #[case(ClientError::Disconnected.into(), StatusCode::SERVICE_UNAVAILABLE)]
    #[case(
        ClientError::Protocol(ProtocolError::Malformed("??".into())).into(),
        StatusCode::BAD_GATEWAY
    )]
    fn maps_failures_to_status(#[case] error: AppError, #[case] expected: StatusCode) {
        assert_eq!(error.into_response().status(), expected);
    }
}
