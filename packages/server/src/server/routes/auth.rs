use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header::SET_COOKIE, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::domains::auth::{is_authenticated, login_cookie, logout_cookie, LoginOutcome};
use crate::server::{ApiError, AppState};

#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CheckAuthResponse {
    pub authenticated: bool,
}

/// `POST /api/login` - exchange the shared password for the gate cookie
pub async fn login_handler(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let request = body.map(|Json(r)| r).unwrap_or_default();

    match state.gate.check(request.password.as_deref()) {
        LoginOutcome::Accepted => {
            info!("Operator logged in");
            Ok((
                StatusCode::OK,
                [(SET_COOKIE, login_cookie())],
                Json(MessageResponse {
                    message: "Authentication successful.".to_string(),
                }),
            )
                .into_response())
        }
        LoginOutcome::MissingPassword => {
            Err(ApiError::BadRequest("Password is required.".to_string()))
        }
        LoginOutcome::Rejected => {
            warn!("Rejected login attempt");
            Err(ApiError::Unauthorized("Invalid password.".to_string()))
        }
    }
}

pub async fn login_method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed("Method Not Allowed".to_string())
}

/// `/api/logout` - expire the gate cookie
pub async fn logout_handler() -> Response {
    (
        StatusCode::OK,
        [(SET_COOKIE, logout_cookie())],
        Json(MessageResponse {
            message: "Logged out successfully.".to_string(),
        }),
    )
        .into_response()
}

/// `/api/check-auth` - report whether the request carries the gate cookie
pub async fn check_auth_handler(headers: HeaderMap) -> Json<CheckAuthResponse> {
    Json(CheckAuthResponse {
        authenticated: is_authenticated(&headers),
    })
}
