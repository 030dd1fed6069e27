use axum::extract::Request;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;

use super::handlers::ApiError;
use crate::domain::user::models::UserId;
use crate::inbound::http::router::AppState;

/// Extension type to store authenticated user ID in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

/// Middleware that runs the bearer-token gate and adds the user id to request extensions
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = match req.headers().get(AUTHORIZATION).map(|value| value.to_str()) {
        None => None,
        Some(Ok(value)) => Some(value),
        // Not visible ASCII, so it cannot be `Bearer <token>`.
        Some(Err(_)) => {
            return Err(ApiError::Unauthorized(
                auth::Rejection::BadScheme.to_string(),
            ))
        }
    };

    let user_id = state
        .authenticator
        .authenticate_header(header)
        .map_err(|rejection| {
            match &rejection {
                auth::Rejection::InvalidToken(cause) => {
                    tracing::warn!("JWT validation failed: {}", cause)
                }
                other => tracing::debug!("Request rejected: {}", other),
            }
            ApiError::Unauthorized(rejection.to_string())
        })?;

    req.extensions_mut().insert(AuthenticatedUser {
        user_id: UserId(user_id),
    });

    Ok(next.run(req).await)
}
