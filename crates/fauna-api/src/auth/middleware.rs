use crate::error::HttpAppError;
use crate::state::AuthState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use fauna_core::AppError;

const BEARER_PREFIX: &str = "Bearer ";

fn reject(message: &str) -> Response {
    tracing::debug!(reason = message, "Authentication failed");
    HttpAppError(AppError::Unauthorized(message.to_string())).into_response()
}

/// Resolve the bearer token into an `OwnerIdentity` request extension
pub async fn auth_middleware(
    State(auth_state): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = match request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
    {
        Some(header) => match header.strip_prefix(BEARER_PREFIX) {
            Some(token) if !token.trim().is_empty() => token.trim().to_string(),
            _ => return reject("Invalid authorization header format"),
        },
        None => return reject("Missing authorization header"),
    };

    match auth_state.identity_provider.authenticate(&token).await {
        Ok(identity) => {
            tracing::debug!(owner_id = %identity.owner_id, "Request authenticated");
            request.extensions_mut().insert(identity);
            next.run(request).await
        }
        Err(e) => HttpAppError(e).into_response(),
    }
}
