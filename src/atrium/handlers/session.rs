use crate::atrium::cookies::SessionTokens;
use axum::{
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Report whether the request carries an access token. Because the refresh
/// interceptor runs first, a request arriving with only a refresh token shows
/// up here as authenticated once the rotation succeeded.
#[utoipa::path(
    get,
    path = "/session",
    responses(
        (status = 200, description = "Active session", content_type = "application/json"),
        (status = 204, description = "Anonymous request"),
    ),
    tag = "auth"
)]
pub async fn session(headers: HeaderMap) -> Response {
    let tokens = SessionTokens::from_headers(&headers);

    if tokens.access.is_some() {
        (StatusCode::OK, Json(json!({ "authenticated": true }))).into_response()
    } else {
        StatusCode::NO_CONTENT.into_response()
    }
}
