use crate::{
    atrium::cookies::{self, SessionTokens, ACCESS_TOKEN, REFRESH_TOKEN},
    auth_api,
    cli::globals::GlobalArgs,
};
use axum::{
    extract::Extension,
    http::{header::SET_COOKIE, HeaderMap},
    response::{IntoResponse, Redirect, Response},
};
use secrecy::ExposeSecret;
use tracing::{error, instrument};

#[utoipa::path(
    post,
    path = "/sign-out",
    responses(
        (status = 303, description = "Session cleared, redirect to the sign-in view"),
    ),
    tag = "auth"
)]
#[instrument(skip_all)]
pub async fn sign_out(globals: Extension<GlobalArgs>, headers: HeaderMap) -> Response {
    let tokens = SessionTokens::from_headers(&headers);

    // Best effort: a failed remote revocation never blocks clearing the slots
    if let Some(refresh_token) = tokens.refresh {
        if let Err(err) = auth_api::logout(&globals, refresh_token.expose_secret()).await {
            error!("Failed to revoke refresh token: {err}");
        }
    }

    // Always clear both slots, even when the request was already anonymous
    let secure = globals.secure_cookies;
    let mut response_headers = HeaderMap::new();
    if let Ok(cookie) = cookies::clear_cookie(ACCESS_TOKEN, secure) {
        response_headers.append(SET_COOKIE, cookie);
    }
    if let Ok(cookie) = cookies::clear_cookie(REFRESH_TOKEN, secure) {
        response_headers.append(SET_COOKIE, cookie);
    }

    (response_headers, Redirect::to("/sign-in")).into_response()
}
