//! Session refresh interceptor.
//!
//! Runs in front of every route. The decision is presence-based only:
//!
//! | access present | refresh present | action               |
//! |----------------|-----------------|----------------------|
//! | yes            | any             | pass through         |
//! | no             | no              | pass through         |
//! | no             | yes             | attempt refresh      |
//!
//! A successful refresh rewrites both slots before the handler runs; a failed
//! refresh clears both slots and the request continues as anonymous. The
//! in-flight request is never blocked, retried or failed on behalf of the
//! refresh outcome.

use crate::{
    atrium::cookies::{self, SessionTokens, ACCESS_TOKEN, REFRESH_TOKEN},
    auth_api::{self, TokenResponse},
    cli::globals::GlobalArgs,
};
use axum::{
    extract::{Request, State},
    http::header::SET_COOKIE,
    middleware::Next,
    response::Response,
};
use secrecy::ExposeSecret;
use std::{collections::HashMap, sync::Arc};
use tokio::sync::{Mutex, OnceCell};
use tracing::{debug, error};

type InflightRefresh = Arc<OnceCell<Option<TokenResponse>>>;

/// Shared interceptor state: the gateway configuration plus a single-flight
/// guard keyed by refresh-token value, so concurrent requests holding the
/// same token share one upstream refresh instead of racing it.
pub struct RefreshState {
    globals: GlobalArgs,
    inflight: Mutex<HashMap<String, InflightRefresh>>,
}

impl RefreshState {
    #[must_use]
    pub fn new(globals: GlobalArgs) -> Self {
        Self {
            globals,
            inflight: Mutex::new(HashMap::new()),
        }
    }

    /// Run at most one refresh per distinct refresh-token value; concurrent
    /// holders await the first attempt's outcome. Returns `None` when the
    /// refresh failed (the failure is already logged).
    async fn refresh(&self, refresh_token: &str) -> Option<TokenResponse> {
        let cell = {
            let mut inflight = self.inflight.lock().await;
            inflight
                .entry(refresh_token.to_string())
                .or_default()
                .clone()
        };

        let outcome = cell
            .get_or_init(|| async {
                match auth_api::refresh(&self.globals, refresh_token).await {
                    Ok(tokens) => Some(tokens),
                    Err(err) => {
                        error!("Failed to refresh token: {err}");

                        None
                    }
                }
            })
            .await
            .clone();

        // Drop the entry once the shared attempt resolved, so a later request
        // with the same token value attempts its own refresh.
        let mut inflight = self.inflight.lock().await;
        if let Some(current) = inflight.get(refresh_token) {
            if Arc::ptr_eq(current, &cell) {
                inflight.remove(refresh_token);
            }
        }

        outcome
    }
}

/// Interceptor in front of every route: rotate the token pair when the access
/// slot is empty but a refresh token survives. Fail open to anonymous.
pub async fn session_refresh(
    State(state): State<Arc<RefreshState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let tokens = SessionTokens::from_headers(request.headers());

    // Presence is the only trigger; expiry timestamps are not inspected here.
    if tokens.access.is_some() {
        return next.run(request).await;
    }

    let Some(refresh_token) = tokens.refresh else {
        // Anonymous request
        return next.run(request).await;
    };

    let secure = state.globals.secure_cookies;

    match state.refresh(refresh_token.expose_secret()).await {
        Some(rotated) => {
            debug!("Session tokens rotated");

            cookies::replace_request_cookies(
                request.headers_mut(),
                Some(rotated.access_token.expose_secret()),
                Some(rotated.refresh_token.expose_secret()),
            );

            let mut response = next.run(request).await;

            let headers = response.headers_mut();
            if let Ok(cookie) = cookies::set_cookie(
                ACCESS_TOKEN,
                rotated.access_token.expose_secret(),
                rotated.access_token_expires_at,
                secure,
            ) {
                headers.append(SET_COOKIE, cookie);
            }
            if let Ok(cookie) = cookies::set_cookie(
                REFRESH_TOKEN,
                rotated.refresh_token.expose_secret(),
                rotated.refresh_token_expires_at,
                secure,
            ) {
                headers.append(SET_COOKIE, cookie);
            }

            response
        }
        None => {
            // Forces the request to proceed as anonymous
            cookies::replace_request_cookies(request.headers_mut(), None, None);

            let mut response = next.run(request).await;

            let headers = response.headers_mut();
            if let Ok(cookie) = cookies::clear_cookie(ACCESS_TOKEN, secure) {
                headers.append(SET_COOKIE, cookie);
            }
            if let Ok(cookie) = cookies::clear_cookie(REFRESH_TOKEN, secure) {
                headers.append(SET_COOKIE, cookie);
            }

            response
        }
    }
}
