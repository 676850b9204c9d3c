//! # Atrium (Web Session Gateway)
//!
//! `atrium` sits between a browser and a remote authentication API and owns
//! the browser-facing session lifecycle: sign-in and sign-up form handling,
//! cookie-based persistence of the access/refresh token pair, and a
//! request-interception middleware that transparently rotates an expired
//! session before the request reaches its handler.
//!
//! ## Session Model
//!
//! The session is a pair of `HttpOnly`, `SameSite=Strict` cookies
//! (`access_token`, `refresh_token`) with independent expiries taken from the
//! auth API's Unix-second `*_expires_at` fields. The gateway never inspects
//! token contents; it only moves them between cookies and the remote API.
//!
//! ## Fail Open to Anonymous
//!
//! When the access token slot is empty but a refresh token survives, the
//! refresh interceptor rotates the pair before the handler runs. A failed
//! rotation clears both slots and lets the request continue unauthenticated:
//! an expired or revoked refresh token never produces a hard error for the
//! end user.

pub mod atrium;
pub mod auth_api;
pub mod cli;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
