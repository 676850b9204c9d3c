//! Client for the remote authentication API.
//!
//! Every operation is a single JSON `POST` with no retry logic: the remote
//! outcome is surfaced as-is and the caller decides what it means for the
//! session. The request timeout comes from the CLI configuration.

pub mod accounts;
pub use self::accounts::{login, register};

pub mod tokens;
pub use self::tokens::{logout, refresh};

use crate::cli::globals::GlobalArgs;
use reqwest::Client;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{fmt, time::Duration};
use url::Url;
use utoipa::ToSchema;

/// Identity record returned by login. Opaque to the gateway: deserialized and
/// passed through, never processed further.
#[derive(ToSchema, Serialize, Deserialize, Clone, Debug)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Token pair minted by a refresh. Expiries are Unix seconds.
#[derive(Deserialize, Clone, Debug)]
pub struct TokenResponse {
    pub access_token: SecretString,
    pub refresh_token: SecretString,
    pub access_token_expires_at: i64,
    pub refresh_token_expires_at: i64,
}

/// Login payload: the fresh token pair plus the identity record.
#[derive(Deserialize, Clone, Debug)]
pub struct LoginResponse {
    pub access_token: SecretString,
    pub refresh_token: SecretString,
    pub access_token_expires_at: i64,
    pub refresh_token_expires_at: i64,
    pub user: User,
}

#[derive(Clone, Debug)]
pub enum AuthError {
    Config(String),
    Rejected { status: u16, message: String },
    Transport(String),
    Decode(String),
}

impl fmt::Display for AuthError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::Config(message) => write!(formatter, "Config error: {message}"),
            AuthError::Rejected { status, message } => {
                write!(formatter, "Request rejected ({status}): {message}")
            }
            AuthError::Transport(message) => write!(formatter, "Network error: {message}"),
            AuthError::Decode(message) => write!(formatter, "Response error: {message}"),
        }
    }
}

impl std::error::Error for AuthError {}

/// Join an operation path onto the configured auth API base URL.
pub fn endpoint_url(globals: &GlobalArgs, endpoint: &str) -> Result<String, AuthError> {
    let url = Url::parse(&globals.auth_url)
        .map_err(|err| AuthError::Config(format!("invalid auth API URL: {err}")))?;

    let scheme = url.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(AuthError::Config(format!("unsupported scheme {scheme}")));
    }

    Ok(format!(
        "{}/{}",
        url.as_str().trim_end_matches('/'),
        endpoint.trim_start_matches('/')
    ))
}

pub(crate) fn http_client(globals: &GlobalArgs) -> Result<Client, AuthError> {
    Client::builder()
        .user_agent(crate::APP_USER_AGENT)
        .timeout(Duration::from_secs(globals.request_timeout))
        .build()
        .map_err(|err| AuthError::Transport(err.to_string()))
}

/// Turn a non-success response into a `Rejected` error, pulling the remote
/// message out of the body when one is present.
pub(crate) async fn rejected(response: reqwest::Response) -> AuthError {
    let status = response.status().as_u16();
    let message = response
        .json::<Value>()
        .await
        .ok()
        .and_then(|body| {
            body.get("error")
                .or_else(|| body.get("message"))
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_default();

    AuthError::Rejected { status, message }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_url() {
        let globals = GlobalArgs::new("https://api.tld".to_string());
        assert_eq!(
            endpoint_url(&globals, "auth/login").unwrap(),
            "https://api.tld/auth/login"
        );
    }

    #[test]
    fn test_endpoint_url_trailing_slash() {
        let globals = GlobalArgs::new("https://api.tld/v1/".to_string());
        assert_eq!(
            endpoint_url(&globals, "/auth/refresh").unwrap(),
            "https://api.tld/v1/auth/refresh"
        );
    }

    #[test]
    fn test_endpoint_url_bad_scheme() {
        let globals = GlobalArgs::new("ftp://api.tld".to_string());
        assert!(endpoint_url(&globals, "auth/login").is_err());
    }

    #[test]
    fn test_endpoint_url_invalid() {
        let globals = GlobalArgs::new("not a url".to_string());
        assert!(endpoint_url(&globals, "auth/login").is_err());
    }

    #[test]
    fn test_auth_error_display() {
        let err = AuthError::Rejected {
            status: 401,
            message: "invalid credentials".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Request rejected (401): invalid credentials"
        );

        let err = AuthError::Transport("connection refused".to_string());
        assert_eq!(err.to_string(), "Network error: connection refused");
    }
}
