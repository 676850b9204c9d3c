use crate::{
    auth_api::{endpoint_url, http_client, rejected, AuthError, TokenResponse},
    cli::globals::GlobalArgs,
};
use serde_json::json;
use tracing::instrument;

/// Trade a refresh token for a new access/refresh pair.
#[instrument(skip_all)]
pub async fn refresh(globals: &GlobalArgs, refresh_token: &str) -> Result<TokenResponse, AuthError> {
    let client = http_client(globals)?;

    let refresh_url = endpoint_url(globals, "auth/refresh")?;

    let payload = json!({
        "refresh_token": refresh_token,
    });

    let response = client
        .post(&refresh_url)
        .json(&payload)
        .send()
        .await
        .map_err(|err| AuthError::Transport(err.to_string()))?;

    if !response.status().is_success() {
        return Err(rejected(response).await);
    }

    response
        .json::<TokenResponse>()
        .await
        .map_err(|err| AuthError::Decode(err.to_string()))
}

/// Revoke a refresh token server-side.
#[instrument(skip_all)]
pub async fn logout(globals: &GlobalArgs, refresh_token: &str) -> Result<(), AuthError> {
    let client = http_client(globals)?;

    let logout_url = endpoint_url(globals, "auth/logout")?;

    let payload = json!({
        "refresh_token": refresh_token,
    });

    let response = client
        .post(&logout_url)
        .json(&payload)
        .send()
        .await
        .map_err(|err| AuthError::Transport(err.to_string()))?;

    if !response.status().is_success() {
        return Err(rejected(response).await);
    }

    Ok(())
}
