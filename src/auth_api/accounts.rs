use crate::{
    auth_api::{endpoint_url, http_client, rejected, AuthError, LoginResponse},
    cli::globals::GlobalArgs,
};
use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use tracing::instrument;

/// Exchange credentials for a token pair and the identity record.
#[instrument(skip(globals, password))]
pub async fn login(
    globals: &GlobalArgs,
    email: &str,
    password: &SecretString,
) -> Result<LoginResponse, AuthError> {
    let client = http_client(globals)?;

    let login_url = endpoint_url(globals, "auth/login")?;

    let payload = json!({
        "email": email,
        "password": password.expose_secret(),
    });

    let response = client
        .post(&login_url)
        .json(&payload)
        .send()
        .await
        .map_err(|err| AuthError::Transport(err.to_string()))?;

    if !response.status().is_success() {
        return Err(rejected(response).await);
    }

    response
        .json::<LoginResponse>()
        .await
        .map_err(|err| AuthError::Decode(err.to_string()))
}

/// Create an account. The success body is not used, only the status matters.
#[instrument(skip(globals, password))]
pub async fn register(
    globals: &GlobalArgs,
    name: &str,
    email: &str,
    password: &SecretString,
) -> Result<(), AuthError> {
    let client = http_client(globals)?;

    let register_url = endpoint_url(globals, "auth/register")?;

    let payload = json!({
        "name": name,
        "email": email,
        "password": password.expose_secret(),
    });

    let response = client
        .post(&register_url)
        .json(&payload)
        .send()
        .await
        .map_err(|err| AuthError::Transport(err.to_string()))?;

    if !response.status().is_success() {
        return Err(rejected(response).await);
    }

    Ok(())
}
