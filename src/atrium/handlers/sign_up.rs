use crate::{
    atrium::handlers::{valid_email, FieldErrors, MIN_PASSWORD_LEN},
    auth_api,
    cli::globals::GlobalArgs,
};
use axum::{
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, error, instrument};
use utoipa::ToSchema;

#[derive(ToSchema, Deserialize, Debug)]
pub struct SignUp {
    name: String,
    email: String,
    #[schema(value_type = String, format = Password)]
    password: SecretString,
    #[serde(rename = "confirmPassword")]
    #[schema(value_type = String, format = Password)]
    confirm_password: SecretString,
}

#[utoipa::path(
    post,
    path = "/sign-up",
    request_body = SignUp,
    responses(
        (status = 307, description = "Account created, redirect to the sign-in view"),
        (status = 400, description = "Validation failed, field errors returned", content_type = "application/json"),
        (status = 500, description = "Registration failed", content_type = "application/json"),
    ),
    tag = "auth"
)]
#[instrument(skip_all)]
pub async fn sign_up(globals: Extension<GlobalArgs>, payload: Option<Json<SignUp>>) -> Response {
    let form: SignUp = match payload {
        Some(Json(payload)) => payload,
        None => return (StatusCode::BAD_REQUEST, "Missing payload".to_string()).into_response(),
    };

    let mut errors = FieldErrors::default();

    if form.name.is_empty() {
        errors.push("name", "Name is required");
    }

    if !valid_email(&form.email) {
        errors.push("email", "Please enter a valid email");
    }

    if form.password.expose_secret().len() < MIN_PASSWORD_LEN {
        errors.push("password", "Password must be at least 8 characters");
    }

    // Presence only: equality with the password is the auth API's rule, not
    // enforced here.
    if form.confirm_password.expose_secret().is_empty() {
        errors.push("confirmPassword", "Please confirm your password");
    }

    // Schema failures never reach the network
    if !errors.is_empty() {
        debug!("Sign-up rejected by schema validation");

        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "valid": false,
                "data": { "name": form.name, "email": form.email },
                "errors": errors.into_inner(),
            })),
        )
            .into_response();
    }

    // A failed registration blocks the redirect instead of sending the user
    // to sign in against an account that does not exist
    match auth_api::register(&globals, &form.name, &form.email, &form.password).await {
        Ok(()) => Redirect::temporary("/sign-in").into_response(),
        Err(err) => {
            error!("Sign-up failed: {err}");

            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "message": "An error occurred during registration. Please try again.",
                    "data": { "name": form.name, "email": form.email },
                })),
            )
                .into_response()
        }
    }
}
