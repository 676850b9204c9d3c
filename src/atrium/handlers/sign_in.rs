use crate::{
    atrium::{
        cookies::{self, ACCESS_TOKEN, REFRESH_TOKEN},
        handlers::{valid_email, FieldErrors, MIN_PASSWORD_LEN},
    },
    auth_api,
    cli::globals::GlobalArgs,
};
use axum::{
    extract::Extension,
    http::{header::SET_COOKIE, HeaderMap, StatusCode},
    response::{IntoResponse, Redirect, Response},
    Json,
};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, error, instrument};
use utoipa::ToSchema;

#[derive(ToSchema, Deserialize, Debug)]
pub struct SignIn {
    email: String,
    #[schema(value_type = String, format = Password)]
    password: SecretString,
}

#[utoipa::path(
    post,
    path = "/sign-in",
    request_body = SignIn,
    responses(
        (status = 303, description = "Signed in, session cookies set, redirect to the application root"),
        (status = 400, description = "Validation failed, field errors returned", content_type = "application/json"),
        (status = 401, description = "Credentials rejected", content_type = "application/json"),
    ),
    tag = "auth"
)]
#[instrument(skip_all)]
pub async fn sign_in(globals: Extension<GlobalArgs>, payload: Option<Json<SignIn>>) -> Response {
    let form: SignIn = match payload {
        Some(Json(payload)) => payload,
        None => return (StatusCode::BAD_REQUEST, "Missing payload".to_string()).into_response(),
    };

    let mut errors = FieldErrors::default();

    if !valid_email(&form.email) {
        errors.push("email", "Please enter a valid email");
    }

    if form.password.expose_secret().len() < MIN_PASSWORD_LEN {
        errors.push("password", "Password must be at least 8 characters");
    }

    // Schema failures never reach the network
    if !errors.is_empty() {
        debug!("Sign-in rejected by schema validation");

        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "valid": false,
                "data": { "email": form.email },
                "errors": errors.into_inner(),
            })),
        )
            .into_response();
    }

    match auth_api::login(&globals, &form.email, &form.password).await {
        Ok(login) => {
            debug!("Sign-in successful for user {}", login.user.id);

            let secure = globals.secure_cookies;
            let access = cookies::set_cookie(
                ACCESS_TOKEN,
                login.access_token.expose_secret(),
                login.access_token_expires_at,
                secure,
            );
            let refresh = cookies::set_cookie(
                REFRESH_TOKEN,
                login.refresh_token.expose_secret(),
                login.refresh_token_expires_at,
                secure,
            );

            // Both slots or neither, as close to atomic as cookies get
            let (Ok(access), Ok(refresh)) = (access, refresh) else {
                error!("Sign-in succeeded but the session cookies could not be encoded");

                return StatusCode::INTERNAL_SERVER_ERROR.into_response();
            };

            let mut headers = HeaderMap::new();
            headers.append(SET_COOKIE, access);
            headers.append(SET_COOKIE, refresh);

            (headers, Redirect::to("/")).into_response()
        }
        Err(err) => {
            // Detail stays in the logs; the caller gets one generic message
            error!("Sign-in failed: {err}");

            (
                StatusCode::UNAUTHORIZED,
                Json(json!({
                    "message": "Invalid credentials",
                    "data": { "email": form.email },
                })),
            )
                .into_response()
        }
    }
}
