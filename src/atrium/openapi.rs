use crate::atrium::handlers;
use crate::auth_api;
use utoipa::OpenApi;

/// OpenAPI document for the gateway's documented routes. Rendered to JSON by
/// the `openapi` binary.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health::health,
        handlers::session::session,
        handlers::sign_in::sign_in,
        handlers::sign_out::sign_out,
        handlers::sign_up::sign_up,
    ),
    components(schemas(
        handlers::sign_in::SignIn,
        handlers::sign_up::SignUp,
        auth_api::User,
    )),
    tags(
        (name = "auth", description = "Session and form endpoints"),
        (name = "health", description = "Service health"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_document() {
        let doc = ApiDoc::openapi();

        assert!(doc.paths.paths.contains_key("/health"));
        assert!(doc.paths.paths.contains_key("/session"));
        assert!(doc.paths.paths.contains_key("/sign-in"));
        assert!(doc.paths.paths.contains_key("/sign-out"));
        assert!(doc.paths.paths.contains_key("/sign-up"));
    }
}
