use atrium::atrium::openapi::ApiDoc;
use utoipa::OpenApi;

// Print the OpenAPI document for the gateway routes
fn main() {
    match ApiDoc::openapi().to_pretty_json() {
        Ok(doc) => println!("{doc}"),
        Err(err) => {
            eprintln!("Failed to render OpenAPI document: {err}");
            std::process::exit(1);
        }
    }
}
