//! Fancy Resource API Example
//!
//! Validators are declared in `params.yaml` (plus one in code) and bound to
//! handlers through extractors. Handlers only ever see cleaned, typed
//! parameters; bad input is answered with a 400 before they run.
//!
//! ```text
//! curl -X POST localhost:3000/fancy_resources -H 'content-type: application/json' \
//!      -d '{"user_id": "5", "fancy_name": "  abc  ", "admin": true}'
//! curl 'localhost:3000/fancy_resources?page=0'
//! ```

use anyhow::Result;
use params::prelude::*;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

struct CreateFancyResource;

impl ParamsValidator for CreateFancyResource {
    const NAME: &'static str = "create_fancy_resource";
}

struct ListFancyResources;

impl ParamsValidator for ListFancyResources {
    const NAME: &'static str = "list_fancy_resources";
}

struct ShowFancyResource;

impl ParamsValidator for ShowFancyResource {
    const NAME: &'static str = "show_fancy_resource";
}

#[derive(Debug, Serialize, Deserialize)]
struct NewFancyResource {
    user_id: i64,
    fancy_name: String,
    contact: Option<String>,
}

async fn create_fancy_resource(
    BoundJson(params, _): BoundJson<CreateFancyResource>,
) -> ParamsResult<Json<NewFancyResource>> {
    let resource: NewFancyResource = params.deserialize()?;
    Ok(Json(resource))
}

async fn list_fancy_resources(Bound(params, _): Bound<ListFancyResources>) -> Json<Params> {
    Json(params)
}

async fn show_fancy_resource(Bound(params, _): Bound<ShowFancyResource>) -> Json<Params> {
    Json(params)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("params=debug".parse()?))
        .init();

    let config_path = concat!(env!("CARGO_MANIFEST_DIR"), "/demos/fancy_api/params.yaml");
    let mut registry = ParamsConfig::from_yaml_file(config_path)?.build_registry()?;
    registry.register(define_validator!("show_fancy_resource", {
        id: Uuid [required],
        verbose: Boolean [],
    })?)?;

    println!("📋 Validators: {:?}", registry.names());

    let app = Router::new()
        .route(
            "/fancy_resources",
            post(create_fancy_resource).get(list_fancy_resources),
        )
        .route("/fancy_resources/{id}", get(show_fancy_resource))
        .layer(TraceLayer::new_for_http())
        .with_state(registry);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
    println!("🌐 Server running on http://127.0.0.1:3000");

    axum::serve(listener, app).await?;
    Ok(())
}
