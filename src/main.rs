use api_rest::AppState;
use herbal_core::config::{path_from_env_value, rng_seed_from_env_value};
use herbal_core::constants::DEFAULT_REST_ADDR;
use herbal_core::local_store::open_store;
use herbal_core::{Catalog, CoreConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the herbal service
///
/// Loads the catalog, restores the session from the local store and serves the REST API with
/// Swagger UI at `/swagger-ui`.
///
/// # Environment Variables
/// - `HERBAL_REST_ADDR`: Server address (default: "0.0.0.0:3000")
/// - `HERBAL_CATALOG_PATH`: YAML catalog replacing the built-in one
/// - `HERBAL_STORE_PATH`: JSON file backing the local store (in memory when unset)
/// - `HERBAL_RNG_SEED`: Fixed seed for the blend mixer
///
/// # Errors
/// Returns an error if:
/// - the logging configuration cannot be initialised,
/// - the configuration or catalog is invalid,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("herbal_run=info".parse()?)
                .add_directive("herbal_core=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = std::env::var("HERBAL_REST_ADDR").unwrap_or_else(|_| DEFAULT_REST_ADDR.into());

    let cfg = CoreConfig::new(
        path_from_env_value(std::env::var("HERBAL_CATALOG_PATH").ok()),
        path_from_env_value(std::env::var("HERBAL_STORE_PATH").ok()),
        rng_seed_from_env_value(std::env::var("HERBAL_RNG_SEED").ok())?,
    )?;

    let catalog = Catalog::load(&cfg)?;
    let store = open_store(&cfg)?;
    let app = api_rest::router(AppState::new(catalog, store, cfg.rng_seed()));

    tracing::info!("++ Starting herbal REST on {}", rest_addr);

    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
