use dotenvy::dotenv;
use salesdesk::{
    api::HttpSalesApi,
    config, console,
    core::{Catalog, Composer},
    errors::Result,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file (as early as possible)
    dotenv().ok(); // Make it non-fatal, env vars can be set externally
    info!("Attempted to load .env file.");

    // 3. Load the main application configuration
    let app_config = config::load_app_configuration()?;
    info!("Using backend at {}", app_config.api_url);

    // 4. Build the backend client
    let api = HttpSalesApi::new(app_config.api_url);

    // 5. Load the catalog context. Failure is logged but not fatal: the session
    //    still opens, it just has nothing selectable until a restart.
    let catalog = match Catalog::load(&api).await {
        Ok(catalog) => catalog,
        Err(e) => {
            error!("Error fetching catalog data: {e}");
            Catalog::default()
        }
    };

    // 6. Run the interactive session
    let mut composer = Composer::new(catalog);
    console::run(&api, &mut composer).await?;

    info!("Session ended.");
    Ok(())
}
