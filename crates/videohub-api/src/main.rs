use videohub_core::Config;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    videohub_api::setup::init_tracing();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize the application (database, storage, services, routes)
    let (_state, router) = videohub_api::setup::initialize_app(config.clone()).await?;

    // Start the server
    videohub_api::setup::server::start_server(&config, router).await?;

    Ok(())
}
