use inspectshot_core::Config;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Load configuration; missing storage settings abort startup here
    let config = Config::from_env()?;

    // Initialize the application (telemetry, storage, routes)
    let (_state, router) = inspectshot_api::setup::initialize_app(config.clone()).await?;

    // Start the server
    inspectshot_api::setup::server::start_server(&config, router).await?;

    Ok(())
}
