use soapconfig::get_config;
use soapdispatch::{ActionRegistry, Dispatcher, SoapDispatchExt, register_demo_actions};
use soapserver::{LoggingOptions, ServerBuilder};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = get_config();

    let mut server = ServerBuilder::new_configured().build();
    server.init_logging(LoggingOptions::from_config()).await?;
    info!(config_dir = %config.config_dir_path(), "Configuration loaded");

    server
        .add_route("/info", || async {
            serde_json::json!({"name": env!("CARGO_PKG_NAME"), "version": env!("CARGO_PKG_VERSION")})
        })
        .await;

    let mut registry = ActionRegistry::new();
    register_demo_actions(&mut registry);
    let dispatcher = Dispatcher::from_config(&config, registry)?;
    server.register_dispatch(dispatcher).await;

    server.start().await?;
    info!("Ready, POST envelopes to /dispatch/soapaction or /dispatch/soapbody");
    server.wait().await;
    Ok(())
}
