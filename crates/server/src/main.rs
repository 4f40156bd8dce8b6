use leads_core::adapters::config::app_config::AppConfig;
use std::env;
use tracing::{error, info, instrument};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

mod application_service_factory;
mod cli_adapter;
mod http_adapter;

use application_service_factory::ApplicationServiceFactory;
use cli_adapter::CliAdapter;

const DEFAULT_LOG_FILTER: &str = "leads_server=info,leads_core=info,tower_http=info";

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_tracing()?;
    setup_panic_hook();

    let args: Vec<String> = env::args().collect();

    info!("Starting leads-server");

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(report) => {
            error!("Invalid configuration: {:?}", report);
            std::process::exit(1);
        }
    };

    let lead_service = match ApplicationServiceFactory::create(&config).await {
        Ok(lead_service) => lead_service,
        Err(report) => {
            error!("Could not set up Google Sheets access: {:?}", report);
            std::process::exit(1);
        }
    };

    let cli_adapter = CliAdapter::new(config, lead_service);

    match cli_adapter.run(args).await {
        Ok(_) => {
            info!("leads-server stopped");
            Ok(())
        }
        Err(e) => {
            error!("leads-server failed: {:?}", e);
            Err(e)
        }
    }
}

fn setup_tracing() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(DEFAULT_LOG_FILTER))?;

    let stdout_layer = tracing_subscriber::fmt::layer().with_target(false);

    Registry::default().with(filter).with(stdout_layer).try_init()?;

    Ok(())
}

fn setup_panic_hook() {
    tracing::trace!("Setting panic hook");
    std::panic::set_hook(Box::new(|info| {
        tracing::error!("panic: {info}");
    }));
}
