use std::env;
use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use search_gateway::{Dependencies, GatewayError, Settings};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if env::var("LOG_FORMAT").map(|f| f == "json").unwrap_or(false) {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn run() -> Result<(), GatewayError> {
    let settings = Settings::from_env()?;
    let deps = Dependencies::new(&settings);

    if let Err(e) = deps.verify().await {
        deps.shutdown().await;
        return Err(e);
    }

    info!("Search gateway ready, waiting for shutdown signal");
    let signal = tokio::signal::ctrl_c().await;

    info!("Received shutdown signal");
    deps.shutdown().await;

    signal?;
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    init_tracing();

    match run().await {
        Ok(()) => {
            info!("Search gateway shutdown complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Search gateway failed");
            ExitCode::FAILURE
        }
    }
}
