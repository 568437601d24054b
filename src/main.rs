use blockdark::{api, config};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stdout)
        .with_target(false)
        .init();

    info!("BLOCK-DARK starting...");

    let cfg = config::load()?;
    info!("  Ledger API: {}", cfg.api_url);
    info!("  Port: {}", cfg.port);
    info!("  Layout: seed {} / {} iterations", cfg.layout.seed, cfg.layout.iterations);

    let api_handle = tokio::spawn(api::serve(cfg));

    tokio::select! {
        res = api_handle => match res {
            Ok(Ok(_)) => info!("Dashboard exited cleanly"),
            Ok(Err(e)) => error!("Dashboard error: {:?}", e),
            Err(e) => error!("Dashboard task panicked: {:?}", e),
        },
        _ = signal::ctrl_c() => {
            info!("Shutdown signal received, stopping...");
        }
    }

    info!("BLOCK-DARK stopped.");
    Ok(())
}
