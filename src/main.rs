use anyhow::Context;
use fileward::config::ServerConfig;
use fileward::logging::{self, LOG_FILE};
use fileward::server::Dispatcher;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let root = std::env::current_dir().context("cannot determine working directory")?;

    logging::init(&root.join(LOG_FILE))?;

    let cfg = ServerConfig::load(&ServerConfig::default_path(&root), &root)?;

    let dispatcher = match Dispatcher::bind(&cfg).await {
        Ok(dispatcher) => dispatcher,
        Err(e) => {
            tracing::error!("{:#}", e);
            return Err(e);
        }
    };

    tokio::select! {
        res = dispatcher.run() => {
            res?;
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
