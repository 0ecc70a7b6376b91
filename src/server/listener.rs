use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{debug, error, info};

use crate::config::ServerConfig;
use crate::http::connection::Connection;
use crate::server::Site;

/// Pause after a failed accept, e.g. when out of file descriptors.
const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

/// Owns the listening socket and spawns one task per connection.
pub struct Dispatcher {
    listener: TcpListener,
    site: Arc<Site>,
}

impl Dispatcher {
    /// Binds `cfg.host:cfg.port`. This is the only fatal failure point of
    /// the server.
    pub async fn bind(cfg: &ServerConfig) -> anyhow::Result<Self> {
        let listener = TcpListener::bind((cfg.host.as_str(), cfg.port))
            .await
            .with_context(|| {
                format!(
                    "failed to listen on {}:{} (is the port already in use?)",
                    cfg.host, cfg.port
                )
            })?;

        let site = Arc::new(Site::from_config(cfg));

        Ok(Self { listener, site })
    }

    pub fn local_addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Accepts connections until the task is dropped. A failed accept or
    /// connection is logged and never ends the loop.
    pub async fn run(self) -> anyhow::Result<()> {
        let addr = self.local_addr()?;
        info!(
            "Listening on {}, serving {}",
            addr,
            self.site.resolver.root().display()
        );

        loop {
            let (socket, peer) = match self.listener.accept().await {
                Ok(accepted) => accepted,
                Err(e) => {
                    error!("Failed to accept connection: {}", e);
                    tokio::time::sleep(ACCEPT_BACKOFF).await;
                    continue;
                }
            };
            debug!("Accepted connection from {}", peer);

            let site = Arc::clone(&self.site);
            tokio::spawn(async move {
                let mut conn = Connection::new(socket, peer, site);
                if let Err(e) = conn.run().await {
                    debug!("Connection error from {}: {}", peer, e);
                }
            });
        }
    }
}
