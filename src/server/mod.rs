pub mod api;

use crate::agent::IntentAgent;
use crate::config::{ AgentConfig, TlsPaths };
use axum_server::tls_rustls::RustlsConfig;
use log::{ info, error };
use std::error::Error;
use std::net::SocketAddr;
use std::time::Duration;

const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

pub struct Server {
    addr: SocketAddr,
    agent: IntentAgent,
    tls: Option<TlsPaths>,
}

impl Server {
    pub fn new(config: &AgentConfig, agent: IntentAgent) -> Self {
        Self {
            addr: config.server_addr,
            agent,
            tls: config.tls.clone(),
        }
    }

    pub async fn run(self) -> Result<(), Box<dyn Error + Send + Sync>> {
        let app = api::router(self.agent);

        match self.tls {
            Some(tls) => {
                info!(
                    "TLS enabled. Loading certificate from '{}' and key from '{}'",
                    tls.cert_path,
                    tls.key_path
                );
                let tls_config = RustlsConfig::from_pem_file(&tls.cert_path, &tls.key_path).await?;

                let handle = axum_server::Handle::new();
                let shutdown_handle = handle.clone();
                tokio::spawn(async move {
                    shutdown_signal().await;
                    shutdown_handle.graceful_shutdown(Some(SHUTDOWN_GRACE));
                });

                info!("HTTPS server listening on: https://{}", self.addr);
                axum_server::bind_rustls(self.addr, tls_config)
                    .handle(handle)
                    .serve(app.into_make_service())
                    .await?;
            }
            None => {
                let listener = tokio::net::TcpListener::bind(self.addr).await.map_err(|e| {
                    error!("Failed to bind HTTP server to {}: {}. Try a different port.", self.addr, e);
                    e
                })?;
                info!("HTTP server listening on: http://{}", self.addr);
                axum::serve(listener, app)
                    .with_graceful_shutdown(shutdown_signal())
                    .await?;
            }
        }

        info!("Server stopped");
        Ok(())
    }
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, draining connections...");
}
