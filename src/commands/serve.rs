//! `serve` command: binds the listener and runs the web interface until a
//! shutdown signal arrives.

use crate::db::db::Store;
use crate::libs::config::Config;
use crate::libs::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::{msg_error, msg_info};
use crate::web::{router, AppState};
use anyhow::Result;
use clap::Args;
use tokio::net::TcpListener;

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Address to bind, overrides the configured host
    #[arg(long)]
    host: Option<String>,

    /// Port to bind, overrides the configured port
    #[arg(short, long)]
    port: Option<u16>,

    /// SQLite file, absolute or relative to the data directory
    #[arg(long)]
    db: Option<String>,
}

impl ServeArgs {
    fn apply(self, config: &mut Config) {
        if let Some(host) = self.host {
            config.server.host = host;
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(db) = self.db {
            config.database.file = db;
        }
    }
}

pub async fn cmd(args: ServeArgs, mut config: Config) -> Result<()> {
    args.apply(&mut config);

    let store = Store::new(DataStorage::new().get_path(&config.database.file)?);
    store.init()?;
    msg_info!(Message::DatabaseOpened(store.path().display().to_string()));

    let state = AppState::new(store, config.session.clone())?;
    let address = config.server.address();
    let listener = TcpListener::bind(&address).await?;
    msg_info!(Message::ServerListening(listener.local_addr()?.to_string()));

    axum::serve(listener, router(state)).with_graceful_shutdown(shutdown_signal()).await?;
    msg_info!(Message::ServerShuttingDown);
    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => msg_info!(Message::ServerReceivedCtrlC),
            Err(e) => {
                msg_error!(Message::SignalHandlerFailed(e.to_string()));
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
                msg_info!(Message::ServerReceivedSigterm);
            }
            Err(e) => {
                msg_error!(Message::SignalHandlerFailed(e.to_string()));
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let mut config = Config::default();
        let args = ServeArgs {
            host: Some("0.0.0.0".to_string()),
            port: Some(8080),
            db: None,
        };
        args.apply(&mut config);
        assert_eq!(config.server.address(), "0.0.0.0:8080");
        assert_eq!(config.database.file, Config::default().database.file);
    }
}
