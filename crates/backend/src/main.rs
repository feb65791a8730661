pub mod routes;
pub mod shared;
pub mod usecases;

use std::net::SocketAddr;
use tokio::net::TcpListener;

const USAGE: &str = "usage: backend [serve|check|reindex]";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    shared::logger::init()?;
    let config = shared::config::load_config()?;

    let command = std::env::args().nth(1).unwrap_or_else(|| "serve".to_string());
    match command.as_str() {
        "serve" => serve(&config).await,
        "check" => usecases::u601_check_datasets::execute(&config).await,
        "reindex" => usecases::u602_reindex_datasets::execute(&config).await,
        other => {
            tracing::error!("unknown command '{}'; {}", other, USAGE);
            anyhow::bail!(USAGE)
        }
    }
}

async fn serve(config: &shared::config::Config) -> anyhow::Result<()> {
    let app = routes::configure_routes(config);
    let port = config.server.port;
    let addr: SocketAddr = ([0, 0, 0, 0], port).into();

    tracing::info!("Attempting to bind server to http://{}", addr);
    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => {
            tracing::info!("Server successfully bound to {}", addr);
            listener
        }
        Err(e) => {
            if e.kind() == std::io::ErrorKind::AddrInUse {
                tracing::error!(
                    "Error: Port {} is already in use. Please ensure no other process is using this port.",
                    port
                );
            } else {
                tracing::error!("Failed to bind to port {}. Error: {}", port, e);
            }
            return Err(e.into());
        }
    };

    axum::serve(listener, app).await?;

    Ok(())
}
