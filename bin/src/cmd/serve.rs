//! Serve command implementation.

use crate::{server, sources};
use anyhow::{Context, Result};
use fundscore::Settings;
use std::{net::SocketAddr, path::PathBuf};

/// Run the HTTP API until the process is stopped.
pub(crate) async fn serve(settings: Settings, addr: SocketAddr, output_dir: PathBuf) -> Result<()> {
    let pipeline = sources::build_pipeline(&settings)?;
    let app = server::router(server::AppState::new(pipeline, settings, output_dir));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "Starting HTTP server");
    axum::serve(listener, app).await?;

    Ok(())
}
