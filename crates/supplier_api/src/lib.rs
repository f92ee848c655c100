//! HTTP surface for the industrial supplier catalog backend.
//!
//! # Responsibility
//! - Expose catalog reads, demo seeding, diagnostics and RFQ intake as JSON
//!   endpoints over `supplier_core`.
//! - Map core errors to HTTP status codes.
//!
//! # Invariants
//! - Handlers never block the async runtime; storage work runs on the
//!   blocking pool.
//! - CORS is fully open by product decision.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;

use log::info;
use std::net::{Ipv4Addr, SocketAddr};
use tokio::net::TcpListener;

/// Binds `0.0.0.0:port` and serves until Ctrl-C.
pub async fn serve(state: AppState, port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, port));
    let listener = TcpListener::bind(addr).await?;
    info!(
        "event=server_start module=api status=ok addr={} storage_ready={}",
        listener.local_addr()?,
        state.backend().is_ready()
    );

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("event=server_stop module=api status=ok");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        log::error!("event=server_signal module=api status=error error={err}");
    }
}
