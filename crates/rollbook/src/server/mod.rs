//! JSON HTTP API for rollbook.
//!
//! Routes mirror the attendance operations one to one. Store work runs on
//! tokio's blocking pool since every request reads (and possibly rewrites)
//! the whole data file.

mod error;
mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::error::Result;
use crate::tracker::Tracker;

pub use error::ApiError;

/// Shared state handed to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The tracker all requests operate on.
    pub tracker: Arc<Tracker>,
}

/// Build the API router.
#[must_use]
pub fn router(tracker: Arc<Tracker>) -> Router {
    Router::new()
        .route(
            "/api/students",
            get(handlers::list_students).post(handlers::create_student),
        )
        .route(
            "/api/students/{id}",
            get(handlers::get_student)
                .put(handlers::update_student)
                .delete(handlers::delete_student),
        )
        .route(
            "/api/attendance",
            get(handlers::list_attendance).post(handlers::mark_attendance),
        )
        .route("/api/attendance/report", get(handlers::attendance_report))
        .route(
            "/api/attendance/{student_id}",
            get(handlers::student_attendance),
        )
        .route("/api/statistics", get(handlers::statistics))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { tracker })
}

/// Serve the API on `addr` until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
pub async fn serve(tracker: Arc<Tracker>, addr: SocketAddr) -> Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!(
        data_file = %tracker.store().path().display(),
        "Listening on http://{}",
        listener.local_addr()?
    );

    axum::serve(listener, router(tracker))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // No signal handler available; run until the process is killed
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}
