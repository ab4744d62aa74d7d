pub mod page;
pub mod serializers;
pub mod urls;
pub mod views;

use std::future::Future;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{error, info};

use crate::generator::Generator;
use page::Page;

/// Shared, read-only state handed to every request.
#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<dyn Generator>,
    pub page: Arc<Page>,
}

impl AppState {
    pub fn new(generator: Arc<dyn Generator>, page: Page) -> Self {
        Self {
            generator,
            page: Arc::new(page),
        }
    }
}

/// Serve until `shutdown` resolves, then let in-flight requests finish.
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, urls::router(state))
        .with_graceful_shutdown(shutdown)
        .await
}

/// Wait for `signal` (normally `tokio::signal::ctrl_c()`). A failure to
/// listen is logged and treated as a request to stop.
pub async fn shutdown_signal<F>(signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    match signal.await {
        Ok(()) => info!("shutting down"),
        Err(e) => error!(error = %e, "failed to listen for Ctrl+C; shutting down"),
    }
}
