//! HTTP surface for the dinosaur directory.
//!
//! Routes (all `GET`, no auth):
//! - `/getAllDinoList`: directory listing
//! - `/getDinoDataByName?name=<name>`: one detail record
//! - `/getAllDinoListWithDetails`: listing enriched with every detail record
//! - `/health`

pub mod errors;
pub mod handlers;
pub mod router;
pub mod state;

use tokio::net::TcpListener;
use tracing::info;

pub use errors::AppError;
pub use router::create_router;
pub use state::AppState;

/// Serve the router on an already-bound listener until the process exits.
pub async fn run(listener: TcpListener, state: AppState) -> std::io::Result<()> {
    let app = create_router(state);

    info!(addr = %listener.local_addr()?, "listening");
    axum::serve(listener, app).await
}
