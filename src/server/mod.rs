//! HTTP surface.
//!
//! Two routes share one immutable [`RiskModel`]:
//!
//! - `GET /` serves the prediction form
//! - `POST /predict` scores a JSON body
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use diabetes_gbdt::{RiskModel, server};
//!
//! let model = Arc::new(RiskModel::load_dir("artifacts")?);
//! server::serve("0.0.0.0:3000".parse()?, model).await?;
//! ```

mod handlers;
mod page;

pub use handlers::{PredictResponse, index, predict};

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::model::RiskModel;

/// Build the application router.
pub fn router(model: Arc<RiskModel>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/predict", post(predict))
        .with_state(model)
}

/// Bind `addr` and serve until Ctrl-C.
pub async fn serve(addr: SocketAddr, model: Arc<RiskModel>) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "server listening");

    axum::serve(listener, router(model))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown requested"),
        Err(e) => {
            warn!(error = %e, "failed to listen for ctrl-c, serving until killed");
            std::future::pending::<()>().await;
        }
    }
}
