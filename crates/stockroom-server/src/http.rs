//! HTTP surface
//!
//! ## Routes
//!
//! - `GET /` — liveness, fixed greeting.
//! - `GET /inventory?id=<productID>` — run the inventory write path.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use stockroom_core::app::{CONFIRMATION, InventoryService, Phase};
use stockroom_core::domain::InventoryError;
use tower_http::trace::TraceLayer;
use tracing::debug;

pub const GREETING: &str = "Hello world! It's me";

/// Build the router. The service is shared read-only across requests.
pub fn router(service: Arc<InventoryService>) -> Router {
    Router::new()
        .route("/", get(hello))
        .route("/inventory", get(inventory))
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

async fn hello() -> &'static str {
    GREETING
}

/// `GET /inventory` — 200 / 400 / 500 with a plain-text body.
async fn inventory(
    State(service): State<Arc<InventoryService>>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<&'static str, ApiError> {
    let item = service
        .handle(params.iter().map(|(k, v)| (k.as_str(), v.as_str())))
        .await?;
    debug!(phase = %Phase::Responding, key = %item.key, "inventory request done");
    Ok(CONFIRMATION)
}

/// InventoryError を HTTP レスポンスに変換（body はメッセージそのまま）
pub struct ApiError(InventoryError);

impl From<InventoryError> for ApiError {
    fn from(err: InventoryError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        debug!(phase = %Phase::Responding, status = status.as_u16(), "inventory request failed");
        (status, self.0.to_string()).into_response()
    }
}
