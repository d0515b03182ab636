use lambda_runtime::Error;
use serde_json::json;
use tracing::warn;

use crate::{WebSocketEvent, WebSocketResponse};

/// The feed is one-way: clients subscribe and receive change events, they
/// do not send messages.
pub async fn handle_default(event: &WebSocketEvent) -> Result<WebSocketResponse, Error> {
    warn!(
        "Ignoring inbound message on connection {}: {:?}",
        event.request_context.connection_id, event.body
    );

    Ok(WebSocketResponse {
        status_code: 400,
        body: Some(
            json!({"error": "This endpoint only pushes change events"}).to_string(),
        ),
    })
}
