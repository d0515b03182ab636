use lambda_runtime::Error;
use tracing::info;

use crate::state::AppState;
use crate::{WebSocketEvent, WebSocketResponse};

pub async fn handle_disconnect(
    event: &WebSocketEvent,
    state: AppState,
) -> Result<WebSocketResponse, Error> {
    let connection_id = &event.request_context.connection_id;
    info!("Subscriber disconnected: {}", connection_id);

    if let Err(e) = state
        .notification_service
        .remove_connection(connection_id)
        .await
    {
        return Ok(WebSocketResponse {
            status_code: 500,
            body: Some(format!("Failed to remove connection: {}", e)),
        });
    }

    Ok(WebSocketResponse {
        status_code: 200,
        body: None,
    })
}
