use lambda_runtime::Error;
use tracing::info;

use crate::state::AppState;
use crate::{WebSocketEvent, WebSocketResponse};

pub async fn handle_connect(
    event: &WebSocketEvent,
    state: AppState,
) -> Result<WebSocketResponse, Error> {
    let connection_id = &event.request_context.connection_id;

    // Subscribers may announce their wallet on connect; broadcast delivery
    // does not depend on it.
    let wallet_address = event
        .query_string_parameters
        .as_ref()
        .and_then(|params| params.get("wallet_address"))
        .and_then(|value| value.as_str())
        .map(str::to_string);

    info!("New subscriber connection: {}", connection_id);

    if let Err(e) = state
        .notification_service
        .store_connection(connection_id, wallet_address.as_deref())
        .await
    {
        return Ok(WebSocketResponse {
            status_code: 500,
            body: Some(format!("Failed to store connection: {}", e)),
        });
    }

    Ok(WebSocketResponse {
        status_code: 200,
        body: None,
    })
}
