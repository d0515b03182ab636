use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

pub mod actions;
pub mod state;

use shared::repositories::connection_repository::DynamoDbConnectionRepository;
use shared::services::notification_service::NotificationService;

#[derive(Debug, Deserialize)]
pub struct WebSocketEvent {
    #[serde(rename = "requestContext")]
    pub request_context: RequestContext,
    pub body: Option<String>,
    #[serde(rename = "queryStringParameters")]
    pub query_string_parameters: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct RequestContext {
    #[serde(rename = "connectionId")]
    pub connection_id: String,
    #[serde(rename = "routeKey")]
    pub route_key: String,
}

#[derive(Debug, Serialize)]
pub struct WebSocketResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .without_time()
        .init();

    // Set up services
    let config = aws_config::load_from_env().await;
    let dynamodb_client = aws_sdk_dynamodb::Client::new(&config);
    let api_gateway_client = aws_sdk_apigatewaymanagement::Client::new(&config);

    let connection_repository = Arc::new(DynamoDbConnectionRepository::new(
        dynamodb_client,
        api_gateway_client,
    ));
    let notification_service = Arc::new(NotificationService::new(connection_repository));

    let app_state = state::AppState {
        notification_service,
    };

    run(service_fn(|event: LambdaEvent<WebSocketEvent>| {
        websocket_handler(event, app_state.clone())
    }))
    .await
}

async fn websocket_handler(
    event: LambdaEvent<WebSocketEvent>,
    state: state::AppState,
) -> Result<WebSocketResponse, Error> {
    debug!("Received WebSocket event: {:?}", event);

    let websocket_event = event.payload;
    let route_key = websocket_event.request_context.route_key.clone();

    match route_key.as_str() {
        "$connect" => actions::connect::handle_connect(&websocket_event, state).await,
        "$disconnect" => actions::disconnect::handle_disconnect(&websocket_event, state).await,
        "$default" => actions::default::handle_default(&websocket_event).await,
        other => {
            warn!("Unhandled route key: {}", other);
            Ok(WebSocketResponse {
                status_code: 400,
                body: Some(format!("Unsupported route: {}", other)),
            })
        }
    }
}
