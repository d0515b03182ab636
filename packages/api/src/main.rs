use axum::{routing::get, Router};
use lambda_http::{run, tracing, Error};
use std::env::set_var;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use shared::repositories::game_repository::DynamoDbGameRepository;
use shared::repositories::participant_repository::DynamoDbParticipantRepository;
use shared::repositories::user_repository::DynamoDbUserRepository;
use shared::services::game_service::GameService;
use shared::services::user_service::UserService;

#[tokio::main]
async fn main() -> Result<(), Error> {
    set_var("AWS_LAMBDA_HTTP_IGNORE_STAGE_IN_PATH", "true");

    // required to enable CloudWatch error logging by the runtime
    tracing::init_default_subscriber();

    // Set up services
    let config = aws_config::load_from_env().await;
    let client = aws_sdk_dynamodb::Client::new(&config);

    let user_repository = Arc::new(DynamoDbUserRepository::new(client.clone()));
    let user_service = Arc::new(UserService::new(user_repository));

    let game_repository = Arc::new(DynamoDbGameRepository::new(client.clone()));
    let participant_repository = Arc::new(DynamoDbParticipantRepository::new(client.clone()));
    let game_service = Arc::new(GameService::new(
        game_repository,
        participant_repository,
        user_service.clone(),
    ));

    let app_state = state::AppState {
        user_service,
        game_service,
    };

    // Configure CORS
    // ToDo: Tighten this up
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Merge routes
    let app = Router::new()
        .route("/health", get(routes::health::health_check))
        .merge(routes::games::routes())
        .merge(routes::stats::routes())
        .merge(routes::users::routes())
        .layer(cors)
        .with_state(app_state);

    run(app).await
}
