use aws_lambda_events::event::dynamodb::{Event, EventRecord};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde_dynamo::aws_sdk_dynamodb_1::from_item;
use std::sync::Arc;
use tracing::{error, info, warn};

use shared::models::change_event::{ChangeEvent, ChangeKind};
use shared::models::game::Game;
use shared::models::game_participant::GameParticipant;
use shared::repositories::connection_repository::DynamoDbConnectionRepository;
use shared::services::notification_service::NotificationService;

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .without_time()
        .init();

    info!("Change feed notifier Lambda function starting");

    let config = aws_config::load_from_env().await;
    let dynamodb_client = aws_sdk_dynamodb::Client::new(&config);
    let api_gateway_client = aws_sdk_apigatewaymanagement::Client::new(&config);
    let connection_repository = Arc::new(DynamoDbConnectionRepository::new(
        dynamodb_client,
        api_gateway_client,
    ));
    let notification_service = Arc::new(NotificationService::new(connection_repository));

    run(service_fn(|event: LambdaEvent<Event>| {
        let notification_service = notification_service.clone();
        async move {
            let (event, _context) = event.into_parts();

            info!("Processing {} records", event.records.len());

            for record in event.records {
                if let Err(e) = process_record(record, &notification_service).await {
                    error!("Failed to process record: {}", e);
                }
            }

            Ok::<(), Error>(())
        }
    }))
    .await
}

async fn process_record(
    record: EventRecord,
    notification_service: &NotificationService,
) -> Result<(), Box<dyn std::error::Error>> {
    let kind = match ChangeKind::from_event_name(record.event_name.as_str()) {
        Some(kind) => kind,
        None => {
            warn!("Unhandled event type: {}", record.event_name);
            return Ok(());
        }
    };

    // REMOVE records only carry the old image.
    let image = match kind {
        ChangeKind::Remove => record.change.old_image,
        _ => record.change.new_image,
    };

    let table = record
        .event_source_arn
        .as_deref()
        .and_then(table_from_stream_arn)
        .unwrap_or_default();
    let event = match table {
        "games" => {
            let game: Game = from_item(image.into())?;
            info!("Game {} changed ({:?})", game.id, kind);
            ChangeEvent::GameChanged { kind, game }
        }
        "game_participants" => {
            let participant: GameParticipant = from_item(image.into())?;
            info!(
                "Participant {} in game {} changed ({:?})",
                participant.user_id, participant.game_id, kind
            );
            ChangeEvent::ParticipantChanged { kind, participant }
        }
        other => {
            warn!("Record from unexpected table: {}", other);
            return Ok(());
        }
    };

    let delivered = notification_service.broadcast(&event).await?;
    info!("Delivered change event to {} subscribers", delivered);
    Ok(())
}

/// Extracts the table name out of a stream ARN, e.g.
/// `arn:aws:dynamodb:eu-west-1:123:table/games/stream/2026-...` -> `games`.
fn table_from_stream_arn(arn: &str) -> Option<&str> {
    let mut segments = arn.split('/');
    segments.next()?; // "arn:aws:dynamodb:...:table"
    segments.next()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_from_stream_arn() {
        let arn = "arn:aws:dynamodb:eu-west-1:123456789012:table/games/stream/2026-08-30T00:00:00.000";
        assert_eq!(table_from_stream_arn(arn), Some("games"));

        let arn = "arn:aws:dynamodb:eu-west-1:123456789012:table/game_participants/stream/2026-08-30T00:00:00.000";
        assert_eq!(table_from_stream_arn(arn), Some("game_participants"));
    }

    #[test]
    fn test_table_from_arn_without_table_segment() {
        assert_eq!(table_from_stream_arn("not-an-arn"), None);
    }
}
