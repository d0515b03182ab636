use std::sync::Arc;

use shared::services::notification_service::NotificationService;

#[derive(Clone)]
pub struct AppState {
    pub notification_service: Arc<NotificationService>,
}
