//! Effect handlers for the TUI runtime.
//!
//! Handlers are pure async functions that return a `UiEvent`. The runtime
//! spawns them with `spawn_task` and routes the result through the inbox.
//! They perform I/O only and never mutate state directly.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use wren_core::api::ApiClient;
use wren_core::session;

use crate::events::UiEvent;

pub async fn resolve_session(client: Arc<ApiClient>) -> UiEvent {
    let session = session::resolve_session(&client).await;
    UiEvent::SessionResolved { session }
}

/// Fetches the feed, racing against cancellation. A cancelled load
/// reports `FeedLoadAborted`, which the reducer ignores.
pub async fn load_feed(client: Arc<ApiClient>, cancel: Option<CancellationToken>) -> UiEvent {
    let fetch = client.get_posts();
    match cancel {
        Some(token) => {
            tokio::select! {
                () = token.cancelled() => UiEvent::FeedLoadAborted,
                result = fetch => UiEvent::FeedLoaded { result },
            }
        }
        None => UiEvent::FeedLoaded {
            result: fetch.await,
        },
    }
}

pub async fn create_post(client: Arc<ApiClient>, message: String, hashtags: Vec<String>) -> UiEvent {
    let result = client.create_post(&message, &hashtags).await.map(|_| ());
    UiEvent::PostCreated { result }
}

pub async fn delete_post(client: Arc<ApiClient>, id: u64) -> UiEvent {
    let result = client.delete_post(id).await.map(|_| ());
    UiEvent::PostDeleted { result }
}

pub async fn login(client: Arc<ApiClient>, username: String, password: String) -> UiEvent {
    let result = client.login(&username, &password).await;
    UiEvent::LoginCompleted { result }
}

pub async fn register(
    client: Arc<ApiClient>,
    username: String,
    email: String,
    password: String,
) -> UiEvent {
    let result = client.register(&username, &email, &password).await;
    UiEvent::RegisterCompleted { result }
}

pub async fn delete_account(client: Arc<ApiClient>) -> UiEvent {
    let result = client.delete_account().await.map(|_| ());
    UiEvent::AccountDeleted { result }
}
