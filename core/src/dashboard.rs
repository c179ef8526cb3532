//! Presentation-facing handle to a synchronizer running on its own task.
//!
//! # Design
//! A single task owns the `Synchronizer` and drains a bounded mailbox of
//! commands one at a time. Handles are cheap clones of the sender; each
//! command carries a oneshot reply. Because only the owning task touches the
//! collection, two rapid adds from different handles both land, in arrival
//! order.

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};

use crate::client::FoodClient;
use crate::config::DashboardConfig;
use crate::error::{ApiError, SyncError};
use crate::state::DashboardState;
use crate::sync::Synchronizer;
use crate::transport::Transport;
use crate::types::{Food, FoodId, FoodPatch, NewFood};

enum Command {
    Add {
        draft: NewFood,
        reply: oneshot::Sender<()>,
    },
    Update {
        patch: FoodPatch,
        reply: oneshot::Sender<()>,
    },
    Remove {
        id: FoodId,
        reply: oneshot::Sender<Result<(), ApiError>>,
    },
    SelectForEdit {
        food: Food,
        reply: oneshot::Sender<()>,
    },
    ToggleAddModal {
        reply: oneshot::Sender<()>,
    },
    ToggleEditModal {
        reply: oneshot::Sender<()>,
    },
    View {
        reply: oneshot::Sender<DashboardState>,
    },
}

/// Cloneable handle to a running dashboard.
#[derive(Debug, Clone)]
pub struct Dashboard {
    tx: mpsc::Sender<Command>,
}

impl Dashboard {
    /// Load the collection, then start the task that owns it.
    ///
    /// Under the faithful error policy a failed initial load is returned and
    /// no task is started. Must be called within a tokio runtime.
    pub async fn open<T>(config: &DashboardConfig, transport: T) -> Result<Self, SyncError>
    where
        T: Transport + 'static,
    {
        let client = FoodClient::new(&config.base_url);
        let mut synchronizer = Synchronizer::new(client, transport, config.error_policy);
        synchronizer.load().await?;

        let (tx, rx) = mpsc::channel(config.mailbox_capacity.max(1));
        info!(
            base_url = %config.base_url,
            foods = synchronizer.state().foods().len(),
            "dashboard started"
        );
        tokio::spawn(run(synchronizer, rx));
        Ok(Self { tx })
    }

    pub async fn add(&self, draft: NewFood) -> Result<(), SyncError> {
        self.request(|reply| Command::Add { draft, reply }).await
    }

    /// Add and update never fail on remote errors; those are logged by the
    /// dashboard task.
    pub async fn update(&self, patch: FoodPatch) -> Result<(), SyncError> {
        self.request(|reply| Command::Update { patch, reply }).await
    }

    pub async fn remove(&self, id: FoodId) -> Result<(), SyncError> {
        self.request(|reply| Command::Remove { id, reply })
            .await?
            .map_err(SyncError::from)
    }

    pub async fn select_for_edit(&self, food: Food) -> Result<(), SyncError> {
        self.request(|reply| Command::SelectForEdit { food, reply })
            .await
    }

    pub async fn toggle_add_modal(&self) -> Result<(), SyncError> {
        self.request(|reply| Command::ToggleAddModal { reply }).await
    }

    pub async fn toggle_edit_modal(&self) -> Result<(), SyncError> {
        self.request(|reply| Command::ToggleEditModal { reply }).await
    }

    /// Snapshot of the collection, editing draft and modal flags.
    pub async fn view(&self) -> Result<DashboardState, SyncError> {
        self.request(|reply| Command::View { reply }).await
    }

    async fn request<R>(
        &self,
        command: impl FnOnce(oneshot::Sender<R>) -> Command,
    ) -> Result<R, SyncError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(command(reply))
            .await
            .map_err(|_| SyncError::Closed)?;
        rx.await.map_err(|_| SyncError::Closed)
    }
}

async fn run<T: Transport>(mut synchronizer: Synchronizer<T>, mut rx: mpsc::Receiver<Command>) {
    while let Some(command) = rx.recv().await {
        // A dropped reply receiver means the caller stopped waiting; the
        // command has still been applied.
        match command {
            Command::Add { draft, reply } => {
                synchronizer.add(draft).await;
                let _ = reply.send(());
            }
            Command::Update { patch, reply } => {
                synchronizer.update(patch).await;
                let _ = reply.send(());
            }
            Command::Remove { id, reply } => {
                let result = synchronizer.remove(id).await;
                let _ = reply.send(result);
            }
            Command::SelectForEdit { food, reply } => {
                synchronizer.select_for_edit(food);
                let _ = reply.send(());
            }
            Command::ToggleAddModal { reply } => {
                synchronizer.toggle_add_modal();
                let _ = reply.send(());
            }
            Command::ToggleEditModal { reply } => {
                synchronizer.toggle_edit_modal();
                let _ = reply.send(());
            }
            Command::View { reply } => {
                let _ = reply.send(synchronizer.state().clone());
            }
        }
    }
    debug!("all dashboard handles dropped, stopping");
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicI64, Ordering};
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::config::ErrorPolicy;
    use crate::http::{HttpMethod, HttpResponse};
    use crate::transport::fake::{ok_json, FakeTransport};

    fn config(policy: ErrorPolicy) -> DashboardConfig {
        DashboardConfig {
            base_url: "http://api".to_string(),
            mailbox_capacity: 4,
            error_policy: policy,
        }
    }

    fn draft(name: &str) -> NewFood {
        NewFood {
            name: name.to_string(),
            description: String::new(),
            price: "1".to_string(),
            image: String::new(),
        }
    }

    /// Serves an empty initial list and echoes each POST back with a fresh
    /// id, like the real server.
    fn echo_server() -> Arc<FakeTransport> {
        let next_id = AtomicI64::new(1);
        FakeTransport::new(move |req| match req.method {
            HttpMethod::Get => ok_json(200, json!([])),
            HttpMethod::Post => {
                let mut body: serde_json::Value =
                    serde_json::from_str(req.body.as_deref().unwrap_or("{}")).unwrap();
                body["id"] = json!(next_id.fetch_add(1, Ordering::SeqCst));
                body["price"] = json!(1.0);
                ok_json(201, body)
            }
            _ => Ok(HttpResponse::new(204, "")),
        })
    }

    #[tokio::test]
    async fn open_fails_when_initial_load_fails() {
        let transport = FakeTransport::scripted(vec![Ok(HttpResponse::new(503, "down"))]);
        let err = Dashboard::open(&config(ErrorPolicy::Faithful), transport)
            .await
            .unwrap_err();
        assert!(matches!(err, SyncError::Api(ApiError::HttpError { status: 503, .. })));
    }

    #[tokio::test]
    async fn open_recovers_from_failed_load_under_unified_policy() {
        let transport = FakeTransport::scripted(vec![Ok(HttpResponse::new(503, "down"))]);
        let dashboard = Dashboard::open(&config(ErrorPolicy::Unified), transport)
            .await
            .unwrap();
        assert!(dashboard.view().await.unwrap().foods().is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_adds_are_all_retained() {
        let transport = echo_server();
        let dashboard = Dashboard::open(&config(ErrorPolicy::Faithful), Arc::clone(&transport))
            .await
            .unwrap();

        let mut tasks = Vec::new();
        for i in 0..16 {
            let handle = dashboard.clone();
            tasks.push(tokio::spawn(async move {
                handle.add(draft(&format!("food {i}"))).await
            }));
        }
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        let view = dashboard.view().await.unwrap();
        let mut ids: Vec<FoodId> = view.foods().iter().map(|f| f.id).collect();
        assert_eq!(ids.len(), 16);
        ids.sort_unstable();
        assert_eq!(ids, (1..=16).collect::<Vec<_>>());
        assert!(view.foods().iter().all(|f| f.available));
    }

    #[tokio::test]
    async fn remove_error_reaches_caller() {
        let transport = FakeTransport::scripted(vec![
            ok_json(200, json!([{"id": 1, "name": "A", "price": 1, "available": true, "image": ""}])),
            Ok(HttpResponse::new(404, "")),
        ]);
        let dashboard = Dashboard::open(&config(ErrorPolicy::Faithful), transport)
            .await
            .unwrap();

        let err = dashboard.remove(1).await.unwrap_err();
        assert!(matches!(err, SyncError::Api(ApiError::NotFound)));
        assert_eq!(dashboard.view().await.unwrap().foods().len(), 1);
    }

    #[tokio::test]
    async fn add_error_is_not_reported_to_caller() {
        let transport = FakeTransport::scripted(vec![
            ok_json(200, json!([])),
            Ok(HttpResponse::new(500, "boom")),
        ]);
        let dashboard = Dashboard::open(&config(ErrorPolicy::Faithful), transport)
            .await
            .unwrap();

        dashboard.add(draft("Soup")).await.unwrap();
        assert!(dashboard.view().await.unwrap().foods().is_empty());
    }

    #[tokio::test]
    async fn modal_transitions_are_visible_in_view() {
        let dashboard = Dashboard::open(&config(ErrorPolicy::Faithful), echo_server())
            .await
            .unwrap();
        let food: Food = serde_json::from_value(
            json!({"id": 3, "name": "Tea", "price": 2, "available": false, "image": "t"}),
        )
        .unwrap();

        dashboard.toggle_add_modal().await.unwrap();
        dashboard.select_for_edit(food.clone()).await.unwrap();
        let view = dashboard.view().await.unwrap();
        assert!(view.add_modal().is_open());
        assert!(view.edit_modal().is_open());
        assert_eq!(view.editing_food(), Some(&food));

        dashboard.toggle_edit_modal().await.unwrap();
        dashboard.toggle_add_modal().await.unwrap();
        let view = dashboard.view().await.unwrap();
        assert!(!view.add_modal().is_open());
        assert!(!view.edit_modal().is_open());
        assert_eq!(view.editing_food(), Some(&food), "closing keeps the draft");
    }
}
