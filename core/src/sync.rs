//! Collection synchronizer: mirrors load/add/update/remove against the
//! remote `/foods` collection and applies each outcome to local state.
//!
//! # Design
//! Local state changes only after the remote call succeeds; a failed call
//! leaves the collection exactly as it was. What happens to the error depends
//! on `ErrorPolicy`:
//!
//! - add and update always log it and return normally;
//! - load and remove return it under `Faithful`, and log it under `Unified`.
//!
//! All mutators take `&mut self`, so overlapping operations cannot act on a
//! stale copy of the collection. `Dashboard` builds on this to serve many
//! callers from one task.

use tracing::{debug, error, warn};

use crate::client::FoodClient;
use crate::config::ErrorPolicy;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::state::DashboardState;
use crate::transport::Transport;
use crate::types::{CreateFood, Food, FoodId, FoodPatch, NewFood};

pub struct Synchronizer<T> {
    client: FoodClient,
    transport: T,
    policy: ErrorPolicy,
    state: DashboardState,
}

impl<T: Transport> Synchronizer<T> {
    /// Starts with an empty collection; call `load` to populate it.
    pub fn new(client: FoodClient, transport: T, policy: ErrorPolicy) -> Self {
        Self {
            client,
            transport,
            policy,
            state: DashboardState::default(),
        }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    /// Replace the whole collection with the server's, in server order.
    pub async fn load(&mut self) -> Result<(), ApiError> {
        match self.fetch_all().await {
            Ok(foods) => {
                debug!(count = foods.len(), "loaded foods");
                self.state.replace_all(foods);
                Ok(())
            }
            Err(err) => self.escalate("load", err),
        }
    }

    /// Submit `draft` as an available food and append what the server
    /// returns.
    pub async fn add(&mut self, draft: NewFood) {
        match self.create(CreateFood::from(draft)).await {
            Ok(food) => {
                debug!(id = food.id, "added food");
                self.state.append(food);
            }
            Err(err) => report("add", &err),
        }
    }

    /// Overlay `patch` onto the editing draft, PUT the result, and swap the
    /// server's copy into the collection in place.
    pub async fn update(&mut self, patch: FoodPatch) {
        let merged = patch.overlay(self.state.editing_food());
        match self.replace(&merged).await {
            Ok(food) => {
                let id = food.id;
                if self.state.replace_in_place(food) {
                    debug!(id, "updated food");
                } else {
                    warn!(id, "updated food is not in the local collection");
                }
            }
            Err(err) => report("update", &err),
        }
    }

    /// Delete `id` remotely, then drop every local entry with that id.
    pub async fn remove(&mut self, id: FoodId) -> Result<(), ApiError> {
        match self.delete(id).await {
            Ok(()) => {
                let removed = self.state.remove_by_id(id);
                debug!(id, removed, "removed food");
                Ok(())
            }
            Err(err) => self.escalate("remove", err),
        }
    }

    pub fn select_for_edit(&mut self, food: Food) {
        self.state.select_for_edit(food);
    }

    pub fn toggle_add_modal(&mut self) {
        self.state.toggle_add_modal();
    }

    pub fn toggle_edit_modal(&mut self) {
        self.state.toggle_edit_modal();
    }

    async fn fetch_all(&self) -> Result<Vec<Food>, ApiError> {
        let response = self.send(self.client.build_list_foods()).await?;
        self.client.parse_list_foods(response)
    }

    async fn create(&self, input: CreateFood) -> Result<Food, ApiError> {
        let request = self.client.build_create_food(&input)?;
        let response = self.send(request).await?;
        self.client.parse_create_food(response)
    }

    async fn replace(&self, patch: &FoodPatch) -> Result<Food, ApiError> {
        let request = self.client.build_update_food(patch)?;
        let response = self.send(request).await?;
        self.client.parse_update_food(response)
    }

    async fn delete(&self, id: FoodId) -> Result<(), ApiError> {
        let response = self.send(self.client.build_delete_food(id)).await?;
        self.client.parse_delete_food(response)
    }

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = %request.method, path = %request.path, "sending request");
        let response = self.transport.execute(request).await?;
        debug!(status = response.status, "received response");
        Ok(response)
    }

    fn escalate(&self, operation: &'static str, err: ApiError) -> Result<(), ApiError> {
        match self.policy {
            ErrorPolicy::Faithful => Err(err),
            ErrorPolicy::Unified => {
                report(operation, &err);
                Ok(())
            }
        }
    }
}

fn report(operation: &'static str, err: &ApiError) {
    error!(operation, error = %err, "remote call failed");
}
