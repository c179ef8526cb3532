//! Client core for the food catalog dashboard.
//!
//! # Overview
//! Keeps an in-memory, ordered collection of foods consistent with a remote
//! `/foods` collection, and holds the small amount of UI state a dashboard
//! screen reads: the add/edit modal flags and the food being edited.
//!
//! # Design
//! - `FoodClient` builds `HttpRequest` values and parses `HttpResponse`
//!   values without touching the network (host-does-IO pattern).
//! - A `Transport` performs the round-trip; `UreqTransport` is the stock one.
//! - `Synchronizer` applies remote outcomes to `DashboardState`.
//! - `Dashboard` runs a synchronizer on its own task and serializes every
//!   operation through a mailbox.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod http;
pub mod state;
pub mod sync;
pub mod transport;
pub mod types;

pub use client::FoodClient;
pub use config::{ConfigError, DashboardConfig, ErrorPolicy};
pub use dashboard::Dashboard;
pub use error::{ApiError, SyncError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use state::{DashboardState, ModalState};
pub use sync::Synchronizer;
pub use transport::{Transport, UreqTransport};
pub use types::{CreateFood, Food, FoodId, FoodPatch, NewFood};
