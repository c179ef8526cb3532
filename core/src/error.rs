//! Error types for the foods API client and the dashboard.
//!
//! # Design
//! `NotFound` gets a dedicated variant because callers frequently distinguish
//! "the resource does not exist" from "the server returned an unexpected
//! status." All other non-2xx responses land in `HttpError` with the raw
//! status code and body for debugging. Network failures that never produced
//! a response are `Transport`.

use thiserror::Error;

/// Errors returned by `FoodClient` parse methods and by transports.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404: the requested food does not exist.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// The request never completed (connection refused, DNS, I/O).
    #[error("transport failed: {0}")]
    Transport(String),
}

/// Errors surfaced by the `Dashboard` handle.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The dashboard task has stopped and can no longer accept commands.
    #[error("dashboard is closed")]
    Closed,
}
