//! The I/O half of the host-does-IO split.
//!
//! # Design
//! A `Transport` takes one `HttpRequest` and yields one `HttpResponse`.
//! Non-2xx statuses are returned as data; only failures that produced no
//! response at all are errors. Status interpretation stays in `FoodClient`.
//!
//! `UreqTransport` drives a blocking `ureq` agent on tokio's blocking pool so
//! the dashboard task is never stalled by network I/O.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Executes HTTP requests built by `FoodClient`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        (**self).execute(request).await
    }
}

/// `Transport` backed by a `ureq` agent with status-as-error disabled.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for UreqTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let agent = self.agent.clone();
        tokio::task::spawn_blocking(move || execute_blocking(&agent, request))
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?
    }
}

fn execute_blocking(agent: &ureq::Agent, req: HttpRequest) -> Result<HttpResponse, ApiError> {
    let path = req.path.as_str();
    let result = match (req.method, req.body.as_deref()) {
        (HttpMethod::Get, _) => agent.get(path).call(),
        (HttpMethod::Delete, _) => agent.delete(path).call(),
        (HttpMethod::Post, Some(body)) => agent
            .post(path)
            .content_type("application/json")
            .send(body.as_bytes()),
        (HttpMethod::Post, None) => agent.post(path).send_empty(),
        (HttpMethod::Put, Some(body)) => agent
            .put(path)
            .content_type("application/json")
            .send(body.as_bytes()),
        (HttpMethod::Put, None) => agent.put(path).send_empty(),
    };
    let mut response = result.map_err(|e| ApiError::Transport(e.to_string()))?;

    let status = response.status().as_u16();
    let body = response
        .body_mut()
        .read_to_string()
        .map_err(|e| ApiError::Transport(e.to_string()))?;

    Ok(HttpResponse::new(status, body))
}
