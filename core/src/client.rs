//! Stateless HTTP request builder and response parser for the foods API.
//!
//! # Design
//! `FoodClient` holds only a `base_url` and carries no mutable state between
//! calls. Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! Status handling is lenient: any 2xx counts as success, since hosted
//! collection APIs disagree on 200 versus 201 for creation.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{CreateFood, Food, FoodId, FoodPatch};

const COLLECTION: &str = "foods";

/// Stateless client for the foods API.
#[derive(Debug, Clone)]
pub struct FoodClient {
    base_url: String,
}

impl FoodClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_list_foods(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: self.collection_path(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_create_food(&self, input: &CreateFood) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: self.collection_path(),
            headers: json_headers(),
            body: Some(to_json(input)?),
        })
    }

    /// PUT the patch to `/foods/{patch.id}`. The patch is sent as-is; overlay
    /// it onto the editing draft first.
    pub fn build_update_food(&self, patch: &FoodPatch) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Put,
            path: self.member_path(patch.id),
            headers: json_headers(),
            body: Some(to_json(patch)?),
        })
    }

    pub fn build_delete_food(&self, id: FoodId) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: self.member_path(id),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_list_foods(&self, response: HttpResponse) -> Result<Vec<Food>, ApiError> {
        check_status(&response)?;
        from_json(&response.body)
    }

    pub fn parse_create_food(&self, response: HttpResponse) -> Result<Food, ApiError> {
        check_status(&response)?;
        from_json(&response.body)
    }

    pub fn parse_update_food(&self, response: HttpResponse) -> Result<Food, ApiError> {
        check_status(&response)?;
        from_json(&response.body)
    }

    /// The body of a delete response is ignored.
    pub fn parse_delete_food(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    fn collection_path(&self) -> String {
        format!("{}/{COLLECTION}", self.base_url)
    }

    fn member_path(&self, id: FoodId) -> String {
        format!("{}/{COLLECTION}/{id}", self.base_url)
    }
}

fn json_headers() -> Vec<(String, String)> {
    vec![("content-type".to_string(), "application/json".to_string())]
}

fn to_json<T: Serialize>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string(value).map_err(|e| ApiError::SerializationError(e.to_string()))
}

fn from_json<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}
