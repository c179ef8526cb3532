use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Food {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    pub available: bool,
    pub image: String,
}

/// Prices arrive as text from the add form and as numbers from edits.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum Price {
    Number(f64),
    Text(String),
}

impl Price {
    pub fn to_number(&self) -> Option<f64> {
        match self {
            Price::Number(n) => Some(*n),
            Price::Text(s) => s.trim().replace(',', ".").parse().ok(),
        }
    }
}

#[derive(Deserialize)]
pub struct CreateFood {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Price,
    #[serde(default)]
    pub available: bool,
    #[serde(default)]
    pub image: String,
}

/// PUT body. Fields left out keep their stored value; a body `id` is ignored
/// in favour of the path.
#[derive(Deserialize)]
pub struct UpdateFood {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Price>,
    pub available: Option<bool>,
    pub image: Option<String>,
}

#[derive(Debug, Default)]
pub struct Catalog {
    next_id: i64,
    foods: Vec<Food>,
}

impl Catalog {
    pub fn seeded(foods: Vec<Food>) -> Self {
        let next_id = foods.iter().map(|f| f.id).max().unwrap_or(0) + 1;
        Self { next_id, foods }
    }

    fn position(&self, id: i64) -> Option<usize> {
        self.foods.iter().position(|f| f.id == id)
    }
}

pub type Db = Arc<RwLock<Catalog>>;

pub fn app() -> Router {
    app_with(Vec::new())
}

/// Router over a catalog that already holds `seed`, in that order.
pub fn app_with(seed: Vec<Food>) -> Router {
    let db: Db = Arc::new(RwLock::new(Catalog::seeded(seed)));
    Router::new()
        .route("/foods", get(list_foods).post(create_food))
        .route("/foods/{id}", get(get_food).put(update_food).delete(delete_food))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with(listener, Vec::new()).await
}

pub async fn run_with(listener: TcpListener, seed: Vec<Food>) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(seed)).await
}

async fn list_foods(State(db): State<Db>) -> Json<Vec<Food>> {
    let catalog = db.read().await;
    Json(catalog.foods.clone())
}

async fn create_food(
    State(db): State<Db>,
    Json(input): Json<CreateFood>,
) -> Result<(StatusCode, Json<Food>), StatusCode> {
    let price = input.price.to_number().ok_or(StatusCode::UNPROCESSABLE_ENTITY)?;
    let mut catalog = db.write().await;
    let food = Food {
        id: catalog.next_id,
        name: input.name,
        description: input.description,
        price,
        available: input.available,
        image: input.image,
    };
    catalog.next_id += 1;
    catalog.foods.push(food.clone());
    tracing::debug!(id = food.id, "created food");
    Ok((StatusCode::CREATED, Json(food)))
}

async fn get_food(State(db): State<Db>, Path(id): Path<i64>) -> Result<Json<Food>, StatusCode> {
    let catalog = db.read().await;
    let index = catalog.position(id).ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(catalog.foods[index].clone()))
}

async fn update_food(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateFood>,
) -> Result<Json<Food>, StatusCode> {
    let price = match input.price {
        Some(price) => Some(price.to_number().ok_or(StatusCode::UNPROCESSABLE_ENTITY)?),
        None => None,
    };
    let mut catalog = db.write().await;
    let index = catalog.position(id).ok_or(StatusCode::NOT_FOUND)?;
    let food = &mut catalog.foods[index];
    if let Some(name) = input.name {
        food.name = name;
    }
    if let Some(description) = input.description {
        food.description = description;
    }
    if let Some(price) = price {
        food.price = price;
    }
    if let Some(available) = input.available {
        food.available = available;
    }
    if let Some(image) = input.image {
        food.image = image;
    }
    tracing::debug!(id, "updated food");
    Ok(Json(food.clone()))
}

async fn delete_food(State(db): State<Db>, Path(id): Path<i64>) -> Result<StatusCode, StatusCode> {
    let mut catalog = db.write().await;
    let index = catalog.position(id).ok_or(StatusCode::NOT_FOUND)?;
    catalog.foods.remove(index);
    tracing::debug!(id, "deleted food");
    Ok(StatusCode::NO_CONTENT)
}
