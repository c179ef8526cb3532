//! Domain DTOs for the foods API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently.
//! Integration tests catch any schema drift between the two crates.
//!
//! Price travels as text in a creation draft and as a number everywhere else;
//! the server performs the conversion.

use serde::{Deserialize, Serialize};

/// Server-assigned identifier of a food.
pub type FoodId = i64;

/// A single catalog entry returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Food {
    pub id: FoodId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    pub available: bool,
    pub image: String,
}

/// What the add form collects. Carries neither `id` nor `available`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewFood {
    pub name: String,
    pub description: String,
    pub price: String,
    pub image: String,
}

/// Request payload for creating a food: the draft flattened, plus the
/// availability flag.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateFood {
    #[serde(flatten)]
    pub draft: NewFood,
    pub available: bool,
}

impl From<NewFood> for CreateFood {
    /// New foods are always submitted as available.
    fn from(draft: NewFood) -> Self {
        Self {
            draft,
            available: true,
        }
    }
}

/// Update input from the edit form. `id` addresses the request; every other
/// field is optional and omitted from the JSON when absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FoodPatch {
    pub id: FoodId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl FoodPatch {
    pub fn new(id: FoodId) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    /// Fill every absent field from `draft`. Fields already set on the patch
    /// win, including `id`.
    pub fn overlay(self, draft: Option<&Food>) -> Self {
        let Some(draft) = draft else {
            return self;
        };
        Self {
            id: self.id,
            name: self.name.or_else(|| Some(draft.name.clone())),
            description: self.description.or_else(|| Some(draft.description.clone())),
            price: self.price.or(Some(draft.price)),
            available: self.available.or(Some(draft.available)),
            image: self.image.or_else(|| Some(draft.image.clone())),
        }
    }
}

impl From<Food> for FoodPatch {
    fn from(food: Food) -> Self {
        Self {
            id: food.id,
            name: Some(food.name),
            description: Some(food.description),
            price: Some(food.price),
            available: Some(food.available),
            image: Some(food.image),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pizza() -> Food {
        Food {
            id: 1,
            name: "Pizza".to_string(),
            description: "Cheese".to_string(),
            price: 30.0,
            available: true,
            image: "x".to_string(),
        }
    }

    #[test]
    fn food_without_description_deserializes() {
        let food: Food = serde_json::from_str(
            r#"{"id":1,"name":"Pizza","price":30,"available":true,"image":"x"}"#,
        )
        .unwrap();
        assert_eq!(food.description, "");
        assert_eq!(food.price, 30.0);
    }

    #[test]
    fn create_food_is_flat_and_available() {
        let draft = NewFood {
            name: "Soup".to_string(),
            description: "d".to_string(),
            price: "10".to_string(),
            image: "y".to_string(),
        };
        let json = serde_json::to_value(CreateFood::from(draft)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "Soup",
                "description": "d",
                "price": "10",
                "image": "y",
                "available": true,
            })
        );
    }

    #[test]
    fn patch_omits_absent_fields() {
        let patch = FoodPatch {
            price: Some(35.0),
            ..FoodPatch::new(1)
        };
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json, serde_json::json!({"id": 1, "price": 35.0}));
    }

    #[test]
    fn overlay_prefers_patch_fields() {
        let patch = FoodPatch {
            price: Some(35.0),
            available: Some(false),
            ..FoodPatch::new(1)
        };
        let merged = patch.overlay(Some(&pizza()));
        assert_eq!(merged.name.as_deref(), Some("Pizza"));
        assert_eq!(merged.description.as_deref(), Some("Cheese"));
        assert_eq!(merged.price, Some(35.0));
        assert_eq!(merged.available, Some(false));
        assert_eq!(merged.image.as_deref(), Some("x"));
    }

    #[test]
    fn overlay_keeps_patch_id_over_draft_id() {
        let merged = FoodPatch::new(7).overlay(Some(&pizza()));
        assert_eq!(merged.id, 7);
    }

    #[test]
    fn overlay_without_draft_is_identity() {
        let patch = FoodPatch {
            name: Some("Only name".to_string()),
            ..FoodPatch::new(3)
        };
        assert_eq!(patch.clone().overlay(None), patch);
    }

    #[test]
    fn patch_from_food_sets_every_field() {
        let patch = FoodPatch::from(pizza());
        assert_eq!(patch.overlay(None), FoodPatch::from(pizza()));
    }
}
