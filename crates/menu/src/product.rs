use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use forno_core::{DomainError, DomainResult, RecordId, record_id_newtype};
use forno_inventory::StockItemId;

/// Menu product identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub RecordId);

record_id_newtype!(ProductId, "product id");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductCategory {
    Pizza,
    Drink,
    Dessert,
    Other,
}

/// Pizza sizes; drinks and desserts carry no size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductSize {
    Small,
    Medium,
    Large,
    Family,
}

/// Quantity of a stock item consumed per unit of product sold.
///
/// The reference is by opaque id; existence of the stock item is resolved at
/// order time, not enforced here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientRequirement {
    pub stock_item_id: StockItemId,
    pub quantity: f64,
}

/// Fields supplied when adding a product to the menu.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub category: ProductCategory,
    #[serde(default)]
    pub size: Option<ProductSize>,
    pub price_cents: u64,
    #[serde(default)]
    pub ingredients: Vec<IngredientRequirement>,
    #[serde(default)]
    pub active: Option<bool>,
    #[serde(default)]
    pub image: Option<String>,
}

/// Field-wise update; only named fields change.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<ProductCategory>,
    #[serde(default)]
    pub size: Option<ProductSize>,
    #[serde(default)]
    pub price_cents: Option<u64>,
    #[serde(default)]
    pub ingredients: Option<Vec<IngredientRequirement>>,
    #[serde(default)]
    pub active: Option<bool>,
    #[serde(default)]
    pub image: Option<String>,
}

/// A menu product record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: Option<String>,
    pub category: ProductCategory,
    pub size: Option<ProductSize>,
    /// Price in centavos.
    pub price_cents: u64,
    pub ingredients: Vec<IngredientRequirement>,
    pub active: bool,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn validate_ingredients(ingredients: &[IngredientRequirement]) -> DomainResult<()> {
    for ing in ingredients {
        if !ing.quantity.is_finite() || ing.quantity <= 0.0 {
            return Err(DomainError::validation(
                "ingredient quantity must be a positive, finite number",
            ));
        }
    }
    Ok(())
}

impl Product {
    pub fn create(id: ProductId, draft: ProductDraft, now: DateTime<Utc>) -> DomainResult<Self> {
        if draft.name.trim().is_empty() {
            return Err(DomainError::validation("product name must not be empty"));
        }
        if draft.price_cents == 0 {
            return Err(DomainError::validation("price must be positive"));
        }
        validate_ingredients(&draft.ingredients)?;

        Ok(Self {
            id,
            name: draft.name,
            description: draft.description,
            category: draft.category,
            size: draft.size,
            price_cents: draft.price_cents,
            ingredients: draft.ingredients,
            active: draft.active.unwrap_or(true),
            image: draft.image,
            created_at: now,
            updated_at: now,
        })
    }

    /// Apply a partial update; untouched fields keep their value.
    pub fn apply_update(&mut self, update: ProductUpdate, now: DateTime<Utc>) -> DomainResult<()> {
        if let Some(name) = &update.name {
            if name.trim().is_empty() {
                return Err(DomainError::validation("product name must not be empty"));
            }
        }
        if let Some(price) = update.price_cents {
            if price == 0 {
                return Err(DomainError::validation("price must be positive"));
            }
        }
        if let Some(ingredients) = &update.ingredients {
            validate_ingredients(ingredients)?;
        }

        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = Some(description);
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(size) = update.size {
            self.size = Some(size);
        }
        if let Some(price) = update.price_cents {
            self.price_cents = price;
        }
        if let Some(ingredients) = update.ingredients {
            self.ingredients = ingredients;
        }
        if let Some(active) = update.active {
            self.active = active;
        }
        if let Some(image) = update.image {
            self.image = Some(image);
        }
        self.updated_at = now;
        Ok(())
    }
}
