//! Product catalog endpoints, consumed as the backend defines them.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::domain::product::Product;
use crate::domain::value_objects::{Money, Sku};
use crate::error::{Error, Result};

use super::{validated, ApiClient};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ListParams {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub search: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub total: i64,
    pub page: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize, Validate)]
pub struct CreateProduct {
    #[validate(length(min = 1, message = "product name is required"))]
    pub name: String,
    pub sku: Option<String>,
    pub description: Option<String>,
    pub price: Money,
    pub inventory_quantity: Option<i32>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// One entry of the backend's bulk endpoint payload:
/// `{"updates": [{"id": ..., "fields": {...}}]}`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BulkProductUpdate {
    pub id: Uuid,
    pub fields: serde_json::Value,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BulkUpdate {
    pub updates: Vec<BulkProductUpdate>,
}

pub struct ProductClient {
    api: ApiClient,
}

impl ProductClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self, params: &ListParams) -> Result<Paginated<Product>> {
        self.api.get_json_query("/products", params).await
    }

    pub async fn get(&self, id: Uuid) -> Result<Product> {
        self.api.get_json(&format!("/products/{id}")).await
    }

    pub async fn create(&self, product: CreateProduct) -> Result<Product> {
        let product = validated(product)?;
        if let Some(sku) = &product.sku {
            Sku::new(sku).map_err(|e| Error::Validation(e.to_string()))?;
        }
        tracing::debug!(name = %product.name, "creating product");
        self.api.post_json("/products", &product).await
    }

    pub async fn update(&self, id: Uuid, product: CreateProduct) -> Result<Product> {
        let product = validated(product)?;
        self.api
            .put_json(&format!("/products/{id}"), &product)
            .await
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        self.api.delete(&format!("/products/{id}")).await
    }

    pub async fn bulk_update(&self, update: BulkUpdate) -> Result<Vec<Product>> {
        if update.updates.is_empty() {
            return Err(Error::Validation("bulk update carries no entries".into()));
        }
        tracing::debug!(count = update.updates.len(), "bulk updating products");
        self.api.post_json("/products/bulk", &update).await
    }
}
