//! Order endpoints: fetch plus the five operator mutations.
//!
//! Every mutation validates its payload locally first and returns the updated
//! order resource echoed by the backend, so the caller's copy self-corrects.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::domain::order::{Order, OrderStatus, TrackingDetails};
use crate::error::Result;

use super::{validated, ApiClient};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StatusChangeRequest {
    pub status: OrderStatus,
}

#[derive(Clone, Debug, Serialize, Deserialize, Validate)]
pub struct CancelRequest {
    #[validate(length(min = 1, message = "cancellation reason is required"))]
    pub reason: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, Validate)]
pub struct RefundRequest {
    #[validate(custom = "positive_amount")]
    pub amount: Decimal,
    #[validate(length(min = 1, message = "refund reason is required"))]
    pub reason: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, Validate)]
pub struct ReturnRequest {
    #[validate(length(min = 1, message = "at least one line item is required"))]
    pub line_item_ids: Vec<Uuid>,
    #[validate(length(min = 1, message = "return reason is required"))]
    pub reason: String,
}

fn positive_amount(amount: &Decimal) -> std::result::Result<(), ValidationError> {
    if *amount <= Decimal::ZERO {
        return Err(ValidationError::new("refund amount must be positive"));
    }
    Ok(())
}

#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn fetch(&self, id: Uuid) -> Result<Order>;
    async fn change_status(&self, id: Uuid, new_status: OrderStatus) -> Result<Order>;
    async fn cancel(&self, id: Uuid, request: CancelRequest) -> Result<Order>;
    async fn update_tracking(&self, id: Uuid, tracking: TrackingDetails) -> Result<Order>;
    async fn process_refund(&self, id: Uuid, request: RefundRequest) -> Result<Order>;
    async fn request_return(&self, id: Uuid, request: ReturnRequest) -> Result<Order>;
}

#[derive(Debug)]
pub struct HttpOrderRepository {
    api: ApiClient,
}

impl HttpOrderRepository {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl OrderRepository for HttpOrderRepository {
    async fn fetch(&self, id: Uuid) -> Result<Order> {
        self.api.get_json(&format!("/orders/{id}")).await
    }

    async fn change_status(&self, id: Uuid, new_status: OrderStatus) -> Result<Order> {
        tracing::debug!(order_id = %id, status = %new_status, "changing order status");
        self.api
            .put_json(&format!("/orders/{id}/status"), &StatusChangeRequest { status: new_status })
            .await
    }

    async fn cancel(&self, id: Uuid, request: CancelRequest) -> Result<Order> {
        let request = validated(request)?;
        tracing::debug!(order_id = %id, "cancelling order");
        self.api
            .post_json(&format!("/orders/{id}/cancel"), &request)
            .await
    }

    async fn update_tracking(&self, id: Uuid, tracking: TrackingDetails) -> Result<Order> {
        tracing::debug!(order_id = %id, carrier = %tracking.carrier, "updating tracking");
        self.api
            .put_json(&format!("/orders/{id}/tracking"), &tracking)
            .await
    }

    async fn process_refund(&self, id: Uuid, request: RefundRequest) -> Result<Order> {
        let request = validated(request)?;
        tracing::debug!(order_id = %id, amount = %request.amount, "processing refund");
        self.api
            .post_json(&format!("/orders/{id}/refund"), &request)
            .await
    }

    async fn request_return(&self, id: Uuid, request: ReturnRequest) -> Result<Order> {
        let request = validated(request)?;
        tracing::debug!(order_id = %id, items = request.line_item_ids.len(), "requesting return");
        self.api
            .post_json(&format!("/orders/{id}/return"), &request)
            .await
    }
}
