//! Per-order editing session.
//!
//! Wraps one order plus a transient saving flag. The flag is not part of
//! order identity; it exists to reject a second mutation while one is still
//! in flight, closing the double-submission window a slow network leaves
//! open. All gating is re-derived from the current status on every call.

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::client::{CancelRequest, OrderRepository, RefundRequest, ReturnRequest};
use crate::domain::actions::{enabled_actions, OrderAction};
use crate::domain::order::{Order, OrderStatus, TrackingDetails};
use crate::domain::transitions;
use crate::error::{Error, Result};
use crate::view::{status_options, StatusOption};

#[derive(Debug)]
pub struct OrderSession<R: OrderRepository> {
    repo: R,
    order: Order,
    in_flight: bool,
}

impl<R: OrderRepository> OrderSession<R> {
    pub async fn open(repo: R, id: Uuid) -> Result<Self> {
        let order = repo.fetch(id).await?;
        Ok(Self {
            repo,
            order,
            in_flight: false,
        })
    }

    pub fn order(&self) -> &Order {
        &self.order
    }

    pub fn is_saving(&self) -> bool {
        self.in_flight
    }

    pub fn available_actions(&self) -> BTreeSet<OrderAction> {
        enabled_actions(self.order.status)
    }

    pub fn status_options(&self) -> Vec<StatusOption> {
        status_options(self.order.status)
    }

    /// Re-fetches the authoritative order. The only way to see a server-side
    /// correction once a terminal status has been reached locally.
    pub async fn refresh(&mut self) -> Result<&Order> {
        let order = self.repo.fetch(self.order.id).await?;
        self.order = order;
        Ok(&self.order)
    }

    /// `new_status` is `None` when the operator confirmed the modal without
    /// picking anything; that fails locally, before any request.
    pub async fn change_status(&mut self, new_status: Option<OrderStatus>) -> Result<&Order> {
        let new_status =
            new_status.ok_or_else(|| Error::Validation("no status selected".into()))?;
        self.ensure_enabled(OrderAction::ChangeStatus)?;
        if !transitions::is_allowed(self.order.status, new_status) {
            return Err(Error::Validation(format!(
                "cannot move order from {} to {}",
                self.order.status, new_status
            )));
        }
        self.begin()?;
        let result = self.repo.change_status(self.order.id, new_status).await;
        self.finish(result)
    }

    pub async fn cancel(&mut self, reason: impl Into<String>) -> Result<&Order> {
        self.ensure_enabled(OrderAction::Cancel)?;
        let request = CancelRequest {
            reason: reason.into(),
        };
        self.begin()?;
        let result = self.repo.cancel(self.order.id, request).await;
        self.finish(result)
    }

    pub async fn update_tracking(&mut self, tracking: TrackingDetails) -> Result<&Order> {
        self.ensure_enabled(OrderAction::UpdateTracking)?;
        self.begin()?;
        let result = self.repo.update_tracking(self.order.id, tracking).await;
        self.finish(result)
    }

    pub async fn process_refund(
        &mut self,
        amount: Decimal,
        reason: impl Into<String>,
    ) -> Result<&Order> {
        self.ensure_enabled(OrderAction::ProcessRefund)?;
        let request = RefundRequest {
            amount,
            reason: reason.into(),
        };
        self.begin()?;
        let result = self.repo.process_refund(self.order.id, request).await;
        self.finish(result)
    }

    pub async fn request_return(
        &mut self,
        line_item_ids: Vec<Uuid>,
        reason: impl Into<String>,
    ) -> Result<&Order> {
        self.ensure_enabled(OrderAction::RequestReturn)?;
        let request = ReturnRequest {
            line_item_ids,
            reason: reason.into(),
        };
        self.begin()?;
        let result = self.repo.request_return(self.order.id, request).await;
        self.finish(result)
    }

    fn ensure_enabled(&self, action: OrderAction) -> Result<()> {
        if !action.is_enabled(self.order.status) {
            return Err(Error::Validation(format!(
                "{action} is not available for {} orders",
                self.order.status
            )));
        }
        Ok(())
    }

    fn begin(&mut self) -> Result<()> {
        if self.in_flight {
            return Err(Error::Busy);
        }
        self.in_flight = true;
        Ok(())
    }

    fn finish(&mut self, result: Result<Order>) -> Result<&Order> {
        self.in_flight = false;
        self.order = result?;
        Ok(&self.order)
    }
}
