//! Action gate: which operator actions are enabled for a given status.

use std::collections::BTreeSet;
use std::fmt;

use crate::domain::order::OrderStatus;
use crate::domain::transitions;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum OrderAction {
    ChangeStatus,
    Cancel,
    UpdateTracking,
    ProcessRefund,
    RequestReturn,
}

impl OrderAction {
    pub const ALL: [OrderAction; 5] = [
        OrderAction::ChangeStatus,
        OrderAction::Cancel,
        OrderAction::UpdateTracking,
        OrderAction::ProcessRefund,
        OrderAction::RequestReturn,
    ];

    /// Pure lookup; callers re-derive from the authoritative status on every
    /// render rather than caching the result.
    pub fn is_enabled(self, status: OrderStatus) -> bool {
        use OrderStatus::*;
        match self {
            OrderAction::ChangeStatus => !transitions::transitions(status).is_empty(),
            OrderAction::Cancel => !matches!(status, Cancelled | Refunded),
            OrderAction::UpdateTracking => matches!(status, Shipped | Delivered),
            OrderAction::ProcessRefund => matches!(status, Delivered | Returned),
            OrderAction::RequestReturn => status == Delivered,
        }
    }
}

impl fmt::Display for OrderAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderAction::ChangeStatus => write!(f, "change status"),
            OrderAction::Cancel => write!(f, "cancel"),
            OrderAction::UpdateTracking => write!(f, "update tracking"),
            OrderAction::ProcessRefund => write!(f, "process refund"),
            OrderAction::RequestReturn => write!(f, "request return"),
        }
    }
}

pub fn enabled_actions(status: OrderStatus) -> BTreeSet<OrderAction> {
    OrderAction::ALL
        .into_iter()
        .filter(|action| action.is_enabled(status))
        .collect()
}
