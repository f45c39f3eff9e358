//! Static order status transition table.
//!
//! Forward progression only. `cancel`, `refund` and `return` reach their
//! statuses through dedicated actions, not through this table.

use crate::domain::order::OrderStatus;

/// Statuses reachable from `status` by one manual change, in display order.
/// Terminal statuses yield an empty slice.
pub fn transitions(status: OrderStatus) -> &'static [OrderStatus] {
    use OrderStatus::*;
    match status {
        Pending => &[Processing, Shipped, Delivered, Cancelled],
        Processing => &[Shipped, Delivered, Cancelled],
        Shipped => &[Delivered, Refunded],
        Delivered => &[Refunded],
        // Returned has no modeled outgoing edge; the backend owns that path.
        Cancelled | Refunded | Returned => &[],
    }
}

/// Absorbing statuses: once reached, manual status changes stay disabled
/// until a fresh fetch observes a server-side correction.
pub fn is_terminal(status: OrderStatus) -> bool {
    matches!(status, OrderStatus::Cancelled | OrderStatus::Refunded)
}

pub fn is_allowed(from: OrderStatus, to: OrderStatus) -> bool {
    transitions(from).contains(&to)
}
