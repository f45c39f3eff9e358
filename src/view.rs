//! Presentation adapters for status selection controls.
//!
//! The synthetic disabled option lives here, not in the transition table:
//! it is a UI affordance, not a business rule.

use crate::domain::order::OrderStatus;
use crate::domain::transitions;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusOption {
    pub value: OrderStatus,
    pub label: String,
    pub disabled: bool,
}

/// Options for the status dropdown: one enabled entry per allowed transition,
/// in table order. When no transition exists the control still shows the
/// current status as a single disabled entry, so it is never empty.
pub fn status_options(current: OrderStatus) -> Vec<StatusOption> {
    let next = transitions::transitions(current);
    if next.is_empty() {
        return vec![StatusOption {
            value: current,
            label: current.to_string(),
            disabled: true,
        }];
    }
    next.iter()
        .map(|status| StatusOption {
            value: *status,
            label: status.to_string(),
            disabled: false,
        })
        .collect()
}
