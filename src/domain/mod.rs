//! Domain model: pure types and policy, no I/O.

pub mod actions;
pub mod order;
pub mod product;
pub mod transitions;
pub mod value_objects;

pub use actions::{enabled_actions, OrderAction};
pub use order::{LineItem, Order, OrderStatus, TrackingDetails};
pub use product::{Product, ProductStatus};
pub use value_objects::{Money, Sku};
