//! Storefront Admin
//!
//! Service layer for the storefront admin dashboard. The dashboard itself is a
//! thin UI; everything it knows about orders and products lives here:
//!
//! - Typed order and product models mirroring the backend REST resources
//! - The order status transition table and the action gate derived from it
//! - An async HTTP client for the backend API
//! - A per-order session that guards mutations against double submission
//!
//! All business logic (pricing, inventory, payment processing, persistence)
//! belongs to the backend; this crate only decides which actions an operator
//! may take next and relays their choice over HTTP.

pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod session;
pub mod view;

pub use client::{ApiClient, HttpOrderRepository, OrderRepository, ProductClient};
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use session::OrderSession;
