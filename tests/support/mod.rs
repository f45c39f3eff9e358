//! In-process stub of the storefront backend for integration tests.
//!
//! The stub applies whatever it is told; policy (gating, transition checks,
//! payload validation) is the client's job and is what these tests observe.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use chrono::Utc;
use rust_decimal::Decimal;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use storefront_admin::client::{
    BulkUpdate, CancelRequest, CreateProduct, ListParams, Paginated, RefundRequest, ReturnRequest,
    StatusChangeRequest,
};
use storefront_admin::domain::order::{Order, OrderStatus, TrackingDetails};
use storefront_admin::domain::product::{Product, ProductStatus};
use storefront_admin::domain::value_objects::Money;
use storefront_admin::{ApiClient, ClientConfig};

static TRACING: Once = Once::new();

pub fn init_tracing() {
    TRACING.call_once(|| {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
        tracing_subscriber::registry()
            .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
            .with(tracing_subscriber::fmt::layer().with_test_writer())
            .try_init()
            .ok();
    });
}

#[derive(Clone, Default)]
pub struct StubState {
    pub orders: Arc<Mutex<HashMap<Uuid, Order>>>,
    pub products: Arc<Mutex<HashMap<Uuid, Product>>>,
    pub mutations: Arc<AtomicUsize>,
}

impl StubState {
    pub fn with_order(order: Order) -> Self {
        let state = Self::default();
        state.orders.lock().unwrap().insert(order.id, order);
        state
    }

    pub fn mutation_count(&self) -> usize {
        self.mutations.load(Ordering::SeqCst)
    }

    pub fn seed_product(&self, name: &str, cents: i64, quantity: i32) -> Product {
        let now = Utc::now();
        let product = Product {
            id: Uuid::new_v4(),
            sku: format!("SKU-{}", name.to_uppercase()),
            name: name.to_string(),
            description: None,
            price: Money::usd(Decimal::new(cents, 2)),
            status: ProductStatus::Active,
            inventory_quantity: quantity,
            tags: vec![],
            images: vec![],
            created_at: now,
            updated_at: now,
        };
        self.products.lock().unwrap().insert(product.id, product.clone());
        product
    }
}

pub fn sample_order(status: OrderStatus) -> Order {
    let now = Utc::now();
    Order {
        id: Uuid::new_v4(),
        order_number: "ORD-00001042".into(),
        customer_email: "buyer@example.com".into(),
        status,
        line_items: vec![],
        total: Money::usd(Decimal::new(4999, 2)),
        cancellation_reason: None,
        refunded_amount: None,
        tracking: None,
        created_at: now,
        updated_at: now,
    }
}

pub async fn spawn_stub(state: StubState) -> SocketAddr {
    let app = Router::new()
        .route("/api/v1/orders/:id", get(get_order))
        .route("/api/v1/orders/:id/status", put(put_status))
        .route("/api/v1/orders/:id/cancel", post(post_cancel))
        .route("/api/v1/orders/:id/tracking", put(put_tracking))
        .route("/api/v1/orders/:id/refund", post(post_refund))
        .route("/api/v1/orders/:id/return", post(post_return))
        .route("/api/v1/products", get(list_products).post(create_product))
        .route("/api/v1/products/:id", get(get_product).put(update_product).delete(delete_product))
        .route("/api/v1/products/bulk", post(bulk_update))
        .layer(TraceLayer::new_for_http())
        .with_state(state);
    serve(app).await
}

/// Stub that rejects everything, for expired-session tests.
pub async fn spawn_unauthorized_stub() -> SocketAddr {
    let app = Router::new().fallback(|| async { StatusCode::UNAUTHORIZED });
    serve(app).await
}

async fn serve(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

pub fn api_client(addr: SocketAddr) -> ApiClient {
    ApiClient::new(ClientConfig::new(format!("http://{addr}")).with_token("test-token")).unwrap()
}

async fn get_order(
    State(state): State<StubState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Order>, StatusCode> {
    state
        .orders
        .lock()
        .unwrap()
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

fn mutate_order(
    state: &StubState,
    id: Uuid,
    patch: impl FnOnce(&mut Order),
) -> Result<Json<Order>, StatusCode> {
    state.mutations.fetch_add(1, Ordering::SeqCst);
    let mut orders = state.orders.lock().unwrap();
    let order = orders.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    patch(order);
    order.updated_at = Utc::now();
    Ok(Json(order.clone()))
}

async fn put_status(
    State(state): State<StubState>,
    Path(id): Path<Uuid>,
    Json(req): Json<StatusChangeRequest>,
) -> Result<Json<Order>, StatusCode> {
    mutate_order(&state, id, |o| o.status = req.status)
}

async fn post_cancel(
    State(state): State<StubState>,
    Path(id): Path<Uuid>,
    Json(req): Json<CancelRequest>,
) -> Result<Json<Order>, StatusCode> {
    mutate_order(&state, id, |o| {
        o.status = OrderStatus::Cancelled;
        o.cancellation_reason = Some(req.reason);
    })
}

async fn put_tracking(
    State(state): State<StubState>,
    Path(id): Path<Uuid>,
    Json(tracking): Json<TrackingDetails>,
) -> Result<Json<Order>, StatusCode> {
    mutate_order(&state, id, |o| o.tracking = Some(tracking))
}

async fn post_refund(
    State(state): State<StubState>,
    Path(id): Path<Uuid>,
    Json(req): Json<RefundRequest>,
) -> Result<Json<Order>, StatusCode> {
    mutate_order(&state, id, |o| {
        o.refunded_amount = Some(Money::new(req.amount, o.total.currency()));
        o.status = OrderStatus::Refunded;
    })
}

async fn post_return(
    State(state): State<StubState>,
    Path(id): Path<Uuid>,
    Json(_req): Json<ReturnRequest>,
) -> Result<Json<Order>, StatusCode> {
    mutate_order(&state, id, |o| o.status = OrderStatus::Returned)
}

async fn list_products(
    State(state): State<StubState>,
    Query(params): Query<ListParams>,
) -> Json<Paginated<Product>> {
    let page = params.page.unwrap_or(1).max(1);
    let per_page = params.per_page.unwrap_or(20).min(100) as usize;
    let products = state.products.lock().unwrap();
    let mut matching: Vec<Product> = products
        .values()
        .filter(|p| {
            params
                .search
                .as_deref()
                .map(|term| p.name.to_lowercase().contains(&term.to_lowercase()))
                .unwrap_or(true)
        })
        .cloned()
        .collect();
    matching.sort_by(|a, b| a.name.cmp(&b.name));
    let total = matching.len() as i64;
    let data = matching
        .into_iter()
        .skip((page as usize - 1) * per_page)
        .take(per_page)
        .collect();
    Json(Paginated { data, total, page })
}

async fn get_product(
    State(state): State<StubState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Product>, StatusCode> {
    state
        .products
        .lock()
        .unwrap()
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn create_product(
    State(state): State<StubState>,
    Json(req): Json<CreateProduct>,
) -> (StatusCode, Json<Product>) {
    state.mutations.fetch_add(1, Ordering::SeqCst);
    let now = Utc::now();
    let id = Uuid::new_v4();
    let product = Product {
        id,
        sku: req.sku.unwrap_or_else(|| format!("SKU-{}", &id.simple().to_string()[..8])),
        name: req.name,
        description: req.description,
        price: req.price,
        status: ProductStatus::Active,
        inventory_quantity: req.inventory_quantity.unwrap_or(0),
        tags: req.tags,
        images: vec![],
        created_at: now,
        updated_at: now,
    };
    state.products.lock().unwrap().insert(id, product.clone());
    (StatusCode::CREATED, Json(product))
}

async fn update_product(
    State(state): State<StubState>,
    Path(id): Path<Uuid>,
    Json(req): Json<CreateProduct>,
) -> Result<Json<Product>, StatusCode> {
    state.mutations.fetch_add(1, Ordering::SeqCst);
    let mut products = state.products.lock().unwrap();
    let product = products.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    product.name = req.name;
    product.description = req.description;
    product.price = req.price;
    if let Some(quantity) = req.inventory_quantity {
        product.inventory_quantity = quantity;
    }
    product.updated_at = Utc::now();
    Ok(Json(product.clone()))
}

async fn delete_product(
    State(state): State<StubState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, StatusCode> {
    state.mutations.fetch_add(1, Ordering::SeqCst);
    state
        .products
        .lock()
        .unwrap()
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn bulk_update(
    State(state): State<StubState>,
    Json(req): Json<BulkUpdate>,
) -> Result<Json<Vec<Product>>, StatusCode> {
    state.mutations.fetch_add(1, Ordering::SeqCst);
    let mut products = state.products.lock().unwrap();
    let mut updated = Vec::new();
    for entry in req.updates {
        let product = products.get_mut(&entry.id).ok_or(StatusCode::NOT_FOUND)?;
        if let Some(name) = entry.fields.get("name").and_then(|v| v.as_str()) {
            product.name = name.to_string();
        }
        if let Some(quantity) = entry.fields.get("inventory_quantity").and_then(|v| v.as_i64()) {
            product.inventory_quantity = quantity as i32;
        }
        product.updated_at = Utc::now();
        updated.push(product.clone());
    }
    Ok(Json(updated))
}
