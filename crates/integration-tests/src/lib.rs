//! Integration tests for Pocket Shop.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p pocket-shop-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `catalog_client` - The HTTP client against a local catalog server
//! - `storefront_flow` - Screen controller, view and store working together
//!
//! Tests never touch the real catalog API: [`spawn_catalog_server`] serves
//! scripted responses from `127.0.0.1` on a random port.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use pocket_shop_storefront::config::CatalogConfig;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use url::Url;

/// One scripted HTTP response.
#[derive(Debug, Clone)]
pub struct Reply {
    pub status: StatusCode,
    pub body: String,
}

impl Reply {
    /// 200 with a JSON body.
    #[must_use]
    pub fn json(value: &Value) -> Self {
        Self {
            status: StatusCode::OK,
            body: value.to_string(),
        }
    }

    /// Arbitrary status and raw body.
    #[must_use]
    pub fn raw(status: StatusCode, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }
}

#[derive(Clone)]
struct ServerState {
    replies: Arc<Mutex<VecDeque<Reply>>>,
    hits: Arc<AtomicUsize>,
}

/// A running fake catalog server.
pub struct CatalogServer {
    /// Full URL of the products endpoint.
    pub url: Url,
    hits: Arc<AtomicUsize>,
}

impl CatalogServer {
    /// Number of requests served so far.
    #[must_use]
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    /// Catalog configuration pointing at this server.
    #[must_use]
    pub fn config(&self) -> CatalogConfig {
        CatalogConfig::new(self.url.clone())
    }
}

async fn products(State(state): State<ServerState>) -> impl IntoResponse {
    state.hits.fetch_add(1, Ordering::SeqCst);
    let reply = {
        let mut replies = state
            .replies
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        // The last reply repeats forever.
        if replies.len() > 1 {
            replies.pop_front()
        } else {
            replies.front().cloned()
        }
    }
    .unwrap_or_else(|| Reply::raw(StatusCode::NOT_FOUND, "no reply scripted"));

    (
        reply.status,
        [(header::CONTENT_TYPE, "application/json")],
        reply.body,
    )
}

/// Serve `replies` in order from `GET /products`; the last one repeats.
///
/// # Panics
///
/// Panics if the local listener cannot be bound.
pub async fn spawn_catalog_server(replies: Vec<Reply>) -> CatalogServer {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind local listener");
    let addr = listener.local_addr().expect("local addr");

    let hits = Arc::new(AtomicUsize::new(0));
    let state = ServerState {
        replies: Arc::new(Mutex::new(replies.into())),
        hits: Arc::clone(&hits),
    };
    let app = Router::new()
        .route("/products", get(products))
        .with_state(state);

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    let url = Url::parse(&format!("http://{addr}/products")).expect("valid url");
    CatalogServer { url, hits }
}

/// A URL on which nothing is listening.
///
/// # Panics
///
/// Panics if the local listener cannot be bound.
pub async fn unreachable_url() -> Url {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind local listener");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    Url::parse(&format!("http://{addr}/products")).expect("valid url")
}

/// A product in the catalog API's JSON shape.
#[must_use]
pub fn product_json(id: i64, title: &str, description: &str, price: f64) -> Value {
    json!({
        "id": id,
        "title": title,
        "description": description,
        "category": "electronics",
        "price": price,
        "discountPercentage": 10.5,
        "rating": 4.2,
        "stock": 12,
        "tags": ["gadget"],
        "brand": "Acme",
        "images": [format!("https://cdn.example.com/{id}/1.png")],
        "thumbnail": format!("https://cdn.example.com/{id}/thumbnail.png")
    })
}

/// A catalog envelope around `products`.
#[must_use]
pub fn catalog_json(products: Vec<Value>) -> Value {
    let total = products.len();
    json!({
        "products": products,
        "total": total,
        "skip": 0,
        "limit": 30
    })
}

/// Phone X, Phone Y and Tablet Z.
#[must_use]
pub fn sample_catalog() -> Value {
    catalog_json(vec![
        product_json(1, "Phone X", "Flagship handset with OLED display", 549.0),
        product_json(2, "Phone Y", "Budget handset", 199.99),
        product_json(3, "Tablet Z", "Ten inch tablet", 329.5),
    ])
}
