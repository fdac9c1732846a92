// In-process stand-in for the portfolio REST API.
#![allow(dead_code)]

use std::sync::Arc;

use axum::extract::{Path, Request, State};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use snf_portfolio::app::create_app;
use snf_portfolio::config::ClientConfig;
use snf_portfolio::models::{Investment, InvestmentType, InvestmentUpdate, NewInvestment, User, UserUpdate};
use snf_portfolio::session::{Identity, IdentityProvider, StaticIdentityProvider};
use snf_portfolio::state::AppState;

pub const TOKEN: &str = "test-token";

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
}

#[derive(Default)]
pub struct MockStore {
    pub investments: Vec<Investment>,
    pub user: Option<User>,
    pub requests: Vec<RecordedRequest>,
    pub bodies: Vec<Value>,
    /// Answer the next request with this status and JSON message.
    pub fail_next: Option<(StatusCode, String)>,
    /// Reject requests without this bearer token.
    pub require_token: Option<String>,
    /// Served verbatim by `GET /api/investments` instead of `investments`.
    pub raw_list: Option<Value>,
    next_id: u64,
}

type Shared = Arc<Mutex<MockStore>>;

#[derive(Clone)]
pub struct MockApi {
    pub store: Shared,
    pub base_url: String,
}

impl MockApi {
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.store.lock().requests.clone()
    }

    pub fn count(&self, method: &str, path: &str) -> usize {
        self.store
            .lock()
            .requests
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }

    pub fn fail_next(&self, status: StatusCode, message: &str) {
        self.store.lock().fail_next = Some((status, message.to_string()));
    }

    pub fn last_body(&self) -> Option<Value> {
        self.store.lock().bodies.last().cloned()
    }

    pub fn stored(&self, id: &str) -> Option<Investment> {
        self.store
            .lock()
            .investments
            .iter()
            .find(|inv| inv.id.as_deref() == Some(id))
            .cloned()
    }

    /// Insert a record directly, bypassing HTTP. Returns its id.
    pub fn seed(&self, name: &str, symbol: &str, kind: InvestmentType, price: f64, quantity: f64) -> String {
        let mut store = self.store.lock();
        store.next_id += 1;
        let id = format!("inv-{}", store.next_id);
        store.investments.push(Investment {
            id: Some(id.clone()),
            name: name.to_string(),
            symbol: symbol.to_string(),
            kind,
            price,
            quantity,
            value: price * quantity,
            purchase_date: Some(seed_date()),
        });
        id
    }

    pub fn config(&self) -> ClientConfig {
        ClientConfig::with_api_url(&self.base_url)
    }
}

pub fn seed_date() -> DateTime<Utc> {
    "2024-01-15T09:30:00Z".parse().unwrap()
}

pub async fn spawn_mock_api() -> MockApi {
    let store: Shared = Arc::new(Mutex::new(MockStore::default()));

    let router = Router::new()
        .route("/api/investments", get(list_investments).post(create_investment))
        .route(
            "/api/investments/:id",
            get(get_investment).put(update_investment).delete(delete_investment),
        )
        .route("/api/users/me", get(get_me).put(update_me))
        .layer(middleware::from_fn_with_state(store.clone(), record))
        .with_state(store.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    MockApi {
        store,
        base_url: format!("http://{}/api", addr),
    }
}

pub fn app_with(mock: &MockApi, identity: Arc<dyn IdentityProvider>) -> AppState {
    create_app(&mock.config(), identity).unwrap()
}

pub fn signed_in_app(mock: &MockApi) -> (AppState, Arc<StaticIdentityProvider>) {
    let identity = Arc::new(StaticIdentityProvider::signed_in(
        Identity {
            uid: "user-1".into(),
            email: Some("ada@example.com".into()),
            display_name: Some("Ada".into()),
        },
        TOKEN,
    ));
    (app_with(mock, identity.clone()), identity)
}

pub fn anonymous_app(mock: &MockApi) -> AppState {
    app_with(mock, Arc::new(StaticIdentityProvider::anonymous()))
}

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "message": message }))).into_response()
}

async fn record(State(store): State<Shared>, request: Request, next: Next) -> Response {
    let authorization = request
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(String::from);

    let rejection = {
        let mut store = store.lock();
        store.requests.push(RecordedRequest {
            method: request.method().to_string(),
            path: request.uri().path().to_string(),
            authorization: authorization.clone(),
        });
        if let Some((status, message)) = store.fail_next.take() {
            Some((status, message))
        } else {
            match &store.require_token {
                Some(token) if authorization.as_deref() != Some(format!("Bearer {}", token).as_str()) => {
                    Some((StatusCode::UNAUTHORIZED, "Unauthorized".to_string()))
                }
                _ => None,
            }
        }
    };

    match rejection {
        Some((status, message)) => error(status, &message),
        None => next.run(request).await,
    }
}

async fn list_investments(State(store): State<Shared>) -> Json<Value> {
    let store = store.lock();
    let body = match &store.raw_list {
        Some(raw) => raw.clone(),
        None => json!(store.investments),
    };
    Json(body)
}

async fn get_investment(State(store): State<Shared>, Path(id): Path<String>) -> Response {
    let found = store
        .lock()
        .investments
        .iter()
        .find(|inv| inv.id.as_deref() == Some(id.as_str()))
        .cloned();
    match found {
        Some(inv) => Json(inv).into_response(),
        None => error(StatusCode::NOT_FOUND, "Investment not found"),
    }
}

async fn create_investment(State(store): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut store = store.lock();
    store.bodies.push(body.clone());

    let draft: NewInvestment = match serde_json::from_value(body) {
        Ok(draft) => draft,
        Err(e) => return error(StatusCode::BAD_REQUEST, &e.to_string()),
    };
    if store.investments.iter().any(|inv| inv.symbol == draft.symbol) {
        return error(StatusCode::CONFLICT, "Symbol already exists in portfolio");
    }

    store.next_id += 1;
    let created = Investment {
        id: Some(format!("inv-{}", store.next_id)),
        name: draft.name,
        symbol: draft.symbol,
        kind: draft.kind,
        price: draft.price,
        quantity: draft.quantity,
        value: draft.value,
        purchase_date: Some(draft.purchase_date),
    };
    store.investments.push(created.clone());
    (StatusCode::CREATED, Json(created)).into_response()
}

async fn update_investment(
    State(store): State<Shared>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let mut store = store.lock();
    store.bodies.push(body.clone());

    let update: InvestmentUpdate = match serde_json::from_value(body) {
        Ok(update) => update,
        Err(e) => return error(StatusCode::BAD_REQUEST, &e.to_string()),
    };
    match store.investments.iter_mut().find(|inv| inv.id.as_deref() == Some(id.as_str())) {
        Some(inv) => {
            update.apply_to(inv);
            Json(inv.clone()).into_response()
        }
        None => error(StatusCode::NOT_FOUND, "Investment not found"),
    }
}

async fn delete_investment(State(store): State<Shared>, Path(id): Path<String>) -> Response {
    let mut store = store.lock();
    let before = store.investments.len();
    store.investments.retain(|inv| inv.id.as_deref() != Some(id.as_str()));
    if store.investments.len() == before {
        return error(StatusCode::NOT_FOUND, "Investment not found");
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn get_me(State(store): State<Shared>) -> Response {
    let user = store.lock().user.clone();
    match user {
        Some(user) => Json(user).into_response(),
        None => error(StatusCode::NOT_FOUND, "User not found"),
    }
}

async fn update_me(State(store): State<Shared>, Json(update): Json<UserUpdate>) -> Response {
    let mut store = store.lock();
    let Some(user) = store.user.as_mut() else {
        return error(StatusCode::NOT_FOUND, "User not found");
    };
    if let Some(name) = update.name {
        user.name = name;
    }
    if let Some(email) = update.email {
        user.email = email;
    }
    if let Some(picture) = update.profile_picture {
        user.profile_picture = Some(picture);
    }
    Json(user.clone()).into_response()
}
