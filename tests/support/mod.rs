//! In-process stand-in for the users/groups/events backend.
#![allow(dead_code)]

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

#[derive(Default)]
struct Store {
    users: Vec<Value>,
    groups: Vec<Value>,
    events: Vec<Value>,
    next_id: i64,
    requests: Vec<String>,
    failures: HashMap<String, (StatusCode, String)>,
    delays: HashMap<String, Duration>,
}

impl Store {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Clone)]
pub struct FakeBackend {
    pub origin: String,
    store: Arc<Mutex<Store>>,
}

impl FakeBackend {
    /// Serve on the current runtime.
    pub async fn start() -> Self {
        let store = Arc::new(Mutex::new(Store::default()));
        let app = Router::new()
            .route("/api/users", get(list_users).post(create_user))
            .route("/api/groups", get(list_groups).post(create_group))
            .route("/api/events", get(list_events))
            .route("/api/events/group/:group_id", post(create_event))
            .with_state(Arc::clone(&store));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind fake backend");
        let addr = listener.local_addr().expect("fake backend addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("fake backend stopped");
        });

        Self {
            origin: format!("http://{addr}"),
            store,
        }
    }

    /// Serve on a dedicated thread so the backend outlives any single test
    /// runtime.
    pub fn start_detached() -> Self {
        let (tx, rx) = std::sync::mpsc::channel();
        std::thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .worker_threads(1)
                .enable_all()
                .build()
                .expect("fake backend runtime");
            runtime.block_on(async move {
                let backend = FakeBackend::start().await;
                tx.send(backend).expect("hand over fake backend");
                std::future::pending::<()>().await;
            });
        });
        rx.recv().expect("fake backend did not start")
    }

    pub async fn requests(&self) -> Vec<String> {
        self.store.lock().await.requests.clone()
    }

    pub async fn clear_requests(&self) {
        self.store.lock().await.requests.clear();
    }

    /// Answer `route` (e.g. `"POST /api/groups"`) with `status` and a raw body
    /// until [`FakeBackend::clear_failures`] is called.
    pub async fn fail(&self, route: &str, status: StatusCode, body: &str) {
        self.respond(route, status, body).await;
    }

    /// Same as [`FakeBackend::fail`], for success statuses with a body the
    /// client cannot decode.
    pub async fn respond(&self, route: &str, status: StatusCode, body: &str) {
        self.store
            .lock()
            .await
            .failures
            .insert(route.to_string(), (status, body.to_string()));
    }

    pub async fn clear_failures(&self) {
        self.store.lock().await.failures.clear();
    }

    pub async fn delay(&self, route: &str, delay: Duration) {
        self.store.lock().await.delays.insert(route.to_string(), delay);
    }

    pub async fn seed_user(&self, name: &str, email: &str) -> i64 {
        let mut store = self.store.lock().await;
        let id = store.next_id();
        store.users.push(json!({ "id": id, "name": name, "email": email }));
        id
    }

    pub async fn seed_group(&self, name: &str, description: &str) -> i64 {
        let mut store = self.store.lock().await;
        let id = store.next_id();
        store
            .groups
            .push(json!({ "id": id, "name": name, "description": description }));
        id
    }
}

type Shared = Arc<Mutex<Store>>;

async fn intercept(store: &Shared, route: String) -> Option<Response> {
    let (delay, failure) = {
        let mut guard = store.lock().await;
        guard.requests.push(route.clone());
        (
            guard.delays.get(&route).copied(),
            guard.failures.get(&route).cloned(),
        )
    };
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }
    failure.map(|(status, body)| (status, body).into_response())
}

async fn list_users(State(store): State<Shared>) -> Response {
    if let Some(response) = intercept(&store, "GET /api/users".to_string()).await {
        return response;
    }
    Json(store.lock().await.users.clone()).into_response()
}

async fn create_user(State(store): State<Shared>, Json(body): Json<Value>) -> Response {
    if let Some(response) = intercept(&store, "POST /api/users".to_string()).await {
        return response;
    }
    let mut guard = store.lock().await;
    let id = guard.next_id();
    let user = json!({ "id": id, "name": body["name"], "email": body["email"] });
    guard.users.push(user.clone());
    Json(user).into_response()
}

async fn list_groups(State(store): State<Shared>) -> Response {
    if let Some(response) = intercept(&store, "GET /api/groups".to_string()).await {
        return response;
    }
    Json(store.lock().await.groups.clone()).into_response()
}

async fn create_group(State(store): State<Shared>, Json(body): Json<Value>) -> Response {
    if let Some(response) = intercept(&store, "POST /api/groups".to_string()).await {
        return response;
    }
    let mut guard = store.lock().await;
    let id = guard.next_id();
    let group = json!({ "id": id, "name": body["name"], "description": body["description"] });
    guard.groups.push(group.clone());
    Json(group).into_response()
}

async fn list_events(State(store): State<Shared>) -> Response {
    if let Some(response) = intercept(&store, "GET /api/events".to_string()).await {
        return response;
    }
    Json(store.lock().await.events.clone()).into_response()
}

async fn create_event(
    State(store): State<Shared>,
    Path(group_id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    let route = format!("POST /api/events/group/{group_id}");
    if let Some(response) = intercept(&store, route).await {
        return response;
    }
    let mut guard = store.lock().await;
    let Some(group) = guard.groups.iter().find(|group| group["id"] == group_id).cloned() else {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "message": format!("Group not found: {group_id}") })),
        )
            .into_response();
    };
    let id = guard.next_id();
    let event = json!({
        "id": id,
        "title": body["title"],
        "date": body["date"],
        "group": group,
    });
    guard.events.push(event.clone());
    (StatusCode::CREATED, Json(event)).into_response()
}
