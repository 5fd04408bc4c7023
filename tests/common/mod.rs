// Shared test helpers: an in-process fake Portainer API

#![allow(dead_code)]

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use portainer_sensors::portainer_client::{ClientOptions, PortainerClient};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const TOKEN: &str = "test-jwt";
pub const USERNAME: &str = "admin";
pub const PASSWORD: &str = "secret";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Auth,
    Endpoints,
    Containers,
    Status,
}

struct Reply {
    status: StatusCode,
    body: Value,
}

struct FakeState {
    replies: HashMap<Route, Reply>,
    hits: HashMap<Route, usize>,
    last_auth_body: Option<Value>,
    container_requests: Vec<(i64, Option<String>)>,
    delays: HashMap<Route, Duration>,
}

type Shared = Arc<Mutex<FakeState>>;

#[derive(Clone)]
pub struct FakePortainer {
    pub url: String,
    state: Shared,
}

pub fn default_endpoints() -> Value {
    json!([
        { "Id": 1, "Type": 4, "Name": "edge-site" },
        { "Id": 2, "Type": 1, "Name": "local" },
        { "Id": 3, "Type": 1, "Name": "other" }
    ])
}

pub fn default_containers() -> Value {
    json!([
        {
            "Id": "aaa111",
            "Names": ["/my_app"],
            "Image": "nginx:latest",
            "ImageID": "sha256:deadbeef",
            "Command": "nginx -g 'daemon off;'",
            "Created": 1700000000,
            "Status": "Up 2 hours",
            "State": "running",
            "Ports": [
                { "IP": "0.0.0.0", "PrivatePort": 80, "PublicPort": 8080, "Type": "tcp" },
                { "IP": "::", "PrivatePort": 80, "PublicPort": 8080, "Type": "tcp" },
                { "PrivatePort": 443, "Type": "tcp" }
            ],
            "Labels": {}
        },
        {
            "Id": "bbb222",
            "Names": ["/db"],
            "Image": "postgres:16",
            "Created": 1690000000,
            "Status": "Exited (0) 3 days ago",
            "State": "exited",
            "Ports": []
        }
    ])
}

pub fn default_status() -> Value {
    json!({ "InstanceID": "inst-1", "Version": "2.19.4" })
}

/// Client options with the given cooldown and a short request timeout.
pub fn options(min_refresh_interval: Duration) -> ClientOptions {
    ClientOptions {
        min_refresh_interval,
        request_timeout: Duration::from_secs(2),
    }
}

fn authorized(headers: &HeaderMap) -> bool {
    let expected = format!("Bearer {}", TOKEN);
    headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()) == Some(expected.as_str())
}

fn respond(state: &Shared, route: Route, headers: Option<&HeaderMap>) -> Response {
    let mut s = state.lock().unwrap();
    *s.hits.entry(route).or_default() += 1;
    if let Some(h) = headers
        && !authorized(h)
    {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "message": "Unauthorized" })))
            .into_response();
    }
    let reply = &s.replies[&route];
    (reply.status, Json(reply.body.clone())).into_response()
}

async fn delay(state: &Shared, route: Route) {
    let delay = state.lock().unwrap().delays.get(&route).copied();
    if let Some(d) = delay {
        tokio::time::sleep(d).await;
    }
}

async fn auth(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    state.lock().unwrap().last_auth_body = Some(body);
    delay(&state, Route::Auth).await;
    respond(&state, Route::Auth, None)
}

async fn endpoints(State(state): State<Shared>, headers: HeaderMap) -> Response {
    delay(&state, Route::Endpoints).await;
    respond(&state, Route::Endpoints, Some(&headers))
}

async fn containers(
    State(state): State<Shared>,
    Path(id): Path<i64>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    state
        .lock()
        .unwrap()
        .container_requests
        .push((id, query.get("all").cloned()));
    delay(&state, Route::Containers).await;
    respond(&state, Route::Containers, Some(&headers))
}

async fn status(State(state): State<Shared>, headers: HeaderMap) -> Response {
    delay(&state, Route::Status).await;
    respond(&state, Route::Status, Some(&headers))
}

impl FakePortainer {
    /// Starts a healthy fake on 127.0.0.1 with an ephemeral port.
    pub async fn start() -> Self {
        let mut replies = HashMap::new();
        replies.insert(
            Route::Auth,
            Reply {
                status: StatusCode::OK,
                body: json!({ "jwt": TOKEN }),
            },
        );
        replies.insert(
            Route::Endpoints,
            Reply {
                status: StatusCode::OK,
                body: default_endpoints(),
            },
        );
        replies.insert(
            Route::Containers,
            Reply {
                status: StatusCode::OK,
                body: default_containers(),
            },
        );
        replies.insert(
            Route::Status,
            Reply {
                status: StatusCode::OK,
                body: default_status(),
            },
        );
        let state: Shared = Arc::new(Mutex::new(FakeState {
            replies,
            hits: HashMap::new(),
            last_auth_body: None,
            container_requests: Vec::new(),
            delays: HashMap::new(),
        }));

        let router = Router::new()
            .route("/api/auth", post(auth))
            .route("/api/endpoints", get(endpoints))
            .route("/api/endpoints/{id}/docker/containers/json", get(containers))
            .route("/api/status", get(status))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self {
            url: format!("http://{}", addr),
            state,
        }
    }

    pub fn set_reply(&self, route: Route, status: u16, body: Value) {
        self.state.lock().unwrap().replies.insert(
            route,
            Reply {
                status: StatusCode::from_u16(status).unwrap(),
                body,
            },
        );
    }

    /// Holds every response on `route` for `delay` before replying.
    pub fn set_delay(&self, route: Route, delay: Duration) {
        self.state.lock().unwrap().delays.insert(route, delay);
    }

    pub fn hits(&self, route: Route) -> usize {
        self.state
            .lock()
            .unwrap()
            .hits
            .get(&route)
            .copied()
            .unwrap_or(0)
    }

    pub fn total_hits(&self) -> usize {
        self.state.lock().unwrap().hits.values().sum()
    }

    pub fn last_auth_body(&self) -> Option<Value> {
        self.state.lock().unwrap().last_auth_body.clone()
    }

    /// (endpoint id, `all` query value) for every container list request.
    pub fn container_requests(&self) -> Vec<(i64, Option<String>)> {
        self.state.lock().unwrap().container_requests.clone()
    }

    pub fn client(&self, min_refresh_interval: Duration) -> Arc<PortainerClient> {
        self.client_with(options(min_refresh_interval))
    }

    pub fn client_with(&self, options: ClientOptions) -> Arc<PortainerClient> {
        Arc::new(PortainerClient::new(&self.url, USERNAME, PASSWORD, options).unwrap())
    }
}

/// A URL nothing listens on.
pub async fn unreachable_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
