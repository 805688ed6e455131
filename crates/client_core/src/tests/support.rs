use std::sync::{Arc, Mutex as StdMutex};

use axum::{
    extract::{Path, State},
    http::{header::CONTENT_TYPE, HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get},
    Json, Router,
};
use shared::{
    domain::CityId,
    protocol::{City, NewCity},
};
use tokio::{net::TcpListener, sync::Mutex};

use crate::{CitiesEndpoint, CityForm, CityListItem, CityView, FormInput, UserPrompt};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub body: String,
    pub content_type: Option<String>,
}

#[derive(Default)]
pub struct ServerInner {
    pub cities: Vec<City>,
    pub requests: Vec<RecordedRequest>,
    pub list_failure: Option<StatusCode>,
    pub list_body_override: Option<String>,
    pub create_failure: Option<(StatusCode, String)>,
    pub delete_failure: Option<StatusCode>,
    next_id: u64,
}

impl ServerInner {
    fn record(&mut self, method: Method, path: impl Into<String>, body: impl Into<String>) {
        self.requests.push(RecordedRequest {
            method,
            path: path.into(),
            body: body.into(),
            content_type: None,
        });
    }
}

#[derive(Clone, Default)]
pub struct CitiesServer {
    pub inner: Arc<Mutex<ServerInner>>,
}

impl CitiesServer {
    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.inner.lock().await.requests.clone()
    }

    pub async fn methods(&self) -> Vec<Method> {
        self.requests()
            .await
            .into_iter()
            .map(|request| request.method)
            .collect()
    }
}

pub fn city(id: &str, name: &str, population: i64) -> City {
    City {
        id: CityId::from(id),
        name: name.to_string(),
        population,
        country: None,
    }
}

async fn handle_list(State(server): State<CitiesServer>) -> Response {
    let mut inner = server.inner.lock().await;
    inner.record(Method::GET, "/cities/", "");
    if let Some(status) = inner.list_failure {
        return (status, "list unavailable").into_response();
    }
    if let Some(body) = inner.list_body_override.clone() {
        return (StatusCode::OK, body).into_response();
    }
    Json(inner.cities.clone()).into_response()
}

async fn handle_create(
    State(server): State<CitiesServer>,
    headers: HeaderMap,
    body: String,
) -> Response {
    let mut inner = server.inner.lock().await;
    inner.requests.push(RecordedRequest {
        method: Method::POST,
        path: "/cities/".to_string(),
        body: body.clone(),
        content_type: headers
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string),
    });
    if let Some((status, message)) = inner.create_failure.clone() {
        return (status, message).into_response();
    }
    let Ok(new_city) = serde_json::from_str::<NewCity>(&body) else {
        return (StatusCode::BAD_REQUEST, "invalid city").into_response();
    };

    inner.next_id += 1;
    let created = City {
        id: CityId(format!("city-{}", inner.next_id)),
        name: new_city.name,
        population: new_city.population,
        country: None,
    };
    inner.cities.push(created.clone());
    (StatusCode::CREATED, Json(created)).into_response()
}

async fn handle_delete(State(server): State<CitiesServer>, Path(id): Path<String>) -> Response {
    let mut inner = server.inner.lock().await;
    inner.record(Method::DELETE, format!("/cities/{id}"), "");
    if let Some(status) = inner.delete_failure {
        return status.into_response();
    }
    let before = inner.cities.len();
    inner.cities.retain(|city| city.id.as_str() != id);
    if inner.cities.len() == before {
        return StatusCode::NOT_FOUND.into_response();
    }
    StatusCode::NO_CONTENT.into_response()
}

pub async fn spawn_cities_server(cities: Vec<City>) -> (CitiesServer, CitiesEndpoint) {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let server = CitiesServer::default();
    server.inner.lock().await.cities = cities;

    let app = Router::new()
        .route("/cities/", get(handle_list).post(handle_create))
        .route("/cities/:id", delete(handle_delete))
        .with_state(server.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    let endpoint = CitiesEndpoint::parse(&format!("http://{addr}/cities/")).expect("endpoint");
    (server, endpoint)
}

/// Endpoint on a port nobody listens on.
pub async fn unreachable_endpoint() -> CitiesEndpoint {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    CitiesEndpoint::parse(&format!("http://{addr}/cities/")).expect("endpoint")
}

#[derive(Default)]
pub struct RecordingView {
    pub renders: StdMutex<Vec<Vec<CityListItem>>>,
}

impl RecordingView {
    pub fn with_items(items: Vec<CityListItem>) -> Self {
        Self {
            renders: StdMutex::new(vec![items]),
        }
    }

    pub fn current(&self) -> Vec<CityListItem> {
        self.renders
            .lock()
            .expect("view lock")
            .last()
            .cloned()
            .unwrap_or_default()
    }

    pub fn render_count(&self) -> usize {
        self.renders.lock().expect("view lock").len()
    }
}

impl CityView for RecordingView {
    fn replace_items(&self, items: Vec<CityListItem>) {
        self.renders.lock().expect("view lock").push(items);
    }
}

pub struct ScriptedPrompt {
    answer: bool,
    pub confirmations: StdMutex<Vec<String>>,
    pub notifications: StdMutex<Vec<String>>,
}

impl ScriptedPrompt {
    pub fn answering(answer: bool) -> Self {
        Self {
            answer,
            confirmations: StdMutex::new(Vec::new()),
            notifications: StdMutex::new(Vec::new()),
        }
    }

    pub fn notifications(&self) -> Vec<String> {
        self.notifications.lock().expect("prompt lock").clone()
    }

    pub fn confirmation_count(&self) -> usize {
        self.confirmations.lock().expect("prompt lock").len()
    }
}

impl UserPrompt for ScriptedPrompt {
    fn confirm(&self, message: &str) -> bool {
        self.confirmations
            .lock()
            .expect("prompt lock")
            .push(message.to_string());
        self.answer
    }

    fn notify(&self, message: &str) {
        self.notifications
            .lock()
            .expect("prompt lock")
            .push(message.to_string());
    }
}

#[derive(Default)]
pub struct StaticForm {
    pub input: StdMutex<FormInput>,
    pub resets: StdMutex<u32>,
}

impl StaticForm {
    pub fn filled(name: &str, population: &str, country: &str) -> Self {
        Self {
            input: StdMutex::new(FormInput {
                name: name.to_string(),
                population: population.to_string(),
                country: country.to_string(),
            }),
            resets: StdMutex::new(0),
        }
    }

    pub fn reset_count(&self) -> u32 {
        *self.resets.lock().expect("form lock")
    }
}

impl CityForm for StaticForm {
    fn read(&self) -> FormInput {
        self.input.lock().expect("form lock").clone()
    }

    fn reset(&self) {
        *self.input.lock().expect("form lock") = FormInput::default();
        *self.resets.lock().expect("form lock") += 1;
    }
}
