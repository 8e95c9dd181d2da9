use std::fmt;

use hyper::StatusCode;
use log::debug;
use reqwest::header::CONTENT_TYPE;
use reqwest::Method;
use serde_json::{json, Value};

use crate::bookings::bookings::Payment;
use crate::local_store::LocalStore;

#[derive(Debug)]
pub enum ApiError {
    Status(StatusCode),
    Transport(reqwest::Error),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Status(status) => write!(f, "http error, status {status}"),
            ApiError::Transport(e) => write!(f, "request failed: {e}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    pub fn as_status(&self) -> StatusCode {
        match self {
            ApiError::Status(status) => *status,
            ApiError::Transport(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

// Single outbound door to the remote rental API. Every request carries the
// JSON content type and, when one is persisted, the bearer token. Requests
// are never retried and carry no explicit timeout.
#[derive(Clone)]
pub struct ApiGateway {
    base_url: String,
    http: reqwest::Client,
    store: LocalStore,
}

impl ApiGateway {
    pub fn new(base_url: impl Into<String>, store: LocalStore) -> Self {
        ApiGateway {
            base_url: base_url.into(),
            http: reqwest::Client::new(),
            store,
        }
    }

    fn builder(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self.http.request(method, url).header(CONTENT_TYPE, "application/json");
        if let Some(token) = self.store.read_token() {
            req = req.bearer_auth(token);
        }
        req
    }

    async fn finish(req: reqwest::RequestBuilder) -> Result<Value, ApiError> {
        let resp = req.send().await.map_err(ApiError::Transport)?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ApiError::Status(status));
        }
        resp.json().await.map_err(ApiError::Transport)
    }

    async fn request(&self, method: Method, path: &str, body: Option<Value>) -> Result<Value, ApiError> {
        debug!("{method} {path}");
        let mut req = self.builder(method, path);
        if let Some(body) = body {
            req = req.json(&body);
        }
        Self::finish(req).await
    }

    async fn get(&self, path: &str) -> Result<Value, ApiError> {
        self.request(Method::GET, path, None).await
    }

    async fn post(&self, path: &str, body: Value) -> Result<Value, ApiError> {
        self.request(Method::POST, path, Some(body)).await
    }

    async fn put(&self, path: &str, body: Option<Value>) -> Result<Value, ApiError> {
        self.request(Method::PUT, path, body).await
    }

    // auth

    pub async fn login(&self, username: &str, password: &str) -> Result<Value, ApiError> {
        self.post("/login", json!({ "username": username, "password": password })).await
    }

    pub async fn register(&self, body: Value) -> Result<Value, ApiError> {
        self.post("/register", body).await
    }

    pub async fn forgot_password(&self, email: &str) -> Result<Value, ApiError> {
        self.post("/auth/forgot-password", json!({ "email": email })).await
    }

    pub async fn logout(&self) -> Result<Value, ApiError> {
        self.request(Method::POST, "/auth/logout", None).await
    }

    pub async fn profile(&self) -> Result<Value, ApiError> {
        self.get("/auth/profile").await
    }

    // cars

    pub async fn cars(&self) -> Result<Value, ApiError> {
        self.get("/cars").await
    }

    pub async fn car(&self, id: &str) -> Result<Value, ApiError> {
        self.get(&format!("/cars/{id}")).await
    }

    pub async fn search_cars(&self, filters: &[(String, String)]) -> Result<Value, ApiError> {
        Self::finish(self.builder(Method::GET, "/cars/search").query(filters)).await
    }

    // bookings

    pub async fn create_booking(&self, body: Value) -> Result<Value, ApiError> {
        self.post("/bookings", body).await
    }

    pub async fn bookings_for_user(&self, user_id: &str) -> Result<Value, ApiError> {
        self.get(&format!("/bookings/user/{user_id}")).await
    }

    pub async fn cancel_remote_booking(&self, id: &str) -> Result<Value, ApiError> {
        self.put(&format!("/bookings/{id}/cancel"), None).await
    }

    pub async fn all_bookings(&self) -> Result<Value, ApiError> {
        self.get("/bookings").await
    }

    // payments

    // An unexpected payload shape reads as an empty list, same as the
    // persisted-data policy.
    pub async fn payments(&self) -> Result<Vec<Payment>, ApiError> {
        let value = self.get("/payments").await?;
        Ok(serde_json::from_value(value).unwrap_or_default())
    }

    pub async fn submit_payment(&self, body: Value) -> Result<Value, ApiError> {
        self.post("/payments", body).await
    }

    // admin

    pub async fn admin_bookings(&self) -> Result<Value, ApiError> {
        self.get("/admin/bookings").await
    }

    pub async fn admin_set_car_status(&self, id: &str, status: &str) -> Result<Value, ApiError> {
        self.put(&format!("/admin/cars/{id}/status"), Some(json!({ "status": status }))).await
    }

    pub async fn admin_add_car(&self, body: Value) -> Result<Value, ApiError> {
        self.post("/admin/cars", body).await
    }

    pub async fn admin_update_car(&self, id: &str, body: Value) -> Result<Value, ApiError> {
        self.put(&format!("/admin/cars/{id}"), Some(body)).await
    }

    pub async fn admin_delete_car(&self, id: &str) -> Result<Value, ApiError> {
        self.request(Method::DELETE, &format!("/admin/cars/{id}"), None).await
    }
}
