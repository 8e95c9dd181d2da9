use std::sync::Arc;

use axum::extract::{Json, State};
use hyper::StatusCode;
use log::warn;
use serde_json::{json, Value};
use tokio::sync::watch;

use crate::local_store::LocalStore;
use crate::AppState;

#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct StoredUser {
	#[serde(default)]
	pub id: Option<String>,
	#[serde(default)]
	pub username: Option<String>,
	#[serde(default)]
	pub email: Option<String>,
	#[serde(default)]
	pub role: Option<String>,
}

// Identity is injected through this context instead of every component
// reading the storage key itself. The watch channel is the one place a
// change of user is announced.
#[derive(Clone)]
pub struct SessionContext {
	store: LocalStore,
	tx: Arc<watch::Sender<Option<StoredUser>>>,
}

impl SessionContext {
	pub fn new(store: LocalStore) -> Self {
		let (tx, _rx) = watch::channel(store.read_user());
		SessionContext { store, tx: Arc::new(tx) }
	}

	pub fn current_user(&self) -> Option<StoredUser> {
		self.store.read_user()
	}

	// username, else email, else "guest"
	pub fn derived_username(&self) -> String {
		let Some(user) = self.current_user() else {
			return "guest".to_string();
		};
		user.username
			.filter(|s| !s.is_empty())
			.or(user.email.filter(|s| !s.is_empty()))
			.unwrap_or_else(|| "guest".to_string())
	}

	pub fn subscribe(&self) -> watch::Receiver<Option<StoredUser>> {
		self.tx.subscribe()
	}

	pub fn sign_in(&self, user: StoredUser, token: Option<&str>) {
		if let Err(e) = self.store.write_user(&user) {
			warn!("could not persist user: {e}");
		}
		if let Some(token) = token {
			if let Err(e) = self.store.write_token(token) {
				warn!("could not persist auth token: {e}");
			}
		}
		self.tx.send_replace(Some(user));
	}

	pub fn sign_out(&self) {
		self.store.clear_user();
		self.store.clear_token();
		self.tx.send_replace(None);
	}
}

#[derive(Debug, serde::Deserialize)]
pub struct Credentials {
	pub username: String,
	pub password: String,
}

#[derive(Debug, serde::Deserialize)]
pub struct ForgotPasswordRequest {
	pub email: String,
}

pub async fn login(State(app): State<AppState>, creds: Json<Credentials>) -> Result<Json<Value>, StatusCode> {
	let creds = creds.0;
	let resp = match app.gateway.login(&creds.username, &creds.password).await {
		Ok(v) => v,
		Err(e) => {
			warn!("login rejected for {}: {e}", creds.username);
			return Err(e.as_status());
		}
	};

	let token = resp.get("token").and_then(Value::as_str).map(str::to_owned);
	let user = resp.get("user").cloned().unwrap_or_else(|| resp.clone());
	let mut user: StoredUser = serde_json::from_value(user).unwrap_or_default();
	if user.username.is_none() && user.email.is_none() {
		user.username = Some(creds.username.clone());
	}

	app.session.sign_in(user.clone(), token.as_deref());
	Ok(Json(json!({ "user": user, "authenticated": true })))
}

pub async fn register(State(app): State<AppState>, body: Json<Value>) -> Result<Json<Value>, StatusCode> {
	match app.gateway.register(body.0).await {
		Ok(resp) => Ok(Json(resp)),
		Err(e) => {
			warn!("registration rejected: {e}");
			Err(e.as_status())
		}
	}
}

pub async fn forgot_password(
	State(app): State<AppState>,
	req: Json<ForgotPasswordRequest>,
) -> Result<Json<Value>, StatusCode> {
	match app.gateway.forgot_password(&req.email).await {
		Ok(resp) => Ok(Json(resp)),
		Err(e) => {
			warn!("forgot-password failed: {e}");
			Err(e.as_status())
		}
	}
}

// The remote call is best effort; local state always ends signed out.
pub async fn logout(State(app): State<AppState>) -> StatusCode {
	if let Err(e) = app.gateway.logout().await {
		warn!("remote logout failed: {e}");
	}
	app.session.sign_out();
	StatusCode::OK
}

pub async fn profile(State(app): State<AppState>) -> Result<Json<Value>, StatusCode> {
	match app.gateway.profile().await {
		Ok(resp) => Ok(Json(resp)),
		Err(e) => {
			warn!("profile fetch failed: {e}");
			Err(e.as_status())
		}
	}
}
