use axum::extract::{Json, State};
use chrono::Utc;
use hyper::StatusCode;
use log::{info, warn};
use rand::Rng;
use serde_json::{json, Value};

use crate::bookings::bookings::{Booking, BookingStatus, ContactDetails};
use crate::catalog::Car;
use crate::AppState;

#[derive(Debug, Clone, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
	pub car: Car,
	pub start_date: String,
	pub end_date: String,
	pub total_cost: f64,
	#[serde(default)]
	pub first_name: String,
	#[serde(default)]
	pub last_name: String,
	#[serde(default)]
	pub email: String,
	#[serde(default)]
	pub phone: String,
	#[serde(default)]
	pub license: String,
	#[serde(default)]
	pub card_name: String,
	#[serde(default)]
	pub card_number: String,
	#[serde(default)]
	pub expiry_date: String,
	#[serde(default)]
	pub cvv: String,
}

pub fn missing_field(req: &CheckoutRequest) -> Option<&'static str> {
	if req.first_name.trim().is_empty() {
		return Some("firstName");
	}
	if req.last_name.trim().is_empty() {
		return Some("lastName");
	}
	if req.email.trim().is_empty() {
		return Some("email");
	}
	if req.phone.trim().is_empty() {
		return Some("phone");
	}
	None
}

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

// "WH" plus nine random base-36 characters, upper-cased.
pub fn new_booking_id() -> String {
	let mut rng = rand::thread_rng();
	let tail: String = (0..9).map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char).collect();
	format!("WH{}", tail.to_uppercase())
}

pub fn build_booking(
	req: &CheckoutRequest,
	id: &str,
	user_id: &str,
	payment_ref: Option<String>,
	created_at: String,
) -> Booking {
	Booking {
		id: id.to_string(),
		car_id: req.car.id.clone(),
		car: req.car.clone(),
		user_id: user_id.to_string(),
		start_date: req.start_date.clone(),
		end_date: req.end_date.clone(),
		total_cost: req.total_cost,
		status: BookingStatus::Confirmed,
		user_details: ContactDetails {
			name: format!("{} {}", req.first_name.trim(), req.last_name.trim()),
			email: req.email.clone(),
			phone: req.phone.clone(),
		},
		created_at,
		payment_ref,
	}
}

// Validate, submit the payment, then prepend the new booking to the
// persisted list. Validation failures abort before anything leaves the
// process.
pub async fn checkout(
	State(app): State<AppState>,
	req: Json<CheckoutRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
	let req = req.0;
	if let Some(field) = missing_field(&req) {
		return Err((
			StatusCode::UNPROCESSABLE_ENTITY,
			Json(json!({ "error": format!("{field} is required") })),
		));
	}

	let username = app.session.derived_username();
	let payment = json!({
		"username": username,
		"amount": req.total_cost,
		"method": "card",
		"cardName": req.card_name,
		"cardNumber": req.card_number,
		"expiryDate": req.expiry_date,
		"cvv": req.cvv,
		"email": req.email,
		"date": Utc::now().to_rfc3339(),
	});
	let resp = match app.gateway.submit_payment(payment).await {
		Ok(v) => v,
		Err(e) => {
			warn!("payment submission rejected: {e}");
			return Err((
				StatusCode::BAD_GATEWAY,
				Json(json!({ "error": "payment was not accepted" })),
			));
		}
	};
	let payment_ref = resp
		.get("transactionId")
		.or_else(|| resp.get("id"))
		.map(|v| match v {
			Value::String(s) => s.clone(),
			other => other.to_string(),
		});

	let id = new_booking_id();
	let booking = build_booking(&req, &id, &username, payment_ref, Utc::now().to_rfc3339());

	let mut all = app.store.read_bookings();
	all.insert(0, booking);
	if let Err(e) = app.store.write_bookings(&all) {
		warn!("could not persist booking {id}: {e}");
		return Err((
			StatusCode::INTERNAL_SERVER_ERROR,
			Json(json!({ "error": "booking could not be saved" })),
		));
	}

	info!("booking {id} confirmed for {username}");
	Ok(Json(json!({ "bookingId": id, "status": "confirmed" })))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::admin::AdminPanel;
	use crate::gateway::ApiGateway;
	use crate::local_store::LocalStore;
	use crate::session::SessionContext;
	use axum::routing::post;
	use axum::Router;
	use uuid::Uuid;

	fn request() -> CheckoutRequest {
		CheckoutRequest {
			car: crate::fixtures::fleet()[0].clone(),
			start_date: "2025-09-01".to_string(),
			end_date: "2025-09-04".to_string(),
			total_cost: 300.0,
			first_name: "Ada".to_string(),
			last_name: "Lovelace".to_string(),
			email: "ada@example.com".to_string(),
			phone: "+1-555-0000".to_string(),
			license: "DL-1".to_string(),
			card_name: "Ada Lovelace".to_string(),
			card_number: "4111111111111111".to_string(),
			expiry_date: "12/27".to_string(),
			cvv: "123".to_string(),
		}
	}

	fn scratch_state(base_url: &str) -> AppState {
		let dir = std::env::temp_dir().join(format!("wheelio-checkout-{}", Uuid::new_v4()));
		let store = LocalStore::open(dir);
		AppState {
			session: SessionContext::new(store.clone()),
			gateway: ApiGateway::new(base_url, store.clone()),
			admin: AdminPanel::demo(),
			store,
		}
	}

	async fn fake_payments_remote() -> String {
		let app = Router::new().route(
			"/api/payments",
			post(|| async { Json(json!({ "id": "tx_1", "status": "completed" })) }),
		);
		let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
		let addr = listener.local_addr().unwrap();
		tokio::spawn(async move {
			axum::serve(listener, app).await.unwrap();
		});
		format!("http://{addr}/api")
	}

	#[test]
	fn booking_id_shape() {
		for _ in 0..50 {
			let id = new_booking_id();
			assert_eq!(id.len(), 11);
			assert!(id.starts_with("WH"));
			assert!(id[2..].chars().all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
		}
	}

	#[test]
	fn required_fields_are_checked_in_order() {
		let mut req = request();
		assert_eq!(missing_field(&req), None);
		req.phone = "  ".to_string();
		assert_eq!(missing_field(&req), Some("phone"));
		req.first_name = String::new();
		assert_eq!(missing_field(&req), Some("firstName"));
	}

	#[tokio::test]
	async fn missing_phone_aborts_before_any_network_call() {
		// the gateway points at a dead address: reaching the network at
		// all would surface as BAD_GATEWAY instead of the validation error
		let app = scratch_state("http://127.0.0.1:1/api");
		let mut req = request();
		req.phone = String::new();

		let err = checkout(State(app.clone()), Json(req)).await.unwrap_err();
		assert_eq!(err.0, StatusCode::UNPROCESSABLE_ENTITY);
		assert!(app.store.read_bookings().is_empty());
	}

	#[tokio::test]
	async fn successful_checkout_persists_a_confirmed_booking() {
		let app = scratch_state(&fake_payments_remote().await);

		let resp = checkout(State(app.clone()), Json(request())).await.unwrap();
		let id = resp.0["bookingId"].as_str().unwrap().to_string();
		assert_eq!(id.len(), 11);
		assert!(id.starts_with("WH"));
		assert_eq!(resp.0["status"], "confirmed");

		let saved = app.store.read_bookings();
		assert_eq!(saved.len(), 1);
		assert_eq!(saved[0].id, id);
		assert_eq!(saved[0].total_cost, 300.0);
		assert_eq!(saved[0].status, BookingStatus::Confirmed);
		assert_eq!(saved[0].user_id, "guest");
		assert_eq!(saved[0].payment_ref.as_deref(), Some("tx_1"));
		assert_eq!(saved[0].user_details.name, "Ada Lovelace");
	}

	#[tokio::test]
	async fn new_bookings_are_prepended() {
		let app = scratch_state(&fake_payments_remote().await);
		app.store.write_bookings(&crate::fixtures::bookings()).unwrap();

		let resp = checkout(State(app.clone()), Json(request())).await.unwrap();
		let id = resp.0["bookingId"].as_str().unwrap();

		let saved = app.store.read_bookings();
		assert_eq!(saved.len(), 3);
		assert_eq!(saved[0].id, id);
		assert_eq!(saved[1].id, "b1");
	}

	#[tokio::test]
	async fn rejected_payment_is_a_generic_failure_with_no_booking() {
		let app = scratch_state("http://127.0.0.1:1/api");
		let err = checkout(State(app.clone()), Json(request())).await.unwrap_err();
		assert_eq!(err.0, StatusCode::BAD_GATEWAY);
		assert!(app.store.read_bookings().is_empty());
	}
}
