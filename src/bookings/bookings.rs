use axum::extract::{Json, Path, State};
use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};
use hyper::StatusCode;
use log::warn;
use serde_json::{json, Value};

use crate::catalog::{Car, CarCategory};
use crate::AppState;

#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
	pub id: String,
	pub car_id: String,
	pub car: Car,
	pub user_id: String,
	pub start_date: String,
	pub end_date: String,
	pub total_cost: f64,
	pub status: BookingStatus,
	pub user_details: ContactDetails,
	pub created_at: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub payment_ref: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
	Confirmed,
	Cancelled,
	Completed,
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct ContactDetails {
	pub name: String,
	pub email: String,
	pub phone: String,
}

// The remote payment rows are loose JSON; tolerate whatever shape comes back.
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
	#[serde(default)]
	pub id: Option<Value>,
	#[serde(default)]
	pub username: String,
	#[serde(default)]
	pub amount: f64,
	#[serde(default)]
	pub method: String,
	#[serde(default)]
	pub status: String,
	#[serde(default)]
	pub date: Option<String>,
}

// Fixture dates are plain YYYY-MM-DD, checkout writes RFC 3339; both parse.
pub fn parse_when(text: &str) -> Option<DateTime<Utc>> {
	if let Ok(t) = DateTime::parse_from_rfc3339(text) {
		return Some(t.with_timezone(&Utc));
	}
	NaiveDate::parse_from_str(text, "%Y-%m-%d")
		.ok()
		.and_then(|d| d.and_hms_opt(0, 0, 0))
		.map(|dt| Utc.from_utc_datetime(&dt))
}

// Cancellable while still confirmed and more than 24 hours before pickup.
pub fn can_cancel(booking: &Booking, now: DateTime<Utc>) -> bool {
	if booking.status != BookingStatus::Confirmed {
		return false;
	}
	match parse_when(&booking.start_date) {
		Some(start) => start - now > Duration::hours(24),
		None => false,
	}
}

// Merge the persisted bookings with bookings inferred from the remote
// payment list. Local rows come first; a rental present in both sources is
// listed twice (no join key to dedup on).
pub fn reconcile(local: &[Booking], payments: &[Payment], username: &str, now: DateTime<Utc>) -> Vec<Booking> {
	let wanted = username.to_lowercase();
	let mut merged: Vec<Booking> = local
		.iter()
		.filter(|b| b.user_id.to_lowercase() == wanted)
		.cloned()
		.collect();

	for (idx, payment) in payments.iter().enumerate() {
		if payment.username.to_lowercase() != wanted {
			continue;
		}
		merged.push(booking_from_payment(payment, idx, username, now));
	}

	merged
}

fn booking_from_payment(payment: &Payment, idx: usize, username: &str, now: DateTime<Utc>) -> Booking {
	let id = match &payment.id {
		Some(Value::String(s)) => s.clone(),
		Some(other) => other.to_string(),
		None => format!("p{idx}"),
	};
	Booking {
		id,
		car_id: String::new(),
		car: placeholder_car(now.year()),
		user_id: username.to_string(),
		start_date: now.to_rfc3339(),
		end_date: now.to_rfc3339(),
		total_cost: payment.amount,
		status: BookingStatus::Confirmed,
		user_details: ContactDetails {
			name: String::new(),
			email: username.to_string(),
			phone: String::new(),
		},
		created_at: payment.date.clone().unwrap_or_else(|| now.to_rfc3339()),
		payment_ref: None,
	}
}

fn placeholder_car(year: i32) -> Car {
	Car {
		id: String::new(),
		brand: "N/A".to_string(),
		model: "N/A".to_string(),
		category: CarCategory::Sedan,
		price_per_day: 0.0,
		image: String::new(),
		availability: true,
		description: String::new(),
		features: Vec::new(),
		year,
		fuel: String::new(),
		transmission: String::new(),
		seats: 4,
		location: String::new(),
	}
}

pub async fn my_bookings(State(app): State<AppState>) -> Result<Json<Vec<Booking>>, StatusCode> {
	let username = app.session.derived_username();
	let local = app.store.read_bookings();
	let payments = match app.gateway.payments().await {
		Ok(rows) => rows,
		Err(e) => {
			warn!("payment list unavailable: {e}");
			return Err(StatusCode::BAD_GATEWAY);
		}
	};
	Ok(Json(reconcile(&local, &payments, &username, Utc::now())))
}

// Cancellation only touches the persisted list; the remote side is never told.
pub async fn cancel_booking(State(app): State<AppState>, Path(id): Path<String>) -> Result<Json<Value>, StatusCode> {
	let mut all = app.store.read_bookings();
	let Some(booking) = all.iter_mut().find(|b| b.id == id) else {
		return Err(StatusCode::NOT_FOUND);
	};
	if !can_cancel(booking, Utc::now()) {
		return Err(StatusCode::CONFLICT);
	}
	booking.status = BookingStatus::Cancelled;
	if let Err(e) = app.store.write_bookings(&all) {
		warn!("could not persist cancellation of {id}: {e}");
		return Err(StatusCode::INTERNAL_SERVER_ERROR);
	}
	Ok(Json(json!({ "id": id, "status": "cancelled" })))
}
