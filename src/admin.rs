use std::sync::{Arc, Mutex};

use axum::extract::{Json, Path, State};
use hyper::StatusCode;
use rand::Rng;

use crate::bookings::bookings::Booking;
use crate::catalog::{Car, CarCategory};
use crate::fixtures;
use crate::AppState;

// Demo surface only: an in-memory copy of the fixture fleet. Nothing here
// is persisted or pushed to the remote side; every change is lost on
// restart.
#[derive(Clone)]
pub struct AdminPanel {
	cars: Arc<Mutex<Vec<Car>>>,
	bookings: Arc<Vec<Booking>>,
}

impl AdminPanel {
	pub fn demo() -> Self {
		AdminPanel {
			cars: Arc::new(Mutex::new(fixtures::fleet())),
			bookings: Arc::new(fixtures::bookings()),
		}
	}

	pub fn cars(&self) -> Vec<Car> {
		self.cars.lock().unwrap().clone()
	}

	pub fn set_availability(&self, id: &str, available: bool) -> Option<Car> {
		let mut cars = self.cars.lock().unwrap();
		let car = cars.iter_mut().find(|c| c.id == id)?;
		car.availability = available;
		Some(car.clone())
	}

	pub fn delete(&self, id: &str) -> bool {
		let mut cars = self.cars.lock().unwrap();
		let before = cars.len();
		cars.retain(|c| c.id != id);
		cars.len() != before
	}

	pub fn insert(&self, form: CarForm) -> Car {
		let car = form.into_car(random_car_id());
		self.cars.lock().unwrap().push(car.clone());
		car
	}

	pub fn update(&self, id: &str, form: CarForm) -> Option<Car> {
		let mut cars = self.cars.lock().unwrap();
		let slot = cars.iter_mut().find(|c| c.id == id)?;
		let car = form.into_car(id.to_string());
		*slot = car.clone();
		Some(car)
	}

	pub fn bookings(&self) -> Vec<Booking> {
		self.bookings.as_ref().clone()
	}

	pub fn stats(&self) -> FleetStats {
		let cars = self.cars.lock().unwrap();
		FleetStats {
			total_cars: cars.len(),
			available_cars: cars.iter().filter(|c| c.availability).count(),
			total_bookings: self.bookings.len(),
			revenue: self.bookings.iter().map(|b| b.total_cost).sum(),
		}
	}
}

#[derive(Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetStats {
	pub total_cars: usize,
	pub available_cars: usize,
	pub total_bookings: usize,
	pub revenue: f64,
}

// The inventory form as the admin screen submits it; the feature list
// arrives as one comma-separated text field.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarForm {
	pub brand: String,
	pub model: String,
	#[serde(rename = "type")]
	pub category: CarCategory,
	pub price_per_day: f64,
	#[serde(default)]
	pub image: String,
	#[serde(default)]
	pub description: String,
	#[serde(default)]
	pub features: String,
	pub year: i32,
	#[serde(default = "default_fuel")]
	pub fuel: String,
	#[serde(default = "default_transmission")]
	pub transmission: String,
	#[serde(default = "default_seats")]
	pub seats: u32,
	#[serde(default)]
	pub location: String,
}

fn default_fuel() -> String {
	"Gasoline".to_string()
}

fn default_transmission() -> String {
	"Automatic".to_string()
}

fn default_seats() -> u32 {
	5
}

impl CarForm {
	// Saving always re-lists the car as available, as the original admin
	// screen did.
	fn into_car(self, id: String) -> Car {
		Car {
			id,
			brand: self.brand,
			model: self.model,
			category: self.category,
			price_per_day: self.price_per_day,
			image: self.image,
			availability: true,
			description: self.description,
			features: parse_features(&self.features),
			year: self.year,
			fuel: self.fuel,
			transmission: self.transmission,
			seats: self.seats,
			location: self.location,
		}
	}
}

pub fn parse_features(text: &str) -> Vec<String> {
	text.split(',')
		.map(str::trim)
		.filter(|f| !f.is_empty())
		.map(str::to_string)
		.collect()
}

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

fn random_car_id() -> String {
	let mut rng = rand::thread_rng();
	(0..9).map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char).collect()
}

pub async fn list_cars(State(app): State<AppState>) -> Json<Vec<Car>> {
	Json(app.admin.cars())
}

#[derive(Debug, serde::Deserialize)]
pub struct StatusUpdate {
	pub availability: bool,
}

pub async fn update_status(
	State(app): State<AppState>,
	Path(id): Path<String>,
	update: Json<StatusUpdate>,
) -> Result<Json<Car>, StatusCode> {
	match app.admin.set_availability(&id, update.availability) {
		Some(car) => Ok(Json(car)),
		None => Err(StatusCode::NOT_FOUND),
	}
}

pub async fn add_car(State(app): State<AppState>, form: Json<CarForm>) -> Json<Car> {
	Json(app.admin.insert(form.0))
}

pub async fn update_car(
	State(app): State<AppState>,
	Path(id): Path<String>,
	form: Json<CarForm>,
) -> Result<Json<Car>, StatusCode> {
	match app.admin.update(&id, form.0) {
		Some(car) => Ok(Json(car)),
		None => Err(StatusCode::NOT_FOUND),
	}
}

pub async fn delete_car(State(app): State<AppState>, Path(id): Path<String>) -> StatusCode {
	if app.admin.delete(&id) {
		StatusCode::OK
	} else {
		StatusCode::NOT_FOUND
	}
}

pub async fn fixture_bookings(State(app): State<AppState>) -> Json<Vec<Booking>> {
	Json(app.admin.bookings())
}

pub async fn stats(State(app): State<AppState>) -> Json<FleetStats> {
	Json(app.admin.stats())
}

#[cfg(test)]
mod tests {
	use super::*;

	fn form() -> CarForm {
		CarForm {
			brand: "Kia".to_string(),
			model: "EV6".to_string(),
			category: CarCategory::Luxury,
			price_per_day: 110.0,
			image: String::new(),
			description: "Electric crossover".to_string(),
			features: "Heat Pump, Fast Charging , ,Vehicle-to-Load".to_string(),
			year: 2024,
			fuel: "Electric".to_string(),
			transmission: "Automatic".to_string(),
			seats: 5,
			location: "Denver".to_string(),
		}
	}

	#[test]
	fn toggling_availability_touches_only_the_target() {
		let panel = AdminPanel::demo();
		let before = panel.cars();
		let toggled = panel.set_availability("1", false).unwrap();
		assert!(!toggled.availability);
		for car in panel.cars() {
			if car.id != "1" {
				let original = before.iter().find(|c| c.id == car.id).unwrap();
				assert_eq!(car.availability, original.availability);
			}
		}
		assert!(panel.set_availability("nope", true).is_none());
	}

	#[test]
	fn deleting_removes_exactly_one_car() {
		let panel = AdminPanel::demo();
		let before = panel.cars().len();
		assert!(panel.delete("3"));
		assert_eq!(panel.cars().len(), before - 1);
		assert!(panel.cars().iter().all(|c| c.id != "3"));
		assert!(!panel.delete("3"));
	}

	#[test]
	fn inserting_parses_features_and_mints_an_id() {
		let panel = AdminPanel::demo();
		let car = panel.insert(form());
		assert_eq!(car.id.len(), 9);
		assert!(car.id.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
		assert!(car.availability);
		assert_eq!(
			car.features,
			vec!["Heat Pump".to_string(), "Fast Charging".to_string(), "Vehicle-to-Load".to_string()]
		);
		assert!(panel.cars().iter().any(|c| c.id == car.id));
	}

	#[test]
	fn updating_keeps_the_id_and_relists_the_car() {
		let panel = AdminPanel::demo();
		panel.set_availability("4", false).unwrap();
		let updated = panel.update("4", form()).unwrap();
		assert_eq!(updated.id, "4");
		assert_eq!(updated.brand, "Kia");
		assert!(updated.availability);
		assert!(panel.update("nope", form()).is_none());
	}

	#[test]
	fn demo_changes_never_reach_the_fixtures() {
		let panel = AdminPanel::demo();
		panel.delete("1");
		assert!(crate::fixtures::fleet().iter().any(|c| c.id == "1"));
	}

	#[test]
	fn stats_summarize_the_demo_fleet() {
		let panel = AdminPanel::demo();
		let stats = panel.stats();
		assert_eq!(stats.total_cars, 8);
		assert_eq!(stats.available_cars, 7);
		assert_eq!(stats.total_bookings, 2);
		assert_eq!(stats.revenue, 525.0);
	}

	#[test]
	fn feature_text_edge_cases() {
		assert!(parse_features("").is_empty());
		assert_eq!(parse_features("one"), vec!["one".to_string()]);
		assert!(parse_features(" , ,").is_empty());
	}
}
