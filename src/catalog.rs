use axum::extract::{Json, Path, Query};
use chrono::{DateTime, Utc};
use hyper::StatusCode;
use serde_json::{json, Value};

use crate::bookings::bookings::parse_when;
use crate::fixtures;

#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Car {
	pub id: String,
	pub brand: String,
	pub model: String,
	#[serde(rename = "type")]
	pub category: CarCategory,
	pub price_per_day: f64,
	pub image: String,
	pub availability: bool,
	pub description: String,
	pub features: Vec<String>,
	pub year: i32,
	pub fuel: String,
	pub transmission: String,
	pub seats: u32,
	pub location: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub enum CarCategory {
	SUV,
	Sedan,
	Hatchback,
	Luxury,
	Sports,
}

impl CarCategory {
	pub fn as_str(&self) -> &'static str {
		match self {
			CarCategory::SUV => "SUV",
			CarCategory::Sedan => "Sedan",
			CarCategory::Hatchback => "Hatchback",
			CarCategory::Luxury => "Luxury",
			CarCategory::Sports => "Sports",
		}
	}
}

impl std::str::FromStr for CarCategory {
	type Err = ();

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"SUV" => Ok(CarCategory::SUV),
			"Sedan" => Ok(CarCategory::Sedan),
			"Hatchback" => Ok(CarCategory::Hatchback),
			"Luxury" => Ok(CarCategory::Luxury),
			"Sports" => Ok(CarCategory::Sports),
			_ => Err(()),
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
	PriceAscending,
	PriceDescending,
	Brand,
	Category,
}

impl std::str::FromStr for SortKey {
	type Err = ();

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"price" => Ok(SortKey::PriceAscending),
			"price-desc" => Ok(SortKey::PriceDescending),
			"brand" => Ok(SortKey::Brand),
			"type" => Ok(SortKey::Category),
			_ => Err(()),
		}
	}
}

// Pure projection over the fleet: both predicates must hold, then a stable
// sort on the requested key. Equal keys keep their fixture order.
pub fn filter_and_sort(
	cars: &[Car],
	category: Option<CarCategory>,
	price_range: (f64, f64),
	sort: SortKey,
) -> Vec<Car> {
	let (min_price, max_price) = price_range;
	let mut filtered: Vec<Car> = cars
		.iter()
		.filter(|car| category.map_or(true, |wanted| car.category == wanted))
		.filter(|car| car.price_per_day >= min_price && car.price_per_day <= max_price)
		.cloned()
		.collect();

	match sort {
		SortKey::PriceAscending => filtered.sort_by(|a, b| a.price_per_day.total_cmp(&b.price_per_day)),
		SortKey::PriceDescending => filtered.sort_by(|a, b| b.price_per_day.total_cmp(&a.price_per_day)),
		SortKey::Brand => filtered.sort_by(|a, b| a.brand.cmp(&b.brand)),
		SortKey::Category => filtered.sort_by(|a, b| a.category.as_str().cmp(b.category.as_str())),
	}

	filtered
}

pub fn keyword_search(cars: &[Car], keyword: &str) -> Vec<Car> {
	let keyword = keyword.trim().to_lowercase();
	if keyword.is_empty() {
		return Vec::new();
	}
	cars.iter()
		.filter(|car| {
			levenshtein::levenshtein(&car.brand.to_lowercase(), &keyword) <= 2
				|| levenshtein::levenshtein(&car.model.to_lowercase(), &keyword) <= 2
				|| levenshtein::levenshtein(&car.location.to_lowercase(), &keyword) <= 2
		})
		.cloned()
		.collect()
}

pub fn rental_days(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
	let secs = (end - start).num_seconds();
	let days = (secs + 86_399) / 86_400;
	days.max(1)
}

#[derive(Debug, serde::Deserialize)]
pub struct CatalogQuery {
	#[serde(rename = "type")]
	pub category: Option<String>,
	pub min_price: Option<f64>,
	pub max_price: Option<f64>,
	pub sort: Option<String>,
}

pub async fn list_cars(query: Query<CatalogQuery>) -> Result<Json<Vec<Car>>, StatusCode> {
	let query = query.0;
	let category = match query.category.as_deref() {
		None | Some("all") => None,
		Some(other) => Some(other.parse::<CarCategory>().map_err(|_| StatusCode::BAD_REQUEST)?),
	};
	let sort = match query.sort.as_deref() {
		None => SortKey::PriceAscending,
		Some(key) => key.parse::<SortKey>().map_err(|_| StatusCode::BAD_REQUEST)?,
	};
	let range = (query.min_price.unwrap_or(0.0), query.max_price.unwrap_or(1000.0));

	Ok(Json(filter_and_sort(&fixtures::fleet(), category, range, sort)))
}

pub async fn car_details(Path(id): Path<String>) -> Result<Json<Car>, StatusCode> {
	match fixtures::fleet().into_iter().find(|car| car.id == id) {
		Some(car) => Ok(Json(car)),
		None => Err(StatusCode::NOT_FOUND),
	}
}

pub async fn search(keyword: Json<String>) -> Json<Vec<Car>> {
	Json(keyword_search(&fixtures::fleet(), &keyword.0))
}

#[derive(Debug, serde::Deserialize)]
pub struct QuoteQuery {
	pub start: String,
	pub end: String,
}

pub async fn quote(Path(id): Path<String>, query: Query<QuoteQuery>) -> Result<Json<Value>, StatusCode> {
	let Some(car) = fixtures::fleet().into_iter().find(|car| car.id == id) else {
		return Err(StatusCode::NOT_FOUND);
	};
	let (Some(start), Some(end)) = (parse_when(&query.start), parse_when(&query.end)) else {
		return Err(StatusCode::BAD_REQUEST);
	};
	if end < start {
		return Err(StatusCode::BAD_REQUEST);
	}
	let days = rental_days(start, end);
	Ok(Json(json!({
		"carId": car.id,
		"pricePerDay": car.price_per_day,
		"days": days,
		"totalCost": days as f64 * car.price_per_day,
	})))
}

#[cfg(test)]
mod tests {
	use super::*;

	fn fleet() -> Vec<Car> {
		crate::fixtures::fleet()
	}

	#[test]
	fn filtered_cars_satisfy_both_predicates() {
		let out = filter_and_sort(&fleet(), Some(CarCategory::SUV), (50.0, 130.0), SortKey::PriceAscending);
		assert!(!out.is_empty());
		for car in &out {
			assert_eq!(car.category, CarCategory::SUV);
			assert!(car.price_per_day >= 50.0 && car.price_per_day <= 130.0);
		}
	}

	#[test]
	fn removing_a_filter_widens_the_result() {
		let cars = fleet();
		let narrow = filter_and_sort(&cars, Some(CarCategory::Sedan), (0.0, 100.0), SortKey::PriceAscending);
		let no_category = filter_and_sort(&cars, None, (0.0, 100.0), SortKey::PriceAscending);
		let no_price = filter_and_sort(&cars, Some(CarCategory::Sedan), (0.0, f64::MAX), SortKey::PriceAscending);
		assert!(no_category.len() >= narrow.len());
		assert!(no_price.len() >= narrow.len());
		for car in &narrow {
			assert!(no_category.contains(car));
			assert!(no_price.contains(car));
		}
	}

	#[test]
	fn price_sorts_are_exact_reverses_without_ties() {
		let cars = fleet();
		// drop tied prices so the strict reversal property holds
		let untied: Vec<Car> = cars
			.iter()
			.filter(|c| cars.iter().filter(|o| o.price_per_day == c.price_per_day).count() == 1)
			.cloned()
			.collect();
		let asc = filter_and_sort(&untied, None, (0.0, f64::MAX), SortKey::PriceAscending);
		let mut desc = filter_and_sort(&untied, None, (0.0, f64::MAX), SortKey::PriceDescending);
		desc.reverse();
		assert_eq!(asc, desc);
	}

	#[test]
	fn brand_sort_is_lexical() {
		let sorted = filter_and_sort(&fleet(), None, (0.0, f64::MAX), SortKey::Brand);
		for pair in sorted.windows(2) {
			assert!(pair[0].brand <= pair[1].brand);
		}
	}

	#[test]
	fn keyword_search_tolerates_typos() {
		let cars = fleet();
		let hits = keyword_search(&cars, "teslaa");
		assert!(hits.iter().any(|c| c.brand == "Tesla"));
		assert!(keyword_search(&cars, "").is_empty());
	}

	#[test]
	fn three_day_rental_quote() {
		let start = parse_when("2025-06-01").unwrap();
		let end = parse_when("2025-06-04").unwrap();
		assert_eq!(rental_days(start, end), 3);
	}

	#[test]
	fn same_day_quote_counts_one_day() {
		let start = parse_when("2025-06-01").unwrap();
		assert_eq!(rental_days(start, start), 1);
	}
}
