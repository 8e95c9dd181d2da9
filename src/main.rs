use axum::routing::{get, post, put};
use axum::Router;
use log::info;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

mod admin;
mod bookings;
mod catalog;
mod fixtures;
mod gateway;
mod local_store;
mod session;

use admin::AdminPanel;
use gateway::ApiGateway;
use local_store::LocalStore;
use session::SessionContext;

#[derive(Clone)]
pub struct AppState {
    pub store: LocalStore,
    pub session: SessionContext,
    pub gateway: ApiGateway,
    pub admin: AdminPanel,
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let data_dir = std::env::var("WHEELIO_DATA_DIR").unwrap_or_else(|_| "data".to_string());
    let api_base =
        std::env::var("WHEELIO_API_BASE").unwrap_or_else(|_| "http://localhost:8090/api".to_string());
    let port: u16 = std::env::var("WHEELIO_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(4000);

    let store = LocalStore::open(&data_dir);
    let state = AppState {
        session: SessionContext::new(store.clone()),
        gateway: ApiGateway::new(api_base, store.clone()),
        admin: AdminPanel::demo(),
        store,
    };

    // the one subscription point for identity changes
    let mut session_watch = state.session.subscribe();
    tokio::spawn(async move {
        while session_watch.changed().await.is_ok() {
            let user = session_watch
                .borrow()
                .as_ref()
                .and_then(|u| u.username.clone().or_else(|| u.email.clone()))
                .unwrap_or_else(|| "guest".to_string());
            info!("session user is now {user}");
        }
    });

    let app = Router::new()
        .route("/cars", get(catalog::list_cars))
        .route("/cars/search", post(catalog::search))
        .route("/cars/:id", get(catalog::car_details))
        .route("/cars/:id/quote", get(catalog::quote))
        .route("/bookings", get(bookings::bookings::my_bookings))
        .route("/bookings/:id/cancel", put(bookings::bookings::cancel_booking))
        .route("/checkout", post(bookings::checkout::checkout))
        .route("/auth/login", post(session::login))
        .route("/auth/register", post(session::register))
        .route("/auth/forgot-password", post(session::forgot_password))
        .route("/auth/logout", post(session::logout))
        .route("/auth/profile", get(session::profile))
        .route("/admin/cars", get(admin::list_cars).post(admin::add_car))
        .route("/admin/cars/:id", put(admin::update_car).delete(admin::delete_car))
        .route("/admin/cars/:id/status", put(admin::update_status))
        .route("/admin/bookings", get(admin::fixture_bookings))
        .route("/admin/stats", get(admin::stats))
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = format!("0.0.0.0:{port}");
    info!("storefront listening on {addr}");
    let listener = TcpListener::bind(&addr).await.expect("invalid address");
    axum::serve(listener, app).await.unwrap();
}
