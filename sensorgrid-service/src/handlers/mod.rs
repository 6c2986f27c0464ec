//! HTTP layer: routing, envelope assembly, list parameter resolution
//!
//! Handlers are generic over the [`Repository`] bound so the router can run
//! against the Postgres store in production and an in-memory store in tests.

pub mod device;
pub mod health;
pub mod query;
pub mod response;
pub mod sensor;

use axum::{
    routing::{get, post},
    Router,
};

use crate::repository::Repository;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState<R> {
    pub repo: R,
}

/// Build the application router
pub fn router<R: Repository>(repo: R) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .nest("/v1", v1_routes::<R>())
        .with_state(AppState { repo })
}

fn v1_routes<R: Repository>() -> Router<AppState<R>> {
    Router::new()
        .route(
            "/devices",
            post(device::create_device::<R>).get(device::list_devices::<R>),
        )
        .route(
            "/devices/{device_id}",
            get(device::get_device::<R>)
                .put(device::update_device::<R>)
                .delete(device::delete_device::<R>),
        )
        .route("/sensors/types", get(sensor::sensor_types))
        .route(
            "/sensors",
            post(sensor::create_sensor::<R>).get(sensor::list_sensors::<R>),
        )
        .route(
            "/sensors/{sensor_id}",
            get(sensor::get_sensor::<R>)
                .put(sensor::update_sensor::<R>)
                .delete(sensor::delete_sensor::<R>),
        )
}
