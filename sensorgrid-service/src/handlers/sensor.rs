//! Sensor REST handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::instrument;
use uuid::Uuid;

use crate::entities::{CreateSensorPayload, Sensor, SensorType, SensorTypeInfo, UpdateSensorPayload};
use crate::error::{Error, Result};
use crate::repository::{Repository, SensorListParams};

use super::query::SensorListQuery;
use super::response::ApiResponse;
use super::AppState;

/// GET /v1/sensors/types
pub async fn sensor_types() -> Json<ApiResponse<Vec<SensorTypeInfo>>> {
    Json(ApiResponse::new("success", SensorType::catalog()))
}

/// POST /v1/sensors
#[instrument(skip(state))]
pub async fn create_sensor<R: Repository>(
    State(state): State<AppState<R>>,
    Json(payload): Json<CreateSensorPayload>,
) -> Result<(StatusCode, Json<ApiResponse<Sensor>>)> {
    let draft = payload.validate().map_err(Error::invalid_input)?;

    // Referential check: the owning device must exist before anything is
    // inserted. A miss propagates as 404.
    state.repo.get_device(draft.device_id).await?;

    let sensor_id = state.repo.create_sensor(draft).await?;
    let sensor = state.repo.get_sensor(sensor_id).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new("created", sensor)),
    ))
}

/// GET /v1/sensors
#[instrument(skip(state))]
pub async fn list_sensors<R: Repository>(
    State(state): State<AppState<R>>,
    Query(query): Query<SensorListQuery>,
) -> Result<Json<ApiResponse<Vec<Sensor>>>> {
    let device_id = match query.device_id() {
        Some(raw) => Some(
            Uuid::parse_str(raw)
                .map_err(|_| Error::invalid_input(vec!["device_id failed on uuid".to_string()]))?,
        ),
        None => None,
    };

    let (page, per_page) = (query.list.page(), query.list.per_page());

    let params = SensorListParams {
        device_id,
        search: query.list.search().to_string(),
        sort: query.list.sort().to_string(),
        limit: per_page,
        offset: query.list.offset(),
    };

    let (sensors, total) = state.repo.list_sensors(params).await?;

    Ok(Json(
        ApiResponse::new("success", sensors).with_meta(page, per_page, total),
    ))
}

/// GET /v1/sensors/{sensor_id}
#[instrument(skip(state))]
pub async fn get_sensor<R: Repository>(
    State(state): State<AppState<R>>,
    Path(sensor_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Sensor>>> {
    let sensor = state.repo.get_sensor(sensor_id).await?;

    Ok(Json(ApiResponse::new("success", sensor)))
}

/// PUT /v1/sensors/{sensor_id}
#[instrument(skip(state))]
pub async fn update_sensor<R: Repository>(
    State(state): State<AppState<R>>,
    Path(sensor_id): Path<Uuid>,
    Json(payload): Json<UpdateSensorPayload>,
) -> Result<Json<ApiResponse<Sensor>>> {
    let patch = payload.validate().map_err(Error::invalid_input)?;

    state.repo.update_sensor(sensor_id, patch).await?;
    let sensor = state.repo.get_sensor(sensor_id).await?;

    Ok(Json(ApiResponse::new("success", sensor)))
}

/// DELETE /v1/sensors/{sensor_id}
#[instrument(skip(state))]
pub async fn delete_sensor<R: Repository>(
    State(state): State<AppState<R>>,
    Path(sensor_id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    state.repo.delete_sensor(sensor_id).await?;

    Ok(Json(ApiResponse::empty("success")))
}
