//! Device REST handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::instrument;
use uuid::Uuid;

use crate::entities::{Device, DevicePayload};
use crate::error::{Error, Result};
use crate::repository::{DeviceListParams, Repository};

use super::query::ListQuery;
use super::response::ApiResponse;
use super::AppState;

/// POST /v1/devices
#[instrument(skip(state))]
pub async fn create_device<R: Repository>(
    State(state): State<AppState<R>>,
    Json(payload): Json<DevicePayload>,
) -> Result<(StatusCode, Json<ApiResponse<Device>>)> {
    let draft = payload.validate().map_err(Error::invalid_input)?;

    let device_id = state.repo.create_device(draft).await?;

    // Re-fetch so the response carries store-assigned identity and timestamps.
    let device = state.repo.get_device(device_id).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new("created", device)),
    ))
}

/// GET /v1/devices
#[instrument(skip(state))]
pub async fn list_devices<R: Repository>(
    State(state): State<AppState<R>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ApiResponse<Vec<Device>>>> {
    let (page, per_page) = (query.page(), query.per_page());

    let params = DeviceListParams {
        search: query.search().to_string(),
        sort: query.sort().to_string(),
        limit: per_page,
        offset: query.offset(),
    };

    let (devices, total) = state.repo.list_devices(params).await?;

    Ok(Json(
        ApiResponse::new("success", devices).with_meta(page, per_page, total),
    ))
}

/// GET /v1/devices/{device_id}
#[instrument(skip(state))]
pub async fn get_device<R: Repository>(
    State(state): State<AppState<R>>,
    Path(device_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Device>>> {
    let device = state.repo.get_device(device_id).await?;

    Ok(Json(ApiResponse::new("success", device)))
}

/// PUT /v1/devices/{device_id}
#[instrument(skip(state))]
pub async fn update_device<R: Repository>(
    State(state): State<AppState<R>>,
    Path(device_id): Path<Uuid>,
    Json(payload): Json<DevicePayload>,
) -> Result<Json<ApiResponse<Device>>> {
    let draft = payload.validate().map_err(Error::invalid_input)?;

    state.repo.update_device(device_id, draft).await?;

    // A miss is surfaced here: the write itself treats 0 affected rows as ok.
    let device = state.repo.get_device(device_id).await?;

    Ok(Json(ApiResponse::new("success", device)))
}

/// DELETE /v1/devices/{device_id}
#[instrument(skip(state))]
pub async fn delete_device<R: Repository>(
    State(state): State<AppState<R>>,
    Path(device_id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    state.repo.delete_device(device_id).await?;

    Ok(Json(ApiResponse::empty("success")))
}
