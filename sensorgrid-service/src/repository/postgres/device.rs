//! Device persistence

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use tracing::error;
use uuid::Uuid;

use crate::entities::{Device, DeviceDraft, DeviceStatus};
use crate::error::{Error, Result};
use crate::repository::query::{build_list_queries, resolve_sort, Predicate};
use crate::repository::{DeviceListParams, DeviceRepository};

use super::{bind_rows, bind_scalar, PgRepository};

const DEVICE_COLUMNS: &str = "id, name, description, status, created_at, updated_at";

/// Columns a caller may sort device lists by
const SORTABLE_COLUMNS: &[&str] = &["name", "created_at", "updated_at"];

#[derive(Debug, FromRow)]
struct DeviceRow {
    id: Uuid,
    name: String,
    description: String,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<DeviceRow> for Device {
    type Error = Error;

    fn try_from(row: DeviceRow) -> Result<Self> {
        let status = DeviceStatus::parse(&row.status).ok_or_else(|| {
            error!(
                device_id = %row.id,
                status = %row.status,
                "stored device status is outside the canonical set"
            );
            Error::internal("failed to get device")
        })?;

        Ok(Device {
            id: row.id,
            name: row.name,
            description: row.description,
            status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl DeviceRepository for PgRepository {
    async fn create_device(&self, draft: DeviceDraft) -> Result<Uuid> {
        let now = Utc::now();

        sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO devices (name, description, status, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5) RETURNING id",
        )
        .bind(&draft.name)
        .bind(&draft.description)
        .bind(draft.status.as_str())
        .bind(now)
        .bind(now)
        .fetch_one(self.pool())
        .await
        .map_err(|e| {
            error!(error = %e, name = %draft.name, "failed to create device");
            Error::internal("failed to create device")
        })
    }

    async fn update_device(&self, device_id: Uuid, draft: DeviceDraft) -> Result<()> {
        sqlx::query(
            "UPDATE devices SET name = $1, description = $2, status = $3, updated_at = $4 \
             WHERE id = $5",
        )
        .bind(&draft.name)
        .bind(&draft.description)
        .bind(draft.status.as_str())
        .bind(Utc::now())
        .bind(device_id)
        .execute(self.pool())
        .await
        .map_err(|e| {
            error!(error = %e, device_id = %device_id, "failed to update device");
            Error::internal("failed to update device")
        })?;

        Ok(())
    }

    async fn delete_device(&self, device_id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM devices WHERE id = $1")
            .bind(device_id)
            .execute(self.pool())
            .await
            .map_err(|e| {
                error!(error = %e, device_id = %device_id, "failed to delete device");
                Error::internal("failed to delete device")
            })?;

        Ok(())
    }

    async fn get_device(&self, device_id: Uuid) -> Result<Device> {
        let sql = format!("SELECT {DEVICE_COLUMNS} FROM devices WHERE id = $1");

        let row: Option<DeviceRow> = sqlx::query_as(&sql)
            .bind(device_id)
            .fetch_optional(self.pool())
            .await
            .map_err(|e| {
                error!(error = %e, device_id = %device_id, "failed to get device");
                Error::internal("failed to get device")
            })?;

        match row {
            Some(row) => row.try_into(),
            None => Err(Error::not_found("device not found")),
        }
    }

    async fn list_devices(&self, params: DeviceListParams) -> Result<(Vec<Device>, i64)> {
        let order_by = resolve_sort(&params.sort, SORTABLE_COLUMNS);

        let mut predicates = Vec::new();
        if let Some(search) = Predicate::search(&params.search) {
            predicates.push(search);
        }

        let queries = build_list_queries(
            "SELECT COUNT(id) FROM devices",
            &format!("SELECT {DEVICE_COLUMNS} FROM devices"),
            predicates,
            &order_by,
            params.limit,
            params.offset,
        );

        // No snapshot spans the two statements: the total may be stale
        // relative to the page under concurrent writes.
        let total: i64 = bind_scalar(sqlx::query_scalar(&queries.count_sql), &queries.binds)
            .fetch_one(self.pool())
            .await
            .map_err(|e| {
                error!(error = %e, params = ?params, "failed to count devices");
                Error::internal("failed to get device list")
            })?;

        if total == 0 {
            return Ok((Vec::new(), 0));
        }

        let rows: Vec<DeviceRow> = bind_rows(sqlx::query_as(&queries.data_sql), &queries.binds)
            .fetch_all(self.pool())
            .await
            .map_err(|e| {
                error!(error = %e, params = ?params, "failed to fetch device page");
                Error::internal("failed to get device list")
            })?;

        let devices = rows
            .into_iter()
            .map(Device::try_from)
            .collect::<Result<Vec<_>>>()?;

        Ok((devices, total))
    }
}
