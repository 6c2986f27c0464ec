//! Sensor persistence

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use tracing::error;
use uuid::Uuid;

use crate::entities::{NewSensor, Sensor, SensorPatch, SensorType};
use crate::error::{Error, Result};
use crate::repository::query::{build_list_queries, resolve_sort, Predicate};
use crate::repository::{SensorListParams, SensorRepository};

use super::{bind_rows, bind_scalar, PgRepository};

const SENSOR_COLUMNS: &str = "id, device_id, type, name, description, created_at, updated_at";

/// Columns a caller may sort sensor lists by
const SORTABLE_COLUMNS: &[&str] = &["name", "created_at", "updated_at"];

#[derive(Debug, FromRow)]
struct SensorRow {
    id: Uuid,
    device_id: Uuid,
    #[sqlx(rename = "type")]
    kind: String,
    name: String,
    description: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<SensorRow> for Sensor {
    type Error = Error;

    fn try_from(row: SensorRow) -> Result<Self> {
        let kind = SensorType::parse(&row.kind).ok_or_else(|| {
            error!(
                sensor_id = %row.id,
                kind = %row.kind,
                "stored sensor type is outside the canonical set"
            );
            Error::internal("failed to get sensor")
        })?;

        Ok(Sensor {
            id: row.id,
            device_id: row.device_id,
            kind,
            name: row.name,
            description: row.description,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl SensorRepository for PgRepository {
    async fn create_sensor(&self, draft: NewSensor) -> Result<Uuid> {
        let now = Utc::now();

        sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO sensors (device_id, type, name, description, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING id",
        )
        .bind(draft.device_id)
        .bind(draft.kind.as_str())
        .bind(&draft.name)
        .bind(&draft.description)
        .bind(now)
        .bind(now)
        .fetch_one(self.pool())
        .await
        .map_err(|e| {
            error!(error = %e, device_id = %draft.device_id, "failed to create sensor");
            Error::internal("failed to create sensor")
        })
    }

    async fn update_sensor(&self, sensor_id: Uuid, patch: SensorPatch) -> Result<()> {
        sqlx::query("UPDATE sensors SET name = $1, description = $2, updated_at = $3 WHERE id = $4")
            .bind(&patch.name)
            .bind(&patch.description)
            .bind(Utc::now())
            .bind(sensor_id)
            .execute(self.pool())
            .await
            .map_err(|e| {
                error!(error = %e, sensor_id = %sensor_id, "failed to update sensor");
                Error::internal("failed to update sensor")
            })?;

        Ok(())
    }

    async fn delete_sensor(&self, sensor_id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM sensors WHERE id = $1")
            .bind(sensor_id)
            .execute(self.pool())
            .await
            .map_err(|e| {
                error!(error = %e, sensor_id = %sensor_id, "failed to delete sensor");
                Error::internal("failed to delete sensor")
            })?;

        Ok(())
    }

    async fn get_sensor(&self, sensor_id: Uuid) -> Result<Sensor> {
        let sql = format!("SELECT {SENSOR_COLUMNS} FROM sensors WHERE id = $1");

        let row: Option<SensorRow> = sqlx::query_as(&sql)
            .bind(sensor_id)
            .fetch_optional(self.pool())
            .await
            .map_err(|e| {
                error!(error = %e, sensor_id = %sensor_id, "failed to get sensor");
                Error::internal("failed to get sensor")
            })?;

        match row {
            Some(row) => row.try_into(),
            None => Err(Error::not_found("sensor not found")),
        }
    }

    async fn list_sensors(&self, params: SensorListParams) -> Result<(Vec<Sensor>, i64)> {
        let order_by = resolve_sort(&params.sort, SORTABLE_COLUMNS);

        let mut predicates = Vec::new();
        if let Some(search) = Predicate::search(&params.search) {
            predicates.push(search);
        }
        if let Some(device_id) = params.device_id {
            predicates.push(Predicate::equals("device_id", device_id));
        }

        let queries = build_list_queries(
            "SELECT COUNT(id) FROM sensors",
            &format!("SELECT {SENSOR_COLUMNS} FROM sensors"),
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
                error!(error = %e, params = ?params, "failed to count sensors");
                Error::internal("failed to get sensor list")
            })?;

        if total == 0 {
            return Ok((Vec::new(), 0));
        }

        let rows: Vec<SensorRow> = bind_rows(sqlx::query_as(&queries.data_sql), &queries.binds)
            .fetch_all(self.pool())
            .await
            .map_err(|e| {
                error!(error = %e, params = ?params, "failed to fetch sensor page");
                Error::internal("failed to get sensor list")
            })?;

        let sensors = rows
            .into_iter()
            .map(Sensor::try_from)
            .collect::<Result<Vec<_>>>()?;

        Ok((sensors, total))
    }
}
