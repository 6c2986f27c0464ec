//! Storage abstraction for devices and sensors
//!
//! The repository traits use RPITIT (Return Position Impl Trait In Traits)
//! for async methods without boxing. [`postgres::PgRepository`] implements
//! both; tests substitute an in-memory implementation.

pub mod postgres;
pub mod query;

use std::future::Future;

use uuid::Uuid;

use crate::entities::{Device, DeviceDraft, NewSensor, Sensor, SensorPatch};
use crate::error::Result;

/// Filter/pagination inputs for a device list operation
///
/// `sort` and `search` are raw tokens; the repository resolves them against
/// its whitelist. `limit` and `offset` must already be bounded by the
/// pagination resolver.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceListParams {
    pub search: String,
    pub sort: String,
    pub limit: i64,
    pub offset: i64,
}

/// Filter/pagination inputs for a sensor list operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SensorListParams {
    pub device_id: Option<Uuid>,
    pub search: String,
    pub sort: String,
    pub limit: i64,
    pub offset: i64,
}

/// CRUD operations over the device store
///
/// List operations return the page of entities plus the total row count for
/// the filter, as observed by two sequential statements. There is no
/// transactional isolation between them: under concurrent writes the total
/// may be stale relative to the page, an accepted tradeoff for this domain.
pub trait DeviceRepository: Send + Sync {
    /// Insert a device and return its store-assigned id
    fn create_device(&self, draft: DeviceDraft) -> impl Future<Output = Result<Uuid>> + Send;

    /// Overwrite a device's mutable fields and refresh its updated_at
    ///
    /// Updating an absent id is not an error; callers observe the miss via
    /// the follow-up fetch.
    fn update_device(
        &self,
        device_id: Uuid,
        draft: DeviceDraft,
    ) -> impl Future<Output = Result<()>> + Send;

    /// Hard-delete a device
    fn delete_device(&self, device_id: Uuid) -> impl Future<Output = Result<()>> + Send;

    /// Fetch a device by id, or `NotFound`
    fn get_device(&self, device_id: Uuid) -> impl Future<Output = Result<Device>> + Send;

    /// List devices matching the params, returning `(page, total)`
    fn list_devices(
        &self,
        params: DeviceListParams,
    ) -> impl Future<Output = Result<(Vec<Device>, i64)>> + Send;
}

/// CRUD operations over the sensor store
pub trait SensorRepository: Send + Sync {
    /// Insert a sensor and return its store-assigned id
    fn create_sensor(&self, draft: NewSensor) -> impl Future<Output = Result<Uuid>> + Send;

    /// Overwrite a sensor's name/description and refresh its updated_at
    fn update_sensor(
        &self,
        sensor_id: Uuid,
        patch: SensorPatch,
    ) -> impl Future<Output = Result<()>> + Send;

    /// Hard-delete a sensor
    fn delete_sensor(&self, sensor_id: Uuid) -> impl Future<Output = Result<()>> + Send;

    /// Fetch a sensor by id, or `NotFound`
    fn get_sensor(&self, sensor_id: Uuid) -> impl Future<Output = Result<Sensor>> + Send;

    /// List sensors matching the params, returning `(page, total)`
    fn list_sensors(
        &self,
        params: SensorListParams,
    ) -> impl Future<Output = Result<(Vec<Sensor>, i64)>> + Send;
}

/// Everything the HTTP layer needs from a store implementation
///
/// Blanket-implemented; sensor creation reaches across aggregates for the
/// device existence check, so handlers take the combined bound.
pub trait Repository:
    DeviceRepository + SensorRepository + Clone + Send + Sync + 'static
{
}

impl<T> Repository for T where T: DeviceRepository + SensorRepository + Clone + Send + Sync + 'static
{}

pub use postgres::PgRepository;
