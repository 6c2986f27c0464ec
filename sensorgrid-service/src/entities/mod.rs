//! Domain entities and request payloads

mod device;
mod sensor;

pub use device::{Device, DeviceDraft, DevicePayload, DeviceStatus};
pub use sensor::{
    CreateSensorPayload, NewSensor, Sensor, SensorPatch, SensorType, SensorTypeInfo,
    UpdateSensorPayload,
};
