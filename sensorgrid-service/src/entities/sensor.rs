//! Sensor entity, type catalog and request payloads

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of measurement a sensor produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SensorType {
    Temperature,
    Air,
    Water,
}

impl SensorType {
    /// Every supported sensor type, in declaration order
    pub const ALL: [SensorType; 3] = [Self::Temperature, Self::Air, Self::Water];

    /// Stable slug, matching the stored column value
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Temperature => "temperature",
            Self::Air => "air",
            Self::Water => "water",
        }
    }

    /// Human-readable name advertised by the types endpoint
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Temperature => "Temperature",
            Self::Air => "Air",
            Self::Water => "Water",
        }
    }

    /// Membership check over the canonical set
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == value)
    }

    /// The advertised catalog: slug and display name per type
    ///
    /// Validation and `GET /v1/sensors/types` both read from this set, so
    /// accepted and advertised values cannot drift apart.
    #[must_use]
    pub fn catalog() -> Vec<SensorTypeInfo> {
        Self::ALL
            .into_iter()
            .map(|t| SensorTypeInfo {
                slug: t.as_str(),
                name: t.label(),
            })
            .collect()
    }
}

impl fmt::Display for SensorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Catalog entry for a sensor type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SensorTypeInfo {
    pub slug: &'static str,
    pub name: &'static str,
}

/// A persisted sensor record, owned by a device
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sensor {
    pub id: Uuid,
    pub device_id: Uuid,
    #[serde(rename = "type")]
    pub kind: SensorType,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated fields for sensor creation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSensor {
    pub device_id: Uuid,
    pub kind: SensorType,
    pub name: String,
    pub description: String,
}

/// Validated fields for a sensor update (type and owner are immutable)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensorPatch {
    pub name: String,
    pub description: String,
}

/// Inbound JSON body for sensor creation
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSensorPayload {
    #[serde(default)]
    pub device_id: String,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl CreateSensorPayload {
    /// Validate field rules and convert into a creation draft
    pub fn validate(self) -> Result<NewSensor, Vec<String>> {
        let mut errors = Vec::new();

        let device_id = Uuid::parse_str(self.device_id.trim());
        if device_id.is_err() {
            errors.push("device_id failed on uuid".to_string());
        }

        let kind = SensorType::parse(&self.kind);
        if kind.is_none() {
            errors.push("type failed on sensorType".to_string());
        }

        if self.name.trim().is_empty() {
            errors.push("name failed on required".to_string());
        }

        match (device_id, kind) {
            (Ok(device_id), Some(kind)) if errors.is_empty() => Ok(NewSensor {
                device_id,
                kind,
                name: self.name,
                description: self.description,
            }),
            _ => Err(errors),
        }
    }
}

/// Inbound JSON body for sensor updates
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateSensorPayload {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl UpdateSensorPayload {
    /// Validate field rules and convert into a patch
    pub fn validate(self) -> Result<SensorPatch, Vec<String>> {
        if self.name.trim().is_empty() {
            return Err(vec!["name failed on required".to_string()]);
        }

        Ok(SensorPatch {
            name: self.name,
            description: self.description,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_round_trip() {
        for kind in SensorType::ALL {
            assert_eq!(SensorType::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(SensorType::parse("humidity"), None);
        assert_eq!(SensorType::parse(""), None);
    }

    #[test]
    fn test_catalog_matches_canonical_set() {
        let catalog = SensorType::catalog();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog[0].slug, "temperature");
        assert_eq!(catalog[0].name, "Temperature");
        assert_eq!(catalog[1].slug, "air");
        assert_eq!(catalog[2].slug, "water");
    }

    #[test]
    fn test_sensor_serializes_kind_as_type() {
        let sensor = Sensor {
            id: Uuid::nil(),
            device_id: Uuid::nil(),
            kind: SensorType::Water,
            name: "Tank level".to_string(),
            description: String::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_value(&sensor).unwrap();
        assert_eq!(json["type"], "water");
        assert!(json.get("kind").is_none());
    }

    #[test]
    fn test_create_payload_validates() {
        let payload = CreateSensorPayload {
            device_id: "d2431891-c5e4-462d-bf9b-7a194d5bebda".to_string(),
            kind: "temperature".to_string(),
            name: "Sensor #1".to_string(),
            description: "First sensor".to_string(),
        };
        let draft = payload.validate().unwrap();
        assert_eq!(draft.kind, SensorType::Temperature);
        assert_eq!(
            draft.device_id.to_string(),
            "d2431891-c5e4-462d-bf9b-7a194d5bebda"
        );
    }

    #[test]
    fn test_create_payload_collects_all_errors() {
        let payload = CreateSensorPayload {
            device_id: "not-a-uuid".to_string(),
            kind: "plasma".to_string(),
            name: String::new(),
            description: String::new(),
        };
        let errors = payload.validate().unwrap_err();
        assert_eq!(
            errors,
            vec![
                "device_id failed on uuid".to_string(),
                "type failed on sensorType".to_string(),
                "name failed on required".to_string(),
            ]
        );
    }

    #[test]
    fn test_update_payload_requires_name() {
        let payload = UpdateSensorPayload {
            name: " ".to_string(),
            description: "still described".to_string(),
        };
        assert_eq!(
            payload.validate().unwrap_err(),
            vec!["name failed on required".to_string()]
        );

        let payload = UpdateSensorPayload {
            name: "Sensor #1.2".to_string(),
            description: String::new(),
        };
        assert!(payload.validate().is_ok());
    }
}
