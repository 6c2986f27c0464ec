//! Device entity, status enum and request payloads

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Operational status of a device
///
/// The closed set here is the single source of truth: payload validation and
/// the advertised API values both derive from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceStatus {
    Active,
    Inactive,
}

impl DeviceStatus {
    /// Stable string form, matching the stored column value
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }

    /// Membership check over the canonical set
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "active" => Some(Self::Active),
            "inactive" => Some(Self::Inactive),
            _ => None,
        }
    }
}

impl fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A persisted device record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub status: DeviceStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Desired mutable fields for a create or full update
///
/// Identity and timestamps stay with the store; callers only describe what
/// the device should look like.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceDraft {
    pub name: String,
    pub description: String,
    pub status: DeviceStatus,
}

/// Inbound JSON body for device create/update
#[derive(Debug, Clone, Deserialize)]
pub struct DevicePayload {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: String,
}

impl DevicePayload {
    /// Validate field rules and convert into a draft
    ///
    /// Collects every failure rather than stopping at the first, so the
    /// response can report all offending fields at once.
    pub fn validate(self) -> Result<DeviceDraft, Vec<String>> {
        let mut errors = Vec::new();

        if self.name.trim().is_empty() {
            errors.push("name failed on required".to_string());
        }

        let status = DeviceStatus::parse(&self.status);
        if status.is_none() {
            errors.push("status failed on deviceStatus".to_string());
        }

        match status {
            Some(status) if errors.is_empty() => Ok(DeviceDraft {
                name: self.name,
                description: self.description,
                status,
            }),
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        assert_eq!(DeviceStatus::parse("active"), Some(DeviceStatus::Active));
        assert_eq!(DeviceStatus::parse("inactive"), Some(DeviceStatus::Inactive));
        assert_eq!(DeviceStatus::Active.as_str(), "active");
        assert_eq!(DeviceStatus::Inactive.as_str(), "inactive");
    }

    #[test]
    fn test_status_rejects_unknown_values() {
        assert_eq!(DeviceStatus::parse(""), None);
        assert_eq!(DeviceStatus::parse("Active"), None);
        assert_eq!(DeviceStatus::parse("retired"), None);
    }

    #[test]
    fn test_status_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&DeviceStatus::Active).unwrap(),
            "\"active\""
        );
        let parsed: DeviceStatus = serde_json::from_str("\"inactive\"").unwrap();
        assert_eq!(parsed, DeviceStatus::Inactive);
    }

    #[test]
    fn test_payload_validates() {
        let payload = DevicePayload {
            name: "Raspberry Pi 4".to_string(),
            description: "Greenhouse gateway".to_string(),
            status: "active".to_string(),
        };
        let draft = payload.validate().unwrap();
        assert_eq!(draft.name, "Raspberry Pi 4");
        assert_eq!(draft.status, DeviceStatus::Active);
    }

    #[test]
    fn test_payload_collects_all_errors() {
        let payload = DevicePayload {
            name: "   ".to_string(),
            description: String::new(),
            status: "broken".to_string(),
        };
        let errors = payload.validate().unwrap_err();
        assert_eq!(
            errors,
            vec![
                "name failed on required".to_string(),
                "status failed on deviceStatus".to_string(),
            ]
        );
    }

    #[test]
    fn test_payload_empty_status_fails_membership() {
        let payload = DevicePayload {
            name: "Device #1".to_string(),
            description: String::new(),
            status: String::new(),
        };
        let errors = payload.validate().unwrap_err();
        assert_eq!(errors, vec!["status failed on deviceStatus".to_string()]);
    }
}
