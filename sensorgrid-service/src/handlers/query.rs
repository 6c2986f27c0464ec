//! Query parameters for list operations
//!
//! Raw `page`/`count` values stay strings through deserialization so that
//! non-numeric input degrades to the defaults instead of rejecting the
//! request; the accessors always yield bounded positive integers that are
//! safe to use as SQL LIMIT/OFFSET.

use serde::Deserialize;

/// Default number of items per page
pub const DEFAULT_PER_PAGE: i64 = 10;

/// Maximum allowed items per page
pub const MAX_PER_PAGE: i64 = 100;

/// Maximum allowed page number
pub const MAX_PAGE: i64 = 500;

/// Query parameters shared by every list endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    /// Page number (1-indexed), raw
    pub page: Option<String>,

    /// Items per page, raw
    pub count: Option<String>,

    /// Sort token: column name, optionally prefixed with `-` for descending
    pub sort: Option<String>,

    /// Search keyword matched as a substring of name/description
    pub search: Option<String>,
}

impl ListQuery {
    /// The 1-indexed page number: default 1, clamped to [`MAX_PAGE`]
    #[must_use]
    pub fn page(&self) -> i64 {
        bounded_positive(self.page.as_deref(), 1, MAX_PAGE)
    }

    /// Items per page: default [`DEFAULT_PER_PAGE`], clamped to [`MAX_PER_PAGE`]
    #[must_use]
    pub fn per_page(&self) -> i64 {
        bounded_positive(self.count.as_deref(), DEFAULT_PER_PAGE, MAX_PER_PAGE)
    }

    /// Rows to skip for the data query
    #[must_use]
    pub fn offset(&self) -> i64 {
        (self.page() - 1) * self.per_page()
    }

    /// The raw sort token, empty when absent
    #[must_use]
    pub fn sort(&self) -> &str {
        self.sort.as_deref().unwrap_or_default()
    }

    /// The raw search keyword, empty when absent
    #[must_use]
    pub fn search(&self) -> &str {
        self.search.as_deref().unwrap_or_default()
    }
}

/// Query parameters for the sensor list endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SensorListQuery {
    #[serde(flatten)]
    pub list: ListQuery,

    /// Restrict results to sensors owned by this device
    pub device_id: Option<String>,
}

impl SensorListQuery {
    /// The raw device filter, trimmed, `None` when absent or empty
    #[must_use]
    pub fn device_id(&self) -> Option<&str> {
        self.device_id
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// Parse a raw value as a positive integer, falling back to `default` for
/// empty/unparseable/non-positive input and clamping to `max`
fn bounded_positive(raw: Option<&str>, default: i64, max: i64) -> i64 {
    match raw.and_then(|s| s.trim().parse::<i64>().ok()) {
        Some(n) if n > 0 => n.min(max),
        _ => default,
    }
}
