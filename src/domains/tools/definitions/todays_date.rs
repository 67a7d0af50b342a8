//! Today's date tool definition.

use std::fmt::Display;
use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone};
use rmcp::{handler::server::tool::cached_schema_for_type, model::JsonObject};
use schemars::JsonSchema;
use serde::Serialize;
use tracing::{info, instrument};

use crate::domains::tools::{
    ToolError, ToolHandler,
    schema::{ParamSpec, ToolDescriptor, ValidatedParams},
};

/// ISO calendar date, also the fallback for unrecognized formats.
pub const ISO_FORMAT: &str = "%Y-%m-%d";
/// US long form, e.g. "March 5, 2024".
pub const US_LONG_FORMAT: &str = "%B %d, %Y";
/// UK day/month/year, e.g. "05/03/2024".
pub const UK_FORMAT: &str = "%d/%m/%Y";

/// Result of the date tool.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct TodaysDate {
    pub date: String,
    /// Echo of the requested format, even when it was not honored.
    pub format: String,
    /// Seconds since the Unix epoch, millisecond precision.
    pub timestamp: f64,
}

/// Render `now` with one of the supported formats.
///
/// Unknown formats silently fall back to the ISO date; `format` in the
/// result still echoes what the caller asked for.
pub fn render_date<Tz>(now: &DateTime<Tz>, format: &str) -> TodaysDate
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let date = match format {
        US_LONG_FORMAT => now.format("%B %-d, %Y").to_string(),
        UK_FORMAT => now.format("%d/%m/%Y").to_string(),
        _ => now.format(ISO_FORMAT).to_string(),
    };

    TodaysDate {
        date,
        format: format.to_string(),
        timestamp: now.timestamp_millis() as f64 / 1000.0,
    }
}

/// Today's date tool.
#[derive(Debug, Clone, Default)]
pub struct TodaysDateTool;

impl TodaysDateTool {
    /// Tool name as registered.
    pub const NAME: &'static str = "todays-date";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get today's date in one of the supported formats: %Y-%m-%d (default), %B %d, %Y or %d/%m/%Y. Also returns the current Unix timestamp.";

    pub fn new() -> Self {
        Self
    }

    pub fn descriptor() -> ToolDescriptor {
        ToolDescriptor::new(Self::NAME, Self::DESCRIPTION).param(
            ParamSpec::string(
                "format",
                "Date format: %Y-%m-%d, %B %d, %Y or %d/%m/%Y",
            )
            .with_default(ISO_FORMAT),
        )
    }
}

#[async_trait::async_trait]
impl ToolHandler for TodaysDateTool {
    fn output_schema(&self) -> Option<Arc<JsonObject>> {
        Some(cached_schema_for_type::<TodaysDate>())
    }

    #[instrument(skip_all)]
    async fn execute(&self, params: ValidatedParams) -> Result<serde_json::Value, ToolError> {
        let format = params.str("format").unwrap_or(ISO_FORMAT);
        let result = render_date(&Local::now(), format);

        info!("Rendered date {} for format {:?}", result.date, result.format);

        serde_json::to_value(result).map_err(|e| ToolError::internal(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    fn fixed_clock() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 5, 14, 30, 0).unwrap()
    }

    #[test]
    fn test_iso_format() {
        let r = render_date(&fixed_clock(), ISO_FORMAT);
        assert_eq!(r.date, "2024-03-05");
        assert_eq!(r.format, "%Y-%m-%d");
    }

    #[test]
    fn test_us_long_format() {
        let r = render_date(&fixed_clock(), "%B %d, %Y");
        assert_eq!(r.date, "March 5, 2024");
    }

    #[test]
    fn test_uk_format() {
        let r = render_date(&fixed_clock(), "%d/%m/%Y");
        assert_eq!(r.date, "05/03/2024");
    }

    #[test]
    fn test_unknown_format_falls_back_but_echoes() {
        let r = render_date(&fixed_clock(), "unknown");
        assert_eq!(r.date, "2024-03-05");
        assert_eq!(r.format, "unknown");
    }

    #[test]
    fn test_timestamp_is_fractional_seconds() {
        let now = Utc.timestamp_millis_opt(1_709_649_000_250).unwrap();
        let r = render_date(&now, ISO_FORMAT);
        assert_eq!(r.timestamp, 1_709_649_000.25);
    }

    #[test]
    fn test_same_instant_is_idempotent() {
        let now = fixed_clock();
        let a = render_date(&now, US_LONG_FORMAT);
        let b = render_date(&now, US_LONG_FORMAT);
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_execute_uses_default_format() {
        let params = TodaysDateTool::descriptor().validate(json!({})).unwrap();
        let result = TodaysDateTool::new().execute(params).await.unwrap();

        assert_eq!(result["format"], "%Y-%m-%d");
        let date = result["date"].as_str().unwrap();
        assert!(chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d").is_ok());
        assert!(result["timestamp"].as_f64().unwrap() > 1_700_000_000.0);
    }

    #[tokio::test]
    async fn test_execute_twice_same_fields() {
        let tool = TodaysDateTool::new();
        let args = json!({ "format": "%d/%m/%Y" });
        let a = tool
            .execute(TodaysDateTool::descriptor().validate(args.clone()).unwrap())
            .await
            .unwrap();
        let b = tool
            .execute(TodaysDateTool::descriptor().validate(args).unwrap())
            .await
            .unwrap();

        assert_eq!(a["format"], b["format"]);
        let dt = b["timestamp"].as_f64().unwrap() - a["timestamp"].as_f64().unwrap();
        assert!((0.0..1.0).contains(&dt));
    }
}
