use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::api_client::{self, ApiError};
use crate::series::{Series, TimePoint};

pub const HISTORICAL_ENDPOINT: &str = "/historical_data/";
pub const FORECAST_ENDPOINT: &str = "/forecast/";

/// One observed point as the backend serves it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalPoint {
    #[serde(with = "ds_date")]
    pub ds: NaiveDate,
    pub y: f64,
}

/// One forecast point; the value field is named after the model that
/// produced it on the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    #[serde(with = "ds_date")]
    pub ds: NaiveDate,
    #[serde(rename = "AutoARIMA")]
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRequest {
    pub periods: u32,
}

/// The backend emits pandas timestamps ("1960-01-01T00:00:00"); plain ISO
/// dates are accepted too. The series is month-granularity, so both collapse
/// to a `NaiveDate`.
mod ds_date {
    use chrono::{NaiveDate, NaiveDateTime};
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.format("%Y-%m-%d").to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        if let Ok(dt) = NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f") {
            return Ok(dt.date());
        }
        NaiveDate::parse_from_str(&raw, "%Y-%m-%d").map_err(serde::de::Error::custom)
    }
}

/// Validate the user-editable forecast horizon before anything touches the
/// network: trimmed, a whole number, and within `1..=max_periods`.
pub fn parse_periods(raw: &str, max_periods: u32) -> Result<u32, ApiError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ApiError::InvalidInput(
            "enter how many months to forecast".to_string(),
        ));
    }

    let periods: u32 = trimmed.parse().map_err(|_| {
        ApiError::InvalidInput(format!("\"{}\" is not a whole number of months", trimmed))
    })?;

    if periods == 0 || periods > max_periods {
        return Err(ApiError::InvalidInput(format!(
            "forecast horizon must be between 1 and {} months",
            max_periods
        )));
    }

    Ok(periods)
}

/// Fetch the full historical series.
pub async fn fetch_historical() -> Result<Series, ApiError> {
    log::trace!("Fetching historical series");

    let points: Vec<HistoricalPoint> = api_client::get(HISTORICAL_ENDPOINT).await?;

    log::info!("Fetched {} historical points", points.len());
    Ok(points
        .into_iter()
        .map(|p| TimePoint {
            date: p.ds,
            value: p.y,
        })
        .collect())
}

/// Request a forecast for the given number of months.
pub async fn fetch_forecast(periods: u32) -> Result<Series, ApiError> {
    log::trace!("Requesting forecast for {} periods", periods);

    let request = ForecastRequest { periods };
    let points: Vec<ForecastPoint> = api_client::post(FORECAST_ENDPOINT, &request).await?;

    log::info!("Fetched {} forecast points", points.len());
    Ok(points
        .into_iter()
        .map(|p| TimePoint {
            date: p.ds,
            value: p.value,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn historical_payload_deserializes_pandas_timestamps() {
        let payload = r#"[
            {"ds": "1960-01-01T00:00:00", "y": 417.0},
            {"ds": "1960-02-01T00:00:00", "y": 391.0}
        ]"#;

        let points: Vec<HistoricalPoint> = serde_json::from_str(payload).unwrap();

        assert_eq!(points.len(), 2);
        assert_eq!(points[0].ds, NaiveDate::from_ymd_opt(1960, 1, 1).unwrap());
        assert_eq!(points[0].y, 417.0);
    }

    #[test]
    fn historical_payload_accepts_plain_dates() {
        let payload = r#"[{"ds": "1960-03-01", "y": 419.0}]"#;

        let points: Vec<HistoricalPoint> = serde_json::from_str(payload).unwrap();

        assert_eq!(points[0].ds, NaiveDate::from_ymd_opt(1960, 3, 1).unwrap());
    }

    #[test]
    fn forecast_payload_maps_the_model_column() {
        let payload = r#"[{"ds": "1961-01-01T00:00:00", "AutoARIMA": 445.6}]"#;

        let points: Vec<ForecastPoint> = serde_json::from_str(payload).unwrap();

        assert_eq!(points[0].ds, NaiveDate::from_ymd_opt(1961, 1, 1).unwrap());
        assert_eq!(points[0].value, 445.6);
    }

    #[test]
    fn malformed_ds_is_rejected() {
        let payload = r#"[{"ds": "January 1960", "y": 417.0}]"#;

        let result: Result<Vec<HistoricalPoint>, _> = serde_json::from_str(payload);

        assert!(result.is_err());
    }

    #[test]
    fn forecast_request_body_shape() {
        let body = serde_json::to_value(ForecastRequest { periods: 12 }).unwrap();

        assert_eq!(body, serde_json::json!({"periods": 12}));
    }

    #[test]
    fn parse_periods_accepts_a_bounded_whole_number() {
        assert_eq!(parse_periods("12", 120), Ok(12));
        assert_eq!(parse_periods(" 24 ", 120), Ok(24));
        assert_eq!(parse_periods("120", 120), Ok(120));
    }

    #[test]
    fn parse_periods_rejects_non_numeric_input_before_any_request() {
        let err = parse_periods("abc", 120).unwrap_err();
        assert!(matches!(err, ApiError::InvalidInput(_)));

        let err = parse_periods("12.5", 120).unwrap_err();
        assert!(matches!(err, ApiError::InvalidInput(_)));
    }

    #[test]
    fn parse_periods_rejects_empty_zero_and_out_of_range() {
        assert!(matches!(
            parse_periods("", 120),
            Err(ApiError::InvalidInput(_))
        ));
        assert!(matches!(
            parse_periods("0", 120),
            Err(ApiError::InvalidInput(_))
        ));
        assert!(matches!(
            parse_periods("121", 120),
            Err(ApiError::InvalidInput(_))
        ));
        assert!(matches!(
            parse_periods("-3", 120),
            Err(ApiError::InvalidInput(_))
        ));
    }
}
