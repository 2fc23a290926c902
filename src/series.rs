use chrono::NaiveDate;

/// A single observation in a month-granularity time series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimePoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// Ordered sequence of points, insertion order = chronological order.
/// Ordering is guaranteed by the backend and not re-verified here.
pub type Series = Vec<TimePoint>;

/// Chart-ready view of historical + forecast data: one shared label axis and
/// two value sequences of the same length. `None` entries are gaps the chart
/// library skips, so each series renders only over the dates it covers.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartDataset {
    pub labels: Vec<NaiveDate>,
    pub historical: Vec<Option<f64>>,
    pub forecast: Vec<Option<f64>>,
}

impl ChartDataset {
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Combine both series onto one label axis.
///
/// Labels are historical dates followed by forecast dates; the caller
/// guarantees forecast dates come chronologically after historical ones, so no
/// sorting or de-duplication happens here. The forecast value sequence is
/// left-padded with one gap per historical point so it renders at the correct
/// x-axis offset, and vice versa for the historical sequence. An empty side
/// degenerates to an all-gap sequence, which is fine.
pub fn merge(historical: &[TimePoint], forecast: &[TimePoint]) -> ChartDataset {
    let labels = historical
        .iter()
        .chain(forecast.iter())
        .map(|p| p.date)
        .collect();

    let historical_values = historical
        .iter()
        .map(|p| Some(p.value))
        .chain(std::iter::repeat(None).take(forecast.len()))
        .collect();

    let forecast_values = std::iter::repeat(None)
        .take(historical.len())
        .chain(forecast.iter().map(|p| Some(p.value)))
        .collect();

    ChartDataset {
        labels,
        historical: historical_values,
        forecast: forecast_values,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(year: i32, month: u32, value: f64) -> TimePoint {
        TimePoint {
            date: NaiveDate::from_ymd_opt(year, month, 1).unwrap(),
            value,
        }
    }

    #[test]
    fn merge_aligns_labels_and_offsets_forecast() {
        let historical = vec![point(2020, 1, 100.0), point(2020, 2, 110.0)];
        let forecast = vec![point(2020, 3, 120.0)];

        let dataset = merge(&historical, &forecast);

        assert_eq!(
            dataset.labels,
            vec![
                NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2020, 2, 1).unwrap(),
                NaiveDate::from_ymd_opt(2020, 3, 1).unwrap(),
            ]
        );
        assert_eq!(dataset.historical, vec![Some(100.0), Some(110.0), None]);
        assert_eq!(dataset.forecast, vec![None, None, Some(120.0)]);
    }

    #[test]
    fn merge_sequences_share_the_label_axis_length() {
        let historical: Series = (1..=12).map(|m| point(2019, m, f64::from(m))).collect();
        let forecast: Series = (1..=5).map(|m| point(2020, m, 200.0 + f64::from(m))).collect();

        let dataset = merge(&historical, &forecast);

        assert_eq!(dataset.labels.len(), 17);
        assert_eq!(dataset.historical.len(), 17);
        assert_eq!(dataset.forecast.len(), 17);

        assert!(dataset.historical[..12].iter().all(Option::is_some));
        assert!(dataset.historical[12..].iter().all(Option::is_none));
        assert!(dataset.forecast[..12].iter().all(Option::is_none));
        assert!(dataset.forecast[12..].iter().all(Option::is_some));
    }

    #[test]
    fn merge_with_empty_historical_starts_forecast_at_origin() {
        let forecast = vec![point(2020, 3, 120.0), point(2020, 4, 125.0)];

        let dataset = merge(&[], &forecast);

        assert_eq!(dataset.historical, vec![None, None]);
        assert_eq!(dataset.forecast, vec![Some(120.0), Some(125.0)]);
    }

    #[test]
    fn merge_with_empty_forecast_keeps_historical_only() {
        let historical = vec![point(2020, 1, 100.0)];

        let dataset = merge(&historical, &[]);

        assert_eq!(dataset.labels.len(), 1);
        assert_eq!(dataset.historical, vec![Some(100.0)]);
        assert_eq!(dataset.forecast, vec![None]);
    }

    #[test]
    fn merge_of_two_empty_series_is_empty() {
        let dataset = merge(&[], &[]);

        assert!(dataset.is_empty());
        assert!(dataset.historical.is_empty());
        assert!(dataset.forecast.is_empty());
    }
}
