//! Day-over-day averages at the current hour.
//!
//! The newest sample fixes a reference hour. Samples from that clock hour
//! on the newest date ("today") and on the date before ("yesterday") are
//! averaged separately. This is an hour-of-day match, not a rolling 24 hour
//! window: with readings roughly every 15 minutes each bucket holds a
//! handful of samples.

use chrono::{NaiveDate, Timelike};
use serde::Serialize;
use tw_core::Sample;

/// Which side of the comparison an average belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DayLabel {
    Today,
    Yesterday,
}

/// Means over one (date, hour) bucket. `None` when no non-null value exists.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyAverage {
    pub label: DayLabel,
    pub avg_metric: Option<f64>,
    pub avg_secondary: Option<f64>,
}

/// The bucket coordinates derived from the newest sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReferenceHour {
    pub max_date: NaiveDate,
    pub prev_date: NaiveDate,
    pub current_hour: u32,
}

/// Result of [`aggregate_day_over_day`].
///
/// Without a reference hour there are no averages either: that is the case
/// for empty input and for a newest sample on the first representable date.
/// A side with no samples in its bucket is `None`, never zero-filled.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DayOverDay {
    pub reference: Option<ReferenceHour>,
    pub today: Option<DailyAverage>,
    pub yesterday: Option<DailyAverage>,
}

/// Compare today's and yesterday's averages at the hour of the newest sample.
pub fn aggregate_day_over_day(samples: &[Sample]) -> DayOverDay {
    let Some(max_ts) = samples.iter().map(|s| s.timestamp).max() else {
        return DayOverDay::default();
    };
    let max_date = max_ts.date();
    let current_hour = max_ts.hour();
    let Some(prev_date) = max_date.pred_opt() else {
        // NaiveDate::MIN has no previous day to compare against
        log::debug!("daily: {} has no previous date", max_date);
        return DayOverDay::default();
    };

    let today = bucket_average(samples, max_date, current_hour, DayLabel::Today);
    let yesterday = bucket_average(samples, prev_date, current_hour, DayLabel::Yesterday);
    log::debug!(
        "daily: hour {} on {} (today: {}, yesterday: {})",
        current_hour,
        max_date,
        today.is_some(),
        yesterday.is_some()
    );

    DayOverDay {
        reference: Some(ReferenceHour {
            max_date,
            prev_date,
            current_hour,
        }),
        today,
        yesterday,
    }
}

/// Average the samples in the (date, hour) bucket, or `None` if the bucket is empty.
fn bucket_average(samples: &[Sample], date: NaiveDate, hour: u32, label: DayLabel) -> Option<DailyAverage> {
    let bucket: Vec<&Sample> = samples
        .iter()
        .filter(|s| s.timestamp.date() == date && s.timestamp.hour() == hour)
        .collect();
    if bucket.is_empty() {
        return None;
    }
    Some(DailyAverage {
        label,
        avg_metric: mean(bucket.iter().map(|s| s.metric_value)),
        avg_secondary: mean(bucket.iter().map(|s| s.secondary_value)),
    })
}

/// Arithmetic mean over the present values; no present values gives `None`.
fn mean(values: impl Iterator<Item = Option<f64>>) -> Option<f64> {
    let (sum, count) = values
        .flatten()
        .fold((0.0, 0u32), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / f64::from(count))
}
