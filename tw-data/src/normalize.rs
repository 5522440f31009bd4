//! Raw document normalization.

use tw_core::{RawRecord, Sample, SeriesFields, TidewatchError};

/// Normalize raw records into samples, preserving length and order.
///
/// Fails on the first record whose timestamp is missing or unparseable;
/// the error carries that record's index. Nothing is filtered or sorted.
pub fn normalize(records: &[RawRecord], fields: &SeriesFields) -> Result<Vec<Sample>, TidewatchError> {
    let samples = records
        .iter()
        .enumerate()
        .map(|(i, r)| Sample::from_record(i, r, fields))
        .collect::<Result<Vec<_>, _>>()?;
    log::debug!(
        "normalize: {} samples from field '{}'",
        samples.len(),
        fields.primary()
    );
    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn records(value: Value) -> Vec<RawRecord> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn preserves_length_and_order() {
        let raw = records(json!([
            { "temperature": 10.0, "humidity": 80, "timestamp": "2025-01-09T14:00:00" },
            { "temperature": 8.0, "humidity": null, "timestamp": "2025-01-08T14:00:00" },
            { "temperature": 12.0, "timestamp": "2025-01-09T15:00:00" }
        ]));
        let samples = normalize(&raw, &SeriesFields::outdoor()).unwrap();
        assert_eq!(samples.len(), 3);
        // input order is kept, not sorted
        assert_eq!(samples[1].metric_value, Some(8.0));
        assert_eq!(samples[1].secondary_value, None);
        assert_eq!(samples[2].secondary_value, None);
    }

    #[test]
    fn empty_input_is_empty_output() {
        assert!(normalize(&[], &SeriesFields::indoor()).unwrap().is_empty());
    }

    #[test]
    fn fails_on_first_malformed_record() {
        let raw = records(json!([
            { "temperature_c": 20.0, "timestamp": "2025-01-09T14:00:00" },
            { "temperature_c": 21.0, "timestamp": "Invalid Date" },
            { "temperature_c": 22.0 }
        ]));
        let err = normalize(&raw, &SeriesFields::indoor()).unwrap_err();
        assert!(matches!(err, TidewatchError::MalformedTimestamp { index: 1, .. }));
    }
}
