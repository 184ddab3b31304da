use crate::fetcher::envelope::RawSeries;
use crate::model::{Observation, PriceRecord, SeriesCatalog};
use tracing::debug;

/// Rounds to cents from the exact binary value, ties to even.
pub fn round_cents(value: f64) -> f64 {
    let rounded = format!("{value:.2}").parse::<f64>().unwrap_or(value);
    // "-0.00" is still an unchanged price.
    if rounded == 0.0 { 0.0 } else { rounded }
}

/// Turns the returned series into price records, keeping the response order.
pub fn normalize_all(series: &[RawSeries], catalog: &SeriesCatalog) -> Vec<PriceRecord> {
    series
        .iter()
        .filter_map(|s| normalize_series(s, catalog))
        .collect()
}

fn normalize_series(series: &RawSeries, catalog: &SeriesCatalog) -> Option<PriceRecord> {
    let label = catalog.label_for(&series.series_id);
    let observations: Vec<Observation> = series
        .data
        .iter()
        .take(2)
        .map(|o| Observation {
            value: o.value,
            period: o.period.clone(),
        })
        .collect();

    let Some(latest) = observations.first() else {
        debug!("Series {} returned no observations, skipping", series.series_id);
        return None;
    };
    let change = observations
        .get(1)
        .map(|previous| round_cents(latest.value - previous.value));

    debug!(
        "{}: {:.2} ({}) change {:?}",
        label,
        latest.value,
        latest.period.as_deref().unwrap_or("?"),
        change
    );

    Some(PriceRecord {
        label: label.to_string(),
        price: latest.value,
        change,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetcher::envelope::Envelope;
    use crate::model::SeriesDefinition;

    fn catalog() -> SeriesCatalog {
        SeriesCatalog::new(vec![
            SeriesDefinition { id: "EGGS".into(), label: "Eggs".into() },
            SeriesDefinition { id: "MILK".into(), label: "Milk".into() },
        ])
    }

    fn series(raw: &str) -> Vec<RawSeries> {
        let env: Envelope = serde_json::from_str(&format!(
            r#"{{ "status": "REQUEST_SUCCEEDED", "Results": {{ "series": {raw} }} }}"#
        ))
        .unwrap();
        env.results.unwrap().series
    }

    #[test]
    fn change_is_rounded_difference_of_two_latest() {
        let records = normalize_all(
            &series(r#"[{ "seriesID": "EGGS", "data": [{"value": "3.204"}, {"value": "3.051"}, {"value": "9.99"}] }]"#),
            &catalog(),
        );
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].label, "Eggs");
        assert_eq!(records[0].price, 3.204);
        assert_eq!(records[0].change, Some(0.15));
    }

    #[test]
    fn single_observation_has_absent_change() {
        let records = normalize_all(
            &series(r#"[{ "seriesID": "MILK", "data": [{"value": "4.10"}] }]"#),
            &catalog(),
        );
        assert_eq!(records[0].change, None);
    }

    #[test]
    fn identical_observations_give_present_zero() {
        let records = normalize_all(
            &series(r#"[{ "seriesID": "MILK", "data": [{"value": "4.10"}, {"value": "4.10"}] }]"#),
            &catalog(),
        );
        assert_eq!(records[0].change, Some(0.0));
    }

    #[test]
    fn empty_series_are_skipped_and_unknown_ids_keep_raw_label() {
        let records = normalize_all(
            &series(
                r#"[
                { "seriesID": "MILK", "data": [] },
                { "seriesID": "APU0000NEW", "data": [{"value": "1.00"}, {"value": "1.25"}] },
                { "seriesID": "EGGS", "data": [{"value": "3.00"}] }
            ]"#,
            ),
            &catalog(),
        );
        let labels: Vec<&str> = records.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["APU0000NEW", "Eggs"]);
        assert_eq!(records[0].change, Some(-0.25));
    }

    #[test]
    fn rounding_goes_to_two_decimals() {
        assert_eq!(round_cents(0.1 + 0.2), 0.3);
        assert_eq!(round_cents(-0.054), -0.05);
        assert_eq!(round_cents(1.0), 1.0);
    }

    #[test]
    fn rounding_uses_exact_value_not_scaled_product() {
        // 1.0 - 0.885 is just below 0.115; 2.375 - 2.25 is exactly 0.125.
        assert_eq!(round_cents(1.0 - 0.885), 0.11);
        assert_eq!(round_cents(2.375 - 2.25), 0.12);
    }

    #[test]
    fn negative_zero_becomes_plain_zero() {
        let zero = round_cents(-0.004);
        assert_eq!(zero, 0.0);
        assert!(zero.is_sign_positive());
    }

    #[test]
    fn half_cent_differences_follow_exact_rounding() {
        let records = normalize_all(
            &series(r#"[{ "seriesID": "EGGS", "data": [{"value": "2.375"}, {"value": "2.25"}] }]"#),
            &catalog(),
        );
        assert_eq!(records[0].change, Some(0.12));
    }
}
