// JSON snapshot of the rendered cards
use crate::model::SnapshotError;
use crate::render::BlogCards;
use crate::render::table::price_summary;
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::info;

const SUMMARY_ITEMS: usize = 4;

#[derive(Debug, Serialize)]
pub struct SnapshotCard {
    pub id: u32,
    pub title: String,
    pub meta: String,
    pub summary: String,
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prices: Option<Vec<SnapshotPrice>>,
    pub updated: String,
}

#[derive(Debug, Serialize)]
pub struct SnapshotPrice {
    pub item: String,
    pub price: String,
    pub month: String,
    pub change: Option<f64>,
}

/// Builds the snapshot cards. Returns `None` when there are no price records.
pub fn build_snapshot(cards: &BlogCards<'_>) -> Option<Vec<SnapshotCard>> {
    let records = cards.records?;

    let retail = SnapshotCard {
        id: 1,
        title: cards.retail_title(),
        meta: cards.retail_meta(),
        summary: price_summary(records, SUMMARY_ITEMS),
        image: cards.config.retail_image.clone(),
        prices: Some(
            records
                .iter()
                .map(|r| SnapshotPrice {
                    item: r.label.clone(),
                    price: format!("${:.2}", r.price),
                    month: cards.month.clone(),
                    change: r.change,
                })
                .collect(),
        ),
        updated: cards.week_of.clone(),
    };

    let outlook = SnapshotCard {
        id: 2,
        title: cards.outlook_title(),
        meta: cards.outlook_meta(),
        summary: cards.trend.headline().to_string(),
        image: cards.config.outlook_image.clone(),
        prices: None,
        updated: cards.week_of.clone(),
    };

    let mut snapshot = vec![retail, outlook];
    snapshot.extend(cards.static_cards().iter().zip(3..).map(|(c, id)| SnapshotCard {
        id,
        title: c.title.clone(),
        meta: c.meta.clone(),
        summary: c.summary.clone(),
        image: c.image.clone(),
        prices: None,
        updated: c.updated.clone(),
    }));
    Some(snapshot)
}

/// Overwrites `path` with the pretty-printed snapshot.
pub fn write_snapshot(path: &Path, snapshot: &[SnapshotCard]) -> Result<(), SnapshotError> {
    let json = serde_json::to_string_pretty(snapshot)?;
    fs::write(path, json).map_err(|source| SnapshotError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Wrote snapshot {} ({} cards)", path.display(), snapshot.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PriceRecord;
    use crate::render::cards::tests::sample_config;
    use chrono::NaiveDate;
    use serde_json::Value;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 5).unwrap()
    }

    #[test]
    fn no_snapshot_without_records() {
        let config = sample_config();
        let cards = BlogCards::new(&config, None, today());
        assert!(build_snapshot(&cards).is_none());
    }

    #[test]
    fn snapshot_keeps_zero_and_absent_changes_apart() {
        let config = sample_config();
        let records = vec![
            PriceRecord { label: "Eggs".into(), price: 3.2, change: Some(-0.15) },
            PriceRecord { label: "Milk".into(), price: 4.1, change: Some(0.0) },
            PriceRecord { label: "Beef".into(), price: 5.4, change: None },
        ];
        let cards = BlogCards::new(&config, Some(&records), today());
        let snapshot = build_snapshot(&cards).unwrap();

        let json: Value = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json.as_array().unwrap().len(), 3);

        let retail = &json[0];
        assert_eq!(retail["id"], 1);
        assert_eq!(retail["title"], "Retail Grocery Report \u{2014} October 2026");
        assert_eq!(retail["meta"], "October 2026 \u{2022} Market Data");
        assert_eq!(retail["updated"], "October 05, 2026");
        assert_eq!(retail["prices"][0]["price"], "$3.20");
        assert_eq!(retail["prices"][0]["change"], -0.15);
        assert_eq!(retail["prices"][1]["change"], 0.0);
        assert!(retail["prices"][2]["change"].is_null());
        assert_eq!(retail["prices"][2]["month"], "October 2026");
        assert_eq!(
            retail["summary"],
            "Eggs: $3.20 \u{25bc} $0.15 | Milk: $4.10 | Beef: $5.40"
        );

        let outlook = &json[1];
        assert_eq!(outlook["summary"], "Prices easing across several key categories.");
        assert!(outlook.get("prices").is_none());

        assert_eq!(json[2]["id"], 3);
        assert_eq!(json[2]["updated"], "January 15, 2026");
    }

    #[test]
    fn write_overwrites_previous_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blog-data.json");
        fs::write(&path, "[{\"stale\": true}, {}, {}, {}]").unwrap();

        let config = sample_config();
        let records = vec![PriceRecord { label: "Eggs".into(), price: 3.2, change: None }];
        let cards = BlogCards::new(&config, Some(&records), today());
        write_snapshot(&path, &build_snapshot(&cards).unwrap()).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(!written.contains("stale"));
        assert!(written.contains("\n  {\n    \"id\": 1,"));
    }
}
