//! Flat tabular dataset of near-earth objects.
//!
//! The feed buckets objects by calendar date; downstream stages want one row
//! per object. [`Dataset::from_buckets`] flattens the buckets in
//! date-then-object order and each row keeps the date it was observed under,
//! so the bucket structure stays recoverable.

use chrono::NaiveDate;

/// One near-earth object observation, flattened out of its date bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct NeoRow {
    /// Calendar date bucket this object was reported under.
    pub observed: NaiveDate,
    /// NeoWs object identifier.
    pub id: String,
    /// Human-readable designation, when the feed provides one.
    pub name: Option<String>,
    /// Absolute magnitude (H). Missing for a handful of poorly-observed
    /// objects; statistics must skip those rows.
    pub absolute_magnitude_h: Option<f64>,
    /// NASA's potentially-hazardous flag.
    pub hazardous: Option<bool>,
}

/// Flat sequence of [`NeoRow`]s for one fetched date range.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    rows: Vec<NeoRow>,
}

impl Dataset {
    /// Flatten per-date buckets into one flat sequence, preserving the
    /// buckets' order and each bucket's internal ordering.
    ///
    /// The resulting row count is exactly the sum of the bucket sizes.
    pub fn from_buckets(buckets: Vec<(NaiveDate, Vec<NeoRow>)>) -> Self {
        let mut rows = Vec::with_capacity(buckets.iter().map(|(_, b)| b.len()).sum());
        for (_, bucket) in buckets {
            rows.extend(bucket);
        }
        Self { rows }
    }

    pub fn from_rows(rows: Vec<NeoRow>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[NeoRow] {
        &self.rows
    }

    /// Present magnitude values, in row order.
    pub fn magnitudes(&self) -> impl Iterator<Item = f64> + '_ {
        self.rows.iter().filter_map(|row| row.absolute_magnitude_h)
    }
}

#[cfg(test)]
pub(crate) fn test_row(id: &str, magnitude: Option<f64>) -> NeoRow {
    NeoRow {
        observed: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
        id: id.to_string(),
        name: None,
        absolute_magnitude_h: magnitude,
        hazardous: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flatten_preserves_total_row_count() {
        let d1 = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        let d2 = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
        let buckets = vec![
            (d1, vec![test_row("a", Some(20.0)), test_row("b", Some(21.0))]),
            (
                d2,
                vec![
                    test_row("c", Some(22.0)),
                    test_row("d", None),
                    test_row("e", Some(23.0)),
                ],
            ),
        ];

        let dataset = Dataset::from_buckets(buckets);
        assert_eq!(dataset.len(), 5);
    }

    #[test]
    fn flatten_keeps_date_then_object_order() {
        let d1 = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        let d2 = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
        let buckets = vec![
            (d1, vec![test_row("a", None), test_row("b", None)]),
            (d2, vec![test_row("c", None)]),
        ];

        let dataset = Dataset::from_buckets(buckets);
        let ids: Vec<&str> = dataset.rows().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }

    #[test]
    fn magnitudes_skip_missing_values() {
        let dataset = Dataset::from_rows(vec![
            test_row("a", Some(11.0)),
            test_row("b", None),
            test_row("c", Some(12.0)),
        ]);
        let mags: Vec<f64> = dataset.magnitudes().collect();
        assert_eq!(mags, [11.0, 12.0]);
    }
}
