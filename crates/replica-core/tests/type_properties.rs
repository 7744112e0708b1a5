//! Property-based tests for core type invariants.

use proptest::prelude::*;
use replica_core::prelude::*;

fn date(offset: u8) -> Date {
    Date::from_ymd(2024, 1, 1).unwrap().add_days(i64::from(offset))
}

proptest! {
    #[test]
    fn price_table_keeps_one_price_per_pair(
        raw in prop::collection::vec((0u8..20, 0usize..4, 1.0f64..500.0), 0..80)
    ) {
        let symbols = ["AAA", "BBB", "CCC", "DDD"];
        let points: Vec<PricePoint> = raw
            .iter()
            .map(|(day, s, px)| PricePoint::new(date(*day), symbols[*s], *px))
            .collect();
        let table = PriceTable::from_points(points.clone()).unwrap();

        let mut pairs: Vec<(Date, Symbol)> = table
            .points()
            .iter()
            .map(|p| (p.date, p.symbol.clone()))
            .collect();
        let before = pairs.len();
        pairs.sort();
        pairs.dedup();
        prop_assert_eq!(before, pairs.len());

        // the first occurrence wins
        for kept in table.points() {
            let first = points
                .iter()
                .find(|p| p.date == kept.date && p.symbol == kept.symbol)
                .unwrap();
            prop_assert_eq!(first.close, kept.close);
        }
    }

    #[test]
    fn series_dates_are_strictly_increasing(days in prop::collection::btree_set(0u8..200, 0..60)) {
        let dates: Vec<Date> = days.iter().rev().map(|d| date(*d)).collect();
        let values: Vec<f64> = (0..dates.len()).map(|i| i as f64 * 0.001).collect();
        let series = ReturnSeries::new(dates, values).unwrap();
        prop_assert!(series.dates().windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn tail_never_exceeds_request(len in 0usize..50, n in 0usize..80) {
        let dates: Vec<Date> = (0..len).map(|i| date(i as u8)).collect();
        let series = ReturnSeries::new(dates, vec![0.0; len]).unwrap();
        prop_assert_eq!(series.tail(n).len(), n.min(len));
    }
}
