//! Single-instrument (or single-portfolio) return time series.

use serde::{Deserialize, Serialize};

use super::Date;
use crate::error::{ReplicaError, ReplicaResult};

/// A date-indexed scalar return series.
///
/// Dates are strictly increasing and unique.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReturnSeries {
    dates: Vec<Date>,
    values: Vec<f64>,
}

/// Two series restricted to their common dates.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedPair {
    /// Common dates in ascending order.
    pub dates: Vec<Date>,
    /// Values of the first series on `dates`.
    pub left: Vec<f64>,
    /// Values of the second series on `dates`.
    pub right: Vec<f64>,
}

impl AlignedPair {
    /// Number of common dates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Returns true if the series share no date.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

impl ReturnSeries {
    /// Creates a series from parallel date and value vectors.
    ///
    /// Input order does not matter; points are sorted by date.
    ///
    /// # Errors
    ///
    /// Returns `ReplicaError::Data` if the lengths differ or a date repeats.
    pub fn new(dates: Vec<Date>, values: Vec<f64>) -> ReplicaResult<Self> {
        if dates.len() != values.len() {
            return Err(ReplicaError::data(format!(
                "series length mismatch: {} dates vs {} values",
                dates.len(),
                values.len()
            )));
        }
        Self::from_points(dates.into_iter().zip(values).collect())
    }

    /// Creates a series from `(date, value)` pairs.
    ///
    /// # Errors
    ///
    /// Returns `ReplicaError::Data` if a date repeats.
    pub fn from_points(mut points: Vec<(Date, f64)>) -> ReplicaResult<Self> {
        points.sort_by_key(|(d, _)| *d);
        if let Some(w) = points.windows(2).find(|w| w[0].0 == w[1].0) {
            return Err(ReplicaError::data(format!(
                "duplicate date {} in return series",
                w[0].0
            )));
        }
        let (dates, values) = points.into_iter().unzip();
        Ok(Self { dates, values })
    }

    /// Dates in ascending order.
    #[must_use]
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Values in date order.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Returns true if the series has no observations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Value on a given date.
    #[must_use]
    pub fn get(&self, date: Date) -> Option<f64> {
        self.dates
            .binary_search(&date)
            .ok()
            .map(|idx| self.values[idx])
    }

    /// Iterates over `(date, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Date, f64)> + '_ {
        self.dates.iter().copied().zip(self.values.iter().copied())
    }

    /// Returns the last `n` observations (all of them if shorter).
    #[must_use]
    pub fn tail(&self, n: usize) -> Self {
        let start = self.len().saturating_sub(n);
        Self {
            dates: self.dates[start..].to_vec(),
            values: self.values[start..].to_vec(),
        }
    }

    /// Restricts this series and `other` to their common dates.
    #[must_use]
    pub fn align(&self, other: &ReturnSeries) -> AlignedPair {
        let mut dates = Vec::new();
        let mut left = Vec::new();
        let mut right = Vec::new();

        let (mut i, mut j) = (0, 0);
        while i < self.len() && j < other.len() {
            match self.dates[i].cmp(&other.dates[j]) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    dates.push(self.dates[i]);
                    left.push(self.values[i]);
                    right.push(other.values[j]);
                    i += 1;
                    j += 1;
                }
            }
        }

        AlignedPair { dates, left, right }
    }

    /// Growth of one unit invested at the start: `(1 + r).cumprod()`.
    #[must_use]
    pub fn cumulative(&self) -> Vec<f64> {
        self.values
            .iter()
            .scan(1.0, |acc, r| {
                *acc *= 1.0 + r;
                Some(*acc)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn d(day: u32) -> Date {
        Date::from_ymd(2024, 4, day).unwrap()
    }

    #[test]
    fn test_new_sorts_and_rejects_duplicates() {
        let s = ReturnSeries::new(vec![d(3), d(1), d(2)], vec![0.3, 0.1, 0.2]).unwrap();
        assert_eq!(s.dates(), &[d(1), d(2), d(3)]);
        assert_eq!(s.values(), &[0.1, 0.2, 0.3]);

        assert!(ReturnSeries::new(vec![d(1), d(1)], vec![0.1, 0.2]).is_err());
        assert!(ReturnSeries::new(vec![d(1)], vec![]).is_err());
    }

    #[test]
    fn test_tail_is_lenient() {
        let s = ReturnSeries::new(vec![d(1), d(2), d(3)], vec![0.1, 0.2, 0.3]).unwrap();
        assert_eq!(s.tail(2).values(), &[0.2, 0.3]);
        assert_eq!(s.tail(10).len(), 3);
    }

    #[test]
    fn test_align_intersection() {
        let a = ReturnSeries::new(vec![d(1), d(2), d(4)], vec![1.0, 2.0, 4.0]).unwrap();
        let b = ReturnSeries::new(vec![d(2), d(3), d(4), d(5)], vec![20.0, 30.0, 40.0, 50.0])
            .unwrap();
        let pair = a.align(&b);

        assert_eq!(pair.dates, vec![d(2), d(4)]);
        assert_eq!(pair.left, vec![2.0, 4.0]);
        assert_eq!(pair.right, vec![20.0, 40.0]);
    }

    #[test]
    fn test_cumulative_and_get() {
        let s = ReturnSeries::new(vec![d(1), d(2)], vec![0.1, -0.1]).unwrap();
        let growth = s.cumulative();
        assert_relative_eq!(growth[0], 1.1);
        assert_relative_eq!(growth[1], 0.99, epsilon = 1e-12);
        assert_eq!(s.get(d(2)), Some(-0.1));
        assert_eq!(s.get(d(9)), None);
    }
}
