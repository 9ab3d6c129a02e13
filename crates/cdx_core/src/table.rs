//! Date-indexed trajectory tables.
//!
//! A [`CurveTable`] is the medium of exchange between the curve providers
//! and the valuation core: an ordered date index with one numeric row per
//! date and one column per trajectory (discount curves) or per tenor bucket
//! (survival curves). Alignment to a schedule is an explicit operation
//! ([`CurveTable::reindex`]); a schedule date missing from the table is a
//! data error, never silently interpolated.
//!
//! # Examples
//!
//! ```
//! use cdx_core::table::CurveTable;
//! use cdx_core::types::Date;
//!
//! let dates = vec![
//!     Date::from_ymd(2024, 1, 1).unwrap(),
//!     Date::from_ymd(2024, 4, 1).unwrap(),
//! ];
//! let table = CurveTable::new(dates.clone(), vec![vec![1.0, 1.0], vec![0.99, 0.98]]).unwrap();
//!
//! assert_eq!(table.len(), 2);
//! assert_eq!(table.num_columns(), 2);
//! assert_eq!(table.value(dates[1], 0).unwrap(), 0.99);
//! ```

use std::fmt;
use thiserror::Error;

use crate::types::Date;

/// Errors raised by curve table construction and alignment.
///
/// `MissingDate` is the fatal coverage error: a schedule date the table
/// does not contain. Curves are externally supplied and cannot be
/// re-derived here, so coverage failures surface immediately.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CurveError {
    /// A date required by a schedule is not present in the table.
    #[error("Curve does not cover schedule date {date}")]
    MissingDate {
        /// The uncovered date.
        date: Date,
    },

    /// Column label not present in the table.
    #[error("Unknown curve column: {label}")]
    UnknownColumn {
        /// The requested label.
        label: String,
    },

    /// Row or weight length does not match the table shape.
    #[error("Dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Expected length.
        expected: usize,
        /// Actual length.
        got: usize,
    },

    /// Date index is not strictly increasing.
    #[error("Dates must be strictly increasing (violation at position {position})")]
    UnsortedDates {
        /// Index of the first out-of-order date.
        position: usize,
    },
}

/// An ordered date index with one numeric row per date.
///
/// Columns carry string labels: trajectory ordinals (`"0"`, `"1"`, …) for
/// simulated discount curves, tenor codes (`"1M"`, `"3M"`, …) for survival
/// curves.
///
/// # Invariants
///
/// - The date index is strictly increasing (no duplicates).
/// - Every row has exactly `num_columns()` entries.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurveTable {
    dates: Vec<Date>,
    labels: Vec<String>,
    values: Vec<Vec<f64>>,
}

impl CurveTable {
    /// Creates a table with trajectory-ordinal column labels (`"0"`, `"1"`, …).
    ///
    /// # Errors
    ///
    /// `UnsortedDates` if the index is not strictly increasing,
    /// `DimensionMismatch` if row count or any row width is inconsistent.
    pub fn new(dates: Vec<Date>, values: Vec<Vec<f64>>) -> Result<Self, CurveError> {
        let ncols = values.first().map_or(0, Vec::len);
        let labels = (0..ncols).map(|c| c.to_string()).collect();
        Self::with_labels(dates, labels, values)
    }

    /// Creates a table with explicit column labels.
    pub fn with_labels(
        dates: Vec<Date>,
        labels: Vec<String>,
        values: Vec<Vec<f64>>,
    ) -> Result<Self, CurveError> {
        if values.len() != dates.len() {
            return Err(CurveError::DimensionMismatch {
                expected: dates.len(),
                got: values.len(),
            });
        }
        for row in &values {
            if row.len() != labels.len() {
                return Err(CurveError::DimensionMismatch {
                    expected: labels.len(),
                    got: row.len(),
                });
            }
        }
        if let Some(position) = dates.windows(2).position(|w| w[0] >= w[1]) {
            return Err(CurveError::UnsortedDates { position: position + 1 });
        }
        Ok(Self { dates, labels, values })
    }

    /// Creates a table holding `value` in every cell.
    ///
    /// Used for injected flat curves in tests and calibration scaffolding.
    pub fn constant(dates: Vec<Date>, num_columns: usize, value: f64) -> Result<Self, CurveError> {
        let values = vec![vec![value; num_columns]; dates.len()];
        Self::new(dates, values)
    }

    /// Returns the number of dates (rows).
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Returns whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Returns the number of columns.
    pub fn num_columns(&self) -> usize {
        self.labels.len()
    }

    /// Returns the date index.
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Returns the column labels.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Returns the row for `date`, if present.
    pub fn row(&self, date: Date) -> Option<&[f64]> {
        self.position(date).map(|i| self.values[i].as_slice())
    }

    /// Returns the row at ordinal position `index`.
    pub fn row_at(&self, index: usize) -> &[f64] {
        &self.values[index]
    }

    /// Returns the value at (`date`, `column`).
    ///
    /// # Errors
    ///
    /// `MissingDate` if the date is not in the index, `DimensionMismatch`
    /// if the column is out of range.
    pub fn value(&self, date: Date, column: usize) -> Result<f64, CurveError> {
        let i = self.position(date).ok_or(CurveError::MissingDate { date })?;
        self.values[i]
            .get(column)
            .copied()
            .ok_or(CurveError::DimensionMismatch {
                expected: self.labels.len(),
                got: column,
            })
    }

    /// Restricts the table to exactly `schedule`, in schedule order.
    ///
    /// This is the alignment step every leg calculation goes through: the
    /// result's index is the schedule itself, so downstream arithmetic can
    /// zip rows positionally.
    ///
    /// # Errors
    ///
    /// `MissingDate` for the first schedule date the table does not cover.
    pub fn reindex(&self, schedule: &[Date]) -> Result<CurveTable, CurveError> {
        let mut values = Vec::with_capacity(schedule.len());
        for &date in schedule {
            let i = self.position(date).ok_or(CurveError::MissingDate { date })?;
            values.push(self.values[i].clone());
        }
        CurveTable::with_labels(schedule.to_vec(), self.labels.clone(), values)
    }

    /// Returns the sub-table with dates in `[from, to]` (inclusive).
    pub fn slice(&self, from: Date, to: Date) -> CurveTable {
        let (mut dates, mut values) = (Vec::new(), Vec::new());
        for (i, &date) in self.dates.iter().enumerate() {
            if date >= from && date <= to {
                dates.push(date);
                values.push(self.values[i].clone());
            }
        }
        CurveTable {
            dates,
            labels: self.labels.clone(),
            values,
        }
    }

    /// Returns the values of the column with the given label.
    pub fn column(&self, label: &str) -> Result<Vec<f64>, CurveError> {
        let c = self
            .labels
            .iter()
            .position(|l| l == label)
            .ok_or_else(|| CurveError::UnknownColumn {
                label: label.to_string(),
            })?;
        Ok(self.values.iter().map(|row| row[c]).collect())
    }

    /// Returns a one-column table holding the labelled column.
    pub fn column_table(&self, label: &str) -> Result<CurveTable, CurveError> {
        let column = self.column(label)?;
        CurveTable::with_labels(
            self.dates.clone(),
            vec![label.to_string()],
            column.into_iter().map(|v| vec![v]).collect(),
        )
    }

    /// Returns the cross-column mean of each row.
    pub fn row_mean(&self) -> Vec<f64> {
        let n = self.num_columns().max(1) as f64;
        self.values
            .iter()
            .map(|row| row.iter().sum::<f64>() / n)
            .collect()
    }

    /// Returns a copy with row `i` scaled by `weights[i]`.
    ///
    /// This is how leg weights are applied to a discount table: one weight
    /// per schedule date, broadcast across trajectories.
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` if `weights.len() != self.len()`.
    pub fn scale_rows(&self, weights: &[f64]) -> Result<CurveTable, CurveError> {
        if weights.len() != self.dates.len() {
            return Err(CurveError::DimensionMismatch {
                expected: self.dates.len(),
                got: weights.len(),
            });
        }
        let values = self
            .values
            .iter()
            .zip(weights)
            .map(|(row, &w)| row.iter().map(|v| v * w).collect())
            .collect();
        Ok(CurveTable {
            dates: self.dates.clone(),
            labels: self.labels.clone(),
            values,
        })
    }

    fn position(&self, date: Date) -> Option<usize> {
        self.dates.binary_search(&date).ok()
    }
}

impl fmt::Display for CurveTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CurveTable[{} dates x {} columns]",
            self.len(),
            self.num_columns()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Date {
        Date::parse(s).unwrap()
    }

    fn sample() -> CurveTable {
        CurveTable::new(
            vec![d("2024-01-01"), d("2024-04-01"), d("2024-07-01")],
            vec![vec![1.0, 1.0], vec![0.99, 0.98], vec![0.97, 0.95]],
        )
        .unwrap()
    }

    #[test]
    fn test_new_assigns_ordinal_labels() {
        let table = sample();
        assert_eq!(table.labels(), &["0".to_string(), "1".to_string()]);
    }

    #[test]
    fn test_new_rejects_unsorted_dates() {
        let result = CurveTable::new(
            vec![d("2024-04-01"), d("2024-01-01")],
            vec![vec![1.0], vec![1.0]],
        );
        assert_eq!(result.unwrap_err(), CurveError::UnsortedDates { position: 1 });
    }

    #[test]
    fn test_new_rejects_duplicate_dates() {
        let result = CurveTable::new(
            vec![d("2024-01-01"), d("2024-01-01")],
            vec![vec![1.0], vec![1.0]],
        );
        assert!(matches!(result, Err(CurveError::UnsortedDates { .. })));
    }

    #[test]
    fn test_new_rejects_ragged_rows() {
        let result = CurveTable::new(
            vec![d("2024-01-01"), d("2024-04-01")],
            vec![vec![1.0, 1.0], vec![1.0]],
        );
        assert!(matches!(result, Err(CurveError::DimensionMismatch { .. })));
    }

    #[test]
    fn test_value_lookup() {
        let table = sample();
        assert_eq!(table.value(d("2024-04-01"), 1).unwrap(), 0.98);
        assert!(matches!(
            table.value(d("2024-02-01"), 0),
            Err(CurveError::MissingDate { .. })
        ));
    }

    #[test]
    fn test_reindex_aligns_to_schedule() {
        let table = sample();
        let schedule = [d("2024-01-01"), d("2024-07-01")];
        let aligned = table.reindex(&schedule).unwrap();
        assert_eq!(aligned.dates(), &schedule);
        assert_eq!(aligned.row_at(1), &[0.97, 0.95]);
    }

    #[test]
    fn test_reindex_missing_date_is_coverage_error() {
        let table = sample();
        let err = table.reindex(&[d("2024-01-01"), d("2024-05-15")]).unwrap_err();
        assert_eq!(
            err,
            CurveError::MissingDate {
                date: d("2024-05-15")
            }
        );
    }

    #[test]
    fn test_slice_inclusive() {
        let table = sample();
        let sliced = table.slice(d("2024-02-01"), d("2024-07-01"));
        assert_eq!(sliced.dates(), &[d("2024-04-01"), d("2024-07-01")]);
    }

    #[test]
    fn test_column_by_label() {
        let dates = vec![d("2024-01-01"), d("2024-04-01")];
        let table = CurveTable::with_labels(
            dates,
            vec!["1M".to_string(), "3M".to_string()],
            vec![vec![1.0, 0.9], vec![0.8, 0.7]],
        )
        .unwrap();

        assert_eq!(table.column("3M").unwrap(), vec![0.9, 0.7]);
        assert!(matches!(
            table.column("6M"),
            Err(CurveError::UnknownColumn { .. })
        ));

        let single = table.column_table("1M").unwrap();
        assert_eq!(single.num_columns(), 1);
        assert_eq!(single.column("1M").unwrap(), vec![1.0, 0.8]);
    }

    #[test]
    fn test_row_mean() {
        let table = sample();
        let means = table.row_mean();
        assert_eq!(means[0], 1.0);
        assert!((means[1] - 0.985).abs() < 1e-12);
    }

    #[test]
    fn test_scale_rows() {
        let table = sample();
        let scaled = table.scale_rows(&[2.0, 1.0, 0.0]).unwrap();
        assert_eq!(scaled.row_at(0), &[2.0, 2.0]);
        assert_eq!(scaled.row_at(1), &[0.99, 0.98]);
        assert_eq!(scaled.row_at(2), &[0.0, 0.0]);

        assert!(matches!(
            table.scale_rows(&[1.0]),
            Err(CurveError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_constant_table() {
        let table = CurveTable::constant(vec![d("2024-01-01"), d("2024-04-01")], 3, 1.0).unwrap();
        assert_eq!(table.num_columns(), 3);
        assert!(table.row_at(1).iter().all(|&v| v == 1.0));
    }

    #[test]
    fn test_empty_table() {
        let table = CurveTable::new(Vec::new(), Vec::new()).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.num_columns(), 0);
        assert!(table.reindex(&[]).unwrap().is_empty());
    }
}
