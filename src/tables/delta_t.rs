//! Delta-T table: TT minus UT1 as a function of time
//!
//! Delta-T is only known empirically; between tabulated epochs the table
//! interpolates linearly, and outside its span it falls back to the
//! long-term polynomial model published for the Five Millennium Canon of
//! Solar Eclipses. Results carry a flag so callers can distinguish the
//! materially less accurate extrapolated values from table-interpolated
//! ones.

use crate::errors::{Error, Result};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Mean length of the Gregorian year in days
const YEAR_DAYS: f64 = 365.2425;

/// A delta-T value together with its provenance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeltaT {
    /// TT - UT1 in seconds
    pub seconds: f64,
    /// True when the value came from the polynomial fallback model rather
    /// than table interpolation
    pub extrapolated: bool,
}

/// An ordered mapping from epochs to TT-UT1 offsets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeltaTTable {
    /// Epochs as day numbers (day 0 = 2000-01-01), strictly increasing
    epochs: Vec<f64>,
    /// TT - UT1 in seconds at each epoch
    values: Vec<f64>,
}

impl DeltaTTable {
    /// Build a table from (epoch day, delta-T seconds) pairs
    pub fn new(entries: Vec<(f64, f64)>) -> Result<Self> {
        for pair in entries.windows(2) {
            if pair[1].0 <= pair[0].0 {
                return Err(Error::InvalidTable(format!(
                    "delta-T epochs not strictly increasing: {} then {}",
                    pair[0].0, pair[1].0
                )));
            }
        }
        debug!("delta-T table with {} entries", entries.len());
        Ok(Self {
            epochs: entries.iter().map(|e| e.0).collect(),
            values: entries.iter().map(|e| e.1).collect(),
        })
    }

    /// Build a table keyed by calendar years rather than day numbers
    pub fn from_year_entries(entries: Vec<(f64, f64)>) -> Result<Self> {
        Self::new(
            entries
                .into_iter()
                .map(|(y, v)| ((y - 2000.0) * YEAR_DAYS, v))
                .collect(),
        )
    }

    /// A table with no tabulated epochs; every query uses the polynomial
    /// model and reports itself as extrapolated.
    pub fn empty() -> Self {
        Self {
            epochs: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Epoch span covered by the table, as (first, last) day numbers
    pub fn coverage(&self) -> Option<(f64, f64)> {
        match (self.epochs.first(), self.epochs.last()) {
            (Some(&a), Some(&b)) => Some((a, b)),
            _ => None,
        }
    }

    /// Delta-T at the given TT day number.
    ///
    /// Linear interpolation between tabulated epochs; the polynomial model
    /// outside the span, flagged as extrapolated.
    pub fn delta_t_at_day(&self, day: f64) -> DeltaT {
        if self.epochs.is_empty() {
            return DeltaT {
                seconds: delta_t_model(year_from_day(day)),
                extrapolated: true,
            };
        }
        let first = self.epochs[0];
        let last = self.epochs[self.epochs.len() - 1];
        if day < first || day > last {
            warn!(
                "delta-T query at day {} is outside tabulated span {}..{}",
                day, first, last
            );
            return DeltaT {
                seconds: delta_t_model(year_from_day(day)),
                extrapolated: true,
            };
        }

        let idx = self.epochs.partition_point(|&e| e <= day);
        let seconds = if idx == 0 {
            self.values[0]
        } else if idx >= self.epochs.len() {
            self.values[self.values.len() - 1]
        } else {
            let x0 = self.epochs[idx - 1];
            let x1 = self.epochs[idx];
            let t = (day - x0) / (x1 - x0);
            self.values[idx - 1] + t * (self.values[idx] - self.values[idx - 1])
        };
        DeltaT {
            seconds,
            extrapolated: false,
        }
    }

    /// Delta-T at the given TT day number, failing outside tabulated
    /// coverage instead of extrapolating
    pub fn delta_t_tabulated(&self, day: f64) -> Result<f64> {
        let (first, last) = self.coverage().ok_or(Error::OutOfTableRange {
            value: day,
            start: f64::NAN,
            end: f64::NAN,
        })?;
        if day < first || day > last {
            return Err(Error::OutOfTableRange {
                value: day,
                start: first,
                end: last,
            });
        }
        Ok(self.delta_t_at_day(day).seconds)
    }
}

fn year_from_day(day: f64) -> f64 {
    2000.0 + day / YEAR_DAYS
}

/// Long-term delta-T polynomial model (NASA eclipse-site fits)
///
/// Piecewise polynomial fits covering -500 to beyond 2150, with the
/// long-term parabola outside that range.
pub fn delta_t_model(year: f64) -> f64 {
    if year < -500.0 {
        let t = (year - 1820.0) / 100.0;
        -20.0 + 32.0 * t * t
    } else if year < 500.0 {
        let t = year / 100.0;
        10583.6 - 1014.41 * t + 33.78311 * t * t - 5.952053 * t.powi(3) - 0.1798452 * t.powi(4)
            + 0.022174192 * t.powi(5)
            + 0.0090316521 * t.powi(6)
    } else if year < 1600.0 {
        let t = (year - 1000.0) / 100.0;
        1574.2 - 556.01 * t + 71.23472 * t * t + 0.319781 * t.powi(3)
            - 0.8503463 * t.powi(4)
            - 0.005050998 * t.powi(5)
            + 0.0083572073 * t.powi(6)
    } else if year < 1700.0 {
        let t = year - 1600.0;
        120.0 - 0.9808 * t - 0.01532 * t * t + t.powi(3) / 7129.0
    } else if year < 1800.0 {
        let t = year - 1700.0;
        8.83 + 0.1603 * t - 0.0059285 * t * t + 0.00013336 * t.powi(3) - t.powi(4) / 1_174_000.0
    } else if year < 1860.0 {
        let t = year - 1800.0;
        13.72 - 0.332447 * t + 0.0068612 * t * t + 0.0041116 * t.powi(3) - 0.00037436 * t.powi(4)
            + 0.0000121272 * t.powi(5)
            - 0.0000001699 * t.powi(6)
            + 0.000000000875 * t.powi(7)
    } else if year < 1900.0 {
        let t = year - 1860.0;
        7.62 + 0.5737 * t - 0.251754 * t * t + 0.01680668 * t.powi(3) - 0.0004473624 * t.powi(4)
            + t.powi(5) / 233_174.0
    } else if year < 1920.0 {
        let t = year - 1900.0;
        -2.79 + 1.494119 * t - 0.0598939 * t * t + 0.0061966 * t.powi(3) - 0.000197 * t.powi(4)
    } else if year < 1941.0 {
        let t = year - 1920.0;
        21.20 + 0.84493 * t - 0.076100 * t * t + 0.0020936 * t.powi(3)
    } else if year < 1961.0 {
        let t = year - 1950.0;
        29.07 + 0.407 * t - t * t / 233.0 + t.powi(3) / 2547.0
    } else if year < 1986.0 {
        let t = year - 1975.0;
        45.45 + 1.067 * t - t * t / 260.0 - t.powi(3) / 718.0
    } else if year < 2005.0 {
        let t = year - 2000.0;
        63.86 + 0.3345 * t - 0.060374 * t * t
            + 0.0017275 * t.powi(3)
            + 0.000651814 * t.powi(4)
            + 0.00002373599 * t.powi(5)
    } else if year < 2050.0 {
        let t = year - 2000.0;
        62.92 + 0.32217 * t + 0.005589 * t * t
    } else if year < 2150.0 {
        let u = (year - 1820.0) / 100.0;
        -20.0 + 32.0 * u * u - 0.5628 * (2150.0 - year)
    } else {
        let u = (year - 1820.0) / 100.0;
        -20.0 + 32.0 * u * u
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_model_values() {
        assert_relative_eq!(delta_t_model(2000.0), 63.86, epsilon = 0.01);
        assert!(delta_t_model(1970.0) > 0.0);
        assert!(delta_t_model(1800.0) > 0.0);
        assert!(delta_t_model(-1000.0) > 20_000.0);
    }

    #[test]
    fn test_interpolation() {
        let table =
            DeltaTTable::from_year_entries(vec![(2000.0, 63.8), (2010.0, 66.1), (2020.0, 69.4)])
                .unwrap();
        let mid = table.delta_t_at_day((2005.0 - 2000.0) * 365.2425);
        assert!(!mid.extrapolated);
        assert_relative_eq!(mid.seconds, (63.8 + 66.1) / 2.0, epsilon = 1e-9);

        let exact = table.delta_t_at_day((2010.0 - 2000.0) * 365.2425);
        assert_relative_eq!(exact.seconds, 66.1, epsilon = 1e-9);
    }

    #[test]
    fn test_extrapolation_flag() {
        let table = DeltaTTable::from_year_entries(vec![(2000.0, 63.8), (2020.0, 69.4)]).unwrap();
        assert!(!table.delta_t_at_day(1000.0).extrapolated);
        assert!(table.delta_t_at_day(-100_000.0).extrapolated);
        assert!(table.delta_t_at_day(100_000.0).extrapolated);
        assert!(DeltaTTable::empty().delta_t_at_day(0.0).extrapolated);
    }

    #[test]
    fn test_tabulated_rejects_out_of_range() {
        let table = DeltaTTable::from_year_entries(vec![(2000.0, 63.8), (2020.0, 69.4)]).unwrap();
        assert!(table.delta_t_tabulated(1000.0).is_ok());
        assert!(matches!(
            table.delta_t_tabulated(100_000.0),
            Err(Error::OutOfTableRange { .. })
        ));
        assert!(DeltaTTable::empty().delta_t_tabulated(0.0).is_err());
    }

    #[test]
    fn test_rejects_unordered_epochs() {
        assert!(DeltaTTable::new(vec![(10.0, 1.0), (5.0, 2.0)]).is_err());
        assert!(DeltaTTable::new(vec![(10.0, 1.0), (10.0, 2.0)]).is_err());
    }
}
