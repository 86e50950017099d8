//! Elementwise adapters over `ndarray` for batch conversions
//!
//! Scalar conversions stay the source of truth; these wrappers apply them
//! across arrays with NumPy-style broadcasting and keep element order
//! strictly unchanged. Batch entry points never fail as a whole on bad
//! elements where a validity mask can report them instead.

use crate::calendar::{day_from_ymd, ymd_from_day};
use crate::errors::{Error, Result};
use crate::iso::{parse_datetime, ParseConfig};
use crate::scales::{ScaleConverter, TimeScale};
use log::debug;
use ndarray::{Array1, ArrayD, ArrayViewD, IxDyn, Zip};

/// Broadcast two shapes under right-aligned NumPy rules: dimensions must be
/// equal or one of them 1
pub fn broadcast_shape(left: &[usize], right: &[usize]) -> Result<Vec<usize>> {
    let ndim = left.len().max(right.len());
    let mut shape = vec![0usize; ndim];
    for i in 0..ndim {
        let l = if i < ndim - left.len() {
            1
        } else {
            left[i - (ndim - left.len())]
        };
        let r = if i < ndim - right.len() {
            1
        } else {
            right[i - (ndim - right.len())]
        };
        shape[i] = match (l, r) {
            (l, r) if l == r => l,
            (1, r) => r,
            (l, 1) => l,
            _ => {
                return Err(Error::ShapeMismatch {
                    left: left.to_vec(),
                    right: right.to_vec(),
                })
            }
        };
    }
    Ok(shape)
}

fn broadcast_to<'a, T>(array: &'a ArrayD<T>, shape: &[usize]) -> Result<ArrayViewD<'a, T>> {
    array
        .broadcast(IxDyn(shape))
        .ok_or_else(|| Error::ShapeMismatch {
            left: array.shape().to_vec(),
            right: shape.to_vec(),
        })
}

/// Elementwise [`day_from_ymd`] with broadcasting.
///
/// Fails on the first invalid calendar date; use scalar calls when
/// per-element recovery is needed.
pub fn days_from_ymd(
    years: &ArrayD<i64>,
    months: &ArrayD<i64>,
    days: &ArrayD<i64>,
) -> Result<ArrayD<i64>> {
    let shape = broadcast_shape(
        &broadcast_shape(years.shape(), months.shape())?,
        days.shape(),
    )?;
    let years = broadcast_to(years, &shape)?;
    let months = broadcast_to(months, &shape)?;
    let days = broadcast_to(days, &shape)?;

    let mut out = ArrayD::zeros(IxDyn(&shape));
    let mut first_err = None;
    Zip::from(&mut out)
        .and(&years)
        .and(&months)
        .and(&days)
        .for_each(|slot, &y, &m, &d| {
            if first_err.is_some() {
                return;
            }
            match day_from_ymd(y, m as u32, d as u32) {
                Ok(day) => *slot = day,
                Err(err) => first_err = Some(err),
            }
        });
    match first_err {
        Some(err) => Err(err),
        None => Ok(out),
    }
}

/// Elementwise [`ymd_from_day`]; returns (years, months, days) with the
/// input's shape
pub fn ymd_from_days(days: &ArrayD<i64>) -> (ArrayD<i64>, ArrayD<i64>, ArrayD<i64>) {
    let mut years = ArrayD::zeros(days.raw_dim());
    let mut months = ArrayD::zeros(days.raw_dim());
    let mut doms = ArrayD::zeros(days.raw_dim());
    Zip::from(&mut years)
        .and(&mut months)
        .and(&mut doms)
        .and(days)
        .for_each(|y, m, d, &day| {
            let (yy, mm, dd) = ymd_from_day(day);
            *y = yy;
            *m = i64::from(mm);
            *d = i64::from(dd);
        });
    (years, months, doms)
}

/// Result of parsing a batch of ISO 8601 literals
#[derive(Debug, Clone)]
pub struct ParsedBatch {
    /// UTC day numbers; 0 where the literal failed to parse
    pub days: Array1<i64>,
    /// UTC seconds of day; NaN where the literal failed to parse
    pub secs: Array1<f64>,
    /// True where the literal parsed and resolved
    pub valid: Array1<bool>,
}

/// Parse a batch of date-time literals into UTC day/sec pairs.
///
/// A malformed element sets its validity flag false and sentinel outputs
/// (0 / NaN) without disturbing the elements around it.
pub fn parse_day_secs(inputs: &[&str], config: &ParseConfig) -> ParsedBatch {
    let mut days = Array1::zeros(inputs.len());
    let mut secs = Array1::from_elem(inputs.len(), f64::NAN);
    let mut valid = Array1::from_elem(inputs.len(), false);
    for (i, input) in inputs.iter().enumerate() {
        let resolved = parse_datetime(input, config)
            .and_then(|rec| rec.resolve(config.reference.as_ref()));
        match resolved {
            Ok(resolved) => {
                let (day, sec) = resolved.utc_day_sec();
                days[i] = day;
                secs[i] = sec;
                valid[i] = true;
            }
            Err(err) => {
                debug!("batch element {} ({:?}) failed: {}", i, input, err);
            }
        }
    }
    ParsedBatch { days, secs, valid }
}

/// Elementwise time-scale conversion of pseudo-continuous second counts.
///
/// NaN inputs propagate as NaN outputs with the mask false.
pub fn convert_batch(
    values: &ArrayD<f64>,
    from: TimeScale,
    to: TimeScale,
    converter: &ScaleConverter,
) -> (ArrayD<f64>, ArrayD<bool>) {
    let mut out = ArrayD::zeros(values.raw_dim());
    let mut mask = ArrayD::from_elem(values.raw_dim(), true);
    Zip::from(&mut out)
        .and(&mut mask)
        .and(values)
        .for_each(|o, ok, &v| {
            if v.is_nan() {
                *o = f64::NAN;
                *ok = false;
            } else {
                *o = converter.convert(v, from, to);
            }
        });
    (out, mask)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_broadcast_shape() {
        assert_eq!(broadcast_shape(&[3, 1], &[4]).unwrap(), vec![3, 4]);
        assert_eq!(broadcast_shape(&[5], &[5]).unwrap(), vec![5]);
        assert_eq!(broadcast_shape(&[], &[2, 3]).unwrap(), vec![2, 3]);
        assert!(matches!(
            broadcast_shape(&[3], &[4]),
            Err(Error::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_days_from_ymd_broadcasts() {
        let years = array![[2000i64], [2001]].into_dyn();
        let months = array![1i64, 2].into_dyn();
        let days = array![1i64, 1].into_dyn();
        let out = days_from_ymd(&years, &months, &days).unwrap();
        assert_eq!(out.shape(), &[2, 2]);
        assert_eq!(out[[0, 0]], 0); // 2000-01-01
        assert_eq!(out[[0, 1]], 31); // 2000-02-01
        assert_eq!(out[[1, 0]], 366); // 2001-01-01
    }

    #[test]
    fn test_days_from_ymd_rejects_bad_date() {
        let years = array![2001i64].into_dyn();
        let months = array![2i64].into_dyn();
        let days = array![29i64].into_dyn();
        assert!(days_from_ymd(&years, &months, &days).is_err());
    }

    #[test]
    fn test_ymd_round_trip_preserves_order() {
        let days = array![0i64, -2512, 7305, -36524].into_dyn();
        let (y, m, d) = ymd_from_days(&days);
        let back = days_from_ymd(&y, &m, &d).unwrap();
        assert_eq!(back, days);
        assert_eq!(y[[1]], 1993);
        assert_eq!(m[[1]], 2);
        assert_eq!(d[[1]], 14);
    }

    #[test]
    fn test_parse_day_secs_masks_bad_elements() {
        let batch = parse_day_secs(
            &["1993-02-14T13:10:30", "not a date", "2000-01-01"],
            &ParseConfig::default(),
        );
        assert_eq!(batch.valid.to_vec(), vec![true, false, true]);
        assert_eq!(batch.days[0], -2512);
        assert_relative_eq!(batch.secs[0], 47430.0);
        assert!(batch.secs[1].is_nan());
        assert_eq!(batch.days[1], 0);
        assert_eq!(batch.days[2], 0);
        assert_relative_eq!(batch.secs[2], 0.0);
    }

    #[test]
    fn test_convert_batch_propagates_nan() {
        let converter = ScaleConverter::with_builtin_tables();
        let values = array![0.0, f64::NAN, 86_400.0].into_dyn();
        let (out, mask) = convert_batch(&values, TimeScale::Tai, TimeScale::Tt, &converter);
        assert_relative_eq!(out[[0]], 32.184, epsilon = 1e-12);
        assert!(out[[1]].is_nan());
        assert_relative_eq!(out[[2]], 86_432.184, epsilon = 1e-9);
        assert_eq!(
            mask.iter().copied().collect::<Vec<_>>(),
            vec![true, false, true]
        );
    }
}
