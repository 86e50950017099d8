//! End-to-end checks across the public API: literal round trips, equivalent
//! date styles, leap-second behavior, and batch conversions.

use approx::assert_relative_eq;
use ndarray::array;
use tempora::arrays::{convert_batch, parse_day_secs};
use tempora::calendar::{day_from_ymd, day_to_date, CalendarDate};
use tempora::daytime::{jd_from_day_sec, mjd_from_day_sec, DaySec};
use tempora::iso::{
    format_record, iso_from_day_sec, parse, parse_datetime, parse_period, FormatConfig, IsoValue,
    ParseConfig,
};
use tempora::{DateStyle, ScaleConverter, TimeScale};

fn cfg() -> ParseConfig {
    ParseConfig::default()
}

#[test]
fn equivalent_styles_name_the_same_day() {
    let day = day_from_ymd(1993, 2, 14).unwrap();
    for literal in ["1993-02-14", "1993-W06-7", "1993045", "1993-045", "1993W067"] {
        let rec = parse_datetime(literal, &cfg()).unwrap();
        assert_eq!(rec.resolve(None).unwrap().day, day, "{}", literal);
    }
    assert_eq!(
        day_to_date(day, DateStyle::Week),
        CalendarDate::Week {
            year: 1993,
            week: 6,
            weekday: 7
        }
    );
}

#[test]
fn literal_round_trip_preserves_layout() {
    for literal in [
        "1993-02-14T13:10:30",
        "19930214T131030",
        "1993-W06-7",
        "13:10:30Z",
        "--02-14",
    ] {
        let rec = parse_datetime(literal, &cfg()).unwrap();
        let out = format_record(&rec, &FormatConfig::matching(&rec)).unwrap();
        assert_eq!(out, literal);
    }
}

#[test]
fn one_second_period() {
    let period = parse_period("1993-02-14T13:10:30/1993-02-14T13:10:31", &cfg()).unwrap();
    assert_relative_eq!(period.duration_seconds(None).unwrap(), 1.0);
}

#[test]
fn two_weeks_is_fourteen_days() {
    match parse("P2W", &cfg()).unwrap() {
        IsoValue::Duration(dur) => {
            assert_eq!(dur.weeks, Some(2.0));
            assert_eq!(dur.to_days(), Some(14.0));
        }
        other => panic!("expected a duration, got {:?}", other),
    }
}

#[test]
fn utc_tai_steps_across_leap_boundary() {
    let converter = ScaleConverter::with_builtin_tables();
    // 2016-12-31 (day 6209) carried an inserted leap second
    let before = converter.tai_from_day_sec(6209, 86_400.0);
    let inside = converter.tai_from_day_sec(6209, 86_400.5);
    let after = converter.tai_from_day_sec(6210, 0.0);
    assert_relative_eq!(inside - before, 0.5, epsilon = 1e-9);
    assert_relative_eq!(after - before, 1.0, epsilon = 1e-9);

    // The inverse lands back inside the leap second
    let (day, sec) = converter.day_sec_from_tai(inside);
    assert_eq!(day, 6209);
    assert_relative_eq!(sec, 86_400.5, epsilon = 1e-6);
}

#[test]
fn mjd_ticks_once_per_civil_day() {
    let converter = ScaleConverter::with_builtin_tables();
    let leap = converter.leap_seconds();
    let start = mjd_from_day_sec(6209, 0.0, leap);
    let next = mjd_from_day_sec(6210, 0.0, leap);
    assert_relative_eq!(next - start, 1.0, epsilon = 1e-12);
    assert_relative_eq!(
        jd_from_day_sec(0, 43_200.0, leap),
        2_451_545.0,
        epsilon = 1e-9
    );
}

#[test]
fn midnight_24_normalizes_to_next_day() {
    let converter = ScaleConverter::with_builtin_tables();
    let rec = parse_datetime("1993-02-14T24:00:00", &cfg()).unwrap();
    let resolved = rec.resolve(None).unwrap();
    assert_eq!((resolved.day, resolved.sec), (-2511, 0.0));

    let pair = DaySec::new(-2512, 86_400.0, converter.leap_seconds());
    assert_eq!((pair.day, pair.sec), (-2511, 0.0));

    // And the formatter can spell the same instant either way
    let cfg = FormatConfig {
        midnight: tempora::iso::MidnightMode::EndOfDay,
        ..FormatConfig::default()
    };
    assert_eq!(
        iso_from_day_sec(-2511, 0.0, &cfg).unwrap(),
        "1993-02-14T24:00:00"
    );
}

#[test]
fn batch_masks_only_the_malformed_element() {
    let batch = parse_day_secs(
        &[
            "2000-01-01T00:00:00",
            "1993-02-14T13:10:30",
            "totally wrong",
            "2016-12-31T23:59:60",
        ],
        &cfg(),
    );
    assert_eq!(batch.valid.to_vec(), vec![true, true, false, true]);
    assert_eq!(batch.days.to_vec(), vec![0, -2512, 0, 6209]);
    assert_relative_eq!(batch.secs[1], 47_430.0);
    assert!(batch.secs[2].is_nan());
    assert_relative_eq!(batch.secs[3], 86_400.0);
}

#[test]
fn batch_scale_conversion() {
    let converter = ScaleConverter::with_builtin_tables();
    let values = array![0.0, f64::NAN].into_dyn();
    let (out, mask) = convert_batch(&values, TimeScale::Tai, TimeScale::Tt, &converter);
    assert_relative_eq!(out[[0]], 32.184, epsilon = 1e-12);
    assert!(out[[1]].is_nan());
    assert_eq!(mask.iter().copied().collect::<Vec<_>>(), vec![true, false]);
}

#[test]
fn scale_conversions_are_consistent() {
    let converter = ScaleConverter::with_builtin_tables();
    for &scale in &[
        TimeScale::Utc,
        TimeScale::Tai,
        TimeScale::Tt,
        TimeScale::Tdb,
        TimeScale::Ut1,
    ] {
        let t = converter.convert(1_234_567.0, TimeScale::Tai, scale);
        let back = converter.convert(t, scale, TimeScale::Tai);
        assert_relative_eq!(back, 1_234_567.0, epsilon = 1e-6);
    }
    // TDB stays within 2 ms of TT
    let tdb = converter.convert(0.0, TimeScale::Tt, TimeScale::Tdb);
    assert!(tdb.abs() < 2e-3);
}
