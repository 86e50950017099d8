//! Calendar conversions between dates and continuous day numbers
//!
//! Every date is represented by an integer day number, where day 0 is
//! January 1, 2000. The proleptic Gregorian calendar is used throughout the
//! high-level API; proleptic Julian-calendar conversions are available as
//! separate functions for callers modeling pre-1582 civil dates.
//!
//! Years before 1 CE follow the astronomical convention with a year zero:
//! 1 BCE is year 0, 2 BCE is year -1, and so on.
//!
//! All arithmetic is exact integer arithmetic; no floating-point day counts
//! are involved, so conversions do not drift across millennia.

use crate::constants::{FEB29_1BCE_GREGORIAN, FEB29_1BCE_JULIAN, JDN_OF_JAN_1_2000};
use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};

/// A calendar date in one of the three interchangeable representations
///
/// All three variants map bijectively to the same day number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CalendarDate {
    /// Year, month (1-12), day of month (1-31)
    Ymd { year: i64, month: u32, day: u32 },
    /// Year and day of year (1-366)
    Ordinal { year: i64, day_of_year: u32 },
    /// ISO week date: year, week (1-53), weekday (Monday=1 .. Sunday=7)
    Week { year: i64, week: u32, weekday: u32 },
}

/// Selects the representation produced by [`day_to_date`] and [`jdn_to_date`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStyle {
    /// Year, month, day of month
    Ymd,
    /// Year, day of year
    Ordinal,
    /// ISO week date
    Week,
}

impl CalendarDate {
    /// The representation style of this date
    pub fn style(&self) -> DateStyle {
        match self {
            CalendarDate::Ymd { .. } => DateStyle::Ymd,
            CalendarDate::Ordinal { .. } => DateStyle::Ordinal,
            CalendarDate::Week { .. } => DateStyle::Week,
        }
    }
}

/// True if the year is a leap year in the proleptic Gregorian calendar
pub fn is_leap_year(year: i64) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Number of days in the year (365 or 366)
pub fn days_in_year(year: i64) -> u32 {
    if is_leap_year(year) {
        366
    } else {
        365
    }
}

/// Number of days in a month of the proleptic Gregorian calendar
pub fn days_in_month(year: i64, month: u32) -> Result<u32> {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => Ok(31),
        4 | 6 | 9 | 11 => Ok(30),
        2 => Ok(if is_leap_year(year) { 29 } else { 28 }),
        _ => Err(Error::InvalidCalendarDate(format!(
            "month {} is not in 1-12",
            month
        ))),
    }
}

/// Day number from year, month, and day of month
///
/// The month-shift arithmetic treats March as the first month of the year and
/// February as the last, so leap days fall at the end of the shifted year.
pub fn day_from_ymd(year: i64, month: u32, day: u32) -> Result<i64> {
    let max = days_in_month(year, month)?;
    if day < 1 || day > max {
        return Err(Error::InvalidCalendarDate(format!(
            "day {} is not in 1-{} for {:04}-{:02}",
            day, max, year, month
        )));
    }
    Ok(day_from_ymd_unchecked(year, i64::from(month), i64::from(day)))
}

fn day_from_ymd_unchecked(year: i64, month: i64, day: i64) -> i64 {
    let mm = (month + 9) % 12; // March becomes month 0, February month 11
    let yy = year - mm / 10;

    // 365*yy + floor-corrections counts elapsed days from the end of
    // February, 1 BCE to the end of February of year yy; (mm*306 + 5)/10
    // counts the days from the end of February to the end of month mm.
    365 * yy + yy.div_euclid(4) - yy.div_euclid(100) + yy.div_euclid(400)
        + (mm * 306 + 5) / 10
        + day
        + FEB29_1BCE_GREGORIAN
}

/// Year, month, and day of month from a day number
pub fn ymd_from_day(day: i64) -> (i64, u32, u32) {
    let g = day + 730_425; // elapsed days after March 1, 1 BCE
    let mut y = (10_000 * g + 14_780).div_euclid(3_652_425);
    let mut doy = g - gregorian_days_to_march1(y);
    if doy < 0 {
        y -= 1;
        doy = g - gregorian_days_to_march1(y);
    }
    finish_ymd(y, doy)
}

fn gregorian_days_to_march1(y: i64) -> i64 {
    365 * y + y.div_euclid(4) - y.div_euclid(100) + y.div_euclid(400)
}

fn finish_ymd(mut y: i64, doy: i64) -> (i64, u32, u32) {
    let m0 = (100 * doy + 52) / 3060; // m0 == 0 for March
    let m = (m0 + 2) % 12 + 1;
    y += (m0 + 2) / 12;
    let d = doy - (m0 * 306 + 5) / 10 + 1;
    (y, m as u32, d as u32)
}

/// Day number from year, month, and day in the proleptic Julian calendar
///
/// Every year divisible by four is a leap year, extrapolated indefinitely in
/// both directions. The returned day number shares the Gregorian zero point
/// (day 0 = Gregorian 2000-01-01).
pub fn day_from_ymd_julian(year: i64, month: u32, day: u32) -> Result<i64> {
    let max = match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if year % 4 == 0 {
                29
            } else {
                28
            }
        }
        _ => {
            return Err(Error::InvalidCalendarDate(format!(
                "month {} is not in 1-12",
                month
            )))
        }
    };
    if day < 1 || day > max {
        return Err(Error::InvalidCalendarDate(format!(
            "day {} is not in 1-{} for Julian {:04}-{:02}",
            day, max, year, month
        )));
    }

    let (month, day) = (i64::from(month), i64::from(day));
    let mm = (month + 9) % 12;
    let yy = year - mm / 10;
    Ok(365 * yy + yy.div_euclid(4) + (mm * 306 + 5) / 10 + day + FEB29_1BCE_JULIAN)
}

/// Year, month, and day from a day number in the proleptic Julian calendar
pub fn ymd_from_day_julian(day: i64) -> (i64, u32, u32) {
    let g = day + 730_427;
    let mut y = (100 * g + 75).div_euclid(36_525);
    let mut doy = g - (365 * y + y.div_euclid(4));
    if doy < 0 {
        y -= 1;
        doy = g - (365 * y + y.div_euclid(4));
    }
    finish_ymd(y, doy)
}

/// Day number from year and day of year (1-366)
pub fn day_from_yd(year: i64, day_of_year: u32) -> Result<i64> {
    if day_of_year < 1 || day_of_year > days_in_year(year) {
        return Err(Error::InvalidCalendarDate(format!(
            "day of year {} is not in 1-{} for year {}",
            day_of_year,
            days_in_year(year),
            year
        )));
    }
    Ok(day_from_ymd_unchecked(year, 1, 1) + i64::from(day_of_year) - 1)
}

/// Year and day of year from a day number
pub fn yd_from_day(day: i64) -> (i64, u32) {
    let (y, _, _) = ymd_from_day(day);
    let doy = day - day_from_ymd_unchecked(y, 1, 1) + 1;
    (y, doy as u32)
}

/// ISO weekday of a day number (Monday=1 .. Sunday=7)
pub fn weekday_from_day(day: i64) -> u32 {
    ((day + 5).rem_euclid(7) + 1) as u32
}

/// Day number of the Monday starting ISO week 1 of the given year
///
/// Week 1 is the week containing January 4 (equivalently, the first Thursday
/// of the year).
fn week1_monday(year: i64) -> i64 {
    let jan4 = day_from_ymd_unchecked(year, 1, 4);
    jan4 - i64::from(weekday_from_day(jan4) - 1)
}

/// Number of ISO weeks in a year (52 or 53)
pub fn iso_week_count(year: i64) -> u32 {
    ((week1_monday(year + 1) - week1_monday(year)) / 7) as u32
}

/// Day number from an ISO week date
pub fn day_from_ywd(year: i64, week: u32, weekday: u32) -> Result<i64> {
    if weekday < 1 || weekday > 7 {
        return Err(Error::InvalidCalendarDate(format!(
            "weekday {} is not in 1-7",
            weekday
        )));
    }
    let weeks = iso_week_count(year);
    if week < 1 || week > weeks {
        return Err(Error::InvalidCalendarDate(format!(
            "week {} is not in 1-{} for year {}",
            week, weeks, year
        )));
    }
    Ok(week1_monday(year) + 7 * i64::from(week - 1) + i64::from(weekday - 1))
}

/// ISO week date from a day number
pub fn ywd_from_day(day: i64) -> (i64, u32, u32) {
    let (mut year, _, _) = ymd_from_day(day);
    if day >= week1_monday(year + 1) {
        year += 1;
    } else if day < week1_monday(year) {
        year -= 1;
    }
    let week = ((day - week1_monday(year)) / 7 + 1) as u32;
    (year, week, weekday_from_day(day))
}

/// Number of elapsed months since January 2000
pub fn month_from_ym(year: i64, month: u32) -> Result<i64> {
    if month < 1 || month > 12 {
        return Err(Error::InvalidCalendarDate(format!(
            "month {} is not in 1-12",
            month
        )));
    }
    Ok(12 * (year - 2000) + i64::from(month) - 1)
}

/// Year and month from the number of elapsed months since January 2000
pub fn ym_from_month(months: i64) -> (i64, u32) {
    let y = months.div_euclid(12);
    let m = months - 12 * y;
    (y + 2000, (m + 1) as u32)
}

/// Day number for a calendar date in any representation
pub fn date_to_day(date: &CalendarDate) -> Result<i64> {
    match *date {
        CalendarDate::Ymd { year, month, day } => day_from_ymd(year, month, day),
        CalendarDate::Ordinal { year, day_of_year } => day_from_yd(year, day_of_year),
        CalendarDate::Week {
            year,
            week,
            weekday,
        } => day_from_ywd(year, week, weekday),
    }
}

/// Calendar date in the requested representation for a day number
pub fn day_to_date(day: i64, style: DateStyle) -> CalendarDate {
    match style {
        DateStyle::Ymd => {
            let (year, month, day) = ymd_from_day(day);
            CalendarDate::Ymd { year, month, day }
        }
        DateStyle::Ordinal => {
            let (year, day_of_year) = yd_from_day(day);
            CalendarDate::Ordinal { year, day_of_year }
        }
        DateStyle::Week => {
            let (year, week, weekday) = ywd_from_day(day);
            CalendarDate::Week {
                year,
                week,
                weekday,
            }
        }
    }
}

/// Integer Julian Day Number for a calendar date
///
/// The JDN is the astronomical noon-based label of the civil day; JDN
/// 2451545 labels 2000-01-01.
pub fn date_to_jdn(date: &CalendarDate) -> Result<i64> {
    Ok(date_to_day(date)? + JDN_OF_JAN_1_2000)
}

/// Calendar date in the requested representation for an integer JDN
pub fn jdn_to_date(jdn: i64, style: DateStyle) -> CalendarDate {
    day_to_date(jdn - JDN_OF_JAN_1_2000, style)
}
