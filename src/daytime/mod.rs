//! Splitting continuous day counts into calendar day + time-of-day
//!
//! A UTC instant is a pair (integer day number, seconds of day). On a day
//! containing an inserted leap second the seconds-of-day range extends to
//! [0, 86401). JD and MJD have day-length ticks: their value always grows by
//! exactly one from one midnight to the next, so on leap-second days the
//! fractional rate runs slightly slow. All JD/MJD conversions here take the
//! leap-second table so that mapping is honored.

use crate::constants::{JD_MINUS_MJD, MJD_OF_JAN_1_2000};
use crate::errors::{Error, Result};
use crate::tables::LeapSecondTable;
use serde::{Deserialize, Serialize};

/// A UTC instant as an integer day number plus seconds of day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DaySec {
    /// Day number, day 0 = 2000-01-01
    pub day: i64,
    /// Elapsed seconds within the day
    pub sec: f64,
}

impl DaySec {
    /// Create a pair and normalize it against the given leap-second table
    pub fn new(day: i64, sec: f64, leap: &LeapSecondTable) -> Self {
        Self { day, sec }.normalized(leap)
    }

    /// Carry seconds overflow/underflow into the day number, honoring the
    /// varying length of leap-second days.
    ///
    /// A pair written as 24:00:00 (sec == seconds_on_day) normalizes to the
    /// start of the next day.
    pub fn normalized(mut self, leap: &LeapSecondTable) -> Self {
        while self.sec < 0.0 {
            self.day -= 1;
            self.sec += leap.seconds_on_day(self.day);
        }
        loop {
            let len = leap.seconds_on_day(self.day);
            if self.sec < len {
                break;
            }
            self.sec -= len;
            self.day += 1;
        }
        self
    }
}

/// Hours, minutes, and seconds within a day
///
/// The second component absorbs any leap second, so it ranges over [0, 61)
/// on a day with an inserted second.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeOfDay {
    pub hour: u32,
    pub minute: u32,
    pub second: f64,
}

/// Time-of-day for a seconds-of-day value
///
/// Hours cap at 23 and minutes at 59 so that seconds beyond 86399 fold into
/// the 23:59:6x leap-second representation.
pub fn hms_from_sec(sec: f64) -> TimeOfDay {
    let hour = ((sec / 3600.0) as u32).min(23);
    let minute = (((sec - 3600.0 * hour as f64) / 60.0) as u32).min(59);
    let second = sec - 3600.0 * hour as f64 - 60.0 * minute as f64;
    TimeOfDay {
        hour,
        minute,
        second,
    }
}

/// Seconds-of-day for an hour/minute/second triple
///
/// Hour 24 is accepted with zero minutes and seconds (end-of-day midnight);
/// second 60 is accepted for leap seconds. The result may therefore need
/// [`DaySec::normalized`] to fold into the following day.
pub fn sec_from_hms(hour: u32, minute: u32, second: f64) -> Result<f64> {
    if hour > 24 || (hour == 24 && (minute != 0 || second != 0.0)) {
        return Err(Error::InvalidCalendarDate(format!(
            "hour {} out of range",
            hour
        )));
    }
    if minute > 59 {
        return Err(Error::InvalidCalendarDate(format!(
            "minute {} out of range",
            minute
        )));
    }
    if !(0.0..61.0).contains(&second) {
        return Err(Error::InvalidCalendarDate(format!(
            "second {} out of range",
            second
        )));
    }
    Ok(3600.0 * hour as f64 + 60.0 * minute as f64 + second)
}

/// Modified Julian Date for an integer UTC day number
pub fn mjd_from_day(day: i64) -> i64 {
    day + MJD_OF_JAN_1_2000
}

/// Integer UTC day number for an integer Modified Julian Date
pub fn day_from_mjd(mjd: i64) -> i64 {
    mjd - MJD_OF_JAN_1_2000
}

/// UTC Modified Julian Date for a day/sec pair
pub fn mjd_from_day_sec(day: i64, sec: f64, leap: &LeapSecondTable) -> f64 {
    day as f64 + sec / leap.seconds_on_day(day) + MJD_OF_JAN_1_2000 as f64
}

/// UTC day number and seconds for a Modified Julian Date
pub fn day_sec_from_mjd(mjd: f64, leap: &LeapSecondTable) -> (i64, f64) {
    let int_mjd = mjd.floor();
    let day = int_mjd as i64 - MJD_OF_JAN_1_2000;
    let sec = leap.seconds_on_day(day) * (mjd - int_mjd);
    (day, sec)
}

/// UTC Julian Date for a day/sec pair
pub fn jd_from_day_sec(day: i64, sec: f64, leap: &LeapSecondTable) -> f64 {
    mjd_from_day_sec(day, sec, leap) + JD_MINUS_MJD
}

/// UTC day number and seconds for a Julian Date
pub fn day_sec_from_jd(jd: f64, leap: &LeapSecondTable) -> (i64, f64) {
    day_sec_from_mjd(jd - JD_MINUS_MJD, leap)
}
