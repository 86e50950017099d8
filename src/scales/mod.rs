//! Conversions between the UTC, TAI, TT, TDB, and UT1 time scales
//!
//! Every instant is a count of seconds past 2000-01-01T00:00:00 of its own
//! scale. All conversions route through TAI as the canonical hub:
//!
//! ```text
//! UTC <-(leap seconds)-> TAI <-(32.184 s)-> TT <-(sine series)-> TDB
//!                                            \--(delta-T)------> UT1
//! ```
//!
//! The correction terms do not commute at floating-point precision, so this
//! single path is fixed: converting between any two scales always composes
//! the edges above, and identical inputs with identical tables produce
//! bit-identical outputs.
//!
//! A scalar UTC float cannot represent an instant inside an inserted leap
//! second (23:59:60 collides with the following midnight), so the lossless
//! UTC endpoints are the day/sec pair functions; the float endpoints use the
//! pseudo-continuous count `day * 86400 + sec`.

use crate::calendar::{day_from_ymd, ymd_from_day};
use crate::constants::{DAY_S, TT_MINUS_TAI_S};
use crate::daytime::{hms_from_sec, sec_from_hms};
use crate::errors::Result;
use crate::tables::{DeltaTTable, LeapSecondTable};
use chrono::{DateTime, Datelike, TimeZone, Timelike, Utc};
use log::debug;

/// A physical time scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeScale {
    /// Coordinated Universal Time
    Utc,
    /// International Atomic Time
    Tai,
    /// Terrestrial Time (formerly TDT)
    Tt,
    /// Barycentric Dynamical Time
    Tdb,
    /// Universal Time (Earth rotation)
    Ut1,
}

/// Converts instants between time scales using injected tables
///
/// Immutable after construction; safe to share across threads.
#[derive(Debug, Clone)]
pub struct ScaleConverter {
    leap: LeapSecondTable,
    delta_t: DeltaTTable,
}

impl ScaleConverter {
    /// Create a converter from explicit tables
    pub fn new(leap: LeapSecondTable, delta_t: DeltaTTable) -> Self {
        Self { leap, delta_t }
    }

    /// Converter with the built-in leap-second list and the polynomial
    /// delta-T model
    pub fn with_builtin_tables() -> Self {
        Self::new(LeapSecondTable::builtin().clone(), DeltaTTable::empty())
    }

    /// The leap-second table in use
    pub fn leap_seconds(&self) -> &LeapSecondTable {
        &self.leap
    }

    /// The delta-T table in use
    pub fn delta_t_table(&self) -> &DeltaTTable {
        &self.delta_t
    }

    // ---- UTC <-> TAI ----------------------------------------------------

    /// TAI seconds for a UTC day/sec pair (the lossless UTC endpoint)
    pub fn tai_from_day_sec(&self, day: i64, sec: f64) -> f64 {
        self.leap.tai_seconds_from_day_sec(day, sec)
    }

    /// UTC day/sec pair for a TAI instant
    pub fn day_sec_from_tai(&self, tai: f64) -> (i64, f64) {
        self.leap.day_sec_from_tai_seconds(tai)
    }

    /// TAI seconds for a pseudo-continuous UTC count
    pub fn tai_from_utc(&self, utc: f64) -> f64 {
        let day = (utc / DAY_S).floor();
        self.tai_from_day_sec(day as i64, utc - day * DAY_S)
    }

    /// Pseudo-continuous UTC count for a TAI instant
    pub fn utc_from_tai(&self, tai: f64) -> f64 {
        let (day, sec) = self.day_sec_from_tai(tai);
        day as f64 * DAY_S + sec
    }

    // ---- TAI <-> TT ------------------------------------------------------

    /// TT seconds for a TAI instant (fixed 32.184 s offset)
    pub fn tt_from_tai(&self, tai: f64) -> f64 {
        tai + TT_MINUS_TAI_S
    }

    /// TAI seconds for a TT instant
    pub fn tai_from_tt(&self, tt: f64) -> f64 {
        tt - TT_MINUS_TAI_S
    }

    // ---- TT <-> TDB ------------------------------------------------------

    /// TDB seconds for a TT instant
    pub fn tdb_from_tt(&self, tt: f64) -> f64 {
        tt + tdb_minus_tt(tt / DAY_S)
    }

    /// TT seconds for a TDB instant.
    ///
    /// The sine series is evaluated at TDB and refined with one fixed-point
    /// iteration; the residual is far below the series' own accuracy.
    pub fn tt_from_tdb(&self, tdb: f64) -> f64 {
        let tt = tdb - tdb_minus_tt(tdb / DAY_S);
        tdb - tdb_minus_tt(tt / DAY_S)
    }

    // ---- TT <-> UT1 ------------------------------------------------------

    /// UT1 seconds for a TT instant, via delta-T
    pub fn ut1_from_tt(&self, tt: f64) -> f64 {
        tt - self.delta_t.delta_t_at_day(tt / DAY_S).seconds
    }

    /// TT seconds for a UT1 instant.
    ///
    /// Delta-T is tabulated against TT, so the inverse starts from the UT1
    /// value and refines once; delta-T varies by far less than a second per
    /// day, so one pass converges.
    pub fn tt_from_ut1(&self, ut1: f64) -> f64 {
        let tt = ut1 + self.delta_t.delta_t_at_day(ut1 / DAY_S).seconds;
        ut1 + self.delta_t.delta_t_at_day(tt / DAY_S).seconds
    }

    // ---- Composed conversions -------------------------------------------

    /// TDB seconds for a TAI instant (via TT)
    pub fn tdb_from_tai(&self, tai: f64) -> f64 {
        self.tdb_from_tt(self.tt_from_tai(tai))
    }

    /// TAI seconds for a TDB instant (via TT)
    pub fn tai_from_tdb(&self, tdb: f64) -> f64 {
        self.tai_from_tt(self.tt_from_tdb(tdb))
    }

    /// UT1 seconds for a TAI instant (via TT)
    pub fn ut1_from_tai(&self, tai: f64) -> f64 {
        self.ut1_from_tt(self.tt_from_tai(tai))
    }

    /// TAI seconds for a UT1 instant (via TT)
    pub fn tai_from_ut1(&self, ut1: f64) -> f64 {
        self.tai_from_tt(self.tt_from_ut1(ut1))
    }

    /// TAI seconds for an instant in any scale
    pub fn tai_from_time(&self, time: f64, scale: TimeScale) -> f64 {
        match scale {
            TimeScale::Utc => self.tai_from_utc(time),
            TimeScale::Tai => time,
            TimeScale::Tt => self.tai_from_tt(time),
            TimeScale::Tdb => self.tai_from_tdb(time),
            TimeScale::Ut1 => self.tai_from_ut1(time),
        }
    }

    /// Instant in any scale for a TAI value
    pub fn time_from_tai(&self, tai: f64, scale: TimeScale) -> f64 {
        match scale {
            TimeScale::Utc => self.utc_from_tai(tai),
            TimeScale::Tai => tai,
            TimeScale::Tt => self.tt_from_tai(tai),
            TimeScale::Tdb => self.tdb_from_tai(tai),
            TimeScale::Ut1 => self.ut1_from_tai(tai),
        }
    }

    /// Convert an instant between any two scales through the canonical TAI
    /// path
    pub fn convert(&self, time: f64, from: TimeScale, to: TimeScale) -> f64 {
        if from == to {
            return time;
        }
        debug!("converting {:?} -> TAI -> {:?}", from, to);
        self.time_from_tai(self.tai_from_time(time, from), to)
    }

    /// UTC day/sec pair for an instant in any scale
    pub fn utc_day_sec_from_time(&self, time: f64, scale: TimeScale) -> (i64, f64) {
        self.day_sec_from_tai(self.tai_from_time(time, scale))
    }

    /// Instant in any scale for a UTC day/sec pair
    pub fn time_from_utc_day_sec(&self, day: i64, sec: f64, scale: TimeScale) -> f64 {
        self.time_from_tai(self.tai_from_day_sec(day, sec), scale)
    }

    // ---- chrono interop --------------------------------------------------

    /// UTC day/sec pair for a chrono datetime
    pub fn day_sec_from_datetime(&self, dt: &DateTime<Utc>) -> Result<(i64, f64)> {
        let day = day_from_ymd(i64::from(dt.year()), dt.month(), dt.day())?;
        // chrono folds a leap second into nanosecond values >= 1e9
        let second = dt.second() as f64 + dt.nanosecond() as f64 / 1e9;
        let sec = sec_from_hms(dt.hour(), dt.minute(), second)?;
        Ok((day, sec))
    }

    /// chrono datetime for a UTC day/sec pair, when representable
    pub fn datetime_from_day_sec(&self, day: i64, sec: f64) -> Option<DateTime<Utc>> {
        let (y, m, d) = ymd_from_day(day);
        let hms = hms_from_sec(sec);
        let whole = hms.second.floor();
        let mut nanos = ((hms.second - whole) * 1e9).round() as u32;
        let mut second = whole as u32;
        if second >= 60 {
            // chrono's leap-second representation
            nanos += (second - 59) * 1_000_000_000;
            second = 59;
        }
        Utc.with_ymd_and_hms(y as i32, m, d, hms.hour, hms.minute, second)
            .single()
            .map(|dt| dt.with_nanosecond(nanos).unwrap_or(dt))
    }
}

/// TDB minus TT in seconds at the given TT day number
///
/// USNO Circular 179, eq. 2.6: a sub-millisecond periodic relativistic
/// correction, a closed-form function of time only.
pub fn tdb_minus_tt(tt_day: f64) -> f64 {
    let t = (tt_day - 0.5) / 36_525.0; // Julian centuries past J2000 (noon)

    0.001657 * f64::sin(628.3076 * t + 6.2401)
        + 0.000022 * f64::sin(575.3385 * t + 4.2970)
        + 0.000014 * f64::sin(1256.6152 * t + 6.1969)
        + 0.000005 * f64::sin(606.9777 * t + 4.0212)
        + 0.000005 * f64::sin(52.9691 * t + 0.4444)
        + 0.000002 * f64::sin(21.3299 * t + 5.5431)
        + 0.000010 * t * f64::sin(628.3076 * t + 4.2490)
}
