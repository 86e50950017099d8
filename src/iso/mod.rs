//! ISO 8601:1988 date/time/duration records, parsing, and formatting
//!
//! The central type is [`IsoRecord`], a sparse structure in which every
//! field is independently present or absent. Absent is distinct from zero:
//! `13:10` has no second field, which is not the same as `13:10:00`, and the
//! distinction survives a parse/format round trip. The permitted textual
//! forms, including reduced-precision and truncated ones, are handled by the
//! [`parser`] and [`format`] submodules.

pub mod format;
pub mod parser;

use crate::calendar::{
    day_from_yd, day_from_ymd, day_from_ywd, days_in_month, ymd_from_day,
};
use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};

pub use format::{
    format_duration, format_record, iso_from_day, iso_from_day_sec, DecimalSign, FormatConfig,
    MidnightMode, Precision,
};
pub use parser::{
    parse, parse_date, parse_datetime, parse_duration, parse_period, parse_time, ParseConfig,
};

/// Basic (no separators) vs extended (with `-` and `:`) format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Layout {
    Basic,
    Extended,
}

impl Default for Layout {
    fn default() -> Self {
        Layout::Basic
    }
}

/// A parsed time-zone designator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Zone {
    /// The `Z` suffix
    Utc,
    /// A numeric offset from UTC
    Offset {
        /// Signed offset in minutes
        minutes: i32,
        /// Whether the minutes part was written (`+hhmm` vs `+hh`)
        with_minutes: bool,
        /// Whether the offset used the extended `+hh:mm` form
        extended: bool,
    },
}

impl Zone {
    /// Signed offset from UTC in minutes (zero for `Z`)
    pub fn offset_minutes(&self) -> i32 {
        match *self {
            Zone::Utc => 0,
            Zone::Offset { minutes, .. } => minutes,
        }
    }
}

/// A partially populated ISO 8601 date/time record
///
/// Each field is present only if the source literal (or the constructing
/// code) supplied it. Leading fields may be absent only in the defined
/// truncated forms; [`IsoRecord::resolve`] fills them from a reference
/// record or fails with [`Error::AmbiguousTruncation`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IsoRecord {
    /// Century when only a two-digit century form (`19`) was given
    pub century: Option<i64>,
    /// Full year
    pub year: Option<i64>,
    /// Two-digit year with elided century (truncated forms)
    pub year_of_century: Option<u32>,
    /// Month 1-12
    pub month: Option<u32>,
    /// Day of month 1-31
    pub day: Option<u32>,
    /// Day of year 1-366 (ordinal-date forms)
    pub ordinal_day: Option<u32>,
    /// ISO week 1-53 (week-date forms)
    pub week: Option<u32>,
    /// ISO weekday 1-7 (week-date forms)
    pub weekday: Option<u32>,
    /// Hour; fractional when the literal had a fractional hour
    pub hour: Option<f64>,
    /// Minute; fractional when the literal had a fractional minute
    pub minute: Option<f64>,
    /// Second, possibly fractional; 60.x inside a leap second
    pub second: Option<f64>,
    /// Time-zone designator
    pub zone: Option<Zone>,
    /// Basic or extended rendering of the source literal
    pub layout: Layout,
}

/// A fully resolved instant: day number, seconds of day, and zone
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedDateTime {
    /// Day number (day 0 = 2000-01-01) in the record's own zone
    pub day: i64,
    /// Seconds of day in the record's own zone
    pub sec: f64,
    /// Zone offset in minutes, if the record carried a designator
    pub zone_minutes: Option<i32>,
}

impl ResolvedDateTime {
    /// The instant as a UTC day/sec pair, folding in the zone offset.
    ///
    /// With no offset the pair is returned untouched, so a leap second
    /// (sec = 86400.x) survives. Offset folds carry with the nominal
    /// 86400-second day; leap-second-exact carries are the day/time
    /// splitter's concern.
    pub fn utc_day_sec(&self) -> (i64, f64) {
        let offset = self.zone_minutes.unwrap_or(0);
        if offset == 0 {
            return (self.day, self.sec);
        }
        let mut day = self.day;
        let mut sec = self.sec - 60.0 * f64::from(offset);
        while sec < 0.0 {
            day -= 1;
            sec += 86_400.0;
        }
        while sec >= 86_400.0 {
            day += 1;
            sec -= 86_400.0;
        }
        (day, sec)
    }
}

impl IsoRecord {
    /// True if any date field is present
    pub fn has_date(&self) -> bool {
        self.century.is_some()
            || self.year.is_some()
            || self.year_of_century.is_some()
            || self.month.is_some()
            || self.day.is_some()
            || self.ordinal_day.is_some()
            || self.week.is_some()
            || self.weekday.is_some()
    }

    /// True if any time field is present
    pub fn has_time(&self) -> bool {
        self.hour.is_some() || self.minute.is_some() || self.second.is_some()
    }

    /// True if the record uses a truncated form with elided leading fields
    pub fn is_truncated(&self) -> bool {
        let year_known = self.year.is_some() || self.century.is_some();
        if self.year_of_century.is_some() {
            return true;
        }
        if !year_known
            && (self.month.is_some()
                || self.day.is_some()
                || self.ordinal_day.is_some()
                || self.week.is_some()
                || self.weekday.is_some())
        {
            return true;
        }
        // Truncated time forms: minute or second without the fields above it
        (self.hour.is_none() && (self.minute.is_some() || self.second.is_some()))
            || (self.minute.is_none() && self.second.is_some() && self.has_date())
    }

    /// The full year, combining whichever year fields are present with the
    /// reference record when the century is elided
    fn full_year(&self, reference: Option<&IsoRecord>) -> Result<Option<i64>> {
        if let Some(y) = self.year {
            return Ok(Some(y));
        }
        if let Some(c) = self.century {
            return Ok(Some(c * 100));
        }
        if let Some(yc) = self.year_of_century {
            let reference = reference.ok_or_else(|| {
                Error::AmbiguousTruncation(format!("two-digit year {:02}", yc))
            })?;
            let ref_year = reference.year.ok_or_else(|| {
                Error::AmbiguousTruncation("reference record has no year".into())
            })?;
            return Ok(Some(ref_year.div_euclid(100) * 100 + i64::from(yc)));
        }
        Ok(None)
    }

    /// Resolve the record to a day number and seconds of day.
    ///
    /// Components elided by truncation are inherited from `reference`;
    /// absent trailing components default to their minimum (January 1, day
    /// 1, Monday, 00:00:00). A truncated record with no reference fails
    /// with [`Error::AmbiguousTruncation`].
    pub fn resolve(&self, reference: Option<&IsoRecord>) -> Result<ResolvedDateTime> {
        let day = self.resolve_day(reference)?;
        let sec = self.resolve_sec()?;

        // 24:00:00 is the end-of-day spelling of the next midnight
        let (day, sec) = if self.hour == Some(24.0) {
            (day + 1, 0.0)
        } else {
            (day, sec)
        };

        Ok(ResolvedDateTime {
            day,
            sec,
            zone_minutes: self.zone.map(|z| z.offset_minutes()),
        })
    }

    fn resolve_day(&self, reference: Option<&IsoRecord>) -> Result<i64> {
        let year = self.full_year(reference)?;

        // Week-date forms
        if self.week.is_some() || (self.weekday.is_some() && !self.has_month_or_ordinal()) {
            let year = match year {
                Some(y) => y,
                None => reference
                    .and_then(|r| r.year)
                    .ok_or_else(|| Error::AmbiguousTruncation("elided week year".into()))?,
            };
            let week = match self.week {
                Some(w) => w,
                None => reference
                    .and_then(|r| r.week)
                    .ok_or_else(|| Error::AmbiguousTruncation("elided week number".into()))?,
            };
            let weekday = self.weekday.unwrap_or(1);
            return day_from_ywd(year, week, weekday);
        }

        // Ordinal forms
        if let Some(doy) = self.ordinal_day {
            let year = match year {
                Some(y) => y,
                None => reference
                    .and_then(|r| r.year)
                    .ok_or_else(|| Error::AmbiguousTruncation("elided ordinal year".into()))?,
            };
            return day_from_yd(year, doy);
        }

        // Calendar forms
        let (year, month) = match (year, self.month) {
            (Some(y), Some(m)) => (y, m),
            (Some(y), None) => (y, 1),
            (None, Some(m)) => {
                let y = reference
                    .and_then(|r| r.year)
                    .ok_or_else(|| Error::AmbiguousTruncation("elided year".into()))?;
                (y, m)
            }
            (None, None) => {
                if self.day.is_some() {
                    // ---DD inherits year and month
                    let r = reference.ok_or_else(|| {
                        Error::AmbiguousTruncation("elided year and month".into())
                    })?;
                    let y = r.year.ok_or_else(|| {
                        Error::AmbiguousTruncation("reference record has no year".into())
                    })?;
                    let m = r.month.ok_or_else(|| {
                        Error::AmbiguousTruncation("reference record has no month".into())
                    })?;
                    (y, m)
                } else if self.has_time() {
                    // Time-only record: the date comes wholly from the reference
                    let r = reference.ok_or_else(|| {
                        Error::AmbiguousTruncation("time-only value with no reference date".into())
                    })?;
                    return r.resolve_day(None);
                } else {
                    return Err(Error::UnrecognizedFormat("empty record".into()));
                }
            }
        };
        let day = self.day.unwrap_or(1);
        day_from_ymd(year, month, day)
    }

    fn has_month_or_ordinal(&self) -> bool {
        self.month.is_some() || self.ordinal_day.is_some()
    }

    fn resolve_sec(&self) -> Result<f64> {
        let hour = self.hour.unwrap_or(0.0);
        let minute = self.minute.unwrap_or(0.0);
        let second = self.second.unwrap_or(0.0);
        if hour > 24.0 || (hour == 24.0 && (minute != 0.0 || second != 0.0)) {
            return Err(Error::InvalidCalendarDate(format!(
                "hour {} out of range",
                hour
            )));
        }
        if minute >= 60.0 {
            return Err(Error::InvalidCalendarDate(format!(
                "minute {} out of range",
                minute
            )));
        }
        if second >= 61.0 {
            return Err(Error::InvalidCalendarDate(format!(
                "second {} out of range",
                second
            )));
        }
        Ok(3600.0 * hour + 60.0 * minute + second)
    }

    /// Fill this record's missing leading fields from `start`, the period
    /// end-inheritance rule: a shorter end representation inherits the
    /// corresponding leading fields, and a missing zone, from the start.
    pub fn inherit_from(&self, start: &IsoRecord) -> IsoRecord {
        let mut rec = self.clone();
        if !rec.has_date() && rec.has_time() {
            rec.century = start.century;
            rec.year = start.year;
            rec.year_of_century = start.year_of_century;
            rec.month = start.month;
            rec.day = start.day;
            rec.ordinal_day = start.ordinal_day;
            rec.week = start.week;
            rec.weekday = start.weekday;
        } else {
            if rec.year.is_none() && rec.century.is_none() {
                if let Some(yc) = rec.year_of_century {
                    if let Some(sy) = start.year {
                        rec.year = Some(sy.div_euclid(100) * 100 + i64::from(yc));
                        rec.year_of_century = None;
                    }
                } else {
                    rec.year = start.year;
                    rec.century = start.century;
                }
            }
            if rec.month.is_none() && rec.day.is_some() {
                rec.month = start.month;
            }
            if rec.week.is_none() && rec.weekday.is_some() && !rec.has_month_or_ordinal() {
                rec.week = start.week;
            }
        }
        if rec.zone.is_none() {
            rec.zone = start.zone;
        }
        rec
    }

    /// A record carrying a complete calendar date, for use as a parsing
    /// reference or as a building block for formatting
    pub fn from_ymd(year: i64, month: u32, day: u32) -> Result<IsoRecord> {
        // Validate eagerly so a bad reference fails at construction
        day_from_ymd(year, month, day)?;
        Ok(IsoRecord {
            year: Some(year),
            month: Some(month),
            day: Some(day),
            ..IsoRecord::default()
        })
    }

    /// A complete calendar-date record for a day number
    pub fn from_day(day_number: i64) -> IsoRecord {
        let (year, month, day) = ymd_from_day(day_number);
        IsoRecord {
            year: Some(year),
            month: Some(month),
            day: Some(day),
            ..IsoRecord::default()
        }
    }
}

/// A free-form ISO 8601 duration (`PnYnMnDTnHnMnS` or `PnW`)
///
/// Fields are kept exactly as written; no reinterpretation (a month is
/// never silently turned into 30 days).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IsoDuration {
    pub years: Option<f64>,
    pub months: Option<f64>,
    pub weeks: Option<f64>,
    pub days: Option<f64>,
    pub hours: Option<f64>,
    pub minutes: Option<f64>,
    pub seconds: Option<f64>,
}

impl IsoDuration {
    /// The duration as an exact day count, when it is calendar-independent
    /// (no year or month components)
    pub fn to_days(&self) -> Option<f64> {
        if self.years.is_some() || self.months.is_some() {
            return None;
        }
        Some(
            7.0 * self.weeks.unwrap_or(0.0)
                + self.days.unwrap_or(0.0)
                + self.hours.unwrap_or(0.0) / 24.0
                + self.minutes.unwrap_or(0.0) / 1440.0
                + self.seconds.unwrap_or(0.0) / 86_400.0,
        )
    }

    /// Add the duration to a day/sec instant.
    ///
    /// Year and month components move through the calendar (clamping the
    /// day of month when the target month is shorter); the remaining
    /// components are exact day and second arithmetic on nominal 86400-second
    /// days. A fractional year or month count has no fixed length, so it is
    /// rejected rather than resolved to a wrong instant.
    pub fn add_to_day_sec(&self, day: i64, sec: f64) -> Result<(i64, f64)> {
        let mut day = day;
        if self.years.is_some() || self.months.is_some() {
            if self.years.map_or(false, |v| v.fract() != 0.0)
                || self.months.map_or(false, |v| v.fract() != 0.0)
            {
                return Err(Error::InvalidCalendarDate(
                    "fractional years or months do not name an exact calendar day".into(),
                ));
            }
            let (y, m, d) = ymd_from_day(day);
            let months = 12 * y + i64::from(m) - 1
                + 12 * self.years.unwrap_or(0.0) as i64
                + self.months.unwrap_or(0.0) as i64;
            let ny = months.div_euclid(12);
            let nm = (months - 12 * ny + 1) as u32;
            let nd = d.min(days_in_month(ny, nm)?);
            day = day_from_ymd(ny, nm, nd)?;
        }
        day += 7 * self.weeks.unwrap_or(0.0) as i64 + self.days.unwrap_or(0.0) as i64;

        let mut sec = sec
            + 3600.0 * self.hours.unwrap_or(0.0)
            + 60.0 * self.minutes.unwrap_or(0.0)
            + self.seconds.unwrap_or(0.0)
            + 86_400.0
                * (7.0 * self.weeks.unwrap_or(0.0).fract()
                    + self.days.unwrap_or(0.0).fract());
        while sec >= 86_400.0 {
            day += 1;
            sec -= 86_400.0;
        }
        while sec < 0.0 {
            day -= 1;
            sec += 86_400.0;
        }
        Ok((day, sec))
    }

    /// Negated copy of this duration
    pub fn negated(&self) -> IsoDuration {
        IsoDuration {
            years: self.years.map(|v| -v),
            months: self.months.map(|v| -v),
            weeks: self.weeks.map(|v| -v),
            days: self.days.map(|v| -v),
            hours: self.hours.map(|v| -v),
            minutes: self.minutes.map(|v| -v),
            seconds: self.seconds.map(|v| -v),
        }
    }
}

/// A time interval in one of the three ISO period notations
#[derive(Debug, Clone, PartialEq)]
pub enum IsoPeriod {
    /// `start/end`
    StartEnd { start: IsoRecord, end: IsoRecord },
    /// `start/duration`
    StartDuration {
        start: IsoRecord,
        duration: IsoDuration,
    },
    /// `duration/end`
    DurationEnd {
        duration: IsoDuration,
        end: IsoRecord,
    },
}

impl IsoPeriod {
    /// Resolve the interval bounds as UTC day/sec pairs
    pub fn bounds(&self, reference: Option<&IsoRecord>) -> Result<((i64, f64), (i64, f64))> {
        match self {
            IsoPeriod::StartEnd { start, end } => {
                let s = start.resolve(reference)?.utc_day_sec();
                let e = end.resolve(reference)?.utc_day_sec();
                Ok((s, e))
            }
            IsoPeriod::StartDuration { start, duration } => {
                let s = start.resolve(reference)?.utc_day_sec();
                let e = duration.add_to_day_sec(s.0, s.1)?;
                Ok((s, e))
            }
            IsoPeriod::DurationEnd { duration, end } => {
                let e = end.resolve(reference)?.utc_day_sec();
                let s = duration.negated().add_to_day_sec(e.0, e.1)?;
                Ok((s, e))
            }
        }
    }

    /// Interval length in nominal seconds (86400-second days)
    pub fn duration_seconds(&self, reference: Option<&IsoRecord>) -> Result<f64> {
        let ((d0, s0), (d1, s1)) = self.bounds(reference)?;
        Ok(86_400.0 * (d1 - d0) as f64 + (s1 - s0))
    }
}

/// Any value the top-level parser can produce
#[derive(Debug, Clone, PartialEq)]
pub enum IsoValue {
    /// A date, a time, or a combined date-time
    DateTime(IsoRecord),
    /// A free-form duration
    Duration(IsoDuration),
    /// A period (interval)
    Period(Box<IsoPeriod>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_complete_record() {
        let rec = IsoRecord {
            year: Some(1993),
            month: Some(2),
            day: Some(14),
            hour: Some(13.0),
            minute: Some(10.0),
            second: Some(30.0),
            ..IsoRecord::default()
        };
        let resolved = rec.resolve(None).unwrap();
        assert_eq!(resolved.day, -2512);
        assert_eq!(resolved.sec, 47430.0);
        assert_eq!(resolved.zone_minutes, None);
    }

    #[test]
    fn test_resolve_defaults_trailing() {
        let rec = IsoRecord {
            year: Some(1993),
            ..IsoRecord::default()
        };
        // Year alone resolves to January 1
        assert_eq!(rec.resolve(None).unwrap().day, -2556);
    }

    #[test]
    fn test_truncated_needs_reference() {
        let rec = IsoRecord {
            year_of_century: Some(93),
            month: Some(2),
            day: Some(14),
            ..IsoRecord::default()
        };
        assert!(matches!(
            rec.resolve(None),
            Err(Error::AmbiguousTruncation(_))
        ));

        let reference = IsoRecord::from_ymd(1995, 6, 1).unwrap();
        assert_eq!(rec.resolve(Some(&reference)).unwrap().day, -2512);
    }

    #[test]
    fn test_midnight_end_of_day() {
        let rec = IsoRecord {
            year: Some(1993),
            month: Some(2),
            day: Some(14),
            hour: Some(24.0),
            minute: Some(0.0),
            second: Some(0.0),
            ..IsoRecord::default()
        };
        let resolved = rec.resolve(None).unwrap();
        assert_eq!(resolved.day, -2511); // 1993-02-15
        assert_eq!(resolved.sec, 0.0);
    }

    #[test]
    fn test_zone_fold() {
        let rec = IsoRecord {
            year: Some(2000),
            month: Some(1),
            day: Some(1),
            hour: Some(0.0),
            minute: Some(30.0),
            zone: Some(Zone::Offset {
                minutes: 60,
                with_minutes: true,
                extended: true,
            }),
            ..IsoRecord::default()
        };
        // 00:30+01:00 is 23:30 UTC the previous day
        let (day, sec) = rec.resolve(None).unwrap().utc_day_sec();
        assert_eq!(day, -1);
        assert_eq!(sec, 84_600.0);
    }

    #[test]
    fn test_duration_to_days() {
        let two_weeks = IsoDuration {
            weeks: Some(2.0),
            ..IsoDuration::default()
        };
        assert_eq!(two_weeks.to_days(), Some(14.0));

        let with_months = IsoDuration {
            months: Some(1.0),
            ..IsoDuration::default()
        };
        assert_eq!(with_months.to_days(), None);
    }

    #[test]
    fn test_duration_calendar_add() {
        let d = IsoDuration {
            years: Some(1.0),
            months: Some(1.0),
            ..IsoDuration::default()
        };
        // 2003-12-31 + P1Y1M clamps to 2005-01-31
        let start = day_from_ymd(2003, 12, 31).unwrap();
        let (day, _) = d.add_to_day_sec(start, 0.0).unwrap();
        assert_eq!(ymd_from_day(day), (2005, 1, 31));

        // 2004-01-31 + P1M clamps to 2004-02-29
        let d = IsoDuration {
            months: Some(1.0),
            ..IsoDuration::default()
        };
        let start = day_from_ymd(2004, 1, 31).unwrap();
        let (day, _) = d.add_to_day_sec(start, 0.0).unwrap();
        assert_eq!(ymd_from_day(day), (2004, 2, 29));
    }

    #[test]
    fn test_fractional_year_month_add_rejected() {
        let half_year = IsoDuration {
            years: Some(0.5),
            ..IsoDuration::default()
        };
        assert!(half_year.add_to_day_sec(0, 0.0).is_err());

        // A period built on such a duration fails rather than collapsing
        // to a zero-length interval
        let period = IsoPeriod::StartDuration {
            start: IsoRecord::from_ymd(2000, 1, 1).unwrap(),
            duration: half_year,
        };
        assert!(matches!(
            period.bounds(None),
            Err(Error::InvalidCalendarDate(_))
        ));

        // Fractional weeks and days stay exact arithmetic
        let d = IsoDuration {
            days: Some(1.5),
            ..IsoDuration::default()
        };
        let (day, sec) = d.add_to_day_sec(0, 0.0).unwrap();
        assert_eq!(day, 1);
        assert_eq!(sec, 43_200.0);
    }

    #[test]
    fn test_period_inheritance() {
        let start = IsoRecord {
            year: Some(1993),
            month: Some(2),
            day: Some(14),
            hour: Some(13.0),
            minute: Some(10.0),
            zone: Some(Zone::Utc),
            ..IsoRecord::default()
        };
        let end = IsoRecord {
            hour: Some(15.0),
            minute: Some(30.0),
            ..IsoRecord::default()
        };
        let inherited = end.inherit_from(&start);
        assert_eq!(inherited.year, Some(1993));
        assert_eq!(inherited.month, Some(2));
        assert_eq!(inherited.day, Some(14));
        assert_eq!(inherited.zone, Some(Zone::Utc));
        assert_eq!(inherited.hour, Some(15.0));
    }
}
