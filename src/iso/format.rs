//! Rendering [`IsoRecord`] values back into ISO 8601 text
//!
//! Formatting is driven by a [`FormatConfig`]: basic or extended layout,
//! the lowest component to emit, fractional places on that component, and
//! the decimal sign. [`FormatConfig::matching`] derives a config from a
//! parsed record so that parse/format round trips reproduce the literal.

use crate::calendar::{day_to_date, CalendarDate, DateStyle};
use crate::daytime::hms_from_sec;
use crate::errors::{Error, Result};
use crate::iso::{IsoDuration, IsoRecord, Layout, Zone};

/// Lowest date/time component to include in formatted output
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precision {
    Year,
    /// Month of a calendar date, week of a week date
    Month,
    Day,
    Hour,
    Minute,
    Second,
}

/// Decimal sign used for fractional components
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecimalSign {
    Comma,
    Period,
}

/// How to render exact midnight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MidnightMode {
    /// `00:00:00` on the day that begins
    StartOfDay,
    /// `24:00:00` on the day that ends
    EndOfDay,
}

/// Formatting options
#[derive(Debug, Clone)]
pub struct FormatConfig {
    pub layout: Layout,
    pub precision: Precision,
    /// Fractional places on the lowest emitted component
    pub places: usize,
    pub decimal: DecimalSign,
    pub midnight: MidnightMode,
    /// Permit truncated output (elided leading fields) for records that
    /// lack them; without this flag such records fail to format
    pub truncated: bool,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            layout: Layout::Extended,
            precision: Precision::Second,
            places: 0,
            decimal: DecimalSign::Period,
            midnight: MidnightMode::StartOfDay,
            truncated: false,
        }
    }
}

impl FormatConfig {
    /// A config that reproduces the layout, precision, and truncation of a
    /// parsed record (fractional places excepted)
    pub fn matching(rec: &IsoRecord) -> Self {
        let precision = if rec.second.is_some() {
            Precision::Second
        } else if rec.minute.is_some() {
            Precision::Minute
        } else if rec.hour.is_some() {
            Precision::Hour
        } else if rec.day.is_some() || rec.weekday.is_some() || rec.ordinal_day.is_some() {
            Precision::Day
        } else if rec.month.is_some() || rec.week.is_some() {
            Precision::Month
        } else {
            Precision::Year
        };
        Self {
            layout: rec.layout,
            precision,
            truncated: rec.is_truncated(),
            ..Self::default()
        }
    }
}

/// Render a record per the config
pub fn format_record(rec: &IsoRecord, cfg: &FormatConfig) -> Result<String> {
    let mut out = String::new();
    let wrote_date = if rec.has_date() {
        format_date(rec, cfg, &mut out)?;
        true
    } else {
        false
    };
    if rec.has_time() && cfg.precision >= Precision::Hour {
        if wrote_date {
            out.push('T');
        }
        format_time(rec, cfg, &mut out)?;
        if let Some(zone) = rec.zone {
            push_zone(&mut out, zone, cfg.layout == Layout::Extended);
        }
    } else if !wrote_date {
        return Err(Error::UnrecognizedFormat(
            "record has no components to format".into(),
        ));
    }
    Ok(out)
}

fn format_date(rec: &IsoRecord, cfg: &FormatConfig, out: &mut String) -> Result<()> {
    let ext = cfg.layout == Layout::Extended;
    let require_truncated = |what: &str| -> Result<()> {
        if cfg.truncated {
            Ok(())
        } else {
            Err(Error::AmbiguousTruncation(format!(
                "cannot format a record with an elided {} unless truncated output is enabled",
                what
            )))
        }
    };

    let week_style = rec.week.is_some()
        || (rec.weekday.is_some() && rec.month.is_none() && rec.ordinal_day.is_none());
    let ordinal_style = !week_style && rec.ordinal_day.is_some();

    // Year prefix, shared by all three styles
    let wrote_year = if let Some(y) = rec.year {
        if (0..=9999).contains(&y) {
            out.push_str(&format!("{:04}", y));
        } else {
            out.push_str(&y.to_string());
        }
        true
    } else if let Some(c) = rec.century {
        out.push_str(&format!("{:02}", c));
        return Ok(());
    } else if let Some(yc) = rec.year_of_century {
        require_truncated("century")?;
        // Year-month keeps its leading hyphen; year-month-day does not
        if !week_style && !ordinal_style && rec.day.is_none() {
            out.push('-');
        }
        out.push_str(&format!("{:02}", yc));
        true
    } else {
        require_truncated("year")?;
        out.push('-');
        false
    };

    if week_style {
        let week = rec.week.ok_or_else(|| {
            Error::UnrecognizedFormat("weekday without a week number".into())
        })?;
        if cfg.precision >= Precision::Month {
            if ext && wrote_year {
                out.push('-');
            }
            out.push_str(&format!("W{:02}", week));
            if cfg.precision >= Precision::Day {
                if let Some(wd) = rec.weekday {
                    if ext {
                        out.push('-');
                    }
                    out.push_str(&wd.to_string());
                }
            }
        }
        return Ok(());
    }

    if ordinal_style {
        if cfg.precision >= Precision::Day {
            if ext && wrote_year {
                out.push('-');
            }
            out.push_str(&format!("{:03}", rec.ordinal_day.unwrap_or(1)));
        }
        return Ok(());
    }

    // Calendar style
    if !wrote_year && rec.month.is_none() && rec.day.is_some() {
        out.push_str("--"); // third hyphen of ---DD
        out.push_str(&format!("{:02}", rec.day.unwrap_or(1)));
        return Ok(());
    }
    if !wrote_year {
        out.push('-'); // second hyphen of --MM
    }
    if cfg.precision >= Precision::Month {
        if let Some(m) = rec.month {
            if ext && wrote_year {
                out.push('-');
            }
            out.push_str(&format!("{:02}", m));
            if cfg.precision >= Precision::Day {
                if let Some(d) = rec.day {
                    if ext {
                        out.push('-');
                    }
                    out.push_str(&format!("{:02}", d));
                }
            }
        }
    }
    Ok(())
}

fn format_time(rec: &IsoRecord, cfg: &FormatConfig, out: &mut String) -> Result<()> {
    let ext = cfg.layout == Layout::Extended;
    let want_minute = cfg.precision >= Precision::Minute && rec.minute.is_some();
    let want_second = cfg.precision >= Precision::Second && rec.second.is_some();

    match rec.hour {
        Some(h) => {
            let places = if want_minute { 0 } else { cfg.places };
            push_component(out, h, 2, places, cfg.decimal);
        }
        None => {
            if !cfg.truncated {
                return Err(Error::AmbiguousTruncation(
                    "cannot format a time with an elided hour unless truncated output is enabled"
                        .into(),
                ));
            }
            out.push('-');
            if rec.minute.is_none() {
                out.push('-');
            }
        }
    }
    if want_minute {
        if ext && rec.hour.is_some() {
            out.push(':');
        }
        let places = if want_second { 0 } else { cfg.places };
        push_component(out, rec.minute.unwrap_or(0.0), 2, places, cfg.decimal);
    }
    if want_second {
        if ext && rec.minute.is_some() {
            out.push(':');
        }
        push_component(out, rec.second.unwrap_or(0.0), 2, cfg.places, cfg.decimal);
    }
    Ok(())
}

/// Zero-padded component with optional fractional places
fn push_component(out: &mut String, value: f64, digits: usize, places: usize, decimal: DecimalSign) {
    if places == 0 {
        out.push_str(&format!("{:0width$}", value.floor() as i64, width = digits));
    } else {
        let s = format!(
            "{:0width$.places$}",
            value,
            width = digits + 1 + places,
            places = places
        );
        match decimal {
            DecimalSign::Period => out.push_str(&s),
            DecimalSign::Comma => out.push_str(&s.replace('.', ",")),
        }
    }
}

fn push_zone(out: &mut String, zone: Zone, ext: bool) {
    match zone {
        Zone::Utc => out.push('Z'),
        Zone::Offset {
            minutes,
            with_minutes,
            ..
        } => {
            out.push(if minutes < 0 { '-' } else { '+' });
            let abs = minutes.abs();
            out.push_str(&format!("{:02}", abs / 60));
            if with_minutes || abs % 60 != 0 {
                if ext {
                    out.push(':');
                }
                out.push_str(&format!("{:02}", abs % 60));
            }
        }
    }
}

/// Render a duration; components keep the values they were built with
pub fn format_duration(dur: &IsoDuration, cfg: &FormatConfig) -> String {
    let mut out = String::from("P");
    let push = |out: &mut String, value: Option<f64>, letter: char| {
        if let Some(v) = value {
            if v.fract() == 0.0 {
                out.push_str(&format!("{}", v as i64));
            } else {
                let s = v.to_string();
                match cfg.decimal {
                    DecimalSign::Period => out.push_str(&s),
                    DecimalSign::Comma => out.push_str(&s.replace('.', ",")),
                }
            }
            out.push(letter);
        }
    };
    push(&mut out, dur.years, 'Y');
    push(&mut out, dur.months, 'M');
    push(&mut out, dur.weeks, 'W');
    push(&mut out, dur.days, 'D');
    if dur.hours.is_some() || dur.minutes.is_some() || dur.seconds.is_some() {
        out.push('T');
        push(&mut out, dur.hours, 'H');
        push(&mut out, dur.minutes, 'M');
        push(&mut out, dur.seconds, 'S');
    }
    if out == "P" {
        out.push_str("T0S");
    }
    out
}

/// Format a day number as a date in the given style
pub fn iso_from_day(day: i64, style: DateStyle, cfg: &FormatConfig) -> Result<String> {
    let rec = match day_to_date(day, style) {
        CalendarDate::Ymd { year, month, day } => IsoRecord {
            year: Some(year),
            month: Some(month),
            day: Some(day),
            ..IsoRecord::default()
        },
        CalendarDate::Ordinal { year, day_of_year } => IsoRecord {
            year: Some(year),
            ordinal_day: Some(day_of_year),
            ..IsoRecord::default()
        },
        CalendarDate::Week {
            year,
            week,
            weekday,
        } => IsoRecord {
            year: Some(year),
            week: Some(week),
            weekday: Some(weekday),
            ..IsoRecord::default()
        },
    };
    format_record(&rec, cfg)
}

/// Format a day/sec instant as a combined date-time.
///
/// Exact midnight renders as `24:00:00` on the previous day under
/// [`MidnightMode::EndOfDay`].
pub fn iso_from_day_sec(day: i64, sec: f64, cfg: &FormatConfig) -> Result<String> {
    let (day, hour, minute, second) = if cfg.midnight == MidnightMode::EndOfDay && sec == 0.0 {
        (day - 1, 24, 0, 0.0)
    } else {
        let hms = hms_from_sec(sec);
        (day, hms.hour, hms.minute, hms.second)
    };
    let mut rec = IsoRecord::from_day(day);
    rec.hour = Some(f64::from(hour));
    rec.minute = Some(f64::from(minute));
    rec.second = Some(second);
    format_record(&rec, cfg)
}
