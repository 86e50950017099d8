//! Recursive-descent parser for ISO 8601:1988 strings
//!
//! The grammar is disambiguated by the length of the leading digit run and
//! the number of leading hyphens, so no backtracking is needed for dates:
//! eight digits are `YYYYMMDD`, seven are `YYYYDDD`, six are the truncated
//! `YYMMDD`, five are `YYDDD`, four are a year, and two are a century.
//! Alternatives that do overlap (a period end such as `131031`) are tried
//! in a fixed order and the first success wins.
//!
//! Parsing is purely syntactic: it records which components the literal
//! supplied and leaves range validation to [`IsoRecord::resolve`].

use crate::errors::{Error, Result};
use crate::iso::{IsoDuration, IsoPeriod, IsoRecord, IsoValue, Layout, Zone};

/// Options controlling lenient and strict parser behavior
#[derive(Debug, Clone, Default)]
pub struct ParseConfig {
    /// Reference record supplying elided leading components of truncated
    /// forms when a caller resolves the result
    pub reference: Option<IsoRecord>,
    /// Accept a combined date-time with a space (or nothing) in place of
    /// the `T` separator when the split is unambiguous
    pub allow_missing_t: bool,
    /// Require a `+hh:mm`/`+hhmm` zone offset to match the layout of the
    /// time it follows
    pub strict_zone_layout: bool,
}

/// Parse any supported ISO 8601 value: date-time, duration, or period
pub fn parse(input: &str, config: &ParseConfig) -> Result<IsoValue> {
    let input = input.trim();
    if input.contains('/') {
        Ok(IsoValue::Period(Box::new(parse_period(input, config)?)))
    } else if input.starts_with('P') {
        Ok(IsoValue::Duration(parse_duration(input)?))
    } else {
        Ok(IsoValue::DateTime(parse_datetime(input, config)?))
    }
}

/// Parse a date, a time, or a combined date-time
pub fn parse_datetime(input: &str, config: &ParseConfig) -> Result<IsoRecord> {
    let input = input.trim();
    if input.is_empty() {
        return Err(Error::UnrecognizedFormat("empty string".into()));
    }
    if let Some(rest) = input.strip_prefix('T') {
        return time_only(rest, config);
    }
    if let Some(t_pos) = input.find('T') {
        return combine(&input[..t_pos], &input[t_pos + 1..], config);
    }
    match date_record(input) {
        Ok((mut rec, layout)) => {
            rec.layout = layout.unwrap_or_default();
            Ok(rec)
        }
        Err(date_err) => {
            if config.allow_missing_t {
                if let Some(sp) = input.find(' ') {
                    return combine(&input[..sp], input[sp + 1..].trim_start(), config);
                }
                // All-digit literal: an eight-digit calendar date followed
                // by a basic time is the only unambiguous split
                let run = input.bytes().take_while(u8::is_ascii_digit).count();
                if run >= 10 {
                    return combine(&input[..8], &input[8..], config);
                }
            }
            // A literal no date form can produce (colons, or a zone
            // designator) may still be a bare time; digit-only literals
            // keep resolving as dates first.
            if input.contains(':') || input.contains('Z') || input.contains('+') {
                if let Ok(rec) = time_only(input, config) {
                    return Ok(rec);
                }
            }
            Err(date_err)
        }
    }
}

/// Parse a date-only literal
pub fn parse_date(input: &str) -> Result<IsoRecord> {
    let (mut rec, layout) = date_record(input.trim())?;
    rec.layout = layout.unwrap_or_default();
    Ok(rec)
}

/// Parse a time-only literal, with or without the leading `T`
pub fn parse_time(input: &str, config: &ParseConfig) -> Result<IsoRecord> {
    let input = input.trim();
    time_only(input.strip_prefix('T').unwrap_or(input), config)
}

/// Parse a duration (`PnYnMnDTnHnMnS` or `PnW`)
pub fn parse_duration(input: &str) -> Result<IsoDuration> {
    let mut cur = Cursor::new(input.trim());
    if !cur.eat(b'P') {
        return Err(cur.fail("duration must begin with P"));
    }
    let mut dur = IsoDuration::default();
    let mut in_time = false;
    let mut stage = 0u8;
    let mut fraction_seen = false;
    let mut any = false;
    while !cur.done() {
        if !in_time && cur.eat(b'T') {
            if cur.done() {
                return Err(cur.fail("empty time part in duration"));
            }
            in_time = true;
            stage = 0;
            continue;
        }
        if fraction_seen {
            return Err(cur.fail("only the last duration component may carry a fraction"));
        }
        let n = cur.run_len();
        if n == 0 {
            return Err(cur.fail("expected digits in duration"));
        }
        let mut value = cur.digits_i64(n)? as f64;
        if let Some(frac) = cur.fraction()? {
            value += frac;
            fraction_seen = true;
        }
        let designator = cur.bump().ok_or_else(|| cur.fail("missing duration designator"))?;
        let (next_stage, slot) = match (in_time, designator) {
            (false, b'Y') => (1, &mut dur.years),
            (false, b'M') => (2, &mut dur.months),
            (false, b'W') => (3, &mut dur.weeks),
            (false, b'D') => (4, &mut dur.days),
            (true, b'H') => (1, &mut dur.hours),
            (true, b'M') => (2, &mut dur.minutes),
            (true, b'S') => (3, &mut dur.seconds),
            _ => return Err(cur.fail("unrecognized duration designator")),
        };
        if next_stage <= stage {
            return Err(cur.fail("duration components out of order"));
        }
        stage = next_stage;
        *slot = Some(value);
        any = true;
    }
    if !any {
        return Err(cur.fail("duration has no components"));
    }
    if dur.weeks.is_some()
        && (dur.years.is_some()
            || dur.months.is_some()
            || dur.days.is_some()
            || dur.hours.is_some()
            || dur.minutes.is_some()
            || dur.seconds.is_some())
    {
        return Err(Error::UnrecognizedFormat(
            "a week duration cannot be combined with other components".into(),
        ));
    }
    Ok(dur)
}

/// Parse a period in `start/end`, `start/duration`, or `duration/end` form
pub fn parse_period(input: &str, config: &ParseConfig) -> Result<IsoPeriod> {
    let input = input.trim();
    let (left, right) = input
        .split_once('/')
        .ok_or_else(|| Error::UnrecognizedFormat(format!("period without '/': {:?}", input)))?;
    if left.starts_with('P') {
        Ok(IsoPeriod::DurationEnd {
            duration: parse_duration(left)?,
            end: parse_datetime(right, config)?,
        })
    } else if right.starts_with('P') {
        Ok(IsoPeriod::StartDuration {
            start: parse_datetime(left, config)?,
            duration: parse_duration(right)?,
        })
    } else {
        let start = parse_datetime(left, config)?;
        let end = parse_period_end(&start, right, config)?;
        Ok(IsoPeriod::StartEnd { start, end })
    }
}

/// Parse the end of a `start/end` period, where a shorter representation
/// inherits leading fields from the start.
///
/// A digit-only end like `131031` parses equally well as a truncated date
/// and as a basic time; when the start carries a time it is read as a time,
/// matching the rule that the end repeats the start's trailing fields.
fn parse_period_end(start: &IsoRecord, s: &str, config: &ParseConfig) -> Result<IsoRecord> {
    match parse_datetime(s, config) {
        Ok(rec) => {
            if rec.is_truncated()
                && start.has_time()
                && !s.contains('-')
                && !s.contains('W')
                && !s.contains('T')
            {
                if let Ok(time_rec) = time_only(s, config) {
                    return Ok(time_rec.inherit_from(start));
                }
            }
            Ok(rec.inherit_from(start))
        }
        Err(err) => match time_only(s, config) {
            Ok(time_rec) => Ok(time_rec.inherit_from(start)),
            Err(_) => Err(err),
        },
    }
}

fn combine(date_part: &str, time_part: &str, config: &ParseConfig) -> Result<IsoRecord> {
    if date_part.starts_with('-') {
        return Err(Error::UnrecognizedFormat(
            "a date may not use leading-hyphen truncation when a time follows".into(),
        ));
    }
    if time_part.is_empty() {
        return Err(Error::UnrecognizedFormat("empty time after T".into()));
    }
    let (mut rec, date_layout) = date_record(date_part)?;
    let (time, time_layout) = time_record(time_part)?;
    if let (Some(d), Some(t)) = (date_layout, time_layout) {
        if d != t {
            return Err(Error::FormatMismatch(format!(
                "{:?} date combined with {:?} time",
                d, t
            )));
        }
    }
    rec.hour = time.hour;
    rec.minute = time.minute;
    rec.second = time.second;
    rec.zone = time.zone;
    let overall = date_layout.or(time_layout);
    check_zone_layout(rec.zone, overall, config)?;
    rec.layout = overall.unwrap_or_default();
    Ok(rec)
}

fn time_only(s: &str, config: &ParseConfig) -> Result<IsoRecord> {
    let (mut rec, layout) = time_record(s)?;
    check_zone_layout(rec.zone, layout, config)?;
    rec.layout = layout.unwrap_or_default();
    Ok(rec)
}

fn check_zone_layout(zone: Option<Zone>, layout: Option<Layout>, config: &ParseConfig) -> Result<()> {
    if !config.strict_zone_layout {
        return Ok(());
    }
    if let (
        Some(Zone::Offset {
            with_minutes: true,
            extended,
            ..
        }),
        Some(layout),
    ) = (zone, layout)
    {
        if extended != (layout == Layout::Extended) {
            return Err(Error::FormatMismatch(format!(
                "zone offset layout does not match the {:?} time",
                layout
            )));
        }
    }
    Ok(())
}

/// Parse a bare date, returning the record and its layout when the literal
/// determines one (single-component forms are layout-neutral)
fn date_record(s: &str) -> Result<(IsoRecord, Option<Layout>)> {
    let mut cur = Cursor::new(s);
    let mut rec = IsoRecord::default();
    let mut layout = None;

    let mut hyphens = 0;
    while hyphens < 3 && cur.eat(b'-') {
        hyphens += 1;
    }
    match hyphens {
        3 => {
            // ---DD
            rec.day = Some(cur.digits_u32(2)?);
        }
        2 => {
            // --MM, --MMDD, --MM-DD
            rec.month = Some(cur.digits_u32(2)?);
            if cur.eat(b'-') {
                rec.day = Some(cur.digits_u32(2)?);
                layout = Some(Layout::Extended);
            } else if cur.run_len() >= 2 {
                rec.day = Some(cur.digits_u32(2)?);
                layout = Some(Layout::Basic);
            }
        }
        1 => {
            if cur.eat(b'W') {
                // -Www, -WwwD, -Www-D
                rec.week = Some(cur.digits_u32(2)?);
                if cur.eat(b'-') {
                    rec.weekday = Some(cur.digits_u32(1)?);
                    layout = Some(Layout::Extended);
                } else if cur.run_len() >= 1 {
                    rec.weekday = Some(cur.digits_u32(1)?);
                    layout = Some(Layout::Basic);
                }
            } else {
                match cur.run_len() {
                    // -YY, -YY-MM
                    2 => {
                        rec.year_of_century = Some(cur.digits_u32(2)?);
                        if cur.eat(b'-') {
                            rec.month = Some(cur.digits_u32(2)?);
                            layout = Some(Layout::Extended);
                        }
                    }
                    // -DDD
                    3 => rec.ordinal_day = Some(cur.digits_u32(3)?),
                    // -YYMM
                    4 => {
                        rec.year_of_century = Some(cur.digits_u32(2)?);
                        rec.month = Some(cur.digits_u32(2)?);
                        layout = Some(Layout::Basic);
                    }
                    _ => return Err(cur.fail("unrecognized truncated date")),
                }
            }
        }
        _ => match cur.run_len() {
            8 => {
                rec.year = Some(cur.digits_i64(4)?);
                rec.month = Some(cur.digits_u32(2)?);
                rec.day = Some(cur.digits_u32(2)?);
                layout = Some(Layout::Basic);
            }
            7 => {
                rec.year = Some(cur.digits_i64(4)?);
                rec.ordinal_day = Some(cur.digits_u32(3)?);
                layout = Some(Layout::Basic);
            }
            6 => {
                rec.year_of_century = Some(cur.digits_u32(2)?);
                rec.month = Some(cur.digits_u32(2)?);
                rec.day = Some(cur.digits_u32(2)?);
                layout = Some(Layout::Basic);
            }
            5 => {
                rec.year_of_century = Some(cur.digits_u32(2)?);
                rec.ordinal_day = Some(cur.digits_u32(3)?);
                layout = Some(Layout::Basic);
            }
            4 => {
                rec.year = Some(cur.digits_i64(4)?);
                if cur.eat(b'-') {
                    layout = Some(Layout::Extended);
                    if cur.eat(b'W') {
                        rec.week = Some(cur.digits_u32(2)?);
                        if cur.eat(b'-') {
                            rec.weekday = Some(cur.digits_u32(1)?);
                        }
                    } else {
                        match cur.run_len() {
                            3 => rec.ordinal_day = Some(cur.digits_u32(3)?),
                            2 => {
                                rec.month = Some(cur.digits_u32(2)?);
                                if cur.eat(b'-') {
                                    rec.day = Some(cur.digits_u32(2)?);
                                }
                            }
                            _ => return Err(cur.fail("unrecognized date")),
                        }
                    }
                } else if cur.eat(b'W') {
                    rec.week = Some(cur.digits_u32(2)?);
                    if cur.run_len() >= 1 {
                        rec.weekday = Some(cur.digits_u32(1)?);
                    }
                    layout = Some(Layout::Basic);
                }
            }
            2 => {
                if cur.only_digits_left(2) {
                    rec.century = Some(cur.digits_i64(2)?);
                } else {
                    rec.year_of_century = Some(cur.digits_u32(2)?);
                    if cur.eat(b'W') {
                        // YYWww, YYWwwD
                        rec.week = Some(cur.digits_u32(2)?);
                        if cur.run_len() >= 1 {
                            rec.weekday = Some(cur.digits_u32(1)?);
                        }
                        layout = Some(Layout::Basic);
                    } else if cur.eat(b'-') {
                        layout = Some(Layout::Extended);
                        if cur.eat(b'W') {
                            // YY-Www-D
                            rec.week = Some(cur.digits_u32(2)?);
                            if cur.eat(b'-') {
                                rec.weekday = Some(cur.digits_u32(1)?);
                            }
                        } else {
                            match cur.run_len() {
                                3 => rec.ordinal_day = Some(cur.digits_u32(3)?),
                                2 => {
                                    rec.month = Some(cur.digits_u32(2)?);
                                    if !cur.eat(b'-') {
                                        return Err(cur.fail("unrecognized truncated date"));
                                    }
                                    rec.day = Some(cur.digits_u32(2)?);
                                }
                                _ => return Err(cur.fail("unrecognized truncated date")),
                            }
                        }
                    } else {
                        return Err(cur.fail("unrecognized date"));
                    }
                }
            }
            _ => return Err(cur.fail("unrecognized date")),
        },
    }
    if !cur.done() {
        return Err(cur.fail("trailing characters after date"));
    }
    Ok((rec, layout))
}

/// Parse a bare time (no `T` prefix) with an optional zone designator
fn time_record(s: &str) -> Result<(IsoRecord, Option<Layout>)> {
    let mut cur = Cursor::new(s);
    let mut rec = IsoRecord::default();
    let mut layout = None;

    if cur.eat(b'-') {
        if cur.eat(b'-') {
            // --ss: second with elided hour and minute
            let mut second = f64::from(cur.digits_u32(2)?);
            if let Some(frac) = cur.fraction()? {
                second += frac;
            }
            rec.second = Some(second);
        } else {
            // -mm[ss]: minute with elided hour
            let mut minute = f64::from(cur.digits_u32(2)?);
            if let Some(frac) = cur.fraction()? {
                minute += frac;
            } else if cur.eat(b':') {
                let mut second = f64::from(cur.digits_u32(2)?);
                if let Some(frac) = cur.fraction()? {
                    second += frac;
                }
                rec.second = Some(second);
                layout = Some(Layout::Extended);
            } else if cur.run_len() >= 2 {
                let mut second = f64::from(cur.digits_u32(2)?);
                if let Some(frac) = cur.fraction()? {
                    second += frac;
                }
                rec.second = Some(second);
                layout = Some(Layout::Basic);
            }
            rec.minute = Some(minute);
        }
    } else {
        let mut hour = f64::from(cur.digits_u32(2)?);
        if let Some(frac) = cur.fraction()? {
            hour += frac;
        } else if cur.eat(b':') {
            layout = Some(Layout::Extended);
            let mut minute = f64::from(cur.digits_u32(2)?);
            if let Some(frac) = cur.fraction()? {
                minute += frac;
            } else if cur.eat(b':') {
                let mut second = f64::from(cur.digits_u32(2)?);
                if let Some(frac) = cur.fraction()? {
                    second += frac;
                }
                rec.second = Some(second);
            }
            rec.minute = Some(minute);
        } else if cur.run_len() >= 2 {
            layout = Some(Layout::Basic);
            let mut minute = f64::from(cur.digits_u32(2)?);
            if let Some(frac) = cur.fraction()? {
                minute += frac;
            } else if cur.run_len() >= 2 {
                let mut second = f64::from(cur.digits_u32(2)?);
                if let Some(frac) = cur.fraction()? {
                    second += frac;
                }
                rec.second = Some(second);
            }
            rec.minute = Some(minute);
        }
        rec.hour = Some(hour);
    }

    rec.zone = zone_designator(&mut cur)?;
    if !cur.done() {
        return Err(cur.fail("trailing characters after time"));
    }
    Ok((rec, layout))
}

fn zone_designator(cur: &mut Cursor) -> Result<Option<Zone>> {
    match cur.peek() {
        Some(b'Z') => {
            cur.bump();
            Ok(Some(Zone::Utc))
        }
        Some(sign @ (b'+' | b'-')) => {
            cur.bump();
            let sign = if sign == b'-' { -1 } else { 1 };
            let hours = cur.digits_u32(2)? as i32;
            if cur.eat(b':') {
                let minutes = cur.digits_u32(2)? as i32;
                Ok(Some(Zone::Offset {
                    minutes: sign * (60 * hours + minutes),
                    with_minutes: true,
                    extended: true,
                }))
            } else if cur.run_len() >= 2 {
                let minutes = cur.digits_u32(2)? as i32;
                Ok(Some(Zone::Offset {
                    minutes: sign * (60 * hours + minutes),
                    with_minutes: true,
                    extended: false,
                }))
            } else {
                Ok(Some(Zone::Offset {
                    minutes: sign * 60 * hours,
                    with_minutes: false,
                    extended: false,
                }))
            }
        }
        _ => Ok(None),
    }
}

/// Byte cursor over an input literal
#[derive(Debug)]
struct Cursor<'a> {
    src: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            bytes: src.as_bytes(),
            pos: 0,
        }
    }

    fn done(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.pos += 1;
        Some(b)
    }

    fn eat(&mut self, b: u8) -> bool {
        if self.peek() == Some(b) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Length of the digit run starting at the cursor
    fn run_len(&self) -> usize {
        self.bytes[self.pos..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    }

    /// True when exactly `n` digits remain and nothing follows them
    fn only_digits_left(&self, n: usize) -> bool {
        self.run_len() == n && self.pos + n == self.bytes.len()
    }

    fn digits_u32(&mut self, n: usize) -> Result<u32> {
        Ok(self.digits_i64(n)? as u32)
    }

    fn digits_i64(&mut self, n: usize) -> Result<i64> {
        if n == 0 || n > 18 || self.run_len() < n {
            return Err(self.fail("expected digits"));
        }
        let mut value = 0i64;
        for _ in 0..n {
            let b = self.bytes[self.pos];
            value = 10 * value + i64::from(b - b'0');
            self.pos += 1;
        }
        Ok(value)
    }

    /// A fraction introduced by a comma or period, or `None` when the next
    /// byte is neither
    fn fraction(&mut self) -> Result<Option<f64>> {
        if !matches!(self.peek(), Some(b',') | Some(b'.')) {
            return Ok(None);
        }
        self.pos += 1;
        let n = self.run_len();
        if n == 0 {
            return Err(self.fail("fraction separator without digits"));
        }
        let mut value = 0.0;
        let mut scale = 1.0;
        for _ in 0..n {
            let b = self.bytes[self.pos];
            scale /= 10.0;
            value += f64::from(b - b'0') * scale;
            self.pos += 1;
        }
        Ok(Some(value))
    }

    fn fail(&self, what: &str) -> Error {
        Error::UnrecognizedFormat(format!("{} at offset {} in {:?}", what, self.pos, self.src))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    fn cfg() -> ParseConfig {
        ParseConfig::default()
    }

    fn resolve_day(input: &str) -> i64 {
        parse_datetime(input, &cfg())
            .unwrap()
            .resolve(None)
            .unwrap()
            .day
    }

    #[rstest]
    #[case("1993-02-14", -2512)]
    #[case("19930214", -2512)]
    #[case("1993-045", -2512)]
    #[case("1993045", -2512)]
    #[case("1993-W06-7", -2512)]
    #[case("1993W067", -2512)]
    #[case("2000-01-01", 0)]
    #[case("1999-W52-6", 0)]
    #[case("2000", 0)]
    #[case("2000-01", 0)]
    fn test_equivalent_dates(#[case] input: &str, #[case] day: i64) {
        assert_eq!(resolve_day(input), day, "{}", input);
    }

    #[test]
    fn test_century_form() {
        let rec = parse_date("19").unwrap();
        assert_eq!(rec.century, Some(19));
        assert_eq!(rec.resolve(None).unwrap().day, -36524); // 1900-01-01
    }

    #[test]
    fn test_truncated_forms() {
        let reference = IsoRecord::from_ymd(1993, 2, 1).unwrap();

        for input in ["930214", "93-02-14", "-045", "--0214", "--02-14", "---14"] {
            let rec = parse_date(input).unwrap();
            assert_eq!(
                rec.resolve(Some(&reference)).unwrap().day,
                -2512,
                "{}",
                input
            );
        }

        // Elided week year
        let rec = parse_date("-W06-7").unwrap();
        assert_eq!(rec.resolve(Some(&reference)).unwrap().day, -2512);
    }

    #[test]
    fn test_combined_datetime() {
        let rec = parse_datetime("1993-02-14T13:10:30", &cfg()).unwrap();
        assert_eq!(rec.layout, Layout::Extended);
        assert_eq!(rec.hour, Some(13.0));
        assert_eq!(rec.minute, Some(10.0));
        assert_eq!(rec.second, Some(30.0));
        let resolved = rec.resolve(None).unwrap();
        assert_eq!((resolved.day, resolved.sec), (-2512, 47430.0));

        let rec = parse_datetime("19930214T131030", &cfg()).unwrap();
        assert_eq!(rec.layout, Layout::Basic);
        assert_eq!(rec.resolve(None).unwrap().sec, 47430.0);
    }

    #[test]
    fn test_layout_mismatch_rejected() {
        assert!(matches!(
            parse_datetime("1993-02-14T131030", &cfg()),
            Err(Error::FormatMismatch(_))
        ));
        assert!(matches!(
            parse_datetime("19930214T13:10:30", &cfg()),
            Err(Error::FormatMismatch(_))
        ));
    }

    #[test]
    fn test_truncated_date_rejected_with_time() {
        assert!(parse_datetime("--0214T13:10:30", &cfg()).is_err());
        // Two-digit-year truncation has no leading hyphen and stays legal
        assert!(parse_datetime("930214T131030", &cfg()).is_ok());
    }

    #[test]
    fn test_missing_t() {
        assert!(parse_datetime("1993-02-14 13:10:30", &cfg()).is_err());

        let lenient = ParseConfig {
            allow_missing_t: true,
            ..ParseConfig::default()
        };
        let rec = parse_datetime("1993-02-14 13:10:30", &lenient).unwrap();
        assert_eq!(rec.resolve(None).unwrap().sec, 47430.0);

        let rec = parse_datetime("19930214131030", &lenient).unwrap();
        assert_eq!(rec.resolve(None).unwrap().sec, 47430.0);
    }

    #[rstest]
    #[case("13:10:30", 47430.0)]
    #[case("131030", 47430.0)]
    #[case("13:10:30.25", 47430.25)]
    #[case("13:10:30,25", 47430.25)]
    #[case("1310", 47400.0)]
    #[case("13.5", 48600.0)]
    #[case("13:10.5", 47430.0)]
    #[case("23:59:60.5", 86400.5)]
    fn test_time_forms(#[case] input: &str, #[case] sec: f64) {
        let rec = parse_time(input, &cfg()).unwrap();
        let hour = rec.hour.unwrap_or(0.0);
        let minute = rec.minute.unwrap_or(0.0);
        let second = rec.second.unwrap_or(0.0);
        assert_relative_eq!(
            3600.0 * hour + 60.0 * minute + second,
            sec,
            epsilon = 1e-9
        );
    }

    #[rstest]
    #[case("13:10:30")]
    #[case("13:10")]
    #[case("13:10:30Z")]
    #[case("13:10:30+01:00")]
    #[case("131030+0100")]
    fn test_bare_time_without_t(#[case] input: &str) {
        let rec = parse_datetime(input, &cfg()).unwrap();
        assert!(!rec.has_date(), "{}", input);
        assert!(rec.has_time(), "{}", input);
        assert!(matches!(parse(input, &cfg()), Ok(IsoValue::DateTime(_))));
    }

    #[test]
    fn test_digit_only_literal_stays_a_date() {
        let rec = parse_datetime("131030", &cfg()).unwrap();
        assert!(rec.has_date());
        assert!(!rec.has_time());
    }

    #[test]
    fn test_time_with_leading_t() {
        let rec = parse_datetime("T13:10:30", &cfg()).unwrap();
        assert!(!rec.has_date());
        assert_eq!(rec.hour, Some(13.0));
    }

    #[rstest]
    #[case("13:10:30Z", 0)]
    #[case("13:10:30+01:00", 60)]
    #[case("131030+0100", 60)]
    #[case("131030-05", -300)]
    #[case("13:10:30-09:30", -570)]
    fn test_zones(#[case] input: &str, #[case] minutes: i32) {
        let rec = parse_time(input, &cfg()).unwrap();
        assert_eq!(rec.zone.unwrap().offset_minutes(), minutes);
    }

    #[test]
    fn test_strict_zone_layout() {
        let strict = ParseConfig {
            strict_zone_layout: true,
            ..ParseConfig::default()
        };
        assert!(parse_time("13:10:30+01:00", &strict).is_ok());
        assert!(matches!(
            parse_time("13:10:30+0100", &strict),
            Err(Error::FormatMismatch(_))
        ));
        assert!(matches!(
            parse_time("131030+01:00", &strict),
            Err(Error::FormatMismatch(_))
        ));
        // Hour-only offsets carry no layout of their own
        assert!(parse_time("13:10:30+01", &strict).is_ok());
        // Lenient by default
        assert!(parse_time("13:10:30+0100", &cfg()).is_ok());
    }

    #[test]
    fn test_durations() {
        let dur = parse_duration("P2W").unwrap();
        assert_eq!(dur.weeks, Some(2.0));
        assert_eq!(dur.to_days(), Some(14.0));

        let dur = parse_duration("P1Y2M3DT4H5M6.5S").unwrap();
        assert_eq!(dur.years, Some(1.0));
        assert_eq!(dur.months, Some(2.0));
        assert_eq!(dur.days, Some(3.0));
        assert_eq!(dur.hours, Some(4.0));
        assert_eq!(dur.minutes, Some(5.0));
        assert_eq!(dur.seconds, Some(6.5));

        let dur = parse_duration("PT90M").unwrap();
        assert_eq!(dur.to_days(), Some(90.0 / 1440.0));
    }

    #[rstest]
    #[case("P")]
    #[case("PT")]
    #[case("P1W2D")]
    #[case("P2D1Y")]
    #[case("P1.5Y2M")]
    #[case("P1H")]
    #[case("1Y")]
    fn test_bad_durations(#[case] input: &str) {
        assert!(parse_duration(input).is_err(), "{}", input);
    }

    #[test]
    fn test_period_start_end() {
        let period =
            parse_period("1993-02-14T13:10:30/1993-02-14T13:10:31", &cfg()).unwrap();
        assert_relative_eq!(period.duration_seconds(None).unwrap(), 1.0);
    }

    #[test]
    fn test_period_end_inheritance() {
        // A digit-only end reads as a time because the start has one
        let period = parse_period("1993-02-14T13:10:30/131031", &cfg()).unwrap();
        assert_relative_eq!(period.duration_seconds(None).unwrap(), 1.0);

        let period = parse_period("1993-02-14T13:10:30/13:10:31", &cfg()).unwrap();
        assert_relative_eq!(period.duration_seconds(None).unwrap(), 1.0);

        // End inherits year and month from the start
        let period = parse_period("1993-02-14/---20", &cfg()).unwrap();
        let ((d0, _), (d1, _)) = period.bounds(None).unwrap();
        assert_eq!(d1 - d0, 6);
    }

    #[test]
    fn test_period_with_duration() {
        let period = parse_period("1993-02-14/P2W", &cfg()).unwrap();
        let ((d0, _), (d1, _)) = period.bounds(None).unwrap();
        assert_eq!((d0, d1), (-2512, -2498));

        let period = parse_period("P1D/1993-02-14", &cfg()).unwrap();
        let ((d0, _), (d1, _)) = period.bounds(None).unwrap();
        assert_eq!((d0, d1), (-2513, -2512));
    }

    #[test]
    fn test_top_level_dispatch() {
        assert!(matches!(
            parse("1993-02-14", &cfg()),
            Ok(IsoValue::DateTime(_))
        ));
        assert!(matches!(parse("P2W", &cfg()), Ok(IsoValue::Duration(_))));
        assert!(matches!(
            parse("1993-02-14/P2W", &cfg()),
            Ok(IsoValue::Period(_))
        ));
    }

    #[rstest]
    #[case("")]
    #[case("199")]
    #[case("1993-")]
    #[case("1993-02-14T")]
    #[case("1993-02-14Q")]
    #[case("13:10:30.")]
    #[case("13:10:30+1")]
    #[case("----12")]
    fn test_unrecognized(#[case] input: &str) {
        assert!(parse_datetime(input, &cfg()).is_err(), "{}", input);
    }
}
