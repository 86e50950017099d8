//! Leap-second table: cumulative TAI-UTC offsets by UTC day number
//!
//! Each entry is a threshold day (the first UTC day on which the offset
//! applies) and the cumulative TAI-UTC offset in seconds from that day
//! forward. Thresholds are strictly increasing. The table also answers the
//! inverse question: the applicable offset at a given TAI instant, including
//! instants that fall inside an inserted leap second.

use crate::constants::DAY_S;
use crate::errors::{Error, Result};
use lazy_static::lazy_static;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// IERS leap seconds, 1972 through 2017-01-01, as (threshold day, TAI-UTC).
/// Day numbers count from 2000-01-01.
const BUILTIN_ENTRIES: [(i64, f64); 28] = [
    (-10227, 10.0), // 1972-01-01
    (-10045, 11.0), // 1972-07-01
    (-9861, 12.0),  // 1973-01-01
    (-9496, 13.0),  // 1974-01-01
    (-9131, 14.0),  // 1975-01-01
    (-8766, 15.0),  // 1976-01-01
    (-8400, 16.0),  // 1977-01-01
    (-8035, 17.0),  // 1978-01-01
    (-7670, 18.0),  // 1979-01-01
    (-7305, 19.0),  // 1980-01-01
    (-6758, 20.0),  // 1981-07-01
    (-6393, 21.0),  // 1982-07-01
    (-6028, 22.0),  // 1983-07-01
    (-5297, 23.0),  // 1985-07-01
    (-4383, 24.0),  // 1988-01-01
    (-3652, 25.0),  // 1990-01-01
    (-3287, 26.0),  // 1991-01-01
    (-2740, 27.0),  // 1992-07-01
    (-2375, 28.0),  // 1993-07-01
    (-2010, 29.0),  // 1994-07-01
    (-1461, 30.0),  // 1996-01-01
    (-914, 31.0),   // 1997-07-01
    (-365, 32.0),   // 1999-01-01
    (2192, 33.0),   // 2006-01-01
    (3288, 34.0),   // 2009-01-01
    (4565, 35.0),   // 2012-07-01
    (5660, 36.0),   // 2015-07-01
    (6210, 37.0),   // 2017-01-01
];

lazy_static! {
    static ref BUILTIN: LeapSecondTable =
        LeapSecondTable::new(BUILTIN_ENTRIES.to_vec()).expect("builtin leap-second list");
}

/// An ordered, immutable mapping from UTC day-number thresholds to cumulative
/// TAI-UTC offsets in seconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeapSecondTable {
    days: Vec<i64>,
    offsets: Vec<f64>,
    /// TAI-UTC offset in effect on day 0 (2000-01-01); TAI instants count
    /// seconds from 2000-01-01T00:00:00 TAI, so all inverse lookups are
    /// relative to this baseline.
    #[serde(skip)]
    baseline: f64,
    /// TAI second count at which each entry's offset takes effect
    #[serde(skip)]
    tai_starts: Vec<f64>,
    /// TAI second count at which each entry's leap adjustment begins
    #[serde(skip)]
    leap_starts: Vec<f64>,
}

impl LeapSecondTable {
    /// Build a table from (threshold day, cumulative offset) pairs.
    ///
    /// Thresholds must be strictly increasing and offsets non-decreasing;
    /// a violation is a caller contract error. Negative leap seconds can
    /// still be introduced through [`insert_leap_second`].
    ///
    /// [`insert_leap_second`]: LeapSecondTable::insert_leap_second
    pub fn new(entries: Vec<(i64, f64)>) -> Result<Self> {
        for pair in entries.windows(2) {
            if pair[1].0 <= pair[0].0 {
                return Err(Error::InvalidTable(format!(
                    "leap-second thresholds not strictly increasing: day {} then {}",
                    pair[0].0, pair[1].0
                )));
            }
            if pair[1].1 < pair[0].1 {
                return Err(Error::InvalidTable(format!(
                    "leap-second offsets decrease at day {}",
                    pair[1].0
                )));
            }
        }

        let days: Vec<i64> = entries.iter().map(|e| e.0).collect();
        let offsets: Vec<f64> = entries.iter().map(|e| e.1).collect();
        debug!("leap-second table with {} entries", days.len());

        let mut table = Self {
            days,
            offsets,
            baseline: 0.0,
            tai_starts: Vec::new(),
            leap_starts: Vec::new(),
        };
        table.rebuild_tai_index();
        Ok(table)
    }

    /// The table distributed with the library: IERS leap seconds from
    /// 1972-01-01 through 2017-01-01.
    pub fn builtin() -> &'static LeapSecondTable {
        &BUILTIN
    }

    /// Rebuild the derived TAI-second thresholds after any edit
    fn rebuild_tai_index(&mut self) {
        self.baseline = self.leapsecs_on_day(0);
        self.tai_starts.clear();
        self.leap_starts.clear();
        for i in 0..self.days.len() {
            let day = self.days[i] as f64;
            let prev = if i > 0 { self.offsets[i - 1] } else { 0.0 };
            self.tai_starts.push(day * DAY_S + self.offsets[i] - self.baseline);
            self.leap_starts.push(day * DAY_S + prev - self.baseline);
        }
    }

    /// Insert an additional leap second (positive or negative) taking effect
    /// at the start of the given UTC day, producing a new table.
    pub fn insert_leap_second(&self, day: i64, count: f64) -> Result<Self> {
        if count < 0.0 {
            warn!("inserting a negative leap second on day {}", day);
        }
        let base = self.leapsecs_on_day(day - 1);
        let mut entries: Vec<(i64, f64)> = Vec::with_capacity(self.days.len() + 1);
        for i in 0..self.days.len() {
            if self.days[i] < day {
                entries.push((self.days[i], self.offsets[i]));
            } else {
                entries.push((self.days[i], self.offsets[i] + count));
            }
        }
        let pos = entries.partition_point(|e| e.0 < day);
        if pos < entries.len() && entries[pos].0 == day {
            // Threshold already present; the offsets above absorbed the change
        } else {
            entries.insert(pos, (day, base + count));
        }

        // Skip the monotonicity check in new(); negative insertions are
        // legitimate here.
        let days: Vec<i64> = entries.iter().map(|e| e.0).collect();
        let offsets: Vec<f64> = entries.iter().map(|e| e.1).collect();
        for pair in days.windows(2) {
            if pair[1] <= pair[0] {
                return Err(Error::InvalidTable(
                    "leap-second thresholds not strictly increasing".into(),
                ));
            }
        }
        let mut table = Self {
            days,
            offsets,
            baseline: 0.0,
            tai_starts: Vec::new(),
            leap_starts: Vec::new(),
        };
        table.rebuild_tai_index();
        Ok(table)
    }

    /// Cumulative TAI-UTC offset in effect on the given UTC day.
    ///
    /// Binary search for the latest threshold at or before the query day;
    /// zero before the table's first entry.
    pub fn leapsecs_on_day(&self, day: i64) -> f64 {
        let idx = self.days.partition_point(|&d| d <= day);
        if idx == 0 {
            0.0
        } else {
            self.offsets[idx - 1]
        }
    }

    /// Length in seconds of the given UTC day (86400, 86401, or 86399)
    pub fn seconds_on_day(&self, day: i64) -> f64 {
        DAY_S + self.leapsecs_on_day(day + 1) - self.leapsecs_on_day(day)
    }

    /// Day span covered by the table, as (first threshold, last threshold)
    pub fn coverage(&self) -> Option<(i64, i64)> {
        match (self.days.first(), self.days.last()) {
            (Some(&a), Some(&b)) => Some((a, b)),
            _ => None,
        }
    }

    /// Cumulative TAI-UTC offset in effect at a TAI instant.
    ///
    /// Inside an inserted leap second the new offset is not yet in effect,
    /// so the previous entry's value is returned.
    pub fn leapsecs_at_tai(&self, tai: f64) -> f64 {
        let idx = self.tai_starts.partition_point(|&t| t <= tai);
        if idx == 0 {
            0.0
        } else {
            self.offsets[idx - 1]
        }
    }

    /// TAI seconds past 2000-01-01T00:00:00 TAI for a UTC day/sec pair
    pub fn tai_seconds_from_day_sec(&self, day: i64, sec: f64) -> f64 {
        day as f64 * DAY_S + sec + self.leapsecs_on_day(day) - self.baseline
    }

    /// UTC day number and seconds-of-day for a TAI instant.
    ///
    /// The inverse of [`tai_seconds_from_day_sec`]. During an inserted leap
    /// second the returned seconds-of-day lies in [86400, 86401), attributed
    /// to the day being extended.
    ///
    /// [`tai_seconds_from_day_sec`]: LeapSecondTable::tai_seconds_from_day_sec
    pub fn day_sec_from_tai_seconds(&self, tai: f64) -> (i64, f64) {
        let idx = self.tai_starts.partition_point(|&t| t <= tai);

        // Inside an inserted leap second: the next entry's adjustment has
        // begun but its offset is not yet in effect.
        if idx < self.tai_starts.len()
            && self.leap_starts[idx] < self.tai_starts[idx]
            && tai >= self.leap_starts[idx]
        {
            let sec = DAY_S + (tai - self.leap_starts[idx]);
            return (self.days[idx] - 1, sec);
        }

        let offset = if idx == 0 { 0.0 } else { self.offsets[idx - 1] };
        let utc = tai - (offset - self.baseline);
        let day = (utc / DAY_S).floor();
        (day as i64, utc - day * DAY_S)
    }
}
