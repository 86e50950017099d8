//! Tempora: Rust calendar and time-scale conversions inspired by the PDS
//! `julian` library
//!
//! This crate converts between calendar dates, day counts (JD/MJD/day
//! numbers), and the astronomical time scales UTC, TAI, TT, TDB, and UT1,
//! with leap seconds and delta-T handled through injectable tables. It also
//! parses and formats the ISO 8601:1988 textual forms, including
//! reduced-precision and truncated ones, and applies every conversion
//! elementwise over `ndarray` arrays.
//!
//! Day numbers count civil days with day 0 = 2000-01-01 (Gregorian), so
//! `JDN = day + 2_451_545` and `MJD = day + 51_544`.

pub mod arrays;
pub mod calendar;
pub mod constants;
pub mod daytime;
pub mod errors;
pub mod iso;
pub mod scales;
pub mod tables;

// Re-export commonly used types
pub use calendar::{CalendarDate, DateStyle};
pub use daytime::{DaySec, TimeOfDay};
pub use errors::{Error, Result};
pub use iso::{FormatConfig, IsoDuration, IsoPeriod, IsoRecord, ParseConfig};
pub use scales::{ScaleConverter, TimeScale};
pub use tables::{DeltaTTable, LeapSecondTable};
