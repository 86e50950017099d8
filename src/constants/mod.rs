//! Constants for calendar and time-scale calculations

// Day and epoch constants
/// Seconds in a normal day
pub const DAY_S: f64 = 86_400.0;
/// J2000.0 epoch as Julian date (2000-01-01T12:00:00 TT)
pub const J2000: f64 = 2_451_545.0;
/// Julian date of 2000-01-01T00:00:00, the zero point of the civil day count
pub const JD_OF_JAN_1_2000: f64 = 2_451_544.5;
/// Modified Julian Date of 2000-01-01
pub const MJD_OF_JAN_1_2000: i64 = 51_544;
/// Integer Julian Day Number labelling the civil day 2000-01-01
pub const JDN_OF_JAN_1_2000: i64 = 2_451_545;
/// JD minus MJD
pub const JD_MINUS_MJD: f64 = 2_400_000.5;

// Time-scale offsets
/// TT minus TAI in seconds
pub const TT_MINUS_TAI_S: f64 = 32.184;
/// TT minus TAI in days
pub const TT_MINUS_TAI: f64 = TT_MINUS_TAI_S / DAY_S;

// Calendar constants
/// Day number of February 29, 1 BCE in the proleptic Gregorian calendar,
/// relative to January 1, 2000
pub const FEB29_1BCE_GREGORIAN: i64 = -730_426;
/// Day number of February 29, 1 BCE extrapolating the Julian calendar backward
pub const FEB29_1BCE_JULIAN: i64 = -730_428;
/// First day of the Gregorian calendar (1582-10-15) as a day number
pub const GREGORIAN_DAY1: i64 = -152_384;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epoch_relationships() {
        assert_eq!(JDN_OF_JAN_1_2000, 2_451_545);
        assert_eq!(JD_OF_JAN_1_2000 + 0.5, J2000);
        assert_eq!(MJD_OF_JAN_1_2000 as f64 + JD_MINUS_MJD, JD_OF_JAN_1_2000);
    }
}
