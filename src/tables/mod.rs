//! Injected lookup tables: leap seconds and delta-T
//!
//! Both tables are constructed once from pre-parsed threshold/offset pairs
//! (acquisition of the source files is a caller concern), validated on
//! construction, and immutable afterwards. They can be shared freely across
//! threads; every lookup is a pure function of the table contents.

pub mod delta_t;
pub mod leap;

pub use delta_t::{DeltaT, DeltaTTable};
pub use leap::LeapSecondTable;
