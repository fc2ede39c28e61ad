//! Moon age, phase and illumination for a calendar date.
//!
//! Everything here is a pure function of a `NaiveDate`. The day offset from a
//! reference new moon is computed in closed form, so dates thousands of years
//! away cost the same as today and accumulate no rounding drift.
//!
//! Date validation is the caller's job: by the time a `NaiveDate` exists it is
//! already a real calendar day.

mod phase_info;

pub use phase_info::PhaseInfo;

use crate::constants::{
    MOON_PHASE_COUNT, REFERENCE_NEW_MOON_DAY, REFERENCE_NEW_MOON_MONTH, REFERENCE_NEW_MOON_YEAR,
    SYNODIC_MONTH_DAYS,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;

/// One of the eight named phases of the synodic cycle, in cycle order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MoonPhase {
    #[default]
    New,
    WaxingCrescent,
    FirstQuarter,
    WaxingGibbous,
    Full,
    WaningGibbous,
    LastQuarter,
    WaningCrescent,
}

impl MoonPhase {
    /// All phases in cycle order, starting at `New`.
    pub const ALL: [MoonPhase; MOON_PHASE_COUNT] = [
        MoonPhase::New,
        MoonPhase::WaxingCrescent,
        MoonPhase::FirstQuarter,
        MoonPhase::WaxingGibbous,
        MoonPhase::Full,
        MoonPhase::WaningGibbous,
        MoonPhase::LastQuarter,
        MoonPhase::WaningCrescent,
    ];

    /// Maps a moon age in days to its phase bucket.
    ///
    /// The cycle is split into eight equal buckets. Lower edges are inclusive,
    /// so an age sitting exactly on a boundary belongs to the bucket it opens.
    /// Ages outside `[0, SYNODIC_MONTH_DAYS)` are wrapped first.
    ///
    /// # Examples
    ///
    /// ```
    /// use echo_journal::lunar::MoonPhase;
    ///
    /// assert_eq!(MoonPhase::from_age(0.0), MoonPhase::New);
    /// assert_eq!(MoonPhase::from_age(15.0), MoonPhase::Full);
    /// assert_eq!(MoonPhase::from_age(29.0), MoonPhase::WaningCrescent);
    /// ```
    pub fn from_age(age_days: f64) -> Self {
        let age = age_days.rem_euclid(SYNODIC_MONTH_DAYS);
        let bucket_len = SYNODIC_MONTH_DAYS / MOON_PHASE_COUNT as f64;
        let index = ((age / bucket_len).floor() as usize).min(MOON_PHASE_COUNT - 1);
        Self::ALL[index]
    }

    /// Position of this phase in the cycle, `New` being 0.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Whether the moon is mostly lit in this phase.
    pub fn is_bright(self) -> bool {
        matches!(
            self,
            MoonPhase::WaxingGibbous | MoonPhase::Full | MoonPhase::WaningGibbous
        )
    }

    /// Static descriptive text for the phase.
    pub fn info(self) -> &'static PhaseInfo {
        phase_info::info_for(self)
    }
}

impl fmt::Display for MoonPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.info().name)
    }
}

/// The full lunar picture for one date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LunarDetails {
    /// Days since the most recent new moon, in `[0, SYNODIC_MONTH_DAYS)`.
    pub age_days: f64,
    pub phase: MoonPhase,
    /// Lit fraction of the disc as a whole percentage, 0 to 100.
    pub illumination_percent: u8,
}

/// The new moon all ages are measured from.
pub fn reference_new_moon() -> NaiveDate {
    NaiveDate::from_ymd_opt(
        REFERENCE_NEW_MOON_YEAR,
        REFERENCE_NEW_MOON_MONTH,
        REFERENCE_NEW_MOON_DAY,
    )
    .unwrap_or_default()
}

/// Whole days between the reference new moon and `date` (negative before it).
pub fn days_since_reference(date: NaiveDate) -> i64 {
    date.signed_duration_since(reference_new_moon()).num_days()
}

/// Moon age in days for `date`, always in `[0, SYNODIC_MONTH_DAYS)`.
pub fn moon_age(date: NaiveDate) -> f64 {
    (days_since_reference(date) as f64).rem_euclid(SYNODIC_MONTH_DAYS)
}

/// Illumination percentage for a moon age, from the cosine of the phase angle.
///
/// Exact at the endpoints: age 0 gives 0% and half a cycle gives 100%.
pub fn illumination_percent(age_days: f64) -> u8 {
    let angle = 2.0 * PI * age_days / SYNODIC_MONTH_DAYS;
    let fraction = (1.0 - angle.cos()) / 2.0;
    (fraction * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Phase and illumination percentage for a date.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use echo_journal::lunar::{phase_and_illumination, MoonPhase};
///
/// let date = NaiveDate::from_ymd_opt(2000, 1, 6).unwrap();
/// assert_eq!(phase_and_illumination(date), (MoonPhase::New, 0));
/// ```
pub fn phase_and_illumination(date: NaiveDate) -> (MoonPhase, u8) {
    let details = lunar_details(date);
    (details.phase, details.illumination_percent)
}

/// Phase only, for callers that cache it alongside an entry.
pub fn phase_for(date: NaiveDate) -> MoonPhase {
    MoonPhase::from_age(moon_age(date))
}

/// Age, phase and illumination for a date.
pub fn lunar_details(date: NaiveDate) -> LunarDetails {
    let age_days = moon_age(date);
    LunarDetails {
        age_days,
        phase: MoonPhase::from_age(age_days),
        illumination_percent: illumination_percent(age_days),
    }
}
