//! Natal moon: the phase the moon was in on a birth date.

use crate::errors::{AppError, AppResult};
use crate::lunar::{self, MoonPhase};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

/// The phase of a birth date with its reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NatalReading {
    pub birth_date: NaiveDate,
    pub phase: MoonPhase,
    pub keywords: &'static str,
    pub archetype: &'static str,
}

/// Reads the natal moon for `birth_date`.
///
/// # Errors
///
/// Returns `AppError::Journal` if `birth_date` is after `today`.
pub fn natal_reading(birth_date: NaiveDate, today: NaiveDate) -> AppResult<NatalReading> {
    if birth_date > today {
        return Err(AppError::Journal(format!(
            "Birth date {} is in the future",
            birth_date
        )));
    }

    let phase = lunar::phase_for(birth_date);
    debug!("Natal moon for {} is {:?}", birth_date, phase);
    let info = phase.info();
    Ok(NatalReading {
        birth_date,
        phase,
        keywords: info.keywords,
        archetype: info.archetype,
    })
}
