//! Energy seeds: small intentions planted for the following day.

use crate::ai::prompts::{
    review_yesterday_fallback, review_yesterday_request, seed_suggestions_request, FALLBACK_SEEDS,
};
use crate::ai::{generate_or_fallback, split_suggestions, TextGenerator};
use crate::constants::SUGGESTION_COUNT;
use crate::errors::{AppError, AppResult};
use crate::journal_core::{Journal, ProgressStatus, TomorrowSeed};
use crate::tarot::Deck;
use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

/// Plants `seed` on `date`, to be carried out the day after.
///
/// The seed remembers the card of the day's reflection, if any. Planting again
/// on the same date replaces the earlier seed.
///
/// # Errors
///
/// Returns `AppError::Journal` if the seed text is blank.
pub fn plant_seed(
    journal: &mut Journal,
    date: NaiveDate,
    seed: &str,
    ai_suggestion: Option<String>,
) -> AppResult<TomorrowSeed> {
    let seed = seed.trim();
    if seed.is_empty() {
        return Err(AppError::Journal("Energy seed cannot be empty".to_string()));
    }

    let entry = journal.entry_mut_or_create(date);
    let planted = TomorrowSeed {
        card_id: entry.today_awareness.as_ref().map(|a| a.card_id.clone()),
        energy_seed: seed.to_string(),
        blessing_completed: false,
        ai_suggestion,
        status: ProgressStatus::Pending,
    };
    entry.tomorrow_seed = Some(planted.clone());

    info!("Planted energy seed on {}", date);
    Ok(planted)
}

/// Suggests seeds matching the energy of the day's card.
///
/// # Errors
///
/// Returns `AppError::Journal` if the date has no reflection, or its card is
/// not in the deck.
pub fn suggest_seeds<G: TextGenerator + ?Sized>(
    journal: &Journal,
    deck: &Deck,
    ai: &G,
    date: NaiveDate,
) -> AppResult<Vec<String>> {
    let card_id = journal
        .get(date)
        .and_then(|e| e.today_awareness.as_ref())
        .map(|a| a.card_id.as_str())
        .ok_or_else(|| {
            AppError::Journal(format!(
                "No card drawn for {}. Draw a card before asking for seeds",
                date
            ))
        })?;
    let card = deck
        .find(card_id)
        .ok_or_else(|| AppError::Journal(format!("Unknown tarot card id: {}", card_id)))?;

    let fallback = FALLBACK_SEEDS.join("|");
    let text = generate_or_fallback(ai, &seed_suggestions_request(card), &fallback);
    let seeds = split_suggestions(&text, SUGGESTION_COUNT);
    if seeds.is_empty() {
        return Ok(FALLBACK_SEEDS.iter().map(|s| s.to_string()).collect());
    }
    Ok(seeds)
}

/// Records whether the seed planted on `date` was carried out.
///
/// # Errors
///
/// Returns `AppError::Journal` if no seed was planted on that date.
pub fn complete_seed(
    journal: &mut Journal,
    date: NaiveDate,
    completed: bool,
) -> AppResult<TomorrowSeed> {
    let seed = journal
        .get_mut(date)
        .and_then(|e| e.tomorrow_seed.as_mut())
        .ok_or_else(|| AppError::Journal(format!("No energy seed was planted on {}", date)))?;

    seed.blessing_completed = completed;
    seed.status = if completed {
        ProgressStatus::Done
    } else {
        ProgressStatus::Pending
    };
    info!(
        "Marked energy seed from {} as {}",
        date,
        if completed { "completed" } else { "not completed" }
    );
    Ok(seed.clone())
}

/// The companion's word on yesterday's seed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedReview {
    pub planted_on: NaiveDate,
    pub energy_seed: String,
    pub completed: bool,
    pub message: String,
}

/// Reviews the seed planted the day before `today`.
///
/// When `completed` is given the outcome is recorded first. The message is
/// praise for a completed seed and comfort otherwise. Returns `None` when
/// nothing was planted yesterday.
pub fn review_seed<G: TextGenerator + ?Sized>(
    journal: &mut Journal,
    ai: &G,
    today: NaiveDate,
    completed: Option<bool>,
) -> AppResult<Option<SeedReview>> {
    let Some(yesterday) = today.pred_opt() else {
        return Ok(None);
    };
    if journal
        .get(yesterday)
        .and_then(|e| e.tomorrow_seed.as_ref())
        .is_none()
    {
        return Ok(None);
    }

    let seed = match completed {
        Some(done) => complete_seed(journal, yesterday, done)?,
        None => journal
            .get(yesterday)
            .and_then(|e| e.tomorrow_seed.clone())
            .ok_or_else(|| AppError::Journal(format!("No energy seed was planted on {}", yesterday)))?,
    };

    let done = seed.blessing_completed;
    let message = generate_or_fallback(
        ai,
        &review_yesterday_request(&seed.energy_seed, done),
        review_yesterday_fallback(done),
    );

    Ok(Some(SeedReview {
        planted_on: yesterday,
        energy_seed: seed.energy_seed,
        completed: done,
        message,
    }))
}
