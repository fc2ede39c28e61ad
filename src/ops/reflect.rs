//! The tarot reflection conversation: draw, talk, title, finish.

use crate::ai::prompts::{
    card_opening_request, chat_reply_request, depth_score_request, titles_request,
    FALLBACK_CARD_OPENING, FALLBACK_CHAT_REPLY, FALLBACK_TITLES,
};
use crate::ai::{generate_or_fallback, split_suggestions, TextGenerator};
use crate::constants::{FALLBACK_SCORE_CHARS_PER_POINT, MAX_COMPLEXITY_SCORE, SUGGESTION_COUNT};
use crate::errors::{AppError, AppResult};
use crate::journal_core::{ChatMessage, Journal, ProgressStatus, TodayAwareness};
use crate::tarot::Deck;
use chrono::NaiveDate;
use tracing::{debug, info, warn};

/// Begins the day's reflection on `card_id` and returns the opening question.
///
/// # Flow
///
/// 1. Look the card up in the deck
/// 2. Create the day's entry if it does not exist yet
/// 3. Start a session in progress with that card
/// 4. Ask the companion for an opening question and append it to the transcript
///
/// # Errors
///
/// Returns `AppError::Journal` if:
/// - The card id is not in the deck
/// - A reflection for the date is already in progress or finished
pub fn start_reflection<G: TextGenerator + ?Sized>(
    journal: &mut Journal,
    deck: &Deck,
    ai: &G,
    date: NaiveDate,
    card_id: &str,
) -> AppResult<String> {
    let card = deck
        .find(card_id)
        .ok_or_else(|| AppError::Journal(format!("Unknown tarot card id: {}", card_id)))?;

    if let Some(existing) = journal.get(date).and_then(|e| e.today_awareness.as_ref()) {
        match existing.status {
            ProgressStatus::InProgress => {
                return Err(AppError::Journal(format!(
                    "A reflection for {} is already in progress with card {}",
                    date, existing.card_id
                )))
            }
            ProgressStatus::Done => {
                return Err(AppError::Journal(format!(
                    "The reflection for {} is already finished",
                    date
                )))
            }
            ProgressStatus::Pending => {}
        }
    }

    info!("Starting reflection for {} with {}", date, card.name);
    let opening = generate_or_fallback(ai, &card_opening_request(card), FALLBACK_CARD_OPENING);

    let mut awareness = TodayAwareness::begin(&card.id);
    awareness.chat_history.push(ChatMessage::assistant(&opening));
    journal.entry_mut_or_create(date).today_awareness = Some(awareness);

    Ok(opening)
}

/// Adds the user's message to the day's conversation and returns the reply.
///
/// # Errors
///
/// Returns `AppError::Journal` if the message is blank or no reflection is
/// in progress for the date.
pub fn continue_reflection<G: TextGenerator + ?Sized>(
    journal: &mut Journal,
    deck: &Deck,
    ai: &G,
    date: NaiveDate,
    message: &str,
) -> AppResult<String> {
    let message = message.trim();
    if message.is_empty() {
        return Err(AppError::Journal("Message cannot be empty".to_string()));
    }

    let awareness = in_progress_mut(journal, date)?;
    let request = chat_reply_request(
        deck.find(&awareness.card_id),
        &awareness.chat_history,
        message,
    );
    awareness.chat_history.push(ChatMessage::user(message));

    let reply = generate_or_fallback(ai, &request, FALLBACK_CHAT_REPLY);
    awareness.chat_history.push(ChatMessage::assistant(&reply));
    debug!(
        "Reflection for {} now has {} messages",
        date,
        awareness.chat_history.len()
    );

    Ok(reply)
}

/// Suggests diary titles drawn from the day's conversation.
///
/// # Errors
///
/// Returns `AppError::Journal` if the date has no reflection or the user has
/// not written anything yet.
pub fn suggest_titles<G: TextGenerator + ?Sized>(
    journal: &Journal,
    ai: &G,
    date: NaiveDate,
) -> AppResult<Vec<String>> {
    let awareness = journal
        .get(date)
        .and_then(|e| e.today_awareness.as_ref())
        .ok_or_else(|| no_reflection(date))?;
    if awareness.user_messages().next().is_none() {
        return Err(AppError::Journal(format!(
            "Nothing has been written in the reflection for {} yet",
            date
        )));
    }

    let fallback = FALLBACK_TITLES.join("|");
    let text = generate_or_fallback(ai, &titles_request(&awareness.chat_history), &fallback);
    let titles = split_suggestions(&text, SUGGESTION_COUNT);
    if titles.is_empty() {
        return Ok(FALLBACK_TITLES.iter().map(|t| t.to_string()).collect());
    }
    Ok(titles)
}

/// Depth estimate used when the companion cannot score a conversation.
pub fn estimate_depth_score(user_chars: usize) -> u32 {
    let score = user_chars / FALLBACK_SCORE_CHARS_PER_POINT;
    score.min(MAX_COMPLEXITY_SCORE as usize) as u32
}

/// First integer in `text`, capped at the maximum score.
fn parse_score(text: &str) -> Option<u32> {
    let digits: String = text
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    let value: u64 = digits.parse().ok()?;
    Some(value.min(MAX_COMPLEXITY_SCORE as u64) as u32)
}

/// Closes the day's reflection and returns the recorded depth score.
///
/// A given `score` is capped at the maximum. Without one the companion rates
/// the transcript; if that fails the score is estimated from how much the
/// user wrote.
///
/// # Errors
///
/// Returns `AppError::Journal` if no reflection is in progress for the date.
pub fn finish_reflection<G: TextGenerator + ?Sized>(
    journal: &mut Journal,
    ai: &G,
    date: NaiveDate,
    title: Option<&str>,
    score: Option<u32>,
) -> AppResult<u32> {
    let awareness = in_progress_mut(journal, date)?;

    let score = match score {
        Some(score) => score.min(MAX_COMPLEXITY_SCORE),
        None => {
            let estimate = estimate_depth_score(awareness.user_char_count());
            match ai.generate(&depth_score_request(&awareness.chat_history)) {
                Ok(text) => parse_score(&text).unwrap_or_else(|| {
                    warn!("Unreadable depth score '{}', using estimate", text.trim());
                    estimate
                }),
                Err(e) => {
                    warn!("Depth scoring failed, using estimate: {}", e);
                    estimate
                }
            }
        }
    };

    awareness.status = ProgressStatus::Done;
    awareness.complexity_score = score;
    awareness.selected_title = title
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string);

    info!("Finished reflection for {} with depth {}", date, score);
    Ok(score)
}

fn no_reflection(date: NaiveDate) -> AppError {
    AppError::Journal(format!(
        "No reflection for {}. Draw a card first with `echo-journal draw`",
        date
    ))
}

fn in_progress_mut(journal: &mut Journal, date: NaiveDate) -> AppResult<&mut TodayAwareness> {
    let awareness = journal
        .get_mut(date)
        .and_then(|e| e.today_awareness.as_mut())
        .ok_or_else(|| no_reflection(date))?;
    match awareness.status {
        ProgressStatus::InProgress => Ok(awareness),
        ProgressStatus::Done => Err(AppError::Journal(format!(
            "The reflection for {} is already finished",
            date
        ))),
        ProgressStatus::Pending => Err(no_reflection(date)),
    }
}
