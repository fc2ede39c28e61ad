//! Mindfulness practice and five-senses calibration logs.

use crate::ai::prompts::FALLBACK_SENSORY_TASK;
use crate::errors::{AppError, AppResult};
use crate::journal_core::{Journal, PracticeLog, SenseChannel, SensoryLog};
use chrono::{Datelike, NaiveDate};
use tracing::info;

const VISUAL_TASKS: &[&str] = &[
    "Find a shadow whose edge is not a straight line.",
    "Find an area brighter than everything around it.",
    "Find a spot where two colours overlap.",
    "Find a place where light reflects off a surface.",
    "Find the smallest, darkest patch of colour.",
    "Find an object that is lit but not quite in focus.",
    "Find an outline with an irregular shape.",
    "Find a corner you would not normally look at.",
    "Find an object that looks light.",
    "Find a place where the light is changing.",
];

const AUDIO_TASKS: &[&str] = &[
    "Find a background sound that never stops.",
    "Find a sound that appears suddenly.",
    "Find a sound whose source is unclear.",
    "Find the sound closest to you.",
    "Find a sound coming from far away.",
    "Find a sound with a repeating rhythm.",
    "Find a sound that is faint but still distinct.",
    "Find a sound not made by an electronic device.",
    "Find a sound you usually ignore.",
    "Find the moment a sound disappears.",
];

const TOUCH_TASKS: &[&str] = &[
    "Touch something cooler than your palm.",
    "Touch a surface that is not smooth.",
    "Touch something soft that still holds its shape.",
    "Feel where your body meets the chair or the floor.",
    "Trace a sharp edge with your fingertip.",
    "Feel where your clothes touch your skin.",
    "Feel the air moving across your palm.",
    "Touch an object you handle every day.",
    "Feel the soles of your feet against the ground.",
    "Touch a surface whose texture you notice at once.",
];

const SMELL_TASKS: &[&str] = &[
    "Smell the air of the room you are in.",
    "Smell a spot right next to you.",
    "Smell the surface of an object.",
    "Take a deep breath and notice the first sensation.",
    "Smell the air near a window or door.",
    "Find a faint smell.",
    "Smell your clothes or a book.",
    "Smell something you just touched.",
    "Find a smell that lingers only briefly.",
    "Notice whether the air's smell is changing.",
];

const TASTE_TASKS: &[&str] = &[
    "Take a sip of water and notice its temperature.",
    "Hold water in your mouth for a second and feel your tongue.",
    "Notice the moment water touches your tongue.",
    "Feel your throat move as you swallow.",
    "Notice whether there is any taste in your mouth right now.",
    "Feel which way the water flows in your mouth.",
    "Notice how the water feels while it rests in your mouth.",
    "Feel the moment the water leaves your mouth.",
    "Notice how your mouth feels after swallowing.",
    "After drinking, notice how your body responds.",
];

fn tasks_for(sense: SenseChannel) -> &'static [&'static str] {
    match sense {
        SenseChannel::Visual => VISUAL_TASKS,
        SenseChannel::Audio => AUDIO_TASKS,
        SenseChannel::Touch => TOUCH_TASKS,
        SenseChannel::Smell => SMELL_TASKS,
        SenseChannel::Taste => TASTE_TASKS,
    }
}

/// A calibration task for `sense`.
///
/// The pick rotates with the date, so the same day always yields the same task.
pub fn sensory_task(sense: SenseChannel, date: NaiveDate) -> &'static str {
    let tasks = tasks_for(sense);
    if tasks.is_empty() {
        return FALLBACK_SENSORY_TASK;
    }
    let index = i64::from(date.num_days_from_ce()).rem_euclid(tasks.len() as i64) as usize;
    tasks[index]
}

/// Records a practice session on `date`.
///
/// # Errors
///
/// Returns `AppError::Journal` if the title is blank.
pub fn log_practice(
    journal: &mut Journal,
    date: NaiveDate,
    title: &str,
    duration_minutes: u32,
    completed: bool,
) -> AppResult<PracticeLog> {
    let title = title.trim();
    if title.is_empty() {
        return Err(AppError::Journal("Practice title cannot be empty".to_string()));
    }

    let log = PracticeLog {
        title: title.to_string(),
        duration_minutes,
        completed,
    };
    journal.entry_mut_or_create(date).practices.push(log.clone());
    info!("Logged {} minute practice on {}", duration_minutes, date);
    Ok(log)
}

/// Records a calibration on `date`. A blank title becomes the day's task.
///
/// # Errors
///
/// Returns `AppError::Journal` if the content is blank.
pub fn log_sensory(
    journal: &mut Journal,
    date: NaiveDate,
    sense: SenseChannel,
    title: Option<&str>,
    content: &str,
) -> AppResult<SensoryLog> {
    let content = content.trim();
    if content.is_empty() {
        return Err(AppError::Journal("Sensory log cannot be empty".to_string()));
    }

    let title = title
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| sensory_task(sense, date));
    let log = SensoryLog {
        sense,
        title: title.to_string(),
        content: content.to_string(),
    };
    journal.entry_mut_or_create(date).sensory_logs.push(log.clone());
    info!("Logged {} calibration on {}", sense, date);
    Ok(log)
}
