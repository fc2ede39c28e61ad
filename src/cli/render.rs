//! Plain-text rendering of command results.

use crate::aggregate::{MonthlySnapshot, TrendPoint};
use crate::journal_core::{date_key, ChatRole, DayEntry, MonthGrid};
use crate::lunar::{self, LunarDetails, MoonPhase};
use crate::ops::{MonthlyReport, NatalReading, SeedReview};
use crate::tarot::Deck;
use chrono::{Datelike, NaiveDate};

const NO_DATA: &str = "No data yet.";

pub fn moon(date: NaiveDate, details: &LunarDetails) -> String {
    let info = details.phase.info();
    format!(
        "{}  {}\nIllumination: {}%  (age {:.1} days)\nKeywords: {}\n\"{}\"\nTip: {}",
        date_key(date),
        info.name,
        details.illumination_percent,
        details.age_days,
        info.keywords,
        info.blessing,
        info.tip
    )
}

/// Sunday-first grid. `*` marks a finished reflection, `+` any other activity.
pub fn calendar(grid: &MonthGrid) -> String {
    let mut lines = vec![
        grid.month.first_day().format("%B %Y").to_string(),
        " Su  Mo  Tu  We  Th  Fr  Sa".to_string(),
    ];

    let mut week = "    ".repeat(grid.leading_blanks as usize);
    let mut column = grid.leading_blanks as usize;
    for day in &grid.days {
        let marker = if day.reflection_done {
            '*'
        } else if day.has_entry {
            '+'
        } else {
            ' '
        };
        week.push_str(&format!("{:>3}{}", day.date.day(), marker));
        column += 1;
        if column == 7 {
            lines.push(std::mem::take(&mut week));
            column = 0;
        }
    }
    if column != 0 {
        lines.push(week);
    }

    let full_moons: Vec<String> = grid
        .days
        .iter()
        .filter(|d| d.phase == MoonPhase::Full)
        .map(|d| d.date.day().to_string())
        .collect();
    if !full_moons.is_empty() {
        lines.push(format!("Full moon: {}", full_moons.join(", ")));
    }
    lines.push("* reflection finished  + journaled".to_string());
    lines.join("\n")
}

pub fn day(date: NaiveDate, entry: Option<&DayEntry>, deck: &Deck) -> String {
    let mut lines = vec![format!("{}  {}", date_key(date), lunar::phase_for(date))];

    let Some(entry) = entry.filter(|e| !e.is_blank()) else {
        lines.push("Nothing recorded on this day.".to_string());
        return lines.join("\n");
    };

    if let Some(awareness) = &entry.today_awareness {
        let card_name = deck
            .find(&awareness.card_id)
            .map_or(awareness.card_id.as_str(), |c| c.name.as_str());
        lines.push(String::new());
        lines.push(format!("Card: {} ({:?})", card_name, awareness.status));
        if let Some(title) = &awareness.selected_title {
            lines.push(format!("Title: {}", title));
        }
        if awareness.is_done() {
            lines.push(format!("Depth: {}", awareness.complexity_score));
        }
        lines.extend(awareness.chat_history.iter().map(|message| {
            let who = match message.role {
                ChatRole::User => "you ",
                ChatRole::Assistant => "echo",
            };
            format!("  {}: {}", who, message.text)
        }));
    }

    if let Some(seed) = &entry.tomorrow_seed {
        lines.push(String::new());
        lines.push(format!(
            "Energy seed: {} [{}]",
            seed.energy_seed,
            if seed.blessing_completed { "done" } else { "open" }
        ));
    }

    if !entry.practices.is_empty() {
        lines.push(String::new());
        lines.push("Practice:".to_string());
        lines.extend(entry.practices.iter().map(|practice| {
            format!(
                "  {} ({} min{})",
                practice.title,
                practice.duration_minutes,
                if practice.completed { "" } else { ", interrupted" }
            )
        }));
    }

    if !entry.sensory_logs.is_empty() {
        lines.push(String::new());
        lines.push("Senses:".to_string());
        lines.extend(
            entry
                .sensory_logs
                .iter()
                .map(|log| format!("  [{}] {}: {}", log.sense, log.title, log.content)),
        );
    }

    lines.join("\n")
}

pub fn deck(deck: &Deck) -> String {
    deck.cards()
        .iter()
        .map(|c| format!("{:<4} {:<20} {}", c.id, c.name, c.keywords.join(", ")))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn numbered(items: &[String]) -> String {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| format!("{}. {}", i + 1, item))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn snapshot(snapshot: &MonthlySnapshot) -> String {
    let keywords = if snapshot.top_keywords.is_empty() {
        NO_DATA.to_string()
    } else {
        snapshot.top_keywords.join(", ")
    };
    let deepest = match &snapshot.deepest {
        Some(deepest) => format!(
            "{} \"{}\" (depth {})",
            date_key(deepest.date),
            deepest.title.as_deref().unwrap_or("untitled"),
            deepest.score
        ),
        None => NO_DATA.to_string(),
    };
    format!(
        "Month: {}\nDays journaled: {}\nReflection depth: {} characters\nEntries this month: {}\nKeywords: {}\nDeepest conversation: {}",
        snapshot.month,
        snapshot.streak,
        snapshot.depth,
        snapshot.entries_this_month,
        keywords,
        deepest
    )
}

/// One line per point with a bar scaled to the score.
pub fn trend(points: &[TrendPoint]) -> String {
    if points.is_empty() {
        return NO_DATA.to_string();
    }
    points
        .iter()
        .map(|p| {
            let bar = "#".repeat((p.score / 5) as usize);
            let moon = if p.bright { 'o' } else { '.' };
            format!(
                "{} {} {:>3} {:<20} {}",
                p.label,
                moon,
                p.score,
                bar,
                p.title.as_deref().unwrap_or("")
            )
            .trim_end()
            .to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn report(month: &str, keywords: &[String], report: &MonthlyReport) -> String {
    let mut lines = vec![format!("Report for {}", month)];
    if !keywords.is_empty() {
        lines.push(format!("Keywords: {}", keywords.join(", ")));
    }
    lines.push(String::new());
    lines.push(report.overview.clone());
    lines.push(String::new());
    lines.push(numbered(&report.guidance_steps()));
    lines.join("\n")
}

/// The phase of the birth date and its reading.
pub fn natal(reading: &NatalReading) -> String {
    format!(
        "Born {} under the {}\nKeywords: {}\n{}",
        date_key(reading.birth_date),
        reading.phase,
        reading.keywords,
        reading.archetype
    )
}

pub fn seed_review(review: Option<&SeedReview>) -> String {
    match review {
        Some(review) => format!(
            "Yesterday's seed: {} [{}]\n{}",
            review.energy_seed,
            if review.completed { "done" } else { "open" },
            review.message
        ),
        None => "No seed was planted yesterday.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journal_core::{month_grid, Journal, MonthKey, PracticeLog};
    use crate::lunar::lunar_details;

    #[test]
    fn test_moon_text() {
        let date = NaiveDate::from_ymd_opt(2000, 1, 21).unwrap();
        let text = moon(date, &lunar_details(date));
        assert!(text.starts_with("2000-01-21  Full Moon"));
        assert!(text.contains("Illumination: 100%"));
    }

    #[test]
    fn test_calendar_layout() {
        let mut journal = Journal::new();
        journal
            .entry_mut_or_create(NaiveDate::from_ymd_opt(2024, 3, 2).unwrap())
            .practices
            .push(PracticeLog {
                title: "Breath".to_string(),
                duration_minutes: 3,
                completed: true,
            });
        let text = calendar(&month_grid(&journal, MonthKey::new(2024, 3).unwrap()));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "March 2024");
        // March 2024 starts on a Friday.
        assert_eq!(lines[2], format!("{}  1   2+", " ".repeat(20)));
        assert!(text.contains("Full moon: "));
    }

    #[test]
    fn test_empty_views_render_no_data() {
        let deck = Deck::builtin();
        let month = MonthKey::new(2024, 3).unwrap();
        assert!(snapshot(&MonthlySnapshot::build(&[], &deck, month)).contains(NO_DATA));
        assert_eq!(trend(&[]), NO_DATA);
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert!(day(date, None, &deck).ends_with("Nothing recorded on this day."));
    }

    #[test]
    fn test_numbered() {
        assert_eq!(
            numbered(&["a".to_string(), "b".to_string()]),
            "1. a\n2. b"
        );
    }

    #[test]
    fn test_natal_text() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let birth = NaiveDate::from_ymd_opt(2000, 1, 21).unwrap();
        let reading = crate::ops::natal_reading(birth, today).unwrap();
        let text = natal(&reading);
        assert!(text.starts_with("Born 2000-01-21 under the Full Moon"));
        assert!(text.ends_with(MoonPhase::Full.info().archetype));
    }
}
