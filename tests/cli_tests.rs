
use chrono::NaiveDate;
use echo_journal::ai::prompts::{
    FALLBACK_CARD_OPENING, FALLBACK_CHAT_REPLY, FALLBACK_REVIEW_COMPLETED, QUIET_MONTH_OVERVIEW,
};
use echo_journal::journal_core::ProgressStatus;
use predicates::prelude::*;
use serial_test::serial;
use tempfile::tempdir;
use test_helpers::{base_echo_command, read_journal};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
#[serial]
fn test_cli_no_args_shows_usage() {
    let temp = tempdir().unwrap();
    base_echo_command(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
#[serial]
fn test_cli_moon_known_full_moon() {
    let temp = tempdir().unwrap();
    base_echo_command(temp.path())
        .args(["moon", "--date", "2000-01-21"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Full Moon"))
        .stdout(predicate::str::contains("Illumination: 100%"));
}

#[test]
#[serial]
fn test_cli_moon_json_epoch() {
    let temp = tempdir().unwrap();
    let output = base_echo_command(temp.path())
        .args(["moon", "--date", "20000106", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["phase"], "NEW");
    assert_eq!(value["illuminationPercent"], 0);
    assert_eq!(value["date"], "2000-01-06");
}

#[test]
#[serial]
fn test_cli_invalid_date() {
    let temp = tempdir().unwrap();
    base_echo_command(temp.path())
        .args(["moon", "--date", "2024-01-32"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date format"));
}

#[test]
#[serial]
fn test_cli_invalid_month() {
    let temp = tempdir().unwrap();
    base_echo_command(temp.path())
        .args(["calendar", "--month", "2024-13"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid month format"));
}

#[test]
#[serial]
fn test_cli_deck_lists_builtin_cards() {
    let temp = tempdir().unwrap();
    base_echo_command(temp.path())
        .arg("deck")
        .assert()
        .success()
        .stdout(predicate::str::contains("c9"))
        .stdout(predicate::str::contains("The Hermit"))
        .stdout(predicate::str::contains("c21"));
}

#[test]
#[serial]
fn test_cli_read_only_commands_do_not_create_journal() {
    let temp = tempdir().unwrap();
    let data_dir = temp.path().join("echo");

    for args in [
        vec!["calendar", "--month", "2024-03"],
        vec!["stats", "--month", "2024-03"],
        vec!["trend", "--date", "2024-03-31"],
        vec!["day", "--date", "2024-03-01"],
    ] {
        base_echo_command(&data_dir).args(&args).assert().success();
    }
    assert!(!data_dir.exists());
}

#[test]
#[serial]
fn test_cli_reflection_flow() {
    let temp = tempdir().unwrap();
    let dir = temp.path();

    base_echo_command(dir)
        .args(["draw", "c9", "--date", "2024-03-10"])
        .assert()
        .success()
        .stdout(predicate::str::contains(FALLBACK_CARD_OPENING));

    base_echo_command(dir)
        .args(["chat", "I kept to myself all day", "--date", "2024-03-10"])
        .assert()
        .success()
        .stdout(predicate::str::contains(FALLBACK_CHAT_REPLY));

    base_echo_command(dir)
        .args(["titles", "--date", "2024-03-10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1. Quiet reflection"));

    base_echo_command(dir)
        .args(["finish", "--title", "Lantern", "--date", "2024-03-10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("finished with depth 4"));

    let journal = read_journal(dir);
    let awareness = journal
        .get(date(2024, 3, 10))
        .and_then(|e| e.today_awareness.as_ref())
        .unwrap();
    assert_eq!(awareness.status, ProgressStatus::Done);
    assert_eq!(awareness.chat_history.len(), 3);
    assert_eq!(awareness.selected_title.as_deref(), Some("Lantern"));
    assert_eq!(awareness.complexity_score, 4);

    let output = base_echo_command(dir)
        .args(["stats", "--month", "2024-03", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stats: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(stats["streak"], 1);
    assert_eq!(stats["depth"], "I kept to myself all day".chars().count());
    assert_eq!(stats["topKeywords"][0], "introspection");
    assert_eq!(stats["deepest"]["date"], "2024-03-10");
}

#[test]
#[serial]
fn test_cli_draw_unknown_card_fails() {
    let temp = tempdir().unwrap();
    base_echo_command(temp.path())
        .args(["draw", "c99"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown tarot card id"));
}

#[test]
#[serial]
fn test_cli_chat_without_draw_fails() {
    let temp = tempdir().unwrap();
    base_echo_command(temp.path())
        .args(["chat", "hello", "--date", "2024-03-10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Draw a card first"));
}

#[test]
#[serial]
fn test_cli_seed_plant_and_review() {
    let temp = tempdir().unwrap();
    let dir = temp.path();

    base_echo_command(dir)
        .args(["seed", "plant", "Water the plants", "--date", "2024-03-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Planted for tomorrow: Water the plants"));

    base_echo_command(dir)
        .args(["seed", "review", "--done", "--date", "2024-03-02"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Water the plants [done]"))
        .stdout(predicate::str::contains(FALLBACK_REVIEW_COMPLETED));

    let seed = read_journal(dir)
        .get(date(2024, 3, 1))
        .and_then(|e| e.tomorrow_seed.clone())
        .unwrap();
    assert!(seed.blessing_completed);
    assert_eq!(seed.status, ProgressStatus::Done);

    base_echo_command(dir)
        .args(["seed", "review", "--date", "2024-03-05"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No seed was planted yesterday."));
}

#[test]
#[serial]
fn test_cli_practice_and_sense_show_in_day() {
    let temp = tempdir().unwrap();
    let dir = temp.path();

    base_echo_command(dir)
        .args(["practice", "Body scan", "--minutes", "12", "--date", "2024-03-03"])
        .assert()
        .success();

    base_echo_command(dir)
        .args([
            "sense", "log", "audio", "A kettle clicking", "--title", "Kitchen", "--date",
            "2024-03-03",
        ])
        .assert()
        .success();

    base_echo_command(dir)
        .args(["day", "--date", "2024-03-03"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Body scan (12 min)"))
        .stdout(predicate::str::contains("[audio] Kitchen: A kettle clicking"));

    base_echo_command(dir)
        .args(["calendar", "--month", "2024-03"])
        .assert()
        .success()
        .stdout(predicate::str::contains("  3+"));
}

#[test]
#[serial]
fn test_cli_sense_task_is_stable() {
    let temp = tempdir().unwrap();
    let first = base_echo_command(temp.path())
        .args(["sense", "task", "visual", "--date", "2024-03-03"])
        .output()
        .unwrap();
    let second = base_echo_command(temp.path())
        .args(["sense", "task", "visual", "--date", "2024-03-03"])
        .output()
        .unwrap();
    assert!(first.status.success());
    assert!(!first.stdout.is_empty());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
#[serial]
fn test_cli_report_for_empty_month() {
    let temp = tempdir().unwrap();
    base_echo_command(temp.path())
        .args(["report", "--month", "2024-03"])
        .assert()
        .success()
        .stdout(predicate::str::contains(QUIET_MONTH_OVERVIEW))
        .stdout(predicate::str::contains("1. Try taking the first step."));
}

#[test]
#[serial]
fn test_cli_relative_data_dir_rejected() {
    let temp = tempdir().unwrap();
    base_echo_command(temp.path())
        .env("ECHO_DIR", "relative/echo")
        .args(["practice", "Breath"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("absolute"));
}

#[test]
#[serial]
fn test_cli_natal_reading() {
    let temp = tempdir().unwrap();
    base_echo_command(temp.path())
        .args(["natal", "--birth-date", "2000-01-21"])
        .assert()
        .success()
        .stdout(predicate::str::contains("under the Full Moon"))
        .stdout(predicate::str::contains(
            echo_journal::MoonPhase::Full.info().archetype,
        ));

    base_echo_command(temp.path())
        .args(["natal", "--birth-date", "1990-02-30"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date format"));
    assert!(!temp.path().join("journal.json").exists());
}

#[test]
#[serial]
fn test_cli_updates_journal_with_uncached_phases() {
    let temp = tempdir().unwrap();
    let dir = temp.path();
    std::fs::write(
        dir.join("journal.json"),
        r#"{"version":1,"entries":[{"date":"2024-03-01","practices":[{"title":"Breath"}]}]}"#,
    )
    .unwrap();

    base_echo_command(dir)
        .args(["practice", "Walk", "--date", "2024-03-02"])
        .assert()
        .success();

    let journal = read_journal(dir);
    assert_eq!(journal.len(), 2);
    assert_eq!(
        journal.get(date(2024, 3, 1)).unwrap().moon_phase,
        echo_journal::lunar::phase_for(date(2024, 3, 1))
    );
}
