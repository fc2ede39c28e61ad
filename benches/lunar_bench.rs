//! Performance benchmarks for the moon calculator and monthly statistics.
//!
//! Run with: cargo bench
//!
//! These benchmarks establish baseline performance metrics for:
//! - Lunar details over spans of consecutive days
//! - Monthly snapshots over journals of various sizes

use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use echo_journal::aggregate::MonthlySnapshot;
use echo_journal::journal_core::{ChatMessage, DayEntry, MonthKey, ProgressStatus, TodayAwareness};
use echo_journal::lunar::lunar_details;
use echo_journal::tarot::Deck;

fn start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 1).expect("valid benchmark date")
}

/// Benchmark lunar details for spans of consecutive days.
fn bench_lunar_details(c: &mut Criterion) {
    let mut group = c.benchmark_group("lunar_details");

    for days in [31i64, 365, 3650] {
        group.throughput(Throughput::Elements(days as u64));
        group.bench_with_input(BenchmarkId::from_parameter(days), &days, |b, &days| {
            b.iter(|| {
                for offset in 0..days {
                    black_box(lunar_details(black_box(start_date() + Duration::days(offset))));
                }
            });
        });
    }

    group.finish();
}

/// A journal with a finished reflection every day, cycling through the deck.
fn synthetic_entries(days: i64, deck: &Deck) -> Vec<DayEntry> {
    (0..days)
        .map(|offset| {
            let mut entry = DayEntry::new(start_date() + Duration::days(offset));
            let card = &deck.cards()[offset as usize % deck.len()];
            let mut reflection = TodayAwareness::begin(&card.id);
            reflection.chat_history = vec![
                ChatMessage::assistant("What stands out in the card?"),
                ChatMessage::user("The light in the corner, and how still everything is."),
            ];
            reflection.status = ProgressStatus::Done;
            reflection.complexity_score = (offset % 100) as u32;
            entry.today_awareness = Some(reflection);
            entry
        })
        .collect()
}

/// Benchmark the monthly snapshot with various journal sizes.
fn bench_monthly_snapshot(c: &mut Criterion) {
    let mut group = c.benchmark_group("monthly_snapshot");
    let deck = Deck::builtin();
    let month = MonthKey::new(2020, 6).expect("valid benchmark month");

    for days in [30i64, 365, 1825] {
        let entries = synthetic_entries(days, &deck);
        group.throughput(Throughput::Elements(days as u64));
        group.bench_with_input(BenchmarkId::from_parameter(days), &entries, |b, entries| {
            b.iter(|| {
                black_box(MonthlySnapshot::build(
                    black_box(entries),
                    &deck,
                    month,
                ));
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_lunar_details, bench_monthly_snapshot);
criterion_main!(benches);
