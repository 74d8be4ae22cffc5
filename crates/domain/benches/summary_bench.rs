use std::sync::Arc;

use chrono::{Days, NaiveDate};
use common::ProjectId;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use domain::{CreateEntry, CreateProject, EntryService, ProjectService, ProjectSummary};
use rust_decimal::Decimal;
use store::{Entry, InMemoryEntryStore, InMemoryProjectStore};

type Service = ProjectService<InMemoryProjectStore, InMemoryEntryStore>;

fn start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()
}

fn create_service() -> Service {
    let projects = InMemoryProjectStore::new();
    let entries = Arc::new(EntryService::new(InMemoryEntryStore::new(), projects.clone()));
    ProjectService::new(projects, entries)
}

/// Builds `count` entries spread over `count / 3` days.
fn make_entries(count: usize) -> Vec<Entry> {
    (0..count)
        .map(|i| {
            let day = start_date() + Days::new((i / 3) as u64);
            Entry::new(
                ProjectId::new(1),
                day,
                Decimal::new(125 + (i % 7) as i64, 2),
                None,
            )
        })
        .collect()
}

fn bench_summary_from_entries(c: &mut Criterion) {
    let mut group = c.benchmark_group("domain/summary_from_entries");
    for count in [10, 100, 1_000] {
        let entries = make_entries(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &entries, |b, entries| {
            b.iter(|| ProjectSummary::from_entries(entries));
        });
    }
    group.finish();
}

fn bench_create_entry(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let service = create_service();
    let project_id = rt.block_on(async {
        service
            .create(CreateProject::new("Bench", start_date(), None))
            .await
            .unwrap()
            .id
            .unwrap()
    });

    c.bench_function("domain/create_entry", |b| {
        b.iter(|| {
            rt.block_on(async {
                service
                    .entry_service()
                    .create(CreateEntry::new(
                        project_id,
                        start_date(),
                        Decimal::new(150, 2),
                        None,
                    ))
                    .await
                    .unwrap();
            });
        });
    });
}

fn bench_get_summary_100(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let service = create_service();

    // Pre-populate: 1 project with 100 entries
    let project_id = rt.block_on(async {
        let id = service
            .create(CreateProject::new("Bench", start_date(), None))
            .await
            .unwrap()
            .id
            .unwrap();
        for entry in make_entries(100) {
            service
                .entry_service()
                .create(CreateEntry::new(id, entry.date, entry.time_spent, None))
                .await
                .unwrap();
        }
        id
    });

    c.bench_function("domain/get_summary_100_entries", |b| {
        b.iter(|| {
            rt.block_on(async {
                service.get_summary(project_id).await.unwrap();
            });
        });
    });
}

criterion_group!(
    benches,
    bench_summary_from_entries,
    bench_create_entry,
    bench_get_summary_100,
);
criterion_main!(benches);
