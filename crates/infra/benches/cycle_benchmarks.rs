use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use groupmgr_auth::{GroupManager, ManagerConfig, PrincipalRef, Requester, ToggleBatch, UserRecord};
use groupmgr_infra::InMemoryDirectory;

const GROUPS: [&str; 4] = ["posters", "editors", "reviewers", "moderators"];

fn directory(users: usize) -> InMemoryDirectory {
    InMemoryDirectory::new(
        (0..users)
            .map(|i| UserRecord::new(format!("user{i}")).with_groups([GROUPS[i % GROUPS.len()]]))
            .collect(),
    )
}

fn config() -> ManagerConfig {
    ManagerConfig::new(GROUPS, vec![PrincipalRef::group("moderators")])
}

/// Render-only cycles (no submitted rows).
fn bench_render_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_cycle");
    let requester = Requester::new("alice").with_groups(["moderators"]);
    let config = config();

    for users in [10usize, 100, 1_000] {
        let dir = directory(users);
        let manager = GroupManager::new(&dir);
        let toggles = ToggleBatch::new();

        group.throughput(Throughput::Elements(users as u64));
        group.bench_with_input(BenchmarkId::from_parameter(users), &users, |b, _| {
            b.iter(|| black_box(manager.run(&config, &requester, &toggles)));
        });
    }

    group.finish();
}

/// Cycles that submit every row with only `editors` checked. The first
/// iteration adds `editors` and clears each user's other group; the directory
/// converges after that, so this measures the diff cost of idempotent resubmits.
fn bench_resubmit_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("resubmit_cycle");
    let requester = Requester::new("alice").with_groups(["moderators"]);
    let config = config();

    for users in [10usize, 100, 1_000] {
        let dir = directory(users);
        let manager = GroupManager::new(&dir);
        let mut toggles = ToggleBatch::new();
        for i in 0..users {
            toggles.check(format!("user{i}"), "editors");
        }

        group.throughput(Throughput::Elements(users as u64));
        group.bench_with_input(BenchmarkId::from_parameter(users), &users, |b, _| {
            b.iter(|| black_box(manager.run(&config, &requester, &toggles)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_render_cycle, bench_resubmit_cycle);
criterion_main!(benches);
