//! Benchmarks for the localization and planning cores.
//!
//! Run with: `cargo bench`
//! View HTML reports in: `target/criterion/`

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use marga_core::core::{Coord, Pose};
use marga_core::grid::{Grid, Marker, MarkerObservation};
use marga_core::localization::{FilterConfig, ParticleFilter};
use marga_core::planning;

/// A mid-sized arena with markers on each wall and a few obstacle
/// blocks to route around.
fn benchmark_grid() -> Grid {
    let mut grid = Grid::new(26, 18, 25.0);
    grid.set_start(Coord::new(1, 1));
    grid.add_goal(Coord::new(24, 16));

    grid.add_marker(Marker::new(0.0, 9.0, 0.0, "west"));
    grid.add_marker(Marker::new(25.0, 9.0, 180.0, "east"));
    grid.add_marker(Marker::new(13.0, 0.0, 90.0, "south"));
    grid.add_marker(Marker::new(13.0, 17.0, -90.0, "north"));

    for y in 4..14 {
        grid.add_obstacle(Coord::new(8, y));
    }
    for y in 0..10 {
        grid.add_obstacle(Coord::new(16, y));
    }
    grid
}

fn observations_from(grid: &Grid, pose: &Pose) -> Vec<MarkerObservation> {
    grid.markers()
        .iter()
        .map(|m| MarkerObservation::from_pose(&m.pose().relative_to(pose)))
        .collect()
}

fn bench_measurement_update(c: &mut Criterion) {
    let grid = benchmark_grid();
    let truth = Pose::new(4.5, 9.5, 0.0);
    let obs = observations_from(&grid, &truth);

    let mut group = c.benchmark_group("measurement_update");
    for &n in &[500usize, 2000] {
        group.bench_function(format!("{}_particles", n), |b| {
            let mut filter = ParticleFilter::new(FilterConfig {
                num_particles: n,
                seed: 42,
                ..Default::default()
            });
            let belief = filter.random_belief(&grid);
            b.iter(|| {
                let updated =
                    filter.measurement_update(&grid, black_box(belief.clone()), black_box(&obs));
                black_box(updated)
            });
        });
    }
    group.finish();
}

fn bench_motion_update(c: &mut Criterion) {
    let grid = benchmark_grid();
    let mut filter = ParticleFilter::new(FilterConfig {
        num_particles: 2000,
        seed: 42,
        ..Default::default()
    });
    let belief = filter.random_belief(&grid);
    let odom = Pose::new(0.5, 0.0, 3.0);

    c.bench_function("motion_update/2000_particles", |b| {
        b.iter(|| black_box(filter.motion_update(black_box(&belief), black_box(&odom))))
    });
}

fn bench_search(c: &mut Criterion) {
    let grid = benchmark_grid();

    let mut group = c.benchmark_group("search");
    group.bench_function("arena_26x18", |b| {
        b.iter(|| planning::search_to_first_goal(black_box(&grid)).unwrap())
    });

    // Worst case for the frontier: an open grid corner to corner.
    let open = Grid::new(64, 64, 25.0);
    group.bench_function("open_64x64", |b| {
        b.iter(|| planning::search(black_box(&open), Coord::new(0, 0), Coord::new(63, 63)).unwrap())
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_measurement_update,
    bench_motion_update,
    bench_search
);
criterion_main!(benches);
