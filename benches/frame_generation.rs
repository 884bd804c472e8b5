use criterion::{black_box, criterion_group, criterion_main, Criterion};
use framesnap::{generate_frame, preview, Direction, HistoryEntry, PaddingConfiguration, Rect};

fn benchmark_frame_generation(c: &mut Criterion) {
    let screen = Rect::from_xywh(0.0, 0.0, 2560.0, 1415.0);
    let window = Rect::from_xywh(200.0, 150.0, 1200.0, 800.0);

    c.bench_function("generate_frame_all_directions", |b| {
        b.iter(|| {
            for direction in Direction::ALL {
                black_box(generate_frame(
                    black_box(window),
                    black_box(screen),
                    direction,
                    None,
                ));
            }
        })
    });

    let padding = PaddingConfiguration::uniform(12.0);
    let mut entry = HistoryEntry::new(window);
    entry.push_direction(Direction::LeftHalf);
    entry.push_direction(Direction::TopRightQuarter);

    c.bench_function("preview_padded_undo", |b| {
        b.iter(|| {
            black_box(preview(
                black_box(window),
                black_box(screen),
                Direction::Undo,
                &padding,
                Some(&entry),
            ))
        })
    });
}

criterion_group!(benches, benchmark_frame_generation);
criterion_main!(benches);
