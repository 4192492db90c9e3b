//! Benchmarks for the ribbon simulation.

use criterion::{criterion_group, criterion_main, Criterion};
use ribbon::{Ribbon, RibbonConfig, RingList, Segment, Viewport};

fn bench_ribbon_scroll(c: &mut Criterion) {
    c.bench_function("ribbon_800x600_600_ticks", |b| {
        b.iter(|| {
            let config = RibbonConfig::new(Viewport::new(800.0f32, 600.0)).with_seed(1);
            let mut ribbon = Ribbon::new(config).unwrap();
            for tick in 0..600 {
                ribbon.scroll(if (tick / 150) % 2 == 0 { 2.0 } else { -2.0 });
                ribbon.update();
            }
            ribbon.wrap_count()
        });
    });
}

fn bench_tall_ribbon(c: &mut Criterion) {
    c.bench_function("ribbon_tall_viewport_60_ticks", |b| {
        b.iter(|| {
            let config = RibbonConfig::new(Viewport::new(800.0f32, 20_000.0));
            let mut ribbon = Ribbon::new(config).unwrap();
            for _ in 0..60 {
                ribbon.scroll(1.0);
                ribbon.update();
            }
            ribbon.kinetic_energy()
        });
    });
}

fn bench_segments(c: &mut Criterion) {
    let ribbon = Ribbon::new(RibbonConfig::new(Viewport::new(800.0f32, 2_000.0))).unwrap();
    c.bench_function("ribbon_segments_draw_order", |b| {
        b.iter(|| {
            let mut drawn: Vec<Segment<f32>> = Vec::new();
            ribbon.render(&mut drawn);
            drawn.len()
        });
    });
}

fn bench_ring_rotation(c: &mut Criterion) {
    c.bench_function("ring_list_1000_rotations", |b| {
        b.iter(|| {
            let mut list: RingList<usize> = (0..64).collect();
            for i in 0..1000 {
                if i % 2 == 0 {
                    list.move_head_to_tail();
                } else {
                    list.move_tail_to_head();
                }
            }
            list.len()
        });
    });
}

criterion_group!(benches, bench_ribbon_scroll, bench_tall_ribbon, bench_segments, bench_ring_rotation);
criterion_main!(benches);
