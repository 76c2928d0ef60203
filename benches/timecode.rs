use criterion::{black_box, criterion_group, criterion_main, Criterion};

use showreel::model::{Clip, Definition, Reel, Standard, Timecode};

fn arithmetic(c: &mut Criterion) {
    let a = Timecode::from_string("01:23:45:12", Standard::PAL).unwrap();
    let b = Timecode::from_string("00:10:59:24", Standard::PAL).unwrap();

    c.bench_function("timecode add", |bench| {
        bench.iter(|| black_box(&a).add(black_box(&b)).unwrap())
    });
    c.bench_function("timecode subtract", |bench| {
        bench.iter(|| black_box(&b).subtract(black_box(&a)).unwrap())
    });
    c.bench_function("timecode parse", |bench| {
        bench.iter(|| Timecode::from_string(black_box("12:34:56:29"), Standard::NTSC).unwrap())
    });
}

fn assembly(c: &mut Criterion) {
    let clips: Vec<Clip> = (1..=500)
        .map(|frames| {
            Clip::new(
                format!("clip {frames}"),
                "",
                Standard::NTSC,
                Definition::HD,
                Timecode::zero(Standard::NTSC),
                Timecode::from_frames(frames * 7, Standard::NTSC),
            )
            .unwrap()
        })
        .collect();

    c.bench_function("assemble 500 clips", |bench| {
        bench.iter(|| Reel::new("bench", Standard::NTSC, Definition::HD, black_box(clips.clone())).unwrap())
    });
}

criterion_group!(benches, arithmetic, assembly);
criterion_main!(benches);
