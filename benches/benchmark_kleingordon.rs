use criterion::{criterion_group, criterion_main, Criterion};
use kleingordon::bases::{fourier_c2c, fourier_r2c};
use kleingordon::field::Field3;
use kleingordon::kg::KleinGordon3D;
use kleingordon::space::Space3;
use kleingordon::Integrate;

pub fn bench_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("KleinGordon");
    group.significance_level(0.1).sample_size(10);
    for n in [16, 32].iter() {
        let mut kg = KleinGordon3D::new(*n, 1.0, 0.005);
        let name = format!("Update {} x {} x {}", *n, *n, *n);
        group.bench_function(&name, |b| b.iter(|| kg.update()));
    }
    group.finish();
}

pub fn bench_transform(c: &mut Criterion) {
    let mut group = c.benchmark_group("Transform");
    group.significance_level(0.1).sample_size(10);
    for n in [16, 32].iter() {
        let space = Space3::new(&fourier_c2c(*n), &fourier_c2c(*n), &fourier_r2c(*n));
        let mut field = Field3::new(&space);
        let name = format!("Forward + Backward {} x {} x {}", *n, *n, *n);
        group.bench_function(&name, |b| {
            b.iter(|| {
                field.forward();
                field.backward();
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_update, bench_transform);
criterion_main!(benches);
