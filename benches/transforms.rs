use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::{IVec2, Mat4, Vec2, Vec3};
use viewport_camera::camera::Camera;
use viewport_camera::controller::{CameraController, Motion};
use viewport_camera::math::{Box3, Matrix4};

fn sample_affine() -> Matrix4 {
    let mut m = Matrix4::from_translation(Vec3::new(1.0, -2.0, 3.0));
    m.rotate(Vec3::new(0.3, 1.1, -0.7));
    m.scale(Vec3::new(1.5, 0.5, 2.0));
    m
}

fn bench_inverse(c: &mut Criterion) {
    let affine = sample_affine();
    let projective = Matrix4::from(Mat4::perspective_rh_gl(0.8, 1.6, 0.1, 100.0));

    let mut group = c.benchmark_group("matrix_inverse");
    group.bench_function("affine", |b| b.iter(|| black_box(affine).inverse()));
    group.bench_function("projective", |b| b.iter(|| black_box(projective).inverse()));
    group.bench_function("glam_reference", |b| {
        let g = Mat4::from(affine);
        b.iter(|| black_box(g).inverse())
    });
    group.finish();
}

fn bench_box_transform(c: &mut Criterion) {
    let b = Box3::new(Vec3::new(-1.0, -2.0, -3.0), Vec3::new(4.0, 5.0, 6.0));
    let affine = sample_affine();
    let projective = Matrix4::from(Mat4::perspective_rh_gl(0.8, 1.6, 0.1, 100.0));

    let mut group = c.benchmark_group("box_transform");
    group.bench_function("arvo_affine", |bench| {
        bench.iter(|| black_box(b).transformed(black_box(&affine)))
    });
    group.bench_function("projective_corners", |bench| {
        bench.iter(|| black_box(b).transformed(black_box(&projective)))
    });
    group.finish();
}

fn bench_project_unproject(c: &mut Criterion) {
    let mut group = c.benchmark_group("camera");

    for perspective in [true, false] {
        let mut camera = Camera::new(Vec3::new(5.0, 5.0, 5.0), IVec2::new(1280, 720), 35.0);
        camera.set_perspective(perspective);
        let label = if perspective { "perspective" } else { "orthographic" };

        group.bench_with_input(BenchmarkId::new("project", label), &camera, |b, camera| {
            b.iter(|| camera.project(black_box(Vec3::new(0.5, 0.25, -0.5))))
        });
        group.bench_with_input(BenchmarkId::new("unproject", label), &camera, |b, camera| {
            b.iter(|| camera.unproject(black_box(Vec2::new(320.0, 200.0))))
        });
    }

    group.finish();
}

fn bench_gesture(c: &mut Criterion) {
    let mut group = c.benchmark_group("gesture_update");

    for motion in [Motion::Track, Motion::Tumble, Motion::Dolly] {
        group.bench_function(format!("{motion:?}"), |b| {
            let mut camera = Camera::new(Vec3::new(5.0, 5.0, 5.0), IVec2::new(1280, 720), 35.0);
            let mut controller = CameraController::new(&mut camera);
            controller.motion_start(motion, IVec2::new(640, 360));
            let mut x = 640;
            b.iter(|| {
                x = if x > 900 { 640 } else { x + 1 };
                controller.motion_update(black_box(IVec2::new(x, 380)));
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_inverse,
    bench_box_transform,
    bench_project_unproject,
    bench_gesture
);

criterion_main!(benches);
