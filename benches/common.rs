use roboscore_vision::tools::synthetic::SceneBuilder;
use roboscore_vision::tools::{bench_limit_from_env, dataset_iter, dataset_root_from_env};
use roboscore_vision::{BallColor, PixelBuffer};
use std::path::PathBuf;

#[allow(dead_code)]
pub fn collect_dataset_images() -> (PathBuf, Vec<PathBuf>) {
    let root = dataset_root_from_env();
    let limit = bench_limit_from_env();

    let images: Vec<PathBuf> = dataset_iter(&root, limit).collect();
    (root, images)
}

/// Long-pipe scene: two boundary lines, a row of touching balls between them
/// and a few loose balls outside.
#[allow(dead_code)]
pub fn pipe_scene(width: usize, height: usize) -> PixelBuffer {
    let r = width as f32 * 0.025;
    let cy = height as f32 / 2.0;
    let left = width * 3 / 10;
    let right = width * 7 / 10;
    let mut scene = SceneBuilder::new(width, height)
        .expect("bench scene has non-zero size")
        .white_line(left, 3)
        .white_line(right, 3);

    let mut x = left as f32 + 3.0 * r;
    let mut color = BallColor::Red;
    while x + r < right as f32 - 2.0 * r {
        scene = scene.disk(x, cy, r, color);
        x += 2.0 * r;
        color = match color {
            BallColor::Red => BallColor::Blue,
            BallColor::Blue => BallColor::Red,
        };
    }
    scene
        .disk(2.0 * r, cy, r, BallColor::Blue)
        .disk(width as f32 - 2.0 * r, cy, r, BallColor::Red)
        .build()
}
