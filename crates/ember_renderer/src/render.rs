//! Parallel sample-pass execution.

use crate::film::Film;
use crate::integrator::ray_color;
use crate::sampling::gen_f32;
use crate::scenes::Scene;
use crate::MAX_DEPTH;
use ember_math::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::thread;

/// Accumulate one jittered sample per pixel into `film`.
///
/// Film columns are dealt round-robin to `worker_count` scoped threads
/// (column `x` goes to worker `x % worker_count`), so neighboring columns
/// of uneven cost spread across workers. Each worker owns an independent
/// entropy-seeded RNG; no locking is needed because every column slice is
/// exclusively held by exactly one worker.
pub fn render_pass(film: &mut Film, scene: &Scene, worker_count: usize) {
    let worker_count = worker_count.max(1);
    let width = film.width();
    let height = film.height();

    let mut assignments: Vec<Vec<(usize, &mut [Vec3])>> =
        (0..worker_count).map(|_| Vec::new()).collect();
    for (x, column) in film.columns_mut() {
        assignments[x % worker_count].push((x, column));
    }

    thread::scope(|s| {
        for columns in assignments {
            s.spawn(move || {
                let mut rng = StdRng::from_entropy();
                for (x, column) in columns {
                    for (y, pixel) in column.iter_mut().enumerate() {
                        let u = (x as f32 + gen_f32(&mut rng)) / (width - 1) as f32;
                        let v = (y as f32 + gen_f32(&mut rng)) / (height - 1) as f32;
                        let ray = scene.camera.get_ray(u, v, &mut rng);
                        *pixel += ray_color(
                            &ray,
                            scene.background,
                            scene.world.as_ref(),
                            MAX_DEPTH,
                            &mut rng,
                        );
                    }
                }
            });
        }
    });

    film.complete_pass();
}
