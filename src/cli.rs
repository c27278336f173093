use std::{
    num::NonZeroUsize,
    sync::atomic::{AtomicUsize, Ordering},
    thread,
    time::Instant,
};

use anyhow::anyhow;
use clap::Parser;
use indicatif::ProgressBar;
use minibvh::{
    Bvh, Hittable as _, HittableList, RandomSpheres, Sphere,
    geometry::{Interval, Ray},
};

/// Number of rays a worker takes at once
const CHUNK_SIZE: usize = 4096;

#[derive(Parser)]
#[command(name = "minibvh-cli")]
#[command(about = "Builds a BVH over random spheres and traces random rays through it", long_about = None)]
struct Args {
    /// Number of spheres in the scene
    #[arg(short = 'n', long, default_value_t = 100_000)]
    count: usize,
    /// Seed for the scene and ray generator
    #[arg(short, long, default_value_t = 0)]
    seed: u64,
    /// Number of rays to trace
    #[arg(short, long, default_value_t = 1_000_000)]
    rays: usize,
    /// Number of worker threads (default: one per CPU core)
    #[arg(short, long)]
    workers: Option<NonZeroUsize>,
    /// Print the whole hierarchy after building it
    #[arg(long)]
    print_tree: bool,
    /// Check every traced ray against testing all spheres one by one
    #[arg(long)]
    verify: bool,
}

#[derive(Debug, Default)]
struct TraceSummary {
    hits: usize,
    mismatches: usize,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let generator = RandomSpheres::builder()
        .count(args.count)
        .seed(args.seed)
        .light_every(100)
        .material_count(8)
        .build();

    let start = Instant::now();
    let bvh = Bvh::build(generator.spheres())?;
    println!(
        "Built BVH over {} spheres in {:.2?}",
        bvh.primitive_count(),
        start.elapsed()
    );
    bvh.print_statistics();
    if args.print_tree {
        bvh.print_tree();
    }

    let reference = args
        .verify
        .then(|| HittableList::from(bvh.primitives().to_vec()));
    let rays = generator.rays(args.rays);

    let cores = core_affinity::get_core_ids().unwrap_or_default();
    let worker_count = match args.workers {
        Some(workers) => workers.get(),
        None => cores.len().max(1),
    };

    let start = Instant::now();
    let summary = trace(&bvh, reference.as_ref(), &rays, &cores, worker_count)?;
    let elapsed = start.elapsed();

    println!(
        "Traced {} rays with {} workers in {:.2?} ({:.0} rays/s), {} hits",
        rays.len(),
        worker_count,
        elapsed,
        rays.len() as f64 / elapsed.as_secs_f64(),
        summary.hits
    );

    if reference.is_some() {
        if summary.mismatches > 0 {
            return Err(anyhow!(
                "{} rays disagree with the brute force search",
                summary.mismatches
            ));
        }
        println!("All rays match the brute force search");
    }

    Ok(())
}

fn trace(
    bvh: &Bvh<Sphere>,
    reference: Option<&HittableList<Sphere>>,
    rays: &[Ray],
    cores: &[core_affinity::CoreId],
    worker_count: usize,
) -> anyhow::Result<TraceSummary> {
    let chunks: Vec<&[Ray]> = rays.chunks(CHUNK_SIZE).collect();
    let next_chunk_index = AtomicUsize::new(0);
    let hits = AtomicUsize::new(0);
    let mismatches = AtomicUsize::new(0);
    let bar = ProgressBar::new(rays.len() as u64);

    // References that can be moved into the workers
    let chunks = &chunks;
    let next_chunk_index = &next_chunk_index;
    let hits = &hits;
    let mismatches = &mismatches;
    let bar = &bar;

    thread::scope(|scope| -> anyhow::Result<()> {
        let handles = (0..worker_count)
            .map(|worker_id| {
                let core = cores.get(worker_id % cores.len().max(1)).copied();

                thread::Builder::new()
                    .name(format!("worker{worker_id}"))
                    .spawn_scoped(scope, move || {
                        if let Some(core) = core {
                            core_affinity::set_for_current(core);
                        }

                        let mut summary = TraceSummary::default();
                        while let Some(chunk) =
                            chunks.get(next_chunk_index.fetch_add(1, Ordering::Relaxed))
                        {
                            for ray in chunk.iter() {
                                trace_ray(bvh, reference, ray, &mut summary);
                            }
                            bar.inc(chunk.len() as u64);
                        }

                        hits.fetch_add(summary.hits, Ordering::Relaxed);
                        mismatches.fetch_add(summary.mismatches, Ordering::Relaxed);
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        for handle in handles {
            handle
                .join()
                .map_err(|_| anyhow!("A worker thread panicked"))?;
        }

        Ok(())
    })?;

    bar.finish_and_clear();

    Ok(TraceSummary {
        hits: hits.load(Ordering::Acquire),
        mismatches: mismatches.load(Ordering::Acquire),
    })
}

fn trace_ray(
    bvh: &Bvh<Sphere>,
    reference: Option<&HittableList<Sphere>>,
    ray: &Ray,
    summary: &mut TraceSummary,
) {
    let ray_length = Interval::starting_at(0.0);
    let hit = bvh.intersect(ray, ray_length);

    if hit.is_some() {
        summary.hits += 1;
    }

    if let Some(reference) = reference {
        let expected = reference.intersect(ray, ray_length);
        if expected.map(|hit| hit.t) != hit.map(|hit| hit.t) {
            summary.mismatches += 1;
        }
    }
}
