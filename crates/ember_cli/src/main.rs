use anyhow::{bail, Context, Result};
use clap::Parser;
use log::info;
use std::time::Instant;

mod cli;
mod logger;

use cli::Args;
use ember_renderer::{render_pass, scene_by_name, Film, IMAGE_HEIGHT, IMAGE_WIDTH, SCENE_NAMES};
use logger::init_logger;

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.debug_level.into());

    if args.list_scenes {
        for name in SCENE_NAMES {
            println!("{name}");
        }
        return Ok(());
    }

    let Some(scene) = scene_by_name(&args.scene) else {
        bail!(
            "unknown scene '{}' (try --list-scenes for the full menu)",
            args.scene
        );
    };

    let threads = args.threads.unwrap_or_else(|| {
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    });

    info!(
        "rendering '{}' at {IMAGE_WIDTH}x{IMAGE_HEIGHT}, {} samples/pixel on {} threads",
        args.scene, args.samples_per_pixel, threads
    );

    let mut film = Film::new(IMAGE_WIDTH, IMAGE_HEIGHT);
    let start = Instant::now();

    for pass in 1..=args.samples_per_pixel {
        let pass_start = Instant::now();
        render_pass(&mut film, &scene, threads);
        info!(
            "pass {pass}/{} done in {:.2?}",
            args.samples_per_pixel,
            pass_start.elapsed()
        );
    }

    info!(
        "accumulated {} passes in {:.2?}",
        film.passes(),
        start.elapsed()
    );

    let rgba = film.to_rgba(args.gamma);
    image::save_buffer(
        &args.output,
        &rgba,
        IMAGE_WIDTH,
        IMAGE_HEIGHT,
        image::ColorType::Rgba8,
    )
    .with_context(|| format!("failed to write {}", args.output))?;
    info!("wrote {}", args.output);

    Ok(())
}
