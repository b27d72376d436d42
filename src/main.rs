use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use raylib::prelude::*;
use tracing::{info, warn};

use kenburns::texture_loader::load_sorted_image_paths;
use kenburns::{FromPath, KenBurnsConfig, KenBurnsDatasource, KenBurnsResult, KenBurnsView};

mod cli;
mod datasource;
mod ffmpeg;
mod logging;
mod renderer;

use crate::cli::{Args, SourceKind};
use crate::datasource::DirectoryDatasource;
use crate::ffmpeg::Ffmpeg;
use crate::logging::{LoggingDelegate, init_logging};
use crate::renderer::Renderer;

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level);

    // --- Load Image Paths ---
    let image_paths = load_sorted_image_paths(&args.directory)
        .with_context(|| format!("failed to list images in {}", args.directory.display()))?;
    info!(directory = %args.directory.display(), count = image_paths.len(), "found images");

    let (width, height) = args.render_size();
    let (mut rl, thread) = raylib::init()
        .size(width as i32 / 2, height as i32 / 2)
        .title("Ken Burns")
        .vsync()
        .resizable()
        .build();
    rl.set_target_fps(args.fps);
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);

    // --- View, Delegate, Datasource ---
    let frame = Vector2::new(width as f32, height as f32);
    let mut view = match args.seed {
        Some(seed) => KenBurnsView::with_seed(frame, KenBurnsConfig::default(), seed),
        None => KenBurnsView::new(frame),
    };
    let delegate = Rc::new(LoggingDelegate::default());
    view.set_delegate(&delegate);
    let datasource: Rc<dyn KenBurnsDatasource<Image>> =
        Rc::new(DirectoryDatasource::new(image_paths.clone()));

    let start = |view: &mut KenBurnsView<Image>| -> KenBurnsResult<()> {
        delegate.reset();
        let landscape = !args.portrait;
        match args.source {
            SourceKind::Images => {
                let images = load_all(&image_paths);
                view.animate_with_images(images, args.duration, args.looping, landscape)
            }
            SourceKind::Paths => {
                view.animate_with_image_paths(image_paths.clone(), args.duration, args.looping, landscape)
            }
            SourceKind::Datasource => {
                view.start_animation_with_datasource(&datasource, args.duration, args.looping, landscape)
            }
        }
    };
    start(&mut view)?;

    let mut ffmpeg = args
        .output
        .as_deref()
        .map(|output| Ffmpeg::new(width, height, args.fps, output))
        .transpose()?;
    let frame_time = 1.0 / args.fps as f32;

    let mut framebuffer = rl
        .load_render_texture(&thread, width, height)
        .map_err(|e| anyhow!("failed to create render texture: {e}"))?;
    let mut renderer = Renderer::default();

    // --- Main Loop ---
    while !rl.window_should_close() {
        if rl.is_key_pressed(KeyboardKey::KEY_S) {
            view.stop_animation();
        }
        if rl.is_key_pressed(KeyboardKey::KEY_C) {
            view.clear();
        }
        if rl.is_key_pressed(KeyboardKey::KEY_R) {
            start(&mut view)?;
        }

        // Fixed steps while recording so the video plays at real speed
        let dt = if ffmpeg.is_some() { frame_time } else { rl.get_frame_time() };
        view.update(dt);

        renderer.draw(&mut rl, &thread, &mut framebuffer, &view)?;

        // Draw inverted copy of framebuffer to the screen for feedback
        {
            let mut d = rl.begin_drawing(&thread);
            d.clear_background(Color::BLACK);
            let sw = d.get_screen_width() as f32;
            let sh = d.get_screen_height() as f32;
            d.draw_texture_pro(
                &framebuffer,
                Rectangle::new(0.0, 0.0, framebuffer.width() as f32, -(framebuffer.height() as f32)),
                Rectangle::new(0.0, 0.0, sw, sh),
                Vector2::new(0.0, 0.0),
                0.0,
                Color::WHITE,
            );
        }

        if let Some(encoder) = ffmpeg.as_mut() {
            let image = framebuffer
                .load_image()
                .map_err(|e| anyhow!("failed to read back frame: {e}"))?;
            encoder.write(&image)?;

            if delegate.is_finished() {
                break;
            }
        }
    }

    if let Some(encoder) = ffmpeg.take() {
        encoder.finish()?;
    }
    Ok(())
}

/// Decodes every path up front, skipping files that fail.
fn load_all(paths: &[PathBuf]) -> Vec<Image> {
    paths
        .iter()
        .filter_map(|path| match Image::from_path(path) {
            Ok(image) => Some(image),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "skipping image");
                None
            }
        })
        .collect()
}
