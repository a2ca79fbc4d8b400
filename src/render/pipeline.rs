use std::path::PathBuf;

use rayon::prelude::*;

use crate::{
    assets::store::ImageStore,
    compositions::{Composition, render_mounted},
    encode::ffmpeg::{EncodeConfig, FfmpegEncoder},
    foundation::core::{Color, FrameIndex, FrameRange},
    foundation::error::{FramewrightError, FramewrightResult},
    render::raster::{FrameRGBA, Rasterizer},
};

/// Evaluate and rasterize one frame of a mounted composition.
pub fn render_frame_rgba(
    comp: &dyn Composition,
    frame: FrameIndex,
    rasterizer: &Rasterizer,
    images: &ImageStore,
) -> FramewrightResult<FrameRGBA> {
    let scene = render_mounted(comp, frame)?;
    rasterizer.render(&scene, images)
}

/// How [`render_frames`] schedules work.
#[derive(Clone, Debug)]
pub struct RenderThreading {
    /// Render each chunk on a rayon pool.
    pub parallel: bool,
    /// Frames per chunk; 0 is treated as 1.
    pub chunk_size: usize,
    /// Pool size; `None` uses rayon's default.
    pub threads: Option<usize>,
}

impl Default for RenderThreading {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: 64,
            threads: None,
        }
    }
}

/// Render `range` (start inclusive, end exclusive) in frame order.
///
/// Frames are independent, so parallel rendering yields the same pixels as
/// sequential rendering.
#[tracing::instrument(skip_all, fields(composition = %comp.id(), frames = range.len_frames()))]
pub fn render_frames(
    comp: &dyn Composition,
    range: FrameRange,
    rasterizer: &Rasterizer,
    images: &ImageStore,
    threading: &RenderThreading,
) -> FramewrightResult<Vec<FrameRGBA>> {
    check_range(comp, range)?;
    let mut out = Vec::with_capacity(range.len_frames().min(4096) as usize);
    let pool = if threading.parallel {
        Some(build_thread_pool(threading.threads)?)
    } else {
        None
    };
    for_each_chunk(range, threading.chunk_size, |chunk| {
        let mut frames = render_chunk(comp, chunk, rasterizer, images, pool.as_ref())?;
        out.append(&mut frames);
        Ok(())
    })?;
    Ok(out)
}

/// Options for [`render_to_mp4`].
#[derive(Clone, Debug)]
pub struct RenderToMp4Opts {
    /// Frames to encode; `None` means the whole timeline.
    pub range: Option<FrameRange>,
    /// Opaque color under any remaining transparency.
    pub matte: Color,
    /// Replace an existing output file.
    pub overwrite: bool,
    /// Chunking and parallelism.
    pub threading: RenderThreading,
}

impl Default for RenderToMp4Opts {
    fn default() -> Self {
        Self {
            range: None,
            matte: Color::BLACK,
            overwrite: true,
            threading: RenderThreading::default(),
        }
    }
}

/// Render a composition and stream it through the system `ffmpeg` binary.
///
/// Frames are rendered chunk by chunk and written in order, so memory stays
/// bounded by the chunk size.
#[tracing::instrument(skip_all, fields(composition = %comp.id()))]
pub fn render_to_mp4(
    comp: &dyn Composition,
    out_path: impl Into<PathBuf>,
    opts: RenderToMp4Opts,
    rasterizer: &Rasterizer,
    images: &ImageStore,
) -> FramewrightResult<u64> {
    let timeline = comp.timeline();
    let range = opts.range.unwrap_or_else(|| timeline.range());
    check_range(comp, range)?;

    let mut enc = FfmpegEncoder::spawn(EncodeConfig {
        overwrite: opts.overwrite,
        matte: opts.matte,
        ..EncodeConfig::for_timeline(&timeline, out_path)
    })?;
    let pool = if opts.threading.parallel {
        Some(build_thread_pool(opts.threading.threads)?)
    } else {
        None
    };

    for_each_chunk(range, opts.threading.chunk_size, |chunk| {
        for frame in render_chunk(comp, chunk, rasterizer, images, pool.as_ref())? {
            enc.push(&frame)?;
        }
        tracing::debug!(done = chunk.end.0, "chunk encoded");
        Ok(())
    })?;

    enc.finish()
}

fn check_range(comp: &dyn Composition, range: FrameRange) -> FramewrightResult<()> {
    if range.is_empty() {
        return Err(FramewrightError::evaluation("render range must be non-empty"));
    }
    let total = comp.timeline().total_frames;
    if range.end.0 > total {
        return Err(FramewrightError::evaluation(format!(
            "render range ends at frame {} but the timeline has {total} frames",
            range.end.0
        )));
    }
    Ok(())
}

fn for_each_chunk(
    range: FrameRange,
    chunk_size: usize,
    mut f: impl FnMut(FrameRange) -> FramewrightResult<()>,
) -> FramewrightResult<()> {
    let chunk_size = normalized_chunk_size(chunk_size);
    let mut chunk_start = range.start.0;
    while chunk_start < range.end.0 {
        let chunk_end = (chunk_start + chunk_size).min(range.end.0);
        f(FrameRange::new(FrameIndex(chunk_start), FrameIndex(chunk_end))?)?;
        chunk_start = chunk_end;
    }
    Ok(())
}

fn render_chunk(
    comp: &dyn Composition,
    range: FrameRange,
    rasterizer: &Rasterizer,
    images: &ImageStore,
    pool: Option<&rayon::ThreadPool>,
) -> FramewrightResult<Vec<FrameRGBA>> {
    let frames: Vec<FrameIndex> = (range.start.0..range.end.0).map(FrameIndex).collect();
    match pool {
        None => frames
            .iter()
            .map(|&f| render_frame_rgba(comp, f, rasterizer, images))
            .collect(),
        // Indexed parallel collect keeps frame order.
        Some(pool) => pool.install(|| {
            frames
                .par_iter()
                .map(|&f| render_frame_rgba(comp, f, rasterizer, images))
                .collect()
        }),
    }
}

fn build_thread_pool(threads: Option<usize>) -> FramewrightResult<rayon::ThreadPool> {
    if threads == Some(0) {
        return Err(FramewrightError::config(
            "render threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| FramewrightError::render(format!("failed to build rayon thread pool: {e}")))
}

fn normalized_chunk_size(chunk_size: usize) -> u64 {
    chunk_size.max(1) as u64
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
