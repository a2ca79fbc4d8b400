use std::{
    ffi::OsString,
    io::{ErrorKind, Write as _},
    path::{Path, PathBuf},
    process::{Child, ChildStdin, Command, Stdio},
};

use anyhow::Context as _;

use crate::{
    foundation::core::{Canvas, Color, Fps, Timeline},
    foundation::error::{FramewrightError, FramewrightResult},
    render::raster::FrameRGBA,
};

/// Where and how a timeline's frames are written as H.264 MP4.
#[derive(Clone, Debug, PartialEq)]
pub struct EncodeConfig {
    /// Frame size; both sides even.
    pub canvas: Canvas,
    /// Output frame rate.
    pub fps: Fps,
    /// Destination `.mp4`.
    pub out_path: PathBuf,
    /// Replace an existing file at `out_path`.
    pub overwrite: bool,
    /// Opaque color showing through transparent pixels.
    pub matte: Color,
}

impl EncodeConfig {
    /// Canvas and frame rate come from `timeline`; overwrites, black matte.
    pub fn for_timeline(timeline: &Timeline, out_path: impl Into<PathBuf>) -> Self {
        Self {
            canvas: timeline.canvas,
            fps: timeline.fps,
            out_path: out_path.into(),
            overwrite: true,
            matte: Color::BLACK,
        }
    }

    /// yuv420p subsamples chroma 2x2, so both dimensions must be even.
    pub fn validate(&self) -> FramewrightResult<()> {
        let Canvas { width, height } = self.canvas;
        if !width.is_multiple_of(2) || !height.is_multiple_of(2) {
            return Err(FramewrightError::config(format!(
                "mp4 output needs an even canvas, got {width}x{height}"
            )));
        }
        if !self.overwrite && self.out_path.exists() {
            return Err(FramewrightError::config(format!(
                "output file '{}' already exists",
                self.out_path.display()
            )));
        }
        Ok(())
    }

    fn frame_rate_arg(&self) -> String {
        match self.fps {
            Fps { num, den: 1 } => num.to_string(),
            Fps { num, den } => format!("{num}/{den}"),
        }
    }

    /// Full ffmpeg argument list: raw RGBA on stdin, libx264/yuv420p out.
    fn ffmpeg_args(&self) -> Vec<OsString> {
        let Canvas { width, height } = self.canvas;
        let mut args: Vec<OsString> = vec![if self.overwrite { "-y" } else { "-n" }.into()];
        args.extend(
            [
                "-loglevel".to_string(),
                "error".into(),
                "-f".into(),
                "rawvideo".into(),
                "-pix_fmt".into(),
                "rgba".into(),
                "-s".into(),
                format!("{width}x{height}"),
                "-r".into(),
                self.frame_rate_arg(),
                "-i".into(),
                "pipe:0".into(),
                "-an".into(),
                "-c:v".into(),
                "libx264".into(),
                "-pix_fmt".into(),
                "yuv420p".into(),
                "-movflags".into(),
                "+faststart".into(),
            ]
            .map(OsString::from),
        );
        args.push(self.out_path.clone().into_os_string());
        args
    }
}

/// Create the directories above `path`, if any.
pub fn ensure_parent_dir(path: &Path) -> FramewrightResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// A running `ffmpeg` child fed one flattened frame at a time.
pub struct FfmpegEncoder {
    cfg: EncodeConfig,
    child: Child,
    stdin: Option<ChildStdin>,
    scratch: Vec<u8>,
    frames_written: u64,
}

impl FfmpegEncoder {
    /// Validate `cfg` and start `ffmpeg` reading raw frames from a pipe.
    pub fn spawn(cfg: EncodeConfig) -> FramewrightResult<Self> {
        cfg.validate()?;
        ensure_parent_dir(&cfg.out_path)?;

        tracing::debug!(out = %cfg.out_path.display(), fps = %cfg.frame_rate_arg(), "spawning ffmpeg");
        let mut child = Command::new("ffmpeg")
            .args(cfg.ffmpeg_args())
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => {
                    FramewrightError::encode("ffmpeg was not found on PATH; install it to write mp4")
                }
                _ => FramewrightError::encode(format!("failed to spawn ffmpeg: {e}")),
            })?;
        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| FramewrightError::encode("ffmpeg stdin was not captured"))?;

        Ok(Self {
            cfg,
            child,
            stdin: Some(stdin),
            scratch: Vec::new(),
            frames_written: 0,
        })
    }

    /// Flatten `frame` over the matte and pipe it to ffmpeg.
    pub fn push(&mut self, frame: &FrameRGBA) -> FramewrightResult<()> {
        let Canvas { width, height } = self.cfg.canvas;
        if (frame.width, frame.height) != (width, height) {
            return Err(FramewrightError::encode(format!(
                "frame is {}x{} but the encoder was opened for {width}x{height}",
                frame.width, frame.height
            )));
        }
        let stdin = self
            .stdin
            .as_mut()
            .ok_or_else(|| FramewrightError::encode("ffmpeg stdin is already closed"))?;

        frame.flatten_onto(self.cfg.matte, &mut self.scratch);
        stdin.write_all(&self.scratch).map_err(|e| {
            FramewrightError::encode(format!(
                "ffmpeg stopped accepting frames after {}: {e}",
                self.frames_written
            ))
        })?;
        self.frames_written += 1;
        Ok(())
    }

    /// Frames piped so far.
    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    /// Close stdin and wait for ffmpeg. Returns the frame count; a non-zero
    /// exit carries ffmpeg's stderr.
    pub fn finish(mut self) -> FramewrightResult<u64> {
        drop(self.stdin.take());
        let output = self
            .child
            .wait_with_output()
            .map_err(|e| FramewrightError::encode(format!("waiting for ffmpeg failed: {e}")))?;
        if !output.status.success() {
            return Err(FramewrightError::encode(format!(
                "ffmpeg {} writing '{}': {}",
                output.status,
                self.cfg.out_path.display(),
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        tracing::info!(
            frames = self.frames_written,
            out = %self.cfg.out_path.display(),
            "encoded mp4"
        );
        Ok(self.frames_written)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
