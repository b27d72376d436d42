use std::io::Write;
use std::path::Path;
use std::process::{Child, ChildStdin, Command, Stdio};

use anyhow::{Context, Result, bail};
use raylib::prelude::*;
use tracing::{error, info};

/// An `ffmpeg` child fed raw RGBA frames on stdin.
pub struct Ffmpeg {
    process: Child,
    stdin: Option<ChildStdin>,
}

impl Ffmpeg {
    pub fn new(width: u32, height: u32, fps: u32, video_name: &Path) -> Result<Ffmpeg> {
        let mut process = Command::new("ffmpeg")
            .stdin(Stdio::piped())
            .args(["-loglevel", "error"])
            .arg("-y")
            .args(["-f", "rawvideo"])
            .args(["-pixel_format", "rgba"])
            .args(["-video_size", &format!("{}x{}", width, height)])
            .args(["-framerate", &format!("{}", fps)])
            .args(["-i", "-"])
            .args(["-c:v", "libx264"])
            .args(["-pix_fmt", "yuv420p"])
            .arg(video_name)
            .spawn()
            .context("failed to start ffmpeg")?;
        let stdin = process.stdin.take().context("failed to open ffmpeg stdin")?;
        info!(output = %video_name.display(), width, height, fps, "recording");
        Ok(Ffmpeg { process, stdin: Some(stdin) })
    }

    /// Writes one frame read back from a render texture.
    pub fn write(&mut self, image: &Image) -> Result<()> {
        let stdin = self.stdin.as_mut().context("ffmpeg stdin already closed")?;
        let width = image.width() as usize;
        let height = image.height() as usize;
        let row_len = width * 4; // 4 bytes per pixel (RGBA)

        // Render textures come back bottom row first, ffmpeg wants top first
        let pixels = unsafe { std::slice::from_raw_parts(image.data() as *const u8, row_len * height) };
        for row in pixels.chunks_exact(row_len).rev() {
            stdin.write_all(row).context("failed to write frame to ffmpeg")?;
        }
        Ok(())
    }

    /// Closes the pipe and waits for the encoder to flush.
    pub fn finish(mut self) -> Result<()> {
        self.close()
    }

    fn close(&mut self) -> Result<()> {
        if self.stdin.take().is_none() {
            return Ok(());
        }
        let status = self.process.wait().context("failed to wait for ffmpeg")?;
        if !status.success() {
            bail!("ffmpeg exited with {status}");
        }
        Ok(())
    }
}

impl Drop for Ffmpeg {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            error!(error = %e, "ffmpeg did not finish cleanly");
        }
    }
}
