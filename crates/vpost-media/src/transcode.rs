//! FFmpeg normalization with pass-through fallback.
//!
//! Publishing should not hard-fail just because the optional normalization
//! tool is missing, so a `Transcoder` built without ffmpeg copies the raw
//! file unchanged and reports success.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, info};

use crate::error::{MediaError, MediaResult};

/// Builder for FFmpeg invocations.
#[derive(Debug, Clone)]
pub struct FfmpegCommand {
    input: PathBuf,
    output: PathBuf,
    output_args: Vec<String>,
}

impl FfmpegCommand {
    pub fn new(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Self {
        Self {
            input: input.as_ref().to_path_buf(),
            output: output.as_ref().to_path_buf(),
            output_args: Vec::new(),
        }
    }

    /// Add an output argument (after `-i`).
    pub fn output_arg(mut self, arg: impl Into<String>) -> Self {
        self.output_args.push(arg.into());
        self
    }

    pub fn video_codec(self, codec: impl Into<String>) -> Self {
        self.output_arg("-c:v").output_arg(codec)
    }

    pub fn preset(self, preset: impl Into<String>) -> Self {
        self.output_arg("-preset").output_arg(preset)
    }

    pub fn crf(self, crf: u8) -> Self {
        self.output_arg("-crf").output_arg(crf.to_string())
    }

    pub fn audio_codec(self, codec: impl Into<String>) -> Self {
        self.output_arg("-c:a").output_arg(codec)
    }

    pub fn audio_bitrate(self, bitrate: impl Into<String>) -> Self {
        self.output_arg("-b:a").output_arg(bitrate)
    }

    /// The fixed delivery-compatible encode: H.264 + AAC in a
    /// faststart MP4 container.
    pub fn delivery_encode(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Self {
        Self::new(input, output)
            .video_codec("libx264")
            .preset("veryfast")
            .crf(23)
            .audio_codec("aac")
            .audio_bitrate("128k")
            .output_arg("-movflags")
            .output_arg("+faststart")
    }

    /// Build the full argument list.
    pub fn build_args(&self) -> Vec<String> {
        let mut args = vec![
            "-y".to_string(),
            "-v".to_string(),
            "error".to_string(),
            "-i".to_string(),
            self.input.to_string_lossy().to_string(),
        ];
        args.extend(self.output_args.clone());
        args.push(self.output.to_string_lossy().to_string());
        args
    }
}

/// Normalizes media to the delivery format, or passes it through unchanged
/// when ffmpeg is not available.
#[derive(Debug, Clone)]
pub struct Transcoder {
    ffmpeg: Option<PathBuf>,
}

impl Transcoder {
    /// Look up ffmpeg in PATH. Absence is not an error.
    pub fn detect() -> Self {
        let ffmpeg = which::which("ffmpeg").ok();
        match &ffmpeg {
            Some(path) => debug!(ffmpeg = %path.display(), "ffmpeg found"),
            None => info!("ffmpeg not found in PATH, media will pass through unchanged"),
        }
        Self { ffmpeg }
    }

    /// A transcoder that always copies. Used when ffmpeg must not run.
    pub fn passthrough() -> Self {
        Self { ffmpeg: None }
    }

    /// Use a specific ffmpeg binary.
    pub fn with_ffmpeg(path: impl Into<PathBuf>) -> Self {
        Self {
            ffmpeg: Some(path.into()),
        }
    }

    pub fn is_passthrough(&self) -> bool {
        self.ffmpeg.is_none()
    }

    /// Re-encode `input` to `output`, or copy it unchanged in pass-through
    /// mode. A non-zero ffmpeg exit status is an error.
    pub async fn normalize(
        &self,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
    ) -> MediaResult<()> {
        let input = input.as_ref();
        let output = output.as_ref();

        let Some(ffmpeg) = &self.ffmpeg else {
            tokio::fs::copy(input, output).await?;
            info!(
                input = %input.display(),
                output = %output.display(),
                "pass-through copy (no ffmpeg)"
            );
            return Ok(());
        };

        let cmd = FfmpegCommand::delivery_encode(input, output);
        let args = cmd.build_args();
        debug!("running ffmpeg {}", args.join(" "));

        let result = Command::new(ffmpeg)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            let last_line = stderr.lines().last().unwrap_or("no output").to_string();
            return Err(MediaError::ffmpeg_failed(
                last_line,
                Some(stderr.into_owned()),
                result.status.code(),
            ));
        }

        info!(
            input = %input.display(),
            output = %output.display(),
            "re-encoded media for delivery"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn delivery_encode_args_are_fixed() {
        let args = FfmpegCommand::delivery_encode("in.mp4", "out.mp4").build_args();
        assert_eq!(args.first().map(String::as_str), Some("-y"));
        for expected in [
            "-i", "in.mp4", "-c:v", "libx264", "-preset", "veryfast", "-crf", "23", "-c:a",
            "aac", "-b:a", "128k", "-movflags", "+faststart",
        ] {
            assert!(args.contains(&expected.to_string()), "missing {expected}");
        }
        assert_eq!(args.last().map(String::as_str), Some("out.mp4"));
    }

    #[tokio::test]
    async fn passthrough_copies_file() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("raw.mp4");
        let output = dir.path().join("ready.mp4");
        tokio::fs::write(&input, b"raw bytes").await.unwrap();

        Transcoder::passthrough()
            .normalize(&input, &output)
            .await
            .unwrap();

        assert_eq!(std::fs::read(&output).unwrap(), b"raw bytes");
        assert!(input.exists(), "input must be kept for cleanup");
    }

    #[tokio::test]
    async fn passthrough_missing_input_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = Transcoder::passthrough()
            .normalize(dir.path().join("absent.mp4"), dir.path().join("out.mp4"))
            .await
            .unwrap_err();
        assert!(matches!(err, MediaError::Io(_)));
    }

    #[tokio::test]
    async fn failing_tool_reports_exit_status() {
        // `false` exits non-zero without reading its arguments, which is
        // exactly the shape of a broken ffmpeg.
        let Ok(false_bin) = which::which("false") else {
            return;
        };
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("raw.mp4");
        tokio::fs::write(&input, b"raw").await.unwrap();

        let err = Transcoder::with_ffmpeg(false_bin)
            .normalize(&input, dir.path().join("ready.mp4"))
            .await
            .unwrap_err();

        match err {
            MediaError::FfmpegFailed { exit_code, .. } => assert_eq!(exit_code, Some(1)),
            other => panic!("unexpected error: {other}"),
        }
    }
}
