use super::codec::encode_wav;
use async_trait::async_trait;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Exports the concatenated mono track to its final container
#[async_trait]
pub trait TrackEncoder: Send + Sync {
    /// Encode mono PCM. An empty buffer must still produce a valid file.
    async fn encode(&self, samples: &[f32], sample_rate: u32) -> Result<Vec<u8>, String>;

    /// MIME type of the produced bytes
    fn content_type(&self) -> &'static str {
        "audio/mpeg"
    }
}

/// MP3 export by piping WAV through ffmpeg/libmp3lame
pub struct FfmpegMp3Encoder {
    ffmpeg_path: String,
    bitrate: String,
}

impl FfmpegMp3Encoder {
    pub fn new(ffmpeg_path: String, bitrate: String) -> Self {
        Self {
            ffmpeg_path,
            bitrate,
        }
    }
}

#[async_trait]
impl TrackEncoder for FfmpegMp3Encoder {
    async fn encode(&self, samples: &[f32], sample_rate: u32) -> Result<Vec<u8>, String> {
        let wav = encode_wav(samples, sample_rate)?;

        tracing::debug!(
            samples = samples.len(),
            sample_rate = sample_rate,
            bitrate = %self.bitrate,
            "Encoding track with ffmpeg"
        );

        let mut child = Command::new(&self.ffmpeg_path)
            .args([
                "-hide_banner",
                "-loglevel",
                "error",
                "-f",
                "wav",
                "-i",
                "pipe:0",
                "-codec:a",
                "libmp3lame",
                "-b:a",
                &self.bitrate,
                "-f",
                "mp3",
                "pipe:1",
            ])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| format!("failed to start {}: {}", self.ffmpeg_path, e))?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| "ffmpeg stdin unavailable".to_string())?;

        // Feed stdin concurrently so a full stdout pipe cannot stall ffmpeg
        let writer = tokio::spawn(async move {
            let result = stdin.write_all(&wav).await;
            drop(stdin);
            result
        });

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| format!("ffmpeg failed: {}", e))?;

        writer
            .await
            .map_err(|e| format!("ffmpeg input task failed: {}", e))?
            .map_err(|e| format!("failed to write to ffmpeg: {}", e))?;

        if !output.status.success() {
            return Err(format!(
                "ffmpeg exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            ));
        }

        tracing::debug!(mp3_size = output.stdout.len(), "Track encoded");

        Ok(output.stdout)
    }
}
