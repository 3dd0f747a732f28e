//! Pitch-preserving tempo change (WSOLA).
//!
//! Frames are taken from the input at `hop * tempo` intervals and overlap-added
//! at `hop` intervals. Each frame start is nudged within a small tolerance to
//! the position that best continues the previous frame, which avoids the
//! phase cancellation of a plain overlap-add.

use std::f32::consts::PI;

/// Segments at or below this length keep their natural speed
pub const MIN_TEMPO_DURATION_SECS: f32 = 0.3;

const FRAME_SECS: f32 = 0.040;
const SEEK_SECS: f32 = 0.010;

pub fn should_adjust_tempo(duration_secs: f32, speed: f32) -> bool {
    duration_secs > MIN_TEMPO_DURATION_SECS && (speed - 1.0).abs() > f32::EPSILON
}

/// Returns `input` played `tempo` times faster with unchanged pitch.
/// Output length is `round(input.len() / tempo)`.
pub fn change_tempo(input: &[f32], sample_rate: u32, tempo: f32) -> Vec<f32> {
    if input.is_empty() || tempo <= 0.0 || (tempo - 1.0).abs() <= f32::EPSILON {
        return input.to_vec();
    }

    let frame_len = ((sample_rate as f32 * FRAME_SECS) as usize).max(16);
    let hop = frame_len / 2;
    let seek = (sample_rate as f32 * SEEK_SECS) as usize;
    let target_len = (input.len() as f32 / tempo).round() as usize;

    if input.len() < frame_len * 2 {
        return input.to_vec();
    }

    let window: Vec<f32> = (0..frame_len)
        .map(|n| 0.5 - 0.5 * (2.0 * PI * n as f32 / frame_len as f32).cos())
        .collect();
    let last_start = input.len() - frame_len;

    let mut output = vec![0.0f32; target_len + frame_len];
    let mut norm = vec![0.0f32; target_len + frame_len];

    let mut prev_start: Option<usize> = None;
    let mut out_pos = 0usize;
    let mut frame = 0usize;

    while out_pos < target_len {
        let nominal = ((frame * hop) as f32 * tempo).round() as usize;
        let start = match prev_start {
            None => nominal.min(last_start),
            Some(prev) => best_start(input, (prev + hop).min(last_start), nominal, seek, hop, last_start),
        };

        for (i, w) in window.iter().enumerate() {
            output[out_pos + i] += input[start + i] * w;
            norm[out_pos + i] += w;
        }

        prev_start = Some(start);
        out_pos += hop;
        frame += 1;
    }

    output.truncate(target_len);
    for (sample, weight) in output.iter_mut().zip(norm.iter()) {
        if *weight > 1e-3 {
            *sample /= weight;
        }
    }
    output
}

/// Start position within `nominal ± seek` whose first `overlap` samples best
/// match the natural continuation of the previous frame.
fn best_start(
    input: &[f32],
    continuation: usize,
    nominal: usize,
    seek: usize,
    overlap: usize,
    last_start: usize,
) -> usize {
    let lo = nominal.saturating_sub(seek).min(last_start);
    let hi = (nominal + seek).min(last_start);
    let reference = &input[continuation..continuation + overlap];

    let mut best = lo;
    let mut best_score = f32::MIN;
    for candidate in lo..=hi {
        let score: f32 = reference
            .iter()
            .zip(&input[candidate..candidate + overlap])
            .map(|(a, b)| a * b)
            .sum();
        if score > best_score {
            best_score = score;
            best = candidate;
        }
    }
    best
}
