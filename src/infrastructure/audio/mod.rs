pub mod artifacts;
pub mod codec;
pub mod mp3_encoder;

pub use artifacts::ArtifactStore;
pub use codec::{decode_audio, encode_wav, resample, DecodedAudio};
pub use mp3_encoder::{FfmpegMp3Encoder, TrackEncoder};
