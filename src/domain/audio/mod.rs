pub mod cache;
pub mod dto;
pub mod error;
pub mod model;
pub mod normalize;
pub mod pipeline;
pub mod service;
pub mod tempo;

pub use cache::{GenerationCache, StoredGeneration};
pub use dto::{GenerateRequest, GenerationReport};
pub use error::{AudioGenerationError, SynthesisFailure};
pub use model::{
    AudioTrack, GeneratedTrack, GenerationConfig, PairWarning, SegmentKind, Side, TrackSegment,
};
pub use normalize::TextNormalizer;
pub use pipeline::AudioPipeline;
pub use service::{generation_digest, AudioService, AudioServiceApi};
