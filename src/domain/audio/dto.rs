use super::model::{GenerationConfig, PairWarning, TrackSegment};
use crate::domain::phrases::PhrasePair;
use serde::{Deserialize, Serialize};

/// Request for POST /api/audio/generate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub pairs: Vec<PhrasePair>,
    pub config: GenerationConfig,
}

/// Response for POST /api/audio/generate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationReport {
    pub content_hash: String,
    pub file_name: String,
    pub download_url: String,
    pub pairs_total: usize,
    pub pairs_rendered: usize,
    pub duration_ms: u64,
    pub segments: Vec<TrackSegment>,
    pub warnings: Vec<PairWarning>,
    /// True when served from a previous identical run
    pub cached: bool,
}
