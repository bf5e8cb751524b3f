use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Normalized predictions for a single video
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Canonical video identifier (`user_videoid` where available)
    pub video_id: String,
    /// Category name -> code in {-1, 0, 1, 2}; holds every canonical category
    pub predictions: BTreeMap<String, i8>,
    pub success: bool,
    pub error_message: Option<String>,
    /// Seconds spent on inference; CSV exports don't carry it
    pub inference_time: f64,
}

impl PredictionResult {
    pub fn prediction(&self, category: &str) -> Option<i8> {
        self.predictions.get(category).copied()
    }
}

/// All predictions loaded from one source file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionSet {
    pub model_name: String,
    pub predictions: Vec<PredictionResult>,
    pub total_count: usize,
    pub success_count: usize,
    pub failure_count: usize,
    pub failed_video_ids: Vec<String>,
}

impl PredictionSet {
    pub fn len(&self) -> usize {
        self.predictions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predictions.is_empty()
    }

    /// First prediction recorded for a video
    pub fn get(&self, video_id: &str) -> Option<&PredictionResult> {
        self.predictions.iter().find(|p| p.video_id == video_id)
    }

    pub fn video_ids(&self) -> Vec<&str> {
        self.predictions.iter().map(|p| p.video_id.as_str()).collect()
    }

    /// Fraction of attempted videos that produced a prediction; 0.0 when empty
    pub fn success_rate(&self) -> f64 {
        if self.total_count == 0 {
            return 0.0;
        }
        self.success_count as f64 / self.total_count as f64
    }
}
