pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod pipeline;
pub mod types;
pub mod values;
pub mod video_id;

pub use error::{EvalError, Result, RowError};
pub use pipeline::{LoadOutcome, LoadReport, PredictionLoader};
pub use types::{PredictionResult, PredictionSet};
pub use values::{AnnotationValues, ValueNormalizer};
pub use video_id::{normalize_video_id, TikTokVideoIds, VideoIdResolver};
