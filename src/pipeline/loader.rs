use csv::ReaderBuilder;
use serde::Serialize;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

use super::columns::{resolve_columns, ColumnMismatch, CsvLayout};
use super::row::{HeaderIndex, RawRow, RowParser, UnexpectedValue, UnexpectedValueLog};
use crate::config::LoaderConfig;
use crate::constants::{annotation_categories, DEFAULT_ERROR_PREVIEW_LIMIT};
use crate::error::{EvalError, Result, RowError};
use crate::metrics::LoaderMetrics;
use crate::types::PredictionSet;
use crate::values::{AnnotationValues, ValueNormalizer};
use crate::video_id::{TikTokVideoIds, VideoIdResolver};

/// Diagnostics gathered while loading one file
#[derive(Debug, Clone, Default, Serialize)]
pub struct LoadReport {
    pub layout: CsvLayout,
    /// Data rows seen, including dropped and skipped ones
    pub rows_read: usize,
    /// Rows without a usable video identifier
    pub skipped_rows: usize,
    /// `Row N: message` for every row that failed to parse
    pub parse_errors: Vec<String>,
    /// The leading diagnostics echoed to the log, at most `error_preview_limit`
    pub parse_error_preview: Vec<String>,
    pub unexpected_values: Vec<UnexpectedValue>,
    pub column_mismatches: Vec<ColumnMismatch>,
    pub unresolved_categories: Vec<String>,
}

impl LoadReport {
    /// True when some data row didn't make it into the prediction set
    pub fn has_losses(&self) -> bool {
        self.skipped_rows > 0 || !self.parse_errors.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub predictions: PredictionSet,
    pub report: LoadReport,
}

/// Loads model predictions from CSV exports.
///
/// Two layouts are understood:
/// 1. TikTok exports with a `filename` or `1_Link1` column and
///    `1_Value1_<Category>_values` columns
/// 2. Standard files with a `video_id` column and one column per category
pub struct PredictionLoader {
    model_name: String,
    categories: Vec<String>,
    values: Box<dyn ValueNormalizer + Send + Sync>,
    video_ids: Box<dyn VideoIdResolver + Send + Sync>,
    error_preview_limit: usize,
    delimiter: u8,
}

impl PredictionLoader {
    pub fn new(model_name: impl Into<String>) -> Self {
        Self {
            model_name: model_name.into(),
            categories: annotation_categories(),
            values: Box::new(AnnotationValues::new()),
            video_ids: Box::new(TikTokVideoIds::new()),
            error_preview_limit: DEFAULT_ERROR_PREVIEW_LIMIT,
            delimiter: b',',
        }
    }

    pub fn from_config(config: &LoaderConfig) -> Result<Self> {
        Ok(Self::new(config.model_name.clone())
            .with_error_preview_limit(config.error_preview_limit)
            .with_delimiter(config.delimiter_byte()?))
    }

    /// Replace the canonical category list
    pub fn with_categories(mut self, categories: Vec<String>) -> Self {
        self.categories = categories;
        self
    }

    pub fn with_value_normalizer(
        mut self,
        values: impl ValueNormalizer + Send + Sync + 'static,
    ) -> Self {
        self.values = Box::new(values);
        self
    }

    pub fn with_video_id_resolver(
        mut self,
        video_ids: impl VideoIdResolver + Send + Sync + 'static,
    ) -> Self {
        self.video_ids = Box::new(video_ids);
        self
    }

    pub fn with_error_preview_limit(mut self, limit: usize) -> Self {
        self.error_preview_limit = limit;
        self
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Load predictions from a CSV file.
    ///
    /// Fails with [`EvalError::NotFound`] if the file doesn't exist. Rows that fail
    /// to parse are dropped and logged; use [`Self::load_with_report`] to see them.
    pub fn load(&self, csv_path: impl AsRef<Path>) -> Result<PredictionSet> {
        self.load_with_report(csv_path).map(|outcome| outcome.predictions)
    }

    pub fn load_with_report(&self, csv_path: impl AsRef<Path>) -> Result<LoadOutcome> {
        let path = csv_path.as_ref();
        let span = tracing::info_span!("load_predictions", model = %self.model_name);
        let _enter = span.enter();

        if !path.exists() {
            LoaderMetrics::record_load_failure("not_found");
            return Err(EvalError::NotFound(path.display().to_string()));
        }

        let start_time = Instant::now();
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .flexible(true)
            .from_path(path)?;

        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        debug!("Header has {} columns", headers.len());

        let columns = resolve_columns(&headers, &self.categories);
        let index = HeaderIndex::new(&headers);
        let parser = RowParser::new(self.values.as_ref(), self.video_ids.as_ref());
        let mut unexpected = UnexpectedValueLog::new();

        let mut predictions = Vec::new();
        let mut parse_errors = Vec::new();
        let mut rows_read = 0usize;
        let mut skipped_rows = 0usize;

        for (offset, result) in reader.records().enumerate() {
            // Row 1 is the header
            let row_num = offset + 2;
            rows_read += 1;

            let record = match result {
                Ok(record) => record,
                Err(e) if matches!(e.kind(), csv::ErrorKind::Io(_)) => {
                    LoaderMetrics::record_load_failure("io");
                    return Err(e.into());
                }
                Err(e) => {
                    let err = RowError::Malformed(e.to_string());
                    parse_errors.push(format!("Row {}: {}", row_num, err));
                    continue;
                }
            };

            let row = RawRow::new(&index, &record);
            match parser.parse(&row, &columns, row_num, &mut unexpected) {
                Ok(Some(prediction)) => predictions.push(prediction),
                Ok(None) => skipped_rows += 1,
                Err(e) => parse_errors.push(format!("Row {}: {}", row_num, e)),
            }
        }

        let parse_error_preview: Vec<String> = parse_errors
            .iter()
            .take(self.error_preview_limit)
            .cloned()
            .collect();
        if !parse_errors.is_empty() {
            warn!("Parse errors: {}", parse_errors.len());
            for error in &parse_error_preview {
                warn!("  {}", error);
            }
        }

        info!(
            "Loaded {} predictions from {}",
            predictions.len(),
            path.display()
        );
        LoaderMetrics::record_load(
            predictions.len(),
            skipped_rows,
            parse_errors.len(),
            unexpected.len(),
            start_time.elapsed().as_secs_f64(),
        );

        let count = predictions.len();
        let prediction_set = PredictionSet {
            model_name: self.model_name.clone(),
            predictions,
            total_count: count,
            success_count: count,
            failure_count: 0,
            failed_video_ids: Vec::new(),
        };

        let report = LoadReport {
            layout: columns.layout,
            rows_read,
            skipped_rows,
            parse_errors,
            parse_error_preview,
            unexpected_values: unexpected.into_entries(),
            column_mismatches: columns.mismatches,
            unresolved_categories: columns.unresolved,
        };

        Ok(LoadOutcome {
            predictions: prediction_set,
            report,
        })
    }
}

impl Default for PredictionLoader {
    fn default() -> Self {
        Self::new(crate::constants::DEFAULT_MODEL_NAME)
    }
}
