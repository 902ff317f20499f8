pub mod images;
pub mod table;
pub mod text;

use std::path::PathBuf;

use crate::config::DataPaths;
use crate::error::AppResult;
use crate::telemetry::metrics::{
    INGEST_IMAGES_DECODED, INGEST_IMAGES_SKIPPED, INGEST_OCR_LINES, INGEST_TABLE_ROWS,
};

pub use images::{ImageSet, load_images};
pub use table::{TabularDataset, load_table};
pub use text::{TextLines, load_text_lines};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct IngestedData {
    pub table: TabularDataset,
    pub lines: TextLines,
    pub images: ImageSet,
    /// Image directory entries that failed to decode.
    pub skipped_images: usize,
}

#[derive(Debug, Clone)]
pub struct Ingestor {
    csv_path: PathBuf,
    ocr_path: PathBuf,
    image_dir: PathBuf,
}

impl Ingestor {
    pub fn new(
        csv_path: impl Into<PathBuf>,
        ocr_path: impl Into<PathBuf>,
        image_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            csv_path: csv_path.into(),
            ocr_path: ocr_path.into(),
            image_dir: image_dir.into(),
        }
    }

    pub fn from_paths(paths: &DataPaths) -> Self {
        Self::new(&paths.csv, &paths.ocr, &paths.images)
    }

    #[tracing::instrument(
        name = "pipeline_stage ingest",
        skip(self),
        fields(
            pipeline.stage = "ingest",
            ingest.table_rows,
            ingest.ocr_lines,
            ingest.images,
            ingest.images_skipped,
        )
    )]
    pub fn process_data(&self) -> AppResult<IngestedData> {
        let table = load_table(&self.csv_path)?;
        let lines = load_text_lines(&self.ocr_path)?;
        let image_load = load_images(&self.image_dir)?;

        let span = tracing::Span::current();
        span.record("ingest.table_rows", table.row_count());
        span.record("ingest.ocr_lines", lines.len());
        span.record("ingest.images", image_load.images.len());
        span.record("ingest.images_skipped", image_load.skipped);

        INGEST_TABLE_ROWS.record(table.row_count() as f64, &[]);
        INGEST_OCR_LINES.record(lines.len() as f64, &[]);
        INGEST_IMAGES_DECODED.add(image_load.images.len() as u64, &[]);
        INGEST_IMAGES_SKIPPED.add(image_load.skipped as u64, &[]);

        tracing::info!(
            table_rows = table.row_count(),
            ocr_lines = lines.len(),
            images = image_load.images.len(),
            images_skipped = image_load.skipped,
            "Ingestion complete"
        );

        Ok(IngestedData {
            table,
            lines,
            images: image_load.images,
            skipped_images: image_load.skipped,
        })
    }
}
